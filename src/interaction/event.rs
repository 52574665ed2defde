//! Input events the grid reacts to and the effects it asks the host to apply.

use crate::layout::Axis;
use crate::render::{Edge, OverlayView};
use crate::types::PageRequest;

use super::menu::{MenuAction, MenuView};

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Label of a header cell (storage index).
    HeaderLabel(usize),
    ResizeHandle(usize),
    MoveHandle(usize),
    MenuArrow(usize),
    Thumb(Axis),
    /// The open column menu or its submenu.
    Menu,
    /// A body cell: position in the live rows and storage column.
    BodyCell { row: usize, column: usize },
    /// The cancel link of a lazy-load sentinel.
    SentinelCancel(Edge),
    /// Anywhere else inside the container.
    Container,
    /// Outside the container.
    Outside,
}

/// Things the pointer can hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Container,
    Thumb(Axis),
    Menu,
    SubMenu,
    BodyCell { row: usize, column: usize },
}

/// Handle for a cancellable delayed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// Handle for one issued page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(pub u64);

/// A discrete input. Coordinates are page pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    PointerDown { x: f32, y: f32, target: HitTarget },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Click { target: HitTarget },
    /// Wheel notches; positive scrolls up.
    Wheel { delta: f32 },
    Enter(HoverTarget),
    Leave(HoverTarget),
    Menu(MenuAction),
    Timer(TimerToken),
}

/// Which DOM elements a hover highlight applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTarget {
    /// Both pane rows of a logical row.
    Row(usize),
    /// Every body cell of a storage column.
    Column(usize),
    Cell { row: usize, column: usize },
}

/// A side effect the host applies after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleTimer { token: TimerToken, delay_ms: u32 },
    CancelTimer(TimerToken),
    ShowMenu(MenuView),
    HideMenu,
    /// Live column resize before release.
    ResizePreview {
        column: usize,
        width: f32,
        scroll_width: f32,
    },
    /// Place (or create) the column-move marker at a container-relative left.
    MoveMarker { left: f32 },
    RemoveMarker,
    ThumbOpacity { axis: Axis, opacity: f32 },
    Highlight {
        target: HighlightTarget,
        class: String,
        on: bool,
    },
    /// The content scrolled; reported to the embedding page.
    Scrolled { axis: Axis, offset: f32 },
    Fetch {
        ticket: FetchTicket,
        request: PageRequest,
    },
    ShowOverlay(OverlayView),
    HideOverlay,
}

/// How much has to be redrawn after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Refresh {
    #[default]
    None,
    /// Scroll offsets and thumb positions only.
    Scroll,
    /// Body rows (and sort indicators); the header persists.
    Body,
    /// Metrics, header, body and scrollbars. `reset` puts the thumbs and
    /// content back at the start.
    Full { reset: bool },
}

impl Refresh {
    /// The larger of two refresh requests.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Full { reset: a }, Self::Full { reset: b }) => Self::Full { reset: a || b },
            (a, b) => a.max(b),
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub refresh: Refresh,
    pub effects: Vec<Effect>,
    /// Let the browser handle the event too (page scroll on wheel).
    pub propagate: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn refresh(refresh: Refresh) -> Self {
        Self {
            refresh,
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Fold `other` into this outcome.
    pub fn absorb(&mut self, other: Self) {
        self.refresh = self.refresh.merge(other.refresh);
        self.effects.extend(other.effects);
        self.propagate |= other.propagate;
    }
}
