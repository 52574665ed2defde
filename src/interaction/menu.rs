//! Per-column popover menu: item visibility, open/close and the idle-hide
//! timer.

use crate::config::GridOptions;
use crate::i18n::Translate;
use crate::layout::MenuPlacement;
use crate::model::SortState;
use crate::types::{ColumnDescriptor, SortDirection};

use super::event::{Effect, HoverTarget, Outcome, TimerToken};

/// A command picked from the menu; applies to the column it was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SortAscending,
    SortDescending,
    ClearSort,
    Freeze,
    Unfreeze,
}

impl MenuAction {
    const ALL: [Self; 5] = [
        Self::SortAscending,
        Self::SortDescending,
        Self::ClearSort,
        Self::Freeze,
        Self::Unfreeze,
    ];

    /// Short name used in markup (`data-menu-item`).
    pub fn key(self) -> &'static str {
        match self {
            Self::SortAscending => "sort-asc",
            Self::SortDescending => "sort-desc",
            Self::ClearSort => "sort-clear",
            Self::Freeze => "freeze",
            Self::Unfreeze => "unfreeze",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    fn translation_key(self) -> &'static str {
        match self {
            Self::SortAscending => "column.menu.items.sort-asc",
            Self::SortDescending => "column.menu.items.sort-desc",
            Self::ClearSort => "column.menu.items.sort-clear",
            Self::Freeze => "column.menu.items.freeze",
            Self::Unfreeze => "column.menu.items.unfreeze",
        }
    }
}

/// One visible menu row.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Action {
        action: MenuAction,
        label: String,
        checked: bool,
    },
    Separator,
}

/// A menu ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    /// Storage index of the column the menu belongs to.
    pub column: usize,
    pub items: Vec<MenuItem>,
    pub placement: MenuPlacement,
}

/// Items for `column` given the current options and sort.
///
/// Sort items need a sortable column and carry a check on the active
/// direction; the freeze item toggles with the column's state; a separator
/// appears only between the two groups.
pub fn menu_items(
    index: usize,
    column: &ColumnDescriptor,
    options: &GridOptions,
    sort: &SortState,
    translator: &dyn Translate,
) -> Vec<MenuItem> {
    let item = |action: MenuAction, checked: bool| MenuItem::Action {
        action,
        label: translator.translate(action.translation_key()),
        checked,
    };
    let mut items = Vec::new();
    let sortable = options.sortable && column.sortable;
    let freezable = options.freezable && column.freezable;
    if sortable {
        let active = sort.is_column(index);
        items.push(item(
            MenuAction::SortAscending,
            active && sort.direction == SortDirection::Ascending,
        ));
        items.push(item(
            MenuAction::SortDescending,
            active && sort.direction == SortDirection::Descending,
        ));
        items.push(item(MenuAction::ClearSort, false));
    }
    if sortable && freezable {
        items.push(MenuItem::Separator);
    }
    if freezable {
        if column.frozen {
            items.push(item(MenuAction::Unfreeze, false));
        } else {
            items.push(item(MenuAction::Freeze, false));
        }
    }
    items
}

/// Open/hover/timer state of the column menu.
#[derive(Debug, Clone, Default)]
pub struct ColumnMenu {
    open: Option<usize>,
    root_hover: bool,
    sub_hover: bool,
    pending: Option<TimerToken>,
    next_token: u64,
}

impl ColumnMenu {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Column the menu is open on.
    pub fn column(&self) -> Option<usize> {
        self.open
    }

    pub fn is_hovered(&self) -> bool {
        self.root_hover || self.sub_hover
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    fn cancel_timer(&mut self, out: &mut Outcome) {
        if let Some(token) = self.pending.take() {
            out.push(Effect::CancelTimer(token));
        }
    }

    /// Open the menu on `view.column`, closing any open menu first.
    pub fn open(&mut self, view: MenuView) -> Outcome {
        let mut out = self.hide(true);
        self.cancel_timer(&mut out);
        log::debug!("column menu opened on column {}", view.column);
        self.open = Some(view.column);
        out.push(Effect::ShowMenu(view));
        out
    }

    /// Redraw the open menu's items (after a sort changed the checkmarks).
    pub fn update(&self, view: MenuView) -> Outcome {
        if self.open == Some(view.column) {
            Outcome::none().with_effect(Effect::ShowMenu(view))
        } else {
            Outcome::none()
        }
    }

    /// Close the menu.
    ///
    /// Without `force` a hovered menu stays open. Any pending hide timer is
    /// cancelled either way once the menu closes.
    pub fn hide(&mut self, force: bool) -> Outcome {
        let mut out = Outcome::none();
        if self.open.is_none() {
            return out;
        }
        if !force && self.is_hovered() {
            return out;
        }
        self.cancel_timer(&mut out);
        self.open = None;
        self.root_hover = false;
        self.sub_hover = false;
        out.push(Effect::HideMenu);
        out
    }

    /// Pointer entered the menu or its submenu.
    pub fn enter(&mut self, target: HoverTarget) -> Outcome {
        let mut out = Outcome::none();
        match target {
            HoverTarget::Menu => self.root_hover = true,
            HoverTarget::SubMenu => self.sub_hover = true,
            _ => return out,
        }
        self.cancel_timer(&mut out);
        out
    }

    /// Pointer left the menu or its submenu: schedule an idle hide.
    pub fn leave(&mut self, target: HoverTarget, delay_ms: u32) -> Outcome {
        let mut out = Outcome::none();
        match target {
            HoverTarget::Menu => self.root_hover = false,
            HoverTarget::SubMenu => self.sub_hover = false,
            _ => return out,
        }
        if self.open.is_none() {
            return out;
        }
        self.cancel_timer(&mut out);
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending = Some(token);
        out.push(Effect::ScheduleTimer { token, delay_ms });
        out
    }

    /// A hide timer fired. Stale tokens are ignored.
    pub fn timer_fired(&mut self, token: TimerToken) -> Outcome {
        if self.pending != Some(token) {
            log::trace!("stale menu timer {token:?} ignored");
            return Outcome::none();
        }
        self.pending = None;
        self.hide(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::i18n::DevTranslations;
    use crate::types::DataType;

    fn view(column: usize) -> MenuView {
        MenuView {
            column,
            items: Vec::new(),
            placement: MenuPlacement::default(),
        }
    }

    fn opts(sortable: bool, freezable: bool) -> GridOptions {
        GridOptions {
            sortable,
            freezable,
            column_menus: true,
            ..GridOptions::default()
        }
    }

    #[test]
    fn separator_only_between_groups() {
        let col = ColumnDescriptor::new("A", DataType::String, 80.0);
        let both = menu_items(0, &col, &opts(true, true), &SortState::default(), &DevTranslations);
        assert_eq!(both.len(), 5);
        assert_eq!(both[3], MenuItem::Separator);
        let sort_only =
            menu_items(0, &col, &opts(true, false), &SortState::default(), &DevTranslations);
        assert!(!sort_only.contains(&MenuItem::Separator));
        assert_eq!(sort_only.len(), 3);
        let freeze_only =
            menu_items(0, &col, &opts(false, true), &SortState::default(), &DevTranslations);
        assert_eq!(freeze_only.len(), 1);
    }

    #[test]
    fn active_direction_is_checked() {
        let col = ColumnDescriptor::new("A", DataType::String, 80.0);
        let sort = SortState::new(0, SortDirection::Descending, "A");
        let items = menu_items(0, &col, &opts(true, false), &sort, &DevTranslations);
        assert!(matches!(items[0], MenuItem::Action { checked: false, .. }));
        assert!(matches!(items[1], MenuItem::Action { checked: true, .. }));
        let other = menu_items(1, &col, &opts(true, false), &sort, &DevTranslations);
        assert!(matches!(other[1], MenuItem::Action { checked: false, .. }));
    }

    #[test]
    fn frozen_column_offers_unfreeze() {
        let col = ColumnDescriptor::new("A", DataType::String, 80.0).with_frozen(true);
        let items = menu_items(0, &col, &opts(false, true), &SortState::default(), &DevTranslations);
        assert!(matches!(
            &items[0],
            MenuItem::Action { action: MenuAction::Unfreeze, label, .. } if label == "Unfreeze Column"
        ));
    }

    #[test]
    fn action_keys_round_trip() {
        assert_eq!(MenuAction::from_key("sort-desc"), Some(MenuAction::SortDescending));
        assert_eq!(MenuAction::from_key("unfreeze"), Some(MenuAction::Unfreeze));
        assert_eq!(MenuAction::from_key("bogus"), None);
    }

    #[test]
    fn hovered_menu_survives_soft_hide() {
        let mut menu = ColumnMenu::default();
        menu.open(view(2));
        menu.enter(HoverTarget::Menu);
        assert!(menu.hide(false).effects.is_empty());
        assert!(menu.is_open());
        let out = menu.hide(true);
        assert!(out.effects.contains(&Effect::HideMenu));
        assert!(!menu.is_open());
    }

    #[test]
    fn leave_schedules_and_timer_closes() {
        let mut menu = ColumnMenu::default();
        menu.open(view(1));
        menu.enter(HoverTarget::Menu);
        let out = menu.leave(HoverTarget::Menu, 1000);
        let token = menu.pending_timer().unwrap();
        assert!(out
            .effects
            .contains(&Effect::ScheduleTimer { token, delay_ms: 1000 }));
        let out = menu.timer_fired(token);
        assert!(out.effects.contains(&Effect::HideMenu));
        assert!(!menu.is_open());
    }

    #[test]
    fn reopen_cancels_pending_hide() {
        let mut menu = ColumnMenu::default();
        menu.open(view(1));
        menu.leave(HoverTarget::Menu, 1000);
        let stale = menu.pending_timer().unwrap();
        let out = menu.open(view(3));
        assert!(out.effects.contains(&Effect::CancelTimer(stale)));
        assert_eq!(menu.column(), Some(3));
        // The cancelled timer firing late must not close the new menu.
        assert!(menu.timer_fired(stale).effects.is_empty());
        assert!(menu.is_open());
    }
}
