//! Custom scrollbar thumbs: size, travel range and content mapping.

use super::{GridMetrics, Measurements};
use crate::geometry::constrain;

/// Smallest thumb length, so a thumb stays grabbable on huge content.
pub const MIN_THUMB_LENGTH: f32 = 10.0;

/// Which scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// One thumb and its track, in container pixels along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollbarState {
    /// The content overflows on this axis.
    pub display: bool,
    /// Leading edge of the thumb.
    pub position: f32,
    pub length: f32,
    /// First valid thumb position.
    pub start: f32,
    /// Far end of the track.
    pub end: f32,
    /// Last valid thumb position.
    pub stop: f32,
    pub padding: f32,
    pub thickness: f32,
}

impl ScrollbarState {
    fn sized(visible: bool, measurements: &Measurements) -> Self {
        if visible {
            Self {
                display: true,
                padding: measurements.scrollbar_padding,
                thickness: measurements.scrollbar_thickness,
                ..Self::default()
            }
        } else {
            Self::default()
        }
    }

    fn fit_thumb(&mut self, viewport: f32, content: f32) {
        let ratio = if content > 0.0 {
            (viewport / content).min(1.0)
        } else {
            1.0
        };
        self.length = ((self.end - self.start) * ratio)
            .floor()
            .max(MIN_THUMB_LENGTH);
        self.stop = self.end - self.length;
    }

    /// Length of the thumb's travel.
    pub fn travel(&self) -> f32 {
        (self.stop - self.start).max(0.0)
    }

    /// How far along its travel the thumb is, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        let travel = self.travel();
        if travel <= 0.0 {
            return 0.0;
        }
        constrain((self.position - self.start) / travel, 0.0, 1.0)
    }

    /// Move the thumb, clamped to its travel; returns the applied position.
    pub fn set_position(&mut self, position: f32) -> f32 {
        self.position = constrain(position, self.start, self.stop);
        self.position
    }

    /// Place the thumb at a fraction of its travel.
    pub fn set_fraction(&mut self, fraction: f32) -> f32 {
        self.set_position(self.start + self.travel() * constrain(fraction, 0.0, 1.0))
    }

    /// The thumb sits at either end of its travel.
    pub fn at_bound(&self) -> bool {
        (self.position - self.start).abs() < f32::EPSILON
            || (self.position - self.stop).abs() < f32::EPSILON
    }
}

/// Both thumbs of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scrollbars {
    pub vertical: ScrollbarState,
    pub horizontal: ScrollbarState,
}

impl Scrollbars {
    /// Size and place both thumbs for `metrics`.
    ///
    /// With `previous` the thumbs keep their positions (clamped to the new
    /// travel); otherwise they start at the top/left.
    pub fn compute(
        metrics: &GridMetrics,
        measurements: &Measurements,
        freeze_scroll: bool,
        previous: Option<&Self>,
    ) -> Self {
        let body = &metrics.body;
        let panes = &metrics.panes;
        let header_height = metrics.header.height;

        let mut vertical = ScrollbarState::sized(body.height < body.scroll_height, measurements);
        let mut horizontal = ScrollbarState::sized(panes.loose < panes.scroll, measurements);

        vertical.start = header_height + vertical.padding;
        vertical.end = header_height + body.height - horizontal.thickness - vertical.padding;
        vertical.fit_thumb(body.height, body.scroll_height);
        if horizontal.display {
            vertical.stop -= horizontal.padding;
        }

        horizontal.start = horizontal.padding;
        if freeze_scroll {
            horizontal.start += panes.freeze;
        }
        horizontal.end = panes.freeze + panes.loose - vertical.thickness - horizontal.padding;
        horizontal.fit_thumb(panes.loose, panes.scroll);
        if vertical.display {
            horizontal.stop -= vertical.padding;
        }

        match previous {
            Some(prev) => {
                vertical.set_position(prev.vertical.position);
                horizontal.set_position(prev.horizontal.position);
            }
            None => {
                vertical.position = vertical.start;
                horizontal.position = horizontal.start;
            }
        }

        Self {
            vertical,
            horizontal,
        }
    }

    pub fn get(&self, axis: Axis) -> &ScrollbarState {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut ScrollbarState {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }

    /// Content offset implied by the thumb on `axis`.
    pub fn content_offset(&self, axis: Axis, metrics: &GridMetrics) -> f32 {
        let thumb = self.get(axis);
        match axis {
            Axis::Vertical => metrics.max_scroll_top() * thumb.fraction(),
            Axis::Horizontal => metrics.max_scroll_left() * thumb.fraction(),
        }
    }

    /// Move the thumb on `axis` to match a content offset.
    pub fn sync_to_offset(&mut self, axis: Axis, offset: f32, metrics: &GridMetrics) {
        let max = match axis {
            Axis::Vertical => metrics.max_scroll_top(),
            Axis::Horizontal => metrics.max_scroll_left(),
        };
        let fraction = if max > 0.0 { offset / max } else { 0.0 };
        self.get_mut(axis).set_fraction(fraction);
    }
}
