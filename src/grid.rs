//! The per-instance grid: state, the public operations and the single
//! re-layout entry point.
//!
//! [`GridState`] is everything the layout, render and interaction modules
//! read and write. [`Datagrid`] owns one state plus the gesture controller,
//! the fetch tracker and the injected services, and turns every input into
//! an [`Outcome`] for the host to apply.

use crate::config::{DataSourceSpec, GridOptions};
use crate::error::{DatagridError, Result};
use crate::fetch::{edge_request, initial_request, FetchKind, FetchTracker};
use crate::i18n::{DevTranslations, Translate};
use crate::interaction::{Effect, FetchTicket, GridEvent, Interaction, Outcome, Refresh};
use crate::layout::{Axis, GridMetrics, Measurements, Rect, Scrollbars, Viewport};
use crate::model::{sort_rows, ColumnModel, DataSource, SortState};
use crate::render::{
    ChronoDateFormatter, DateFormatter, Edge, Frame, FrameContext, OverlayView, RenderBackend,
    RenderParams,
};
use crate::types::{ColumnDescriptor, DataType, PageResponse, SortDirection};

/// Mutable state of one grid.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    pub options: GridOptions,
    pub measurements: Measurements,
    /// Inner box of the container element, in page pixels.
    pub container: Rect,
    pub columns: ColumnModel,
    pub data: DataSource,
    pub sort: SortState,
    pub metrics: GridMetrics,
    pub scrollbars: Scrollbars,
    pub viewport: Viewport,
}

impl GridState {
    pub fn new(options: GridOptions, measurements: Measurements, container: Rect) -> Self {
        Self {
            options,
            measurements,
            container,
            ..Self::default()
        }
    }

    /// Install a column model and rows: sanitise the columns, add the spacer,
    /// parse date cells and apply any pre-sort. Ends with a reset layout.
    pub fn load(&mut self, columns: Vec<ColumnDescriptor>, data: DataSource) {
        self.columns = ColumnModel::new(columns);
        let presorted = self.columns.sanitize(&self.options);
        if self.options.spacer_col {
            self.columns.append_spacer(self.options.spacer_col_width);
        }
        self.data = data;
        self.coerce_dates();
        self.sort.clear();
        if let Some((index, direction)) = presorted {
            if self.options.client_sort() {
                let field = self.sort_field(index);
                self.sort = SortState::new(index, direction, field);
                log::debug!("rows pre-sorted on column {index} {}", direction.as_str());
                self.apply_sort();
            }
        }
        self.relayout(true);
    }

    fn coerce_dates(&mut self) {
        let dates: Vec<usize> = self
            .columns
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.data_type == DataType::Date)
            .map(|(i, _)| i)
            .collect();
        self.data.coerce_dates(&dates);
    }

    fn sort_field(&self, index: usize) -> String {
        self.columns
            .column(index)
            .map(|c| c.data_field.clone().unwrap_or_else(|| c.label.clone()))
            .unwrap_or_default()
    }

    /// Recompute metrics and scrollbars.
    ///
    /// With `reset` the content goes back to the first row and the left
    /// edge; otherwise the current offsets are kept, clamped to the new
    /// content size.
    pub fn relayout(&mut self, reset: bool) {
        self.metrics = GridMetrics::compute(
            &self.columns,
            self.data.len(),
            &self.options,
            &self.measurements,
            self.container,
        );
        self.scrollbars = Scrollbars::compute(
            &self.metrics,
            &self.measurements,
            self.options.freeze_scroll,
            None,
        );
        if reset {
            self.viewport = Viewport::at_start(&self.metrics);
        } else {
            self.viewport.clamp(&self.metrics);
        }
        self.scrollbars
            .sync_to_offset(Axis::Vertical, self.viewport.scroll_top, &self.metrics);
        self.scrollbars
            .sync_to_offset(Axis::Horizontal, self.viewport.scroll_left, &self.metrics);
    }

    /// Re-sort the live rows on the active sort, if any.
    pub fn apply_sort(&mut self) {
        let Some(index) = self.sort.column else {
            return;
        };
        let Some(data_type) = self.columns.column(index).map(|c| c.data_type) else {
            return;
        };
        sort_rows(self.data.rows_mut(), index, data_type, self.sort.direction);
    }

    /// Sort on column `index`.
    ///
    /// With `direction` that direction is used; without it an already active
    /// column flips and a new column keeps the current direction. Returns
    /// `false` when sorting is off or the column is not sortable.
    pub fn sort_by(&mut self, index: usize, direction: Option<SortDirection>) -> bool {
        if !self.options.client_sort() {
            return false;
        }
        let sortable = self
            .columns
            .column(index)
            .is_some_and(|c| c.sortable && !c.is_spacer());
        if !sortable {
            return false;
        }
        let field = self.sort_field(index);
        self.sort = self.sort.toggled(index, field, direction);
        log::debug!(
            "sorting on column {index} {}",
            self.sort.direction.as_str()
        );
        self.apply_sort();
        true
    }

    /// Drop the active sort and restore load order.
    pub fn clear_sort(&mut self) -> bool {
        if !self.sort.is_active() {
            return false;
        }
        self.sort.clear();
        self.data.restore_pristine();
        log::debug!("sort cleared");
        true
    }

    pub fn freeze(&mut self, index: usize) -> bool {
        self.columns.freeze(index, self.options.freezable)
    }

    pub fn unfreeze(&mut self, index: usize) -> bool {
        self.columns.unfreeze(index)
    }

    fn scrolled(axis: Axis, offset: f32) -> Outcome {
        Outcome::refresh(Refresh::Scroll).with_effect(Effect::Scrolled { axis, offset })
    }

    /// Put the thumb on `axis` at `position` and scroll the content to match.
    pub fn scroll_thumb_to(&mut self, axis: Axis, position: f32) -> Outcome {
        self.scrollbars.get_mut(axis).set_position(position);
        let offset = self.scrollbars.content_offset(axis, &self.metrics);
        match axis {
            Axis::Vertical => self.viewport.scroll_top = offset,
            Axis::Horizontal => self.viewport.scroll_left = offset,
        }
        Self::scrolled(axis, offset)
    }

    /// Scroll the content on `axis` to `offset` and move the thumb to match.
    pub fn scroll_content_to(&mut self, axis: Axis, offset: f32) -> Outcome {
        match axis {
            Axis::Vertical => self.viewport.scroll_top = offset,
            Axis::Horizontal => self.viewport.scroll_left = offset,
        }
        self.viewport.clamp(&self.metrics);
        let offset = match axis {
            Axis::Vertical => self.viewport.scroll_top,
            Axis::Horizontal => self.viewport.scroll_left,
        };
        self.scrollbars.sync_to_offset(axis, offset, &self.metrics);
        Self::scrolled(axis, offset)
    }

    /// Scroll to `offset` pixels below the first data row.
    pub fn scroll_to(&mut self, offset: f32) -> Outcome {
        self.scroll_content_to(Axis::Vertical, self.metrics.body.start + offset)
    }

    /// First data row at the top; hides the north sentinel.
    pub fn scroll_to_top(&mut self) -> Outcome {
        self.scroll_content_to(Axis::Vertical, Viewport::top_offset(&self.metrics))
    }

    /// Last data row at the bottom; hides the south sentinel.
    pub fn scroll_to_bottom(&mut self) -> Outcome {
        self.scroll_content_to(Axis::Vertical, Viewport::bottom_offset(&self.metrics))
    }

    /// Loose panes back to their left edge.
    pub fn scroll_to_start(&mut self) -> Outcome {
        self.scroll_content_to(Axis::Horizontal, 0.0)
    }

    /// Wheel over the container: move the vertical thumb by `wheel_step`
    /// per notch. At a bound (or without a vertical bar) the event is left
    /// to the page.
    pub fn wheel(&mut self, delta: f32) -> Outcome {
        let thumb = self.scrollbars.vertical;
        if !thumb.display {
            return Outcome {
                propagate: true,
                ..Outcome::none()
            };
        }
        let target = thumb.position - delta * self.options.wheel_step;
        let clamped = target.clamp(thumb.start, thumb.stop.max(thumb.start));
        if (clamped - thumb.position).abs() < f32::EPSILON {
            return Outcome {
                propagate: true,
                ..Outcome::none()
            };
        }
        self.scroll_thumb_to(Axis::Vertical, clamped)
    }
}

/// Check the two fatal construction conditions, column model first.
pub fn validate(options: &GridOptions, translator: &dyn Translate) -> Result<()> {
    let has_columns = options.column_model.as_ref().is_some_and(|c| !c.is_empty());
    if !options.is_ajax() && !has_columns {
        return Err(DatagridError::InvalidColumnModel(
            translator.translate("error.invalid-ds-json"),
        ));
    }
    let source_ok = match &options.data_source {
        Some(DataSourceSpec::Url(url)) => options.is_ajax() && !url.trim().is_empty(),
        Some(DataSourceSpec::Rows(rows)) => !options.is_ajax() && !rows.is_empty(),
        None => false,
    };
    if !source_ok {
        return Err(DatagridError::InvalidDataSource(
            translator.translate("error.invalid-ds"),
        ));
    }
    Ok(())
}

/// One datagrid instance.
pub struct Datagrid {
    state: GridState,
    interaction: Interaction,
    fetch: FetchTracker,
    translator: Box<dyn Translate>,
    formatter: Box<dyn DateFormatter>,
    /// Columns and rows are installed.
    ready: bool,
}

impl std::fmt::Debug for Datagrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datagrid")
            .field("state", &self.state)
            .field("interaction", &self.interaction)
            .field("fetch", &self.fetch)
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

impl Datagrid {
    /// Grid with the built-in strings, `chrono` date formatting and the
    /// stock theme's measurements.
    pub fn new(options: GridOptions, container: Rect) -> Result<Self> {
        Self::with_services(
            options,
            container,
            Measurements::default(),
            Box::new(DevTranslations),
            Box::new(ChronoDateFormatter),
        )
    }

    /// Grid with injected services.
    ///
    /// Fails without side effects when the column model or data source is
    /// unusable. Inline data is installed immediately; an ajax grid waits for
    /// [`Datagrid::start`] and its first page.
    pub fn with_services(
        mut options: GridOptions,
        container: Rect,
        measurements: Measurements,
        translator: Box<dyn Translate>,
        formatter: Box<dyn DateFormatter>,
    ) -> Result<Self> {
        validate(&options, translator.as_ref())?;
        if options.sort_server {
            log::warn!("sortServer is not supported; sorting stays client-side");
            options.sort_server = false;
        }
        let mut grid = Self {
            state: GridState::new(options, measurements, container),
            interaction: Interaction::default(),
            fetch: FetchTracker::default(),
            translator,
            formatter,
            ready: false,
        };
        grid.install_inline();
        Ok(grid)
    }

    fn install_inline(&mut self) {
        if self.state.options.is_ajax() {
            return;
        }
        let columns = self.state.options.column_model.clone().unwrap_or_default();
        let rows = match &self.state.options.data_source {
            Some(DataSourceSpec::Rows(rows)) => rows.clone(),
            _ => Vec::new(),
        };
        self.state.load(columns, DataSource::from_rows(rows));
        self.ready = true;
    }

    /// First outcome after construction: a full draw, or the initial page
    /// request (with the loading overlay if enabled).
    pub fn start(&mut self) -> Outcome {
        if self.ready {
            return Outcome::refresh(Refresh::Full { reset: true });
        }
        let ticket = self.fetch.issue(FetchKind::Initial);
        let mut out = Outcome::none().with_effect(Effect::Fetch {
            ticket,
            request: initial_request(&self.state.options),
        });
        if self.state.options.use_loading_overlay {
            out.push(Effect::ShowOverlay(OverlayView::loading(
                self.translator.as_ref(),
            )));
        }
        out
    }

    /// Apply a page response.
    ///
    /// Responses for superseded requests are dropped. The initial page
    /// installs columns and rows; edge pages are merged at their edge and
    /// re-sorted under an active sort. A sentinel still in view afterwards
    /// requests the next page.
    pub fn receive_page(&mut self, ticket: FetchTicket, page: PageResponse) -> Outcome {
        let Some(kind) = self.fetch.accept(ticket) else {
            return Outcome::none();
        };
        let out = match kind {
            FetchKind::Initial => {
                let columns = page
                    .column_model
                    .clone()
                    .or_else(|| self.state.options.column_model.clone())
                    .unwrap_or_default();
                if columns.is_empty() {
                    log::warn!("first page arrived without a column model");
                }
                let data = DataSource::from_page(page, 0);
                log::debug!("initial page accepted with {} rows", data.len());
                self.state.load(columns, data);
                self.ready = true;
                let mut out = Outcome::refresh(Refresh::Full { reset: true });
                if self.state.options.use_loading_overlay {
                    out.push(Effect::HideOverlay);
                }
                out
            }
            FetchKind::Edge(edge) => {
                let added = page.result_set.len();
                match edge {
                    Edge::South => self.state.data.merge_south(page),
                    Edge::North => self.state.data.merge_north(page),
                }
                self.state.coerce_dates();
                self.state.apply_sort();
                log::debug!("{added} rows merged at the {} edge", edge.as_str());
                if edge == Edge::North {
                    // Keep the rows that were in view where they were.
                    self.state.viewport.scroll_top +=
                        added as f32 * self.state.measurements.row_height;
                }
                Outcome::refresh(Refresh::Full { reset: false })
            }
        };
        // A short page can leave a sentinel in view; keep filling.
        self.settle(out)
    }

    /// A page request failed. The grid keeps what it has.
    pub fn fetch_failed(&mut self, ticket: FetchTicket, error: &DatagridError) -> Outcome {
        let Some(kind) = self.fetch.accept(ticket) else {
            return Outcome::none();
        };
        log::warn!("page fetch for {kind:?} failed: {error}");
        if kind == FetchKind::Initial && self.state.options.use_loading_overlay {
            return Outcome::none().with_effect(Effect::HideOverlay);
        }
        Outcome::none()
    }

    /// Handle one input event.
    pub fn handle(&mut self, event: GridEvent) -> Outcome {
        if !self.ready {
            return Outcome::none();
        }
        let out = self
            .interaction
            .dispatch(&mut self.state, self.translator.as_ref(), event);
        self.settle(out)
    }

    /// The single re-layout entry point: apply the structural part of an
    /// outcome, then look for a sentinel that needs data.
    fn settle(&mut self, mut out: Outcome) -> Outcome {
        if let Refresh::Full { reset } = out.refresh {
            self.state.relayout(reset);
        }
        if out.refresh != Refresh::None {
            self.request_edges(&mut out);
        }
        out
    }

    fn request_edges(&mut self, out: &mut Outcome) {
        if !self.fetch.is_idle() {
            return;
        }
        let viewport = self.state.viewport;
        let metrics = &self.state.metrics;
        let edge = if viewport.south_visible(metrics) && self.state.data.has_more_south() {
            Edge::South
        } else if viewport.north_visible(metrics) && self.state.data.has_more_north() {
            Edge::North
        } else {
            return;
        };
        if let Some(request) = edge_request(edge, &self.state.data, &self.state.options) {
            let ticket = self.fetch.issue(FetchKind::Edge(edge));
            out.push(Effect::Fetch { ticket, request });
        }
    }

    pub fn scroll_to(&mut self, offset: f32) -> Outcome {
        let out = self.state.scroll_to(offset);
        self.settle(out)
    }

    pub fn scroll_to_top(&mut self) -> Outcome {
        let out = self.state.scroll_to_top();
        self.settle(out)
    }

    pub fn scroll_to_bottom(&mut self) -> Outcome {
        let out = self.state.scroll_to_bottom();
        self.settle(out)
    }

    /// Horizontal scroll back to the start; closes any open menu.
    pub fn scroll_to_start(&mut self) -> Outcome {
        let mut out = self.state.scroll_to_start();
        out.absorb(self.interaction.content_scrolled(Axis::Horizontal));
        self.settle(out)
    }

    /// The container was resized or re-measured.
    pub fn set_container(&mut self, container: Rect) -> Outcome {
        self.state.container = container;
        self.settle(Outcome::refresh(Refresh::Full { reset: false }))
    }

    pub fn set_measurements(&mut self, measurements: Measurements) -> Outcome {
        self.state.measurements = measurements;
        self.settle(Outcome::refresh(Refresh::Full { reset: false }))
    }

    /// Merge `patch` into the options and rebuild from scratch.
    ///
    /// The new options are validated first; on error the grid is left as it
    /// was.
    pub fn reload(&mut self, patch: &serde_json::Value) -> Result<Outcome> {
        let mut options = self.state.options.merged_with(patch)?;
        validate(&options, self.translator.as_ref())?;
        options.sort_server = false;
        log::debug!("reloading datagrid");

        let mut out = self.interaction.reset();
        self.fetch.abandon();
        let (measurements, container) = (self.state.measurements, self.state.container);
        self.state = GridState::new(options, measurements, container);
        self.ready = false;
        self.install_inline();
        out.absorb(self.start());
        Ok(out)
    }

    /// View model of the current state.
    pub fn frame(&self) -> Frame {
        Frame::build(&FrameContext {
            columns: &self.state.columns,
            data: &self.state.data,
            sort: &self.state.sort,
            options: &self.state.options,
            metrics: &self.state.metrics,
            translator: self.translator.as_ref(),
            formatter: self.formatter.as_ref(),
        })
    }

    /// Draw what `out` asks for and apply its effects on `backend`.
    ///
    /// Timers, fetches and scroll notifications are left to the caller.
    pub fn present(&self, backend: &mut dyn RenderBackend, out: &Outcome) -> Result<()> {
        if self.ready && out.refresh != Refresh::None {
            let frame = self.frame();
            let params = RenderParams {
                frame: &frame,
                scrollbars: &self.state.scrollbars,
                viewport: &self.state.viewport,
                options: &self.state.options,
                translator: self.translator.as_ref(),
            };
            match out.refresh {
                Refresh::Full { .. } => backend.render(&params)?,
                Refresh::Body => backend.render_body(&params)?,
                Refresh::Scroll => backend.scroll(&self.state.viewport, &self.state.scrollbars)?,
                Refresh::None => {}
            }
        }
        for effect in &out.effects {
            backend.apply(effect)?;
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn options(&self) -> &GridOptions {
        &self.state.options
    }

    pub fn columns(&self) -> &ColumnModel {
        &self.state.columns
    }

    pub fn data(&self) -> &DataSource {
        &self.state.data
    }

    pub fn sort(&self) -> &SortState {
        &self.state.sort
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.state.metrics
    }

    pub fn scrollbars(&self) -> &Scrollbars {
        &self.state.scrollbars
    }

    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn translator(&self) -> &dyn Translate {
        self.translator.as_ref()
    }

    /// Whether a page request is outstanding.
    pub fn fetch_in_flight(&self) -> bool {
        !self.fetch.is_idle()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::DataSourceType;
    use crate::types::{Cell, Row};

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("ID", DataType::Number, 60.0),
            ColumnDescriptor::new("Name", DataType::String, 120.0),
        ]
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                Row::new(
                    i,
                    vec![Cell::new(i as f64), Cell::new(format!("row {i}"))],
                )
            })
            .collect()
    }

    #[test]
    fn column_model_is_checked_before_data_source() {
        let err = validate(&GridOptions::default(), &DevTranslations).unwrap_err();
        assert!(matches!(err, DatagridError::InvalidColumnModel(_)));
        assert!(err.to_string().contains("Invalid Column Model"));

        let opts = GridOptions {
            column_model: Some(columns()),
            ..GridOptions::default()
        };
        let err = validate(&opts, &DevTranslations).unwrap_err();
        assert!(matches!(err, DatagridError::InvalidDataSource(_)));
    }

    #[test]
    fn ajax_needs_no_column_model() {
        let opts = GridOptions {
            data_source_type: DataSourceType::Ajax,
            data_source: Some(DataSourceSpec::Url("/rows".into())),
            ..GridOptions::default()
        };
        assert!(validate(&opts, &DevTranslations).is_ok());
    }

    #[test]
    fn wheel_propagates_at_bound() {
        let opts = GridOptions {
            column_model: Some(columns()),
            data_source: Some(DataSourceSpec::Rows(rows(100))),
            ..GridOptions::default()
        };
        let mut grid = Datagrid::new(opts, Rect::new(0.0, 0.0, 400.0, 200.0)).unwrap();
        let up = grid.state.wheel(1.0);
        assert!(up.propagate);
        let down = grid.state.wheel(-2.0);
        assert!(!down.propagate);
        assert!(grid.viewport().scroll_top > 0.0);
    }

    #[test]
    fn sort_server_is_turned_off() {
        let opts = GridOptions {
            sortable: true,
            sort_server: true,
            column_model: Some(columns()),
            data_source: Some(DataSourceSpec::Rows(rows(3))),
            ..GridOptions::default()
        };
        let grid = Datagrid::new(opts, Rect::new(0.0, 0.0, 400.0, 200.0)).unwrap();
        assert!(grid.options().client_sort());
    }
}
