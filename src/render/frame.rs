//! View models for the header and body panes.
//!
//! A frame is what a backend draws: for every logical row it carries one
//! row for the frozen pane and one for the loose pane, cells in display
//! order, with alternate/spacer classes already resolved.

use super::DateFormatter;
use crate::config::GridOptions;
use crate::i18n::Translate;
use crate::layout::{ColumnSpan, GridMetrics};
use crate::model::{ColumnModel, DataSource, SortState};
use crate::types::{CellValue, DataType, Row, SortDirection};

/// Everything a frame is built from.
pub struct FrameContext<'a> {
    pub columns: &'a ColumnModel,
    pub data: &'a DataSource,
    pub sort: &'a SortState,
    pub options: &'a GridOptions,
    pub metrics: &'a GridMetrics,
    pub translator: &'a dyn Translate,
    pub formatter: &'a dyn DateFormatter,
}

/// One header cell and the affordances attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCellView {
    /// Storage index.
    pub column: usize,
    pub label: String,
    /// Content width (without cell extra).
    pub width: f32,
    pub spacer: bool,
    /// Clicking the label sorts.
    pub sortable: bool,
    pub resize_handle: bool,
    pub move_handle: bool,
    pub menu_arrow: bool,
    /// Indicator shown on the active sort column.
    pub sort_indicator: Option<SortDirection>,
}

/// Header strip: frozen and loose rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderView {
    pub height: f32,
    pub freeze_width: f32,
    pub loose_width: f32,
    pub scroll_width: f32,
    pub frozen: Vec<HeaderCellView>,
    pub loose: Vec<HeaderCellView>,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCellView {
    pub column: usize,
    pub text: String,
    pub width: f32,
    pub spacer: bool,
    /// Alternate-column class, if any.
    pub class: Option<String>,
}

/// Kind of body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Data,
    Spacer,
}

/// One logical body row, split into its two panes.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRowView {
    /// Position in the live rows (`None` for the spacer row).
    pub position: Option<usize>,
    pub kind: RowKind,
    pub height: f32,
    /// Alternate-row class, if any.
    pub class: Option<String>,
    pub frozen: Vec<BodyCellView>,
    pub loose: Vec<BodyCellView>,
}

/// Which end of the loaded window a sentinel sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    North,
    South,
}

impl Edge {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
        }
    }
}

/// A lazy-load sentinel row.
#[derive(Debug, Clone, PartialEq)]
pub struct SentinelView {
    pub edge: Edge,
    /// More rows exist beyond this edge.
    pub more: bool,
    pub title: String,
    pub body: String,
    pub height: f32,
    pub width: f32,
}

/// The loading overlay's message block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub title: String,
    pub body: String,
}

impl OverlayView {
    /// The "please wait" message shown while the first page loads.
    pub fn loading(translator: &dyn Translate) -> Self {
        Self {
            title: translator.translate("loading.title"),
            body: translator.translate("loading.datagrid"),
        }
    }
}

/// Body panes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyView {
    pub height: f32,
    pub freeze_width: f32,
    pub loose_width: f32,
    pub scroll_width: f32,
    pub north: Option<SentinelView>,
    pub rows: Vec<BodyRowView>,
    pub south: Option<SentinelView>,
}

/// A complete header + body frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub header: HeaderView,
    pub body: BodyView,
}

impl Frame {
    pub fn build(ctx: &FrameContext<'_>) -> Self {
        Self {
            header: build_header(ctx),
            body: build_body(ctx),
        }
    }
}

fn header_cell(ctx: &FrameContext<'_>, span: &ColumnSpan) -> Option<HeaderCellView> {
    let column = ctx.columns.column(span.index)?;
    let opts = ctx.options;
    let content_width = span.width - ctx.metrics.cell_extra_width;
    if column.is_spacer() {
        return Some(HeaderCellView {
            column: span.index,
            label: String::new(),
            width: content_width,
            spacer: true,
            sortable: false,
            resize_handle: false,
            move_handle: false,
            menu_arrow: false,
            sort_indicator: None,
        });
    }
    let sortable = opts.sortable && column.sortable;
    let freezable = opts.freezable && column.freezable;
    Some(HeaderCellView {
        column: span.index,
        label: column.label.clone(),
        width: content_width,
        spacer: false,
        sortable,
        resize_handle: opts.column_resize && column.resizable && !column.frozen,
        move_handle: opts.column_move && column.movable && !column.frozen,
        menu_arrow: opts.column_menus && (sortable || freezable),
        sort_indicator: ctx
            .sort
            .is_column(span.index)
            .then_some(ctx.sort.direction),
    })
}

/// Build the header rows.
pub fn build_header(ctx: &FrameContext<'_>) -> HeaderView {
    let m = ctx.metrics;
    HeaderView {
        height: m.header.height,
        freeze_width: m.panes.freeze,
        loose_width: m.panes.loose,
        scroll_width: m.panes.scroll,
        frozen: m
            .frozen_spans
            .iter()
            .filter_map(|s| header_cell(ctx, s))
            .collect(),
        loose: m
            .loose_spans
            .iter()
            .filter_map(|s| header_cell(ctx, s))
            .collect(),
    }
}

/// Alternate-column class per storage index, counted across the frozen pane
/// then the loose pane so the stripes continue over the pane split.
fn column_classes(ctx: &FrameContext<'_>) -> Vec<Option<String>> {
    let mut classes = vec![None; ctx.columns.len()];
    if !ctx.options.alternate.cols {
        return classes;
    }
    let class = format!("{}col", ctx.options.alternate.class.prefix);
    let spans = ctx.metrics.frozen_spans.iter().chain(&ctx.metrics.loose_spans);
    for (n, span) in spans.enumerate() {
        if let Some(slot) = classes.get_mut(span.index) {
            *slot = (n % 2 == 0).then(|| class.clone());
        }
    }
    classes
}

fn cell_text(ctx: &FrameContext<'_>, value: &CellValue, data_type: DataType) -> String {
    match (data_type, value) {
        (DataType::Date, CellValue::Date(d)) => ctx.formatter.format(d, &ctx.options.date_format),
        _ => value.display(),
    }
}

fn body_cells(
    ctx: &FrameContext<'_>,
    spans: &[ColumnSpan],
    classes: &[Option<String>],
    row: Option<&Row>,
) -> Vec<BodyCellView> {
    spans
        .iter()
        .filter_map(|span| {
            let column = ctx.columns.column(span.index)?;
            let spacer = column.is_spacer() || row.is_none();
            let text = match row {
                Some(row) if !column.is_spacer() => row
                    .cell(span.index)
                    .map(|c| cell_text(ctx, &c.data, column.data_type))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            Some(BodyCellView {
                column: span.index,
                text,
                width: span.width - ctx.metrics.cell_extra_width,
                spacer,
                class: classes.get(span.index).cloned().flatten(),
            })
        })
        .collect()
}

fn sentinel(ctx: &FrameContext<'_>, edge: Edge, more: bool, height: f32) -> SentinelView {
    let edge_key = edge.as_str();
    let (title, body) = if more {
        (
            format!("lazyloader.{edge_key}.message.title"),
            format!("lazyloader.{edge_key}.message.body"),
        )
    } else {
        (
            format!("lazyloader.{edge_key}.none.title"),
            format!("lazyloader.{edge_key}.none.body"),
        )
    };
    SentinelView {
        edge,
        more,
        title: ctx.translator.translate(&title),
        body: ctx.translator.translate(&body),
        height,
        width: ctx.metrics.panes.freeze + ctx.metrics.panes.loose,
    }
}

/// Build the body rows, sentinels and spacer row.
pub fn build_body(ctx: &FrameContext<'_>) -> BodyView {
    let m = ctx.metrics;
    let opts = ctx.options;
    let classes = column_classes(ctx);
    let row_class = format!("{}row", opts.alternate.class.prefix);

    let mut alt = false;
    let mut rows = Vec::with_capacity(ctx.data.len() + 1);
    for (position, row) in ctx.data.rows().iter().enumerate() {
        rows.push(BodyRowView {
            position: Some(position),
            kind: RowKind::Data,
            height: m.body.row_height,
            class: alt.then(|| row_class.clone()),
            frozen: body_cells(ctx, &m.frozen_spans, &classes, Some(row)),
            loose: body_cells(ctx, &m.loose_spans, &classes, Some(row)),
        });
        if opts.alternate.rows {
            alt = !alt;
        }
    }
    if opts.spacer_row {
        rows.push(BodyRowView {
            position: None,
            kind: RowKind::Spacer,
            height: opts.spacer_row_height,
            class: alt.then(|| row_class.clone()),
            frozen: body_cells(ctx, &m.frozen_spans, &classes, None),
            loose: body_cells(ctx, &m.loose_spans, &classes, None),
        });
    }

    BodyView {
        height: m.body.height,
        freeze_width: m.panes.freeze,
        loose_width: m.panes.loose,
        scroll_width: m.panes.scroll,
        north: opts.lazy_load_north.then(|| {
            sentinel(ctx, Edge::North, ctx.data.has_more_north(), m.body.north_height)
        }),
        rows,
        south: opts.lazy_load_south.then(|| {
            sentinel(ctx, Edge::South, ctx.data.has_more_south(), m.body.south_height)
        }),
    }
}
