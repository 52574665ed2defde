//! HTML markup for the DOM backend.
//!
//! Kept free of `web-sys` so it can be tested natively. Every interactive
//! element carries `data-*` attributes the browser binding uses for hit
//! testing: `data-col` (storage index), `data-row` (live row position),
//! `data-edge` and `data-menu-item`.

use std::fmt::Write;

use crate::i18n::Translate;
use crate::interaction::{MenuItem, MenuView};
use crate::types::SortDirection;

use super::frame::{BodyCellView, BodyRowView, HeaderCellView, HeaderView, OverlayView, SentinelView};

/// Escape text for an HTML text node or quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn header_cell(out: &mut String, cell: &HeaderCellView, translator: &dyn Translate) {
    let col = cell.column;
    let mut class = String::from("datagrid-cell");
    if cell.sortable {
        class.push_str(" sortable");
    }
    if cell.spacer {
        class.push_str(" spacer");
    }
    if cell.sort_indicator.is_some() {
        class.push_str(" sorted");
    }
    let _ = write!(
        out,
        r#"<div class="{class}" data-col="{col}" style="width:{}px">"#,
        cell.width
    );
    if cell.spacer {
        out.push_str("&nbsp;</div>");
        return;
    }
    if cell.sortable {
        let _ = write!(
            out,
            r#"<span class="datagrid-sortable" data-col="{col}" title="{}">{}</span>"#,
            escape(&translator.translate("column.sort")),
            escape(&cell.label)
        );
    } else {
        let _ = write!(out, "<span>{}</span>", escape(&cell.label));
    }
    if let Some(direction) = cell.sort_indicator {
        let arrow = match direction {
            SortDirection::Ascending => "sort-asc",
            SortDirection::Descending => "sort-desc",
        };
        let _ = write!(out, r#"<span class="datagrid-sort-arrow {arrow}"></span>"#);
    }
    if cell.menu_arrow {
        let _ = write!(
            out,
            r#"<div class="datagrid-menu-arrow" data-col="{col}" title="{}"></div>"#,
            escape(&translator.translate("column.menu"))
        );
    }
    if cell.move_handle {
        let _ = write!(
            out,
            r#"<div class="datagrid-move-handle" data-col="{col}" title="{}"></div>"#,
            escape(&translator.translate("column.move"))
        );
    }
    if cell.resize_handle {
        let _ = write!(
            out,
            r#"<div class="datagrid-resize-handle" data-col="{col}" title="{}"></div>"#,
            escape(&translator.translate("column.resize"))
        );
    }
    out.push_str("</div>");
}

/// Markup for the frozen and loose header rows.
pub fn header(view: &HeaderView, translator: &dyn Translate) -> (String, String) {
    let row = |cells: &[HeaderCellView]| {
        let mut out = format!(r#"<div class="datagrid-row" style="height:{}px">"#, view.height);
        for cell in cells {
            header_cell(&mut out, cell, translator);
        }
        out.push_str("</div>");
        out
    };
    (row(&view.frozen), row(&view.loose))
}

fn body_cells(out: &mut String, cells: &[BodyCellView]) {
    for cell in cells {
        let mut class = String::from("datagrid-cell");
        if let Some(alt) = &cell.class {
            class.push(' ');
            class.push_str(alt);
        }
        if cell.spacer {
            class.push_str(" spacer");
        }
        let text = if cell.text.is_empty() {
            "&nbsp;".to_string()
        } else {
            escape(&cell.text)
        };
        let _ = write!(
            out,
            r#"<div class="{class}" data-col="{}" style="width:{}px">{text}</div>"#,
            cell.column, cell.width
        );
    }
}

fn row_open(out: &mut String, row: &BodyRowView) {
    let mut class = String::from("datagrid-row");
    if let Some(alt) = &row.class {
        class.push(' ');
        class.push_str(alt);
    }
    match row.position {
        Some(position) => {
            let _ = write!(
                out,
                r#"<div class="{class}" data-row="{position}" style="height:{}px">"#,
                row.height
            );
        }
        None => {
            let _ = write!(
                out,
                r#"<div class="{class} spacer" style="height:{}px">"#,
                row.height
            );
        }
    }
}

/// Markup for the frozen and loose body rows.
pub fn body_rows(rows: &[BodyRowView]) -> (String, String) {
    let mut frozen = String::new();
    let mut loose = String::new();
    for row in rows {
        row_open(&mut frozen, row);
        body_cells(&mut frozen, &row.frozen);
        frozen.push_str("</div>");
        row_open(&mut loose, row);
        body_cells(&mut loose, &row.loose);
        loose.push_str("</div>");
    }
    (frozen, loose)
}

/// Message block of a lazy-load sentinel.
pub fn sentinel(view: &SentinelView) -> String {
    let edge = view.edge.as_str();
    let body = if view.more {
        format!(
            r#"<a class="cancel-lazy-loader" data-edge="{edge}">{}</a>"#,
            escape(&view.body)
        )
    } else {
        escape(&view.body)
    };
    format!(
        r#"<div class="message-title">{}</div><div class="message-body">{body}</div>"#,
        escape(&view.title)
    )
}

/// Contents of the column menu popover.
pub fn menu(view: &MenuView) -> String {
    let mut out = format!(
        r#"<div class="datagrid-menu-caret" style="right:{}px"></div><ul>"#,
        view.placement.caret_right
    );
    for item in &view.items {
        match item {
            MenuItem::Separator => out.push_str(r#"<li class="menu-separator"></li>"#),
            MenuItem::Action {
                action,
                label,
                checked,
            } => {
                let checked = if *checked { " menu-checked" } else { "" };
                let _ = write!(
                    out,
                    r#"<li class="datagrid-menu-item{checked}" data-menu-item="{}"><span class="menu-item-icon"></span><span class="menu-item-display">{}</span></li>"#,
                    action.key(),
                    escape(label)
                );
            }
        }
    }
    out.push_str("</ul>");
    out
}

/// Message block of the loading overlay.
pub fn overlay(view: &OverlayView) -> String {
    format!(
        r#"<div class="message-title">{}</div><div class="message-body">{}</div>"#,
        escape(&view.title),
        escape(&view.body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DevTranslations;
    use crate::interaction::MenuAction;
    use crate::layout::MenuPlacement;
    use crate::render::{Edge, RowKind};

    fn cell(column: usize, label: &str) -> HeaderCellView {
        HeaderCellView {
            column,
            label: label.to_string(),
            width: 80.0,
            spacer: false,
            sortable: true,
            resize_handle: true,
            move_handle: false,
            menu_arrow: false,
            sort_indicator: Some(SortDirection::Descending),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn header_cell_carries_affordances() {
        let view = HeaderView {
            height: 26.0,
            loose: vec![cell(3, "Name <b>")],
            ..HeaderView::default()
        };
        let (frozen, loose) = header(&view, &DevTranslations);
        assert_eq!(frozen, r#"<div class="datagrid-row" style="height:26px"></div>"#);
        assert!(loose.contains(r#"data-col="3""#));
        assert!(loose.contains("Name &lt;b&gt;"));
        assert!(loose.contains("datagrid-sort-arrow sort-desc"));
        assert!(loose.contains("datagrid-resize-handle"));
        assert!(!loose.contains("datagrid-move-handle"));
        assert!(loose.contains(r#"title="Resize""#));
    }

    #[test]
    fn rows_split_into_panes() {
        let row = BodyRowView {
            position: Some(4),
            kind: RowKind::Data,
            height: 22.0,
            class: Some("alt-row".to_string()),
            frozen: vec![BodyCellView {
                column: 0,
                text: "1".to_string(),
                width: 50.0,
                spacer: false,
                class: None,
            }],
            loose: vec![BodyCellView {
                column: 1,
                text: String::new(),
                width: 70.0,
                spacer: false,
                class: Some("alt-col".to_string()),
            }],
        };
        let (frozen, loose) = body_rows(&[row]);
        assert!(frozen.starts_with(r#"<div class="datagrid-row alt-row" data-row="4""#));
        assert!(frozen.contains(">1</div>"));
        assert!(loose.contains(r#"class="datagrid-cell alt-col""#));
        assert!(loose.contains("&nbsp;"));
    }

    #[test]
    fn sentinel_cancel_only_when_more() {
        let mut view = SentinelView {
            edge: Edge::South,
            more: true,
            title: "Loading".to_string(),
            body: "cancel".to_string(),
            height: 40.0,
            width: 300.0,
        };
        assert!(sentinel(&view).contains(r#"data-edge="south""#));
        view.more = false;
        assert!(!sentinel(&view).contains("cancel-lazy-loader"));
    }

    #[test]
    fn menu_marks_checked_item() {
        let view = MenuView {
            column: 2,
            items: vec![
                MenuItem::Action {
                    action: MenuAction::SortAscending,
                    label: "Sort Ascending".to_string(),
                    checked: true,
                },
                MenuItem::Separator,
            ],
            placement: MenuPlacement::default(),
        };
        let html = menu(&view);
        assert!(html.contains(r#"datagrid-menu-item menu-checked" data-menu-item="sort-asc""#));
        assert!(html.contains("menu-separator"));
    }
}
