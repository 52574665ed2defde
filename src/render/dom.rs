//! DOM backend (wasm32 only).
//!
//! Builds the pane skeleton once inside the container element, then swaps
//! pane contents with the markup from [`super::html`] and moves panes and
//! thumbs with inline styles.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::{DatagridError, Result};
use crate::interaction::{Effect, HighlightTarget};
use crate::layout::{centered, Axis, Rect, ScrollbarState, Scrollbars, Viewport};

use super::backend::{RenderBackend, RenderParams};
use super::html;

fn js_err(context: &str, err: &wasm_bindgen::JsValue) -> DatagridError {
    DatagridError::Render(format!("{context}: {err:?}"))
}

fn px(value: f32) -> String {
    format!("{value}px")
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

/// DOM renderer bound to one container element.
pub struct DomRenderer {
    document: Document,
    root: HtmlElement,
    header_frozen: Option<HtmlElement>,
    header_loose: Option<HtmlElement>,
    body_scroll: Option<HtmlElement>,
    north: Option<HtmlElement>,
    body_frozen: Option<HtmlElement>,
    body_loose: Option<HtmlElement>,
    south: Option<HtmlElement>,
    vertical: Option<HtmlElement>,
    horizontal: Option<HtmlElement>,
    menu: Option<HtmlElement>,
    marker: Option<HtmlElement>,
    overlay: Option<HtmlElement>,
    overlay_message: Option<HtmlElement>,
}

impl DomRenderer {
    pub fn new(root: HtmlElement) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DatagridError::Render("no document".to_string()))?;
        Ok(Self {
            document,
            root,
            header_frozen: None,
            header_loose: None,
            body_scroll: None,
            north: None,
            body_frozen: None,
            body_loose: None,
            south: None,
            vertical: None,
            horizontal: None,
            menu: None,
            marker: None,
            overlay: None,
            overlay_message: None,
        })
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    /// The column menu element, once [`RenderBackend::init`] has run.
    pub fn menu(&self) -> Option<&HtmlElement> {
        self.menu.as_ref()
    }

    /// Container size as laid out by the browser.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measured_container(&self) -> Rect {
        let r = self.root.get_bounding_client_rect();
        Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }

    fn div(&self, parent: &Element, class: &str) -> Result<HtmlElement> {
        let element = self
            .document
            .create_element("div")
            .map_err(|e| js_err("create div", &e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DatagridError::Render("div is not an HtmlElement".to_string()))?;
        element.set_class_name(class);
        parent
            .append_child(&element)
            .map_err(|e| js_err("append div", &e))?;
        Ok(element)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn container_rect(&self) -> Rect {
        let r = self.root.get_bounding_client_rect();
        Rect::new(0.0, 0.0, r.width() as f32, r.height() as f32)
    }

    fn place_thumb(element: &HtmlElement, axis: Axis, thumb: &ScrollbarState) {
        if !thumb.display {
            set_style(element, "display", "none");
            return;
        }
        set_style(element, "display", "block");
        match axis {
            Axis::Vertical => {
                set_style(element, "top", &px(thumb.position));
                set_style(element, "height", &px(thumb.length));
                set_style(element, "width", &px(thumb.thickness));
                set_style(element, "right", &px(thumb.padding));
            }
            Axis::Horizontal => {
                set_style(element, "left", &px(thumb.position));
                set_style(element, "width", &px(thumb.length));
                set_style(element, "height", &px(thumb.thickness));
                set_style(element, "bottom", &px(thumb.padding));
            }
        }
    }

    pub fn thumb(&self, axis: Axis) -> Option<&HtmlElement> {
        match axis {
            Axis::Vertical => self.vertical.as_ref(),
            Axis::Horizontal => self.horizontal.as_ref(),
        }
    }

    fn highlight(&self, target: HighlightTarget, class: &str, on: bool) -> Result<()> {
        let selector = match target {
            HighlightTarget::Row(row) => format!(r#".datagrid-body .datagrid-row[data-row="{row}"]"#),
            HighlightTarget::Column(col) => {
                format!(r#".datagrid-body .datagrid-cell[data-col="{col}"]"#)
            }
            HighlightTarget::Cell { row, column } => format!(
                r#".datagrid-body .datagrid-row[data-row="{row}"] .datagrid-cell[data-col="{column}"]"#
            ),
        };
        let nodes = self
            .root
            .query_selector_all(&selector)
            .map_err(|e| js_err("highlight query", &e))?;
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                set_class(&element, class, on);
            }
        }
        Ok(())
    }

    fn resize_preview(&self, column: usize, width: f32, scroll_width: f32) -> Result<()> {
        let nodes = self
            .root
            .query_selector_all(&format!(r#".datagrid-cell[data-col="{column}"]"#))
            .map_err(|e| js_err("resize query", &e))?;
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                set_style(&element, "width", &px(width));
            }
        }
        for pane in [&self.header_loose, &self.body_loose].into_iter().flatten() {
            set_style(pane, "width", &px(scroll_width));
        }
        Ok(())
    }

    fn move_marker(&mut self, left: f32) -> Result<()> {
        let marker = match self.marker.take() {
            Some(marker) => marker,
            None => self.div(&self.root, "datagrid-move-marker")?,
        };
        set_style(&marker, "left", &px(left));
        self.marker = Some(marker);
        Ok(())
    }

    fn show_overlay(&self, view: &super::OverlayView) {
        let (Some(overlay), Some(message)) = (&self.overlay, &self.overlay_message) else {
            return;
        };
        message.set_inner_html(&html::overlay(view));
        set_style(overlay, "display", "block");
        let size = message.get_bounding_client_rect();
        #[allow(clippy::cast_possible_truncation)]
        let (top, left) = centered(
            self.container_rect(),
            size.width() as f32,
            size.height() as f32,
        );
        set_style(message, "top", &px(top));
        set_style(message, "left", &px(left));
    }
}

impl RenderBackend for DomRenderer {
    fn init(&mut self) -> Result<()> {
        let root: Element = self.root.clone().into();
        root.set_inner_html("");
        set_class(&root, "datagrid-container", true);

        let header = self.div(&root, "datagrid-header")?;
        self.header_frozen = Some(self.div(&header, "datagrid-frozen-header")?);
        let loose_header = self.div(&header, "datagrid-loose-header")?;
        self.header_loose = Some(self.div(&loose_header, "datagrid-loose-header-scroll")?);

        let body = self.div(&root, "datagrid-body")?;
        let scroll = self.div(&body, "datagrid-body-scroll")?;
        self.north = Some(self.div(&scroll, "lazy-loader-north")?);
        self.body_frozen = Some(self.div(&scroll, "datagrid-frozen-body")?);
        let loose_body = self.div(&scroll, "datagrid-loose-body")?;
        self.body_loose = Some(self.div(&loose_body, "datagrid-loose-body-scroll")?);
        self.south = Some(self.div(&scroll, "lazy-loader-south")?);
        self.body_scroll = Some(scroll);

        self.vertical = Some(self.div(&root, "scrollbar vertical")?);
        self.horizontal = Some(self.div(&root, "scrollbar horizontal")?);

        let menu = self.div(&root, "datagrid-menu")?;
        set_style(&menu, "display", "none");
        self.menu = Some(menu);

        let overlay = self.div(&root, "datagrid-overlay")?;
        set_style(&overlay, "display", "none");
        self.overlay_message = Some(self.div(&overlay, "datagrid-overlay-message")?);
        self.overlay = Some(overlay);
        Ok(())
    }

    fn render(&mut self, params: &RenderParams<'_>) -> Result<()> {
        for class in params.options.themeclass.split_whitespace() {
            set_class(&self.root, class, true);
        }
        let header = &params.frame.header;
        let (frozen, loose) = html::header(header, params.translator);
        if let Some(pane) = &self.header_frozen {
            pane.set_inner_html(&frozen);
            set_style(pane, "width", &px(header.freeze_width));
        }
        if let Some(pane) = &self.header_loose {
            pane.set_inner_html(&loose);
            set_style(pane, "width", &px(header.scroll_width));
        }
        if let Some(root) = self.header_loose.as_ref().and_then(|p| p.parent_element()) {
            if let Ok(parent) = root.dyn_into::<HtmlElement>() {
                set_style(&parent, "left", &px(header.freeze_width));
                set_style(&parent, "width", &px(header.loose_width));
            }
        }
        self.render_body(params)
    }

    fn render_body(&mut self, params: &RenderParams<'_>) -> Result<()> {
        let body = &params.frame.body;
        let (frozen, loose) = html::body_rows(&body.rows);
        if let Some(pane) = &self.body_frozen {
            pane.set_inner_html(&frozen);
            set_style(pane, "width", &px(body.freeze_width));
        }
        if let Some(pane) = &self.body_loose {
            pane.set_inner_html(&loose);
            set_style(pane, "width", &px(body.scroll_width));
            if let Some(parent) = pane
                .parent_element()
                .and_then(|p| p.dyn_into::<HtmlElement>().ok())
            {
                set_style(&parent, "left", &px(body.freeze_width));
                set_style(&parent, "width", &px(body.loose_width));
            }
        }
        for (slot, view) in [(&self.north, &body.north), (&self.south, &body.south)] {
            let Some(element) = slot else { continue };
            match view {
                Some(view) => {
                    element.set_inner_html(&html::sentinel(view));
                    set_style(element, "display", "block");
                    set_style(element, "height", &px(view.height));
                    set_style(element, "width", &px(view.width));
                }
                None => set_style(element, "display", "none"),
            }
        }
        self.scroll(params.viewport, params.scrollbars)
    }

    fn scroll(&mut self, viewport: &Viewport, scrollbars: &Scrollbars) -> Result<()> {
        if let Some(scroll) = &self.body_scroll {
            set_style(scroll, "top", &px(-viewport.scroll_top));
        }
        let left = px(viewport.loose_pane_left());
        for pane in [&self.header_loose, &self.body_loose].into_iter().flatten() {
            set_style(pane, "left", &left);
        }
        if let Some(v) = &self.vertical {
            Self::place_thumb(v, Axis::Vertical, &scrollbars.vertical);
        }
        if let Some(h) = &self.horizontal {
            Self::place_thumb(h, Axis::Horizontal, &scrollbars.horizontal);
        }
        Ok(())
    }

    fn apply(&mut self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::ShowMenu(view) => {
                if let Some(menu) = &self.menu {
                    menu.set_inner_html(&html::menu(view));
                    set_style(menu, "top", &px(view.placement.top));
                    set_style(menu, "left", &px(view.placement.left));
                    set_style(menu, "display", "block");
                }
            }
            Effect::HideMenu => {
                if let Some(menu) = &self.menu {
                    set_style(menu, "display", "none");
                }
            }
            Effect::ResizePreview {
                column,
                width,
                scroll_width,
            } => self.resize_preview(*column, *width, *scroll_width)?,
            Effect::MoveMarker { left } => self.move_marker(*left)?,
            Effect::RemoveMarker => {
                if let Some(marker) = self.marker.take() {
                    marker.remove();
                }
            }
            Effect::ThumbOpacity { axis, opacity } => {
                if let Some(thumb) = self.thumb(*axis) {
                    set_style(thumb, "opacity", &opacity.to_string());
                }
            }
            Effect::Highlight { target, class, on } => self.highlight(*target, class, *on)?,
            Effect::ShowOverlay(view) => self.show_overlay(view),
            Effect::HideOverlay => {
                if let Some(overlay) = &self.overlay {
                    set_style(overlay, "display", "none");
                }
            }
            Effect::ScheduleTimer { .. }
            | Effect::CancelTimer(_)
            | Effect::Scrolled { .. }
            | Effect::Fetch { .. } => {}
        }
        Ok(())
    }
}
