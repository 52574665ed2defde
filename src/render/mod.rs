//! Render engine: view models for the dual-pane header and body, date
//! formatting, and the backends that draw them.
//!
//! This module provides:
//! - Frame builders (frozen and loose rows per logical row)
//! - Backend-agnostic rendering trait
//! - Plain-text backend (CLI, tests)
//! - DOM backend (wasm32 only)

pub mod backend;
pub mod format;
pub mod frame;
pub mod html;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use backend::{RenderBackend, RenderParams};
pub use format::{named_format, ChronoDateFormatter, DateFormatter};
pub use frame::{
    build_body, build_header, BodyCellView, BodyRowView, BodyView, Edge, Frame, FrameContext,
    HeaderCellView, HeaderView, OverlayView, RowKind, SentinelView,
};
pub use text::TextRenderer;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
