//! Constructor options for a datagrid instance.
//!
//! Keys and defaults match the options object accepted by the embedding page;
//! every field is optional on input.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::types::{ColumnDescriptor, Row, DEFAULT_PAGE_SIZE};

/// Where rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    /// Rows are fetched page by page from a URL.
    Ajax,
    /// Rows are supplied inline.
    #[default]
    Json,
}

impl<'de> Deserialize<'de> for DataSourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.to_ascii_lowercase().contains("ajax") {
            Ok(Self::Ajax)
        } else {
            Ok(Self::Json)
        }
    }
}

/// The `dataSource` option: a page URL or inline rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSourceSpec {
    Url(String),
    Rows(Vec<Row>),
}

impl DataSourceSpec {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Url(url) => url.trim().is_empty(),
            Self::Rows(rows) => rows.is_empty(),
        }
    }
}

/// CSS class prefix holder (`{"prefix": "hover-"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPrefix {
    pub prefix: String,
}

/// Hover highlighting of rows, columns and single cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverOptions {
    pub rows: bool,
    pub cols: bool,
    pub cells: bool,
    pub class: ClassPrefix,
}

impl Default for HoverOptions {
    fn default() -> Self {
        Self {
            rows: false,
            cols: false,
            cells: false,
            class: ClassPrefix {
                prefix: "hover-".to_string(),
            },
        }
    }
}

impl HoverOptions {
    pub fn any(&self) -> bool {
        self.rows || self.cols || self.cells
    }
}

/// Alternating row/column classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternateOptions {
    pub rows: bool,
    pub cols: bool,
    pub class: ClassPrefix,
}

impl Default for AlternateOptions {
    fn default() -> Self {
        Self {
            rows: false,
            cols: false,
            class: ClassPrefix {
                prefix: "alt-".to_string(),
            },
        }
    }
}

/// Pixel offset applied to the column menu anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

/// Thumb opacity for the three hover levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarOpacity {
    pub none: f32,
    pub low: f32,
    pub high: f32,
}

impl Default for ScrollbarOpacity {
    fn default() -> Self {
        Self {
            none: 0.0,
            low: 0.3,
            high: 0.6,
        }
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Minimum and maximum cell dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSizeLimits {
    pub min: Size,
    pub max: Size,
}

impl Default for CellSizeLimits {
    fn default() -> Self {
        Self {
            min: Size::new(50.0, 10.0),
            max: Size::new(2000.0, 100.0),
        }
    }
}

/// All options accepted by the grid constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    pub data_source: Option<DataSourceSpec>,
    pub data_source_type: DataSourceType,
    pub column_model: Option<Vec<ColumnDescriptor>>,

    pub sortable: bool,
    /// Server-side sorting is not implemented; `true` is treated as `false`.
    pub sort_server: bool,

    pub freezable: bool,
    /// Start the horizontal thumb's track after the frozen pane.
    pub freeze_scroll: bool,

    pub lazy_load_north: bool,
    pub lazy_load_south: bool,
    /// Rows requested per page for ajax sources.
    pub page_size: usize,

    pub spacer_col: bool,
    pub spacer_col_width: f32,
    pub spacer_row: bool,
    pub spacer_row_height: f32,

    pub hover: HoverOptions,
    pub alternate: AlternateOptions,

    pub column_resize: bool,
    pub column_move: bool,

    pub column_menus: bool,
    /// Milliseconds before an unhovered menu closes.
    pub column_menu_hide_delay: u32,
    pub column_menu_offset: Offset,

    pub themeclass: String,
    pub scrollbar_opacity: ScrollbarOpacity,
    pub use_loading_overlay: bool,
    pub date_format: String,
    /// Pixels the vertical thumb moves per wheel notch.
    pub wheel_step: f32,
    pub cell_size: CellSizeLimits,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            data_source: None,
            data_source_type: DataSourceType::Json,
            column_model: None,
            sortable: false,
            sort_server: false,
            freezable: false,
            freeze_scroll: false,
            lazy_load_north: false,
            lazy_load_south: false,
            page_size: DEFAULT_PAGE_SIZE,
            spacer_col: false,
            spacer_col_width: 50.0,
            spacer_row: false,
            spacer_row_height: 20.0,
            hover: HoverOptions::default(),
            alternate: AlternateOptions::default(),
            column_resize: false,
            column_move: false,
            column_menus: false,
            column_menu_hide_delay: 1000,
            column_menu_offset: Offset::default(),
            themeclass: String::new(),
            scrollbar_opacity: ScrollbarOpacity::default(),
            use_loading_overlay: false,
            date_format: "default".to_string(),
            wheel_step: 10.0,
            cell_size: CellSizeLimits::default(),
        }
    }
}

impl GridOptions {
    /// Parse an options object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Column menus only make sense when they have sort or freeze items.
    pub fn menus_enabled(&self) -> bool {
        self.column_menus && (self.sortable || self.freezable)
    }

    /// Client-side sorting is active.
    pub fn client_sort(&self) -> bool {
        self.sortable && !self.sort_server
    }

    pub fn is_ajax(&self) -> bool {
        self.data_source_type == DataSourceType::Ajax
    }

    /// Shallow-merge `patch` over these options, as re-applying options to a
    /// live grid does.
    pub fn merged_with(&self, patch: &serde_json::Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        if let (Some(target), Some(source)) = (base.as_object_mut(), patch.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(serde_json::from_value(base)?)
    }
}
