//! Structured error types for datagrid.
//!
//! Construction failures are fatal; gesture and layout anomalies are not
//! errors at all and never reach this type.

/// All errors that can occur while building or feeding a datagrid.
#[derive(Debug, thiserror::Error)]
pub enum DatagridError {
    /// Direct JSON data was supplied without a usable column model.
    #[error("{0}")]
    InvalidColumnModel(String),

    /// The data source is missing or empty.
    #[error("{0}")]
    InvalidDataSource(String),

    /// Options, column model or page payload could not be (de)serialized.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A page request failed or returned an unusable response.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// A column referenced by name or index does not exist.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DatagridError>;

#[cfg(target_arch = "wasm32")]
impl From<DatagridError> for wasm_bindgen::JsValue {
    fn from(e: DatagridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
