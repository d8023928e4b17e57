//! Structured error types for datagrid.
//!
//! The merge algebra itself is total over well-formed input; these errors come
//! from joining nothing, from loading models, and from the string-typed
//! surfaces (CLI arguments, WASM calls).

use crate::types::CellGroup;

/// All errors that can occur in datagrid.
#[derive(Debug, thiserror::Error)]
pub enum DataGridError {
    /// `join_cell_groups` was called with no groups.
    #[error("cannot join an empty list of cell groups")]
    EmptyJoin,

    /// A declared group has negative coordinates or inverted bounds.
    #[error("Invalid cell group: rows {}..={}, columns {}..={}", .0.start_row, .0.end_row, .0.start_column, .0.end_column)]
    InvalidGroup(CellGroup),

    /// Region name not one of body, row-header, column-header, corner-header.
    #[error("Unknown cell region: {0}")]
    UnknownRegion(String),

    /// Axis name not one of row, column.
    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    /// JSON model decoding error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DataGridError>;

#[cfg(target_arch = "wasm32")]
impl From<DataGridError> for wasm_bindgen::JsValue {
    fn from(e: DataGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn read_model(path: &str) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    #[test]
    fn test_io_errors_convert() {
        let err = read_model("/nonexistent/datagrid/model.json").unwrap_err();
        assert!(matches!(err, DataGridError::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
    }

    #[test]
    fn test_json_errors_convert() {
        let err: DataGridError = serde_json::from_str::<CellGroup>("{").unwrap_err().into();
        assert!(matches!(err, DataGridError::Json(_)));
    }
}
