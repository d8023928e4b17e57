//! Grid sizing configuration.

use serde::{Deserialize, Serialize};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f32 = 64.0;

/// Default width of each row-header column in pixels
pub const DEFAULT_ROW_HEADER_WIDTH: f32 = 64.0;

/// Default height of each column-header row in pixels
pub const DEFAULT_COLUMN_HEADER_HEIGHT: f32 = 20.0;

/// Base section sizes used before any row or column is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultSizes {
    /// Height of body rows
    pub row_height: f32,
    /// Width of body columns
    pub column_width: f32,
    /// Width of each row-header column
    pub row_header_width: f32,
    /// Height of each column-header row
    pub column_header_height: f32,
}

impl Default for DefaultSizes {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
            row_header_width: DEFAULT_ROW_HEADER_WIDTH,
            column_header_height: DEFAULT_COLUMN_HEADER_HEIGHT,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let sizes: DefaultSizes =
            serde_json::from_str(r#"{"rowHeight": 32, "columnWidth": 128}"#).unwrap();
        assert_eq!(sizes.row_height, 32.0);
        assert_eq!(sizes.column_width, 128.0);
        assert_eq!(sizes.row_header_width, DEFAULT_ROW_HEADER_WIDTH);
        assert_eq!(sizes.column_header_height, DEFAULT_COLUMN_HEADER_HEIGHT);
    }
}
