//! In-memory data model, loadable from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DataModel;
use crate::config::DefaultSizes;
use crate::error::{DataGridError, Result};
use crate::types::{CellGroup, CellRegion, ColumnRegion, RowRegion};

/// One value per grid region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "kebab-case",
    default,
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct RegionMap<T> {
    pub body: T,
    pub row_header: T,
    pub column_header: T,
    pub corner_header: T,
}

impl<T> RegionMap<T> {
    pub fn get(&self, region: CellRegion) -> &T {
        match region {
            CellRegion::Body => &self.body,
            CellRegion::RowHeader => &self.row_header,
            CellRegion::ColumnHeader => &self.column_header,
            CellRegion::CornerHeader => &self.corner_header,
        }
    }

    pub fn get_mut(&mut self, region: CellRegion) -> &mut T {
        match region {
            CellRegion::Body => &mut self.body,
            CellRegion::RowHeader => &mut self.row_header,
            CellRegion::ColumnHeader => &mut self.column_header,
            CellRegion::CornerHeader => &mut self.corner_header,
        }
    }
}

fn one() -> u32 {
    1
}

/// A data model whose counts, values and merge groups are stored in memory.
///
/// JSON shape:
///
/// ```json
/// {
///   "rowCount": 20,
///   "columnCount": 6,
///   "headerRowCount": 2,
///   "headerColumnCount": 2,
///   "defaultSizes": { "rowHeight": 20 },
///   "groups": {
///     "body": [{ "startRow": 1, "endRow": 2, "startColumn": 1, "endColumn": 2 }]
///   },
///   "values": { "body": [["a", "b"], ["c", "d"]] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticModel {
    /// Body rows
    pub row_count: u32,
    /// Body columns
    pub column_count: u32,
    /// Rows of the column header
    #[serde(default = "one")]
    pub header_row_count: u32,
    /// Columns of the row header
    #[serde(default = "one")]
    pub header_column_count: u32,
    /// Section sizes a grid should start from
    #[serde(default)]
    pub default_sizes: DefaultSizes,
    /// Declared merge groups per region
    #[serde(default)]
    groups: RegionMap<Vec<CellGroup>>,
    /// Row-major cell values per region; missing cells get a generated label
    #[serde(default)]
    values: RegionMap<Vec<Vec<Value>>>,
}

impl StaticModel {
    /// Create a model with the given body size, one header row and one
    /// header column, no values and no groups.
    pub fn new(row_count: u32, column_count: u32) -> Self {
        Self {
            row_count,
            column_count,
            header_row_count: 1,
            header_column_count: 1,
            default_sizes: DefaultSizes::default(),
            groups: RegionMap::default(),
            values: RegionMap::default(),
        }
    }

    /// Parse a model from JSON, rejecting malformed merge groups.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: StaticModel = serde_json::from_str(json)?;
        for region in CellRegion::ALL {
            if let Some(bad) = model.groups.get(region).iter().find(|g| !g.is_valid()) {
                return Err(DataGridError::InvalidGroup(*bad));
            }
        }
        log::debug!(
            "loaded static model {}x{} with {} body groups",
            model.row_count,
            model.column_count,
            model.groups.body.len()
        );
        Ok(model)
    }

    /// Serialize the model back to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn with_header_rows(mut self, count: u32) -> Self {
        self.header_row_count = count;
        self
    }

    #[must_use]
    pub fn with_header_columns(mut self, count: u32) -> Self {
        self.header_column_count = count;
        self
    }

    #[must_use]
    pub fn with_default_sizes(mut self, sizes: DefaultSizes) -> Self {
        self.default_sizes = sizes;
        self
    }

    /// Builder form of [`StaticModel::add_group`].
    pub fn with_group(mut self, region: CellRegion, group: CellGroup) -> Result<Self> {
        self.add_group(region, group)?;
        Ok(self)
    }

    /// Builder form of [`StaticModel::set_value`].
    #[must_use]
    pub fn with_value(mut self, region: CellRegion, row: u32, column: u32, value: Value) -> Self {
        self.set_value(region, row, column, value);
        self
    }

    /// Declare a merge group in `region`.
    pub fn add_group(&mut self, region: CellRegion, group: CellGroup) -> Result<()> {
        if !group.is_valid() {
            return Err(DataGridError::InvalidGroup(group));
        }
        self.groups.get_mut(region).push(group);
        Ok(())
    }

    /// Replace every group in `region`.
    pub fn set_groups(&mut self, region: CellRegion, groups: Vec<CellGroup>) -> Result<()> {
        if let Some(bad) = groups.iter().find(|g| !g.is_valid()) {
            return Err(DataGridError::InvalidGroup(*bad));
        }
        *self.groups.get_mut(region) = groups;
        Ok(())
    }

    /// Remove every group in every region.
    pub fn clear_groups(&mut self) {
        self.groups = RegionMap::default();
    }

    /// Groups declared in `region`.
    pub fn groups(&self, region: CellRegion) -> &[CellGroup] {
        self.groups.get(region)
    }

    /// Store a value, growing the region's value grid as needed.
    pub fn set_value(&mut self, region: CellRegion, row: u32, column: u32, value: Value) {
        let (Ok(row), Ok(column)) = (usize::try_from(row), usize::try_from(column)) else {
            return;
        };
        let rows = self.values.get_mut(region);
        if rows.len() <= row {
            rows.resize_with(row + 1, Vec::new);
        }
        if let Some(cells) = rows.get_mut(row) {
            if cells.len() <= column {
                cells.resize(column + 1, Value::Null);
            }
            if let Some(cell) = cells.get_mut(column) {
                *cell = value;
            }
        }
    }

    fn in_range(&self, region: CellRegion, row: i32, column: i32) -> bool {
        let (Ok(row), Ok(column)) = (u32::try_from(row), u32::try_from(column)) else {
            return false;
        };
        row < self.row_count(region.row_region())
            && column < self.column_count(region.column_region())
    }
}

fn label(region: CellRegion, row: i32, column: i32) -> String {
    match region {
        CellRegion::Body => format!("({row}, {column})"),
        CellRegion::RowHeader => format!("R: {row}, {column}"),
        CellRegion::ColumnHeader => format!("C: {row}, {column}"),
        CellRegion::CornerHeader => format!("N: {row}, {column}"),
    }
}

impl DataModel for StaticModel {
    fn row_count(&self, region: RowRegion) -> u32 {
        match region {
            RowRegion::Body => self.row_count,
            RowRegion::ColumnHeader => self.header_row_count,
        }
    }

    fn column_count(&self, region: ColumnRegion) -> u32 {
        match region {
            ColumnRegion::Body => self.column_count,
            ColumnRegion::RowHeader => self.header_column_count,
        }
    }

    fn data(&self, region: CellRegion, row: i32, column: i32) -> Option<Value> {
        if !self.in_range(region, row, column) {
            return None;
        }
        let stored = usize::try_from(row)
            .ok()
            .zip(usize::try_from(column).ok())
            .and_then(|(r, c)| self.values.get(region).get(r)?.get(c))
            .filter(|v| !v.is_null())
            .cloned();
        Some(stored.unwrap_or_else(|| Value::String(label(region, row, column))))
    }

    fn group_count(&self, region: CellRegion) -> usize {
        self.groups.get(region).len()
    }

    fn group(&self, region: CellRegion, index: usize) -> Option<CellGroup> {
        self.groups.get(region).get(index).copied()
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
    use serde_json::json;

    #[test]
    fn test_counts_per_region() {
        let model = StaticModel::new(20, 6)
            .with_header_rows(3)
            .with_header_columns(2);
        assert_eq!(model.row_count(RowRegion::Body), 20);
        assert_eq!(model.row_count(RowRegion::ColumnHeader), 3);
        assert_eq!(model.column_count(ColumnRegion::Body), 6);
        assert_eq!(model.column_count(ColumnRegion::RowHeader), 2);
    }

    #[test]
    fn test_generated_labels() {
        let model = StaticModel::new(4, 4);
        assert_eq!(model.data(CellRegion::Body, 1, 2), Some(json!("(1, 2)")));
        assert_eq!(model.data(CellRegion::RowHeader, 3, 0), Some(json!("R: 3, 0")));
        assert_eq!(model.data(CellRegion::ColumnHeader, 0, 3), Some(json!("C: 0, 3")));
        assert_eq!(model.data(CellRegion::CornerHeader, 0, 0), Some(json!("N: 0, 0")));
        assert_eq!(model.data(CellRegion::Body, 4, 0), None);
        assert_eq!(model.data(CellRegion::Body, -1, 0), None);
    }

    #[test]
    fn test_stored_values_override_labels() {
        let model = StaticModel::new(4, 4).with_value(CellRegion::Body, 2, 3, json!(42));
        assert_eq!(model.data(CellRegion::Body, 2, 3), Some(json!(42)));
        // Padding cells created by the resize still report labels
        assert_eq!(model.data(CellRegion::Body, 2, 0), Some(json!("(2, 0)")));
    }

    #[test]
    fn test_groups_are_region_scoped() {
        let model = StaticModel::new(10, 10)
            .with_group(CellRegion::Body, CellGroup::new(1, 1, 2, 2))
            .unwrap()
            .with_group(CellRegion::RowHeader, CellGroup::new(0, 0, 1, 0))
            .unwrap();
        assert_eq!(model.group_count(CellRegion::Body), 1);
        assert_eq!(model.group_count(CellRegion::RowHeader), 1);
        assert_eq!(model.group_count(CellRegion::CornerHeader), 0);
        assert_eq!(model.group(CellRegion::Body, 0), Some(CellGroup::new(1, 1, 2, 2)));
        assert_eq!(model.group(CellRegion::Body, 1), None);
    }

    #[test]
    fn test_invalid_group_rejected() {
        let err = StaticModel::new(10, 10)
            .with_group(CellRegion::Body, CellGroup::new(3, 0, 1, 0))
            .unwrap_err();
        assert!(matches!(err, DataGridError::InvalidGroup(_)));
    }

    #[test]
    fn test_from_json() {
        let model = StaticModel::from_json(
            r#"{
                "rowCount": 20,
                "columnCount": 6,
                "headerRowCount": 3,
                "defaultSizes": { "rowHeight": 32 },
                "groups": {
                    "body": [{"startRow": 1, "endRow": 2, "startColumn": 1, "endColumn": 2}],
                    "column-header": [{"startRow": 0, "endRow": 1, "startColumn": 4, "endColumn": 4}]
                },
                "values": { "body": [["a", "b"]] }
            }"#,
        )
        .unwrap();
        assert_eq!(model.header_row_count, 3);
        assert_eq!(model.header_column_count, 1);
        assert_eq!(model.default_sizes.row_height, 32.0);
        assert_eq!(model.groups(CellRegion::Body), &[CellGroup::new(1, 1, 2, 2)]);
        assert_eq!(
            model.groups(CellRegion::ColumnHeader),
            &[CellGroup::new(0, 4, 1, 4)]
        );
        assert_eq!(model.data(CellRegion::Body, 0, 1), Some(json!("b")));
    }

    #[test]
    fn test_from_json_rejects_inverted_group() {
        let err = StaticModel::from_json(
            r#"{"rowCount": 5, "columnCount": 5,
                "groups": {"body": [{"startRow": 4, "endRow": 1, "startColumn": 0, "endColumn": 0}]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataGridError::InvalidGroup(g) if g.start_row == 4));
    }

    #[test]
    fn test_json_round_trip() {
        let model = StaticModel::new(8, 4)
            .with_header_rows(2)
            .with_default_sizes(DefaultSizes {
                row_height: 24.0,
                ..DefaultSizes::default()
            })
            .with_group(CellRegion::Body, CellGroup::new(1, 1, 2, 3))
            .unwrap()
            .with_group(CellRegion::CornerHeader, CellGroup::new(0, 0, 1, 0))
            .unwrap()
            .with_value(CellRegion::RowHeader, 3, 0, Value::from("total"));

        let json = model.to_json().unwrap();
        assert!(json.contains("\"corner-header\""));
        let loaded = StaticModel::from_json(&json).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded.data(CellRegion::RowHeader, 3, 0), Some(Value::from("total")));
    }

    #[test]
    fn test_set_groups_replaces() {
        let mut model = StaticModel::new(10, 10)
            .with_group(CellRegion::Body, CellGroup::new(0, 0, 1, 1))
            .unwrap();
        model
            .set_groups(CellRegion::Body, vec![CellGroup::new(5, 5, 6, 6)])
            .unwrap();
        assert_eq!(model.groups(CellRegion::Body), &[CellGroup::new(5, 5, 6, 6)]);
        model.clear_groups();
        assert_eq!(model.group_count(CellRegion::Body), 0);
    }
}
