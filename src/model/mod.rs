//! Data model interface consumed by the merge algebra and the layout.
//!
//! The grid never owns cell data. A model reports how many rows and columns
//! each region has, what to show in a cell, and which rectangles of cells are
//! merged. Models may change between calls (e.g. on reset), so nothing in this
//! crate holds on to the groups a model reports.

mod static_model;

pub use static_model::{RegionMap, StaticModel};

use crate::types::{CellGroup, CellRegion, ColumnRegion, RowRegion};

/// Read-only view of a grid's data.
pub trait DataModel {
    /// Number of rows in a row region
    fn row_count(&self, region: RowRegion) -> u32;

    /// Number of columns in a column region
    fn column_count(&self, region: ColumnRegion) -> u32;

    /// Value of one cell, `None` when the cell is out of range.
    fn data(&self, region: CellRegion, row: i32, column: i32) -> Option<serde_json::Value>;

    /// Number of merge groups declared in `region`.
    fn group_count(&self, _region: CellRegion) -> usize {
        0
    }

    /// The `index`-th merge group declared in `region`, for
    /// `index < group_count(region)`.
    fn group(&self, _region: CellRegion, _index: usize) -> Option<CellGroup> {
        None
    }
}

impl<M: DataModel + ?Sized> DataModel for &M {
    fn row_count(&self, region: RowRegion) -> u32 {
        (**self).row_count(region)
    }

    fn column_count(&self, region: ColumnRegion) -> u32 {
        (**self).column_count(region)
    }

    fn data(&self, region: CellRegion, row: i32, column: i32) -> Option<serde_json::Value> {
        (**self).data(region, row, column)
    }

    fn group_count(&self, region: CellRegion) -> usize {
        (**self).group_count(region)
    }

    fn group(&self, region: CellRegion, index: usize) -> Option<CellGroup> {
        (**self).group(region, index)
    }
}
