use serde::{Deserialize, Serialize};

use super::Axis;

/// A closed rectangle of cells that renders as one merged region.
///
/// All four bounds are inclusive. Real groups satisfy `0 <= start <= end` on
/// both axes; [`CellGroup::EMPTY`] stands for "no group".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellGroup {
    pub start_row: i32,
    pub end_row: i32,
    pub start_column: i32,
    pub end_column: i32,
}

impl CellGroup {
    /// Sentinel returned when an index participates in no merge.
    pub const EMPTY: CellGroup = CellGroup {
        start_row: -1,
        end_row: -1,
        start_column: -1,
        end_column: -1,
    };

    /// Create a group from its top-left and bottom-right cells.
    pub const fn new(start_row: i32, start_column: i32, end_row: i32, end_column: i32) -> Self {
        Self {
            start_row,
            end_row,
            start_column,
            end_column,
        }
    }

    /// A group covering a single cell.
    pub const fn cell(row: i32, column: i32) -> Self {
        Self::new(row, column, row, column)
    }

    /// True for the `(-1, -1, -1, -1)` sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Non-negative and correctly ordered on both axes.
    pub fn is_valid(&self) -> bool {
        self.start_row >= 0
            && self.start_column >= 0
            && self.start_row <= self.end_row
            && self.start_column <= self.end_column
    }

    /// Inclusive `(start, end)` bounds along `axis`.
    pub fn span(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Row => (self.start_row, self.end_row),
            Axis::Column => (self.start_column, self.end_column),
        }
    }

    /// Number of rows covered
    pub fn row_count(&self) -> i32 {
        self.end_row.saturating_sub(self.start_row).saturating_add(1)
    }

    /// Number of columns covered
    pub fn column_count(&self) -> i32 {
        self.end_column.saturating_sub(self.start_column).saturating_add(1)
    }

    /// Does this group contain `index` along `axis`?
    pub fn contains_at_axis(&self, axis: Axis, index: i32) -> bool {
        let (start, end) = self.span(axis);
        index >= start && index <= end
    }

    /// Does this group contain the cell at `(row, column)`?
    pub fn contains(&self, row: i32, column: i32) -> bool {
        self.contains_at_axis(Axis::Row, row) && self.contains_at_axis(Axis::Column, column)
    }

    /// Closed-interval overlap along one axis; the other axis is ignored.
    pub fn intersects_at_axis(&self, other: &CellGroup, axis: Axis) -> bool {
        let (a_start, a_end) = self.span(axis);
        let (b_start, b_end) = other.span(axis);
        a_start <= b_end && b_start <= a_end
    }

    /// Overlap on both axes. Shared edges count.
    pub fn intersects(&self, other: &CellGroup) -> bool {
        self.intersects_at_axis(other, Axis::Row) && self.intersects_at_axis(other, Axis::Column)
    }

    /// Smallest group containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &CellGroup) -> CellGroup {
        CellGroup {
            start_row: self.start_row.min(other.start_row),
            end_row: self.end_row.max(other.end_row),
            start_column: self.start_column.min(other.start_column),
            end_column: self.end_column.max(other.end_column),
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
    fn test_sentinel() {
        assert!(CellGroup::EMPTY.is_empty());
        assert!(!CellGroup::EMPTY.is_valid());
        assert!(!CellGroup::cell(0, 0).is_empty());
    }

    #[test]
    fn test_validity() {
        assert!(CellGroup::new(0, 0, 0, 0).is_valid());
        assert!(CellGroup::new(1, 2, 3, 4).is_valid());
        assert!(!CellGroup::new(3, 0, 1, 0).is_valid());
        assert!(!CellGroup::new(0, 4, 0, 2).is_valid());
        assert!(!CellGroup::new(-2, 0, 1, 1).is_valid());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let g = CellGroup::new(1, 1, 2, 3);
        assert!(g.contains(1, 1));
        assert!(g.contains(2, 3));
        assert!(!g.contains(0, 1));
        assert!(!g.contains(2, 4));
        assert!(g.contains_at_axis(Axis::Column, 3));
        assert!(!g.contains_at_axis(Axis::Row, 3));
    }

    #[test]
    fn test_span_and_counts() {
        let g = CellGroup::new(1, 4, 2, 9);
        assert_eq!(g.span(Axis::Row), (1, 2));
        assert_eq!(g.span(Axis::Column), (4, 9));
        assert_eq!(g.row_count(), 2);
        assert_eq!(g.column_count(), 6);

        let wide = CellGroup::new(0, 0, 0, i32::MAX);
        assert_eq!(wide.column_count(), i32::MAX);
        assert_eq!(wide.span(Axis::Column), (0, i32::MAX));
    }

    #[test]
    fn test_union_envelope() {
        let a = CellGroup::new(0, 3, 1, 4);
        let b = CellGroup::new(2, 0, 5, 1);
        assert_eq!(a.union(&b), CellGroup::new(0, 0, 5, 4));
        assert_eq!(a.union(&a), a);
    }

    #[test]
    fn test_serde_shape() {
        let g = CellGroup::new(1, 2, 3, 4);
        let json = serde_json::to_value(g).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"startRow": 1, "endRow": 3, "startColumn": 2, "endColumn": 4})
        );
        let back: CellGroup = serde_json::from_value(json).unwrap();
        assert_eq!(back, g);
    }
}
