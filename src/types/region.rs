use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataGridError;

/// The four areas of a grid. Groups never merge across regions in
/// region-scoped queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellRegion {
    Body,
    RowHeader,
    ColumnHeader,
    CornerHeader,
}

/// Regions that own a row count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowRegion {
    Body,
    ColumnHeader,
}

/// Regions that own a column count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnRegion {
    Body,
    RowHeader,
}

/// Row or column direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl CellRegion {
    pub const ALL: [CellRegion; 4] = [
        CellRegion::Body,
        CellRegion::RowHeader,
        CellRegion::ColumnHeader,
        CellRegion::CornerHeader,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CellRegion::Body => "body",
            CellRegion::RowHeader => "row-header",
            CellRegion::ColumnHeader => "column-header",
            CellRegion::CornerHeader => "corner-header",
        }
    }

    /// The region whose row count sizes this region's rows.
    pub fn row_region(self) -> RowRegion {
        match self {
            CellRegion::Body | CellRegion::RowHeader => RowRegion::Body,
            CellRegion::ColumnHeader | CellRegion::CornerHeader => RowRegion::ColumnHeader,
        }
    }

    /// The region whose column count sizes this region's columns.
    pub fn column_region(self) -> ColumnRegion {
        match self {
            CellRegion::Body | CellRegion::ColumnHeader => ColumnRegion::Body,
            CellRegion::RowHeader | CellRegion::CornerHeader => ColumnRegion::RowHeader,
        }
    }

    /// Regions laid out on the same sections as `self` along `axis`.
    ///
    /// Rows of the body are shared with the row header, columns of the body
    /// with the column header; the corner header pairs with whichever header
    /// shares the axis.
    pub fn aligned_regions(self, axis: Axis) -> [CellRegion; 2] {
        match (axis, self.row_region(), self.column_region()) {
            (Axis::Row, RowRegion::Body, _) => [CellRegion::Body, CellRegion::RowHeader],
            (Axis::Row, RowRegion::ColumnHeader, _) => {
                [CellRegion::ColumnHeader, CellRegion::CornerHeader]
            }
            (Axis::Column, _, ColumnRegion::Body) => [CellRegion::Body, CellRegion::ColumnHeader],
            (Axis::Column, _, ColumnRegion::RowHeader) => {
                [CellRegion::RowHeader, CellRegion::CornerHeader]
            }
        }
    }
}

impl fmt::Display for CellRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CellRegion {
    type Err = DataGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "body" => Ok(CellRegion::Body),
            "row-header" => Ok(CellRegion::RowHeader),
            "column-header" => Ok(CellRegion::ColumnHeader),
            "corner-header" => Ok(CellRegion::CornerHeader),
            other => Err(DataGridError::UnknownRegion(other.to_string())),
        }
    }
}

impl From<RowRegion> for CellRegion {
    fn from(region: RowRegion) -> Self {
        match region {
            RowRegion::Body => CellRegion::Body,
            RowRegion::ColumnHeader => CellRegion::ColumnHeader,
        }
    }
}

impl From<ColumnRegion> for CellRegion {
    fn from(region: ColumnRegion) -> Self {
        match region {
            ColumnRegion::Body => CellRegion::Body,
            ColumnRegion::RowHeader => CellRegion::RowHeader,
        }
    }
}

impl Axis {
    /// The perpendicular axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Row => "row",
            Axis::Column => "column",
        })
    }
}

impl FromStr for Axis {
    type Err = DataGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "row" => Ok(Axis::Row),
            "column" => Ok(Axis::Column),
            other => Err(DataGridError::UnknownAxis(other.to_string())),
        }
    }
}

/// Parse a comma-separated region list such as `"body,row-header"`.
pub fn parse_regions(list: &str) -> Result<Vec<CellRegion>, DataGridError> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
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
    fn test_region_names_round_trip() {
        for region in CellRegion::ALL {
            assert_eq!(region.as_str().parse::<CellRegion>().unwrap(), region);
        }
        assert!(matches!(
            "footer".parse::<CellRegion>(),
            Err(DataGridError::UnknownRegion(name)) if name == "footer"
        ));
    }

    #[test]
    fn test_region_serde_matches_display() {
        let json = serde_json::to_string(&CellRegion::CornerHeader).unwrap();
        assert_eq!(json, "\"corner-header\"");
        let axis: Axis = serde_json::from_str("\"column\"").unwrap();
        assert_eq!(axis, Axis::Column);
    }

    #[test]
    fn test_aligned_regions() {
        assert_eq!(
            CellRegion::Body.aligned_regions(Axis::Row),
            [CellRegion::Body, CellRegion::RowHeader]
        );
        assert_eq!(
            CellRegion::RowHeader.aligned_regions(Axis::Column),
            [CellRegion::RowHeader, CellRegion::CornerHeader]
        );
        assert_eq!(
            CellRegion::CornerHeader.aligned_regions(Axis::Row),
            [CellRegion::ColumnHeader, CellRegion::CornerHeader]
        );
        assert_eq!(
            CellRegion::ColumnHeader.aligned_regions(Axis::Column),
            [CellRegion::Body, CellRegion::ColumnHeader]
        );
    }

    #[test]
    fn test_parse_regions() {
        assert_eq!(
            parse_regions("body, row-header").unwrap(),
            vec![CellRegion::Body, CellRegion::RowHeader]
        );
        assert!(parse_regions("").unwrap().is_empty());
        assert!(parse_regions("body,nope").is_err());
    }

    #[test]
    fn test_axis_cross() {
        assert_eq!(Axis::Row.cross(), Axis::Column);
        assert_eq!("row".parse::<Axis>().unwrap(), Axis::Row);
        assert!("diagonal".parse::<Axis>().is_err());
    }
}
