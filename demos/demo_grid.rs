//! Example: Build the demo grid model and print its merged geometry
//!
//! Run with: cargo run --example demo_grid

#![allow(clippy::expect_used, clippy::unwrap_used)]

use datagrid::cellgroup::are_cells_merged;
use datagrid::{Axis, CellGroup, CellRegion, GridLayout, StaticModel, Viewport};

fn main() {
    let model = StaticModel::new(20, 6)
        .with_header_rows(3)
        .with_header_columns(3)
        .with_group(CellRegion::Body, CellGroup::new(1, 1, 2, 2))
        .and_then(|m| m.with_group(CellRegion::Body, CellGroup::new(5, 1, 5, 2)))
        .and_then(|m| m.with_group(CellRegion::Body, CellGroup::new(3, 5, 4, 5)))
        .and_then(|m| m.with_group(CellRegion::ColumnHeader, CellGroup::new(0, 4, 1, 4)))
        .and_then(|m| m.with_group(CellRegion::RowHeader, CellGroup::new(0, 0, 1, 1)))
        .and_then(|m| m.with_group(CellRegion::CornerHeader, CellGroup::new(0, 0, 1, 1)))
        .expect("demo groups are valid");

    let layout = GridLayout::from_model(&model, &model.default_sizes);
    println!(
        "Grid: {}x{} body, header {}x{} px",
        model.row_count,
        model.column_count,
        layout.header_width(),
        layout.header_height()
    );

    for region in CellRegion::ALL {
        println!("\n  {region}:");
        for group in model.groups(region) {
            let rect = layout.cell_rect(&model, region, group.start_row, group.start_column);
            println!(
                "    rows {}..={}, columns {}..={} -> x={} y={} w={} h={}",
                group.start_row,
                group.end_row,
                group.start_column,
                group.end_column,
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
        }
    }

    println!(
        "\n  (1,1) and (2,2) merged: {}",
        are_cells_merged(&model, CellRegion::Body, (1, 1), (2, 2))
    );

    let mut viewport = Viewport::new();
    viewport.resize(300.0, 120.0);
    viewport.set_scroll(0.0, 40.0, &layout);
    println!(
        "  Visible rows {:?}, merged groups in view: {:?}",
        viewport.visible_rows(&layout),
        viewport.visible_merged_groups(&model, &layout, CellRegion::Body)
    );

    let offsets = datagrid::merge_offsets_for_model(&model, &[CellRegion::Body], Axis::Row, 1);
    println!(
        "  Row 1 offsets: start={} end={}",
        offsets.start_offset, offsets.end_offset
    );
}
