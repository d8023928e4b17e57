//! Layout engine for computing cell positions and viewport management.
//!
//! This module handles:
//! - Section sizes and offsets for rows and columns of every region
//! - Cell rectangles, expanded over merged groups, and hit testing
//! - Grid-line segments hidden by merges
//! - Viewport state (scroll position, visible range, merges reaching in)

mod grid_layout;
mod section_list;
mod viewport;

pub use grid_layout::{CellRect, GridLayout, HitTest};
pub use section_list::{SectionIndex, SectionList};
pub use viewport::Viewport;
