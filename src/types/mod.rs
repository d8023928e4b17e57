//! Data types for the grid geometry.

mod cell_group;
mod region;

pub use cell_group::*;
pub use region::*;
