//! Spatial partitioning tools.

pub use self::spatial_grid::{SpatialGrid, SpatialGridError};

mod spatial_grid;
