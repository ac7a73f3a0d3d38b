//! Grid segmentation: columns first, then rows within each column.

/// Column partitioning (4 proportional slices with interior padding)
pub mod columns;
/// Row banding (projection strategy with uniform fallback)
pub mod rows;

pub use columns::segment_columns;
pub use rows::{ProjectionStrategy, RowStrategy, UniformStrategy, segment_rows, uniform_bands};
