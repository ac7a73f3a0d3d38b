//! Core data structures shared by every pipeline stage.

/// Pixel rectangles
pub mod rect;
/// Grid constants, option letters, and result records
pub mod sheet;

pub use rect::Rect;
pub use sheet::{
    BubbleCandidate, Choice, ColumnRegion, GRID_COLUMNS, OPTIONS_PER_ROW, QUESTION_COUNT,
    QuestionResult, ROWS_PER_COLUMN, RowBand,
};
