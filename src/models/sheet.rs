//! Answer-sheet data model: grid constants, option letters, and the
//! structures each pipeline stage produces.

use serde::Serialize;
use std::fmt;

use super::rect::Rect;

/// Number of vertical answer columns on the sheet
pub const GRID_COLUMNS: usize = 4;
/// Number of question rows in each column
pub const ROWS_PER_COLUMN: usize = 25;
/// Number of option bubbles (A-E) in each row
pub const OPTIONS_PER_ROW: usize = 5;
/// Total questions on a sheet
pub const QUESTION_COUNT: usize = GRID_COLUMNS * ROWS_PER_COLUMN;

/// One of the five answer options printed on every row.
///
/// Serializes as its letter (`"A"`..`"E"`), which is what the consuming
/// backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Choice {
    /// Option A (leftmost bubble)
    A,
    /// Option B
    B,
    /// Option C
    C,
    /// Option D
    D,
    /// Option E (rightmost bubble)
    E,
}

impl Choice {
    /// All options in row order, A first
    pub const ALL: [Choice; OPTIONS_PER_ROW] =
        [Choice::A, Choice::B, Choice::C, Choice::D, Choice::E];

    /// Option at a given slot index (0 = A), `None` past E
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Slot index of this option (A = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Printed letter of this option
    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One of the four vertical column regions of the sheet.
///
/// Coordinates are absolute image pixels; the interior padding has already
/// been subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRegion {
    /// Column index, 0..=3 left to right
    pub index: usize,
    /// Left edge in image coordinates
    pub x0: u32,
    /// Top edge in image coordinates
    pub y0: u32,
    /// Region width in pixels
    pub width: u32,
    /// Region height in pixels
    pub height: u32,
}

impl ColumnRegion {
    /// Right edge (exclusive) in image coordinates
    pub fn x1(&self) -> u32 {
        self.x0 + self.width
    }

    /// Bottom edge (exclusive) in image coordinates
    pub fn y1(&self) -> u32 {
        self.y0 + self.height
    }
}

/// A horizontal question-row band within one column.
///
/// `y0`/`y1` are in the column's local coordinate space. Bands within a
/// column are strictly ordered and non-overlapping by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// Row index within the column, 0..=24 top to bottom
    pub index: usize,
    /// Band top, column-local
    pub y0: u32,
    /// Band bottom (exclusive), column-local
    pub y1: u32,
}

/// One scored bubble rectangle. Exactly five per row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleCandidate {
    /// The option this bubble represents
    pub letter: Choice,
    /// Bubble rectangle in absolute image coordinates
    pub rect: Rect,
    /// Mean grayscale intensity of the rectangle, 0 = black, 255 = white
    pub darkness: f32,
    /// Normalized fill measure, `(255 - darkness) / 255 * 100`
    pub fill_percent: f32,
}

/// Final outcome for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    /// Global question number, 1..=100, column-major over the grid
    #[serde(rename = "numeropregunta")]
    pub question_number: u32,
    /// Accepted option, or `None` when the row was left blank
    #[serde(rename = "opcionseleccionada")]
    pub selected_option: Option<Choice>,
}
