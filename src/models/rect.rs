/// Axis-aligned pixel rectangle in image coordinates.
///
/// `x1`/`y1` are exclusive, so `width = x1 - x0`. Coordinates are kept
/// unsigned; geometry that could go negative is computed in `i64` and
/// clamped before a `Rect` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x0: u32,
    /// Top edge (inclusive)
    pub y0: u32,
    /// Right edge (exclusive)
    pub x1: u32,
    /// Bottom edge (exclusive)
    pub y1: u32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a rectangle from signed corner coordinates, clamping negatives to zero
    pub fn from_signed(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self {
            x0: x0.max(0) as u32,
            y0: y0.max(0) as u32,
            x1: x1.max(0) as u32,
            y1: y1.max(0) as u32,
        }
    }

    /// Rectangle width in pixels (0 when degenerate)
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Rectangle height in pixels (0 when degenerate)
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// True when the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}
