//! Bubble location: turn a row band into the 5 option rectangles.
//!
//! Two printed layouts exist on the sheet. Columns 0-2 reserve 15% of the
//! column width for the question-number label and pad the outer slots
//! asymmetrically so their bubbles sit clear of the label and the column
//! edge. Column 3 is printed with a wider label block (25%) and uses
//! symmetric slot margins throughout. The difference reflects the physical
//! sheet template and is preserved as-is.

use crate::models::{ColumnRegion, GRID_COLUMNS, OPTIONS_PER_ROW, Rect, RowBand};

/// A band shorter than this many pixels is considered collapsed
const MIN_BAND_PX: u32 = 5;
/// Height a collapsed band is extended to
const EXTENDED_BAND_PX: u32 = 10;
/// Side length a degenerate bubble rectangle is expanded to
const MIN_BUBBLE_PX: i64 = 10;

/// Printed bubble layout of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutProfile {
    /// Columns 0-2: 15% label reserve, asymmetric outer-slot margins
    Standard,
    /// Column 3: 25% label reserve, symmetric margins everywhere
    WideLabel,
}

impl LayoutProfile {
    /// Profile printed on the given column
    pub fn for_column(index: usize) -> Self {
        if index == GRID_COLUMNS - 1 {
            LayoutProfile::WideLabel
        } else {
            LayoutProfile::Standard
        }
    }

    /// Fraction of the column width reserved for the question-number label
    pub fn label_reserve(self) -> f32 {
        match self {
            LayoutProfile::Standard => 0.15,
            LayoutProfile::WideLabel => 0.25,
        }
    }

    /// Left and right margins inside one option slot, in pixels
    fn slot_margins(self, slot: usize, slot_w: i64) -> (i64, i64) {
        let inner = ((slot_w as f32 * 0.15) as i64).max(8);
        let outer = ((slot_w as f32 * 0.35) as i64).max(25);
        match (self, slot) {
            (LayoutProfile::Standard, 0) => (outer, inner),
            (LayoutProfile::Standard, s) if s == OPTIONS_PER_ROW - 1 => (inner, outer),
            _ => (inner, inner),
        }
    }
}

/// Absolute vertical extent of a band, with the collapsed-band rule applied:
/// a band shorter than 5px is extended to 10px from its top.
pub fn band_extent(region: &ColumnRegion, band: &RowBand) -> (u32, u32) {
    let gy0 = region.y0 + band.y0;
    let gy1 = region.y0 + band.y1.max(band.y0);
    if gy1 - gy0 < MIN_BAND_PX {
        (gy0, gy0 + EXTENDED_BAND_PX)
    } else {
        (gy0, gy1)
    }
}

/// Compute the 5 bubble rectangles of one row, in absolute image
/// coordinates.
///
/// Rectangles are clamped to the owning column's bounds; a rectangle that
/// degenerates to zero or negative size afterwards is expanded to a minimum
/// 10x10 box anchored at its origin.
pub fn locate_bubbles(
    region: &ColumnRegion,
    band: &RowBand,
    profile: LayoutProfile,
) -> [Rect; OPTIONS_PER_ROW] {
    let (gy0, gy1) = band_extent(region, band);

    let w = region.width as i64;
    let reserve = (region.width as f32 * profile.label_reserve()) as i64;
    let start_x = region.x0 as i64 + reserve;
    let slot_w = (w - reserve) / OPTIONS_PER_ROW as i64;

    let row_h = (gy1 - gy0) as i64;
    let margin_v = ((row_h as f32 * 0.15) as i64).max(5);

    let mut rects = [Rect::default(); OPTIONS_PER_ROW];
    for (slot, rect) in rects.iter_mut().enumerate() {
        let (margin_l, margin_r) = profile.slot_margins(slot, slot_w);

        let mut x0 = start_x + slot as i64 * slot_w + margin_l;
        let mut x1 = start_x + (slot as i64 + 1) * slot_w - margin_r;
        let mut y0 = gy0 as i64 + margin_v;
        let mut y1 = gy1 as i64 - margin_v;

        // Keep inside the owning column
        x0 = x0.max(region.x0 as i64);
        y0 = y0.max(region.y0 as i64);
        x1 = x1.min(region.x1() as i64);
        y1 = y1.min(region.y1() as i64);

        // Degenerate geometry: grow to a minimum box at the origin
        if x1 <= x0 {
            x1 = x0 + MIN_BUBBLE_PX;
        }
        if y1 <= y0 {
            y1 = y0 + MIN_BUBBLE_PX;
        }

        *rect = Rect::from_signed(x0, y0, x1, y1);
    }

    rects
}
