//! Per-column pipeline: segmentation, bubble location, scoring, decision.
//!
//! Each column runs this end-to-end with no shared state, which is what
//! makes the 4 columns safe to process on parallel workers.

use image::RgbImage;
use tracing::{debug, trace};

use crate::config::ScanConfig;
use crate::locate::{LayoutProfile, band_extent, locate_bubbles};
use crate::models::{
    BubbleCandidate, Choice, ColumnRegion, OPTIONS_PER_ROW, ROWS_PER_COLUMN, Rect,
};
use crate::score::{decide, score_bubbles};
use crate::segment::rows::segment_rows;
use crate::utils::grayscale::column_to_grayscale;

/// Everything decided about one question row, kept for auditing and for the
/// annotation renderer.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    /// Global question number, 1..=100
    pub question: u32,
    /// The row band in absolute image coordinates
    pub band: Rect,
    /// The five scored bubbles, A through E
    pub bubbles: [BubbleCandidate; OPTIONS_PER_ROW],
    /// Index into `bubbles` of the accepted selection, if any
    pub selected: Option<usize>,
}

impl RowOutcome {
    /// The accepted option letter, if any
    pub fn selected_choice(&self) -> Option<Choice> {
        self.selected.map(|i| self.bubbles[i].letter)
    }
}

/// Full audit record of one processed column.
#[derive(Debug, Clone)]
pub struct ColumnReport {
    /// The column region this report covers
    pub region: ColumnRegion,
    /// One outcome per row, top to bottom (always 25)
    pub rows: Vec<RowOutcome>,
}

/// Run the whole pipeline for one column region.
///
/// Never fails: segmentation falls back to uniform bands and degenerate
/// geometry is repaired locally, so every column yields exactly 25 rows.
pub(crate) fn process_column(
    image: &RgbImage,
    region: &ColumnRegion,
    config: &ScanConfig,
) -> ColumnReport {
    let gray = column_to_grayscale(image, region);
    let bands = segment_rows(&gray, region.width as usize, region.height as usize, config);
    debug_assert_eq!(bands.len(), ROWS_PER_COLUMN);

    let profile = LayoutProfile::for_column(region.index);
    let mut rows = Vec::with_capacity(ROWS_PER_COLUMN);
    let mut accepted = 0usize;

    for band in &bands {
        let question = (region.index * ROWS_PER_COLUMN + band.index + 1) as u32;
        let (gy0, gy1) = band_extent(region, band);
        let rects = locate_bubbles(region, band, profile);
        let bubbles = score_bubbles(image, &rects);
        let selected = decide(&bubbles, config.fill_accept_percent);

        if let Some(i) = selected {
            accepted += 1;
            trace!(
                question,
                option = %bubbles[i].letter,
                fill = bubbles[i].fill_percent,
                "selection accepted"
            );
        }

        rows.push(RowOutcome {
            question,
            band: Rect::new(region.x0, gy0, region.x1(), gy1),
            bubbles,
            selected,
        });
    }

    debug!(column = region.index, accepted, "column processed");
    ColumnReport {
        region: *region,
        rows,
    }
}
