//! markscan - bubble-sheet optical mark recognition
//!
//! Reads a photographed or scanned 100-question answer sheet (4 columns of
//! 25 rows, 5 bubbles A-E per row) and produces the selected option for
//! every question, plus an annotated copy of the image for auditing.
//! The grid is located purely from pixel geometry: columns by proportional
//! slicing, rows by projection-profile peaks with a deterministic uniform
//! fallback, so the output always covers all 100 questions.
//!
//! The engine is pure computation over an already-decoded image; decoding,
//! HTTP, and scoring against an answer key belong to the caller.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Annotation overlay rendering for audit images
pub mod annotate;
/// Tunable scan parameters with calibrated defaults
pub mod config;
/// Error type
pub mod error;
/// Bubble rectangle geometry and layout profiles
pub mod locate;
/// Core data structures (grid constants, Choice, QuestionResult, Rect)
pub mod models;
/// Per-column processing pipeline and audit reports
pub mod pipeline;
/// Darkness scoring and the darkest-wins decision rule
pub mod score;
/// Column and row segmentation
pub mod segment;
/// Low-level image helpers (grayscale, binarization, projections)
pub mod utils;

pub use annotate::AnnotationStyle;
pub use config::ScanConfig;
pub use error::ScanError;
pub use locate::LayoutProfile;
pub use models::{
    BubbleCandidate, Choice, ColumnRegion, GRID_COLUMNS, OPTIONS_PER_ROW, QUESTION_COUNT,
    QuestionResult, ROWS_PER_COLUMN, Rect, RowBand,
};
pub use pipeline::{ColumnReport, RowOutcome};

use image::RgbImage;
use rayon::prelude::*;
use std::path::Path;

use pipeline::process_column;
use segment::segment_columns;

/// Complete result of scanning one sheet.
#[derive(Debug)]
pub struct SheetScan {
    /// One result per question, ordered 1..=100
    pub results: Vec<QuestionResult>,
    /// Per-column audit reports (geometry and scores behind every result)
    pub columns: Vec<ColumnReport>,
    /// Copy of the input with all detected geometry drawn on
    pub annotated: RgbImage,
}

impl SheetScan {
    /// Write the annotated image to the given path. The format is chosen
    /// from the file extension.
    pub fn save_annotated(&self, path: impl AsRef<Path>) -> Result<(), ScanError> {
        self.annotated.save(path)?;
        Ok(())
    }
}

/// Sheet scanner with configuration options.
///
/// Stateless and re-entrant: one scanner can grade many images, including
/// concurrently from multiple threads.
pub struct Scanner {
    config: ScanConfig,
    style: AnnotationStyle,
}

impl Scanner {
    /// Scanner with calibrated default parameters
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
            style: AnnotationStyle::default(),
        }
    }

    /// Scanner with custom parameters
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            style: AnnotationStyle::default(),
        }
    }

    /// Replace the annotation style (e.g. to enable text labels)
    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    /// Scan one decoded sheet image.
    ///
    /// The 4 columns are processed in parallel, each writing into its own
    /// 25-question slice of the result array, then joined for assembly and
    /// annotation. Returns [`ScanError::InvalidImage`] only when the image
    /// cannot hold the 4-column grid; everything else is resolved by the
    /// fallback paths, so a valid image always yields exactly 100 results.
    pub fn scan(&self, image: &RgbImage) -> Result<SheetScan, ScanError> {
        let (width, height) = image.dimensions();
        let regions = segment_columns(width, height, &self.config)?;

        let mut selected: Vec<Option<Choice>> = vec![None; QUESTION_COUNT];
        let reports: Vec<ColumnReport> = selected
            .par_chunks_mut(ROWS_PER_COLUMN)
            .zip(regions.par_iter())
            .map(|(slots, region)| {
                let report = process_column(image, region, &self.config);
                for (slot, row) in slots.iter_mut().zip(&report.rows) {
                    *slot = row.selected_choice();
                }
                report
            })
            .collect();

        let results = selected
            .iter()
            .enumerate()
            .map(|(i, &choice)| QuestionResult {
                question_number: i as u32 + 1,
                selected_option: choice,
            })
            .collect();

        let annotated = annotate::render_sheet(image, &reports, &self.style);

        Ok(SheetScan {
            results,
            columns: reports,
            annotated,
        })
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan one sheet with default parameters.
///
/// Convenience wrapper around [`Scanner::scan`].
pub fn scan_sheet(image: &RgbImage) -> Result<SheetScan, ScanError> {
    Scanner::new().scan(image)
}
