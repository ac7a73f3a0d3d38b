use thiserror::Error;

/// Errors the scanner can report.
///
/// Row-segmentation under-confidence, degenerate bubble geometry, and
/// darkness ties are all resolved internally and never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input image is empty or too small to hold the 4-column grid.
    #[error("input image is empty or too small to hold a 4-column answer sheet")]
    InvalidImage,

    /// Encoding or writing the annotated image failed.
    #[error("failed to write annotated image: {0}")]
    Image(#[from] image::ImageError),
}
