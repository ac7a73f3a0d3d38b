//! Tunable parameters for sheet scanning.
//!
//! Every constant here was calibrated empirically against representative
//! scanned sheets; none is derived from image statistics. They live in a
//! config struct so calibration runs can sweep them without touching the
//! pipeline code.

/// Scanning parameters with calibrated defaults.
///
/// Divisor fields express height-relative distances the way the projection
/// algorithm uses them: the actual pixel value is `column_height / divisor`.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum fill percentage for the darkest bubble of a row to be
    /// accepted as a selection. Below this the question is blank.
    pub fill_accept_percent: f32,
    /// Minimum number of clustered projection peaks required to trust the
    /// projection row strategy.
    pub min_peak_clusters: usize,
    /// A projection sample must exceed `mean(profile) * this` to count as
    /// a peak.
    pub peak_mean_factor: f32,
    /// Clusters within this fraction of the column height from the top are
    /// treated as header noise and skipped.
    pub header_skip_frac: f32,
    /// Peaks closer than `height / cluster_gap_div` merge into one cluster.
    pub cluster_gap_div: u32,
    /// Row bands extend `height / band_half_div` above and below a cluster
    /// center.
    pub band_half_div: u32,
    /// The first band's top and the last band's bottom extend
    /// `height / edge_band_half_div` instead, to avoid clipping edge rows.
    pub edge_band_half_div: u32,
    /// Projection smoothing window is `max(3, height / smooth_window_div)`.
    pub smooth_window_div: u32,
    /// Fixed binarization threshold used by the uniform fallback strategy.
    pub fallback_threshold: u8,
    /// The fallback skips the leading blank margin: content starts at the
    /// first row whose projection exceeds this fraction of the maximum.
    pub fallback_start_frac: f32,
    /// Interior padding subtracted from each nominal quarter-width column
    /// slice, horizontally and vertically.
    pub column_padding: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fill_accept_percent: 43.0,
            min_peak_clusters: 20,
            peak_mean_factor: 0.8,
            header_skip_frac: 0.1,
            cluster_gap_div: 50,
            band_half_div: 70,
            edge_band_half_div: 60,
            smooth_window_div: 100,
            fallback_threshold: 200,
            fallback_start_frac: 0.1,
            column_padding: 8,
        }
    }
}
