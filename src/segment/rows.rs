//! Row segmentation: partition a column's height into 25 question bands.
//!
//! Two strategies implement one interface. The projection strategy locates
//! printed rows as peaks of a smoothed ink-projection profile and is used
//! whenever it finds enough of them; the uniform strategy divides the
//! height evenly and always succeeds, so a column can never end up with
//! anything other than 25 bands.

use tracing::debug;

use crate::config::ScanConfig;
use crate::models::{ROWS_PER_COLUMN, RowBand};
use crate::utils::binarize::{blur_5x5, otsu_threshold};
use crate::utils::projection::{cluster_peaks, find_peaks, ink_projection, smooth};

/// One way of slicing a column into row bands.
///
/// Returns `None` when the strategy is not confident enough to commit to a
/// segmentation; the caller then falls through to the next strategy.
pub trait RowStrategy {
    /// Segment a grayscale column buffer into exactly 25 bands, or decline.
    fn segment(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
        config: &ScanConfig,
    ) -> Option<Vec<RowBand>>;
}

/// Peak-based segmentation over the smoothed ink projection.
pub struct ProjectionStrategy;

/// Deterministic equal-height segmentation below the first inked row.
pub struct UniformStrategy;

impl RowStrategy for ProjectionStrategy {
    fn segment(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
        config: &ScanConfig,
    ) -> Option<Vec<RowBand>> {
        if width == 0 || height == 0 {
            return None;
        }

        let blurred = blur_5x5(gray, width, height);
        let threshold = otsu_threshold(&blurred);
        let profile = ink_projection(&blurred, width, height, threshold);
        let window = (height / config.smooth_window_div.max(1) as usize).max(3);
        let smoothed = smooth(&profile, window);

        let centers = detect_row_centers(&smoothed, height, config)?;
        Some(bands_from_centers(&centers, height, config))
    }
}

impl RowStrategy for UniformStrategy {
    fn segment(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
        config: &ScanConfig,
    ) -> Option<Vec<RowBand>> {
        Some(uniform_bands(gray, width, height, config))
    }
}

/// Pick 25 row centers from a smoothed projection profile, or decline.
///
/// Peaks are clustered, the cluster count is gated, clusters inside the top
/// header fraction are skipped, and the post-trim count is gated again.
/// When every cluster sits in the header region nothing is skipped, matching
/// the calibrated behavior.
pub(crate) fn detect_row_centers(
    smoothed: &[f32],
    height: usize,
    config: &ScanConfig,
) -> Option<Vec<usize>> {
    let peaks = find_peaks(smoothed, config.peak_mean_factor);
    let gap = (height / config.cluster_gap_div.max(1) as usize).max(1);
    let clustered = cluster_peaks(&peaks, gap);

    if clustered.len() < config.min_peak_clusters {
        debug!(
            clusters = clustered.len(),
            needed = config.min_peak_clusters,
            "projection strategy under-confident"
        );
        return None;
    }

    let header_limit = height as f32 * config.header_skip_frac;
    let start = clustered
        .iter()
        .position(|&c| c as f32 > header_limit)
        .unwrap_or(0);
    if clustered.len() - start < ROWS_PER_COLUMN {
        debug!(
            kept = clustered.len() - start,
            "too few clusters after header trim"
        );
        return None;
    }

    debug!(clusters = clustered.len(), skipped = start, "projection strategy accepted");
    Some(clustered[start..start + ROWS_PER_COLUMN].to_vec())
}

/// Build the 25 bands around detected centers.
///
/// Bands span `center +/- height/band_half_div`; the first band's top and
/// the last band's bottom are widened to `height/edge_band_half_div` so edge
/// rows are not clipped. A band whose top would overlap its predecessor is
/// pushed down one pixel past it, which keeps bands strictly ordered.
pub(crate) fn bands_from_centers(
    centers: &[usize],
    height: usize,
    config: &ScanConfig,
) -> Vec<RowBand> {
    let half = (height / config.band_half_div.max(1) as usize) as i64;
    let edge_half = (height / config.edge_band_half_div.max(1) as usize) as i64;
    let last = centers.len().saturating_sub(1);

    let mut bands: Vec<RowBand> = Vec::with_capacity(centers.len());
    for (i, &center) in centers.iter().enumerate() {
        let c = center as i64;
        let mut y0 = c - half;
        let mut y1 = c + half;
        if i == 0 {
            y0 = (c - edge_half).max(0);
        }
        if i == last {
            y1 = (c + edge_half).min(height as i64);
        }
        if let Some(prev) = bands.last()
            && y0 < prev.y1 as i64
        {
            y0 = prev.y1 as i64 + 1;
        }
        bands.push(RowBand {
            index: i,
            y0: y0.max(0) as u32,
            y1: y1.max(0) as u32,
        });
    }

    bands
}

/// Equal-height fallback bands. Binarizes at the fixed threshold, skips the
/// leading blank margin (first row whose projection exceeds 10% of the
/// maximum), and splits the remaining height into 25 equal float-height
/// bands.
pub fn uniform_bands(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &ScanConfig,
) -> Vec<RowBand> {
    let profile = ink_projection(gray, width, height, config.fallback_threshold);
    let max = profile.iter().copied().max().unwrap_or(0);
    let floor = max as f32 * config.fallback_start_frac;
    let start = profile
        .iter()
        .position(|&v| v as f32 > floor)
        .unwrap_or(0);

    let row_h = (height - start) as f32 / ROWS_PER_COLUMN as f32;
    (0..ROWS_PER_COLUMN)
        .map(|i| RowBand {
            index: i,
            y0: (start as f32 + i as f32 * row_h) as u32,
            y1: (start as f32 + (i + 1) as f32 * row_h) as u32,
        })
        .collect()
}

/// Segment a column into its 25 row bands.
///
/// Uses the projection strategy when it is confident, otherwise the uniform
/// fallback; either way the result has exactly 25 ordered bands.
pub fn segment_rows(gray: &[u8], width: usize, height: usize, config: &ScanConfig) -> Vec<RowBand> {
    match ProjectionStrategy.segment(gray, width, height, config) {
        Some(bands) => bands,
        None => {
            debug!("using uniform fallback segmentation");
            uniform_bands(gray, width, height, config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoothed profile with sharp teeth at the given positions
    fn toothed_profile(len: usize, teeth: &[usize]) -> Vec<f32> {
        let mut profile = vec![0.0f32; len];
        for &t in teeth {
            profile[t - 1] = 5.0;
            profile[t] = 10.0;
            profile[t + 1] = 5.0;
        }
        profile
    }

    fn teeth(count: usize, first: usize, spacing: usize) -> Vec<usize> {
        (0..count).map(|i| first + i * spacing).collect()
    }

    #[test]
    fn test_detect_centers_happy_path() {
        let cfg = ScanConfig::default();
        let h = 1400;
        // 26 teeth, the first inside the 10% header region
        let positions = teeth(26, 100, 48);
        let profile = toothed_profile(h, &positions);
        let centers = detect_row_centers(&profile, h, &cfg).expect("confident");
        assert_eq!(centers.len(), 25);
        // Header tooth at 100 (< 140) was skipped
        assert_eq!(centers[0], 148);
    }

    #[test]
    fn test_detect_centers_cluster_gate() {
        let cfg = ScanConfig::default();
        let h = 1400;
        // 19 clusters: one below the confidence gate
        let profile = toothed_profile(h, &teeth(19, 150, 60));
        assert!(detect_row_centers(&profile, h, &cfg).is_none());

        // 20 clusters passes the first gate but not the post-trim count
        let profile = toothed_profile(h, &teeth(20, 150, 60));
        assert!(detect_row_centers(&profile, h, &cfg).is_none());
    }

    #[test]
    fn test_detect_centers_post_trim_gate() {
        let cfg = ScanConfig::default();
        let h = 1400;
        // 26 clusters but two sit in the header region: 24 remain, declined
        let mut positions = vec![60, 100];
        positions.extend(teeth(24, 200, 45));
        let profile = toothed_profile(h, &positions);
        assert!(detect_row_centers(&profile, h, &cfg).is_none());

        // One more past the header line and it is accepted
        let mut positions = vec![60];
        positions.extend(teeth(25, 200, 45));
        let profile = toothed_profile(h, &positions);
        let centers = detect_row_centers(&profile, h, &cfg).expect("confident");
        assert_eq!(centers.len(), 25);
        assert_eq!(centers[0], 200);
    }

    #[test]
    fn test_detect_centers_merges_close_peaks() {
        let cfg = ScanConfig::default();
        let h = 1400; // cluster gap = 28
        // Teeth in pairs 10px apart: each pair merges into one cluster
        let mut positions = Vec::new();
        for i in 0..25 {
            positions.push(150 + i * 48);
            positions.push(160 + i * 48);
        }
        let profile = toothed_profile(h, &positions);
        let centers = detect_row_centers(&profile, h, &cfg).expect("confident");
        assert_eq!(centers.len(), 25);
        assert_eq!(centers[0], 155);
    }

    #[test]
    fn test_bands_from_centers_geometry() {
        let cfg = ScanConfig::default();
        let h = 1400; // half = 20, edge half = 23
        let centers: Vec<usize> = (0..25).map(|i| 100 + i * 50).collect();
        let bands = bands_from_centers(&centers, h, &cfg);

        assert_eq!(bands.len(), 25);
        // First band widened at the top, interior bands symmetric
        assert_eq!(bands[0].y0, 100 - 23);
        assert_eq!(bands[0].y1, 100 + 20);
        assert_eq!(bands[1].y0, 150 - 20);
        assert_eq!(bands[1].y1, 150 + 20);
        // Last band widened at the bottom
        assert_eq!(bands[24].y1, (100 + 24 * 50 + 23) as u32);
        for pair in bands.windows(2) {
            assert!(pair[0].y1 <= pair[1].y0);
        }
    }

    #[test]
    fn test_bands_push_down_on_overlap() {
        let cfg = ScanConfig::default();
        let h = 1400; // half = 20 -> bands are 40 tall
        // Centers only 30 apart: every band would overlap its predecessor
        let centers: Vec<usize> = (0..25).map(|i| 100 + i * 30).collect();
        let bands = bands_from_centers(&centers, h, &cfg);
        for pair in bands.windows(2) {
            assert!(
                pair[1].y0 > pair[0].y1,
                "band {} not pushed below band {}",
                pair[1].index,
                pair[0].index
            );
        }
    }

    #[test]
    fn test_uniform_bands_blank_column() {
        let cfg = ScanConfig::default();
        let (w, h) = (60usize, 500usize);
        let gray = vec![255u8; w * h];
        let bands = uniform_bands(&gray, w, h, &cfg);

        assert_eq!(bands.len(), 25);
        assert_eq!(bands[0].y0, 0);
        assert_eq!(bands[24].y1, 500);
        for b in &bands {
            assert_eq!(b.y1 - b.y0, 20);
        }
    }

    #[test]
    fn test_uniform_bands_skip_leading_margin() {
        let cfg = ScanConfig::default();
        let (w, h) = (60usize, 520usize);
        let mut gray = vec![255u8; w * h];
        // Ink starts at row 20
        for y in 20..h {
            gray[y * w] = 0;
        }
        let bands = uniform_bands(&gray, w, h, &cfg);
        assert_eq!(bands.len(), 25);
        assert_eq!(bands[0].y0, 20);
        assert_eq!(bands[24].y1, 520);
    }

    #[test]
    fn test_segment_rows_always_25() {
        let cfg = ScanConfig::default();
        // A blank column can never satisfy the projection gates, so the
        // fallback has to carry it
        let (w, h) = (40usize, 120usize);
        let gray = vec![255u8; w * h];
        let bands = segment_rows(&gray, w, h, &cfg);
        assert_eq!(bands.len(), 25);
        for pair in bands.windows(2) {
            assert!(pair[0].y1 <= pair[1].y0);
        }
    }
}
