//! Vertical projection profiles and peak analysis.
//!
//! The row segmenter works on a 1D signal: for every row of a binarized
//! column, the number of ink pixels. Printed answer rows show up as local
//! maxima of that signal once it is smoothed.

/// Count ink pixels (`gray < threshold`) per row of a grayscale buffer.
pub fn ink_projection(gray: &[u8], width: usize, height: usize, threshold: u8) -> Vec<u32> {
    let mut profile = vec![0u32; height];
    for (y, count) in profile.iter_mut().enumerate() {
        let row = &gray[y * width..(y + 1) * width];
        *count = row.iter().filter(|&&p| p < threshold).count() as u32;
    }
    profile
}

/// Moving-average smoothing with "same" alignment and zero padding at the
/// edges, so the output has the input's length.
pub fn smooth(profile: &[u32], window: usize) -> Vec<f32> {
    let n = profile.len();
    if n == 0 || window == 0 {
        return vec![0.0; n];
    }

    let half = (window - 1) / 2;
    let mut out = vec![0.0f32; n];
    for (i, slot) in out.iter_mut().enumerate() {
        let hi = (i + half).min(n - 1);
        let lo = (i + half + 1).saturating_sub(window);
        let sum: u64 = profile[lo..=hi].iter().map(|&v| v as u64).sum();
        *slot = sum as f32 / window as f32;
    }
    out
}

/// Local maxima of the smoothed profile: samples exceeding both neighbors
/// and `mean(profile) * mean_factor`.
pub fn find_peaks(smoothed: &[f32], mean_factor: f32) -> Vec<usize> {
    let n = smoothed.len();
    if n < 3 {
        return Vec::new();
    }

    let mean = smoothed.iter().sum::<f32>() / n as f32;
    let floor = mean * mean_factor;

    let mut peaks = Vec::new();
    for i in 1..n - 1 {
        if smoothed[i] > floor && smoothed[i] > smoothed[i - 1] && smoothed[i] > smoothed[i + 1] {
            peaks.push(i);
        }
    }
    peaks
}

/// Merge peaks closer than `gap` to their cluster's first member, replacing
/// each cluster by the truncated mean of its positions. Input must be sorted
/// ascending (which `find_peaks` guarantees).
pub fn cluster_peaks(peaks: &[usize], gap: usize) -> Vec<usize> {
    let mut clustered = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    for &peak in peaks {
        match current.first() {
            None => current.push(peak),
            Some(&first) if peak - first < gap => current.push(peak),
            Some(_) => {
                clustered.push(cluster_center(&current));
                current.clear();
                current.push(peak);
            }
        }
    }
    if !current.is_empty() {
        clustered.push(cluster_center(&current));
    }

    clustered
}

fn cluster_center(members: &[usize]) -> usize {
    let sum: usize = members.iter().sum();
    sum / members.len()
}
