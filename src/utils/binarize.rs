//! Binarization helpers: Otsu's automatic threshold and a 5x5 blur used to
//! stabilize the projection profile before thresholding.

/// Calculate Otsu's optimal threshold for a grayscale buffer.
///
/// The returned value is used as `pixel < threshold => ink`. Degenerate
/// histograms (empty or single-intensity buffers) fall back to 128.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    if gray.is_empty() {
        return 128;
    }

    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut weight_bg = 0.0;
    let mut sum_bg = 0.0;
    let mut max_variance = 0.0;
    let mut optimal = 128u8;

    for t in 0..256usize {
        let count = histogram[t] as f64;
        weight_bg += count;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += t as f64 * count;

        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let variance = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);

        if variance > max_variance {
            max_variance = variance;
            // Class boundary is inclusive of t, so "< threshold" needs t+1
            optimal = (t + 1).min(255) as u8;
        }
    }

    optimal
}

/// Blur a grayscale buffer with a separable 5x5 binomial kernel
/// ([1,4,6,4,1]/16 per axis), replicating edge pixels.
pub fn blur_5x5(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    const WEIGHTS: [u32; 5] = [1, 4, 6, 4, 1];

    // Horizontal pass, keeping 16x scale
    let mut tmp = vec![0u32; width * height];
    for y in 0..height {
        let row = &gray[y * width..(y + 1) * width];
        let out = &mut tmp[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0u32;
            for (k, &w) in WEIGHTS.iter().enumerate() {
                let sx = (x as isize + k as isize - 2).clamp(0, width as isize - 1);
                acc += w * row[sx as usize] as u32;
            }
            out[x] = acc;
        }
    }

    // Vertical pass, dividing out the 256x total scale with rounding
    let mut blurred = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, &w) in WEIGHTS.iter().enumerate() {
                let sy = (y as isize + k as isize - 2).clamp(0, height as isize - 1);
                acc += w * tmp[sy as usize * width + x];
            }
            blurred[y * width + x] = ((acc + 128) >> 8).min(255) as u8;
        }
    }

    blurred
}
