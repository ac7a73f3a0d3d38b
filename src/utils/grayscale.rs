//! Grayscale conversion and region intensity measurement.
//!
//! Uses fast integer luma: Y = (76*R + 150*G + 29*B) >> 8, the usual
//! BT.601-weight approximation.

use image::RgbImage;

use crate::models::{ColumnRegion, Rect};

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Integer luma of one RGB pixel
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Extract one column region of the image as a row-major grayscale buffer.
///
/// The buffer has `region.width * region.height` bytes. Pixels outside the
/// image (possible only for malformed regions) read as white.
pub fn column_to_grayscale(image: &RgbImage, region: &ColumnRegion) -> Vec<u8> {
    let (img_w, img_h) = image.dimensions();
    let w = region.width as usize;
    let h = region.height as usize;
    let mut gray = vec![255u8; w * h];

    for y in 0..h {
        let iy = region.y0 + y as u32;
        if iy >= img_h {
            break;
        }
        let row = &mut gray[y * w..(y + 1) * w];
        for (x, out) in row.iter_mut().enumerate() {
            let ix = region.x0 + x as u32;
            if ix >= img_w {
                break;
            }
            let p = image.get_pixel(ix, iy).0;
            *out = luma(p[0], p[1], p[2]);
        }
    }

    gray
}

/// Mean grayscale intensity over a rectangle of the image.
///
/// Returns the white sentinel 255.0 when the rectangle covers no pixels,
/// so empty regions score as unfilled.
pub fn mean_intensity(image: &RgbImage, rect: &Rect) -> f32 {
    let (img_w, img_h) = image.dimensions();
    let x1 = rect.x1.min(img_w);
    let y1 = rect.y1.min(img_h);
    if rect.x0 >= x1 || rect.y0 >= y1 {
        return 255.0;
    }

    let mut sum = 0u64;
    for y in rect.y0..y1 {
        for x in rect.x0..x1 {
            let p = image.get_pixel(x, y).0;
            sum += luma(p[0], p[1], p[2]) as u64;
        }
    }
    let count = (x1 - rect.x0) as u64 * (y1 - rect.y0) as u64;
    sum as f32 / count as f32
}
