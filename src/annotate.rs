//! Annotation rendering for audit and debugging.
//!
//! Draws every geometry decision the scanner made onto a copy of the input:
//! column and row boundaries, bubble rectangles with their letters, and a
//! thick highlight on each accepted selection. The overlay is produced from
//! the same [`ColumnReport`]s the scan returned, so it is always consistent
//! with the structured results.

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as DrawRect;
use tracing::debug;

use crate::models::Rect;
use crate::pipeline::ColumnReport;

const COLUMN_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const ROW_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const BUBBLE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const LETTER_COLOR: Rgb<u8> = Rgb([0, 128, 0]);
const WINNER_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Controls how the overlay is drawn.
///
/// Text labels need a font; when none is configured the geometry is still
/// drawn and text is skipped.
pub struct AnnotationStyle {
    /// Font for labels. If `None`, text rendering is skipped.
    pub font: Option<FontVec>,
    /// Font scale in pixels. Defaults to 16.0.
    pub font_scale: f32,
    /// Line thickness for column and winner outlines. Defaults to 2.
    pub thickness: i32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            font: None,
            font_scale: 16.0,
            thickness: 2,
        }
    }
}

impl AnnotationStyle {
    /// Style with a font loaded from the given file.
    pub fn with_font_path(path: &std::path::Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("failed to parse font file: {}", path.display()),
            )
        })?;
        Ok(Self {
            font: Some(font),
            ..Self::default()
        })
    }

    /// Style with a system font, searched in common locations. Falls back
    /// to the default (no text) when none is found.
    pub fn with_system_font() -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        for path in &font_paths {
            if let Ok(data) = std::fs::read(path)
                && let Ok(font) = FontVec::try_from_vec(data)
            {
                debug!(path, "loaded annotation font");
                return Self {
                    font: Some(font),
                    ..Self::default()
                };
            }
        }
        debug!("no system font found, annotation text will be skipped");
        Self::default()
    }
}

/// Render the full overlay onto a copy of the input image.
pub fn render_sheet(
    image: &RgbImage,
    reports: &[ColumnReport],
    style: &AnnotationStyle,
) -> RgbImage {
    let mut annotated = image.clone();

    for report in reports {
        let r = &report.region;
        let region_rect = Rect::new(r.x0, r.y0, r.x1(), r.y1());
        draw_thick_rect(&mut annotated, &region_rect, COLUMN_COLOR, style.thickness);
        draw_label(
            &mut annotated,
            style,
            COLUMN_COLOR,
            r.x0 as i32 + 5,
            r.y0 as i32 + 5,
            &format!("C{}", r.index + 1),
        );

        for row in &report.rows {
            draw_thick_rect(&mut annotated, &row.band, ROW_COLOR, 1);
            let band_h = row.band.height() as i32;
            draw_label(
                &mut annotated,
                style,
                ROW_COLOR,
                row.band.x0 as i32 + 5,
                row.band.y0 as i32 + band_h / 4,
                &row.question.to_string(),
            );

            for bubble in &row.bubbles {
                draw_thick_rect(&mut annotated, &bubble.rect, BUBBLE_COLOR, style.thickness);
                draw_label(
                    &mut annotated,
                    style,
                    LETTER_COLOR,
                    (bubble.rect.x0 + bubble.rect.width() / 2) as i32 - 5,
                    bubble.rect.y0 as i32 + (bubble.rect.height() as i32) / 4,
                    &bubble.letter.to_string(),
                );
            }

            if let Some(i) = row.selected {
                draw_thick_rect(&mut annotated, &row.bubbles[i].rect, WINNER_COLOR, 4);
            }
        }
    }

    annotated
}

/// Hollow rectangle with the given outline thickness, growing outward.
/// Rectangles partially outside the image are clipped by the drawing
/// primitive.
fn draw_thick_rect(image: &mut RgbImage, rect: &Rect, color: Rgb<u8>, thickness: i32) {
    if rect.is_empty() {
        return;
    }
    for t in 0..thickness.max(1) {
        let outline = DrawRect::at(rect.x0 as i32 - t, rect.y0 as i32 - t)
            .of_size(rect.width() + 2 * t as u32, rect.height() + 2 * t as u32);
        draw_hollow_rect_mut(image, outline, color);
    }
}

fn draw_label(
    image: &mut RgbImage,
    style: &AnnotationStyle,
    color: Rgb<u8>,
    x: i32,
    y: i32,
    text: &str,
) {
    if let Some(font) = &style.font {
        draw_text_mut(image, color, x, y, style.font_scale, font, text);
    }
}
