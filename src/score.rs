//! Darkness scoring and the darkest-wins selection rule.

use image::RgbImage;

use crate::models::{BubbleCandidate, Choice, OPTIONS_PER_ROW, Rect};
use crate::utils::grayscale::mean_intensity;

/// Score the 5 bubble rectangles of a row against the original image.
///
/// `darkness` is the mean grayscale intensity of the rectangle (255 for an
/// empty region, i.e. unfilled); `fill_percent` normalizes it so 100 means
/// solid black.
pub fn score_bubbles(image: &RgbImage, rects: &[Rect; OPTIONS_PER_ROW]) -> [BubbleCandidate; OPTIONS_PER_ROW] {
    let mut out = [BubbleCandidate {
        letter: Choice::A,
        rect: Rect::default(),
        darkness: 255.0,
        fill_percent: 0.0,
    }; OPTIONS_PER_ROW];

    for (slot, candidate) in out.iter_mut().enumerate() {
        let rect = rects[slot];
        let darkness = mean_intensity(image, &rect);
        *candidate = BubbleCandidate {
            letter: Choice::ALL[slot],
            rect,
            darkness,
            fill_percent: (255.0 - darkness) / 255.0 * 100.0,
        };
    }

    out
}

/// Pick the accepted bubble of a row, if any.
///
/// The candidate with the highest `fill_percent` wins; an exact tie goes to
/// the earlier letter (first occurrence). The winner is accepted only when
/// its fill reaches `accept_percent`, otherwise the row counts as blank.
pub fn decide(
    candidates: &[BubbleCandidate; OPTIONS_PER_ROW],
    accept_percent: f32,
) -> Option<usize> {
    let mut best = 0usize;
    for (i, c) in candidates.iter().enumerate().skip(1) {
        if c.fill_percent > candidates[best].fill_percent {
            best = i;
        }
    }
    (candidates[best].fill_percent >= accept_percent).then_some(best)
}
