//! Column segmentation: split the sheet into its 4 answer columns.

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::models::{ColumnRegion, GRID_COLUMNS};

/// Partition the image width into the 4 column regions.
///
/// Each nominal quarter-width slice is inset by `config.column_padding` on
/// all sides; the last slice extends to the image edge to absorb the
/// remainder of a non-divisible width. Fails with [`ScanError::InvalidImage`]
/// only when the image is too small for any region to have positive size.
pub fn segment_columns(
    width: u32,
    height: u32,
    config: &ScanConfig,
) -> Result<[ColumnRegion; GRID_COLUMNS], ScanError> {
    let pad = config.column_padding;
    let col_w = width / GRID_COLUMNS as u32;
    if height <= 2 * pad {
        return Err(ScanError::InvalidImage);
    }

    let mut regions = [ColumnRegion {
        index: 0,
        x0: 0,
        y0: 0,
        width: 0,
        height: 0,
    }; GRID_COLUMNS];

    for (i, region) in regions.iter_mut().enumerate() {
        let x0 = i as u32 * col_w + pad;
        let slice_end = if i < GRID_COLUMNS - 1 {
            (i as u32 + 1) * col_w
        } else {
            width
        };
        let x1 = slice_end.saturating_sub(pad);
        if x1 <= x0 {
            return Err(ScanError::InvalidImage);
        }
        *region = ColumnRegion {
            index: i,
            x0,
            y0: pad,
            width: x1 - x0,
            height: height - 2 * pad,
        };
    }

    Ok(regions)
}
