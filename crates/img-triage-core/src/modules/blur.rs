//! Sharpness measurement.
//!
//! The blur score is the variance of the 4-neighbour discrete Laplacian over
//! the luminance plane. Sharp images carry high-frequency edge energy and score
//! high; defocus and motion blur suppress it.

use image::GrayImage;

use super::stats::RunningStats;

/// Maps an out-of-range index back into `0..len`, mirroring about the edge
/// pixel without repeating it (`dcb|abcd|cba`).
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
const fn reflect_101(index: i64, len: u32) -> u32 {
    if len == 1 {
        return 0;
    }
    let len = len as i64;
    let mapped = if index < 0 {
        -index
    } else if index >= len {
        2 * len - 2 - index
    } else {
        index
    };
    mapped as u32
}

/// Applies the `[0 1 0; 1 -4 1; 0 1 0]` kernel to every pixel, row by row.
///
/// Borders are mirrored (reflect-101), so there is one response per input
/// pixel and images of any size, including 1x1, are accepted. Responses are
/// produced lazily; nothing proportional to the image size is allocated.
pub fn laplacian_responses(luma: &GrayImage) -> impl Iterator<Item = f64> + '_ {
    let (width, height) = luma.dimensions();
    let sample = move |x: i64, y: i64| -> i32 {
        let px = reflect_101(x, width);
        let py = reflect_101(y, height);
        i32::from(luma.get_pixel(px, py).0[0])
    };

    (0..i64::from(height)).flat_map(move |y| {
        (0..i64::from(width)).map(move |x| {
            let response = sample(x, y - 1) + sample(x, y + 1) + sample(x - 1, y)
                + sample(x + 1, y)
                - 4 * sample(x, y);
            f64::from(response)
        })
    })
}

/// Population variance of the Laplacian response.
#[must_use]
pub fn laplacian_variance(luma: &GrayImage) -> f64 {
    laplacian_responses(luma)
        .collect::<RunningStats>()
        .variance()
}
