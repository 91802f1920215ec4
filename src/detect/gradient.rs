//! Sobel gradient field computation.

use crate::image::ImageView;

/// Per-pixel gradient magnitudes and unit directions.
///
/// Border pixels (the outermost row/column) carry zero magnitude, so
/// they never vote in the accumulator.
pub(crate) struct GradientField {
    pub magnitude: Vec<f32>,
    /// Unit gradient x-components, zero where magnitude is zero.
    pub dir_x: Vec<f32>,
    /// Unit gradient y-components, zero where magnitude is zero.
    pub dir_y: Vec<f32>,
}

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Computes the 3x3 Sobel gradient field for a grayscale view.
pub(crate) fn sobel(image: ImageView<'_>) -> GradientField {
    let width = image.width();
    let height = image.height();
    let gray = image.as_slice();

    let mut magnitude = vec![0.0f32; width * height];
    let mut dir_x = vec![0.0f32; width * height];
    let mut dir_y = vec![0.0f32; width * height];

    if width < 3 || height < 3 {
        return GradientField {
            magnitude,
            dir_x,
            dir_y,
        };
    }

    for y in 1..(height - 1) {
        for x in 1..(width - 1) {
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for ky in 0..3 {
                for kx in 0..3 {
                    let pixel = gray[(y + ky - 1) * width + (x + kx - 1)] as f32;
                    let k = ky * 3 + kx;
                    sum_x += pixel * SOBEL_X[k];
                    sum_y += pixel * SOBEL_Y[k];
                }
            }

            let mag = (sum_x * sum_x + sum_y * sum_y).sqrt();
            let idx = y * width + x;
            magnitude[idx] = mag;
            if mag > 0.0 {
                dir_x[idx] = sum_x / mag;
                dir_y[idx] = sum_y / mag;
            }
        }
    }

    GradientField {
        magnitude,
        dir_x,
        dir_y,
    }
}
