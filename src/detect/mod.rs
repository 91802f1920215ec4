//! Dot detection pipeline: optional blur, circular-Hough search, and the
//! intensity post-filter.

use crate::image::ImageView;
use crate::trace::trace_event;
use crate::types::Point;

pub(crate) mod gradient;
pub(crate) mod hough;

/// Tunable parameters for [`detect`].
#[derive(Clone, Copy, Debug)]
pub struct DetectParams {
    /// Expected dot radius in pixels.
    pub radius: u32,
    /// Minimum center-to-center distance. `None` means `radius / 2`.
    ///
    /// Too small risks double-detecting one dot; too large risks missing
    /// nearby or overlapping dots.
    pub min_padding: Option<f32>,
    /// Allowed radius variance in pixels: the search window is
    /// `[radius - radius_flex, radius + radius_flex]`. Keep small but
    /// nonzero when the radius is known.
    pub radius_flex: u32,
    /// Box-blur the image before detection. Trades precision for
    /// robustness to noise and small occlusions.
    pub blur: bool,
    /// Accumulator vote threshold. Lower yields more, noisier
    /// detections; higher yields fewer, more conservative ones.
    pub sensitivity: u32,
    /// Exclusive grayscale intensity bounds for the post-filter sample.
    pub color_boundary: (u8, u8),
}

impl DetectParams {
    /// Parameters for dots of the given radius with the stock defaults.
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            min_padding: None,
            radius_flex: 1,
            blur: false,
            sensitivity: 5,
            color_boundary: (20, 200),
        }
    }

    fn min_padding_px(&self) -> f32 {
        self.min_padding
            .unwrap_or_else(|| self.radius as f32 / 2.0)
    }
}

/// Detects dot centers of a known approximate radius.
///
/// Returns integer pixel centers ordered by accumulator vote strength,
/// strongest first. An empty result means no circles were found, which
/// is a normal outcome rather than an error.
pub fn detect(image: ImageView<'_>, params: &DetectParams) -> Vec<Point> {
    let owned;
    let search_view = if params.blur {
        owned = image.to_owned_image().box_blur_3x3();
        owned.view()
    } else {
        image
    };

    let field = gradient::sobel(search_view);
    let min_radius = params.radius.saturating_sub(params.radius_flex).max(1);
    let max_radius = params.radius + params.radius_flex;
    let peaks = hough::find_circle_centers(
        search_view,
        &field,
        min_radius,
        max_radius,
        params.min_padding_px(),
        params.sensitivity,
    );

    let (lo, hi) = params.color_boundary;
    let centers: Vec<Point> = peaks
        .iter()
        .map(|peak| Point::new(peak.x.round() as i32, peak.y.round() as i32))
        .filter(|p| {
            // Sample one step toward the origin to compensate for the
            // detector's rounding bias; clamped so candidates at
            // coordinate 0 stay in bounds.
            let sample =
                search_view.sample_clamped(i64::from(p.x) - 1, i64::from(p.y) - 1);
            lo < sample && sample < hi
        })
        .collect();

    trace_event!(
        "detect",
        candidates = peaks.len(),
        kept = centers.len(),
        strongest = peaks.first().map_or(0, |p| p.votes),
        radius = params.radius,
    );

    centers
}

#[cfg(test)]
mod tests {
    use super::DetectParams;

    #[test]
    fn default_min_padding_is_half_radius() {
        let params = DetectParams::new(10);
        assert_eq!(params.min_padding_px(), 5.0);
        assert_eq!(params.radius_flex, 1);
        assert_eq!(params.sensitivity, 5);
        assert_eq!(params.color_boundary, (20, 200));
        assert!(!params.blur);
    }

    #[test]
    fn explicit_min_padding_overrides_default() {
        let params = DetectParams {
            min_padding: Some(12.5),
            ..DetectParams::new(10)
        };
        assert_eq!(params.min_padding_px(), 12.5);
    }
}
