//! Gradient-based circular-Hough center accumulator.
//!
//! Edge pixels vote along their gradient direction (both signs, so dot
//! polarity does not matter) at every radius in the search window. The
//! accumulator runs at full image resolution. Peaks are 8-neighborhood
//! vote maxima, strongest first, with Euclidean minimum-distance
//! suppression so one dot cannot produce two centers.

use crate::detect::gradient::GradientField;
use crate::image::ImageView;
use crate::trace::trace_event;

/// Gradient magnitude required for a pixel to vote.
const EDGE_GRADIENT_THRESHOLD: f32 = 50.0;

/// A candidate circle center with its accumulated vote count.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CirclePeak {
    /// Sub-pixel center x after centroid refinement.
    pub x: f32,
    /// Sub-pixel center y after centroid refinement.
    pub y: f32,
    pub votes: u32,
}

/// Accumulates center votes and extracts suppressed, refined peaks.
pub(crate) fn find_circle_centers(
    image: ImageView<'_>,
    field: &GradientField,
    min_radius: u32,
    max_radius: u32,
    min_dist: f32,
    vote_threshold: u32,
) -> Vec<CirclePeak> {
    let width = image.width();
    let height = image.height();

    let accumulator = accumulate(field, width, height, min_radius, max_radius);
    let mut peaks = local_maxima(&accumulator, width, height, vote_threshold);

    // Strongest peaks claim their neighborhood first; ties resolve by
    // scan order for determinism.
    peaks.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)).then(a.0.cmp(&b.0)));
    let kept = suppress(&peaks, min_dist);

    trace_event!(
        "hough_peaks",
        raw = peaks.len(),
        kept = kept.len(),
        vote_threshold = vote_threshold,
    );

    kept.iter()
        .map(|&(x, y, votes)| refine_centroid(&accumulator, width, height, x, y, votes))
        .collect()
}

fn accumulate(
    field: &GradientField,
    width: usize,
    height: usize,
    min_radius: u32,
    max_radius: u32,
) -> Vec<u32> {
    let mut accumulator = vec![0u32; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if field.magnitude[idx] < EDGE_GRADIENT_THRESHOLD {
                continue;
            }

            let ux = field.dir_x[idx];
            let uy = field.dir_y[idx];
            for r in min_radius..=max_radius {
                let rf = r as f32;
                for sign in [1.0f32, -1.0] {
                    let cx = (x as f32 + sign * rf * ux).round();
                    let cy = (y as f32 + sign * rf * uy).round();
                    if cx < 0.0 || cy < 0.0 {
                        continue;
                    }
                    let (cx, cy) = (cx as usize, cy as usize);
                    if cx < width && cy < height {
                        accumulator[cy * width + cx] += 1;
                    }
                }
            }
        }
    }

    accumulator
}

fn local_maxima(
    accumulator: &[u32],
    width: usize,
    height: usize,
    vote_threshold: u32,
) -> Vec<(usize, usize, u32)> {
    let mut peaks = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let votes = accumulator[y * width + x];
            if votes < vote_threshold.max(1) {
                continue;
            }
            let mut is_max = true;
            'neighbors: for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    if accumulator[ny as usize * width + nx as usize] > votes {
                        is_max = false;
                        break 'neighbors;
                    }
                }
            }
            if is_max {
                peaks.push((x, y, votes));
            }
        }
    }
    peaks
}

/// Drops peaks closer than `min_dist` (Euclidean) to a stronger kept peak.
fn suppress(peaks: &[(usize, usize, u32)], min_dist: f32) -> Vec<(usize, usize, u32)> {
    let min_dist_sq = min_dist * min_dist;
    let mut kept: Vec<(usize, usize, u32)> = Vec::new();

    'outer: for &peak in peaks {
        for &(kx, ky, _) in &kept {
            let dx = peak.0 as f32 - kx as f32;
            let dy = peak.1 as f32 - ky as f32;
            if dx * dx + dy * dy < min_dist_sq {
                continue 'outer;
            }
        }
        kept.push(peak);
    }

    kept
}

/// Vote-weighted 3x3 centroid around a peak cell.
fn refine_centroid(
    accumulator: &[u32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    votes: u32,
) -> CirclePeak {
    let mut weight_sum = 0.0f32;
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for dy in -1..=1i64 {
        for dx in -1..=1i64 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let w = accumulator[ny as usize * width + nx as usize] as f32;
            weight_sum += w;
            cx += w * nx as f32;
            cy += w * ny as f32;
        }
    }

    if weight_sum > 0.0 {
        CirclePeak {
            x: cx / weight_sum,
            y: cy / weight_sum,
            votes,
        }
    } else {
        CirclePeak {
            x: x as f32,
            y: y as f32,
            votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{refine_centroid, suppress};

    #[test]
    fn refined_peak_keeps_its_vote_count() {
        // An empty accumulator exercises the zero-weight fallback; the
        // peak's vote count must pass through untouched either way.
        let accumulator = vec![0u32; 25];
        let peak = refine_centroid(&accumulator, 5, 5, 2, 2, 7);
        assert_eq!(peak.votes, 7);
        assert_eq!(peak.x, 2.0);
        assert_eq!(peak.y, 2.0);
    }

    #[test]
    fn suppress_keeps_strongest_of_close_pair() {
        // Pre-sorted strongest first, as find_circle_centers guarantees.
        let peaks = [(10, 10, 50u32), (12, 10, 30), (40, 40, 20)];
        let kept = suppress(&peaks, 5.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].0, 10);
        assert_eq!(kept[1].0, 40);
    }

    #[test]
    fn suppress_with_zero_distance_keeps_all() {
        let peaks = [(10, 10, 50u32), (11, 10, 30)];
        assert_eq!(suppress(&peaks, 0.0).len(), 2);
    }
}
