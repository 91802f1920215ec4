//! Pseudo-accuracy scoring of detections against ground truth.
//!
//! Detections are matched greedily in input order: each detection claims
//! the nearest ground-truth point not yet consumed. A valid match
//! (squared distance below radius squared) earns partial credit that
//! decays with distance; anything else costs a flat penalty. The final
//! score is normalized by the ground-truth count and floored at zero.
//!
//! The greedy, order-dependent pass is deliberate: earlier detections
//! get first claim on nearby ground truth, and replacing it with an
//! optimal assignment would change the numbers.

use crate::trace::trace_event;
use crate::types::Point;
use crate::util::{DotFindError, DotFindResult};

pub(crate) mod distance;

use distance::DistanceMatrix;

/// Scores `detected` against `truth` for dots of the given radius.
///
/// Returns a value in `[0, 1]`. Fails with
/// [`DotFindError::EmptyGroundTruth`] when `truth` is empty; an empty
/// `detected` list scores 0 against any non-empty truth set.
pub fn pseudo_accuracy(
    truth: &[Point],
    detected: &[Point],
    radius: u32,
) -> DotFindResult<f32> {
    if truth.is_empty() {
        return Err(DotFindError::EmptyGroundTruth);
    }

    let matrix = DistanceMatrix::compute(truth, detected);
    let radius_sq = i64::from(radius) * i64::from(radius);

    let mut consumed = vec![false; truth.len()];
    let mut sum = 0.0f32;
    let mut matched = 0usize;

    for det_id in 0..detected.len() {
        match nearest_unconsumed(&matrix, &consumed, det_id) {
            Some((truth_id, dist_sq)) if dist_sq < radius_sq => {
                sum += credit(dist_sq, radius_sq);
                consumed[truth_id] = true;
                matched += 1;
            }
            // Out of radius, or every ground-truth point already
            // consumed: flat penalty either way.
            _ => sum -= 1.0,
        }
    }

    trace_event!(
        "pseudo_accuracy",
        truth = truth.len(),
        detected = detected.len(),
        matched = matched,
    );

    Ok((sum / truth.len() as f32).max(0.0))
}

/// Nearest ground-truth id not yet consumed, ties to the lowest id.
///
/// `None` when the match pool is exhausted.
fn nearest_unconsumed(
    matrix: &DistanceMatrix,
    consumed: &[bool],
    det_id: usize,
) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;
    for (truth_id, &used) in consumed.iter().enumerate() {
        if used {
            continue;
        }
        let dist_sq = matrix.get(truth_id, det_id);
        match best {
            Some((_, best_sq)) if best_sq <= dist_sq => {}
            _ => best = Some((truth_id, dist_sq)),
        }
    }
    best
}

/// Credit for a valid match: one squared pixel of rounding slack is
/// free, then linear decay toward zero at the radius-squared boundary.
fn credit(dist_sq: i64, radius_sq: i64) -> f32 {
    1.0 - ((dist_sq - 1) as f32 / radius_sq as f32).max(0.0)
}
