//! Squared-distance matrix between ground-truth and detected points.
//!
//! Distances stay in exact `i64` arithmetic so matching is deterministic
//! across platforms. The fill is embarrassingly parallel; the `rayon`
//! feature enables a row-parallel path that must produce the same matrix
//! as the sequential fill.

use crate::types::Point;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Row-major `truth.len() x detected.len()` matrix of squared distances.
pub(crate) struct DistanceMatrix {
    data: Vec<i64>,
    cols: usize,
}

impl DistanceMatrix {
    pub(crate) fn compute(truth: &[Point], detected: &[Point]) -> Self {
        #[cfg(feature = "rayon")]
        {
            Self::compute_par(truth, detected)
        }
        #[cfg(not(feature = "rayon"))]
        {
            Self::compute_seq(truth, detected)
        }
    }

    /// Sequential fill; the reference the parallel path must agree with.
    #[cfg_attr(feature = "rayon", allow(dead_code))]
    fn compute_seq(truth: &[Point], detected: &[Point]) -> Self {
        let cols = detected.len();
        let mut data = Vec::with_capacity(truth.len() * cols);
        for t in truth {
            for d in detected {
                data.push(t.dist_sq(d));
            }
        }
        Self { data, cols }
    }

    #[cfg(feature = "rayon")]
    fn compute_par(truth: &[Point], detected: &[Point]) -> Self {
        let cols = detected.len();
        let data: Vec<i64> = truth
            .par_iter()
            .flat_map_iter(|t| detected.iter().map(move |d| t.dist_sq(d)))
            .collect();
        Self { data, cols }
    }

    /// Squared distance between ground-truth row `truth_id` and detected
    /// column `det_id`.
    pub(crate) fn get(&self, truth_id: usize, det_id: usize) -> i64 {
        self.data[truth_id * self.cols + det_id]
    }
}

#[cfg(test)]
mod tests {
    use super::DistanceMatrix;
    use crate::types::Point;

    #[test]
    fn matrix_is_row_major_truth_by_detected() {
        let truth = [Point::new(0, 0), Point::new(10, 0)];
        let detected = [Point::new(0, 0), Point::new(3, 4), Point::new(10, 0)];
        let m = DistanceMatrix::compute(&truth, &detected);

        assert_eq!(m.get(0, 0), 0);
        assert_eq!(m.get(0, 1), 25);
        assert_eq!(m.get(0, 2), 100);
        assert_eq!(m.get(1, 0), 100);
        assert_eq!(m.get(1, 2), 0);
    }

    #[test]
    fn empty_detected_yields_empty_rows() {
        let truth = [Point::new(1, 1)];
        let m = DistanceMatrix::compute(&truth, &[]);
        assert_eq!(m.cols, 0);
        assert!(m.data.is_empty());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_fill_matches_sequential() {
        let truth: Vec<Point> = (0..40)
            .map(|i| Point::new(i * 7 % 100, i * 13 % 100))
            .collect();
        let detected: Vec<Point> = (0..25)
            .map(|i| Point::new(i * 11 % 100, i * 3 % 100))
            .collect();

        let seq = DistanceMatrix::compute_seq(&truth, &detected);
        let par = DistanceMatrix::compute_par(&truth, &detected);
        assert_eq!(seq.cols, par.cols);
        assert_eq!(seq.data, par.data);
    }
}
