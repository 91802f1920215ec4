//! DotFind locates circular dots of a known approximate radius in
//! grayscale images and scores detections against ground truth.
//!
//! Detection runs a gradient-based circular-Hough search followed by an
//! intensity post-filter; scoring is a greedy nearest-match pass with
//! distance-weighted partial credit. Optional parallelism is available
//! via the `rayon` feature and `image`-crate interop via `image-io`.

pub mod detect;
pub mod image;
pub mod score;
mod trace;
mod types;
pub mod util;

pub use detect::{detect, DetectParams};
pub use image::{ImageView, OwnedImage};
pub use score::pseudo_accuracy;
pub use types::Point;
pub use util::{DotFindError, DotFindResult};
