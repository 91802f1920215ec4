//! Loading detector input via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Any format `image`
//! decodes is accepted; frames collapse to 8-bit luma, which drops an
//! alpha channel if present.

use crate::detect::{detect, DetectParams};
use crate::image::OwnedImage;
use crate::types::Point;
use crate::util::{DotFindError, DotFindResult};
use std::path::Path;

impl OwnedImage {
    /// Converts any decoded frame into a detector-ready grayscale buffer.
    pub fn from_dynamic(img: &image::DynamicImage) -> DotFindResult<Self> {
        let gray = img.to_luma8();
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        OwnedImage::from_vec(gray.into_raw(), width, height)
    }

    /// Loads an image file and converts it to grayscale.
    pub fn load<P: AsRef<Path>>(path: P) -> DotFindResult<Self> {
        let img = image::open(path).map_err(|err| DotFindError::ImageIo {
            reason: err.to_string(),
        })?;
        Self::from_dynamic(&img)
    }
}

/// Loads an image file and runs dot detection on it in one step.
pub fn detect_dots_in_file<P: AsRef<Path>>(
    path: P,
    params: &DetectParams,
) -> DotFindResult<Vec<Point>> {
    let image = OwnedImage::load(path)?;
    Ok(detect(image.view(), params))
}
