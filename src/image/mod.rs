//! Grayscale image buffers.
//!
//! `ImageView` is a borrowed, contiguous single-channel view; `OwnedImage`
//! is its owning counterpart. Both index row-major with `(x, y)` pixel
//! coordinates. `sample_clamped` clamps out-of-range coordinates to the
//! nearest edge pixel, which the detector's post-filter relies on for
//! candidates sitting at coordinate 0.

use crate::util::{DotFindError, DotFindResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed contiguous grayscale image view.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a view over a row-major `width * height` buffer.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> DotFindResult<Self> {
        let needed = checked_len(width, height)?;
        if data.len() < needed {
            return Err(DotFindError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Samples `(x, y)` with both coordinates clamped into image bounds.
    ///
    /// Negative coordinates clamp to 0; coordinates past the far edge
    /// clamp to the last row/column.
    pub fn sample_clamped(&self, x: i64, y: i64) -> u8 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[cy * self.width + cx]
    }

    /// Copies the view into an owned buffer.
    pub fn to_owned_image(&self) -> OwnedImage {
        OwnedImage {
            data: self.data[..self.width * self.height].to_vec(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Creates an owned image from a row-major `width * height` buffer.
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize) -> DotFindResult<Self> {
        let needed = checked_len(width, height)?;
        if data.len() < needed {
            return Err(DotFindError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns a 3x3 box-blurred copy with clamped borders.
    ///
    /// Each output pixel is the rounded mean of the 3x3 neighborhood,
    /// with out-of-range neighbors clamped to the nearest edge pixel.
    pub fn box_blur_3x3(&self) -> OwnedImage {
        let w = self.width as i64;
        let h = self.height as i64;
        let mut out = vec![0u8; self.data.len()];
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0u32;
                for dy in -1..=1i64 {
                    for dx in -1..=1i64 {
                        let sx = (x + dx).clamp(0, w - 1) as usize;
                        let sy = (y + dy).clamp(0, h - 1) as usize;
                        sum += u32::from(self.data[sy * self.width + sx]);
                    }
                }
                out[(y * w + x) as usize] = ((sum + 4) / 9) as u8;
            }
        }
        OwnedImage {
            data: out,
            width: self.width,
            height: self.height,
        }
    }
}

fn checked_len(width: usize, height: usize) -> DotFindResult<usize> {
    if width == 0 || height == 0 {
        return Err(DotFindError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(DotFindError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{ImageView, OwnedImage};
    use crate::util::DotFindError;

    #[test]
    fn from_slice_rejects_short_buffer() {
        let data = vec![0u8; 5];
        let err = ImageView::from_slice(&data, 3, 2).unwrap_err();
        assert!(matches!(
            err,
            DotFindError::BufferTooSmall { needed: 6, got: 5 }
        ));
    }

    #[test]
    fn from_slice_rejects_zero_dimension() {
        let data = vec![0u8; 4];
        assert!(matches!(
            ImageView::from_slice(&data, 0, 4).unwrap_err(),
            DotFindError::InvalidDimensions { .. }
        ));
    }

    #[test]
    fn view_formats_for_test_diagnostics() {
        let data = vec![1u8, 2, 3, 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let rendered = format!("{view:?}");
        assert!(rendered.contains("width"));
        assert!(rendered.contains("height"));
    }

    #[test]
    fn sample_clamped_handles_corners() {
        let data = vec![10, 20, 30, 40];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        assert_eq!(view.sample_clamped(-1, -1), 10);
        assert_eq!(view.sample_clamped(0, 0), 10);
        assert_eq!(view.sample_clamped(5, 0), 20);
        assert_eq!(view.sample_clamped(5, 5), 40);
    }

    #[test]
    fn box_blur_preserves_uniform_image() {
        let img = OwnedImage::from_vec(vec![100u8; 16], 4, 4).unwrap();
        let blurred = img.box_blur_3x3();
        assert!(blurred.view().as_slice().iter().all(|&v| v == 100));
    }

    #[test]
    fn box_blur_spreads_single_bright_pixel() {
        let mut data = vec![0u8; 25];
        data[12] = 90; // center of 5x5
        let img = OwnedImage::from_vec(data, 5, 5).unwrap();
        let blurred = img.box_blur_3x3();
        assert_eq!(blurred.view().get(2, 2), Some(10));
        assert_eq!(blurred.view().get(1, 1), Some(10));
        assert_eq!(blurred.view().get(0, 0), Some(0));
    }
}
