//! Interleaved RGB `f32` image container.
//!
//! See [`RgbImage`] for the pixel layout OIDN and the EXR codec agree on.

use crate::error::Error;

/// Row-major, channel-interleaved RGB image with `f32` samples.
///
/// Pixel `(x, y)` occupies `data[(y * width + x) * 3 ..][..3]` as `(r, g, b)`,
/// with no padding between pixels or rows. This is exactly the layout OIDN
/// expects for `Float3` images, so [`data()`](Self::data) can be handed to a
/// filter without conversion.
///
/// Dimensions are fixed at construction; all samples start at `0.0`.
#[derive(Clone, PartialEq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl std::fmt::Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RgbImage {
    /// Creates a zero-filled image of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width * height * 3],
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes all three channels of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate lies outside the image;
    /// the pixel store is left untouched in that case.
    pub fn set_pixel(&mut self, x: usize, y: usize, r: f32, g: f32, b: f32) -> Result<(), Error> {
        let i = self.index(x, y)?;
        self.data[i] = r;
        self.data[i + 1] = g;
        self.data[i + 2] = b;
        Ok(())
    }

    /// Reads the `(r, g, b)` triple of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate lies outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Result<[f32; 3], Error> {
        let i = self.index(x, y)?;
        Ok([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// The raw interleaved sample store, `width * height * 3` floats.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the raw interleaved sample store.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) * 3)
    }
}
