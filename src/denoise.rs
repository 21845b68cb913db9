//! Denoise [`RgbImage`]s with the OIDN RT filter.

use log::debug;

use crate::device::OidnDevice;
use crate::filter::{Quality, RtFilter};
use crate::image::RgbImage;
use crate::Error;

/// Options for denoising an image.
#[derive(Clone, Debug)]
pub struct DenoiseOptions {
    /// Quality vs performance: `Fast`, `Balanced`, or `High`.
    pub quality: Quality,
    /// `true` if the image is HDR (linear, possibly > 1.0).
    pub hdr: bool,
    /// `true` if the image is sRGB-encoded LDR.
    pub srgb: bool,
    /// `true` if albedo/normal are noise-free (prefiltered).
    pub clean_aux: bool,
    /// Input scale for HDR (e.g. exposure). `None` = auto.
    pub input_scale: Option<f32>,
}

impl Default for DenoiseOptions {
    fn default() -> Self {
        Self {
            quality: Quality::Default,
            hdr: true,
            srgb: false,
            clean_aux: false,
            input_scale: None,
        }
    }
}

/// Denoises a color image into a fresh output image.
///
/// This is a blocking call; it returns once the output is fully written.
///
/// # Errors
///
/// Returns [`Error::FilterCreationFailed`] or [`Error::OidnError`] from the
/// engine. The input image is never modified.
pub fn denoise(
    device: &OidnDevice,
    color: &RgbImage,
    options: &DenoiseOptions,
) -> Result<RgbImage, Error> {
    denoise_with_aux(device, color, None, None, options)
}

/// Denoises a color image with optional albedo and normal auxiliary images.
///
/// Higher quality when albedo and normal are provided. All images must have
/// the color image's dimensions.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] if an auxiliary image's size differs
/// from the color image's; otherwise as [`denoise`].
pub fn denoise_with_aux(
    device: &OidnDevice,
    color: &RgbImage,
    albedo: Option<&RgbImage>,
    normal: Option<&RgbImage>,
    options: &DenoiseOptions,
) -> Result<RgbImage, Error> {
    let width = color.width();
    let height = color.height();
    for aux in [albedo, normal].into_iter().flatten() {
        if aux.width() != width || aux.height() != height {
            return Err(Error::InvalidDimensions);
        }
    }
    debug!(
        "denoising {}x{} (albedo: {}, normal: {})",
        width,
        height,
        albedo.is_some(),
        normal.is_some()
    );

    let mut output = RgbImage::new(width, height)?;
    let mut filter = RtFilter::new(device)?;
    filter
        .set_dimensions(width as u32, height as u32)
        .set_hdr(options.hdr)
        .set_srgb(options.srgb)
        .set_clean_aux(options.clean_aux)
        .set_quality(options.quality);
    if let Some(scale) = options.input_scale {
        filter.set_input_scale(scale);
    }
    filter.execute(
        color.data(),
        albedo.map(|image| image.data()),
        normal.map(|image| image.data()),
        output.data_mut(),
    )?;
    Ok(output)
}
