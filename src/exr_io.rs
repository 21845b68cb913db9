//! Load and save RGB `f32` images as OpenEXR files.
//!
//! Decoding goes through the pure-Rust [`exr`] crate: the first flat layer is
//! read into planar per-channel sample buffers, which are then interleaved
//! into an [`RgbImage`]. Values pass through unchanged; this is a linear HDR
//! pipeline with no color-space or tone-mapping transform.

use std::path::Path;
// The exr prelude exports its own single-parameter `Result` alias; keep std's.
use std::result::Result;

use exr::prelude::*;
use log::debug;

use crate::error::Error;
use crate::image::RgbImage;

/// Loads the `R`, `G`, and `B` channels of an EXR file into an [`RgbImage`].
///
/// The first flat layer of the file is used. Its size is the data window
/// extent; a data window not anchored at the origin is fine, the returned
/// image is always indexed from `(0, 0)`. `f32` channels are taken as-is and
/// `f16` channels are widened losslessly.
///
/// # Errors
///
/// Returns [`Error::Load`] if the file cannot be opened or decoded,
/// [`Error::MissingChannel`] if any of `R`, `G`, `B` is absent,
/// [`Error::UnsupportedSampleType`] for integer channels, and
/// [`Error::EmptyDataWindow`] for a zero-extent layer. On failure no image is
/// returned; a load never partially populates its result.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, Error> {
    let path = path.as_ref();
    let exr_image = read_first_flat_layer_from_file(path).map_err(|source| Error::Load {
        path: path.to_owned(),
        source,
    })?;
    let layer = &exr_image.layer_data;

    let width = layer.size.width();
    let height = layer.size.height();
    if width == 0 || height == 0 {
        return Err(Error::EmptyDataWindow {
            path: path.to_owned(),
        });
    }
    debug!(
        "{}: {}x{} data window at {:?}",
        path.display(),
        width,
        height,
        layer.attributes.layer_position
    );

    let red = channel_as_f32(path, layer, "R")?;
    let green = channel_as_f32(path, layer, "G")?;
    let blue = channel_as_f32(path, layer, "B")?;

    let mut image = RgbImage::new(width, height)?;
    let data = image.data_mut();
    for i in 0..width * height {
        data[i * 3] = red[i];
        data[i * 3 + 1] = green[i];
        data[i * 3 + 2] = blue[i];
    }
    Ok(image)
}

/// Saves an [`RgbImage`] as a single-layer R/G/B `f32` scanline EXR file.
///
/// # Errors
///
/// Returns [`Error::Save`] if encoding or writing fails.
pub fn save_rgb(path: impl AsRef<Path>, image: &RgbImage) -> Result<(), Error> {
    let path = path.as_ref();
    let width = image.width();
    let data = image.data();
    write_rgb_file(path, width, image.height(), |x, y| {
        let i = (y * width + x) * 3;
        (data[i], data[i + 1], data[i + 2])
    })
    .map_err(|source| Error::Save {
        path: path.to_owned(),
        source,
    })?;
    debug!("{}: wrote {}x{}", path.display(), width, image.height());
    Ok(())
}

/// Extracts one named channel of the layer as a planar `f32` buffer,
/// row-major within the data window.
fn channel_as_f32(
    path: &Path,
    layer: &Layer<AnyChannels<FlatSamples>>,
    name: &'static str,
) -> Result<Vec<f32>, Error> {
    let wanted = Text::from(name);
    let channel = layer
        .channel_data
        .list
        .iter()
        .find(|channel| channel.name == wanted)
        .ok_or_else(|| Error::MissingChannel {
            path: path.to_owned(),
            channel: name,
        })?;
    match &channel.sample_data {
        FlatSamples::F32(values) => Ok(values.clone()),
        FlatSamples::F16(values) => Ok(values.iter().copied().map(half::f16::to_f32).collect()),
        FlatSamples::U32(_) => Err(Error::UnsupportedSampleType {
            path: path.to_owned(),
            channel: name,
        }),
    }
}
