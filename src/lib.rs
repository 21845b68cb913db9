//! # oidn-exr
//!
//! Load OpenEXR render passes into interleaved RGB `f32` images and denoise
//! them with [Intel Open Image Denoise](https://www.openimagedenoise.org)
//! (OIDN).
//!
//! The EXR codec is the pure-Rust [`exr`](https://docs.rs/exr) crate, so
//! loading and saving work out of the box. Denoising lives behind the
//! **`oidn`** cargo feature and links OIDN 2.4.x at build time.
//!
//! ## Setup (only for the `oidn` feature)
//!
//! Build and install OIDN 2.4.x (e.g. from
//! <https://github.com/OpenImageDenoise/oidn>), then either:
//!
//! - Set **`OIDN_DIR`** to the install directory (containing `include/` and `lib/`), or
//! - Use **pkg-config** (Linux/macOS) with `OpenImageDenoise` installed.
//!
//! ## Example: load, denoise, save
//!
//! ```ignore
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use oidn_exr::{denoise_with_aux, load_rgb, save_rgb, DenoiseOptions, OidnDevice};
//!
//! let color = load_rgb("noisy.exr")?;
//! let albedo = load_rgb("albedo.exr")?;
//! let normal = load_rgb("normal.exr")?;
//!
//! let device = OidnDevice::new()?;
//! let denoised = denoise_with_aux(
//!     &device,
//!     &color,
//!     Some(&albedo),
//!     Some(&normal),
//!     &DenoiseOptions::default(), // hdr on; or set quality, srgb, input_scale
//! )?;
//! save_rgb("denoised.exr", &denoised)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: work with pixels directly (no OIDN required)
//!
//! ```
//! # fn main() -> Result<(), oidn_exr::Error> {
//! use oidn_exr::RgbImage;
//!
//! let mut image = RgbImage::new(64, 64)?;
//! image.set_pixel(3, 5, 1.0, 0.5, 0.25)?;
//! assert_eq!(image.pixel(3, 5)?, [1.0, 0.5, 0.25]);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "oidn")]
pub mod denoise;
#[cfg(feature = "oidn")]
pub mod device;
pub mod error;
pub mod exr_io;
#[cfg(feature = "oidn")]
pub mod filter;
pub mod image;
#[cfg(feature = "oidn")]
mod sys;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use exr_io::{load_rgb, save_rgb};
pub use image::RgbImage;

#[cfg(feature = "oidn")]
pub use denoise::{denoise, denoise_with_aux, DenoiseOptions};
#[cfg(feature = "oidn")]
pub use device::{take_global_error, OidnDevice, OidnDeviceType};
#[cfg(feature = "oidn")]
pub use filter::{Quality, RtFilter};
