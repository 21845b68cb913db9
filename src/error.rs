//! Error types for EXR I/O and OIDN denoising.
//!
//! See [`Error`] for the main error type returned by public APIs.

use std::fmt;
use std::path::PathBuf;

/// Errors from oidn-exr.
///
/// This type implements [`std::error::Error`], [`Send`], and [`Sync`], so it can be
/// used with `?` and error handling libraries, and across thread boundaries.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Opening or decoding an EXR file failed (missing file, malformed header,
    /// truncated or corrupt pixel data).
    Load {
        path: PathBuf,
        source: exr::error::Error,
    },
    /// Encoding or writing an EXR file failed.
    Save {
        path: PathBuf,
        source: exr::error::Error,
    },
    /// The file does not contain a channel with the given name.
    MissingChannel { path: PathBuf, channel: &'static str },
    /// The named channel stores integer samples; only float channels are loaded.
    UnsupportedSampleType { path: PathBuf, channel: &'static str },
    /// The file declares a data window with zero extent.
    EmptyDataWindow { path: PathBuf },
    /// Image dimensions are zero, or images that must match in size do not.
    InvalidDimensions,
    /// A pixel coordinate lies outside the image bounds.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// OIDN API returned an error.
    OidnError { code: u32, message: String },
    /// Device creation failed (e.g. no supported backend).
    DeviceCreationFailed,
    /// Filter creation failed.
    FilterCreationFailed,
    /// Out of memory.
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load { path, source } => {
                write!(f, "failed to load {}: {}", path.display(), source)
            }
            Error::Save { path, source } => {
                write!(f, "failed to save {}: {}", path.display(), source)
            }
            Error::MissingChannel { path, channel } => {
                write!(f, "{}: no \"{}\" channel", path.display(), channel)
            }
            Error::UnsupportedSampleType { path, channel } => write!(
                f,
                "{}: channel \"{}\" has an unsupported (integer) sample type",
                path.display(),
                channel
            ),
            Error::EmptyDataWindow { path } => {
                write!(f, "{}: empty data window", path.display())
            }
            Error::InvalidDimensions => write!(f, "invalid image dimensions"),
            Error::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "pixel ({}, {}) out of bounds for {}x{} image",
                x, y, width, height
            ),
            Error::OidnError { code, message } => write!(f, "OIDN error ({}): {}", code, message),
            Error::DeviceCreationFailed => write!(f, "OIDN device creation failed"),
            Error::FilterCreationFailed => write!(f, "OIDN filter creation failed"),
            Error::OutOfMemory => write!(f, "OIDN out of memory"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load { source, .. } | Error::Save { source, .. } => Some(source),
            _ => None,
        }
    }
}
