//! RT denoising filter (OIDN "RT", the generic ray tracing filter).

use crate::device::OidnDevice;
use crate::sys;
use crate::Error;
use std::ffi::CString;
use std::os::raw::c_void;

/// Filter quality vs performance trade-off (OIDN 2.x).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Quality {
    /// Default (high quality).
    #[default]
    Default,
    /// Fast — for interactive/real-time preview.
    Fast,
    /// Balanced — interactive/real-time.
    Balanced,
    /// High — for final-frame rendering.
    High,
}

impl Quality {
    fn to_raw(self) -> sys::OIDNQuality {
        match self {
            Quality::Default => sys::OIDNQuality::Default,
            Quality::Fast => sys::OIDNQuality::Fast,
            Quality::Balanced => sys::OIDNQuality::Balanced,
            Quality::High => sys::OIDNQuality::High,
        }
    }
}

/// Ray tracing denoising filter (OIDN "RT" filter).
///
/// Denoises a beauty (color) image, optionally using albedo and normal AOVs.
/// Images are bound zero-copy as tightly packed interleaved `Float3` host
/// memory, the layout of [`RgbImage`](crate::RgbImage). Reuse the same filter
/// for multiple frames when dimensions match.
pub struct RtFilter<'a> {
    device: &'a OidnDevice,
    raw: sys::OIDNFilter,
    width: u32,
    height: u32,
    hdr: bool,
    srgb: bool,
    clean_aux: bool,
    input_scale: f32,
    quality: Quality,
}

impl std::fmt::Debug for RtFilter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtFilter")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("hdr", &self.hdr)
            .field("srgb", &self.srgb)
            .field("quality", &self.quality)
            .finish_non_exhaustive()
    }
}

impl<'a> RtFilter<'a> {
    /// Creates a new RT filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterCreationFailed`] if the RT filter type is not available, or the
    /// device's last error (e.g. [`Error::OidnError`]).
    pub fn new(device: &'a OidnDevice) -> Result<Self, Error> {
        let type_name = CString::new("RT").unwrap();
        let raw = unsafe { sys::oidnNewFilter(device.raw(), type_name.as_ptr()) };
        if raw.is_null() {
            return Err(device.take_error().unwrap_or(Error::FilterCreationFailed));
        }
        Ok(Self {
            device,
            raw,
            width: 0,
            height: 0,
            hdr: true,
            srgb: false,
            clean_aux: false,
            input_scale: f32::NAN,
            quality: Quality::Default,
        })
    }

    /// Image dimensions (must be set before execute).
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> &mut Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Whether the input is HDR. Default: true.
    pub fn set_hdr(&mut self, hdr: bool) -> &mut Self {
        self.hdr = hdr;
        self
    }

    /// Whether the input is sRGB (LDR). Default: false.
    pub fn set_srgb(&mut self, srgb: bool) -> &mut Self {
        self.srgb = srgb;
        self
    }

    /// Whether albedo/normal are noise-free (prefiltered). Default: false.
    pub fn set_clean_aux(&mut self, clean: bool) -> &mut Self {
        self.clean_aux = clean;
        self
    }

    /// Input scale (e.g. for HDR). NaN = auto.
    pub fn set_input_scale(&mut self, scale: f32) -> &mut Self {
        self.input_scale = scale;
        self
    }

    /// Filter quality. Default: `Quality::Default`.
    pub fn set_quality(&mut self, quality: Quality) -> &mut Self {
        self.quality = quality;
        self
    }

    /// Denoises `color` into `output`, optionally guided by albedo and normal
    /// AOVs. Every slice must hold `width * height * 3` floats in interleaved
    /// RGB order. Blocks until the result is in `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if dimensions are unset or any
    /// slice length does not match them, or an OIDN error from the device.
    pub fn execute(
        &self,
        color: &[f32],
        albedo: Option<&[f32]>,
        normal: Option<&[f32]>,
        output: &mut [f32],
    ) -> Result<(), Error> {
        let w = self.width as usize;
        let h = self.height as usize;
        if w == 0 || h == 0 {
            return Err(Error::InvalidDimensions);
        }
        let n = w * h * 3;
        if color.len() != n || output.len() != n {
            return Err(Error::InvalidDimensions);
        }
        if albedo.is_some_and(|a| a.len() != n) || normal.is_some_and(|m| m.len() != n) {
            return Err(Error::InvalidDimensions);
        }

        let c_color = CString::new("color").unwrap();
        let c_albedo = CString::new("albedo").unwrap();
        let c_normal = CString::new("normal").unwrap();
        let c_output = CString::new("output").unwrap();
        let c_hdr = CString::new("hdr").unwrap();
        let c_srgb = CString::new("srgb").unwrap();
        let c_clean_aux = CString::new("cleanAux").unwrap();
        let c_input_scale = CString::new("inputScale").unwrap();
        let c_quality = CString::new("quality").unwrap();

        // OIDN only touches the shared host images between execute and sync;
        // the slices stay borrowed for that whole window.
        unsafe {
            sys::oidnSetSharedFilterImage(
                self.raw,
                c_color.as_ptr(),
                color.as_ptr() as *mut c_void,
                sys::OIDNFormat::Float3,
                w,
                h,
                0,
                0,
                0,
            );
            if let Some(albedo) = albedo {
                sys::oidnSetSharedFilterImage(
                    self.raw,
                    c_albedo.as_ptr(),
                    albedo.as_ptr() as *mut c_void,
                    sys::OIDNFormat::Float3,
                    w,
                    h,
                    0,
                    0,
                    0,
                );
            }
            if let Some(normal) = normal {
                sys::oidnSetSharedFilterImage(
                    self.raw,
                    c_normal.as_ptr(),
                    normal.as_ptr() as *mut c_void,
                    sys::OIDNFormat::Float3,
                    w,
                    h,
                    0,
                    0,
                    0,
                );
            }
            sys::oidnSetSharedFilterImage(
                self.raw,
                c_output.as_ptr(),
                output.as_mut_ptr() as *mut c_void,
                sys::OIDNFormat::Float3,
                w,
                h,
                0,
                0,
                0,
            );
            sys::oidnSetFilterBool(self.raw, c_hdr.as_ptr(), self.hdr);
            sys::oidnSetFilterBool(self.raw, c_srgb.as_ptr(), self.srgb);
            sys::oidnSetFilterBool(self.raw, c_clean_aux.as_ptr(), self.clean_aux);
            sys::oidnSetFilterFloat(self.raw, c_input_scale.as_ptr(), self.input_scale);
            sys::oidnSetFilterInt(self.raw, c_quality.as_ptr(), self.quality.to_raw() as i32);

            sys::oidnCommitFilter(self.raw);
            sys::oidnExecuteFilter(self.raw);
        }

        // Required for GPU (e.g. CUDA) where execute is async; ensures the
        // result is in `output` before returning.
        self.device.sync();

        if let Some(e) = self.device.take_error() {
            return Err(e);
        }
        Ok(())
    }
}

impl Drop for RtFilter<'_> {
    fn drop(&mut self) {
        unsafe { sys::oidnReleaseFilter(self.raw) }
    }
}

unsafe impl Send for RtFilter<'_> {}
