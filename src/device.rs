//! OIDN logical device (CPU or GPU backend).

use crate::sys;
use crate::Error;
use std::ffi::CStr;
use std::ptr;

/// Returns the first unqueried error for the current thread (e.g. from a failed device creation)
/// and clears it. Can be called without a device to check why [`OidnDevice::new()`] failed.
pub fn take_global_error() -> Option<Error> {
    let mut msg_ptr: *const std::ffi::c_char = ptr::null();
    let code = unsafe { sys::oidnGetDeviceError(ptr::null_mut(), &mut msg_ptr) };
    if code == sys::OIDNError::None {
        return None;
    }
    let message = if msg_ptr.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(msg_ptr).to_string_lossy().into_owned() }
    };
    Some(Error::OidnError {
        code: code as u32,
        message,
    })
}

/// Open Image Denoise logical device.
///
/// Prefer creating one per application and reusing it; filter creation is relatively expensive.
/// See [`Self::new`], [`Self::cpu`], and [`Self::with_type`].
pub struct OidnDevice {
    pub(crate) raw: sys::OIDNDevice,
}

impl std::fmt::Debug for OidnDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidnDevice").finish_non_exhaustive()
    }
}

impl OidnDevice {
    /// Creates a device using the default backend (auto-selects CPU or GPU when available).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceCreationFailed`] if no backend is available. Use [`take_global_error()`]
    /// to retrieve the underlying OIDN message.
    pub fn new() -> Result<Self, Error> {
        Self::with_type(OidnDeviceType::Default)
    }

    /// Creates a CPU-only device (most portable).
    pub fn cpu() -> Result<Self, Error> {
        Self::with_type(OidnDeviceType::Cpu)
    }

    /// Creates a device of the given type. The device is committed before it is returned.
    pub fn with_type(device_type: OidnDeviceType) -> Result<Self, Error> {
        let raw = unsafe { sys::oidnNewDevice(device_type.to_raw()) };
        if raw.is_null() {
            return Err(Error::DeviceCreationFailed);
        }
        unsafe { sys::oidnCommitDevice(raw) };
        Ok(Self { raw })
    }

    /// Returns the first unqueried error and clears it.
    pub fn take_error(&self) -> Option<Error> {
        let mut msg_ptr: *const std::ffi::c_char = ptr::null();
        let code = unsafe { sys::oidnGetDeviceError(self.raw, &mut msg_ptr) };
        if code == sys::OIDNError::None {
            return None;
        }
        let message = if msg_ptr.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(msg_ptr).to_string_lossy().into_owned() }
        };
        Some(Error::OidnError {
            code: code as u32,
            message,
        })
    }

    /// Waits for all async operations on this device to complete.
    pub fn sync(&self) {
        unsafe { sys::oidnSyncDevice(self.raw) };
    }

    pub(crate) fn raw(&self) -> sys::OIDNDevice {
        self.raw
    }
}

impl Drop for OidnDevice {
    fn drop(&mut self) {
        unsafe { sys::oidnReleaseDevice(self.raw) }
    }
}

unsafe impl Send for OidnDevice {}
unsafe impl Sync for OidnDevice {}

/// OIDN device type (CPU, GPU backends, or default auto-select).
#[derive(Clone, Copy, Debug, Default)]
pub enum OidnDeviceType {
    /// Auto-select best available (e.g. CUDA if built and available).
    #[default]
    Default,
    /// CPU only (most portable).
    Cpu,
    /// Intel GPU/CPU via SYCL (oneAPI). Requires OIDN built with SYCL.
    Sycl,
    /// NVIDIA GPU via CUDA. Requires OIDN built with CUDA.
    Cuda,
    /// AMD GPU via HIP. Requires OIDN built with HIP.
    Hip,
    /// Apple GPU via Metal. Requires OIDN built with Metal.
    Metal,
}

impl OidnDeviceType {
    fn to_raw(self) -> sys::OIDNDeviceType {
        match self {
            OidnDeviceType::Default => sys::OIDNDeviceType::Default,
            OidnDeviceType::Cpu => sys::OIDNDeviceType::CPU,
            OidnDeviceType::Sycl => sys::OIDNDeviceType::SYCL,
            OidnDeviceType::Cuda => sys::OIDNDeviceType::CUDA,
            OidnDeviceType::Hip => sys::OIDNDeviceType::HIP,
            OidnDeviceType::Metal => sys::OIDNDeviceType::Metal,
        }
    }
}
