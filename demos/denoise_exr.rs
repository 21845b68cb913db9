//! Denoise a noisy path-traced EXR using its albedo and normal passes.
//!
//! Run with: cargo run --example denoise_exr --features oidn -- \
//!     noisy.exr albedo.exr normal.exr denoised.exr
//! Requires OIDN to be built and OIDN_DIR set (or pkg-config).

use std::env;

use oidn_exr::{denoise_with_aux, load_rgb, save_rgb, DenoiseOptions, OidnDevice};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let noisy_path = args.next().unwrap_or_else(|| "data/noisy_10spp.exr".into());
    let albedo_path = args.next().unwrap_or_else(|| "data/albedo_10spp.exr".into());
    let normal_path = args.next().unwrap_or_else(|| "data/normal_10spp.exr".into());
    let output_path = args.next().unwrap_or_else(|| "denoised.exr".into());

    let color = load_rgb(&noisy_path)?;
    let albedo = load_rgb(&albedo_path)?;
    let normal = load_rgb(&normal_path)?;

    let device = OidnDevice::new()?;
    let denoised = denoise_with_aux(
        &device,
        &color,
        Some(&albedo),
        Some(&normal),
        &DenoiseOptions::default(), // beauty pass is HDR
    )?;

    if let Some(e) = device.take_error() {
        return Err(e.into());
    }
    save_rgb(&output_path, &denoised)?;

    println!(
        "Denoised {}x{} image written to {}.",
        denoised.width(),
        denoised.height(),
        output_path
    );
    Ok(())
}
