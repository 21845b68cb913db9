//! Unit tests. EXR fixtures are written to a temp directory with the `exr`
//! crate; the OIDN tests at the bottom require the `oidn` feature and a
//! linked OpenImageDenoise.

use std::path::Path;

use exr::prelude::*;

use crate::{load_rgb, save_rgb, Error, RgbImage};

/// Writes a single-layer EXR with the given named channels, sized and
/// positioned like a data window at `position`.
fn write_channels(
    path: &Path,
    size: (usize, usize),
    position: (i32, i32),
    channels: Vec<(&str, FlatSamples)>,
) {
    let list: Vec<AnyChannel<FlatSamples>> = channels
        .into_iter()
        .map(|(name, samples)| AnyChannel::new(name, samples))
        .collect();
    let mut attributes = LayerAttributes::default();
    attributes.layer_position = Vec2(position.0, position.1);
    let layer = Layer::new(
        Vec2(size.0, size.1),
        attributes,
        Encoding::FAST_LOSSLESS,
        AnyChannels::sort(list.into()),
    );
    Image::from_layer(layer)
        .write()
        .to_file(path)
        .expect("write test exr");
}

#[test]
fn new_image_is_zero_filled() {
    let image = RgbImage::new(5, 3).expect("image creation");
    assert_eq!(image.width(), 5);
    assert_eq!(image.height(), 3);
    assert_eq!(image.data().len(), 5 * 3 * 3);
    assert!(image.data().iter().all(|&v| v == 0.0));
}

#[test]
fn new_image_rejects_zero_dimensions() {
    assert!(matches!(RgbImage::new(0, 3), Err(Error::InvalidDimensions)));
    assert!(matches!(RgbImage::new(3, 0), Err(Error::InvalidDimensions)));
}

#[test]
fn set_pixel_roundtrips_without_touching_neighbors() {
    let mut image = RgbImage::new(4, 4).expect("image creation");
    image.set_pixel(2, 1, 0.1, 0.2, 0.3).expect("set_pixel");
    assert_eq!(image.pixel(2, 1).expect("pixel"), [0.1, 0.2, 0.3]);

    for y in 0..4 {
        for x in 0..4 {
            if (x, y) != (2, 1) {
                assert_eq!(image.pixel(x, y).expect("pixel"), [0.0; 3]);
            }
        }
    }
}

#[test]
fn interleaved_layout_matches_contract() {
    let mut image = RgbImage::new(3, 2).expect("image creation");
    image.set_pixel(1, 1, 7.0, 8.0, 9.0).expect("set_pixel");
    let i = (1 * 3 + 1) * 3;
    assert_eq!(&image.data()[i..i + 3], &[7.0, 8.0, 9.0]);
}

#[test]
fn set_pixel_out_of_bounds_is_an_error() {
    let mut image = RgbImage::new(4, 4).expect("image creation");
    let err = image.set_pixel(4, 0, 1.0, 1.0, 1.0).expect_err("x == width");
    assert!(matches!(err, Error::OutOfBounds { x: 4, y: 0, .. }));
    assert!(image.set_pixel(0, 4, 1.0, 1.0, 1.0).is_err());
    assert!(image.data().iter().all(|&v| v == 0.0));
}

#[test]
fn loads_2x2_scenario_with_exact_interleaving() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scenario.exr");
    write_channels(
        &path,
        (2, 2),
        (0, 0),
        vec![
            ("R", FlatSamples::F32(vec![1.0, 2.0, 3.0, 4.0])),
            ("G", FlatSamples::F32(vec![0.0, 0.0, 0.0, 0.0])),
            ("B", FlatSamples::F32(vec![5.0, 6.0, 7.0, 8.0])),
        ],
    );

    let image = load_rgb(&path).expect("load");
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.pixel(0, 0).expect("pixel"), [1.0, 0.0, 5.0]);
    assert_eq!(image.pixel(1, 0).expect("pixel"), [2.0, 0.0, 6.0]);
    assert_eq!(image.pixel(0, 1).expect("pixel"), [3.0, 0.0, 7.0]);
    assert_eq!(image.pixel(1, 1).expect("pixel"), [4.0, 0.0, 8.0]);
}

#[test]
fn save_then_load_roundtrips_exactly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gradient.exr");

    let mut original = RgbImage::new(16, 9).expect("image creation");
    for y in 0..9 {
        for x in 0..16 {
            original
                .set_pixel(x, y, x as f32, y as f32, (x * y) as f32 + 0.5)
                .expect("set_pixel");
        }
    }
    save_rgb(&path, &original).expect("save");

    let loaded = load_rgb(&path).expect("load");
    assert_eq!(loaded, original);
}

#[test]
fn offset_data_window_loads_zero_based() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("offset.exr");
    let values: Vec<f32> = (0..100).map(|i| i as f32).collect();
    write_channels(
        &path,
        (10, 10),
        (5, 5),
        vec![
            ("R", FlatSamples::F32(values.clone())),
            ("G", FlatSamples::F32(values.clone())),
            ("B", FlatSamples::F32(values)),
        ],
    );

    let image = load_rgb(&path).expect("load");
    assert_eq!(image.width(), 10);
    assert_eq!(image.height(), 10);
    // Output pixel (0, 0) is the sample at absolute file coordinate (5, 5).
    assert_eq!(image.pixel(0, 0).expect("pixel"), [0.0; 3]);
    assert_eq!(image.pixel(9, 0).expect("pixel"), [9.0; 3]);
    assert_eq!(image.pixel(0, 9).expect("pixel"), [90.0; 3]);
}

#[test]
fn missing_green_channel_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no_green.exr");
    write_channels(
        &path,
        (2, 2),
        (0, 0),
        vec![
            ("R", FlatSamples::F32(vec![1.0; 4])),
            ("B", FlatSamples::F32(vec![1.0; 4])),
        ],
    );

    let err = load_rgb(&path).expect_err("G is missing");
    assert!(matches!(err, Error::MissingChannel { channel: "G", .. }));
}

#[test]
fn integer_channel_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("integer_green.exr");
    write_channels(
        &path,
        (2, 2),
        (0, 0),
        vec![
            ("R", FlatSamples::F32(vec![1.0; 4])),
            ("G", FlatSamples::U32(vec![1; 4])),
            ("B", FlatSamples::F32(vec![1.0; 4])),
        ],
    );

    let err = load_rgb(&path).expect_err("G is u32");
    assert!(matches!(err, Error::UnsupportedSampleType { channel: "G", .. }));
}

#[test]
fn half_float_channels_are_widened() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("half.exr");
    let halves: Vec<half::f16> = [0.25, 0.5, 1.0, 2.0]
        .into_iter()
        .map(half::f16::from_f32)
        .collect();
    write_channels(
        &path,
        (2, 2),
        (0, 0),
        vec![
            ("R", FlatSamples::F16(halves.clone())),
            ("G", FlatSamples::F16(halves.clone())),
            ("B", FlatSamples::F16(halves)),
        ],
    );

    let image = load_rgb(&path).expect("load");
    assert_eq!(image.pixel(0, 0).expect("pixel"), [0.25; 3]);
    assert_eq!(image.pixel(1, 1).expect("pixel"), [2.0; 3]);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_rgb(dir.path().join("nope.exr")).expect_err("no such file");
    assert!(matches!(err, Error::Load { .. }));
}

#[test]
fn truncated_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("whole.exr");
    write_channels(
        &path,
        (8, 8),
        (0, 0),
        vec![
            ("R", FlatSamples::F32(vec![1.0; 64])),
            ("G", FlatSamples::F32(vec![1.0; 64])),
            ("B", FlatSamples::F32(vec![1.0; 64])),
        ],
    );

    let bytes = std::fs::read(&path).expect("read fixture");
    let truncated = dir.path().join("truncated.exr");
    std::fs::write(&truncated, &bytes[..bytes.len() / 2]).expect("write fixture");

    let err = load_rgb(&truncated).expect_err("half a file");
    assert!(matches!(err, Error::Load { .. }));
}

#[test]
fn repeated_loads_do_not_share_storage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("twice.exr");
    write_channels(
        &path,
        (3, 3),
        (0, 0),
        vec![
            ("R", FlatSamples::F32((0..9).map(|i| i as f32).collect())),
            ("G", FlatSamples::F32(vec![0.5; 9])),
            ("B", FlatSamples::F32(vec![0.125; 9])),
        ],
    );

    let first = load_rgb(&path).expect("first load");
    let mut second = load_rgb(&path).expect("second load");
    assert_eq!(first, second);

    second.set_pixel(0, 0, -1.0, -1.0, -1.0).expect("set_pixel");
    assert_eq!(first.pixel(0, 0).expect("pixel"), [0.0, 0.5, 0.125]);
}

#[cfg(feature = "oidn")]
mod oidn {
    use crate::{denoise_with_aux, DenoiseOptions, Error, OidnDevice, RgbImage, RtFilter};

    #[test]
    fn rt_filter_executes_in_dimensions() {
        let device = OidnDevice::new().expect("OIDN device creation");
        let mut filter = RtFilter::new(&device).expect("RT filter creation");
        let (w, h) = (8usize, 8usize);
        filter.set_dimensions(w as u32, h as u32).set_hdr(true);

        let color = vec![0.5f32; w * h * 3];
        let mut output = vec![0.0f32; w * h * 3];
        filter
            .execute(&color, None, None, &mut output)
            .expect("execute");
        assert!(device.take_error().is_none());
    }

    #[test]
    fn rt_filter_rejects_mismatched_lengths() {
        let device = OidnDevice::new().expect("OIDN device");
        let mut filter = RtFilter::new(&device).expect("RT filter");
        filter.set_dimensions(4, 4);

        let color = vec![0.0f32; 4 * 4 * 3];
        let mut output = vec![0.0f32; 10]; // wrong size
        let err = filter
            .execute(&color, None, None, &mut output)
            .expect_err("should error");
        assert!(matches!(err, Error::InvalidDimensions));
    }

    #[test]
    fn rt_filter_rejects_zero_dimensions() {
        let device = OidnDevice::new().expect("OIDN device");
        let filter = RtFilter::new(&device).expect("RT filter");
        // dimensions left at default 0,0
        let color = vec![0.0f32; 3];
        let mut output = vec![0.0f32; 3];
        let err = filter
            .execute(&color, None, None, &mut output)
            .expect_err("should error");
        assert!(matches!(err, Error::InvalidDimensions));
    }

    #[test]
    fn denoise_rejects_mismatched_aux_dimensions() {
        let device = OidnDevice::new().expect("OIDN device");
        let color = RgbImage::new(8, 8).expect("color");
        let albedo = RgbImage::new(4, 4).expect("albedo");
        let err = denoise_with_aux(
            &device,
            &color,
            Some(&albedo),
            None,
            &DenoiseOptions::default(),
        )
        .expect_err("aux size differs");
        assert!(matches!(err, Error::InvalidDimensions));
    }
}
