mod common;

use approx::assert_relative_eq;
use common::*;
use tessera_core::config::PyramidBuildConfig;
use tessera_core::error::TesseraError;
use tessera_core::geometry::LevelDimensions;
use tessera_core::source::image_pyramid::ImagePyramid;
use tessera_core::source::PyramidSource;
use tessera_core::viewport::RegionRequest;

fn build_config(min_level_dimension: u32) -> PyramidBuildConfig {
    PyramidBuildConfig {
        min_level_dimension,
        ..PyramidBuildConfig::default()
    }
}

fn request(origin_x: i64, origin_y: i64, level: usize, width: u32, height: u32) -> RegionRequest {
    RegionRequest {
        id: 1,
        origin_x,
        origin_y,
        level,
        width,
        height,
    }
}

#[test]
fn test_levels_halve_until_minimum() {
    let p = ImagePyramid::from_image(pattern_image(1000, 600), &build_config(128)).unwrap();
    let g = p.geometry();
    assert_eq!(
        g.level_dimensions(),
        &[
            LevelDimensions::new(1000, 600),
            LevelDimensions::new(500, 300),
            LevelDimensions::new(250, 150),
        ]
    );
    assert_eq!(g.level_downsamples(), &[1.0, 2.0, 4.0]);
}

#[test]
fn test_odd_dimensions_round_up() {
    let p = ImagePyramid::from_image(pattern_image(1001, 601), &build_config(256)).unwrap();
    let g = p.geometry();
    assert_eq!(g.dimensions(1), LevelDimensions::new(501, 301));
    let expected = (1001.0 / 501.0 + 601.0 / 301.0) / 2.0;
    assert_relative_eq!(g.downsample(1), expected);
}

#[test]
fn test_max_levels_caps_pyramid() {
    let cfg = PyramidBuildConfig {
        min_level_dimension: 1,
        max_levels: 2,
        ..PyramidBuildConfig::default()
    };
    let p = ImagePyramid::from_image(pattern_image(512, 512), &cfg).unwrap();
    assert_eq!(p.geometry().level_count(), 2);
}

#[test]
fn test_small_image_has_single_level() {
    let p = ImagePyramid::from_image(pattern_image(100, 80), &PyramidBuildConfig::default()).unwrap();
    assert_eq!(p.geometry().level_count(), 1);
}

#[test]
fn test_decode_level_zero_region() {
    let p = ImagePyramid::from_image(pattern_image(1000, 600), &build_config(128)).unwrap();
    let buf = p.decode_region(&request(10, 20, 0, 5, 4)).unwrap();
    assert_eq!((buf.width, buf.height), (5, 4));
    assert_eq!(buf.pixels.len(), 5 * 4 * 4);
    assert_eq!(buf.pixel(0, 0), [10, 20, 7, 255]);
    assert_eq!(buf.pixel(4, 3), [14, 23, 7, 255]);
}

#[test]
fn test_decode_coarser_level_maps_origin() {
    let p = ImagePyramid::from_image(pattern_image(1000, 600), &build_config(128)).unwrap();
    let buf = p.decode_region(&request(20, 40, 1, 3, 3)).unwrap();
    let level = p.level_image(1).unwrap();
    assert_eq!(buf.pixel(0, 0), level.get_pixel(10, 20).0);
    assert_eq!(buf.pixel(2, 1), level.get_pixel(12, 21).0);
}

#[test]
fn test_decode_past_edge_is_transparent() {
    let p = ImagePyramid::from_image(pattern_image(1000, 600), &build_config(128)).unwrap();
    let buf = p.decode_region(&request(998, 598, 0, 4, 4)).unwrap();
    assert_eq!(buf.pixel(1, 1)[3], 255);
    assert_eq!(buf.pixel(2, 0), [0, 0, 0, 0]);
    assert_eq!(buf.pixel(0, 2), [0, 0, 0, 0]);
}

#[test]
fn test_decode_large_region_matches_source() {
    let p = ImagePyramid::from_image(pattern_image(1000, 600), &build_config(128)).unwrap();
    let buf = p.decode_region(&request(100, 50, 0, 400, 300)).unwrap();
    for (x, y) in [(0, 0), (399, 0), (0, 299), (255, 123), (399, 299)] {
        let sx = 100 + x;
        let sy = 50 + y;
        assert_eq!(buf.pixel(x, y), [(sx % 256) as u8, (sy % 256) as u8, 7, 255]);
    }
}

#[test]
fn test_decode_rejects_bad_level() {
    let p = ImagePyramid::from_image(pattern_image(300, 300), &build_config(128)).unwrap();
    let err = p.decode_region(&request(0, 0, 5, 10, 10)).unwrap_err();
    assert!(matches!(err, TesseraError::LevelOutOfRange { level: 5, count: 2 }));
}

#[test]
fn test_decode_rejects_empty_region() {
    let p = ImagePyramid::from_image(pattern_image(300, 300), &build_config(128)).unwrap();
    let err = p.decode_region(&request(0, 0, 0, 0, 10)).unwrap_err();
    assert!(matches!(err, TesseraError::Decode(_)));
}

#[test]
fn test_thumbnail_is_coarsest_level() {
    let p = ImagePyramid::from_image(pattern_image(1000, 600), &build_config(128)).unwrap();
    let thumb = p.thumbnail().unwrap();
    assert_eq!((thumb.width, thumb.height), (250, 150));
    assert_eq!(thumb.pixel(0, 0)[3], 255);
}

#[test]
fn test_open_png_file() {
    let (_dir, path) = write_pattern_png(600, 400);
    let p = ImagePyramid::open(&path, &build_config(128)).unwrap();
    assert_eq!(p.path(), Some(path.as_path()));
    assert_eq!(p.geometry().base_dimensions(), LevelDimensions::new(600, 400));
    assert_eq!(p.geometry().level_count(), 3);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");
    let err = ImagePyramid::open(&path, &PyramidBuildConfig::default()).err().unwrap();
    assert!(matches!(err, TesseraError::ImageOpen { .. }));
}

#[test]
fn test_region_save_png() {
    let p = ImagePyramid::from_image(pattern_image(300, 300), &build_config(128)).unwrap();
    let buf = p.decode_region(&request(5, 5, 0, 16, 8)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("region.png");
    buf.save_png(&out).unwrap();

    let back = image::open(&out).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (16, 8));
    assert_eq!(back.get_pixel(0, 0).0, [5, 5, 7, 255]);
}
