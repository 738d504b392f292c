#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use tessera_core::config::{NavigationConfig, ZoomAnchor};
use tessera_core::geometry::PyramidGeometry;
use tessera_core::viewport::Viewport;

/// Three-level 4000x3000 pyramid with downsamples 1, 2, 4.
pub fn scenario_geometry() -> PyramidGeometry {
    PyramidGeometry::from_levels(
        &[(4000, 3000), (2000, 1500), (1000, 750)],
        &[1.0, 2.0, 4.0],
    )
    .expect("valid geometry")
}

/// Pyramid with odd sizes and non-integer downsamples, as produced by
/// real slide scanners.
pub fn irregular_geometry() -> PyramidGeometry {
    PyramidGeometry::from_levels(
        &[(40_001, 29_999), (10_000, 7_499), (2_500, 1_874), (625, 468)],
        &[1.0, 4.00007, 16.0019, 64.0143],
    )
    .expect("valid geometry")
}

/// Single level smaller than the default viewport.
pub fn tiny_geometry() -> PyramidGeometry {
    PyramidGeometry::from_levels(&[(500, 400)], &[1.0]).expect("valid geometry")
}

pub fn nav(anchor: ZoomAnchor) -> NavigationConfig {
    NavigationConfig {
        zoom_anchor: anchor,
        ..NavigationConfig::default()
    }
}

/// Scenario geometry at 750x750 with the default navigation settings.
pub fn scenario_viewport() -> Viewport {
    Viewport::new(scenario_geometry(), 750, 750, &NavigationConfig::default())
}

/// Largest legal origin computed independently of the viewport code.
pub fn expected_max_origin(geometry: &PyramidGeometry, level: usize, w: u32, h: u32) -> (i64, i64) {
    let base = geometry.base_dimensions();
    let ds = geometry.downsample(level);
    let bx = (base.width as f64 - w as f64 * ds).floor().max(0.0) as i64;
    let by = (base.height as f64 - h as f64 * ds).floor().max(0.0) as i64;
    (bx, by)
}

/// Assert every viewport invariant for the current state.
pub fn assert_invariants(viewport: &Viewport) {
    let g = viewport.geometry();
    let s = viewport.state();
    assert!(s.level < g.level_count(), "level {} out of range", s.level);
    assert!(s.width > 0 && s.height > 0, "empty viewport {}x{}", s.width, s.height);
    let (max_x, max_y) = expected_max_origin(g, s.level, s.width, s.height);
    assert!(
        (0..=max_x).contains(&s.origin_x),
        "origin_x {} outside [0, {max_x}]",
        s.origin_x
    );
    assert!(
        (0..=max_y).contains(&s.origin_y),
        "origin_y {} outside [0, {max_y}]",
        s.origin_y
    );
    assert_eq!(
        s.step_size,
        (64.0 * g.downsample(s.level)).floor() as i64,
        "step size out of date"
    );
}

/// RGBA test pattern: R = x mod 256, G = y mod 256, B = 7, A = 255.
pub fn pattern_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255]))
}

/// Write the test pattern as a PNG inside a temp dir.
///
/// The file stays alive as long as the returned `TempDir` is not dropped.
pub fn write_pattern_png(width: u32, height: u32) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("pattern.png");
    pattern_image(width, height).save(&path).expect("write png");
    (dir, path)
}
