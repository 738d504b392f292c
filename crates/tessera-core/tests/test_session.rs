mod common;

use common::*;
use tessera_core::config::ViewerConfig;
use tessera_core::error::TesseraError;
use tessera_core::input::NavKey;
use tessera_core::session::ViewerSession;
use tessera_core::source::PyramidSource;
use tessera_core::viewport::RegionRequest;

fn small_config() -> ViewerConfig {
    let mut cfg = ViewerConfig::default();
    cfg.viewport.width = 200;
    cfg.viewport.height = 150;
    cfg.pyramid.min_level_dimension = 128;
    cfg
}

#[test]
fn test_open_returns_coarsest_initial_request() {
    let (_dir, path) = write_pattern_png(1024, 768);
    let (session, initial) = ViewerSession::on_open(&path, &small_config()).unwrap();

    let levels = session.source().geometry().level_count();
    assert_eq!(levels, 4);
    assert_eq!(initial.level, levels - 1);
    assert_eq!((initial.origin_x, initial.origin_y), (0, 0));
    assert_eq!((initial.width, initial.height), (200, 150));
    assert_eq!(initial, session.navigator().current_request());
}

#[test]
fn test_open_invalid_config_fails() {
    let (_dir, path) = write_pattern_png(64, 64);
    let mut cfg = small_config();
    cfg.navigation.base_step = 0;
    let err = ViewerSession::on_open(&path, &cfg).err().unwrap();
    assert!(matches!(err, TesseraError::InvalidConfig(_)));
}

#[test]
fn test_navigate_and_decode() {
    let (_dir, path) = write_pattern_png(1024, 768);
    let (mut session, initial) = ViewerSession::on_open(&path, &small_config()).unwrap();

    let first = session.decode(&initial).unwrap();
    assert_eq!((first.width, first.height), (200, 150));

    let zoomed = session.on_wheel(1.0, 0.0, 0.0).unwrap();
    assert_eq!(zoomed.level, initial.level - 1);

    let panned = session.on_key(NavKey::Right).unwrap();
    assert!(panned.origin_x > zoomed.origin_x);

    let dragged = session.on_drag_delta(-1.0, 0.0).unwrap();
    assert!(dragged.origin_x < panned.origin_x);

    let resized = session.on_resize(300, 200).unwrap();
    let buf = session.decode(&resized).unwrap();
    assert_eq!((buf.width, buf.height), (300, 200));
}

#[test]
fn test_decode_failure_leaves_state_unchanged() {
    let (_dir, path) = write_pattern_png(512, 512);
    let (session, initial) = ViewerSession::on_open(&path, &small_config()).unwrap();

    let bogus = RegionRequest {
        level: 40,
        ..initial
    };
    assert!(session.decode(&bogus).is_err());
    assert_eq!(session.navigator().current_request(), initial);
    assert!(session.decode(&initial).is_ok());
}
