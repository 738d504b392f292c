mod common;

use common::scenario_viewport;
use tessera_core::viewport::{RegionRequest, RequestTracker};

fn req(id: u64) -> RegionRequest {
    RegionRequest {
        id,
        origin_x: id as i64 * 10,
        origin_y: 0,
        level: 0,
        width: 100,
        height: 100,
    }
}

#[test]
fn test_idle_tracker_dispatches_immediately() {
    let mut t = RequestTracker::new();
    assert!(!t.is_busy());
    assert_eq!(t.submit(req(1)), Some(req(1)));
    assert!(t.is_busy());
}

#[test]
fn test_completion_applies_latest() {
    let mut t = RequestTracker::new();
    t.submit(req(1));
    let done = t.complete(1);
    assert!(done.apply);
    assert_eq!(done.next, None);
    assert_eq!(t.last_applied(), Some(1));
    assert!(!t.is_busy());
}

#[test]
fn test_requests_during_decode_are_coalesced() {
    let mut t = RequestTracker::new();
    t.submit(req(1));
    assert_eq!(t.submit(req(2)), None);
    assert_eq!(t.submit(req(3)), None);
    assert_eq!(t.pending(), Some(&req(3)));

    let done = t.complete(1);
    assert!(done.apply);
    assert_eq!(done.next, Some(req(3)));
    assert!(t.is_busy());

    let done = t.complete(3);
    assert!(done.apply);
    assert_eq!(done.next, None);
    assert_eq!(t.last_applied(), Some(3));
}

#[test]
fn test_completion_for_unknown_id_is_ignored() {
    let mut t = RequestTracker::new();
    t.submit(req(5));
    let done = t.complete(4);
    assert!(!done.apply);
    assert_eq!(done.next, None);
    assert!(t.is_busy());
}

#[test]
fn test_failure_dispatches_pending() {
    let mut t = RequestTracker::new();
    t.submit(req(1));
    t.submit(req(2));
    assert_eq!(t.fail(1), Some(req(2)));
    assert_eq!(t.fail(99), None);
    assert!(t.complete(2).apply);
    assert_eq!(t.last_applied(), Some(2));
}

#[test]
fn test_reset_discards_in_flight_results() {
    let mut t = RequestTracker::new();
    t.submit(req(7));
    t.reset();
    assert!(!t.is_busy());
    assert!(!t.complete(7).apply);

    assert_eq!(t.submit(req(1)), Some(req(1)));
    assert!(t.complete(1).apply);
}

#[test]
fn test_resize_burst_during_decode_sends_only_final_size() {
    let mut vp = scenario_viewport();
    let mut t = RequestTracker::new();
    let first = vp.resize(800, 780).unwrap();
    assert_eq!(t.submit(first), Some(first));

    for (w, h) in [(820, 790), (900, 800), (640, 480)] {
        let r = vp.resize(w, h).unwrap();
        assert_eq!(t.submit(r), None);
    }

    let done = t.complete(first.id);
    let next = done.next.unwrap();
    assert_eq!((next.width, next.height), (640, 480));
    assert_eq!(next, vp.current_request());
    assert!(t.complete(next.id).apply);
}
