//! Caller-side sequencing of region requests.
//!
//! Only one decode is outstanding at a time. Requests emitted while a decode
//! is in flight are coalesced so that only the newest one is dispatched
//! next, and a finished decode is shown only if it is still the newest
//! request handed to the decoder.

use tracing::debug;

use super::request::RegionRequest;

/// Outcome of a finished decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Whether the decoded pixels should replace what is on screen.
    pub apply: bool,
    /// Queued request that should be dispatched now, if any.
    pub next: Option<RegionRequest>,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    in_flight: Option<u64>,
    pending: Option<RegionRequest>,
    latest_dispatched: Option<u64>,
    last_applied: Option<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a freshly emitted request.
    ///
    /// Returns the request when it should be dispatched immediately, or
    /// `None` when a decode is already running and the request was queued
    /// in place of any older queued one.
    pub fn submit(&mut self, request: RegionRequest) -> Option<RegionRequest> {
        if self.in_flight.is_some() {
            if let Some(old) = self.pending.replace(request) {
                debug!(dropped = old.id, queued = request.id, "Coalesced pending request");
            }
            return None;
        }
        self.dispatch(request);
        Some(request)
    }

    /// Record that the decode for `id` finished successfully.
    pub fn complete(&mut self, id: u64) -> Completion {
        if self.in_flight != Some(id) {
            debug!(id, "Ignoring completion for a request that is not in flight");
            return Completion {
                apply: false,
                next: None,
            };
        }
        self.in_flight = None;

        let apply = self.latest_dispatched == Some(id)
            && self.last_applied.map_or(true, |last| id > last);
        if apply {
            self.last_applied = Some(id);
        }

        Completion {
            apply,
            next: self.dispatch_pending(),
        }
    }

    /// Record that the decode for `id` failed. Returns the queued request
    /// to dispatch next, if any.
    pub fn fail(&mut self, id: u64) -> Option<RegionRequest> {
        if self.in_flight != Some(id) {
            return None;
        }
        self.in_flight = None;
        self.dispatch_pending()
    }

    /// Forget everything, e.g. when a different image is opened.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending(&self) -> Option<&RegionRequest> {
        self.pending.as_ref()
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    fn dispatch(&mut self, request: RegionRequest) {
        self.in_flight = Some(request.id);
        self.latest_dispatched = Some(request.id);
    }

    fn dispatch_pending(&mut self) -> Option<RegionRequest> {
        let next = self.pending.take()?;
        self.dispatch(next);
        Some(next)
    }
}
