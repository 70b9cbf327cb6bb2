use log::{log_enabled, trace, warn, Level};
use std::time::Instant;

use crate::config::SUBSTEP_WARN_THRESHOLD;

/// Trace-level span around a tick. Logs on entry and on drop with the elapsed
/// time and, when known, how many substeps ran inside it.
pub struct TraceSpan<'a> {
    label: &'a str,
    substeps: Option<u64>,
    start: Instant,
}

impl<'a> TraceSpan<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            trace!("start {label}");
        }
        Self {
            label,
            substeps: None,
            start: Instant::now(),
        }
    }

    pub fn with_substeps(label: &'a str, substeps: u32) -> Self {
        let mut span = Self::new(label);
        span.substeps = Some(substeps as u64);
        span
    }

    /// Records the substep count once it is known, e.g. after a parallel tick.
    pub fn set_substeps(&mut self, substeps: u64) {
        self.substeps = Some(substeps);
    }
}

impl Drop for TraceSpan<'_> {
    fn drop(&mut self) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        let elapsed = self.start.elapsed().as_micros();
        match self.substeps {
            Some(substeps) => trace!("end {} ({substeps} substeps, {elapsed} µs)", self.label),
            None => trace!("end {} ({elapsed} µs)", self.label),
        }
    }
}

/// Warns when a single tick had to catch up on a large backlog of substeps,
/// typically after a hitch or a very long frame.
pub fn warn_if_substep_backlog(substeps: u32, frame_dt: f32) {
    if substeps > SUBSTEP_WARN_THRESHOLD {
        warn!(
            "Cable tick ran {} substeps for a {:.2} ms frame",
            substeps,
            frame_dt * 1000.0
        );
    }
}
