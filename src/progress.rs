//! Progress reporting sink, invoked once per closed batch during a build.
//!
//! Grounded on `progress.py`'s `Progress`/`VoidProgress`: a capability with
//! `start`/`report(fraction)`/`done`, which only forwards to its sink when
//! the integer percentage actually changes, so callers are never spammed
//! with repeated identical values.

/// A progress sink. The default, [`Progress::void`], discards everything.
pub struct Progress {
    percentage: Option<u32>,
    handler: Box<dyn FnMut(u32)>,
}

impl Progress {
    /// Build a sink around `handler`, called with the new integer
    /// percentage (`0..=100`) whenever it changes.
    pub fn new<F>(handler: F) -> Progress
    where
        F: FnMut(u32) + 'static,
    {
        Progress { percentage: None, handler: Box::new(handler) }
    }

    /// A sink that discards all reports.
    pub fn void() -> Progress {
        Progress::new(|_| {})
    }

    /// Report `0%`, unconditionally on first call.
    pub fn report_start(&mut self) {
        self.emit(0);
    }

    /// Report progress as a fraction in `[0, 1]`; converted to an integer
    /// percentage and forwarded only if it differs from the last report.
    pub fn report(&mut self, fraction: f64) {
        self.emit((100.0 * fraction) as u32);
    }

    /// Report `100%`, unconditionally on the final call.
    pub fn report_done(&mut self) {
        self.emit(100);
    }

    fn emit(&mut self, percentage: u32) {
        if self.percentage != Some(percentage) {
            self.percentage = Some(percentage);
            (self.handler)(percentage);
        }
    }
}

impl Default for Progress {
    fn default() -> Progress {
        Progress::void()
    }
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;
