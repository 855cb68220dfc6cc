//! Profile module for shot-sequencer.
//!
//! Drill profiles feed the session its shots; goalie profiles log completed
//! drills. The session only sees the [`SessionRecorder`] trait. The CSV
//! store is available with the `std` feature.

use crate::error::Result;

#[cfg(feature = "std")]
mod store;

#[cfg(feature = "std")]
pub use store::{display_name, ProfileStore};

/// Persists the outcome of a finished session.
pub trait SessionRecorder {
    /// Log that `goalie` completed `drill_name`.
    fn record_completion(&mut self, goalie: &str, drill_name: &str) -> Result<()>;
}

impl<T: SessionRecorder + ?Sized> SessionRecorder for &mut T {
    fn record_completion(&mut self, goalie: &str, drill_name: &str) -> Result<()> {
        (**self).record_completion(goalie, drill_name)
    }
}

/// Recorder that discards every completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecorder;

impl SessionRecorder for NoRecorder {
    fn record_completion(&mut self, _goalie: &str, _drill_name: &str) -> Result<()> {
        Ok(())
    }
}
