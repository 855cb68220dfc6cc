//! Aim module for shot-sequencer.
//!
//! Provides target zones and the zone-to-angle lookup consumed by the session.

mod table;
mod zone;

pub use table::{AimTable, TrajectoryProvider};
pub use zone::{UnknownZone, Zone};
