//! Configuration module for shot-sequencer.
//!
//! Provides types for loading and validating rig configuration from TOML files
//! (with `std` feature) or pre-built data.

mod aim;
mod axis;
mod feed;
mod flywheel;
mod order;
mod rig;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use aim::{AimTableConfig, ZoneAngles};
pub use axis::{AxesConfig, AxisConfig};
pub use feed::{FeedConfig, QueueConfig, QueueRevision};
pub use flywheel::{FlywheelConfig, INCHES_PER_MILE, MINUTES_PER_HOUR};
pub use order::ActuatorOrder;
pub use rig::{RigConfig, SessionConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Mph, Pulses, Seconds};
