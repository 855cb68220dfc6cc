//! # shot-sequencer
//!
//! Shot sequencing and multi-axis coordination for a ball-launching rig, with
//! embedded-hal 1.0 drivers.
//!
//! ## Features
//!
//! - **Configuration-driven**: Axis constants, flywheel geometry, actuator
//!   ordering and aim tables come from a TOML file
//! - **embedded-hal 1.0**: ClearPath drivers over `OutputPin`, `InputPin`,
//!   `SetDutyCycle` and `DelayNs`
//! - **no_std compatible**: Sequencing core works without standard library
//! - **Relative aiming**: Axis offsets are tracked in pulses and homed before
//!   every de-energize
//! - **Safe ordering**: Startup and shutdown follow validated actuator orders
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shot_sequencer::{AimTable, DrillSession, Mph, Rig, ShotCommand, Zone};
//!
//! let config = shot_sequencer::load_config("rig.toml")?;
//! let aim = AimTable::for_distance(&config, 12.0)?;
//!
//! let mut session = DrillSession::builder()
//!     .config(&config)
//!     .rig(Rig::new(top, bottom, yaw, pitch, queue, feed))
//!     .aim(aim)
//!     .delay(delay)
//!     .build()?;
//!
//! session.start()?;
//! session.fire_shot(ShotCommand::new(Zone::TopRight, Mph(45.0))?)?;
//! session.stop()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML loading, CSV profile store, session worker thread
//! - `defmt`: Derives `defmt::Format` on public enums for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod actuator;
pub mod aim;
pub mod config;
pub mod error;
pub mod profile;
pub mod sequencing;

#[cfg(feature = "std")]
pub mod worker;

// Re-exports for ergonomic API
pub use actuator::{Actuator, ActuatorId, ActuatorSet, Rig};
pub use aim::{AimTable, TrajectoryProvider, Zone};
pub use config::{validate_config, RigConfig};
pub use error::{Error, Result};
pub use profile::{NoRecorder, SessionRecorder};
pub use sequencing::{DrillDefinition, DrillSession, SessionState, ShotCommand};

// Configuration loading and persistence (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
#[cfg(feature = "std")]
pub use profile::ProfileStore;
#[cfg(feature = "std")]
pub use worker::{SessionEvent, SessionWorker, StopHandle};

// Unit types
pub use config::units::{Degrees, Mph, Pulses, Seconds};
