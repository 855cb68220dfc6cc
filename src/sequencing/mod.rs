//! Sequencing module for shot-sequencer.
//!
//! Turns shot commands into ordered actuator commands: relative axis moves,
//! flywheel speed, queue advance and feed strokes, driven by a session state
//! machine.

mod feed;
mod flywheel;
mod position;
mod session;
mod shot;

pub use feed::FeedSequencer;
pub use flywheel::FlywheelController;
pub use position::{AxisMove, AxisState, AxisTracker};
pub use session::{DrillSession, DrillSessionBuilder, SessionReport, SessionState, ShotReport};
pub use shot::{DrillDefinition, ShotCommand, MAX_SHOTS};
