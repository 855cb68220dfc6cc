//! Actuator driver interface.
//!
//! Every motor on the rig is driven through [`Actuator`]. The command type is
//! specific to the actuator kind, so a flywheel can never be sent an axis move.

use core::fmt::Debug;

use crate::error::Result;

use super::state::{ActuatorId, ActuatorState};

/// One motor on the rig.
///
/// All calls block until the hardware has been told what to do. Drivers with a
/// known stroke time (feed, queue trigger) block for that time as well.
pub trait Actuator {
    /// Commands this actuator accepts.
    type Command: Copy + Debug;

    /// Which actuator this is.
    fn id(&self) -> ActuatorId;

    /// Assert the enable line.
    fn energize(&mut self) -> Result<()>;

    /// Release the enable line and return driver-side state to home.
    fn de_energize_and_home(&mut self) -> Result<()>;

    /// Issue one command.
    fn command(&mut self, command: Self::Command) -> Result<()>;

    /// Report energized flag and position or speed.
    fn query_state(&self) -> ActuatorState;

    /// Wait up to `timeout_ms` for the motor to report the last command done.
    ///
    /// Returns `Ok(false)` on timeout. Actuators without feedback confirm
    /// immediately.
    fn wait_for_confirmation(&mut self, _timeout_ms: u32) -> Result<bool> {
        Ok(true)
    }
}

/// Aiming axis move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisCommand {
    /// Move toward positive angles (right / up) by this many pulses.
    Increase(u32),
    /// Move toward negative angles (left / down) by this many pulses.
    Decrease(u32),
}

impl AxisCommand {
    /// Signed pulse count this command moves by.
    pub fn signed_pulses(self) -> i64 {
        match self {
            AxisCommand::Increase(n) => i64::from(n),
            AxisCommand::Decrease(n) => -i64::from(n),
        }
    }
}

/// Flywheel speed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlywheelCommand {
    /// Drive the PWM input at this whole-percent duty cycle (0-100).
    DutyCycle(u8),
}

/// How far the queue rotates for one ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnDistance {
    /// Half rotation.
    Half,
    /// Full rotation.
    Full,
}

/// Ball queue command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueCommand {
    /// Rotate to drop one ball.
    Turn(TurnDistance),
}

/// Feed stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedCommand {
    /// Push the ball into the flywheels.
    Forward,
    /// Pull back clear of the flywheels.
    Backward,
}
