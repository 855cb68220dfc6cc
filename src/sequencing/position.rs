//! Axis position tracking across shots.
//!
//! Each aiming axis remembers its offset from mechanical center in whole
//! pulses. Moves between shots are relative: only the angle delta between the
//! previous and the next target zone is commanded.
//!
//! The offset is updated from the commanded pulse count before the driver
//! runs. A failed driver call is not rolled back, so the offset reflects what
//! was asked for, not what the motor confirmed.

use crate::actuator::{Actuator, ActuatorId, AxisCommand};
use crate::config::{AxisConfig, Degrees, Pulses};
use crate::error::Result;

/// Accumulated offset of one axis from center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisState {
    /// Signed pulses from center. Zero is mechanical center.
    pub accumulated_offset: Pulses,
}

/// Outcome of one relative move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMove {
    /// Command issued, if any pulses were needed.
    pub command: Option<AxisCommand>,
    /// Whether HLFB confirmed the move in time.
    pub confirmed: bool,
}

impl AxisMove {
    /// No motion was needed.
    pub const NONE: Self = Self {
        command: None,
        confirmed: true,
    };
}

/// Tracks one aiming axis and issues minimal relative moves.
#[derive(Debug, Clone)]
pub struct AxisTracker {
    id: ActuatorId,
    degrees_per_pulse: f32,
    confirm_timeout_ms: u32,
    state: AxisState,
}

impl AxisTracker {
    /// Create a tracker at center.
    pub fn new(id: ActuatorId, config: &AxisConfig) -> Self {
        Self {
            id,
            degrees_per_pulse: config.degrees_per_pulse,
            confirm_timeout_ms: config.confirm_timeout_ms,
            state: AxisState::default(),
        }
    }

    /// Current offset from center.
    #[inline]
    pub fn offset(&self) -> Pulses {
        self.state.accumulated_offset
    }

    /// Current axis state.
    #[inline]
    pub fn state(&self) -> AxisState {
        self.state
    }

    /// Forget the offset (new session, axis freshly energized at center).
    #[inline]
    pub fn zero(&mut self) {
        self.state = AxisState::default();
    }

    /// Command needed to go from `previous` to `target`, or `None`.
    ///
    /// The pulse count is `trunc(|delta| / degrees_per_pulse)`.
    pub fn plan(&self, previous: Degrees, target: Degrees) -> Option<AxisCommand> {
        let delta = target - previous;
        let pulses = Pulses::from_degrees(delta.abs(), self.degrees_per_pulse).abs();
        let pulses = u32::try_from(pulses).unwrap_or(u32::MAX);
        if pulses == 0 {
            return None;
        }
        if delta.0 < 0.0 {
            Some(AxisCommand::Decrease(pulses))
        } else {
            Some(AxisCommand::Increase(pulses))
        }
    }

    /// Move the axis from `previous` to `target`.
    ///
    /// A confirmation timeout is logged and reported in the result, not
    /// returned as an error.
    pub fn move_to<A>(&mut self, driver: &mut A, previous: Degrees, target: Degrees) -> Result<AxisMove>
    where
        A: Actuator<Command = AxisCommand>,
    {
        let Some(command) = self.plan(previous, target) else {
            log::debug!("{}: already at {:?}", self.id, target);
            return Ok(AxisMove::NONE);
        };

        self.apply(command);
        log::debug!("{}: {:?} (offset {})", self.id, command, self.offset().0);
        driver.command(command)?;

        let confirmed = driver.wait_for_confirmation(self.confirm_timeout_ms)?;
        if !confirmed {
            log::warn!("{}: move not confirmed within {} ms", self.id, self.confirm_timeout_ms);
        }
        Ok(AxisMove {
            command: Some(command),
            confirmed,
        })
    }

    /// Return the axis to center with one corrective move.
    ///
    /// The offset is zero afterwards regardless of the driver outcome.
    pub fn reset<A>(&mut self, driver: &mut A) -> Result<()>
    where
        A: Actuator<Command = AxisCommand>,
    {
        let offset = self.offset().0;
        self.zero();
        if offset == 0 {
            return Ok(());
        }

        let pulses = u32::try_from(offset.unsigned_abs()).unwrap_or(u32::MAX);
        let command = if offset > 0 {
            AxisCommand::Decrease(pulses)
        } else {
            AxisCommand::Increase(pulses)
        };
        log::debug!("{}: homing with {:?}", self.id, command);
        driver.command(command)?;

        if !driver.wait_for_confirmation(self.confirm_timeout_ms)? {
            log::warn!("{}: homing not confirmed within {} ms", self.id, self.confirm_timeout_ms);
        }
        Ok(())
    }

    fn apply(&mut self, command: AxisCommand) {
        let offset = self.state.accumulated_offset + Pulses(command.signed_pulses());
        self.state.accumulated_offset = offset;
    }
}
