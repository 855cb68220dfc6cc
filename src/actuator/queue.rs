//! ClearPath ball queue in incremental-distance mode.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{ActuatorError, Result};

use super::driver::{Actuator, QueueCommand, TurnDistance};
use super::state::{ActuatorId, ActuatorState, Reading};

/// Ball queue motor.
///
/// Input A selects the programmed distance (low: full turn, high: half turn).
/// A turn is triggered by dropping the enable line for `trigger_ms`. The queue
/// has no HLFB wired, so confirmation is immediate.
pub struct ClearPathQueue<EN, SEL, D>
where
    EN: OutputPin,
    SEL: OutputPin,
    D: DelayNs,
{
    enable: EN,
    select: SEL,
    delay: D,
    trigger_ms: u32,
    energized: bool,
    turns: u32,
}

impl<EN, SEL, D> ClearPathQueue<EN, SEL, D>
where
    EN: OutputPin,
    SEL: OutputPin,
    D: DelayNs,
{
    /// Create a de-energized queue.
    pub fn new(enable: EN, select: SEL, delay: D, trigger_ms: u32) -> Self {
        Self {
            enable,
            select,
            delay,
            trigger_ms,
            energized: false,
            turns: 0,
        }
    }

    /// Turns commanded since energize.
    #[inline]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    fn pin<E>(_: E) -> ActuatorError {
        ActuatorError::PinError(ActuatorId::BallQueue)
    }
}

impl<EN, SEL, D> Actuator for ClearPathQueue<EN, SEL, D>
where
    EN: OutputPin,
    SEL: OutputPin,
    D: DelayNs,
{
    type Command = QueueCommand;

    fn id(&self) -> ActuatorId {
        ActuatorId::BallQueue
    }

    fn energize(&mut self) -> Result<()> {
        self.select.set_low().map_err(Self::pin)?;
        self.enable.set_high().map_err(Self::pin)?;
        self.energized = true;
        self.turns = 0;
        Ok(())
    }

    fn de_energize_and_home(&mut self) -> Result<()> {
        self.enable.set_low().map_err(Self::pin)?;
        self.select.set_low().map_err(Self::pin)?;
        self.energized = false;
        self.turns = 0;
        Ok(())
    }

    fn command(&mut self, command: QueueCommand) -> Result<()> {
        if !self.energized {
            return Err(ActuatorError::NotEnergized(ActuatorId::BallQueue).into());
        }

        let QueueCommand::Turn(distance) = command;
        match distance {
            TurnDistance::Full => self.select.set_low().map_err(Self::pin)?,
            TurnDistance::Half => self.select.set_high().map_err(Self::pin)?,
        }

        self.enable.set_low().map_err(Self::pin)?;
        self.delay.delay_ms(self.trigger_ms);
        self.enable.set_high().map_err(Self::pin)?;
        self.turns += 1;
        Ok(())
    }

    fn query_state(&self) -> ActuatorState {
        ActuatorState {
            energized: self.energized,
            reading: Reading::Turns(self.turns),
        }
    }
}
