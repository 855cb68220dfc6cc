//! ClearPath ball feed in velocity mode.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::FeedConfig;
use crate::error::{ActuatorError, Result};

use super::driver::{Actuator, FeedCommand};
use super::state::{ActuatorId, ActuatorState, FeedPosition, Reading};

/// Ball feed motor.
///
/// Input A selects direction (high: forward). A stroke holds the enable line
/// high for the stroke time and then drops it, so the motor is only energized
/// while it moves. "Energize" for the feed is a short backward pulse that
/// parks the pusher clear of the flywheels.
pub struct ClearPathFeed<EN, DIR, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    D: DelayNs,
{
    enable: EN,
    direction: DIR,
    delay: D,
    stroke_ms: u32,
    retract_ms: u32,
    armed: bool,
    position: FeedPosition,
}

impl<EN, DIR, D> ClearPathFeed<EN, DIR, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    D: DelayNs,
{
    /// Create a disarmed feed.
    pub fn new(enable: EN, direction: DIR, delay: D, config: &FeedConfig) -> Self {
        Self {
            enable,
            direction,
            delay,
            stroke_ms: config.stroke_ms,
            retract_ms: config.retract_ms,
            armed: false,
            position: FeedPosition::Retracted,
        }
    }

    fn pin<E>(_: E) -> ActuatorError {
        ActuatorError::PinError(ActuatorId::BallFeed)
    }

    fn stroke(&mut self, forward: bool, duration_ms: u32) -> Result<()> {
        if forward {
            self.direction.set_high().map_err(Self::pin)?;
        } else {
            self.direction.set_low().map_err(Self::pin)?;
        }
        self.enable.set_high().map_err(Self::pin)?;
        self.delay.delay_ms(duration_ms);
        self.enable.set_low().map_err(Self::pin)?;

        self.position = if forward {
            FeedPosition::Extended
        } else {
            FeedPosition::Retracted
        };
        Ok(())
    }
}

impl<EN, DIR, D> Actuator for ClearPathFeed<EN, DIR, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    D: DelayNs,
{
    type Command = FeedCommand;

    fn id(&self) -> ActuatorId {
        ActuatorId::BallFeed
    }

    fn energize(&mut self) -> Result<()> {
        self.stroke(false, self.retract_ms)?;
        self.armed = true;
        Ok(())
    }

    fn de_energize_and_home(&mut self) -> Result<()> {
        if self.armed && self.position == FeedPosition::Extended {
            self.stroke(false, self.stroke_ms)?;
        }
        self.enable.set_low().map_err(Self::pin)?;
        self.armed = false;
        Ok(())
    }

    fn command(&mut self, command: FeedCommand) -> Result<()> {
        if !self.armed {
            return Err(ActuatorError::NotEnergized(ActuatorId::BallFeed).into());
        }
        match command {
            FeedCommand::Forward => self.stroke(true, self.stroke_ms),
            FeedCommand::Backward => self.stroke(false, self.stroke_ms),
        }
    }

    fn query_state(&self) -> ActuatorState {
        ActuatorState {
            energized: self.armed,
            reading: Reading::Feed(self.position),
        }
    }
}
