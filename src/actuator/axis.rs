//! ClearPath aiming axis in incremental-distance mode.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::AxisConfig;
use crate::error::{ActuatorError, Result};

use super::driver::{Actuator, AxisCommand};
use super::feedback::{wait_for_settle, HlfbLatch, HLFB_POLL_MS};
use super::state::{ActuatorId, ActuatorState, Reading};

/// Pitch or yaw motor.
///
/// Input A selects the direction of the next increment. Each increment is
/// triggered by dropping the enable line for `trigger_ms` and raising it again.
/// HLFB drops while an increment is under way and rises when the last one
/// has been reached. It is sampled throughout the trigger pulses so a short
/// move that finishes before the confirmation wait is still seen.
pub struct ClearPathAxis<EN, DIR, HLFB, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    HLFB: InputPin,
    D: DelayNs,
{
    id: ActuatorId,
    enable: EN,
    direction: DIR,
    hlfb: HLFB,
    delay: D,
    config: AxisConfig,
    energized: bool,
    /// Signed pulses commanded since energize.
    position: i64,
    latch: HlfbLatch,
}

impl<EN, DIR, HLFB, D> ClearPathAxis<EN, DIR, HLFB, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    HLFB: InputPin,
    D: DelayNs,
{
    /// Create a de-energized axis. No pins are touched until `energize`.
    pub fn new(
        id: ActuatorId,
        enable: EN,
        direction: DIR,
        hlfb: HLFB,
        delay: D,
        config: &AxisConfig,
    ) -> Self {
        Self {
            id,
            enable,
            direction,
            hlfb,
            delay,
            config: config.clone(),
            energized: false,
            position: 0,
            latch: HlfbLatch::default(),
        }
    }

    /// Pulses commanded since energize.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    fn set_direction(&mut self, increase: bool) -> Result<()> {
        let high = increase != self.config.invert_direction;
        let res = if high {
            self.direction.set_high()
        } else {
            self.direction.set_low()
        };
        res.map_err(|_| ActuatorError::PinError(self.id))?;
        Ok(())
    }

    fn trigger(&mut self) -> Result<()> {
        let id = self.id;
        self.latch.arm();
        self.enable
            .set_low()
            .map_err(|_| ActuatorError::PinError(id))?;
        self.hold(self.config.trigger_ms)?;
        self.enable
            .set_high()
            .map_err(|_| ActuatorError::PinError(id))?;
        self.hold(self.config.pulse_interval_ms)
    }

    /// Delay for `ms`, sampling HLFB every poll interval.
    fn hold(&mut self, ms: u32) -> Result<()> {
        let mut remaining = ms;
        while remaining > 0 {
            let step = HLFB_POLL_MS.min(remaining);
            self.delay.delay_ms(step);
            remaining -= step;
            self.latch
                .sample(&mut self.hlfb)
                .map_err(|_| ActuatorError::PinError(self.id))?;
        }
        Ok(())
    }
}

impl<EN, DIR, HLFB, D> Actuator for ClearPathAxis<EN, DIR, HLFB, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    HLFB: InputPin,
    D: DelayNs,
{
    type Command = AxisCommand;

    fn id(&self) -> ActuatorId {
        self.id
    }

    fn energize(&mut self) -> Result<()> {
        self.enable
            .set_high()
            .map_err(|_| ActuatorError::PinError(self.id))?;
        self.energized = true;
        self.position = 0;
        self.latch.arm();
        Ok(())
    }

    fn de_energize_and_home(&mut self) -> Result<()> {
        if self.energized && self.position != 0 {
            let count = u32::try_from(self.position.unsigned_abs()).unwrap_or(u32::MAX);
            let back = if self.position > 0 {
                AxisCommand::Decrease(count)
            } else {
                AxisCommand::Increase(count)
            };
            log::debug!("{} homing by {:?}", self.id, back);
            self.command(back)?;
        }

        let id = self.id;
        self.enable
            .set_low()
            .map_err(|_| ActuatorError::PinError(id))?;
        self.direction
            .set_low()
            .map_err(|_| ActuatorError::PinError(id))?;
        self.energized = false;
        self.position = 0;
        Ok(())
    }

    fn command(&mut self, command: AxisCommand) -> Result<()> {
        if !self.energized {
            return Err(ActuatorError::NotEnergized(self.id).into());
        }

        let (increase, count) = match command {
            AxisCommand::Increase(n) => (true, n),
            AxisCommand::Decrease(n) => (false, n),
        };
        if count == 0 {
            return Ok(());
        }

        self.set_direction(increase)?;
        let step = if increase { 1 } else { -1 };
        for _ in 0..count {
            self.trigger()?;
            self.position += step;
        }
        Ok(())
    }

    fn query_state(&self) -> ActuatorState {
        ActuatorState {
            energized: self.energized,
            reading: Reading::Position(self.position),
        }
    }

    fn wait_for_confirmation(&mut self, timeout_ms: u32) -> Result<bool> {
        let id = self.id;
        let confirmed =
            wait_for_settle(&mut self.hlfb, &mut self.latch, &mut self.delay, timeout_ms)
                .map_err(|_| ActuatorError::PinError(id))?;
        Ok(confirmed)
    }
}
