//! ClearPath flywheel in unipolar PWM velocity mode.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{ActuatorError, Result};

use super::driver::{Actuator, FlywheelCommand};
use super::feedback::{wait_for_settle, HlfbLatch};
use super::state::{ActuatorId, ActuatorState, Reading};

/// Top or bottom flywheel motor.
///
/// Speed follows the duty cycle on input B. HLFB is the "at speed" signal;
/// it drops while the wheel changes speed and is latched from the moment a
/// new duty cycle is written.
pub struct ClearPathFlywheel<EN, PWM, HLFB, D>
where
    EN: OutputPin,
    PWM: SetDutyCycle,
    HLFB: InputPin,
    D: DelayNs,
{
    id: ActuatorId,
    enable: EN,
    pwm: PWM,
    hlfb: HLFB,
    delay: D,
    energized: bool,
    duty_percent: u8,
    latch: HlfbLatch,
}

impl<EN, PWM, HLFB, D> ClearPathFlywheel<EN, PWM, HLFB, D>
where
    EN: OutputPin,
    PWM: SetDutyCycle,
    HLFB: InputPin,
    D: DelayNs,
{
    /// Create a de-energized flywheel.
    pub fn new(id: ActuatorId, enable: EN, pwm: PWM, hlfb: HLFB, delay: D) -> Self {
        Self {
            id,
            enable,
            pwm,
            hlfb,
            delay,
            energized: false,
            duty_percent: 0,
            latch: HlfbLatch::default(),
        }
    }

    /// Last commanded duty cycle.
    #[inline]
    pub fn duty_percent(&self) -> u8 {
        self.duty_percent
    }

    fn write_duty(&mut self, percent: u8) -> Result<()> {
        let percent = percent.min(100);
        self.pwm
            .set_duty_cycle_percent(percent)
            .map_err(|_| ActuatorError::PwmError(self.id))?;
        self.duty_percent = percent;
        Ok(())
    }
}

impl<EN, PWM, HLFB, D> Actuator for ClearPathFlywheel<EN, PWM, HLFB, D>
where
    EN: OutputPin,
    PWM: SetDutyCycle,
    HLFB: InputPin,
    D: DelayNs,
{
    type Command = FlywheelCommand;

    fn id(&self) -> ActuatorId {
        self.id
    }

    fn energize(&mut self) -> Result<()> {
        self.write_duty(0)?;
        self.enable
            .set_high()
            .map_err(|_| ActuatorError::PinError(self.id))?;
        self.energized = true;
        self.latch.arm();
        Ok(())
    }

    fn de_energize_and_home(&mut self) -> Result<()> {
        self.write_duty(0)?;
        self.enable
            .set_low()
            .map_err(|_| ActuatorError::PinError(self.id))?;
        self.energized = false;
        self.latch.arm();
        Ok(())
    }

    fn command(&mut self, command: FlywheelCommand) -> Result<()> {
        if !self.energized {
            return Err(ActuatorError::NotEnergized(self.id).into());
        }
        let FlywheelCommand::DutyCycle(percent) = command;
        let unchanged = percent.min(100) == self.duty_percent;
        self.write_duty(percent)?;
        if unchanged {
            // same speed: whatever the wheel already reported still holds
            return Ok(());
        }

        self.latch.arm();
        self.latch
            .sample(&mut self.hlfb)
            .map_err(|_| ActuatorError::PinError(self.id))?;
        Ok(())
    }

    fn query_state(&self) -> ActuatorState {
        ActuatorState {
            energized: self.energized,
            reading: Reading::DutyCycle(self.duty_percent),
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
