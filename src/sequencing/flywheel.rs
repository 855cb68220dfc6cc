//! Flywheel speed control.

use crate::actuator::{Actuator, FlywheelCommand};
use crate::config::{FlywheelConfig, Mph};
use crate::error::Result;

/// Converts exit speed to a duty cycle and drives both flywheels.
#[derive(Debug, Clone)]
pub struct FlywheelController {
    config: FlywheelConfig,
}

impl FlywheelController {
    /// Create a controller from flywheel constants.
    pub fn new(config: &FlywheelConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Duty cycle for `speed`, clamped to `[0, 100]`.
    #[inline]
    pub fn duty_for(&self, speed: Mph) -> u8 {
        self.config.duty_cycle_for(speed)
    }

    /// Send the same duty cycle to top then bottom, then wait for both to
    /// report at speed.
    ///
    /// Returns whether both confirmed within the timeout. Each wheel reports
    /// on its own HLFB, so a wheel that reaches speed while the other is
    /// still being waited on is not missed. Calling again with the same
    /// speed re-sends the same duty cycle and confirms at once.
    pub fn set_speed<T, B>(&self, top: &mut T, bottom: &mut B, speed: Mph) -> Result<bool>
    where
        T: Actuator<Command = FlywheelCommand>,
        B: Actuator<Command = FlywheelCommand>,
    {
        let duty = self.duty_for(speed);
        log::debug!("flywheels: {} mph -> {}% duty", speed.0, duty);

        top.command(FlywheelCommand::DutyCycle(duty))?;
        bottom.command(FlywheelCommand::DutyCycle(duty))?;

        let timeout_ms = self.config.confirm_timeout_ms;
        let top_ok = top.wait_for_confirmation(timeout_ms)?;
        let bottom_ok = bottom.wait_for_confirmation(timeout_ms)?;

        if !top_ok {
            log::warn!("{}: not at speed after {} ms", top.id(), timeout_ms);
        }
        if !bottom_ok {
            log::warn!("{}: not at speed after {} ms", bottom.id(), timeout_ms);
        }
        Ok(top_ok && bottom_ok)
    }
}
