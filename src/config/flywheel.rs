//! Flywheel configuration and derived drive constants.

use core::f32::consts::PI;

use serde::Deserialize;

use super::units::Mph;

/// Inches in one statute mile.
pub const INCHES_PER_MILE: f32 = 63_360.0;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: f32 = 60.0;

/// Flywheel configuration from TOML.
///
/// Both flywheels share these constants; the rig always drives them identically.
#[derive(Debug, Clone, Deserialize)]
pub struct FlywheelConfig {
    /// Wheel diameter in inches.
    #[serde(default = "default_diameter_inches")]
    pub diameter_inches: f32,

    /// Motor speed at 100% duty cycle.
    #[serde(default = "default_max_rpm")]
    pub max_rpm: f32,

    /// Bound on the HLFB "at speed" wait (ms).
    #[serde(default = "default_confirm_timeout_ms")]
    pub confirm_timeout_ms: u32,
}

fn default_diameter_inches() -> f32 {
    16.5
}

fn default_max_rpm() -> f32 {
    3180.0
}

fn default_confirm_timeout_ms() -> u32 {
    2000
}

impl Default for FlywheelConfig {
    fn default() -> Self {
        Self {
            diameter_inches: default_diameter_inches(),
            max_rpm: default_max_rpm(),
            confirm_timeout_ms: default_confirm_timeout_ms(),
        }
    }
}

impl FlywheelConfig {
    /// Wheel circumference in inches.
    #[inline]
    pub fn circumference_inches(&self) -> f32 {
        self.diameter_inches * PI
    }

    /// Wheel RPM that gives the requested surface speed.
    #[inline]
    pub fn rpm_for(&self, speed: Mph) -> f32 {
        speed.0 * INCHES_PER_MILE / (self.circumference_inches() * MINUTES_PER_HOUR)
    }

    /// Duty cycle (whole percent) that gives the requested surface speed.
    ///
    /// Truncated, then clamped to `[0, 100]`. Non-finite input maps to 0.
    pub fn duty_cycle_for(&self, speed: Mph) -> u8 {
        let percent = libm::floorf(self.rpm_for(speed) / self.max_rpm * 100.0);
        if percent.is_nan() || percent <= 0.0 {
            0
        } else if percent >= 100.0 {
            100
        } else {
            percent as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_for_thirty_mph() {
        let config = FlywheelConfig::default();
        // 30 * 63360 / (16.5 * pi * 60) ~= 611.1
        assert!((config.rpm_for(Mph(30.0)) - 611.1).abs() < 0.5);
    }

    #[test]
    fn test_duty_cycle_truncates() {
        let config = FlywheelConfig::default();
        // 611.1 / 3180 = 19.2%
        assert_eq!(config.duty_cycle_for(Mph(30.0)), 19);
    }

    #[test]
    fn test_duty_cycle_clamps() {
        let config = FlywheelConfig::default();
        assert_eq!(config.duty_cycle_for(Mph(0.0)), 0);
        assert_eq!(config.duty_cycle_for(Mph(-10.0)), 0);
        assert_eq!(config.duty_cycle_for(Mph(10_000.0)), 100);
        assert_eq!(config.duty_cycle_for(Mph(f32::NAN)), 0);
        assert_eq!(config.duty_cycle_for(Mph(f32::INFINITY)), 100);
    }
}
