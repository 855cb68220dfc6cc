//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::{AimTableConfig, AxisConfig, RigConfig};

/// Validate a rig configuration.
///
/// Checks:
/// - Axis increments and timing constants are positive
/// - Flywheel constants are positive
/// - Startup and shutdown orders name every actuator exactly once
/// - Aim tables cover all nine zones and have distinct, positive standoffs
pub fn validate_config(config: &RigConfig) -> Result<()> {
    validate_axis(&config.axes.yaw)?;
    validate_axis(&config.axes.pitch)?;

    if config.flywheel.diameter_inches <= 0.0 {
        return Err(ConfigError::InvalidFlywheelDiameter(config.flywheel.diameter_inches).into());
    }
    if config.flywheel.max_rpm <= 0.0 {
        return Err(ConfigError::InvalidMaxRpm(config.flywheel.max_rpm).into());
    }

    if config.feed.stroke_ms == 0 {
        return Err(ConfigError::ZeroDuration("feed.stroke_ms").into());
    }
    if config.queue.trigger_ms == 0 {
        return Err(ConfigError::ZeroDuration("queue.trigger_ms").into());
    }

    config.session.startup_order.validate("startup_order")?;
    config.session.shutdown_order.validate("shutdown_order")?;

    let tables: heapless::Vec<(&str, &AimTableConfig), 8> = config
        .aim
        .iter()
        .map(|(name, table)| (name.as_str(), table))
        .collect();
    for (i, (name, table)) in tables.iter().enumerate() {
        validate_aim_table(name, table)?;
        let duplicate = tables[..i]
            .iter()
            .any(|(_, other)| libm::fabsf(other.standoff_feet - table.standoff_feet) < 0.01);
        if duplicate {
            return Err(ConfigError::DuplicateStandoff(table.standoff_feet).into());
        }
    }

    Ok(())
}

fn validate_axis(axis: &AxisConfig) -> Result<()> {
    if axis.degrees_per_pulse.is_nan() || axis.degrees_per_pulse <= 0.0 {
        return Err(ConfigError::InvalidDegreesPerPulse(axis.degrees_per_pulse).into());
    }
    if axis.trigger_ms == 0 {
        return Err(ConfigError::ZeroDuration("axes.trigger_ms").into());
    }
    Ok(())
}

fn validate_aim_table(name: &str, table: &AimTableConfig) -> Result<()> {
    if table.standoff_feet.is_nan() || table.standoff_feet <= 0.0 {
        return Err(ConfigError::InvalidStandoff(table.standoff_feet).into());
    }
    if !table.is_complete() {
        return Err(ConfigError::IncompleteAimTable(crate::error::truncated(name)).into());
    }
    Ok(())
}
