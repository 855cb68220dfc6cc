//! Rotational axis configuration from TOML.

use serde::Deserialize;

/// Configuration for one aiming axis (yaw or pitch).
///
/// The axis motors run in incremental-distance mode: each enable pulse moves the
/// output by a fixed increment, and Input A selects the direction.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Output rotation per enable pulse, in degrees.
    #[serde(default = "default_degrees_per_pulse")]
    pub degrees_per_pulse: f32,

    /// Swap which Input A level means "increase".
    #[serde(default)]
    pub invert_direction: bool,

    /// How long the enable line is held low to trigger one increment (ms).
    #[serde(default = "default_trigger_ms")]
    pub trigger_ms: u32,

    /// Settle time between consecutive increments (ms).
    #[serde(default = "default_pulse_interval_ms")]
    pub pulse_interval_ms: u32,

    /// Bound on the HLFB "move done" wait after a move (ms).
    #[serde(default = "default_confirm_timeout_ms")]
    pub confirm_timeout_ms: u32,
}

fn default_degrees_per_pulse() -> f32 {
    1.0
}

fn default_trigger_ms() -> u32 {
    20
}

fn default_pulse_interval_ms() -> u32 {
    10
}

fn default_confirm_timeout_ms() -> u32 {
    2000
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            degrees_per_pulse: default_degrees_per_pulse(),
            invert_direction: false,
            trigger_ms: default_trigger_ms(),
            pulse_interval_ms: default_pulse_interval_ms(),
            confirm_timeout_ms: default_confirm_timeout_ms(),
        }
    }
}

/// Both aiming axes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AxesConfig {
    /// Horizontal aim (YM).
    #[serde(default)]
    pub yaw: AxisConfig,

    /// Vertical aim (PM).
    #[serde(default)]
    pub pitch: AxisConfig,
}
