//! Rig configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::aim::AimTableConfig;
use super::axis::AxesConfig;
use super::feed::{FeedConfig, QueueConfig};
use super::flywheel::FlywheelConfig;
use super::order::ActuatorOrder;

/// Session timing and actuator ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Wait after energizing before motion commands are trusted (ms).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u32,

    /// Energize order.
    #[serde(default = "ActuatorOrder::startup")]
    pub startup_order: ActuatorOrder,

    /// De-energize order.
    #[serde(default = "ActuatorOrder::shutdown")]
    pub shutdown_order: ActuatorOrder,
}

fn default_settle_ms() -> u32 {
    2000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            startup_order: ActuatorOrder::startup(),
            shutdown_order: ActuatorOrder::shutdown(),
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RigConfig {
    /// Yaw and pitch axes.
    #[serde(default)]
    pub axes: AxesConfig,

    /// Both flywheels.
    #[serde(default)]
    pub flywheel: FlywheelConfig,

    /// Ball feed.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Ball queue.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Session timing and ordering.
    #[serde(default)]
    pub session: SessionConfig,

    /// Named aim tables, one per standoff distance.
    #[serde(default)]
    pub aim: FnvIndexMap<String<32>, AimTableConfig, 8>,
}

impl RigConfig {
    /// Get an aim table by name.
    pub fn aim_table(&self, name: &str) -> Option<&AimTableConfig> {
        self.aim
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get the aim table for a standoff distance (within 0.01 ft).
    pub fn aim_table_for(&self, standoff_feet: f32) -> Option<&AimTableConfig> {
        self.aim
            .values()
            .find(|t| libm::fabsf(t.standoff_feet - standoff_feet) < 0.01)
    }

    /// List all aim table names.
    pub fn aim_table_names(&self) -> impl Iterator<Item = &str> {
        self.aim.keys().map(|s| s.as_str())
    }
}
