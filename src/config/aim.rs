//! Aim table configuration from TOML.

use heapless::FnvIndexMap;
use serde::Deserialize;

use super::units::Degrees;
use crate::aim::Zone;

/// Absolute yaw/pitch for one zone.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ZoneAngles {
    /// Horizontal angle from center (positive = right).
    #[serde(rename = "yaw_degrees")]
    pub yaw: Degrees,

    /// Vertical angle from center (positive = up).
    #[serde(rename = "pitch_degrees")]
    pub pitch: Degrees,
}

impl ZoneAngles {
    /// Create a new angle pair.
    pub const fn new(yaw: Degrees, pitch: Degrees) -> Self {
        Self { yaw, pitch }
    }
}

/// Zone angles for one standoff distance.
#[derive(Debug, Clone, Deserialize)]
pub struct AimTableConfig {
    /// Distance from the rig to the target face, in feet.
    pub standoff_feet: f32,

    /// Angles per zone.
    pub zones: FnvIndexMap<Zone, ZoneAngles, 16>,
}

impl AimTableConfig {
    /// Angles for a zone, if present.
    pub fn angles(&self, zone: Zone) -> Option<ZoneAngles> {
        self.zones.get(&zone).copied()
    }

    /// True when all nine zones have angles.
    pub fn is_complete(&self) -> bool {
        Zone::ALL.iter().all(|z| self.zones.contains_key(z))
    }
}
