//! Aim table lookup: zone to absolute axis angles for one standoff distance.

use heapless::{FnvIndexMap, String};

use crate::config::{AimTableConfig, Degrees, RigConfig, ZoneAngles};
use crate::error::{truncated, ActuatorError, Error, Result};

use super::Zone;

/// Maps a target zone to absolute yaw and pitch angles.
///
/// Implementations are pure: the same zone always yields the same angles for
/// the lifetime of a session.
pub trait TrajectoryProvider {
    /// Absolute angles for `zone`.
    fn angles_for(&self, zone: Zone) -> Result<ZoneAngles>;
}

impl<T: TrajectoryProvider + ?Sized> TrajectoryProvider for &T {
    fn angles_for(&self, zone: Zone) -> Result<ZoneAngles> {
        (**self).angles_for(zone)
    }
}

/// Table of zone angles for a fixed standoff distance.
#[derive(Debug, Clone)]
pub struct AimTable {
    standoff_feet: f32,
    zones: FnvIndexMap<Zone, ZoneAngles, 16>,
}

impl AimTable {
    /// Create an empty table.
    pub fn new(standoff_feet: f32) -> Self {
        Self {
            standoff_feet,
            zones: FnvIndexMap::new(),
        }
    }

    /// Build from a parsed aim table.
    pub fn from_table(table: &AimTableConfig) -> Self {
        Self {
            standoff_feet: table.standoff_feet,
            zones: table.zones.clone(),
        }
    }

    /// Select the table configured for `standoff_feet`.
    ///
    /// # Errors
    ///
    /// Returns `ActuatorError::Unavailable` when no table matches the distance.
    /// A session cannot be created without one.
    pub fn for_distance(config: &RigConfig, standoff_feet: f32) -> Result<Self> {
        match config.aim_table_for(standoff_feet) {
            Some(table) => Ok(Self::from_table(table)),
            None => {
                let mut msg: String<64> = String::new();
                let _ = core::fmt::write(
                    &mut msg,
                    format_args!("no aim table for {} ft", standoff_feet),
                );
                Err(Error::Actuator(ActuatorError::Unavailable(msg)))
            }
        }
    }

    /// Set the angles for a zone.
    pub fn insert(&mut self, zone: Zone, yaw: Degrees, pitch: Degrees) -> &mut Self {
        let _ = self.zones.insert(zone, ZoneAngles::new(yaw, pitch));
        self
    }

    /// Standoff distance this table was built for.
    pub fn standoff_feet(&self) -> f32 {
        self.standoff_feet
    }

    /// Number of zones with angles.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True when no zone has angles.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl TrajectoryProvider for AimTable {
    fn angles_for(&self, zone: Zone) -> Result<ZoneAngles> {
        self.zones.get(&zone).copied().ok_or_else(|| {
            let mut msg: String<64> = truncated("no angles for zone ");
            let _ = msg.push_str(zone.code());
            Error::Actuator(ActuatorError::Unavailable(msg))
        })
    }
}
