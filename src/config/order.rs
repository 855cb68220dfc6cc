//! Actuator energize and de-energize ordering.
//!
//! The rig has physical constraints on the order its motors come up and go
//! down. Those orders live here as data so they can be audited and tested.

use heapless::Vec;
use serde::Deserialize;

use crate::actuator::ActuatorId;
use crate::error::{ConfigError, Result};

/// An ordered list of actuators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ActuatorOrder(Vec<ActuatorId, { ActuatorId::COUNT }>);

impl ActuatorOrder {
    /// Startup order: flywheels, yaw, pitch, then the queue, then the feed
    /// (which is only retracted, never energized into motion).
    pub const STARTUP: [ActuatorId; ActuatorId::COUNT] = [
        ActuatorId::FlywheelTop,
        ActuatorId::FlywheelBottom,
        ActuatorId::Yaw,
        ActuatorId::Pitch,
        ActuatorId::BallQueue,
        ActuatorId::BallFeed,
    ];

    /// Shutdown order: feed first so it is never left mid-stroke.
    pub const SHUTDOWN: [ActuatorId; ActuatorId::COUNT] = [
        ActuatorId::BallFeed,
        ActuatorId::BallQueue,
        ActuatorId::FlywheelTop,
        ActuatorId::FlywheelBottom,
        ActuatorId::Yaw,
        ActuatorId::Pitch,
    ];

    /// Build an order from a slice. Extra entries beyond six are dropped;
    /// use [`ActuatorOrder::validate`] to catch that.
    pub fn from_slice(ids: &[ActuatorId]) -> Self {
        let mut list = Vec::new();
        for id in ids.iter().take(ActuatorId::COUNT) {
            let _ = list.push(*id);
        }
        Self(list)
    }

    /// Default startup order.
    pub fn startup() -> Self {
        Self::from_slice(&Self::STARTUP)
    }

    /// Default shutdown order.
    pub fn shutdown() -> Self {
        Self::from_slice(&Self::SHUTDOWN)
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl Iterator<Item = ActuatorId> + '_ {
        self.0.iter().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every actuator appears exactly once.
    pub fn validate(&self, list: &'static str) -> Result<()> {
        for (i, id) in self.0.iter().enumerate() {
            if self.0[..i].contains(id) {
                return Err(ConfigError::DuplicateInOrder { list, actuator: *id }.into());
            }
        }
        for id in ActuatorId::ALL {
            if !self.0.contains(&id) {
                return Err(ConfigError::IncompleteOrder { list, missing: id }.into());
            }
        }
        Ok(())
    }
}
