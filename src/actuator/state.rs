//! Actuator identities and reported state.

use core::fmt;

use serde::Deserialize;

/// The six actuators on the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorId {
    /// FTM
    FlywheelTop,
    /// FMB
    FlywheelBottom,
    /// YM
    Yaw,
    /// PM
    Pitch,
    /// BQM
    BallQueue,
    /// BFM
    BallFeed,
}

impl ActuatorId {
    /// Number of actuators on the rig.
    pub const COUNT: usize = 6;

    /// Every actuator.
    pub const ALL: [ActuatorId; Self::COUNT] = [
        ActuatorId::FlywheelTop,
        ActuatorId::FlywheelBottom,
        ActuatorId::Yaw,
        ActuatorId::Pitch,
        ActuatorId::BallQueue,
        ActuatorId::BallFeed,
    ];

    /// Short hardware label.
    pub const fn label(self) -> &'static str {
        match self {
            ActuatorId::FlywheelTop => "FTM",
            ActuatorId::FlywheelBottom => "FMB",
            ActuatorId::Yaw => "YM",
            ActuatorId::Pitch => "PM",
            ActuatorId::BallQueue => "BQM",
            ActuatorId::BallFeed => "BFM",
        }
    }
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the feed pusher sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedPosition {
    /// Pulled back, clear of the flywheels.
    #[default]
    Retracted,
    /// Pushed forward into the flywheels.
    Extended,
}

/// Kind-specific reading reported alongside the energized flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reading {
    /// Nothing to report.
    #[default]
    None,
    /// Signed pulses commanded since energize.
    Position(i64),
    /// Last commanded duty cycle percent.
    DutyCycle(u8),
    /// Queue turns commanded since energize.
    Turns(u32),
    /// Feed pusher position.
    Feed(FeedPosition),
}

/// Snapshot returned by `Actuator::query_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    /// Whether the enable line is asserted (or the feed is armed).
    pub energized: bool,
    /// Position or speed, depending on the actuator kind.
    pub reading: Reading,
}

impl ActuatorState {
    /// De-energized with no reading.
    pub const OFF: Self = Self {
        energized: false,
        reading: Reading::None,
    };
}
