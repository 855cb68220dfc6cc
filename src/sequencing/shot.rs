//! Shot commands and drill definitions.

use heapless::{String, Vec};

use crate::aim::Zone;
use crate::config::{Mph, Seconds};
use crate::error::{ProfileError, Result, SessionError};

/// Most shots a single drill may hold.
pub const MAX_SHOTS: usize = 128;

/// One shot: where to aim and how fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotCommand {
    zone: Zone,
    exit_speed: Mph,
}

impl ShotCommand {
    /// Create a shot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidExitSpeed` for zero, negative or
    /// non-finite speeds.
    pub fn new(zone: Zone, exit_speed: Mph) -> Result<Self> {
        if !exit_speed.0.is_finite() || exit_speed.0 <= 0.0 {
            return Err(SessionError::InvalidExitSpeed(exit_speed.0).into());
        }
        Ok(Self { zone, exit_speed })
    }

    /// Target zone.
    #[inline]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Ball exit speed.
    #[inline]
    pub fn exit_speed(&self) -> Mph {
        self.exit_speed
    }
}

/// A named, ordered list of shots fired at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDefinition {
    name: String<64>,
    rate_of_fire: Seconds,
    shots: Vec<ShotCommand, MAX_SHOTS>,
}

impl DrillDefinition {
    /// Create an empty drill.
    pub fn new(name: &str, rate_of_fire: Seconds) -> Result<Self> {
        let name = String::try_from(name).map_err(|_| ProfileError::NameTooLong)?;
        Ok(Self {
            name,
            rate_of_fire,
            shots: Vec::new(),
        })
    }

    /// Build a drill from a slice of shots.
    pub fn from_shots(name: &str, rate_of_fire: Seconds, shots: &[ShotCommand]) -> Result<Self> {
        let mut drill = Self::new(name, rate_of_fire)?;
        for shot in shots {
            drill.push(*shot)?;
        }
        Ok(drill)
    }

    /// Append a shot.
    pub fn push(&mut self, shot: ShotCommand) -> Result<()> {
        self.shots
            .push(shot)
            .map_err(|_| SessionError::TooManyShots)?;
        Ok(())
    }

    /// Drill name as stored on disk (e.g. `left_post_warmup`).
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Seconds between consecutive shots.
    #[inline]
    pub fn rate_of_fire(&self) -> Seconds {
        self.rate_of_fire
    }

    /// Shots in firing order.
    #[inline]
    pub fn shots(&self) -> &[ShotCommand] {
        &self.shots
    }

    /// Number of shots.
    #[inline]
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Whether the drill has no shots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_shot_rejects_bad_speed() {
        assert!(ShotCommand::new(Zone::TopLeft, Mph(30.0)).is_ok());
        for bad in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                ShotCommand::new(Zone::TopLeft, Mph(bad)),
                Err(Error::Session(SessionError::InvalidExitSpeed(_)))
            ));
        }
    }

    #[test]
    fn test_drill_keeps_order() {
        let shots = [
            ShotCommand::new(Zone::TopRight, Mph(40.0)).unwrap(),
            ShotCommand::new(Zone::BottomLeft, Mph(55.0)).unwrap(),
        ];
        let drill = DrillDefinition::from_shots("warmup", Seconds(3.0), &shots).unwrap();
        assert_eq!(drill.len(), 2);
        assert_eq!(drill.shots()[0].zone(), Zone::TopRight);
        assert_eq!(drill.shots()[1].zone(), Zone::BottomLeft);
        assert_eq!(drill.name(), "warmup");
    }

    #[test]
    fn test_drill_capacity() {
        let shot = ShotCommand::new(Zone::CenterMiddle, Mph(30.0)).unwrap();
        let mut drill = DrillDefinition::new("long", Seconds(1.0)).unwrap();
        for _ in 0..MAX_SHOTS {
            drill.push(shot).unwrap();
        }
        assert_eq!(
            drill.push(shot),
            Err(Error::Session(SessionError::TooManyShots))
        );
    }
}
