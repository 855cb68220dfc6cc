//! Ball feed and ball queue configuration.

use serde::Deserialize;

/// Feed actuator (BFM) configuration.
///
/// The current feed revision runs in velocity mode: a stroke is the enable line
/// held high for a fixed time with Input A selecting direction.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Duration of one stroke in one direction (ms).
    #[serde(default = "default_stroke_ms")]
    pub stroke_ms: u32,

    /// Backward pulse used at startup to seat the feed fully retracted (ms).
    #[serde(default = "default_retract_ms")]
    pub retract_ms: u32,
}

fn default_stroke_ms() -> u32 {
    1100
}

fn default_retract_ms() -> u32 {
    250
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            stroke_ms: default_stroke_ms(),
            retract_ms: default_retract_ms(),
        }
    }
}

impl FeedConfig {
    /// Forward plus backward stroke duration (ms).
    #[inline]
    pub fn fixed_stroke_ms(&self) -> u32 {
        self.stroke_ms.saturating_mul(2)
    }
}

/// Ball queue hardware revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueRevision {
    /// One full turn per ball.
    #[default]
    SingleTurn,
    /// Half a turn for the first ball of a session, full turns afterwards.
    HalfThenFull,
}

/// Ball queue actuator (BQM) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Which queue mechanism is fitted.
    #[serde(default)]
    pub revision: QueueRevision,

    /// How long the enable line is held low to trigger a turn (ms).
    #[serde(default = "default_trigger_ms")]
    pub trigger_ms: u32,
}

fn default_trigger_ms() -> u32 {
    20
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            revision: QueueRevision::default(),
            trigger_ms: default_trigger_ms(),
        }
    }
}
