//! Ball queue advance and feed firing.

use embedded_hal::delay::DelayNs;

use crate::actuator::{Actuator, FeedCommand, QueueCommand, TurnDistance};
use crate::config::{FeedConfig, QueueConfig, QueueRevision, Seconds};
use crate::error::Result;

/// Drives the queue and the feed for one ball.
#[derive(Debug, Clone)]
pub struct FeedSequencer {
    revision: QueueRevision,
    /// Forward plus backward stroke (ms).
    fixed_stroke_ms: u32,
}

impl FeedSequencer {
    /// Create a sequencer for the configured hardware revision.
    pub fn new(feed: &FeedConfig, queue: &QueueConfig) -> Self {
        Self {
            revision: queue.revision,
            fixed_stroke_ms: feed.fixed_stroke_ms(),
        }
    }

    /// Turn distance for the next ball.
    pub fn turn_for(&self, is_first_shot: bool) -> TurnDistance {
        match self.revision {
            QueueRevision::SingleTurn => TurnDistance::Full,
            QueueRevision::HalfThenFull if is_first_shot => TurnDistance::Half,
            QueueRevision::HalfThenFull => TurnDistance::Full,
        }
    }

    /// Drop one ball into the feed.
    pub fn advance_queue<Q>(&self, queue: &mut Q, is_first_shot: bool) -> Result<TurnDistance>
    where
        Q: Actuator<Command = QueueCommand>,
    {
        let distance = self.turn_for(is_first_shot);
        log::debug!("{}: turn {:?}", queue.id(), distance);
        queue.command(QueueCommand::Turn(distance))?;
        Ok(distance)
    }

    /// Dwell on each side of the stroke pair so one shot takes `rate_of_fire`.
    ///
    /// Zero when the strokes alone already take longer.
    pub fn half_gap_ms(&self, rate_of_fire: Seconds) -> u32 {
        rate_of_fire.as_millis().saturating_sub(self.fixed_stroke_ms) / 2
    }

    /// Fire one ball: dwell, forward stroke, backward stroke, dwell.
    ///
    /// Untimed (`None`) fires skip both dwells.
    pub fn fire<F, D>(&self, feed: &mut F, delay: &mut D, rate_of_fire: Option<Seconds>) -> Result<()>
    where
        F: Actuator<Command = FeedCommand>,
        D: DelayNs,
    {
        let half_gap_ms = rate_of_fire.map(|rof| self.half_gap_ms(rof)).unwrap_or(0);

        if half_gap_ms > 0 {
            delay.delay_ms(half_gap_ms);
        }
        feed.command(FeedCommand::Forward)?;
        feed.command(FeedCommand::Backward)?;
        if half_gap_ms > 0 {
            delay.delay_ms(half_gap_ms);
        }
        Ok(())
    }
}
