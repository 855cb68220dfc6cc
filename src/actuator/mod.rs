//! Actuator module for shot-sequencer.
//!
//! Provides the `Actuator` driver trait, ClearPath drivers generic over
//! embedded-hal 1.0, and the six-actuator `Rig`.

mod axis;
mod driver;
mod feed;
pub mod feedback;
mod flywheel;
mod queue;
mod rig;
mod state;

pub use axis::ClearPathAxis;
pub use driver::{Actuator, AxisCommand, FeedCommand, FlywheelCommand, QueueCommand, TurnDistance};
pub use feed::ClearPathFeed;
pub use flywheel::ClearPathFlywheel;
pub use queue::ClearPathQueue;
pub use rig::{ActuatorSet, Rig};
pub use state::{ActuatorId, ActuatorState, FeedPosition, Reading};

#[cfg(feature = "std")]
pub use std_delay::StdDelay;

#[cfg(feature = "std")]
mod std_delay {
    use embedded_hal::delay::DelayNs;

    /// `DelayNs` backed by `std::thread::sleep`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdDelay;

    impl DelayNs for StdDelay {
        fn delay_ns(&mut self, ns: u32) {
            std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
        }

        fn delay_ms(&mut self, ms: u32) {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
        }
    }
}
