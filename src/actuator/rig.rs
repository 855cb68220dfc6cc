//! The full set of six actuators.

use crate::error::Result;

use super::driver::{Actuator, AxisCommand, FeedCommand, FlywheelCommand, QueueCommand};
use super::state::{ActuatorId, ActuatorState};

/// Access to every actuator on the rig, by role.
///
/// The session only ever talks to the rig through this trait, so a different
/// hardware revision is a different implementation chosen at build time.
pub trait ActuatorSet {
    /// Top flywheel (FTM).
    type FlywheelTop: Actuator<Command = FlywheelCommand>;
    /// Bottom flywheel (FMB).
    type FlywheelBottom: Actuator<Command = FlywheelCommand>;
    /// Yaw axis (YM).
    type Yaw: Actuator<Command = AxisCommand>;
    /// Pitch axis (PM).
    type Pitch: Actuator<Command = AxisCommand>;
    /// Ball queue (BQM).
    type Queue: Actuator<Command = QueueCommand>;
    /// Ball feed (BFM).
    type Feed: Actuator<Command = FeedCommand>;

    /// Both flywheels at once.
    fn flywheels(&mut self) -> (&mut Self::FlywheelTop, &mut Self::FlywheelBottom);

    /// Yaw axis.
    fn yaw(&mut self) -> &mut Self::Yaw;

    /// Pitch axis.
    fn pitch(&mut self) -> &mut Self::Pitch;

    /// Ball queue.
    fn queue(&mut self) -> &mut Self::Queue;

    /// Ball feed.
    fn feed(&mut self) -> &mut Self::Feed;

    /// State of one actuator.
    fn state(&self, id: ActuatorId) -> ActuatorState;

    /// Energize one actuator.
    fn energize(&mut self, id: ActuatorId) -> Result<()> {
        match id {
            ActuatorId::FlywheelTop => self.flywheels().0.energize(),
            ActuatorId::FlywheelBottom => self.flywheels().1.energize(),
            ActuatorId::Yaw => self.yaw().energize(),
            ActuatorId::Pitch => self.pitch().energize(),
            ActuatorId::BallQueue => self.queue().energize(),
            ActuatorId::BallFeed => self.feed().energize(),
        }
    }

    /// De-energize and home one actuator.
    fn de_energize_and_home(&mut self, id: ActuatorId) -> Result<()> {
        match id {
            ActuatorId::FlywheelTop => self.flywheels().0.de_energize_and_home(),
            ActuatorId::FlywheelBottom => self.flywheels().1.de_energize_and_home(),
            ActuatorId::Yaw => self.yaw().de_energize_and_home(),
            ActuatorId::Pitch => self.pitch().de_energize_and_home(),
            ActuatorId::BallQueue => self.queue().de_energize_and_home(),
            ActuatorId::BallFeed => self.feed().de_energize_and_home(),
        }
    }
}

/// Six concrete actuators bundled together.
pub struct Rig<FT, FB, Y, P, Q, F> {
    flywheel_top: FT,
    flywheel_bottom: FB,
    yaw: Y,
    pitch: P,
    queue: Q,
    feed: F,
}

impl<FT, FB, Y, P, Q, F> Rig<FT, FB, Y, P, Q, F>
where
    FT: Actuator<Command = FlywheelCommand>,
    FB: Actuator<Command = FlywheelCommand>,
    Y: Actuator<Command = AxisCommand>,
    P: Actuator<Command = AxisCommand>,
    Q: Actuator<Command = QueueCommand>,
    F: Actuator<Command = FeedCommand>,
{
    /// Bundle six drivers.
    pub fn new(flywheel_top: FT, flywheel_bottom: FB, yaw: Y, pitch: P, queue: Q, feed: F) -> Self {
        Self {
            flywheel_top,
            flywheel_bottom,
            yaw,
            pitch,
            queue,
            feed,
        }
    }
}

impl<FT, FB, Y, P, Q, F> ActuatorSet for Rig<FT, FB, Y, P, Q, F>
where
    FT: Actuator<Command = FlywheelCommand>,
    FB: Actuator<Command = FlywheelCommand>,
    Y: Actuator<Command = AxisCommand>,
    P: Actuator<Command = AxisCommand>,
    Q: Actuator<Command = QueueCommand>,
    F: Actuator<Command = FeedCommand>,
{
    type FlywheelTop = FT;
    type FlywheelBottom = FB;
    type Yaw = Y;
    type Pitch = P;
    type Queue = Q;
    type Feed = F;

    fn flywheels(&mut self) -> (&mut FT, &mut FB) {
        (&mut self.flywheel_top, &mut self.flywheel_bottom)
    }

    fn yaw(&mut self) -> &mut Y {
        &mut self.yaw
    }

    fn pitch(&mut self) -> &mut P {
        &mut self.pitch
    }

    fn queue(&mut self) -> &mut Q {
        &mut self.queue
    }

    fn feed(&mut self) -> &mut F {
        &mut self.feed
    }

    fn state(&self, id: ActuatorId) -> ActuatorState {
        match id {
            ActuatorId::FlywheelTop => self.flywheel_top.query_state(),
            ActuatorId::FlywheelBottom => self.flywheel_bottom.query_state(),
            ActuatorId::Yaw => self.yaw.query_state(),
            ActuatorId::Pitch => self.pitch.query_state(),
            ActuatorId::BallQueue => self.queue.query_state(),
            ActuatorId::BallFeed => self.feed.query_state(),
        }
    }
}
