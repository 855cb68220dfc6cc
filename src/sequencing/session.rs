//! Drill session orchestration.
//!
//! A session energizes the rig, fires shots (one at a time, or a whole drill)
//! and shuts the rig down again. The lifecycle only moves forward:
//!
//! ```text
//! Idle -> Starting -> Ready -> Firing -> Stopping -> Stopped
//!   |                   |        ^  |       ^
//!   |                   |        +--+       |
//!   |                   +-------------------+
//!   +-----------------------------------------------> Stopped
//! ```

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::actuator::{ActuatorId, ActuatorSet, AxisCommand, TurnDistance};
use crate::aim::{TrajectoryProvider, Zone};
use crate::config::{ActuatorOrder, Mph, Pulses, RigConfig, Seconds};
use crate::error::{Error, ProfileError, Result, SessionError};
use crate::profile::{NoRecorder, SessionRecorder};

use super::feed::FeedSequencer;
use super::flywheel::FlywheelController;
use super::position::AxisTracker;
use super::shot::{DrillDefinition, ShotCommand};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Created, nothing energized.
    Idle,
    /// Energizing actuators.
    Starting,
    /// Energized and settled, no shot fired yet.
    Ready,
    /// At least one shot fired.
    Firing,
    /// Homing and de-energizing.
    Stopping,
    /// Finished. Terminal.
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Ready => "ready",
            SessionState::Firing => "firing",
            SessionState::Stopping => "stopping",
            SessionState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// What happened during one shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotReport {
    /// 1-based ball number within the session.
    pub number: usize,
    /// Zone aimed at.
    pub zone: Zone,
    /// Requested exit speed.
    pub exit_speed: Mph,
    /// Duty cycle sent to both flywheels.
    pub duty_percent: u8,
    /// Whether both flywheels reported at speed in time.
    pub flywheels_confirmed: bool,
    /// Yaw move, if any.
    pub yaw: Option<AxisCommand>,
    /// Pitch move, if any.
    pub pitch: Option<AxisCommand>,
    /// Queue turn issued for this ball.
    pub turn: TurnDistance,
}

/// Summary of an automated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Shots completed.
    pub shots_fired: usize,
    /// Whether a stop request ended the run before the drill was exhausted.
    pub stopped_early: bool,
}

/// One session on one rig.
pub struct DrillSession<R, A, D, L = NoRecorder>
where
    R: ActuatorSet,
    A: TrajectoryProvider,
    D: DelayNs,
    L: SessionRecorder,
{
    rig: R,
    aim: A,
    delay: D,
    recorder: L,

    yaw: AxisTracker,
    pitch: AxisTracker,
    flywheel: FlywheelController,
    feed: FeedSequencer,

    settle_ms: u32,
    startup_order: ActuatorOrder,
    shutdown_order: ActuatorOrder,

    state: SessionState,
    previous_zone: Zone,
    is_first_shot: bool,
    shots_fired: usize,

    drill: Option<DrillDefinition>,
    goalie: Option<String<64>>,
}

impl<R, A, D> DrillSession<R, A, D, NoRecorder>
where
    R: ActuatorSet,
    A: TrajectoryProvider,
    D: DelayNs,
{
    /// Start building a session.
    pub fn builder() -> DrillSessionBuilder<R, A, D, NoRecorder> {
        DrillSessionBuilder::new()
    }
}

impl<R, A, D, L> DrillSession<R, A, D, L>
where
    R: ActuatorSet,
    A: TrajectoryProvider,
    D: DelayNs,
    L: SessionRecorder,
{
    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Zone of the last shot fired (center before the first shot).
    #[inline]
    pub fn previous_zone(&self) -> Zone {
        self.previous_zone
    }

    /// Whether no shot has been fired since start.
    #[inline]
    pub fn is_first_shot(&self) -> bool {
        self.is_first_shot
    }

    /// Shots completed this session.
    #[inline]
    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    /// Yaw offset from center.
    #[inline]
    pub fn yaw_offset(&self) -> Pulses {
        self.yaw.offset()
    }

    /// Pitch offset from center.
    #[inline]
    pub fn pitch_offset(&self) -> Pulses {
        self.pitch.offset()
    }

    /// Loaded drill, if any.
    #[inline]
    pub fn drill(&self) -> Option<&DrillDefinition> {
        self.drill.as_ref()
    }

    /// Goalie the session is logged against, if any.
    #[inline]
    pub fn goalie(&self) -> Option<&str> {
        self.goalie.as_deref()
    }

    /// The actuators.
    #[inline]
    pub fn rig(&self) -> &R {
        &self.rig
    }

    /// Energize every actuator and wait for the rig to settle.
    ///
    /// # Errors
    ///
    /// If an actuator fails to energize, everything is shut down again, the
    /// session ends `Stopped` and the energize error is returned.
    pub fn start(&mut self) -> Result<()> {
        self.expect_state(&[SessionState::Idle], "start")?;
        self.state = SessionState::Starting;
        log::info!("session starting");

        let order = self.startup_order.clone();
        for id in order.iter() {
            log::debug!("energizing {}", id);
            if let Err(err) = self.rig.energize(id) {
                log::warn!("energizing {} failed: {}", id, err);
                self.state = SessionState::Stopping;
                if let Err(shutdown_err) = self.shutdown(false) {
                    log::warn!("shutdown after failed start: {}", shutdown_err);
                }
                self.state = SessionState::Stopped;
                return Err(err);
            }
        }

        self.yaw.zero();
        self.pitch.zero();
        self.previous_zone = Zone::CenterMiddle;
        self.is_first_shot = true;
        self.shots_fired = 0;

        self.delay.delay_ms(self.settle_ms);
        self.state = SessionState::Ready;
        log::info!("session ready");
        Ok(())
    }

    /// Fire one untimed shot.
    ///
    /// On error the session stays `Firing`; call [`stop`](Self::stop) to shut
    /// the rig down.
    pub fn fire_shot(&mut self, shot: ShotCommand) -> Result<ShotReport> {
        self.expect_state(&[SessionState::Ready, SessionState::Firing], "fire a shot")?;
        self.state = SessionState::Firing;
        self.run_cycle(shot, None)
    }

    /// Fire every shot of the loaded drill in order, then stop.
    ///
    /// `stop_requested` is checked before each shot; a shot in progress always
    /// finishes. `on_shot` is called after each completed shot. The rig is
    /// shut down whether the drill ran out, was stopped, or failed.
    pub fn run_drill<F>(&mut self, stop_requested: &AtomicBool, mut on_shot: F) -> Result<SessionReport>
    where
        F: FnMut(&ShotReport),
    {
        self.expect_state(&[SessionState::Ready], "run a drill")?;
        let drill = self.drill.take().ok_or(SessionError::NoDrillLoaded)?;

        self.state = SessionState::Firing;
        log::info!(
            "running drill '{}': {} shots every {} s",
            drill.name(),
            drill.len(),
            drill.rate_of_fire().0
        );

        let mut outcome = Ok(());
        let mut stopped_early = false;
        let mut fired = 0;

        for shot in drill.shots() {
            if stop_requested.load(Ordering::SeqCst) {
                log::info!("stop requested after {} of {} shots", fired, drill.len());
                stopped_early = true;
                break;
            }
            match self.run_cycle(*shot, Some(drill.rate_of_fire())) {
                Ok(report) => {
                    fired += 1;
                    on_shot(&report);
                }
                Err(err) => {
                    log::warn!("shot {} failed: {}", fired + 1, err);
                    outcome = Err(err);
                    break;
                }
            }
        }

        self.drill = Some(drill);
        let stopped = self.stop();
        outcome?;
        stopped?;

        Ok(SessionReport {
            shots_fired: fired,
            stopped_early,
        })
    }

    /// Home both axes, de-energize everything and log the completion.
    ///
    /// Every shutdown step runs even if an earlier one fails; the first
    /// failure is returned once the session is `Stopped`. Stopping an idle
    /// session needs no hardware access.
    pub fn stop(&mut self) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Stopped;
                log::info!("session stopped before start");
                return Ok(());
            }
            SessionState::Ready | SessionState::Firing => {}
            from => {
                return Err(SessionError::InvalidTransition {
                    from,
                    action: "stop",
                }
                .into())
            }
        }

        self.state = SessionState::Stopping;
        log::info!("session stopping after {} shots", self.shots_fired);
        let result = self.shutdown(true);
        self.state = SessionState::Stopped;
        log::info!("session stopped");
        result
    }

    fn run_cycle(&mut self, shot: ShotCommand, rate_of_fire: Option<Seconds>) -> Result<ShotReport> {
        let target = self.aim.angles_for(shot.zone())?;
        let previous = self.aim.angles_for(self.previous_zone)?;

        let yaw = self.yaw.move_to(self.rig.yaw(), previous.yaw, target.yaw)?;
        let pitch = self.pitch.move_to(self.rig.pitch(), previous.pitch, target.pitch)?;

        let (top, bottom) = self.rig.flywheels();
        let flywheels_confirmed = self.flywheel.set_speed(top, bottom, shot.exit_speed())?;

        let turn = self.feed.advance_queue(self.rig.queue(), self.is_first_shot)?;
        self.feed.fire(self.rig.feed(), &mut self.delay, rate_of_fire)?;

        self.previous_zone = shot.zone();
        self.is_first_shot = false;
        self.shots_fired += 1;

        let report = ShotReport {
            number: self.shots_fired,
            zone: shot.zone(),
            exit_speed: shot.exit_speed(),
            duty_percent: self.flywheel.duty_for(shot.exit_speed()),
            flywheels_confirmed,
            yaw: yaw.command,
            pitch: pitch.command,
            turn,
        };
        log::info!(
            "ball {}: {} at {} mph ({}% duty)",
            report.number,
            report.zone,
            report.exit_speed.0,
            report.duty_percent
        );
        Ok(report)
    }

    fn shutdown(&mut self, record: bool) -> Result<()> {
        let mut first_error = None;

        keep_first(&mut first_error, "home yaw", self.yaw.reset(self.rig.yaw()));
        keep_first(&mut first_error, "home pitch", self.pitch.reset(self.rig.pitch()));

        let order = self.shutdown_order.clone();
        for id in order.iter() {
            log::debug!("de-energizing {}", id);
            keep_first(&mut first_error, id.label(), self.rig.de_energize_and_home(id));
        }

        if record {
            let drill_name = self.drill.as_ref().map(DrillDefinition::name);
            if let (Some(goalie), Some(drill_name)) = (self.goalie.as_deref(), drill_name) {
                if !goalie.is_empty() && !drill_name.is_empty() {
                    log::info!("logging '{}' for {}", drill_name, goalie);
                    keep_first(
                        &mut first_error,
                        "record completion",
                        self.recorder.record_completion(goalie, drill_name),
                    );
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn expect_state(&self, allowed: &[SessionState], action: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.state,
                action,
            }
            .into())
        }
    }
}

fn keep_first(first: &mut Option<Error>, step: &str, result: Result<()>) {
    if let Err(err) = result {
        log::warn!("shutdown step '{}' failed: {}", step, err);
        if first.is_none() {
            *first = Some(err);
        }
    }
}

/// Builder for [`DrillSession`].
pub struct DrillSessionBuilder<R, A, D, L> {
    rig: Option<R>,
    aim: Option<A>,
    delay: Option<D>,
    recorder: L,
    config: RigConfig,
    drill: Option<DrillDefinition>,
    goalie: Option<String<64>>,
    goalie_too_long: bool,
}

impl<R, A, D> Default for DrillSessionBuilder<R, A, D, NoRecorder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, A, D> DrillSessionBuilder<R, A, D, NoRecorder> {
    /// Create a builder with default configuration and no recorder.
    pub fn new() -> Self {
        Self {
            rig: None,
            aim: None,
            delay: None,
            recorder: NoRecorder,
            config: RigConfig::default(),
            drill: None,
            goalie: None,
            goalie_too_long: false,
        }
    }
}

impl<R, A, D, L> DrillSessionBuilder<R, A, D, L> {
    /// Set the actuators.
    pub fn rig(mut self, rig: R) -> Self {
        self.rig = Some(rig);
        self
    }

    /// Set the zone-to-angle provider.
    pub fn aim(mut self, aim: A) -> Self {
        self.aim = Some(aim);
        self
    }

    /// Set the delay used for settle and dwell waits.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Use timing, ordering and actuator constants from `config`.
    pub fn config(mut self, config: &RigConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Load a drill for automated runs.
    pub fn drill(mut self, drill: DrillDefinition) -> Self {
        self.drill = Some(drill);
        self
    }

    /// Log completion against this goalie.
    pub fn goalie(mut self, name: &str) -> Self {
        self.goalie = String::try_from(name).ok();
        self.goalie_too_long = self.goalie.is_none();
        self
    }

    /// Persist completions through `recorder`.
    pub fn recorder<L2>(self, recorder: L2) -> DrillSessionBuilder<R, A, D, L2> {
        DrillSessionBuilder {
            rig: self.rig,
            aim: self.aim,
            delay: self.delay,
            recorder,
            config: self.config,
            drill: self.drill,
            goalie: self.goalie,
            goalie_too_long: self.goalie_too_long,
        }
    }

    /// Build an idle session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DriverUnavailable` when the rig, aim provider or
    /// delay is missing, and `ProfileError::NameTooLong` for an oversized
    /// goalie name.
    pub fn build(self) -> Result<DrillSession<R, A, D, L>>
    where
        R: ActuatorSet,
        A: TrajectoryProvider,
        D: DelayNs,
        L: SessionRecorder,
    {
        let rig = self.rig.ok_or(SessionError::DriverUnavailable("actuator rig"))?;
        let aim = self
            .aim
            .ok_or(SessionError::DriverUnavailable("trajectory provider"))?;
        let delay = self.delay.ok_or(SessionError::DriverUnavailable("delay"))?;
        if self.goalie_too_long {
            return Err(ProfileError::NameTooLong.into());
        }

        let config = self.config;
        Ok(DrillSession {
            rig,
            aim,
            delay,
            recorder: self.recorder,
            yaw: AxisTracker::new(ActuatorId::Yaw, &config.axes.yaw),
            pitch: AxisTracker::new(ActuatorId::Pitch, &config.axes.pitch),
            flywheel: FlywheelController::new(&config.flywheel),
            feed: FeedSequencer::new(&config.feed, &config.queue),
            settle_ms: config.session.settle_ms,
            startup_order: config.session.startup_order,
            shutdown_order: config.session.shutdown_order,
            state: SessionState::Idle,
            previous_zone: Zone::CenterMiddle,
            is_first_shot: true,
            shots_fired: 0,
            drill: self.drill,
            goalie: self.goalie,
        })
    }
}
