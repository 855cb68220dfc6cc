//! Shared fixtures: recording fake actuators, delay and recorder.
//!
//! Every fake writes into one shared event log so tests can assert the exact
//! order of hardware calls across all six actuators.

#![allow(dead_code)]

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use shot_sequencer::actuator::{
    Actuator, ActuatorId, ActuatorState, AxisCommand, FeedCommand, FlywheelCommand, QueueCommand,
    Reading, TurnDistance,
};
use shot_sequencer::config::RigConfig;
use shot_sequencer::error::{ActuatorError, Result};
use shot_sequencer::{parse_config, AimTable, Rig, SessionRecorder};

/// One observable hardware call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Energize(ActuatorId),
    Release(ActuatorId),
    Axis(ActuatorId, AxisCommand),
    Duty(ActuatorId, u8),
    Turn(TurnDistance),
    Feed(FeedCommand),
    Confirm(ActuatorId),
    Delay(u32),
}

/// Shared, thread-safe event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

/// Maps a driver command to its log entry.
pub trait Recorded: Copy + Debug + Send + 'static {
    fn event(self, id: ActuatorId) -> Event;

    fn pulses(self) -> i64 {
        0
    }
}

impl Recorded for AxisCommand {
    fn event(self, id: ActuatorId) -> Event {
        Event::Axis(id, self)
    }

    fn pulses(self) -> i64 {
        self.signed_pulses()
    }
}

impl Recorded for FlywheelCommand {
    fn event(self, id: ActuatorId) -> Event {
        let FlywheelCommand::DutyCycle(duty) = self;
        Event::Duty(id, duty)
    }
}

impl Recorded for QueueCommand {
    fn event(self, _id: ActuatorId) -> Event {
        let QueueCommand::Turn(distance) = self;
        Event::Turn(distance)
    }
}

impl Recorded for FeedCommand {
    fn event(self, _id: ActuatorId) -> Event {
        Event::Feed(self)
    }
}

/// Actuator that records every call.
pub struct FakeActuator<C> {
    id: ActuatorId,
    log: EventLog,
    energized: bool,
    position: i64,
    pub fail_energize: bool,
    pub fail_command: bool,
    pub confirms: bool,
    _command: PhantomData<C>,
}

impl<C: Recorded> FakeActuator<C> {
    pub fn new(id: ActuatorId, log: &EventLog) -> Self {
        Self {
            id,
            log: log.clone(),
            energized: false,
            position: 0,
            fail_energize: false,
            fail_command: false,
            confirms: true,
            _command: PhantomData,
        }
    }
}

impl<C: Recorded> Actuator for FakeActuator<C> {
    type Command = C;

    fn id(&self) -> ActuatorId {
        self.id
    }

    fn energize(&mut self) -> Result<()> {
        if self.fail_energize {
            return Err(ActuatorError::PinError(self.id).into());
        }
        self.log.push(Event::Energize(self.id));
        self.energized = true;
        Ok(())
    }

    fn de_energize_and_home(&mut self) -> Result<()> {
        self.log.push(Event::Release(self.id));
        self.energized = false;
        self.position = 0;
        Ok(())
    }

    fn command(&mut self, command: C) -> Result<()> {
        if self.fail_command {
            return Err(ActuatorError::PinError(self.id).into());
        }
        self.log.push(command.event(self.id));
        self.position += command.pulses();
        Ok(())
    }

    fn query_state(&self) -> ActuatorState {
        ActuatorState {
            energized: self.energized,
            reading: Reading::Position(self.position),
        }
    }

    fn wait_for_confirmation(&mut self, _timeout_ms: u32) -> Result<bool> {
        self.log.push(Event::Confirm(self.id));
        Ok(self.confirms)
    }
}

pub type FakeRig = Rig<
    FakeActuator<FlywheelCommand>,
    FakeActuator<FlywheelCommand>,
    FakeActuator<AxisCommand>,
    FakeActuator<AxisCommand>,
    FakeActuator<QueueCommand>,
    FakeActuator<FeedCommand>,
>;

/// Six recording actuators sharing `log`.
pub fn fake_rig(log: &EventLog) -> FakeRig {
    Rig::new(
        FakeActuator::new(ActuatorId::FlywheelTop, log),
        FakeActuator::new(ActuatorId::FlywheelBottom, log),
        FakeActuator::new(ActuatorId::Yaw, log),
        FakeActuator::new(ActuatorId::Pitch, log),
        FakeActuator::new(ActuatorId::BallQueue, log),
        FakeActuator::new(ActuatorId::BallFeed, log),
    )
}

/// Delay that only records.
#[derive(Clone)]
pub struct RecordingDelay(pub EventLog);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::Delay(ms));
    }
}

/// Recorder that keeps completions in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder(pub Arc<Mutex<Vec<(String, String)>>>);

impl MemoryRecorder {
    pub fn entries(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().clone()
    }
}

impl SessionRecorder for MemoryRecorder {
    fn record_completion(&mut self, goalie: &str, drill_name: &str) -> Result<()> {
        self.0
            .lock()
            .unwrap()
            .push((goalie.to_string(), drill_name.to_string()));
        Ok(())
    }
}

/// Rig configuration with one aim table at 10 ft.
///
/// Yaw is -10 / 0 / +10 degrees for left / middle / right; pitch is
/// +8 / 0 / -8 for top / center / bottom. One degree per pulse.
pub const RIG_TOML: &str = r#"
[session]
settle_ms = 2000

[aim.ten_feet]
standoff_feet = 10.0

[aim.ten_feet.zones]
TL = { yaw_degrees = -10.0, pitch_degrees = 8.0 }
TM = { yaw_degrees = 0.0, pitch_degrees = 8.0 }
TR = { yaw_degrees = 10.0, pitch_degrees = 8.0 }
CL = { yaw_degrees = -10.0, pitch_degrees = 0.0 }
CM = { yaw_degrees = 0.0, pitch_degrees = 0.0 }
CR = { yaw_degrees = 10.0, pitch_degrees = 0.0 }
BL = { yaw_degrees = -10.0, pitch_degrees = -8.0 }
BM = { yaw_degrees = 0.0, pitch_degrees = -8.0 }
BR = { yaw_degrees = 10.0, pitch_degrees = -8.0 }
"#;

pub fn rig_config() -> RigConfig {
    parse_config(RIG_TOML).expect("fixture config should parse")
}

pub fn aim_table() -> AimTable {
    AimTable::for_distance(&rig_config(), 10.0).expect("10 ft table should exist")
}
