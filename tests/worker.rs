//! Background session thread: event stream, stop requests and join.

mod common;

use common::{
    aim_table, fake_rig, rig_config, Event, EventLog, FakeActuator, FakeRig, MemoryRecorder, RecordingDelay,
};
use shot_sequencer::actuator::ActuatorId;
use shot_sequencer::sequencing::{DrillDefinition, ShotCommand};
use shot_sequencer::{DrillSession, Mph, Rig, SessionEvent, SessionWorker, Seconds, Zone};

fn shot(zone: Zone, mph: f32) -> ShotCommand {
    ShotCommand::new(zone, Mph(mph)).expect("valid shot")
}

/// Rig whose yaw axis refuses to energize.
fn rig_with_dead_yaw(log: &EventLog) -> FakeRig {
    let mut yaw = FakeActuator::new(ActuatorId::Yaw, log);
    yaw.fail_energize = true;
    Rig::new(
        FakeActuator::new(ActuatorId::FlywheelTop, log),
        FakeActuator::new(ActuatorId::FlywheelBottom, log),
        yaw,
        FakeActuator::new(ActuatorId::Pitch, log),
        FakeActuator::new(ActuatorId::BallQueue, log),
        FakeActuator::new(ActuatorId::BallFeed, log),
    )
}

fn running_flags(events: &[SessionEvent]) -> Vec<bool> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::DrillRunning(running) => Some(*running),
            SessionEvent::BallAdvanced(_) => None,
        })
        .collect()
}

fn balls(events: &[SessionEvent]) -> Vec<(usize, Zone)> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::BallAdvanced(report) => Some((report.number, report.zone)),
            SessionEvent::DrillRunning(_) => None,
        })
        .collect()
}

#[test]
fn drill_worker_streams_progress_and_finishes() {
    let log = EventLog::default();
    let recorder = MemoryRecorder::default();
    let drill = DrillDefinition::from_shots(
        "corners",
        Seconds(5.0),
        &[shot(Zone::TopRight, 30.0), shot(Zone::BottomLeft, 30.0)],
    )
    .expect("valid drill");

    let session = DrillSession::builder()
        .config(&rig_config())
        .rig(fake_rig(&log))
        .aim(aim_table())
        .delay(RecordingDelay(log.clone()))
        .drill(drill)
        .goalie("sam")
        .recorder(recorder.clone())
        .build()
        .expect("session should build");

    let worker = SessionWorker::spawn_drill(session).expect("spawn");
    // The channel closes once the session thread has returned.
    let events: Vec<SessionEvent> = worker.events().iter().collect();
    let report = worker.join().expect("drill should complete");

    assert_eq!(report.shots_fired, 2);
    assert!(!report.stopped_early);
    assert_eq!(running_flags(&events), vec![true, false]);
    assert_eq!(
        balls(&events),
        vec![(1, Zone::TopRight), (2, Zone::BottomLeft)]
    );
    assert_eq!(events.last(), Some(&SessionEvent::DrillRunning(false)));
    assert_eq!(recorder.entries().len(), 1);
    assert!(log.events().ends_with(&[Event::Release(ActuatorId::Pitch)]));
}

#[test]
fn manual_worker_fires_until_sender_dropped() {
    let log = EventLog::default();
    let session = DrillSession::builder()
        .config(&rig_config())
        .rig(fake_rig(&log))
        .aim(aim_table())
        .delay(RecordingDelay(log.clone()))
        .build()
        .expect("session should build");

    let (worker, shots) = SessionWorker::spawn_manual(session).expect("spawn");
    shots.send(shot(Zone::TopLeft, 40.0)).expect("send");
    shots.send(shot(Zone::CenterMiddle, 40.0)).expect("send");
    drop(shots);

    let events: Vec<SessionEvent> = worker.events().iter().collect();
    let report = worker.join().expect("manual session should complete");

    assert_eq!(report.shots_fired, 2);
    assert!(!report.stopped_early);
    assert_eq!(running_flags(&events), vec![true, false]);
    assert_eq!(
        balls(&events),
        vec![(1, Zone::TopLeft), (2, Zone::CenterMiddle)]
    );
    assert_eq!(log.count(|e| matches!(e, Event::Release(_))), 6);
}

#[test]
fn stop_handle_ends_idle_manual_session() {
    let log = EventLog::default();
    let session = DrillSession::builder()
        .config(&rig_config())
        .rig(fake_rig(&log))
        .aim(aim_table())
        .delay(RecordingDelay(log.clone()))
        .build()
        .expect("session should build");

    let (worker, _shots) = SessionWorker::spawn_manual(session).expect("spawn");
    let handle = worker.stop_handle();
    handle.stop();
    assert!(handle.is_stop_requested());

    let events: Vec<SessionEvent> = worker.events().iter().take(2).collect();
    let report = worker.join().expect("stopped session is not an error");

    assert_eq!(report.shots_fired, 0);
    assert!(report.stopped_early);
    assert_eq!(running_flags(&events), vec![true, false]);
    assert_eq!(log.count(|e| matches!(e, Event::Turn(_))), 0);
    assert_eq!(log.count(|e| matches!(e, Event::Release(_))), 6);
}

#[test]
fn failed_start_never_reports_running() {
    let log = EventLog::default();
    let drill = DrillDefinition::from_shots("corners", Seconds(5.0), &[shot(Zone::TopRight, 30.0)])
        .expect("valid drill");
    let session = DrillSession::builder()
        .config(&rig_config())
        .rig(rig_with_dead_yaw(&log))
        .aim(aim_table())
        .delay(RecordingDelay(log.clone()))
        .drill(drill)
        .build()
        .expect("session should build");

    let worker = SessionWorker::spawn_drill(session).expect("spawn");
    let events: Vec<SessionEvent> = worker.events().iter().collect();
    assert!(worker.join().is_err());
    assert_eq!(events, vec![SessionEvent::DrillRunning(false)]);

    let log = EventLog::default();
    let session = DrillSession::builder()
        .config(&rig_config())
        .rig(rig_with_dead_yaw(&log))
        .aim(aim_table())
        .delay(RecordingDelay(log.clone()))
        .build()
        .expect("session should build");

    let (worker, _shots) = SessionWorker::spawn_manual(session).expect("spawn");
    let events: Vec<SessionEvent> = worker.events().iter().collect();
    assert!(worker.join().is_err());
    assert_eq!(events, vec![SessionEvent::DrillRunning(false)]);
}
