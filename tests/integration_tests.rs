//! Integration tests for shot-sequencer
//!
//! These tests cover the workflow from TOML and CSV files on disk to a
//! finished session logged against a goalie.

mod common;

use std::fs;
use std::sync::atomic::AtomicBool;

use common::{aim_table, fake_rig, Event, EventLog, RecordingDelay, RIG_TOML};
use shot_sequencer::actuator::ActuatorId;
use shot_sequencer::config::{ActuatorOrder, QueueRevision};
use shot_sequencer::error::{ConfigError, Error, ProfileError};
use shot_sequencer::{
    load_config, parse_config, validate_config, AimTable, DrillSession, ProfileStore, SessionState,
    TrajectoryProvider, Zone,
};
use tempfile::TempDir;

// =============================================================================
// Test configuration data
// =============================================================================

const FULL_CONFIG: &str = r#"
[axes.yaw]
degrees_per_pulse = 0.5
invert_direction = true
trigger_ms = 15
pulse_interval_ms = 5

[axes.pitch]
degrees_per_pulse = 0.25

[flywheel]
diameter_inches = 16.5
max_rpm = 3180.0
confirm_timeout_ms = 1500

[feed]
stroke_ms = 1000
retract_ms = 300

[queue]
revision = "half_then_full"
trigger_ms = 25

[session]
settle_ms = 1500
startup_order = ["flywheel_top", "flywheel_bottom", "yaw", "pitch", "ball_queue", "ball_feed"]
shutdown_order = ["ball_feed", "ball_queue", "flywheel_top", "flywheel_bottom", "yaw", "pitch"]

[aim.twelve_feet]
standoff_feet = 12.0

[aim.twelve_feet.zones]
TL = { yaw_degrees = -9.0, pitch_degrees = 7.0 }
TM = { yaw_degrees = 0.0, pitch_degrees = 7.0 }
TR = { yaw_degrees = 9.0, pitch_degrees = 7.0 }
CL = { yaw_degrees = -9.0, pitch_degrees = 0.0 }
CM = { yaw_degrees = 0.0, pitch_degrees = 0.0 }
CR = { yaw_degrees = 9.0, pitch_degrees = 0.0 }
BL = { yaw_degrees = -9.0, pitch_degrees = -7.0 }
BM = { yaw_degrees = 0.0, pitch_degrees = -7.0 }
BR = { yaw_degrees = 9.0, pitch_degrees = -7.0 }
"#;

// =============================================================================
// Configuration parsing
// =============================================================================

#[test]
fn parse_full_rig_config() {
    let config = parse_config(FULL_CONFIG).expect("Failed to parse full config");

    assert!((config.axes.yaw.degrees_per_pulse - 0.5).abs() < 0.001);
    assert!(config.axes.yaw.invert_direction);
    assert_eq!(config.axes.yaw.trigger_ms, 15);
    assert!(!config.axes.pitch.invert_direction);
    assert_eq!(config.flywheel.confirm_timeout_ms, 1500);
    assert_eq!(config.feed.stroke_ms, 1000);
    assert_eq!(config.queue.revision, QueueRevision::HalfThenFull);
    assert_eq!(config.session.settle_ms, 1500);
    assert_eq!(config.session.startup_order, ActuatorOrder::startup());

    let table = config.aim_table("twelve_feet").expect("aim table should exist");
    assert!(table.is_complete());
    assert!(config.aim_table_for(12.0).is_some());
    assert!(config.aim_table_for(10.0).is_none());
}

#[test]
fn load_config_from_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("rig.toml");
    fs::write(&path, RIG_TOML).expect("write config");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.session.settle_ms, 2000);
    assert_eq!(config.aim_table_names().count(), 1);

    let missing = load_config(dir.path().join("nope.toml"));
    assert!(matches!(missing, Err(Error::Config(ConfigError::IoError(_)))));
}

#[test]
fn aim_table_selected_by_distance() {
    let config = parse_config(FULL_CONFIG).expect("Failed to parse full config");
    let table = AimTable::for_distance(&config, 12.0).expect("12 ft table");

    let tr = table.angles_for(Zone::TopRight).expect("TR angles");
    assert!((tr.yaw.0 - 9.0).abs() < 0.001);
    assert!((tr.pitch.0 - 7.0).abs() < 0.001);
    assert!(AimTable::for_distance(&config, 15.0).is_err());
}

// =============================================================================
// Configuration validation
// =============================================================================

#[test]
fn reject_bad_axis_and_flywheel_constants() {
    let err = parse_config("[axes.yaw]\ndegrees_per_pulse = 0.0\n").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidDegreesPerPulse(_))));

    let err = parse_config("[flywheel]\nmax_rpm = -1.0\n").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidMaxRpm(_))));

    let err = parse_config("[feed]\nstroke_ms = 0\n").unwrap_err();
    assert_eq!(err, Error::Config(ConfigError::ZeroDuration("feed.stroke_ms")));
}

#[test]
fn reject_bad_actuator_orders() {
    let toml = r#"
[session]
startup_order = ["flywheel_top", "flywheel_bottom", "yaw", "pitch", "ball_queue", "ball_queue"]
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::DuplicateInOrder {
            list: "startup_order",
            actuator: ActuatorId::BallQueue,
        })
    ));

    let toml = r#"
[session]
shutdown_order = ["ball_feed", "ball_queue", "flywheel_top", "flywheel_bottom", "yaw"]
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::IncompleteOrder {
            list: "shutdown_order",
            missing: ActuatorId::Pitch,
        })
    ));

    let err = parse_config("[session]\nstartup_order = [\"turret\"]\n").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
}

#[test]
fn reject_bad_aim_tables() {
    let partial = r#"
[aim.short]
standoff_feet = 8.0

[aim.short.zones]
CM = { yaw_degrees = 0.0, pitch_degrees = 0.0 }
"#;
    let err = parse_config(partial).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::IncompleteAimTable(_))));

    let unknown_zone = r#"
[aim.short]
standoff_feet = 8.0

[aim.short.zones]
XX = { yaw_degrees = 0.0, pitch_degrees = 0.0 }
"#;
    assert!(matches!(
        parse_config(unknown_zone),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));

    let mut config = parse_config(RIG_TOML).expect("fixture config");
    let table = config.aim_table("ten_feet").expect("fixture table").clone();
    let _ = config
        .aim
        .insert(heapless::String::try_from("also_ten").expect("short name"), table);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicateStandoff(_)))
    ));
}

// =============================================================================
// Profiles on disk through a full session
// =============================================================================

#[test]
fn drill_file_to_goalie_log() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = ProfileStore::new(dir.path());

    let drill_path = store.drill_path("corner_drill");
    fs::create_dir_all(drill_path.parent().expect("drill dir")).expect("mkdir");
    fs::write(&drill_path, "index,zone,speed,rof\n1,TR,30,5\n2,BL,30,5\n").expect("write drill");

    let drill = store.load_drill("corner_drill").expect("drill should load");
    assert_eq!(drill.len(), 2);

    let log = EventLog::default();
    let mut session = DrillSession::builder()
        .config(&common::rig_config())
        .rig(fake_rig(&log))
        .aim(aim_table())
        .delay(RecordingDelay(log.clone()))
        .drill(drill)
        .goalie("sam")
        .recorder(&mut store)
        .build()
        .expect("session should build");

    session.start().expect("start");
    let report = session
        .run_drill(&AtomicBool::new(false), |_| {})
        .expect("drill should complete");
    assert_eq!(report.shots_fired, 2);
    assert_eq!(session.state(), SessionState::Stopped);
    drop(session);

    assert_eq!(log.count(|e| *e == Event::Release(ActuatorId::BallFeed)), 1);

    let completions = store.completions("sam").expect("goalie log should exist");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].0, "Corner Drill");
}

#[test]
fn missing_drill_file_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let store = ProfileStore::new(dir.path());

    assert!(matches!(
        store.load_drill("not_there"),
        Err(Error::Profile(ProfileError::Missing(_)))
    ));
    assert!(matches!(
        store.completions("nobody"),
        Err(Error::Profile(ProfileError::Missing(_)))
    ));
}
