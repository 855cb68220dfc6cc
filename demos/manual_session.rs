//! Manual and automated sessions on simulated hardware.
//!
//! Builds the six ClearPath drivers over in-memory pins, fires a few manual
//! shots, then runs a short drill on a background thread.
//!
//! Run with: `cargo run --example manual_session`

use shot_sequencer::{
    actuator::{ActuatorId, ClearPathAxis, ClearPathFeed, ClearPathFlywheel, ClearPathQueue},
    config::RigConfig,
    parse_config,
    sequencing::DrillDefinition,
    AimTable, DrillSession, Mph, Rig, Seconds, SessionEvent, SessionWorker, ShotCommand, Zone,
};

/// Delay that returns immediately so the demo finishes at once.
#[derive(Clone, Copy)]
struct InstantDelay;

impl embedded_hal::delay::DelayNs for InstantDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Output pin that only remembers its level.
#[derive(Default)]
struct DemoPin {
    high: bool,
}

impl embedded_hal::digital::ErrorType for DemoPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for DemoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// HLFB line that toggles on every read, so every wait sees a rising edge.
#[derive(Default)]
struct DemoHlfb {
    high: bool,
}

impl embedded_hal::digital::ErrorType for DemoHlfb {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for DemoHlfb {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let level = self.high;
        self.high = !self.high;
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// PWM channel with a 0..=1000 range.
#[derive(Default)]
struct DemoPwm {
    duty: u16,
}

impl embedded_hal::pwm::ErrorType for DemoPwm {
    type Error = core::convert::Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for DemoPwm {
    fn max_duty_cycle(&self) -> u16 {
        1000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

type DemoFlywheel = ClearPathFlywheel<DemoPin, DemoPwm, DemoHlfb, InstantDelay>;
type DemoAxis = ClearPathAxis<DemoPin, DemoPin, DemoHlfb, InstantDelay>;
type DemoRig = Rig<
    DemoFlywheel,
    DemoFlywheel,
    DemoAxis,
    DemoAxis,
    ClearPathQueue<DemoPin, DemoPin, InstantDelay>,
    ClearPathFeed<DemoPin, DemoPin, InstantDelay>,
>;

const RIG_TOML: &str = r#"
[axes.yaw]
degrees_per_pulse = 0.5

[axes.pitch]
degrees_per_pulse = 0.5

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

fn flywheel(id: ActuatorId) -> DemoFlywheel {
    ClearPathFlywheel::new(
        id,
        DemoPin::default(),
        DemoPwm::default(),
        DemoHlfb::default(),
        InstantDelay,
    )
}

fn axis(id: ActuatorId, config: &RigConfig) -> DemoAxis {
    let axis_config = match id {
        ActuatorId::Yaw => &config.axes.yaw,
        _ => &config.axes.pitch,
    };
    ClearPathAxis::new(
        id,
        DemoPin::default(),
        DemoPin::default(),
        DemoHlfb::default(),
        InstantDelay,
        axis_config,
    )
}

fn build_rig(config: &RigConfig) -> DemoRig {
    Rig::new(
        flywheel(ActuatorId::FlywheelTop),
        flywheel(ActuatorId::FlywheelBottom),
        axis(ActuatorId::Yaw, config),
        axis(ActuatorId::Pitch, config),
        ClearPathQueue::new(
            DemoPin::default(),
            DemoPin::default(),
            InstantDelay,
            config.queue.trigger_ms,
        ),
        ClearPathFeed::new(DemoPin::default(), DemoPin::default(), InstantDelay, &config.feed),
    )
}

fn main() -> shot_sequencer::Result<()> {
    println!("=== Manual Session Example ===\n");

    let config = parse_config(RIG_TOML)?;
    let aim = AimTable::for_distance(&config, 12.0)?;

    // Manual mode: one untimed shot per call
    let mut session = DrillSession::builder()
        .config(&config)
        .rig(build_rig(&config))
        .aim(aim.clone())
        .delay(InstantDelay)
        .build()?;

    session.start()?;
    println!("Session {}", session.state());

    for (zone, mph) in [(Zone::TopRight, 35.0), (Zone::BottomLeft, 50.0), (Zone::CenterMiddle, 40.0)] {
        let report = session.fire_shot(ShotCommand::new(zone, Mph(mph))?)?;
        println!(
            "  ball {}: {} at {} mph -> {}% duty, yaw {:?}, pitch {:?}",
            report.number, report.zone, report.exit_speed.0, report.duty_percent, report.yaw, report.pitch
        );
        println!(
            "    offsets: yaw {} pulses, pitch {} pulses",
            session.yaw_offset().0,
            session.pitch_offset().0
        );
    }

    session.stop()?;
    println!("Session {} after {} shots\n", session.state(), session.shots_fired());

    // Automated mode on a worker thread
    println!("=== Drill on a worker thread ===\n");

    let drill = DrillDefinition::from_shots(
        "four_corners",
        Seconds(3.0),
        &[
            ShotCommand::new(Zone::TopLeft, Mph(45.0))?,
            ShotCommand::new(Zone::TopRight, Mph(45.0))?,
            ShotCommand::new(Zone::BottomRight, Mph(45.0))?,
            ShotCommand::new(Zone::BottomLeft, Mph(45.0))?,
        ],
    )?;

    let session = DrillSession::builder()
        .config(&config)
        .rig(build_rig(&config))
        .aim(aim)
        .delay(InstantDelay)
        .drill(drill)
        .build()?;

    let worker = SessionWorker::spawn_drill(session)?;
    for event in worker.events().iter() {
        match event {
            SessionEvent::DrillRunning(running) => println!("  drill running: {}", running),
            SessionEvent::BallAdvanced(report) => {
                println!("  ball {} -> {}", report.number, report.zone)
            }
        }
    }
    let summary = worker.join()?;
    println!(
        "\nDrill finished: {} shots, stopped early: {}",
        summary.shots_fired, summary.stopped_early
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
