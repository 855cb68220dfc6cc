//! HLFB confirmation against pins that follow a simulated clock.
//!
//! The real drivers are wired to HLFB lines that drop when commanded and rise
//! at a fixed time, so edges can land before the confirmation wait starts.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use shot_sequencer::actuator::{Actuator, ActuatorId, ClearPathAxis, ClearPathFlywheel};
use shot_sequencer::config::{AxisConfig, FlywheelConfig};
use shot_sequencer::sequencing::{AxisTracker, FlywheelController};
use shot_sequencer::{Degrees, Mph};

/// Milliseconds since the test started.
#[derive(Clone, Default)]
struct Clock(Rc<Cell<u32>>);

impl Clock {
    fn now(&self) -> u32 {
        self.0.get()
    }
}

struct ClockDelay(Clock);

impl DelayNs for ClockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let clock = &self.0 .0;
        clock.set(clock.get() + ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        let clock = &self.0 .0;
        clock.set(clock.get() + ms);
    }
}

/// High outside `[low_from, high_from)`.
struct ClockHlfb {
    clock: Clock,
    low_from: u32,
    high_from: u32,
}

impl ErrorType for ClockHlfb {
    type Error = Infallible;
}

impl InputPin for ClockHlfb {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let t = self.clock.now();
        Ok(t < self.low_from || t >= self.high_from)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

struct NullPin;

impl ErrorType for NullPin {
    type Error = Infallible;
}

impl OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

struct NullPwm;

impl embedded_hal::pwm::ErrorType for NullPwm {
    type Error = Infallible;
}

impl SetDutyCycle for NullPwm {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
        Ok(())
    }
}

type Wheel = ClearPathFlywheel<NullPin, NullPwm, ClockHlfb, ClockDelay>;

fn wheel(id: ActuatorId, clock: &Clock, high_from: u32) -> Wheel {
    let hlfb = ClockHlfb {
        clock: clock.clone(),
        low_from: 0,
        high_from,
    };
    ClearPathFlywheel::new(id, NullPin, NullPwm, hlfb, ClockDelay(clock.clone()))
}

#[test]
fn bottom_wheel_at_speed_first_is_still_confirmed() {
    let clock = Clock::default();
    let mut top = wheel(ActuatorId::FlywheelTop, &clock, 40);
    let mut bottom = wheel(ActuatorId::FlywheelBottom, &clock, 20);
    top.energize().expect("energize top");
    bottom.energize().expect("energize bottom");

    let controller = FlywheelController::new(&FlywheelConfig::default());
    let confirmed = controller
        .set_speed(&mut top, &mut bottom, Mph(30.0))
        .expect("set speed");

    assert!(confirmed);
    assert_eq!(clock.now(), 40);

    // same speed again: both wheels are still at speed
    let confirmed = controller
        .set_speed(&mut top, &mut bottom, Mph(30.0))
        .expect("repeat speed");
    assert!(confirmed);
    assert_eq!(clock.now(), 40);
}

#[test]
fn short_move_finishing_during_pulses_is_confirmed() {
    let clock = Clock::default();
    let config = AxisConfig {
        degrees_per_pulse: 1.0,
        ..AxisConfig::default()
    };
    // two 30 ms pulses; the motor is done at 45 ms, before the last pulse ends
    let hlfb = ClockHlfb {
        clock: clock.clone(),
        low_from: 1,
        high_from: 45,
    };
    let mut axis = ClearPathAxis::new(
        ActuatorId::Yaw,
        NullPin,
        NullPin,
        hlfb,
        ClockDelay(clock.clone()),
        &config,
    );
    axis.energize().expect("energize");

    let mut tracker = AxisTracker::new(ActuatorId::Yaw, &config);
    let result = tracker
        .move_to(&mut axis, Degrees(0.0), Degrees(2.0))
        .expect("move");

    assert!(result.confirmed);
    assert_eq!(axis.position(), 2);
    // pulses only; the wait itself took no time
    assert_eq!(clock.now(), 60);
}
