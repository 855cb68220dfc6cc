//! Runs a session on its own thread.
//!
//! The caller keeps a [`StopHandle`] and an event receiver. Stop requests are
//! honoured between shots; the shot in progress always completes and the rig
//! is always shut down before the thread exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::actuator::ActuatorSet;
use crate::aim::TrajectoryProvider;
use crate::error::{Result, SessionError};
use crate::profile::SessionRecorder;
use crate::sequencing::{DrillSession, SessionReport, ShotCommand, ShotReport};

/// How often an idle manual session checks for a stop request.
const MANUAL_POLL: Duration = Duration::from_millis(50);

/// Progress reported by a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Whether shots are being fired. `true` follows a successful start;
    /// `false` is sent exactly once, after the rig has been shut down.
    DrillRunning(bool),
    /// A ball has been fired.
    BallAdvanced(ShotReport),
}

/// Requests a running session to stop after the current shot.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the session to stop.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A session running on a background thread.
pub struct SessionWorker {
    stop: StopHandle,
    events: Receiver<SessionEvent>,
    handle: JoinHandle<Result<SessionReport>>,
}

impl SessionWorker {
    /// Start the session and run its loaded drill on a new thread.
    pub fn spawn_drill<R, A, D, L>(mut session: DrillSession<R, A, D, L>) -> Result<Self>
    where
        R: ActuatorSet + Send + 'static,
        A: TrajectoryProvider + Send + 'static,
        D: DelayNs + Send + 'static,
        L: SessionRecorder + Send + 'static,
    {
        let stop = StopHandle::default();
        let flag = stop.clone();
        let (tx, events) = mpsc::channel();

        let handle = spawn("drill-session", move || {
            if let Err(err) = session.start() {
                log::warn!("drill session failed to start: {}", err);
                let _ = tx.send(SessionEvent::DrillRunning(false));
                return Err(err);
            }
            let _ = tx.send(SessionEvent::DrillRunning(true));

            let result = session.run_drill(&flag.0, |report| {
                let _ = tx.send(SessionEvent::BallAdvanced(*report));
            });
            let _ = tx.send(SessionEvent::DrillRunning(false));
            if let Err(err) = &result {
                log::warn!("drill session ended with error: {}", err);
            }
            result
        })?;

        Ok(Self {
            stop,
            events,
            handle,
        })
    }

    /// Start the session and fire each shot sent on the returned channel.
    ///
    /// The session stops when a stop is requested or the sender is dropped.
    pub fn spawn_manual<R, A, D, L>(mut session: DrillSession<R, A, D, L>) -> Result<(Self, Sender<ShotCommand>)>
    where
        R: ActuatorSet + Send + 'static,
        A: TrajectoryProvider + Send + 'static,
        D: DelayNs + Send + 'static,
        L: SessionRecorder + Send + 'static,
    {
        let stop = StopHandle::default();
        let flag = stop.clone();
        let (tx, events) = mpsc::channel();
        let (shot_tx, shots) = mpsc::channel::<ShotCommand>();

        let handle = spawn("manual-session", move || {
            if let Err(err) = session.start() {
                let _ = tx.send(SessionEvent::DrillRunning(false));
                return Err(err);
            }
            let _ = tx.send(SessionEvent::DrillRunning(true));

            let mut failure = None;
            while !flag.is_stop_requested() {
                match shots.recv_timeout(MANUAL_POLL) {
                    Ok(shot) => match session.fire_shot(shot) {
                        Ok(report) => {
                            let _ = tx.send(SessionEvent::BallAdvanced(report));
                        }
                        Err(err) => {
                            log::warn!("manual shot failed: {}", err);
                            failure = Some(err);
                            break;
                        }
                    },
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            let stopped = session.stop();
            let _ = tx.send(SessionEvent::DrillRunning(false));
            if let Some(err) = failure {
                return Err(err);
            }
            stopped?;
            Ok(SessionReport {
                shots_fired: session.shots_fired(),
                stopped_early: flag.is_stop_requested(),
            })
        })?;

        Ok((
            Self {
                stop,
                events,
                handle,
            },
            shot_tx,
        ))
    }

    /// Handle for requesting a stop from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request a stop after the current shot.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Progress events.
    pub fn events(&self) -> &Receiver<SessionEvent> {
        &self.events
    }

    /// Wait for the session thread to finish.
    ///
    /// A panic on the session thread is resumed on the caller.
    pub fn join(self) -> Result<SessionReport> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

fn spawn<F>(name: &str, body: F) -> Result<JoinHandle<Result<SessionReport>>>
where
    F: FnOnce() -> Result<SessionReport> + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(body)
        .map_err(|err| {
            log::warn!("could not spawn {}: {}", name, err);
            SessionError::DriverUnavailable("session thread").into()
        })
}
