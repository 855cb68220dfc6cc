//! HLFB (high-level feedback) latching.
//!
//! ClearPath drops HLFB while a move or speed change is in progress and
//! raises it once done. Drivers arm a [`HlfbLatch`] when they command and
//! sample it whenever they get the chance, so an edge that happens before
//! the confirmation wait starts is still counted.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// How often HLFB is sampled while waiting (ms).
pub const HLFB_POLL_MS: u32 = 5;

/// HLFB history since the last command.
///
/// Settles on the first high sample that follows a low one. Once settled it
/// stays settled until re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HlfbLatch {
    seen_low: bool,
    settled: bool,
}

impl HlfbLatch {
    /// Forget everything seen so far.
    #[inline]
    pub fn arm(&mut self) {
        *self = Self::default();
    }

    /// Whether HLFB has come back high since the last `arm`.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Read `pin` once and fold the level in. No read once settled.
    pub fn sample<P: InputPin>(&mut self, pin: &mut P) -> Result<bool, P::Error> {
        if self.settled {
            return Ok(true);
        }
        if pin.is_high()? {
            self.settled = self.seen_low;
        } else {
            self.seen_low = true;
        }
        Ok(self.settled)
    }
}

/// Block until `latch` settles, or `timeout_ms` elapses.
///
/// Samples once on entry, then every [`HLFB_POLL_MS`]. Returns `Ok(false)`
/// on timeout.
pub fn wait_for_settle<P, D>(
    pin: &mut P,
    latch: &mut HlfbLatch,
    delay: &mut D,
    timeout_ms: u32,
) -> Result<bool, P::Error>
where
    P: InputPin,
    D: DelayNs,
{
    if latch.sample(pin)? {
        return Ok(true);
    }

    let mut elapsed_ms = 0u32;
    while elapsed_ms < timeout_ms {
        let step = HLFB_POLL_MS.min(timeout_ms - elapsed_ms);
        delay.delay_ms(step);
        elapsed_ms += step;

        if latch.sample(pin)? {
            return Ok(true);
        }
    }

    Ok(false)
}
