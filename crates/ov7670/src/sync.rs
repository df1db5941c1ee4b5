//! VSYNC edge detection.
//!
//! A running sensor toggles VSYNC once per frame. Seeing it go high and then
//! low again proves XCLK reaches the sensor and the frame timing generator is
//! alive, which is the precondition for register writes to stick.
//!
//! ```text
//!            ┌──────┐
//! VSYNC ─────┘      └──────
//!        AwaitHigh  AwaitLow  Observed
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::config::SyncWait;
use crate::error::SensorError;

/// Progress through one high→low VSYNC cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncPhase {
    /// Waiting for the line to read high.
    #[default]
    AwaitHigh,
    /// Seen high, waiting for it to fall.
    AwaitLow,
    /// Falling edge seen.
    Observed,
}

/// Edge detector fed one pin sample at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncGate {
    phase: SyncPhase,
}

impl SyncGate {
    /// Start waiting for the high level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SyncPhase::AwaitHigh,
        }
    }

    /// Feed one sample. Returns `true` once the falling edge has been seen.
    pub fn observe(&mut self, high: bool) -> bool {
        self.phase = match (self.phase, high) {
            (SyncPhase::AwaitHigh, true) => SyncPhase::AwaitLow,
            (SyncPhase::AwaitLow, false) | (SyncPhase::Observed, _) => SyncPhase::Observed,
            (phase, _) => phase,
        };
        self.phase == SyncPhase::Observed
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }
}

/// Poll `pin` until one high→low cycle is seen, under `wait`.
///
/// Returns the number of reads it took. With [`SyncWait::Forever`] this only
/// returns on success or a pin error.
pub fn wait_for_vsync<P, D>(pin: &mut P, delay: &mut D, wait: SyncWait) -> Result<u32, SensorError>
where
    P: InputPin,
    D: DelayNs,
{
    let limit = wait.poll_limit();
    let interval_us = wait.poll_interval_us();
    let mut gate = SyncGate::new();
    let mut polls: u32 = 0;

    loop {
        if limit.is_some_and(|max| polls >= max) {
            return Err(SensorError::SyncTimeout { polls });
        }

        let high = pin.is_high().map_err(SensorError::sync)?;
        polls = polls.saturating_add(1);
        if gate.observe(high) {
            return Ok(polls);
        }

        let more = limit.map_or(true, |max| polls < max);
        if interval_us > 0 && more {
            delay.delay_us(interval_us);
        }
    }
}
