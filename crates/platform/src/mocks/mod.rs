//! Mock implementations for testing
//!
//! This module provides host mocks of every collaborator the sensor driver
//! talks to. The bus, delay, clock and capture mocks can share one [`BusLog`]
//! so a test can assert the exact interleaving of register writes, settle
//! delays and clock/capture calls.

#![cfg(any(test, feature = "std"))]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

use crate::{CameraPins, CapturePipeline, ClockSource, Resolution};

/// One observable interaction with a mocked collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// `ClockSource::enable` was called.
    ClockEnabled {
        /// Output pin.
        pin: u8,
        /// Requested frequency.
        frequency_hz: u32,
    },
    /// The sync pin was sampled.
    SyncRead(bool),
    /// An I2C write reached the bus.
    Write {
        /// 7-bit device address.
        address: u8,
        /// Bytes written (register address first).
        bytes: Vec<u8>,
    },
    /// `DelayNs::delay_ms`.
    DelayMs(u32),
    /// `DelayNs::delay_us`.
    DelayUs(u32),
    /// `DelayNs::delay_ns`.
    DelayNs(u32),
    /// `CapturePipeline::init`.
    CaptureInit {
        /// Frame size handed over.
        resolution: Resolution,
        /// Pins handed over.
        pins: CameraPins,
    },
}

/// Shared, ordered record of [`BusEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct BusLog {
    events: Rc<RefCell<Vec<BusEvent>>>,
}

impl BusLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: BusEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of every recorded event.
    pub fn events(&self) -> Vec<BusEvent> {
        self.events.borrow().clone()
    }

    /// Every two-byte write as `(register, value)`, in bus order.
    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                BusEvent::Write { bytes, .. } => match bytes.as_slice() {
                    [reg, value] => Some((*reg, *value)),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }

    /// Millisecond delays, in order.
    pub fn delays_ms(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                BusEvent::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Number of sync pin samples taken.
    pub fn sync_reads(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, BusEvent::SyncRead(_)))
            .count()
    }

    /// Index of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&BusEvent) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(pred)
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

// ── I2C ──────────────────────────────────────────────────────────────────────

/// Error returned by [`MockI2c`] once its failure point is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

impl i2c::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
    }
}

/// Register bus mock — records writes, optionally NACKs after N writes.
pub struct MockI2c {
    log: BusLog,
    writes: usize,
    fail_after: Option<usize>,
}

impl MockI2c {
    /// Create a bus mock recording into `log`.
    pub fn new(log: &BusLog) -> Self {
        Self {
            log: log.clone(),
            writes: 0,
            fail_after: None,
        }
    }

    /// NACK every write after the first `writes` succeed.
    #[must_use]
    pub fn failing_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = MockBusError;
}

impl i2c::I2c for MockI2c {
    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    if self.fail_after.is_some_and(|limit| self.writes >= limit) {
                        return Err(MockBusError);
                    }
                    self.writes += 1;
                    self.log.push(BusEvent::Write {
                        address,
                        bytes: data.to_vec(),
                    });
                }
                // The sensor driver never reads back; answer with zeros.
                Operation::Read(buffer) => buffer.fill(0),
            }
        }
        Ok(())
    }
}

// ── Delay ────────────────────────────────────────────────────────────────────

/// Delay mock — returns immediately and records the requested duration.
pub struct MockDelay {
    log: BusLog,
}

impl MockDelay {
    /// Create a delay mock recording into `log`.
    pub fn new(log: &BusLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(BusEvent::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(BusEvent::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(BusEvent::DelayMs(ms));
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Error returned by [`MockClock`] and [`MockCapture`] when told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRefused;

/// XCLK mock.
pub struct MockClock {
    log: BusLog,
    refuse: bool,
    enabled: Option<(u8, u32)>,
}

impl MockClock {
    /// Create a clock mock recording into `log`.
    pub fn new(log: &BusLog) -> Self {
        Self {
            log: log.clone(),
            refuse: false,
            enabled: None,
        }
    }

    /// Make `enable` fail.
    #[must_use]
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// `(pin, frequency_hz)` of the last successful `enable`.
    pub fn enabled(&self) -> Option<(u8, u32)> {
        self.enabled
    }
}

impl ClockSource for MockClock {
    type Error = MockRefused;

    fn enable(&mut self, pin: u8, frequency_hz: u32) -> Result<(), Self::Error> {
        if self.refuse {
            return Err(MockRefused);
        }
        self.enabled = Some((pin, frequency_hz));
        self.log.push(BusEvent::ClockEnabled { pin, frequency_hz });
        Ok(())
    }
}

// ── Capture ──────────────────────────────────────────────────────────────────

/// Capture pipeline mock.
pub struct MockCapture {
    log: BusLog,
    refuse: bool,
    initialised: Option<Resolution>,
}

impl MockCapture {
    /// Create a capture mock recording into `log`.
    pub fn new(log: &BusLog) -> Self {
        Self {
            log: log.clone(),
            refuse: false,
            initialised: None,
        }
    }

    /// Make `init` fail.
    #[must_use]
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// Resolution passed to the last successful `init`.
    pub fn resolution(&self) -> Option<Resolution> {
        self.initialised
    }
}

impl CapturePipeline for MockCapture {
    type Error = MockRefused;

    fn init(&mut self, resolution: Resolution, pins: &CameraPins) -> Result<(), Self::Error> {
        if self.refuse {
            return Err(MockRefused);
        }
        self.initialised = Some(resolution);
        self.log.push(BusEvent::CaptureInit {
            resolution,
            pins: *pins,
        });
        Ok(())
    }
}

// ── Sync pin ─────────────────────────────────────────────────────────────────

/// Scripted VSYNC input.
///
/// Returns the queued levels in order, then the idle level forever.
pub struct MockSyncPin {
    script: heapless::Deque<bool, 64>,
    idle: bool,
    reads: usize,
    log: Option<BusLog>,
}

impl MockSyncPin {
    /// A line stuck at `level`; never produces an edge.
    pub fn stuck(level: bool) -> Self {
        Self {
            script: heapless::Deque::new(),
            idle: level,
            reads: 0,
            log: None,
        }
    }

    /// `low` samples low, `high` samples high, then low forever.
    ///
    /// Script length is capped at the queue capacity (64 samples).
    pub fn pulse(low: usize, high: usize) -> Self {
        let mut pin = Self::stuck(false);
        for _ in 0..low {
            pin.push_level(false);
        }
        for _ in 0..high {
            pin.push_level(true);
        }
        pin
    }

    /// Queue one more sample. Returns `false` once the script is full.
    pub fn push_level(&mut self, high: bool) -> bool {
        self.script.push_back(high).is_ok()
    }

    /// Also record every sample into `log`.
    #[must_use]
    pub fn logging_to(mut self, log: &BusLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// Number of samples taken so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl PinErrorType for MockSyncPin {
    type Error = core::convert::Infallible;
}

impl InputPin for MockSyncPin {
    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let level = self.script.pop_front().unwrap_or(self.idle);
        self.reads += 1;
        if let Some(log) = &self.log {
            log.push(BusEvent::SyncRead(level));
        }
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }
}
