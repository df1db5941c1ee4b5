//! OV7670 bring-up typestate machine.
//!
//! Enforces the order the sensor needs before it accepts a register program:
//!
//! ```text
//! [Uninitialized] --enable_clock()--> [ClockEnabled] --await_sync()--> [SyncObserved]
//!        --configure()--> [Configured]
//! ```
//!
//! Without XCLK the sensor's SCCB port is dead and VSYNC never toggles; the
//! VSYNC edge is the signal that the frame timing generator is running. Writing
//! the program before either is a compile error.
//!
//! Every transition consumes the controller. On error the hardware handles are
//! dropped with it; there is no retry and no partial rollback, the program is
//! simply abandoned at the failing write.

use core::marker::PhantomData;

use camera_platform::{CapturePipeline, ClockSource, Resolution};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

use crate::config::SensorConfig;
use crate::error::SensorError;
use crate::mode::CaptureMode;
use crate::program::{Action, RegisterProgram, RegisterWrite};
use crate::registers::{REG_SCALING_YSC, YSC_DEFAULT_SCALE, YSC_TEST_PATTERN};
use crate::saturation::SaturationLevel;
use crate::sync::wait_for_vsync;
use crate::window::FrameWindow;

// ── State types (zero-sized) ──────────────────────────────────────────────────

/// Handles owned, nothing driven yet. The sensor has no clock.
pub struct Uninitialized;

/// XCLK running; VSYNC not yet seen.
pub struct ClockEnabled;

/// One VSYNC high→low cycle seen; registers not yet programmed.
pub struct SyncObserved;

/// Mode program applied; ready for the capture pipeline.
pub struct Configured;

// ── Hardware handles ─────────────────────────────────────────────────────────

/// The hardware the controller owns for its lifetime.
pub struct SensorParts<I2C, SYNC, CLK, D> {
    /// SCCB register bus.
    pub i2c: I2C,
    /// VSYNC input.
    pub vsync: SYNC,
    /// XCLK generator.
    pub xclk: CLK,
    /// Settle and poll delays.
    pub delay: D,
}

impl<I2C, SYNC, CLK, D> SensorParts<I2C, SYNC, CLK, D> {
    /// Bundle the four handles.
    pub fn new(i2c: I2C, vsync: SYNC, xclk: CLK, delay: D) -> Self {
        Self {
            i2c,
            vsync,
            xclk,
            delay,
        }
    }
}

// ── Controller ───────────────────────────────────────────────────────────────

/// OV7670 driver.
///
/// `State` is one of [`Uninitialized`], [`ClockEnabled`], [`SyncObserved`],
/// [`Configured`]. The capture mode is fixed at construction; switching modes
/// means [`release`](Ov7670::release) and a new controller.
pub struct Ov7670<State, I2C, SYNC, CLK, D> {
    mode: CaptureMode,
    config: SensorConfig,
    parts: SensorParts<I2C, SYNC, CLK, D>,
    _state: PhantomData<State>,
}

impl<State, I2C, SYNC, CLK, D> Ov7670<State, I2C, SYNC, CLK, D> {
    /// Requested capture mode.
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Output frame size for the capture mode.
    pub fn resolution(&self) -> Resolution {
        self.mode.resolution()
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    fn into_state<Next>(self) -> Ov7670<Next, I2C, SYNC, CLK, D> {
        Ov7670 {
            mode: self.mode,
            config: self.config,
            parts: self.parts,
            _state: PhantomData,
        }
    }
}

impl<State, I2C, SYNC, CLK, D> Ov7670<State, I2C, SYNC, CLK, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn write(&mut self, write: RegisterWrite) -> Result<(), SensorError> {
        #[cfg(feature = "defmt")]
        defmt::trace!("OV7670 reg {=u8:#x} <- {=u8:#x}", write.address, write.value);
        #[cfg(feature = "tracing")]
        tracing::trace!(register = write.address, value = write.value, "register write");

        self.parts
            .i2c
            .write(self.config.i2c_address, &[write.address, write.value])
            .map_err(SensorError::bus)
    }

    fn run(&mut self, program: &RegisterProgram) -> Result<(), SensorError> {
        #[cfg(feature = "defmt")]
        defmt::info!("OV7670: applying program {=str}", program.name());
        #[cfg(feature = "tracing")]
        tracing::info!(program = program.name(), "applying register program");

        for action in program.actions() {
            match action {
                Action::Write(write) => self.write(write)?,
                Action::Settle(ms) => self.parts.delay.delay_ms(ms),
            }
        }
        Ok(())
    }
}

impl<I2C, SYNC, CLK, D> Ov7670<Uninitialized, I2C, SYNC, CLK, D>
where
    I2C: I2c,
    SYNC: InputPin,
    CLK: ClockSource,
    D: DelayNs,
{
    /// Take ownership of the hardware. Touches nothing.
    pub fn new(mode: CaptureMode, parts: SensorParts<I2C, SYNC, CLK, D>, config: SensorConfig) -> Self {
        Self {
            mode,
            config,
            parts,
            _state: PhantomData,
        }
    }

    /// Full bring-up: clock, sync, program, then capture hand-off.
    ///
    /// The capture pipeline is initialised with the mode's resolution and the
    /// configured pins only after the program has been applied.
    pub fn start<P: CapturePipeline>(
        mode: CaptureMode,
        parts: SensorParts<I2C, SYNC, CLK, D>,
        config: SensorConfig,
        pipeline: &mut P,
    ) -> Result<Ov7670<Configured, I2C, SYNC, CLK, D>, SensorError> {
        if config.pins.has_conflicts() {
            #[cfg(feature = "defmt")]
            defmt::warn!("OV7670: pin map assigns one GPIO twice");
            #[cfg(feature = "tracing")]
            tracing::warn!(pins = ?config.pins, "pin map assigns one GPIO twice");
        }

        let sensor = Self::new(mode, parts, config)
            .enable_clock()?
            .await_sync()?
            .configure()?;

        pipeline
            .init(sensor.resolution(), &sensor.config.pins)
            .map_err(|_| SensorError::Capture)?;

        let resolution = sensor.resolution();
        #[cfg(feature = "defmt")]
        defmt::info!(
            "OV7670: capture pipeline initialised, {=u32} px, {=u64} B/frame",
            resolution.pixel_count(),
            resolution.rgb565_frame_bytes()
        );
        #[cfg(feature = "tracing")]
        tracing::info!(
            mode = sensor.mode.name(),
            pixels = resolution.pixel_count(),
            frame_bytes = resolution.rgb565_frame_bytes(),
            "capture pipeline initialised"
        );
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = resolution;

        Ok(sensor)
    }

    /// Start XCLK on the configured pin and frequency.
    pub fn enable_clock(mut self) -> Result<Ov7670<ClockEnabled, I2C, SYNC, CLK, D>, SensorError> {
        let pin = self.config.pins.xclk;
        let hz = self.config.xclk_hz;
        if !self.config.xclk_in_datasheet_range() {
            #[cfg(feature = "defmt")]
            defmt::warn!("OV7670: XCLK {=u32} Hz is outside 10-48 MHz", hz);
            #[cfg(feature = "tracing")]
            tracing::warn!(hz, "XCLK outside the 10-48 MHz datasheet band");
        }
        self.parts
            .xclk
            .enable(pin, hz)
            .map_err(|_| SensorError::Clock)?;

        #[cfg(feature = "defmt")]
        defmt::info!("OV7670: XCLK {=u32} Hz on pin {=u8}", hz, pin);
        #[cfg(feature = "tracing")]
        tracing::info!(pin, hz, "XCLK enabled");

        Ok(self.into_state())
    }
}

impl<I2C, SYNC, CLK, D> Ov7670<ClockEnabled, I2C, SYNC, CLK, D>
where
    I2C: I2c,
    SYNC: InputPin,
    CLK: ClockSource,
    D: DelayNs,
{
    /// Wait for VSYNC to go high and then low, under the configured
    /// [`SyncWait`](crate::SyncWait).
    pub fn await_sync(mut self) -> Result<Ov7670<SyncObserved, I2C, SYNC, CLK, D>, SensorError> {
        let wait = self.config.sync_wait;
        let result = wait_for_vsync(&mut self.parts.vsync, &mut self.parts.delay, wait);

        match result {
            Ok(_polls) => {
                #[cfg(feature = "defmt")]
                defmt::info!("OV7670: VSYNC observed after {=u32} polls", _polls);
                #[cfg(feature = "tracing")]
                tracing::info!(polls = _polls, "VSYNC observed");
                Ok(self.into_state())
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("OV7670: no VSYNC edge");
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "no VSYNC edge");
                Err(err)
            }
        }
    }
}

impl<I2C, SYNC, CLK, D> Ov7670<SyncObserved, I2C, SYNC, CLK, D>
where
    I2C: I2c,
    SYNC: InputPin,
    CLK: ClockSource,
    D: DelayNs,
{
    /// Apply the mode's register program, writes and settle delays in order.
    ///
    /// `Vga` and `Qvga` have no program; the sensor keeps its reset defaults
    /// and nothing is written.
    pub fn configure(mut self) -> Result<Ov7670<Configured, I2C, SYNC, CLK, D>, SensorError> {
        match self.mode.program() {
            Some(program) => self.run(&program)?,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("OV7670: no register program for this mode, sensor left at defaults");
                #[cfg(feature = "tracing")]
                tracing::warn!(mode = self.mode.name(), "no register program, sensor left at defaults");
            }
        }
        Ok(self.into_state())
    }
}

impl<I2C, SYNC, CLK, D> Ov7670<Configured, I2C, SYNC, CLK, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Rewrite the UV matrix for `level`.
    pub fn set_saturation(&mut self, level: SaturationLevel) -> Result<(), SensorError> {
        level.encode().into_iter().try_for_each(|w| self.write(w))
    }

    /// Move the output window.
    pub fn set_frame_window(&mut self, window: FrameWindow) -> Result<(), SensorError> {
        window.encode().into_iter().try_for_each(|w| self.write(w))
    }

    /// Replace the image with the 8-bar colour test pattern.
    pub fn enable_test_pattern(&mut self) -> Result<(), SensorError> {
        self.write(RegisterWrite::new(REG_SCALING_YSC, YSC_DEFAULT_SCALE | YSC_TEST_PATTERN))
    }

    /// Write one raw register.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), SensorError> {
        self.write(RegisterWrite::new(address, value))
    }

    /// Run an extra program (for example a scaling block) on top of the mode.
    pub fn apply(&mut self, program: &RegisterProgram) -> Result<(), SensorError> {
        self.run(program)
    }
}

impl<I2C, SYNC, CLK, D> Ov7670<Configured, I2C, SYNC, CLK, D> {
    /// Give the hardware back. XCLK is left running.
    pub fn release(self) -> SensorParts<I2C, SYNC, CLK, D> {
        self.parts
    }
}
