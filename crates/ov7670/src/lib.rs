//! OV7670 image sensor bring-up over SCCB/I2C
//!
//! Brings an OV7670 from power-on to a streaming RGB565 configuration:
//! start XCLK, wait for one VSYNC cycle, then apply the register program of
//! the requested [`CaptureMode`] and hand the resolution to the capture
//! pipeline.
//!
//! # Architecture
//!
//! ```text
//! CaptureMode ──program()──► RegisterProgram (static Step table)
//!                                  │ actions()
//!                                  ▼
//!          FrameWindow::encode ─► Action::Write / Action::Settle ◄─ SaturationLevel::encode
//!                                  │
//! Ov7670<Uninitialized> ─enable_clock─► <ClockEnabled> ─await_sync─► <SyncObserved>
//!                                  ─configure─► <Configured> ─► CapturePipeline::init
//! ```
//!
//! The register bus, VSYNC pin and delays are `embedded-hal` 1.0 traits; the
//! clock source and capture pipeline are the traits in `camera_platform`.
//!
//! # Features
//!
//! - `defmt`: defmt log frames and `defmt::Format` derives (hardware builds)
//! - `tracing`: `tracing` events (host / simulated bring-up)
//!
//! # Example
//!
//! ```no_run
//! use camera_platform::CapturePipeline;
//! use embedded_hal::{delay::DelayNs, digital::InputPin, i2c::I2c};
//! use ov7670::{CaptureMode, Ov7670, SensorConfig, SensorParts};
//!
//! fn bring_up<I, S, C, D, P>(parts: SensorParts<I, S, C, D>, pipeline: &mut P)
//! where
//!     I: I2c,
//!     S: InputPin,
//!     C: camera_platform::ClockSource,
//!     D: DelayNs,
//!     P: CapturePipeline,
//! {
//!     let config = SensorConfig::default();
//!     if let Ok(mut sensor) = Ov7670::start(CaptureMode::Qqvga, parts, config, pipeline) {
//!         let _ = sensor.enable_test_pattern();
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod controller;
pub mod error;
pub mod mode;
pub mod program;
pub mod registers;
pub mod saturation;
pub mod sync;
pub mod window;

pub use config::{SensorConfig, SyncWait, DEFAULT_XCLK_HZ, OV7670_I2C_ADDR};
pub use controller::{ClockEnabled, Configured, Ov7670, SensorParts, SyncObserved, Uninitialized};
pub use error::SensorError;
pub use mode::CaptureMode;
pub use program::{Action, RegisterProgram, RegisterWrite, Step};
pub use saturation::SaturationLevel;
pub use window::FrameWindow;
