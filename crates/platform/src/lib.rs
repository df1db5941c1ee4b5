//! Hardware Abstraction Layer (HAL) for OV7670 camera bring-up
//!
//! This crate holds the seams between the sensor driver and the hardware it
//! does not own the logic of: the XCLK generator and the parallel capture
//! pipeline. The register bus, the VSYNC input and the settle delays use the
//! `embedded-hal` 1.0 traits directly.
//!
//! # Architecture Layers
//!
//! ```text
//! Application / board bring-up
//!         ↓
//! ov7670 (register sequencing, mode programs, encoders)
//!         ↓
//! Platform HAL (this crate - collaborator traits + shared types)
//!         ↓
//! Hardware Layer (MCU HAL: I2C, LEDC/PWM clock, I2S/DCMI capture)
//! ```
//!
//! # Features
//!
//! - `std`: host mocks of every collaborator ([`mocks`])
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use camera_platform::{CameraPins, CapturePipeline, Resolution};
//!
//! fn hand_off<P: CapturePipeline>(pipeline: &mut P) {
//!     let _ = pipeline.init(Resolution::QQVGA, &CameraPins::default());
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // pin and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod capture;
pub mod clock;
pub mod mocks;

pub use capture::{CameraPins, CapturePipeline, Resolution};
pub use clock::ClockSource;
