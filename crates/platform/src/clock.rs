//! External clock (XCLK) abstraction
//!
//! The OV7670 has no internal oscillator. Until XCLK is running the sensor's
//! SCCB interface does not answer and VSYNC stays idle, so the clock must be
//! enabled before any register access and left running for the lifetime of
//! the driver.

/// Clock generator driving the sensor's XCLK input.
///
/// On an ESP32 this is typically an LEDC channel in 50% duty mode; on an STM32
/// an MCO output or a timer in PWM mode.
pub trait ClockSource {
    /// Error type
    type Error: core::fmt::Debug;

    /// Start a square wave of `frequency_hz` on output `pin`.
    ///
    /// Implementations must leave the clock running after this returns.
    fn enable(&mut self, pin: u8, frequency_hz: u32) -> Result<(), Self::Error>;
}

/// Lowest XCLK frequency the OV7670 datasheet allows (10 MHz).
pub const XCLK_MIN_HZ: u32 = 10_000_000;

/// Highest XCLK frequency the OV7670 datasheet allows (48 MHz).
pub const XCLK_MAX_HZ: u32 = 48_000_000;

/// Whether `frequency_hz` lies inside the datasheet's XCLK range.
#[must_use]
pub const fn xclk_in_range(frequency_hz: u32) -> bool {
    frequency_hz >= XCLK_MIN_HZ && frequency_hz <= XCLK_MAX_HZ
}
