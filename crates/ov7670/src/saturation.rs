//! Colour saturation through the UV matrix gains.
//!
//! One signed level scales six colour-matrix coefficients along a shared
//! linear formula (integer maths, `/` truncates toward zero):
//!
//! | Register | Value                 |
//! |----------|-----------------------|
//! | MTX1 0x4F | `0x80 + 0x20·s`      |
//! | MTX2 0x50 | `0x80 + 0x20·s`      |
//! | MTX3 0x51 | `0x00`               |
//! | MTX4 0x52 | `0x22 + (0x11·s)/2`  |
//! | MTX5 0x53 | `0x5E + (0x2F·s)/2`  |
//! | MTX6 0x54 | `0x80 + 0x20·s`      |
//! | MTXS 0x58 | `0x9E`               |
//!
//! `s = 0` gives the factory gains. Levels are not clamped: a result outside
//! 0–255 keeps only its low byte, exactly as the register would.

use crate::program::RegisterWrite;
use crate::registers::{REG_MTX1, REG_MTX2, REG_MTX3, REG_MTX4, REG_MTX5, REG_MTX6, REG_MTXS};

/// Signed saturation level; 0 is the sensor default.
///
/// Useful levels are roughly −4..=3; beyond that MTX1/2/6 wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SaturationLevel(i32);

impl SaturationLevel {
    /// Factory default gains.
    pub const DEFAULT: Self = Self(0);

    /// Wrap a raw level. Not range-checked.
    #[must_use]
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    /// Return the raw level.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The seven register writes for this level, in the order MTX1..MTX6, MTXS.
    #[must_use]
    pub const fn encode(self) -> [RegisterWrite; 7] {
        let s = self.0;
        let gain = low_byte(0x80_i32.wrapping_add(0x20_i32.wrapping_mul(s)));
        let mtx4 = low_byte(0x22_i32.wrapping_add(0x11_i32.wrapping_mul(s).wrapping_div(2)));
        let mtx5 = low_byte(0x5E_i32.wrapping_add(0x2F_i32.wrapping_mul(s).wrapping_div(2)));
        [
            RegisterWrite::new(REG_MTX1, gain),
            RegisterWrite::new(REG_MTX2, gain),
            RegisterWrite::new(REG_MTX3, 0x00),
            RegisterWrite::new(REG_MTX4, mtx4),
            RegisterWrite::new(REG_MTX5, mtx5),
            RegisterWrite::new(REG_MTX6, gain),
            RegisterWrite::new(REG_MTXS, 0x9E),
        ]
    }
}

impl From<i32> for SaturationLevel {
    fn from(level: i32) -> Self {
        Self(level)
    }
}

/// Keep the low eight bits, two's complement.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn low_byte(value: i32) -> u8 {
    value as u8
}
