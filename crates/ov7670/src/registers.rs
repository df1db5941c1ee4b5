//! OV7670 register map (the subset this driver touches)
//!
//! Source: OmniVision OV7670/OV7171 datasheet v1.4 and implementation guide
//! v1.0. Registers not named here are written as opaque constants by the mode
//! programs.
//!
//! # SCCB
//!
//! The sensor answers on 7-bit address `0x21` (`0x42` write / `0x43` read in
//! 8-bit notation). A register write is a single two-byte transfer:
//! `[register, value]`. SCCB tolerates a missing ACK on the data phase, but
//! most MCU I2C peripherals do not, so a NACK surfaces as a bus error.
//!
//! # Split window fields
//!
//! HSTART/HSTOP hold bits \[10:3\] of the horizontal window edges, with the
//! low three bits of both packed into HREF. VSTART/VSTOP hold bits \[9:2\] of
//! the vertical edges, with the low two bits packed into VREF.

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Vertical frame control — low bits of VSTART (\[1:0\]) and VSTOP (\[3:2\]).
pub const REG_VREF: u8 = 0x03;

/// Common control 3 — scale enable, DCW enable.
pub const REG_COM3: u8 = 0x0C;

/// Internal clock prescaler.
///
/// Bit 7 reserved (set to 1 by the mode programs), bit 6 selects the external
/// clock directly, bits \[5:0\] divide it: `F(internal) = F(input) / (CLKRC[5:0] + 1)`.
pub const REG_CLKRC: u8 = 0x11;

/// Common control 7 — bit 7 soft reset, bit 2 RGB output.
pub const REG_COM7: u8 = 0x12;

/// Common control 8 — AGC/AWB/AEC enables.
pub const REG_COM8: u8 = 0x13;

/// Common control 10 — HREF/VSYNC/PCLK polarity and gating.
pub const REG_COM10: u8 = 0x15;

/// Output format horizontal frame start, bits \[10:3\].
pub const REG_HSTART: u8 = 0x17;

/// Output format horizontal frame stop, bits \[10:3\].
pub const REG_HSTOP: u8 = 0x18;

/// Output format vertical frame start, bits \[9:2\].
pub const REG_VSTART: u8 = 0x19;

/// Output format vertical frame stop, bits \[9:2\].
pub const REG_VSTOP: u8 = 0x1A;

/// HREF control — low bits of HSTART (\[2:0\]) and HSTOP (\[5:3\]), edge offset (\[7:6\]).
pub const REG_HREF: u8 = 0x32;

/// Common control 14 — DCW/PCLK scaling enable, PCLK divider.
pub const REG_COM14: u8 = 0x3E;

/// Common control 11 — night mode, banding filter.
pub const REG_COM11: u8 = 0x3B;

/// Common control 15 — output range and RGB555/565 selection.
pub const REG_COM15: u8 = 0x40;

/// Matrix coefficient 1 (first of the six UV gain coefficients).
pub const REG_MTX1: u8 = 0x4F;

/// Matrix coefficient 2.
pub const REG_MTX2: u8 = 0x50;

/// Matrix coefficient 3.
pub const REG_MTX3: u8 = 0x51;

/// Matrix coefficient 4.
pub const REG_MTX4: u8 = 0x52;

/// Matrix coefficient 5.
pub const REG_MTX5: u8 = 0x53;

/// Matrix coefficient 6.
pub const REG_MTX6: u8 = 0x54;

/// Matrix coefficient sign bits and auto-contrast centre.
pub const REG_MTXS: u8 = 0x58;

/// AWB control 3 (value 0x9F selects simple AWB in the mode programs).
pub const REG_AWBCTR0: u8 = 0x6F;

/// Horizontal scale factor; bit 7 = test pattern bit 0.
pub const REG_SCALING_XSC: u8 = 0x70;

/// Vertical scale factor; bit 7 = test pattern bit 1.
pub const REG_SCALING_YSC: u8 = 0x71;

/// DCW control — horizontal and vertical down-sampling.
pub const REG_SCALING_DCWCTR: u8 = 0x72;

/// DSP scaling clock divider.
pub const REG_SCALING_PCLK_DIV: u8 = 0x73;

/// Scaling output pixel clock delay.
pub const REG_SCALING_PCLK_DELAY: u8 = 0xA2;

/// ABLC enable (undocumented, 0x00 in the QQVGA program).
pub const REG_ABLC1: u8 = 0xAB;

/// Reserved — 0x84 is required for correct colour (implementation guide).
pub const REG_RSVD_B0: u8 = 0xB0;

// ---------------------------------------------------------------------------
// Register field values
// ---------------------------------------------------------------------------

/// COM7: reset all registers to their default values.
pub const COM7_RESET: u8 = 0b1000_0000;

/// COM7: RGB output format.
pub const COM7_RGB: u8 = 0b0000_0100;

/// COM15: output range \[00\] to \[FF\].
pub const COM15_R00FF: u8 = 0b1100_0000;

/// COM15: RGB565 (only meaningful with COM7_RGB).
pub const COM15_RGB565: u8 = 0b0001_0000;

/// COM8: fast AGC/AEC, unlimited step, banding filter, AGC, AWB and AEC enabled.
pub const COM8_AUTO_ALL: u8 = 0xE7;

/// SCALING_YSC bit 7: with SCALING_XSC bit 7 clear, selects the 8-bar colour test pattern.
pub const YSC_TEST_PATTERN: u8 = 0x80;

/// SCALING_YSC default vertical scale factor.
pub const YSC_DEFAULT_SCALE: u8 = 0x35;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn window_registers_match_datasheet() {
        assert_eq!(REG_HSTART, 0x17);
        assert_eq!(REG_HSTOP, 0x18);
        assert_eq!(REG_HREF, 0x32);
        assert_eq!(REG_VSTART, 0x19);
        assert_eq!(REG_VSTOP, 0x1A);
        assert_eq!(REG_VREF, 0x03);
    }

    #[test]
    fn rgb565_full_range_is_0xd0() {
        assert_eq!(COM15_R00FF | COM15_RGB565, 0xD0);
    }

    #[test]
    fn matrix_registers_are_contiguous() {
        let mtx = [REG_MTX1, REG_MTX2, REG_MTX3, REG_MTX4, REG_MTX5, REG_MTX6];
        for pair in mtx.windows(2) {
            assert_eq!(pair[0] + 1, pair[1]);
        }
    }

    #[test]
    fn reset_and_rgb_bits_do_not_overlap() {
        assert_eq!(COM7_RESET & COM7_RGB, 0);
    }
}
