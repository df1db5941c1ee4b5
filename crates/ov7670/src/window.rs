//! Output frame window encoding.
//!
//! The sensor addresses its output window in split fields: the high bits of
//! each edge sit in their own register, the low bits of a start/stop pair
//! share one register.
//!
//! ```text
//! HSTART = h_start >> 3                 HREF[5:3] = h_stop  & 0b111
//! HSTOP  = h_stop  >> 3                 HREF[2:0] = h_start & 0b111
//! VSTART = v_start >> 2                 VREF[3:2] = v_stop  & 0b11
//! VSTOP  = v_stop  >> 2                 VREF[1:0] = v_start & 0b11
//! ```
//!
//! Inputs are not range-checked. Coordinates wider than the register fields
//! lose their upper bits when the high part is narrowed to a byte.
//!
//! HREF and VREF are written whole, so their other bits (HREF edge offset,
//! VREF AGC bits) are cleared by an encode.

use crate::program::RegisterWrite;
use crate::registers::{REG_HREF, REG_HSTART, REG_HSTOP, REG_VREF, REG_VSTART, REG_VSTOP};

/// Output window edges in sensor pixel-clock units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameWindow {
    /// First active column.
    pub h_start: u16,
    /// Column where HREF falls.
    pub h_stop: u16,
    /// First active line.
    pub v_start: u16,
    /// Line where the frame ends.
    pub v_stop: u16,
}

impl FrameWindow {
    /// Window used by the QQVGA program.
    pub const QQVGA: Self = Self::new(196, 52, 8, 488);

    /// Window used by the QQQVGA program.
    pub const QQQVGA: Self = Self::new(180, 32, 12, 492);

    /// Create a window from its four edges.
    #[must_use]
    pub const fn new(h_start: u16, h_stop: u16, v_start: u16, v_stop: u16) -> Self {
        Self {
            h_start,
            h_stop,
            v_start,
            v_stop,
        }
    }

    /// The six register writes for this window.
    ///
    /// Order: HSTART, HSTOP, HREF, VSTART, VSTOP, VREF.
    // Narrowing to the 8-bit register is the documented truncation.
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    #[must_use]
    pub const fn encode(self) -> [RegisterWrite; 6] {
        let href = ((self.h_stop & 0b111) << 3) | (self.h_start & 0b111);
        let vref = ((self.v_stop & 0b11) << 2) | (self.v_start & 0b11);
        [
            RegisterWrite::new(REG_HSTART, (self.h_start >> 3) as u8),
            RegisterWrite::new(REG_HSTOP, (self.h_stop >> 3) as u8),
            RegisterWrite::new(REG_HREF, href as u8),
            RegisterWrite::new(REG_VSTART, (self.v_start >> 2) as u8),
            RegisterWrite::new(REG_VSTOP, (self.v_stop >> 2) as u8),
            RegisterWrite::new(REG_VREF, vref as u8),
        ]
    }

    /// Reassemble a window from the values of its six registers.
    ///
    /// The inverse of [`encode`](Self::encode) for edges that fit the fields
    /// (horizontal below 2048, vertical below 1024). Extra bits in HREF/VREF
    /// are ignored.
    #[allow(clippy::arithmetic_side_effects)]
    #[must_use]
    pub const fn decode(hstart: u8, hstop: u8, href: u8, vstart: u8, vstop: u8, vref: u8) -> Self {
        Self {
            h_start: ((hstart as u16) << 3) | (href & 0b111) as u16,
            h_stop: ((hstop as u16) << 3) | ((href >> 3) & 0b111) as u16,
            v_start: ((vstart as u16) << 2) | (vref & 0b11) as u16,
            v_stop: ((vstop as u16) << 2) | ((vref >> 2) & 0b11) as u16,
        }
    }
}
