//! Capture modes and their register programs.
//!
//! Every mode outputs RGB565. Only the two down-scaled modes carry a register
//! program; `Vga` and `Qvga` leave the sensor at its post-reset defaults.

use camera_platform::Resolution;

use crate::program::{RegisterProgram, QQQVGA_RGB565, QQVGA_RGB565};

/// Requested output frame size. Fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureMode {
    /// 640×480.
    Vga,
    /// 320×240.
    Qvga,
    /// 160×120.
    Qqvga,
    /// 80×60.
    Qqqvga,
}

impl CaptureMode {
    /// Every mode, largest first.
    pub const ALL: [Self; 4] = [Self::Vga, Self::Qvga, Self::Qqvga, Self::Qqqvga];

    /// Output frame size.
    #[must_use]
    pub const fn resolution(self) -> Resolution {
        match self {
            Self::Vga => Resolution::VGA,
            Self::Qvga => Resolution::QVGA,
            Self::Qqvga => Resolution::QQVGA,
            Self::Qqqvga => Resolution::QQQVGA,
        }
    }

    /// Register program for this mode, if the driver configures it.
    #[must_use]
    pub const fn program(self) -> Option<RegisterProgram> {
        match self {
            Self::Qqvga => Some(QQVGA_RGB565),
            Self::Qqqvga => Some(QQQVGA_RGB565),
            Self::Vga | Self::Qvga => None,
        }
    }

    /// Lower-case name, as accepted by [`FromStr`](core::str::FromStr).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vga => "vga",
            Self::Qvga => "qvga",
            Self::Qqvga => "qqvga",
            Self::Qqqvga => "qqqvga",
        }
    }
}

/// Returned when a mode name is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMode;

impl core::fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown capture mode (expected vga, qvga, qqvga or qqqvga)")
    }
}

impl core::str::FromStr for CaptureMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownMode)
    }
}

impl core::fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
