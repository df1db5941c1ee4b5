//! Parallel capture pipeline boundary
//!
//! Once the sensor is configured, the frame geometry and the parallel
//! data/sync pin assignment are handed to the capture pipeline (I2S camera
//! mode on ESP32, DCMI on STM32). The pipeline receives the pixel data; the
//! sensor driver never reads pixels itself.

/// Output frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    /// Horizontal pixels per line.
    pub width: u16,
    /// Lines per frame.
    pub height: u16,
}

impl Resolution {
    /// 640×480.
    pub const VGA: Self = Self::new(640, 480);
    /// 320×240.
    pub const QVGA: Self = Self::new(320, 240);
    /// 160×120.
    pub const QQVGA: Self = Self::new(160, 120);
    /// 80×60.
    pub const QQQVGA: Self = Self::new(80, 60);

    /// Create a resolution from width and height.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of pixels in one frame.
    #[must_use]
    pub const fn pixel_count(self) -> u32 {
        // u16 × u16 always fits in u32
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.width as u32 * self.height as u32
        }
    }

    /// Bytes in one RGB565 frame (two bytes per pixel).
    ///
    /// Wider than [`pixel_count`](Self::pixel_count): a 65535 × 65535 frame
    /// needs 33 bits.
    #[must_use]
    pub const fn rgb565_frame_bytes(self) -> u64 {
        // u32 × 2 always fits in u64
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.pixel_count() as u64 * 2
        }
    }
}

/// Pin assignment of the camera module.
///
/// SIOD/SIOC are owned by the register bus and XCLK by the clock source; they
/// are listed here so the capture pipeline can avoid them.
///
/// # Default wiring (ESP32, I2S camera mode)
///
/// | Signal | GPIO |
/// |--------|------|
/// | SIOD   | 21   |
/// | SIOC   | 22   |
/// | VSYNC  | 34   |
/// | HREF   | 35   |
/// | XCLK   | 32   |
/// | PCLK   | 33   |
/// | D0..D7 | 27, 17, 16, 15, 14, 13, 12, 4 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraPins {
    /// SCCB data.
    pub siod: u8,
    /// SCCB clock.
    pub sioc: u8,
    /// Vertical sync output of the sensor.
    pub vsync: u8,
    /// Horizontal reference (line valid) output of the sensor.
    pub href: u8,
    /// External clock input of the sensor.
    pub xclk: u8,
    /// Pixel clock output of the sensor.
    pub pclk: u8,
    /// Parallel data lines, D0 first.
    pub data: [u8; 8],
}

impl Default for CameraPins {
    fn default() -> Self {
        Self {
            siod: 21,
            sioc: 22,
            vsync: 34,
            href: 35,
            xclk: 32,
            pclk: 33,
            data: [27, 17, 16, 15, 14, 13, 12, 4],
        }
    }
}

impl CameraPins {
    /// Whether any GPIO number appears twice in the assignment.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        let mut seen: heapless::Vec<u8, 14> = heapless::Vec::new();
        let control = [self.siod, self.sioc, self.vsync, self.href, self.xclk, self.pclk];
        for pin in control.iter().chain(self.data.iter()) {
            if seen.contains(pin) {
                return true;
            }
            // Capacity is exactly the number of pins
            let _ = seen.push(*pin);
        }
        false
    }
}

/// Receiver of the sensor's parallel pixel stream.
pub trait CapturePipeline {
    /// Error type
    type Error: core::fmt::Debug;

    /// Prepare to receive frames of `resolution` on `pins`.
    ///
    /// Called once, after the sensor has been configured.
    fn init(&mut self, resolution: Resolution, pins: &CameraPins) -> Result<(), Self::Error>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn standard_resolutions_halve_each_step() {
        assert_eq!(Resolution::QVGA.width * 2, Resolution::VGA.width);
        assert_eq!(Resolution::QQVGA.height * 2, Resolution::QVGA.height);
        assert_eq!(Resolution::QQQVGA, Resolution::new(80, 60));
    }

    #[test]
    fn rgb565_frame_is_two_bytes_per_pixel() {
        assert_eq!(Resolution::QQVGA.pixel_count(), 19_200);
        assert_eq!(Resolution::QQVGA.rgb565_frame_bytes(), 38_400);
        assert_eq!(Resolution::VGA.rgb565_frame_bytes(), 614_400);
    }

    #[test]
    fn default_pins_do_not_conflict() {
        assert!(!CameraPins::default().has_conflicts());
    }

    #[test]
    fn duplicate_pin_is_a_conflict() {
        let pins = CameraPins {
            pclk: 21,
            ..CameraPins::default()
        };
        assert!(pins.has_conflicts());
    }
}
