//! Controller configuration.
//!
//! | Setting      | Default     | Notes                                   |
//! |--------------|-------------|-----------------------------------------|
//! | I2C address  | 0x21        | 7-bit; 0x42/0x43 on the wire            |
//! | XCLK         | 10 MHz      | Datasheet minimum; 10–48 MHz allowed    |
//! | Sync wait    | `Forever`   | Busy poll until a VSYNC high→low edge   |
//! | Pins         | ESP32 map   | See [`CameraPins`]                      |

use camera_platform::clock::xclk_in_range;
use camera_platform::CameraPins;

/// OV7670 7-bit SCCB address. Hardware-fixed.
pub const OV7670_I2C_ADDR: u8 = 0x21;

/// XCLK frequency the driver requests by default.
pub const DEFAULT_XCLK_HZ: u32 = 10_000_000;

/// How long [`await_sync`](crate::Ov7670::await_sync) may poll VSYNC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncWait {
    /// Poll without limit and without yielding. A sensor that never produces
    /// VSYNC hangs the caller.
    #[default]
    Forever,
    /// Give up after this many pin reads in total.
    MaxPolls(u32),
    /// Sleep `poll_interval_us` between reads; give up once the slept time
    /// reaches `timeout_us`.
    Timeout {
        /// Pause between two reads.
        poll_interval_us: u32,
        /// Total time budget.
        timeout_us: u32,
    },
}

impl SyncWait {
    /// Maximum number of reads allowed, or `None` for unbounded.
    ///
    /// A zero poll interval with a timeout degenerates to a single read.
    #[must_use]
    pub const fn poll_limit(self) -> Option<u32> {
        match self {
            Self::Forever => None,
            Self::MaxPolls(n) => Some(n),
            Self::Timeout {
                poll_interval_us,
                timeout_us,
            } => match timeout_us.checked_div(poll_interval_us) {
                Some(n) => Some(n.saturating_add(1)),
                None => Some(1),
            },
        }
    }

    /// Pause between reads in microseconds (0 = busy poll).
    #[must_use]
    pub const fn poll_interval_us(self) -> u32 {
        match self {
            Self::Timeout {
                poll_interval_us, ..
            } => poll_interval_us,
            Self::Forever | Self::MaxPolls(_) => 0,
        }
    }
}

/// Everything the controller needs besides its hardware handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// 7-bit register bus address.
    pub i2c_address: u8,
    /// Frequency requested from the clock source.
    pub xclk_hz: u32,
    /// Sync wait policy.
    pub sync_wait: SyncWait,
    /// Module pin assignment.
    pub pins: CameraPins,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            i2c_address: OV7670_I2C_ADDR,
            xclk_hz: DEFAULT_XCLK_HZ,
            sync_wait: SyncWait::Forever,
            pins: CameraPins::default(),
        }
    }
}

impl SensorConfig {
    /// Default configuration with a custom pin map.
    #[must_use]
    pub fn with_pins(pins: CameraPins) -> Self {
        Self {
            pins,
            ..Self::default()
        }
    }

    /// Replace the sync wait policy.
    #[must_use]
    pub const fn sync_wait(mut self, sync_wait: SyncWait) -> Self {
        self.sync_wait = sync_wait;
        self
    }

    /// Replace the XCLK frequency.
    #[must_use]
    pub const fn xclk_hz(mut self, xclk_hz: u32) -> Self {
        self.xclk_hz = xclk_hz;
        self
    }

    /// Replace the bus address (for address translators or muxes).
    #[must_use]
    pub const fn i2c_address(mut self, i2c_address: u8) -> Self {
        self.i2c_address = i2c_address;
        self
    }

    /// Whether [`xclk_hz`](Self::xclk_hz) lies in the 10–48 MHz datasheet band.
    ///
    /// Out-of-band clocks are still requested; the controller only warns.
    #[must_use]
    pub const fn xclk_in_datasheet_range(&self) -> bool {
        xclk_in_range(self.xclk_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_datasheet() {
        let config = SensorConfig::default();
        assert_eq!(config.i2c_address, 0x21);
        assert_eq!(config.xclk_hz, 10_000_000);
        assert_eq!(config.sync_wait, SyncWait::Forever);
        assert_eq!(config.pins.xclk, 32);
    }

    #[test]
    fn builders_replace_single_fields() {
        let config = SensorConfig::default()
            .sync_wait(SyncWait::MaxPolls(5))
            .xclk_hz(24_000_000);
        assert_eq!(config.sync_wait, SyncWait::MaxPolls(5));
        assert_eq!(config.xclk_hz, 24_000_000);
        assert_eq!(config.i2c_address, OV7670_I2C_ADDR);
    }

    #[test]
    fn default_xclk_is_inside_the_datasheet_band() {
        assert!(SensorConfig::default().xclk_in_datasheet_range());
        assert!(SensorConfig::default().xclk_hz(48_000_000).xclk_in_datasheet_range());
        assert!(!SensorConfig::default().xclk_hz(8_000_000).xclk_in_datasheet_range());
        assert!(!SensorConfig::default().xclk_hz(50_000_000).xclk_in_datasheet_range());
    }

    #[test]
    fn forever_has_no_poll_limit() {
        assert_eq!(SyncWait::Forever.poll_limit(), None);
        assert_eq!(SyncWait::Forever.poll_interval_us(), 0);
    }

    #[test]
    fn timeout_converts_to_polls() {
        let wait = SyncWait::Timeout {
            poll_interval_us: 100,
            timeout_us: 1_000,
        };
        // reads at t = 0, 100, ..., 1000
        assert_eq!(wait.poll_limit(), Some(11));
        assert_eq!(wait.poll_interval_us(), 100);
    }

    #[test]
    fn zero_interval_timeout_reads_once() {
        let wait = SyncWait::Timeout {
            poll_interval_us: 0,
            timeout_us: 1_000,
        };
        assert_eq!(wait.poll_limit(), Some(1));
    }
}
