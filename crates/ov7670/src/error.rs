//! Driver error type.
//!
//! Collaborator errors are reduced to their `embedded-hal` error kind (bus,
//! pin) or to a bare variant (clock, capture) at the call site, so the error
//! type does not carry the HAL's generic parameters.

use embedded_hal::{digital, i2c};
use thiserror_no_std::Error;

/// Everything that can stop sensor bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensorError {
    /// A register write was not accepted. The program stops at that write.
    #[error("register bus write failed: {0}")]
    Bus(i2c::ErrorKind),

    /// The VSYNC pin could not be read.
    #[error("sync pin read failed: {0}")]
    Sync(digital::ErrorKind),

    /// The clock source refused to start XCLK.
    #[error("clock source refused to start XCLK")]
    Clock,

    /// The capture pipeline refused the resolution/pin hand-off.
    #[error("capture pipeline initialisation failed")]
    Capture,

    /// No VSYNC high→low edge within the configured bound.
    #[error("no VSYNC edge after {polls} polls")]
    SyncTimeout {
        /// Pin reads performed before giving up.
        polls: u32,
    },
}

impl SensorError {
    /// Map a bus error through its [`i2c::Error::kind`].
    pub fn bus<E: i2c::Error>(err: E) -> Self {
        Self::Bus(err.kind())
    }

    /// Map a pin error through its [`digital::Error::kind`].
    pub fn sync<E: digital::Error>(err: E) -> Self {
        Self::Sync(err.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::NoAcknowledgeSource;

    #[derive(Debug)]
    struct Nack;

    impl i2c::Error for Nack {
        fn kind(&self) -> i2c::ErrorKind {
            i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    #[test]
    fn bus_errors_keep_their_kind() {
        assert_eq!(
            SensorError::bus(Nack),
            SensorError::Bus(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        );
    }

    #[test]
    fn timeout_message_names_the_poll_count() {
        let msg = SensorError::SyncTimeout { polls: 7 }.to_string();
        assert!(msg.contains('7'));
    }

    #[test]
    fn bus_and_pin_messages_use_the_kind_description() {
        let kind = i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
        let msg = SensorError::Bus(kind).to_string();
        assert_eq!(msg, format!("register bus write failed: {kind}"));
        assert!(!msg.contains("NoAcknowledge("), "{msg}");

        let msg = SensorError::Sync(digital::ErrorKind::Other).to_string();
        assert_eq!(msg, format!("sync pin read failed: {}", digital::ErrorKind::Other));
        assert!(!msg.ends_with("Other"), "{msg}");
    }
}
