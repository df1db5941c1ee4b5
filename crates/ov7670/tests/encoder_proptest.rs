//! Property-based tests for the register encoders.
//! Verifies invariants hold for ALL inputs in range, not just fixed examples.
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use ov7670::{FrameWindow, SaturationLevel};

proptest::proptest! {
    /// Every 10-bit window round-trips through its six registers.
    #[test]
    fn window_round_trips_for_ten_bit_edges(
        h_start in 0u16..=1023,
        h_stop in 0u16..=1023,
        v_start in 0u16..=1023,
        v_stop in 0u16..=1023,
    ) {
        let window = FrameWindow::new(h_start, h_stop, v_start, v_stop);
        let [a, b, c, d, e, f] = window.encode().map(|w| w.value);
        assert_eq!(FrameWindow::decode(a, b, c, d, e, f), window);
    }

    /// HREF and VREF only use their low-bit fields.
    #[test]
    fn packed_registers_stay_inside_their_fields(
        h_start in 0u16..=u16::MAX,
        h_stop in 0u16..=u16::MAX,
        v_start in 0u16..=u16::MAX,
        v_stop in 0u16..=u16::MAX,
    ) {
        let regs = FrameWindow::new(h_start, h_stop, v_start, v_stop).encode();
        assert_eq!(regs[2].value & 0b1100_0000, 0, "HREF[7:6] must stay clear");
        assert_eq!(regs[5].value & 0b1111_0000, 0, "VREF[7:4] must stay clear");
    }

    /// Encoding is a pure function of its input.
    #[test]
    fn window_encode_is_deterministic(
        h_start in 0u16..=u16::MAX,
        h_stop in 0u16..=u16::MAX,
        v_start in 0u16..=u16::MAX,
        v_stop in 0u16..=u16::MAX,
    ) {
        let window = FrameWindow::new(h_start, h_stop, v_start, v_stop);
        assert_eq!(window.encode(), window.encode());
    }

    /// Saturation never panics, whatever the level.
    #[test]
    fn saturation_encode_never_panics(level in i32::MIN..=i32::MAX) {
        let regs = SaturationLevel::new(level).encode();
        assert_eq!(regs[2].value, 0x00);
        assert_eq!(regs[6].value, 0x9E);
    }

    /// Inside the useful range the three gain coefficients are strictly increasing in the level.
    #[test]
    fn saturation_gain_grows_with_level(level in -4i32..=2) {
        let lower = SaturationLevel::new(level).encode();
        let higher = SaturationLevel::new(level + 1).encode();
        assert!(higher[0].value > lower[0].value,
            "MTX1 at level {} should exceed level {}", level + 1, level);
        assert!(higher[3].value >= lower[3].value);
        assert!(higher[4].value >= lower[4].value);
    }
}
