//! End-to-end bring-up against the host mocks.
//!
//! Every mock records into one `BusLog`, so these tests check the exact
//! interleaving: XCLK before any sync read, sync before any register write,
//! settle delays between the right writes, capture hand-off last.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use camera_platform::mocks::{BusEvent, BusLog, MockCapture, MockClock, MockDelay, MockI2c, MockSyncPin};
use camera_platform::{CameraPins, Resolution};
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use ov7670::program::{QQQVGA_RGB565, QQVGA_RGB565, QQVGA_TIMING_FIX, QQVGA_SCALING};
use ov7670::{Action, CaptureMode, Ov7670, SensorConfig, SensorError, SensorParts, SyncWait};

type Parts = SensorParts<MockI2c, MockSyncPin, MockClock, MockDelay>;

fn parts(log: &BusLog, vsync: MockSyncPin) -> Parts {
    SensorParts::new(
        MockI2c::new(log),
        vsync.logging_to(log),
        MockClock::new(log),
        MockDelay::new(log),
    )
}

fn program_events(program: &ov7670::RegisterProgram) -> Vec<BusEvent> {
    program
        .actions()
        .map(|a| match a {
            Action::Write(w) => BusEvent::Write {
                address: 0x21,
                bytes: vec![w.address, w.value],
            },
            Action::Settle(ms) => BusEvent::DelayMs(ms),
        })
        .collect()
}

#[test]
fn qqvga_bring_up_issues_writes_and_settles_in_order() {
    let log = BusLog::new();
    let mut capture = MockCapture::new(&log);

    let sensor = Ov7670::start(
        CaptureMode::Qqvga,
        parts(&log, MockSyncPin::pulse(2, 3)),
        SensorConfig::default(),
        &mut capture,
    )
    .unwrap();

    let events = log.events();
    assert_eq!(
        events[0],
        BusEvent::ClockEnabled {
            pin: 32,
            frequency_hz: 10_000_000
        }
    );

    // 2 low, 3 high, 1 low
    let sync_reads = log.sync_reads();
    assert_eq!(sync_reads, 6);
    assert!(events[1..=sync_reads]
        .iter()
        .all(|e| matches!(e, BusEvent::SyncRead(_))));

    let program_start = 1 + sync_reads;
    let expected = program_events(&QQVGA_RGB565);
    assert_eq!(&events[program_start..program_start + expected.len()], expected.as_slice());

    assert_eq!(
        events.last(),
        Some(&BusEvent::CaptureInit {
            resolution: Resolution::QQVGA,
            pins: CameraPins::default(),
        })
    );
    assert_eq!(sensor.resolution(), Resolution::new(160, 120));
}

#[test]
fn qqvga_program_finishes_with_timing_fix_then_long_settles() {
    let log = BusLog::new();
    let sensor = Ov7670::new(CaptureMode::Qqvga, parts(&log, MockSyncPin::pulse(0, 1)), SensorConfig::default())
        .enable_clock()
        .unwrap()
        .await_sync()
        .unwrap()
        .configure()
        .unwrap();

    let writes = log.register_writes();
    let fix: Vec<(u8, u8)> = QQVGA_TIMING_FIX.writes().map(|w| (w.address, w.value)).collect();
    assert_eq!(&writes[writes.len() - fix.len()..], fix.as_slice());

    let delays = log.delays_ms();
    assert_eq!(delays.first(), Some(&100));
    assert_eq!(&delays[delays.len() - 2..], &[200, 200]);
    assert_eq!(delays.iter().sum::<u32>(), 580);

    drop(sensor);
}

#[test]
fn qqqvga_bring_up_uses_its_own_program() {
    let log = BusLog::new();
    let mut capture = MockCapture::new(&log);

    Ov7670::start(
        CaptureMode::Qqqvga,
        parts(&log, MockSyncPin::pulse(0, 1)),
        SensorConfig::default(),
        &mut capture,
    )
    .unwrap();

    let expected: Vec<(u8, u8)> = QQQVGA_RGB565.writes().map(|w| (w.address, w.value)).collect();
    assert_eq!(log.register_writes(), expected);
    assert_eq!(log.delays_ms(), vec![10]);
    assert_eq!(capture.resolution(), Some(Resolution::QQQVGA));
}

#[test]
fn full_and_quarter_vga_write_nothing() {
    for mode in [CaptureMode::Vga, CaptureMode::Qvga] {
        let log = BusLog::new();
        let mut capture = MockCapture::new(&log);

        Ov7670::start(mode, parts(&log, MockSyncPin::pulse(0, 1)), SensorConfig::default(), &mut capture)
            .unwrap();

        assert!(log.register_writes().is_empty(), "{mode} must not touch registers");
        assert!(log.delays_ms().is_empty());
        assert_eq!(capture.resolution(), Some(mode.resolution()));
    }
}

#[test]
fn no_register_access_before_clock_and_sync() {
    let log = BusLog::new();
    let mut capture = MockCapture::new(&log);

    Ov7670::start(
        CaptureMode::Qqqvga,
        parts(&log, MockSyncPin::pulse(4, 4)),
        SensorConfig::default(),
        &mut capture,
    )
    .unwrap();

    let clock = log.position(|e| matches!(e, BusEvent::ClockEnabled { .. })).unwrap();
    let first_sync = log.position(|e| matches!(e, BusEvent::SyncRead(_))).unwrap();
    let first_write = log.position(|e| matches!(e, BusEvent::Write { .. })).unwrap();
    let last_sync = log
        .events()
        .iter()
        .rposition(|e| matches!(e, BusEvent::SyncRead(_)))
        .unwrap();

    assert!(clock < first_sync);
    assert!(last_sync < first_write);
}

#[test]
fn stuck_sync_line_times_out_after_configured_polls() {
    let log = BusLog::new();
    let config = SensorConfig::default().sync_wait(SyncWait::MaxPolls(25));

    let result = Ov7670::new(CaptureMode::Qqvga, parts(&log, MockSyncPin::stuck(false)), config)
        .enable_clock()
        .unwrap()
        .await_sync();

    assert!(matches!(result, Err(SensorError::SyncTimeout { polls: 25 })));
    assert_eq!(log.sync_reads(), 25);
    assert!(log.register_writes().is_empty());
}

#[test]
fn stuck_high_line_also_times_out() {
    let log = BusLog::new();
    let config = SensorConfig::default().sync_wait(SyncWait::MaxPolls(8));

    let result = Ov7670::new(CaptureMode::Qqvga, parts(&log, MockSyncPin::stuck(true)), config)
        .enable_clock()
        .unwrap()
        .await_sync();

    assert!(matches!(result, Err(SensorError::SyncTimeout { polls: 8 })));
}

#[test]
fn timed_sync_wait_sleeps_between_polls() {
    let log = BusLog::new();
    let config = SensorConfig::default().sync_wait(SyncWait::Timeout {
        poll_interval_us: 500,
        timeout_us: 2_000,
    });

    let result = Ov7670::new(CaptureMode::Qqvga, parts(&log, MockSyncPin::stuck(false)), config)
        .enable_clock()
        .unwrap()
        .await_sync();

    assert!(matches!(result, Err(SensorError::SyncTimeout { polls: 5 })));
    let sleeps: Vec<_> = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, BusEvent::DelayUs(500)))
        .collect();
    assert_eq!(sleeps.len(), 4);
}

#[test]
fn bus_error_aborts_the_program_at_the_failing_write() {
    let log = BusLog::new();
    let mut p = parts(&log, MockSyncPin::pulse(0, 1));
    p.i2c = MockI2c::new(&log).failing_after(3);
    let mut capture = MockCapture::new(&log);

    let result = Ov7670::start(CaptureMode::Qqvga, p, SensorConfig::default(), &mut capture);

    assert!(matches!(
        result,
        Err(SensorError::Bus(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)))
    ));
    // reset, CLKRC, COM11 made it; COM7=RGB did not
    assert_eq!(log.register_writes(), vec![(0x12, 0x80), (0x11, 0x81), (0x3B, 0x08)]);
    // the settle after the last good write ran, nothing after the failure
    assert_eq!(log.delays_ms(), vec![100, 10, 10]);
    assert_eq!(capture.resolution(), None);
}

#[test]
fn refused_clock_stops_before_sync() {
    let log = BusLog::new();
    let mut p = parts(&log, MockSyncPin::pulse(0, 1));
    p.xclk = MockClock::new(&log).refusing();

    let result = Ov7670::new(CaptureMode::Qqvga, p, SensorConfig::default()).enable_clock();

    assert!(matches!(result, Err(SensorError::Clock)));
    assert_eq!(log.sync_reads(), 0);
}

#[test]
fn refused_capture_surfaces_after_configuration() {
    let log = BusLog::new();
    let mut capture = MockCapture::new(&log).refusing();

    let result = Ov7670::start(
        CaptureMode::Qqqvga,
        parts(&log, MockSyncPin::pulse(0, 1)),
        SensorConfig::default(),
        &mut capture,
    );

    assert!(matches!(result, Err(SensorError::Capture)));
    assert_eq!(log.register_writes().len(), QQQVGA_RGB565.writes().count());
}

#[test]
fn capture_receives_custom_pins() {
    let log = BusLog::new();
    let mut pins = CameraPins::default();
    pins.xclk = 0;
    pins.vsync = 25;
    let mut capture = MockCapture::new(&log);

    Ov7670::start(
        CaptureMode::Qqvga,
        parts(&log, MockSyncPin::pulse(0, 1)),
        SensorConfig::with_pins(pins),
        &mut capture,
    )
    .unwrap();

    assert_eq!(
        log.events()[0],
        BusEvent::ClockEnabled {
            pin: 0,
            frequency_hz: 10_000_000
        }
    );
    assert!(log.events().contains(&BusEvent::CaptureInit {
        resolution: Resolution::QQVGA,
        pins,
    }));
}

#[test]
fn scaling_block_can_be_reapplied_after_configure() {
    let log = BusLog::new();
    let mut sensor = Ov7670::new(CaptureMode::Qvga, parts(&log, MockSyncPin::pulse(0, 1)), SensorConfig::default())
        .enable_clock()
        .unwrap()
        .await_sync()
        .unwrap()
        .configure()
        .unwrap();
    log.clear();

    sensor.apply(&QQVGA_SCALING).unwrap();

    let expected: Vec<(u8, u8)> = QQVGA_SCALING.writes().map(|w| (w.address, w.value)).collect();
    assert_eq!(log.register_writes(), expected);
    let parts = sensor.release();
    assert_eq!(parts.i2c.writes(), 7);
}

#[test]
fn out_of_band_xclk_is_still_requested() {
    let log = BusLog::new();
    let config = SensorConfig::default().xclk_hz(8_000_000);
    assert!(!config.xclk_in_datasheet_range());

    Ov7670::new(CaptureMode::Qqvga, parts(&log, MockSyncPin::pulse(0, 1)), config)
        .enable_clock()
        .unwrap();

    assert_eq!(
        log.events(),
        vec![BusEvent::ClockEnabled {
            pin: 32,
            frequency_hz: 8_000_000
        }]
    );
}

#[test]
fn conflicting_pin_map_still_brings_the_sensor_up() {
    let log = BusLog::new();
    let pins = CameraPins {
        pclk: 21,
        ..CameraPins::default()
    };
    assert!(pins.has_conflicts());
    let mut capture = MockCapture::new(&log);

    Ov7670::start(
        CaptureMode::Qqqvga,
        parts(&log, MockSyncPin::pulse(0, 1)),
        SensorConfig::with_pins(pins),
        &mut capture,
    )
    .unwrap();

    assert_eq!(capture.resolution(), Some(Resolution::QQQVGA));
    assert_eq!(Resolution::QQQVGA.rgb565_frame_bytes(), 9_600);
}
