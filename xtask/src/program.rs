//! `xtask program`: inspect a mode's register program.
//!
//! Without `--simulate`, prints the expanded program as a table. With it,
//! runs a full bring-up against the host mocks and prints the bus trace, so a
//! program change can be diffed before it reaches hardware.

use anyhow::{anyhow, Result};
use camera_platform::mocks::{BusEvent, BusLog, MockCapture, MockClock, MockDelay, MockI2c, MockSyncPin};
use camera_platform::{CameraPins, Resolution};
use colored::Colorize;
use ov7670::{Action, CaptureMode, Ov7670, SensorConfig, SensorParts, SyncWait};

pub fn run(mode: CaptureMode, simulate: bool) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("📋 {mode} ({}×{})", mode.resolution().width, mode.resolution().height)
            .cyan()
            .bold()
    );
    println!();

    if simulate {
        simulate_bring_up(mode)
    } else {
        dump(mode);
        Ok(())
    }
}

fn dump(mode: CaptureMode) {
    let Some(program) = mode.program() else {
        println!("{}", "  No register program: sensor stays at reset defaults".yellow());
        println!();
        return;
    };

    println!("  {}", program.name().dimmed());
    let mut writes = 0usize;
    let mut settle_ms = 0u32;
    for (i, action) in program.actions().enumerate() {
        match action {
            Action::Write(w) => {
                writes += 1;
                println!("  {i:>3}  write  0x{:02X} <- 0x{:02X}", w.address, w.value);
            }
            Action::Settle(ms) => {
                settle_ms += ms;
                println!("  {i:>3}  {}", format!("settle {ms} ms").dimmed());
            }
        }
    }
    println!();
    println!(
        "{}",
        format!("✓ {writes} register writes, {settle_ms} ms of settle delays").green()
    );
    println!();
}

fn simulate_bring_up(mode: CaptureMode) -> Result<()> {
    let log = BusLog::new();
    let parts = SensorParts::new(
        MockI2c::new(&log),
        MockSyncPin::pulse(3, 3).logging_to(&log),
        MockClock::new(&log),
        MockDelay::new(&log),
    );
    let config = SensorConfig::default().sync_wait(SyncWait::MaxPolls(1_000));
    let mut capture = MockCapture::new(&log);

    Ov7670::start(mode, parts, config, &mut capture).map_err(|e| anyhow!("bring-up failed: {e}"))?;

    for event in log.events() {
        match event {
            BusEvent::ClockEnabled { pin, frequency_hz } => {
                println!("  {}", format!("xclk   pin {pin} @ {frequency_hz} Hz").cyan());
            }
            BusEvent::SyncRead(level) => {
                println!("  {}", format!("vsync  {}", if level { "high" } else { "low" }).dimmed());
            }
            BusEvent::Write { address, bytes } => {
                println!("  i2c    0x{address:02X} {bytes:02X?}");
            }
            BusEvent::DelayMs(ms) => println!("  {}", format!("delay  {ms} ms").dimmed()),
            BusEvent::DelayUs(us) => println!("  {}", format!("delay  {us} µs").dimmed()),
            BusEvent::DelayNs(ns) => println!("  {}", format!("delay  {ns} ns").dimmed()),
            BusEvent::CaptureInit { resolution, pins } => {
                println!("  {}", capture_summary(resolution, &pins).cyan());
                if pins.has_conflicts() {
                    println!("  {}", "⚠ pin map assigns one GPIO twice".yellow());
                }
            }
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "✓ Simulated bring-up: {} writes, {} sync polls",
            log.register_writes().len(),
            log.sync_reads()
        )
        .green()
    );
    println!();
    Ok(())
}

fn capture_summary(resolution: Resolution, pins: &CameraPins) -> String {
    format!(
        "capture {}×{} ({} B/frame) vsync={} href={} pclk={} data={:?}",
        resolution.width,
        resolution.height,
        resolution.rgb565_frame_bytes(),
        pins.vsync,
        pins.href,
        pins.pclk,
        pins.data
    )
}
