//! Register programs as static data.
//!
//! A program is an ordered table of [`Step`]s: literal register writes,
//! settle delays, the two computed blocks (frame window, saturation) and
//! references to shared sub-tables (scaling, timing fix).
//! [`RegisterProgram::actions`] expands it, without allocating, into the
//! flat stream of bus writes and delays the controller executes.
//!
//! Order is part of the contract. CLKRC must land before anything that
//! depends on the internal clock, and the delays after the reset and the
//! clock-divider changes let the PLL settle; dropping them leaves PCLK
//! unstable.
//!
//! ## QQVGA RGB565 (160×120)
//! ```text
//! reset ─100ms─ CLKRC ─10─ COM11 ─10─ COM7 ─10─ COM15 ─10─ scaling ─10─
//! window ─10─ COM10 ─10─ colour block ─ scaling trim ─10─ timing fix ─200─200
//! ```
//!
//! ## QQQVGA RGB565 (80×60)
//! ```text
//! reset ─10ms─ CLKRC COM11 COM7 COM15 scaling window COM10 colour block PCLK_DELAY
//! ```

use core::iter::FusedIterator;

#[allow(clippy::wildcard_imports)]
use crate::registers::*;
use crate::saturation::SaturationLevel;
use crate::window::FrameWindow;

/// One register write: `(address, value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Register address.
    pub address: u8,
    /// Value written.
    pub value: u8,
}

impl RegisterWrite {
    /// Create a register write.
    #[must_use]
    pub const fn new(address: u8, value: u8) -> Self {
        Self { address, value }
    }
}

/// An entry in a program table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Write one literal value.
    Write(RegisterWrite),
    /// Wait at least this many milliseconds.
    Settle(u32),
    /// Write the six window registers for this window.
    Window(FrameWindow),
    /// Write the seven matrix registers for this level.
    Saturation(SaturationLevel),
    /// Run another step table here. Nests at most [`MAX_BLOCK_DEPTH`] deep.
    Block(&'static [Step]),
}

/// Deepest chain of [`Step::Block`]s the expander follows; deeper blocks are skipped.
pub const MAX_BLOCK_DEPTH: usize = 4;

/// What the controller does next: a bus write or a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Send this write over the register bus.
    Write(RegisterWrite),
    /// Block for this many milliseconds.
    Settle(u32),
}

/// An ordered, immutable register program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterProgram {
    name: &'static str,
    steps: &'static [Step],
}

impl RegisterProgram {
    /// Wrap a static step table.
    #[must_use]
    pub const fn new(name: &'static str, steps: &'static [Step]) -> Self {
        Self { name, steps }
    }

    /// Short human-readable name (used in logs and by xtask).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The step table as written.
    #[must_use]
    pub const fn steps(&self) -> &'static [Step] {
        self.steps
    }

    /// Expand window/saturation steps in place and iterate the result.
    #[must_use]
    pub fn actions(&self) -> Actions {
        Actions {
            steps: self.steps.iter(),
            blocks: heapless::Vec::new(),
            pending: [RegisterWrite::new(0, 0); 7],
            pending_len: 0,
            pending_pos: 0,
        }
    }

    /// Just the register writes, in order.
    pub fn writes(&self) -> impl Iterator<Item = RegisterWrite> {
        self.actions().filter_map(|a| match a {
            Action::Write(w) => Some(w),
            Action::Settle(_) => None,
        })
    }

    /// Sum of all settle delays in milliseconds.
    #[must_use]
    pub fn total_settle_ms(&self) -> u32 {
        self.actions().fold(0_u32, |acc, action| match action {
            Action::Settle(ms) => acc.saturating_add(ms),
            Action::Write(_) => acc,
        })
    }
}

/// Iterator returned by [`RegisterProgram::actions`].
#[derive(Debug, Clone)]
pub struct Actions {
    steps: core::slice::Iter<'static, Step>,
    blocks: heapless::Vec<core::slice::Iter<'static, Step>, MAX_BLOCK_DEPTH>,
    pending: [RegisterWrite; 7],
    pending_len: usize,
    pending_pos: usize,
}

impl Actions {
    fn stage(&mut self, writes: &[RegisterWrite]) {
        for (slot, w) in self.pending.iter_mut().zip(writes) {
            *slot = *w;
        }
        self.pending_len = writes.len().min(self.pending.len());
        self.pending_pos = 0;
    }
}

impl Iterator for Actions {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        loop {
            if self.pending_pos < self.pending_len {
                let write = self.pending.get(self.pending_pos).copied();
                self.pending_pos = self.pending_pos.saturating_add(1);
                if let Some(w) = write {
                    return Some(Action::Write(w));
                }
            }
            let step = match self.blocks.last_mut().map(Iterator::next) {
                Some(Some(step)) => step,
                Some(None) => {
                    self.blocks.pop();
                    continue;
                }
                None => self.steps.next()?,
            };
            match step {
                Step::Write(w) => return Some(Action::Write(*w)),
                Step::Settle(ms) => return Some(Action::Settle(*ms)),
                Step::Window(window) => self.stage(&window.encode()),
                Step::Saturation(level) => self.stage(&level.encode()),
                Step::Block(steps) => {
                    // Full stack: the block is dropped, see MAX_BLOCK_DEPTH
                    let _ = self.blocks.push(steps.iter());
                }
            }
        }
    }
}

impl FusedIterator for Actions {}

const fn w(address: u8, value: u8) -> Step {
    Step::Write(RegisterWrite::new(address, value))
}

// ---------------------------------------------------------------------------
// Scaling blocks
// ---------------------------------------------------------------------------

/// QQVGA down-scaling: DCW ÷4 both axes, PCLK ÷4.
pub const QQVGA_SCALING_STEPS: &[Step] = &[
    w(REG_COM3, 0x04),
    w(REG_COM14, 0x1A),
    w(REG_SCALING_XSC, 0x3A),
    w(REG_SCALING_YSC, 0x35),
    w(REG_SCALING_DCWCTR, 0x22),
    w(REG_SCALING_PCLK_DIV, 0xF2),
    w(REG_SCALING_PCLK_DELAY, 0x02),
];

/// QQQVGA down-scaling: DCW ÷8 both axes, PCLK ÷8.
pub const QQQVGA_SCALING_STEPS: &[Step] = &[
    w(REG_COM3, 0x04),
    w(REG_COM14, 0x1B),
    w(REG_SCALING_XSC, 0x3A),
    w(REG_SCALING_YSC, 0x35),
    w(REG_SCALING_DCWCTR, 0x33),
    w(REG_SCALING_PCLK_DIV, 0xF3),
    w(REG_SCALING_PCLK_DELAY, 0x02),
];

/// QQVGA scaling block on its own.
pub const QQVGA_SCALING: RegisterProgram = RegisterProgram::new("qqvga-scaling", QQVGA_SCALING_STEPS);

/// QQQVGA scaling block on its own.
pub const QQQVGA_SCALING: RegisterProgram =
    RegisterProgram::new("qqqvga-scaling", QQQVGA_SCALING_STEPS);

// ---------------------------------------------------------------------------
// Mode programs
// ---------------------------------------------------------------------------

const RGB565_FULL_RANGE: u8 = COM15_R00FF | COM15_RGB565;

/// Frame start/stop corrections found on real modules; not derivable from
/// the window formula and overriding the window written earlier.
pub const QQVGA_TIMING_FIX_STEPS: &[Step] = &[
    w(REG_COM10, 0x00),
    w(REG_HSTART, 0x13),
    w(REG_HSTOP, 0x01),
    w(REG_HREF, 0x80),
    w(REG_VSTART, 0x02),
    w(REG_VSTOP, 0x7A),
    w(REG_VREF, 0x0A),
];

/// QQVGA timing fix on its own.
pub const QQVGA_TIMING_FIX: RegisterProgram =
    RegisterProgram::new("qqvga-timing-fix", QQVGA_TIMING_FIX_STEPS);

const QQVGA_RGB565_STEPS: &[Step] = &[
    w(REG_COM7, COM7_RESET),
    Step::Settle(100),
    w(REG_CLKRC, 0b1000_0001),
    Step::Settle(10),
    w(REG_COM11, 0b1000),
    Step::Settle(10),
    w(REG_COM7, COM7_RGB),
    Step::Settle(10),
    w(REG_COM15, RGB565_FULL_RANGE),
    Step::Settle(10),
    Step::Block(QQVGA_SCALING_STEPS),
    Step::Settle(10),
    Step::Window(FrameWindow::QQVGA),
    Step::Settle(10),
    w(REG_COM10, 0x02),
    Step::Settle(10),
    // colour
    w(REG_RSVD_B0, 0x84),
    Step::Saturation(SaturationLevel::DEFAULT),
    w(REG_COM8, COM8_AUTO_ALL),
    w(REG_AWBCTR0, 0x9F),
    // scaling trim
    w(REG_COM3, 0x0C),
    w(REG_COM14, 0x1A),
    w(REG_SCALING_PCLK_DIV, 0xF2),
    w(REG_SCALING_PCLK_DELAY, 0x02),
    Step::Settle(10),
    w(REG_ABLC1, 0x00),
    w(REG_SCALING_YSC, 0x00),
    Step::Block(QQVGA_TIMING_FIX_STEPS),
    Step::Settle(200),
    Step::Settle(200),
];

const QQQVGA_RGB565_STEPS: &[Step] = &[
    w(REG_COM7, COM7_RESET),
    Step::Settle(10),
    w(REG_CLKRC, 0b1000_0000),
    w(REG_COM11, 0b1010),
    w(REG_COM7, COM7_RGB),
    w(REG_COM15, RGB565_FULL_RANGE),
    Step::Block(QQQVGA_SCALING_STEPS),
    Step::Window(FrameWindow::QQQVGA),
    w(REG_COM10, 0x00),
    // colour
    w(REG_RSVD_B0, 0x84),
    Step::Saturation(SaturationLevel::DEFAULT),
    w(REG_COM8, COM8_AUTO_ALL),
    w(REG_AWBCTR0, 0x9F),
    w(REG_SCALING_PCLK_DELAY, 0x02),
];

/// 160×120 RGB565, internal clock = XCLK / 2.
pub const QQVGA_RGB565: RegisterProgram = RegisterProgram::new("qqvga-rgb565", QQVGA_RGB565_STEPS);

/// 80×60 RGB565, internal clock = XCLK.
pub const QQQVGA_RGB565: RegisterProgram =
    RegisterProgram::new("qqqvga-rgb565", QQQVGA_RGB565_STEPS);
