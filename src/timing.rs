//! Cooperative countdowns and the interrupt tick signal.
//!
//! [`ModeTimeout`] and [`BlinkTimer`] count loop iterations, so their
//! granularity is whatever period the caller runs the loop at (about 1 ms on
//! the device). [`TickSignal`] is the only state touched from interrupt
//! context.

use crate::time::{TimeDuration, TimeInstant};
use crate::types::OperationMode;
use core::cell::Cell;
use critical_section::Mutex;

/// Countdown that switches the clock to a target mode when it runs out.
///
/// `remaining == 0` means inactive. Re-arming overwrites any pending target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeTimeout {
    remaining: u16,
    target: OperationMode,
}

impl ModeTimeout {
    /// Starts (or cancels, with `ticks == 0`) the countdown.
    pub fn arm(&mut self, ticks: u16, target: OperationMode) {
        self.remaining = ticks;
        self.target = target;
    }

    /// Advances one loop iteration.
    ///
    /// Returns the target exactly once, on the iteration the countdown
    /// reaches zero.
    pub fn tick(&mut self) -> Option<OperationMode> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.remaining == 0 { Some(self.target) } else { None }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    pub fn target(&self) -> OperationMode {
        self.target
    }
}

/// Visibility of the field under edit for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPhase {
    /// Field shown.
    On,
    /// Field blanked.
    Off,
}

/// Blink cadence for the field under edit.
///
/// Rearming shows the field; when the countdown expires the field is
/// blanked until the next rearm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTimer {
    remaining: u16,
    period: u16,
}

impl BlinkTimer {
    pub fn new(period: u16) -> Self {
        Self {
            remaining: 0,
            period,
        }
    }

    pub fn rearm(&mut self) {
        self.remaining = self.period;
    }

    /// Advances one loop iteration. Returns `true` on expiry (1 → 0), which
    /// calls for a redraw with the field blanked.
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            0 => false,
            1 => {
                self.remaining = 0;
                true
            }
            _ => {
                self.remaining -= 1;
                false
            }
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        if self.remaining > 0 {
            BlinkPhase::On
        } else {
            BlinkPhase::Off
        }
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }
}

/// One-bit mailbox from the RTC square-wave interrupt to the main loop.
///
/// Meant to live in a `static`; the interrupt handler calls
/// [`signal`](Self::signal) and nothing else.
pub struct TickSignal {
    pending: Mutex<Cell<bool>>,
}

impl TickSignal {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    /// Records a tick. Safe to call from interrupt context.
    pub fn signal(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(true));
    }

    /// Consumes a pending tick, if any.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).replace(false))
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Software stand-in for the RTC's 1 Hz tick when no RTC is present.
#[derive(Debug, Clone, Copy)]
pub struct SoftTick<I: TimeInstant> {
    last: Option<I>,
    period: I::Duration,
}

impl<I: TimeInstant> SoftTick<I> {
    pub fn new(period: I::Duration) -> Self {
        Self { last: None, period }
    }

    /// Restarts the period at `now`.
    pub fn reset(&mut self, now: I) {
        self.last = Some(now);
    }

    /// Returns `true` once at least one full period has passed since the
    /// last firing, and starts the next period at `now`.
    pub fn poll(&mut self, now: I) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };
        if now.millis_since(last) >= self.period.as_millis() {
            self.last = Some(now);
            true
        } else {
            false
        }
    }
}
