//! Debounced push-button input with auto-repeat.
//!
//! Buttons are wired active-low: a pressed button reads [`PinLevel::Low`].
//! [`ButtonChannel::poll`] is level-triggered. A new raw level must hold for
//! longer than the debounce window before it becomes the stable level, so
//! contact chatter never produces extra presses.

use crate::time::{TimeDuration, TimeInstant};
use embedded_hal::digital::InputPin;

/// Logic level of a sampled input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    /// Released (pull-up).
    High,
    /// Pressed.
    Low,
}

impl PinLevel {
    /// Level of an active-low input given whether it reads low.
    pub fn from_is_low(is_low: bool) -> Self {
        if is_low { PinLevel::Low } else { PinLevel::High }
    }
}

/// How a consumed press came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// First action for a freshly debounced press.
    Single,
    /// Repeated action while the button is held past the repeat threshold.
    Repeat,
}

/// Debounce state for one physical button.
///
/// `handled` and `repeating` are cleared exactly when a new stable level is
/// committed. `repeating` is only ever set while the stable level stays
/// pressed for longer than the repeat threshold.
#[derive(Debug, Clone, Copy)]
pub struct ButtonChannel<I: TimeInstant> {
    raw: PinLevel,
    stable: PinLevel,
    last_change: Option<I>,
    handled: bool,
    repeating: bool,
    debounce: I::Duration,
    repeat_after: I::Duration,
}

impl<I: TimeInstant> ButtonChannel<I> {
    /// Creates a released channel.
    ///
    /// # Arguments
    /// * `debounce` - How long a new raw level must hold before it is committed
    /// * `repeat_after` - How long a press must hold before auto-repeat starts
    pub fn new(debounce: I::Duration, repeat_after: I::Duration) -> Self {
        Self {
            raw: PinLevel::High,
            stable: PinLevel::High,
            last_change: None,
            handled: false,
            repeating: false,
            debounce,
            repeat_after,
        }
    }

    /// Feeds one raw sample taken at `now`.
    pub fn poll(&mut self, level: PinLevel, now: I) {
        if level != self.raw {
            self.last_change = Some(now);
            self.raw = level;
        }

        let held_millis = match self.last_change {
            Some(since) => now.millis_since(since),
            None => u64::MAX,
        };

        if held_millis > self.debounce.as_millis() {
            if level != self.stable {
                self.stable = level;
                self.handled = false;
                self.repeating = false;
            } else if self.stable == PinLevel::Low && held_millis > self.repeat_after.as_millis() {
                self.repeating = true;
            }
        }
    }

    /// Samples `pin` and feeds the result to [`poll`](Self::poll).
    pub fn poll_pin<P: InputPin>(&mut self, pin: &mut P, now: I) -> Result<(), P::Error> {
        let level = PinLevel::from_is_low(pin.is_low()?);
        self.poll(level, now);
        Ok(())
    }

    /// Returns `true` once per debounced press and marks it handled.
    pub fn take_press(&mut self) -> bool {
        if self.is_pressed() && !self.handled {
            self.handled = true;
            true
        } else {
            false
        }
    }

    /// Like [`take_press`](Self::take_press), but keeps yielding
    /// [`Press::Repeat`] on every call while auto-repeat is active.
    ///
    /// Pacing of the repeats is the caller's job.
    pub fn take_press_or_repeat(&mut self) -> Option<Press> {
        if !self.is_pressed() {
            return None;
        }
        if self.repeating {
            self.handled = true;
            Some(Press::Repeat)
        } else if !self.handled {
            self.handled = true;
            Some(Press::Single)
        } else {
            None
        }
    }

    /// Debounced level is pressed.
    pub fn is_pressed(&self) -> bool {
        self.stable == PinLevel::Low
    }

    /// The current stable press has already produced an action.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// The button has been held past the auto-repeat threshold.
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Ms;

        fn duration_since(&self, earlier: Self) -> Ms {
            Ms(self.0 - earlier.0)
        }
    }

    fn channel() -> ButtonChannel<At> {
        ButtonChannel::new(Ms(50), Ms(2000))
    }

    #[test]
    fn press_commits_only_after_window() {
        let mut button = channel();
        button.poll(PinLevel::Low, At(1000));
        button.poll(PinLevel::Low, At(1050));
        assert!(!button.is_pressed());

        button.poll(PinLevel::Low, At(1051));
        assert!(button.is_pressed());
    }

    #[test]
    fn take_press_fires_once() {
        let mut button = channel();
        button.poll(PinLevel::Low, At(0));
        button.poll(PinLevel::Low, At(60));

        assert!(button.take_press());
        assert!(!button.take_press());
        assert_eq!(button.take_press_or_repeat(), None);
    }

    #[test]
    fn released_channel_yields_nothing() {
        let mut button = channel();
        button.poll(PinLevel::High, At(500));
        assert!(!button.take_press());
        assert_eq!(button.take_press_or_repeat(), None);
    }
}
