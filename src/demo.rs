//! The display demo.
//!
//! The demo is an uninterruptible phase: it blocks the main loop for its
//! whole run (a little over 20 seconds) and no input is sampled meanwhile.
//! It is a non-interactive flourish, so nothing needs servicing.

use crate::display::{DisplayText, ScrollWindows};
use crate::hardware::CharDisplay;
use embedded_hal::delay::DelayNs;

/// Full-panel frames cycled at the start of the demo.
pub const PATTERN_FRAMES: [&str; 4] = [
    "--------",
    "\\\\\\\\\\\\\\\\",
    "11111111",
    "////////",
];

/// How many times the frame cycle repeats.
pub const PATTERN_ROUNDS: usize = 20;

/// Time each frame stays up.
pub const PATTERN_FRAME_MS: u32 = 50;

/// The printable character set scrolled after the frames.
pub const BANNER: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_";

/// Time each scroll position stays up.
pub const SCROLL_STEP_MS: u32 = 250;

/// Shows every frame of the demo, blocking until it is over.
pub fn run<D: CharDisplay, Y: DelayNs>(display: &mut D, delay: &mut Y) {
    debug!("demo start");
    for _ in 0..PATTERN_ROUNDS {
        for frame in PATTERN_FRAMES {
            display.write_text(&DisplayText::new(frame));
            delay.delay_ms(PATTERN_FRAME_MS);
        }
    }
    scroll(display, delay, BANNER);
    debug!("demo end");
}

/// Scrolls `text` across the panel from right to left, blocking until the
/// last character has left.
pub fn scroll<D: CharDisplay, Y: DelayNs>(display: &mut D, delay: &mut Y, text: &str) {
    for window in ScrollWindows::new(text) {
        display.write_text(&window);
        delay.delay_ms(SCROLL_STEP_MS);
    }
}
