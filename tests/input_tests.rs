//! Integration tests for ButtonChannel debounce and auto-repeat

mod common;
use common::*;

use alpha_clock::{ButtonChannel, PinLevel, Press};

fn channel() -> ButtonChannel<TestInstant> {
    ButtonChannel::new(TestDuration(50), TestDuration(2000))
}

/// Polls `level` once per millisecond over `start..end`.
fn poll_range(button: &mut ButtonChannel<TestInstant>, level: PinLevel, start: u64, end: u64) {
    for t in start..end {
        button.poll(level, TestInstant(t));
    }
}

#[test]
fn chatter_shorter_than_window_never_commits() {
    let mut button = channel();

    // Contact bounce: flip every 10 ms for half a second
    for t in 0..500u64 {
        let level = if (t / 10) % 2 == 0 { PinLevel::Low } else { PinLevel::High };
        button.poll(level, TestInstant(t));
        assert!(!button.is_pressed(), "committed during chatter at {} ms", t);
    }

    assert!(!button.take_press());
}

#[test]
fn stable_level_commits_after_debounce_window() {
    let mut button = channel();
    poll_range(&mut button, PinLevel::Low, 100, 151);
    assert!(!button.is_pressed());

    button.poll(PinLevel::Low, TestInstant(151));
    assert!(button.is_pressed());
    assert!(!button.is_handled());
    assert!(!button.is_repeating());
}

#[test]
fn bounce_restarts_the_window() {
    let mut button = channel();
    poll_range(&mut button, PinLevel::Low, 0, 40);
    button.poll(PinLevel::High, TestInstant(40));
    poll_range(&mut button, PinLevel::Low, 41, 91);

    // Only 50 ms since the last raw transition at 41
    assert!(!button.is_pressed());
    button.poll(PinLevel::Low, TestInstant(92));
    assert!(button.is_pressed());
}

#[test]
fn one_press_one_action() {
    let mut button = channel();
    poll_range(&mut button, PinLevel::Low, 0, 200);

    assert!(button.take_press());
    for _ in 0..10 {
        assert!(!button.take_press());
    }

    // Release and press again
    poll_range(&mut button, PinLevel::High, 200, 300);
    assert!(!button.is_pressed());
    poll_range(&mut button, PinLevel::Low, 300, 400);
    assert!(button.take_press());
}

#[test]
fn repeat_starts_after_hold_threshold() {
    let mut button = channel();
    poll_range(&mut button, PinLevel::Low, 0, 2001);
    assert!(button.is_pressed());
    assert!(!button.is_repeating());

    button.poll(PinLevel::Low, TestInstant(2001));
    assert!(button.is_repeating());
}

#[test]
fn repeat_holds_until_release_commits() {
    let mut button = channel();
    poll_range(&mut button, PinLevel::Low, 0, 2500);
    assert!(button.is_repeating());

    // Released, but the release is still inside the debounce window
    poll_range(&mut button, PinLevel::High, 2500, 2551);
    assert!(button.is_repeating());
    assert!(button.is_pressed());

    button.poll(PinLevel::High, TestInstant(2551));
    assert!(!button.is_pressed());
    assert!(!button.is_repeating());
}

#[test]
fn take_press_or_repeat_yields_single_then_repeats() {
    let mut button = channel();
    poll_range(&mut button, PinLevel::Low, 0, 100);
    assert_eq!(button.take_press_or_repeat(), Some(Press::Single));
    assert_eq!(button.take_press_or_repeat(), None);

    poll_range(&mut button, PinLevel::Low, 100, 2100);
    assert_eq!(button.take_press_or_repeat(), Some(Press::Repeat));
    assert_eq!(button.take_press_or_repeat(), Some(Press::Repeat));
}

#[test]
fn each_channel_times_its_own_hold() {
    let mut first = channel();
    let mut second = channel();

    poll_range(&mut first, PinLevel::Low, 0, 1500);
    poll_range(&mut second, PinLevel::High, 0, 1500);
    for t in 1500..2600u64 {
        first.poll(PinLevel::Low, TestInstant(t));
        second.poll(PinLevel::Low, TestInstant(t));
    }

    assert!(first.is_repeating());
    assert!(second.is_pressed());
    assert!(!second.is_repeating());
}
