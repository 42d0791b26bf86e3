//! The clock's mode state machine and main-loop iteration.
//!
//! [`AlphaClock`] owns every piece of mutable state (the explicit context
//! object) and all collaborators. The firmware calls
//! [`AlphaClock::service`] once per loop iteration, roughly every
//! millisecond, with freshly sampled button levels. The RTC square-wave
//! interrupt only touches the shared [`TickSignal`].
//!
//! Button 1 ("menu") and button 2 ("select") act per mode family:
//!
//! | Family     | Button 1                          | Button 2                         |
//! |------------|-----------------------------------|----------------------------------|
//! | Display    | open the menu                     | next display mode                |
//! | Menu       | next menu entry                   | run the entry's action           |
//! | Time/date  | increment the field (auto-repeat) | confirm the field, go to next    |
//! | Brightness | increment by 5 (auto-repeat)      | save and return to the time      |

use crate::calendar;
use crate::config::ClockConfig;
use crate::demo;
use crate::display::{self, DateEdit, DisplayText, EditBuffer, Snapshot, TimeEdit};
use crate::hardware::{Backlight, CharDisplay, RealTimeClock, SettingsStore};
use crate::input::{ButtonChannel, PinLevel, Press};
use crate::settings::BrightnessSetting;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::timing::{BlinkPhase, BlinkTimer, ModeTimeout, SoftTick, TickSignal};
use crate::types::{Brightness, ClockError, DateTime, OperationMode};
use embedded_hal::delay::DelayNs;

/// The collaborators handed to [`AlphaClock::new`].
pub struct ClockPeripherals<D, R, S, B, Y> {
    pub display: D,
    pub rtc: R,
    pub store: S,
    pub backlight: B,
    /// Used only for the deliberately blocking waits: startup messages, the
    /// `NO RTC` notice, auto-repeat pacing and the demo.
    pub delay: Y,
}

/// Operator-interaction core of the clock.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source and tick signal references
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `D` - Display transport
/// * `R` - Real-time clock
/// * `S` - Settings store
/// * `B` - Backlight
/// * `Y` - Blocking delay
pub struct AlphaClock<'t, I, T, D, R, S, B, Y>
where
    I: TimeInstant,
{
    display: D,
    rtc: Option<R>,
    store: S,
    backlight: B,
    delay: Y,
    time_source: &'t T,
    tick: &'t TickSignal,
    config: ClockConfig,
    mode: OperationMode,
    menu: ButtonChannel<I>,
    select: ButtonChannel<I>,
    mode_timeout: ModeTimeout,
    blink: BlinkTimer,
    soft_tick: SoftTick<I>,
    edit: EditBuffer,
    brightness: BrightnessSetting,
    redraw: bool,
}

impl<'t, I, T, D, R, S, B, Y> AlphaClock<'t, I, T, D, R, S, B, Y>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: CharDisplay,
    R: RealTimeClock,
    S: SettingsStore,
    B: Backlight,
    Y: DelayNs,
{
    /// Runs the startup sequence and returns a clock showing the time.
    ///
    /// Startup restores the saved brightness, probes the RTC once (an absent
    /// RTC stays absent for the whole session), resets an RTC that lost power
    /// to [`ClockConfig::fallback_date_time`] and starts its periodic tick.
    /// It then shows `INIT OK` followed by `RTC OK` or `NO RTC`, blocking for
    /// [`ClockConfig::splash_ms`] on each.
    pub fn new(
        peripherals: ClockPeripherals<D, R, S, B, Y>,
        time_source: &'t T,
        tick: &'t TickSignal,
        config: ClockConfig,
    ) -> Self {
        let ClockPeripherals {
            mut display,
            mut rtc,
            mut store,
            mut backlight,
            mut delay,
        } = peripherals;

        let brightness = BrightnessSetting::load(&mut store, config.brightness_slot);
        backlight.set_level(brightness.value().pwm_level());

        let rtc = if rtc.is_present() {
            if rtc.lost_power() {
                warn!("rtc lost power, resetting clock");
                rtc.adjust(&config.fallback_date_time);
            }
            rtc.enable_periodic_tick(config.rtc_tick_hz);
            Some(rtc)
        } else {
            None
        };

        display.write_text(&DisplayText::new("INIT OK"));
        delay.delay_ms(config.splash_ms);
        display.write_text(&DisplayText::new(if rtc.is_some() { "RTC OK" } else { "NO RTC" }));
        delay.delay_ms(config.splash_ms);
        info!(
            "clock started, rtc present: {}, brightness {}%",
            rtc.is_some(),
            brightness.value().percent()
        );

        let debounce = I::Duration::from_millis(config.debounce_ms);
        let repeat_after = I::Duration::from_millis(config.repeat_after_ms);
        let mut soft_tick = SoftTick::new(I::Duration::from_millis(config.soft_tick_ms));
        soft_tick.reset(time_source.now());

        Self {
            display,
            rtc,
            store,
            backlight,
            delay,
            time_source,
            tick,
            config,
            mode: OperationMode::Time,
            menu: ButtonChannel::new(debounce, repeat_after),
            select: ButtonChannel::new(debounce, repeat_after),
            mode_timeout: ModeTimeout::default(),
            blink: BlinkTimer::new(config.blink_ticks),
            soft_tick,
            edit: EditBuffer::Idle,
            brightness,
            redraw: true,
        }
    }

    /// One main-loop iteration.
    ///
    /// Samples the buttons, consumes the periodic tick, advances the blink
    /// and mode-timeout countdowns by one, then runs the handler of the
    /// current mode. Call it at a fixed period; countdowns are measured in
    /// calls.
    pub fn service(&mut self, menu: PinLevel, select: PinLevel) {
        let now = self.time_source.now();
        self.menu.poll(menu, now);
        self.select.poll(select, now);

        let ticked = if self.rtc.is_some() {
            self.tick.take()
        } else {
            self.soft_tick.poll(now)
        };
        if ticked {
            self.on_tick();
        }

        if self.blink.tick() {
            self.redraw = true;
        }

        if let Some(target) = self.mode_timeout.tick() {
            debug!("mode timeout: {} -> {}", self.mode, target);
            self.mode = target;
            self.redraw = true;
        }

        match self.mode {
            OperationMode::Time
            | OperationMode::Date
            | OperationMode::Year
            | OperationMode::Temperature => self.service_display_mode(),
            OperationMode::MenuDemo => self.service_menu_demo(),
            OperationMode::MenuSetTime => self.service_menu_set_time(),
            OperationMode::MenuSetDate => self.service_menu_set_date(),
            OperationMode::MenuSetBrightness => self.service_menu_set_brightness(),
            OperationMode::MenuExit => self.service_menu_exit(),
            OperationMode::SetHour | OperationMode::SetMinute | OperationMode::SetSecond => {
                self.service_time_edit()
            }
            OperationMode::SetYear | OperationMode::SetMonth | OperationMode::SetDay => {
                self.service_date_edit()
            }
            OperationMode::SetBrightness => self.service_brightness_edit(),
        }
    }

    /// The periodic tick: refresh the display and restart the blink cycle,
    /// unless a held button is auto-repeating (the edits rearm it then).
    fn on_tick(&mut self) {
        self.redraw = true;
        if !self.menu.is_repeating() && !self.select.is_repeating() {
            self.blink.rearm();
        }
    }

    fn switch_to(&mut self, mode: OperationMode, timeout_ticks: u16) {
        debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.redraw = true;
        self.mode_timeout.arm(timeout_ticks, OperationMode::Time);
    }

    /// Writes the current state to the display if a redraw is pending.
    fn refresh(&mut self) {
        if !self.redraw {
            return;
        }
        self.redraw = false;

        if self.mode.is_time_edit() {
            self.reseed_time_edit();
        }

        let snapshot = self.snapshot();
        let text = display::render(self.mode, &self.edit, &snapshot, self.blink.phase());
        self.display.write_text(&text);
    }

    fn snapshot(&mut self) -> Snapshot {
        let Some(rtc) = self.rtc.as_mut() else {
            return Snapshot::default();
        };
        match self.mode {
            OperationMode::Time | OperationMode::Date | OperationMode::Year => Snapshot {
                now: Some(rtc.now()),
                temperature: None,
            },
            OperationMode::Temperature => Snapshot {
                now: None,
                temperature: Some(rtc.temperature()),
            },
            _ => Snapshot::default(),
        }
    }

    /// Follows the live clock while editing the time, unless the seconds
    /// were changed locally and are still waiting for confirmation.
    fn reseed_time_edit(&mut self) {
        let Some(rtc) = self.rtc.as_mut() else {
            return;
        };
        if let EditBuffer::Time(time) = self.edit {
            if !time.second_changed {
                self.edit = EditBuffer::Time(TimeEdit::from_date_time(&rtc.now()));
            }
        }
    }

    /// Reads the RTC, applies `change` and writes the result back. Does
    /// nothing without an RTC.
    fn adjust_rtc(&mut self, change: impl FnOnce(DateTime) -> Result<DateTime, ClockError>) {
        let Some(rtc) = self.rtc.as_mut() else {
            return;
        };
        match change(rtc.now()) {
            Ok(updated) => {
                debug!("rtc adjusted to {}", updated);
                rtc.adjust(&updated);
            }
            Err(err) => warn!("rtc adjust skipped: {}", err),
        }
    }

    /// Blocking `NO RTC` notice for edit requests without an RTC.
    fn show_no_rtc(&mut self) {
        self.display.write_text(&DisplayText::new("NO RTC"));
        self.delay.delay_ms(self.config.notice_ms);
        self.redraw = true;
    }

    /// Bookkeeping after an edit-field increment.
    fn after_edit_step(&mut self, press: Press) {
        self.redraw = true;
        self.blink.rearm();
        if press == Press::Repeat {
            self.delay.delay_ms(self.config.repeat_pace_ms);
        }
    }

    fn service_display_mode(&mut self) {
        self.refresh();

        if self.menu.take_press() {
            self.switch_to(OperationMode::MenuDemo, self.config.menu_timeout_ticks);
        } else if self.select.take_press() {
            let timeout = self.config.display_timeout_ticks;
            match self.mode {
                OperationMode::Time => self.switch_to(OperationMode::Date, timeout),
                OperationMode::Date => self.switch_to(OperationMode::Year, timeout),
                OperationMode::Year => self.switch_to(OperationMode::Temperature, timeout),
                _ => self.switch_to(OperationMode::Time, 0),
            }
        }
    }

    fn service_menu_demo(&mut self) {
        self.refresh();

        if self.menu.take_press() {
            self.switch_to(OperationMode::MenuSetTime, self.config.menu_timeout_ticks);
        } else if self.select.take_press() {
            demo::run(&mut self.display, &mut self.delay);
            self.redraw = true;
            self.mode_timeout
                .arm(self.config.menu_timeout_ticks, OperationMode::Time);
        }
    }

    fn service_menu_set_time(&mut self) {
        self.refresh();

        if self.menu.take_press() {
            self.switch_to(OperationMode::MenuSetDate, self.config.menu_timeout_ticks);
        } else if self.select.take_press() {
            match self.rtc.as_mut().map(|rtc| rtc.now()) {
                Some(now) => {
                    self.edit = EditBuffer::Time(TimeEdit::from_date_time(&now));
                    self.blink.rearm();
                    self.switch_to(OperationMode::SetHour, 0);
                }
                None => self.show_no_rtc(),
            }
        }
    }

    fn service_menu_set_date(&mut self) {
        self.refresh();

        if self.menu.take_press() {
            self.switch_to(
                OperationMode::MenuSetBrightness,
                self.config.menu_timeout_ticks,
            );
        } else if self.select.take_press() {
            match self.rtc.as_mut().map(|rtc| rtc.now()) {
                Some(now) => {
                    self.edit = EditBuffer::Date(DateEdit::from_date_time(&now));
                    self.blink.rearm();
                    self.switch_to(OperationMode::SetYear, 0);
                }
                None => self.show_no_rtc(),
            }
        }
    }

    fn service_menu_set_brightness(&mut self) {
        self.refresh();

        if self.menu.take_press() {
            self.switch_to(OperationMode::MenuExit, self.config.menu_timeout_ticks);
        } else if self.select.take_press() {
            self.edit = EditBuffer::Brightness(self.brightness.value());
            self.blink.rearm();
            self.switch_to(OperationMode::SetBrightness, 0);
        }
    }

    fn service_menu_exit(&mut self) {
        self.refresh();

        if self.menu.take_press() {
            self.switch_to(OperationMode::MenuDemo, self.config.menu_timeout_ticks);
        } else if self.select.take_press() {
            self.switch_to(OperationMode::Time, 0);
        }
    }

    fn service_time_edit(&mut self) {
        self.refresh();

        // A held, already handled menu button shadows the select button.
        if self.menu.is_pressed() {
            if let Some(press) = self.menu.take_press_or_repeat() {
                self.step_time_field();
                self.after_edit_step(press);
            }
        } else if self.select.take_press() {
            self.confirm_time_field();
        }
    }

    /// Hour and minute go to the RTC immediately. Seconds are held back until
    /// confirmed so the clock does not drift while the user steps through.
    fn step_time_field(&mut self) {
        let EditBuffer::Time(mut time) = self.edit else {
            return;
        };
        match self.mode {
            OperationMode::SetHour => {
                time.hour = if time.hour >= 23 { 0 } else { time.hour + 1 };
                let hour = time.hour;
                self.adjust_rtc(|now| now.with_time(hour, now.minute, now.second));
            }
            OperationMode::SetMinute => {
                time.minute = if time.minute >= 59 { 0 } else { time.minute + 1 };
                let minute = time.minute;
                self.adjust_rtc(|now| now.with_time(now.hour, minute, now.second));
            }
            _ => {
                time.second = if time.second >= 59 { 0 } else { time.second + 1 };
                time.second_changed = true;
            }
        }
        self.edit = EditBuffer::Time(time);
    }

    fn confirm_time_field(&mut self) {
        match self.mode {
            OperationMode::SetHour => {
                self.blink.rearm();
                self.switch_to(OperationMode::SetMinute, 0);
            }
            OperationMode::SetMinute => {
                self.blink.rearm();
                self.switch_to(OperationMode::SetSecond, 0);
            }
            _ => {
                if let EditBuffer::Time(time) = self.edit {
                    if time.second_changed {
                        self.adjust_rtc(|now| now.with_time(time.hour, time.minute, time.second));
                    }
                }
                self.edit = EditBuffer::Idle;
                self.switch_to(OperationMode::Time, 0);
            }
        }
    }

    fn service_date_edit(&mut self) {
        self.refresh();

        if self.menu.is_pressed() {
            if let Some(press) = self.menu.take_press_or_repeat() {
                self.step_date_field();
                self.after_edit_step(press);
            }
        } else if self.select.take_press() {
            self.confirm_date_field();
        }
    }

    /// Every date field goes to the RTC as soon as it changes. The day is
    /// clamped to the length of the (possibly new) month first.
    fn step_date_field(&mut self) {
        let EditBuffer::Date(mut date) = self.edit else {
            return;
        };
        match self.mode {
            OperationMode::SetYear => {
                date.year = if date.year >= self.config.last_edit_year {
                    self.config.first_edit_year
                } else {
                    date.year + 1
                };
            }
            OperationMode::SetMonth => {
                date.month = if date.month >= 12 { 1 } else { date.month + 1 };
            }
            _ => {
                let last_day = calendar::days_in_month(date.year, date.month);
                date.day = if date.day >= last_day { 1 } else { date.day + 1 };
            }
        }
        date.day = date
            .day
            .min(calendar::days_in_month(date.year, date.month))
            .max(1);
        self.edit = EditBuffer::Date(date);
        self.adjust_rtc(|now| now.with_date(date.year, date.month, date.day));
    }

    fn confirm_date_field(&mut self) {
        self.blink.rearm();
        match self.mode {
            OperationMode::SetYear => self.switch_to(OperationMode::SetMonth, 0),
            OperationMode::SetMonth => self.switch_to(OperationMode::SetDay, 0),
            _ => {
                self.edit = EditBuffer::Idle;
                self.switch_to(OperationMode::Time, 0);
            }
        }
    }

    fn service_brightness_edit(&mut self) {
        self.refresh();

        if self.menu.is_pressed() {
            if let Some(press) = self.menu.take_press_or_repeat() {
                let EditBuffer::Brightness(current) = self.edit else {
                    return;
                };
                let next = current.next();
                self.backlight.set_level(next.pwm_level());
                self.edit = EditBuffer::Brightness(next);
                self.after_edit_step(press);
            }
        } else if self.select.take_press() {
            if let EditBuffer::Brightness(value) = self.edit {
                self.brightness.save(&mut self.store, value);
            }
            self.edit = EditBuffer::Idle;
            self.switch_to(OperationMode::Time, 0);
        }
    }

    /// Currently active mode.
    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    /// The value under edit, if any.
    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.edit
    }

    /// The saved brightness (not the one under edit).
    pub fn brightness(&self) -> Brightness {
        self.brightness.value()
    }

    /// Whether an RTC was found at startup.
    pub fn has_rtc(&self) -> bool {
        self.rtc.is_some()
    }

    /// A display refresh is pending.
    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink.phase()
    }

    pub fn mode_timeout(&self) -> &ModeTimeout {
        &self.mode_timeout
    }

    pub fn menu_button(&self) -> &ButtonChannel<I> {
        &self.menu
    }

    pub fn select_button(&self) -> &ButtonChannel<I> {
        &self.select
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn rtc(&self) -> Option<&R> {
        self.rtc.as_ref()
    }

    pub fn rtc_mut(&mut self) -> Option<&mut R> {
        self.rtc.as_mut()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn backlight(&self) -> &B {
        &self.backlight
    }

    pub fn delay(&self) -> &Y {
        &self.delay
    }
}
