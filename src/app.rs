use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::provider::{DayEntry, Provider, RefreshPolicy, Timeline};
use crate::theme::SURFACE_STYLE;
use crate::tile::{HostCaps, MonthStyler, TileView, TileWidget};
use anyhow::Context;
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::Duration;
use time::{Date, OffsetDateTime};

/// Stands in for the widget host: drives the provider's entry points,
/// displays the current entry, and wakes at day boundaries to advance the
/// timeline per its refresh policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S> {
    styler: S,
    caps: HostCaps,
    today: Date,
    timeline: Timeline,
    cursor: usize,
    placeholder: bool,
    state: AppState,
}

impl<S: MonthStyler> App<S> {
    pub(crate) fn new(today: Date, styler: S, caps: HostCaps) -> App<S> {
        let timeline = Provider::timeline(today);
        App {
            styler,
            caps,
            today,
            timeline,
            cursor: 0,
            placeholder: false,
            state: AppState::Tile,
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> App<S> {
        self.pin(DayEntry::new(date));
        self
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        if poll(self.time_to_boundary()?)? {
            let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
            if let Some(KeyEvent {
                code, modifiers, ..
            }) = read()?.as_key_press_event()
            {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            // else: Redraw on resize, and we might as well redraw on other
            // stuff too
        } else {
            self.on_day_boundary()?;
        }
        Ok(())
    }

    /// How long the event wait may block before the local date changes.
    fn time_to_boundary(&self) -> anyhow::Result<Duration> {
        let now = OffsetDateTime::now_local().context("failed to determine local time")?;
        let Some(tomorrow) = now.date().next_day() else {
            return Ok(Duration::from_secs(3600));
        };
        let until = tomorrow.midnight().assume_offset(now.offset()) - now;
        // Land just past the boundary so the date has actually changed.
        Ok(Duration::try_from(until).unwrap_or(Duration::ZERO) + Duration::from_secs(1))
    }

    fn on_day_boundary(&mut self) -> anyhow::Result<()> {
        let now = OffsetDateTime::now_local().context("failed to determine local date")?;
        self.advance_to(now.date());
        Ok(())
    }

    /// Host-side scheduling: show the entry covering `today`, replacing the
    /// timeline per its refresh policy once it no longer does.  A pinned
    /// timeline (policy `Never`) is left alone.
    fn advance_to(&mut self, today: Date) {
        self.today = today;
        if self.timeline.needs_refresh(today) {
            self.timeline = Provider::timeline(today);
        }
        if let Some(pos) = self.timeline.position_of(today) {
            self.cursor = pos;
        }
    }

    /// Replaces the timeline with a single entry that never refreshes.
    fn pin(&mut self, entry: DayEntry) {
        self.timeline = Timeline {
            entries: vec![entry],
            policy: RefreshPolicy::Never,
        };
        self.cursor = 0;
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Tile => match key {
                KeyCode::Char('j') | KeyCode::Down => self.step_forwards(),
                KeyCode::Char('k') | KeyCode::Up => self.step_backwards(),
                KeyCode::Char('m') => self.cycle_month(),
                KeyCode::Char('p') => {
                    self.placeholder = !self.placeholder;
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.reset();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Tile;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Tile;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => c
                            .to_digit(10)
                            .and_then(|d| u8::try_from(d).ok())
                            .map_or(JumpToOutput::Invalid, |d| {
                                state.handle_input(JumpToInput::Digit(d))
                            }),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(entry) => {
                            self.state = AppState::Tile;
                            self.pin(entry);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn step_forwards(&mut self) -> bool {
        if self.cursor + 1 < self.timeline.entries.len() {
            self.cursor += 1;
            true
        } else {
            // Exhausted: replace the timeline, picking up the day after the
            // last entry.
            match self.timeline.last_date().and_then(Date::next_day) {
                Some(next) => {
                    self.timeline = Provider::timeline(next);
                    self.cursor = 0;
                    true
                }
                None => false,
            }
        }
    }

    fn step_backwards(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Pins a preview of the month after the one on display, day-of-month
    /// mirroring the month number.
    fn cycle_month(&mut self) -> bool {
        let base = self.current_entry().date;
        let month = base.month().next();
        match DayEntry::from_components(base.year(), u8::from(month), u8::from(month)) {
            Ok(entry) => {
                self.pin(entry);
                true
            }
            Err(_) => false,
        }
    }

    /// Back to an immediate view of today, with a live timeline behind it.
    fn reset(&mut self) {
        let snap = Provider::snapshot(self.today);
        self.timeline = Provider::timeline(snap.date);
        self.cursor = 0;
    }

    fn current_entry(&self) -> DayEntry {
        self.timeline
            .entries
            .get(self.cursor)
            .copied()
            .unwrap_or_else(|| Provider::placeholder(self.today))
    }
}

impl<S: MonthStyler> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, SURFACE_STYLE);
        let tile = if self.placeholder {
            let entry = Provider::placeholder(self.today);
            let theme = self.styler.month_theme(entry.date);
            TileView::compose_placeholder(theme, self.caps)
        } else {
            let entry = self.current_entry();
            let theme = self.styler.month_theme(entry.date);
            TileView::compose(entry, theme, self.caps)
        };
        TileWidget::new(tile).render(area, buf);
        if self.state == AppState::Helping {
            Help(SURFACE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Tile,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
