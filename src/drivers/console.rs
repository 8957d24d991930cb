use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{InputDriver, OutputDriver};
use crate::ui::UiFrame;

/// Drops key releases and repeats, and folds Shift+Tab into BackTab.
/// Everything else passes through untouched.
pub fn normalize(evt: Event) -> Option<Event> {
    match evt {
        Event::Key(mut key) => {
            if key.kind != KeyEventKind::Press {
                return None;
            }
            if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                key.code = KeyCode::BackTab;
                key.modifiers.remove(KeyModifiers::SHIFT);
            }
            Some(Event::Key(key))
        }
        other => Some(other),
    }
}

#[derive(Debug, Default)]
pub struct ConsoleInputDriver;

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            let evt = crossterm::event::read()?;
            if let Some(normalized) = normalize(evt) {
                return Ok(normalized);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Alternate screen plus focus reporting. The terminal only sends
/// `FocusLost` while focus reporting is on.
fn enter_screen_modes<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableFocusChange)
}

fn leave_screen_modes<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        enter_screen_modes(self.terminal.backend_mut())?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        leave_screen_modes(self.terminal.backend_mut())?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(move |frame| {
                let wrapper = UiFrame::new(frame);
                f(wrapper);
            })
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        let mut key = KeyEvent::new(code, modifiers);
        key.kind = kind;
        Event::Key(key)
    }

    #[test]
    fn releases_and_repeats_are_dropped() {
        let release = key(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        let repeat = key(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Repeat);
        assert!(normalize(release).is_none());
        assert!(normalize(repeat).is_none());
        let press = key(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Press);
        assert!(normalize(press).is_some());
    }

    #[test]
    fn shift_tab_becomes_backtab() {
        let evt = key(KeyCode::Tab, KeyModifiers::SHIFT, KeyEventKind::Press);
        match normalize(evt) {
            Some(Event::Key(k)) => {
                assert_eq!(k.code, KeyCode::BackTab);
                assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
            }
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn mouse_events_pass_through() {
        let evt = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(normalize(evt.clone()), Some(evt));
        assert_eq!(normalize(Event::FocusLost), Some(Event::FocusLost));
    }

    #[cfg(unix)]
    #[test]
    fn screen_modes_toggle_focus_reporting() {
        let mut out = Vec::new();
        enter_screen_modes(&mut out).unwrap();
        let entered = String::from_utf8_lossy(&out).into_owned();
        assert!(entered.contains("\x1b[?1049h"));
        assert!(entered.contains("\x1b[?1004h"));

        let mut out = Vec::new();
        leave_screen_modes(&mut out).unwrap();
        let left = String::from_utf8_lossy(&out).into_owned();
        assert!(left.contains("\x1b[?1004l"));
        assert!(left.contains("\x1b[?1049l"));
    }
}
