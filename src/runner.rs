use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::components::ContentSet;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::ui::UiFrame;
use crate::window::WindowManager;

/// `q` or `Ctrl+C`.
pub fn is_quit(event: &Event) -> bool {
    let Event::Key(KeyEvent {
        code, modifiers, ..
    }) = event
    else {
        return false;
    };
    match code {
        KeyCode::Char('q') => !modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// `r` asks the focused panel to render again after a failure.
pub fn is_retry(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('r'),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) if !modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Paints one frame: background, each panel's chrome followed by its
/// content in draw order, then drag feedback on top.
pub fn draw_dashboard(mut frame: UiFrame<'_>, wm: &mut WindowManager, contents: &mut ContentSet) {
    let area = frame.area();
    if wm.area() != area {
        wm.set_area(area);
    }
    wm.render_background(&mut frame);
    for draw in wm.window_draw_plan() {
        wm.render_chrome(&mut frame, &draw);
        contents.render(&mut frame, &draw);
    }
    wm.render_overlays(&mut frame);
}

/// Drives the dashboard until the user quits. The caller owns terminal
/// setup; this only enters and leaves the output driver around the loop.
pub fn run_dashboard<D, O>(
    driver: &mut D,
    output: &mut O,
    wm: &mut WindowManager,
    contents: &mut ContentSet,
    poll_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop
        .driver()
        .set_mouse_capture(wm.mouse_capture_enabled())?;

    let result = event_loop.run(|driver, event| {
        match event {
            None => output.draw(|frame| draw_dashboard(frame, wm, contents))?,
            Some(evt) => {
                if is_quit(&evt) {
                    debug!("quit requested");
                    wm.cancel_gestures();
                    return Ok(ControlFlow::Quit);
                }
                if is_retry(&evt) {
                    if let Some(id) = wm.registry().active_window()
                        && contents.reset(id)
                    {
                        debug!(window_id = %id, "panel retry requested");
                    }
                } else {
                    wm.handle_event(&evt);
                }
            }
        }
        if let Some(enabled) = wm.take_mouse_capture_change() {
            driver.set_mouse_capture(enabled)?;
        }
        Ok(ControlFlow::Continue)
    });
    let exited = output.exit();
    result.and(exited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ContentError, PanelContent};
    use crate::config::LayoutDefaults;
    use crate::window::PanelKind;
    use crate::window::shell::PanelShell;
    use crate::window::defaults::{BATHYMETRY, RESPONSE_PLOT, initial_registry};
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// `None` entries are idle polls, which give the loop a chance to draw.
    struct Scripted {
        events: VecDeque<Option<Event>>,
        capture: Vec<bool>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            if let Some(None) = self.events.front() {
                self.events.pop_front();
                return Ok(false);
            }
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .flatten()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }

        fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
            self.capture.push(enabled);
            Ok(())
        }
    }

    struct BufferOutput {
        buffer: Buffer,
        entered: bool,
        draws: usize,
    }

    impl OutputDriver for BufferOutput {
        fn enter(&mut self) -> io::Result<()> {
            self.entered = true;
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            self.entered = false;
            Ok(())
        }

        fn draw<F>(&mut self, f: F) -> io::Result<()>
        where
            F: FnOnce(UiFrame<'_>),
        {
            self.draws += 1;
            let area = self.buffer.area;
            f(UiFrame::from_parts(area, &mut self.buffer));
            Ok(())
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn run(events: Vec<Event>) -> (WindowManager, BufferOutput, Scripted) {
        let mut wm = WindowManager::new(initial_registry(LayoutDefaults::cells()));
        let mut contents = ContentSet::placeholders(wm.registry());
        let script = events.into_iter().map(Some).collect();
        let (output, driver) = run_script(&mut wm, &mut contents, script);
        (wm, output, driver)
    }

    fn run_script(
        wm: &mut WindowManager,
        contents: &mut ContentSet,
        events: Vec<Option<Event>>,
    ) -> (BufferOutput, Scripted) {
        let mut driver = Scripted {
            events: events.into(),
            capture: Vec::new(),
        };
        let mut output = BufferOutput {
            buffer: Buffer::empty(Rect::new(0, 0, 120, 32)),
            entered: false,
            draws: 0,
        };
        run_dashboard(
            &mut driver,
            &mut output,
            wm,
            contents,
            Duration::from_millis(0),
        )
        .unwrap();
        (output, driver)
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(&key('q')));
        assert!(is_quit(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        ))));
        assert!(!is_quit(&key('c')));
        assert!(!is_quit(&Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL
        ))));
    }

    #[test]
    fn number_key_opens_panel_and_quit_stops() {
        let (wm, output, driver) = run(vec![key('2'), key('q')]);
        assert!(!output.entered);
        assert!(output.draws >= 1);
        let registry = wm.registry();
        assert!(registry.window(RESPONSE_PLOT).unwrap().is_open());
        assert_eq!(registry.active_window(), Some(RESPONSE_PLOT));
        assert_eq!(driver.capture, vec![true]);
        assert!(driver.events.is_empty());
    }

    #[test]
    fn first_frame_lays_out_and_paints_panels() {
        let (wm, output, _) = run(vec![key('q')]);
        assert_eq!(wm.area(), Rect::new(0, 0, 120, 32));
        let toolbar = wm.toolbar().button(PanelKind::Bathymetry).unwrap();
        assert_eq!(output.buffer.cell((toolbar.x + 1, 0)).unwrap().symbol(), "3");
        let bathymetry = wm
            .window_draw_plan()
            .into_iter()
            .find(|d| d.id == BATHYMETRY)
            .unwrap();
        let corner = bathymetry.surface.full;
        assert_eq!(
            output.buffer.cell((corner.x, corner.y)).unwrap().symbol(),
            "┌"
        );
    }

    #[test]
    fn mouse_toggle_is_flushed_to_driver() {
        let (wm, _, driver) = run(vec![key('m'), key('q')]);
        assert!(!wm.mouse_capture_enabled());
        assert_eq!(driver.capture, vec![true, false]);
    }

    #[test]
    fn quit_mid_drag_leaves_no_gesture() {
        let press = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 65,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 60,
            row: 6,
            modifiers: KeyModifiers::NONE,
        });
        let (wm, _, _) = run(vec![press, drag, key('q')]);
        assert!(!wm.gesture_in_flight());
        assert_eq!(wm.registry().dragging_window(), None);
    }

    struct Flaky {
        calls: Rc<Cell<usize>>,
    }

    impl PanelContent for Flaky {
        fn render(
            &mut self,
            _frame: &mut UiFrame<'_>,
            _area: Rect,
            _focused: bool,
        ) -> Result<(), ContentError> {
            self.calls.set(self.calls.get() + 1);
            Err(ContentError::Unavailable("grid not loaded".into()))
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn dashboard() -> (WindowManager, PanelShell) {
        let mut wm = WindowManager::new(initial_registry(LayoutDefaults::cells()));
        wm.set_area(Rect::new(0, 0, 120, 32));
        let shell = *wm.shells().iter().find(|s| s.id == BATHYMETRY).unwrap();
        (wm, shell)
    }

    #[test]
    fn retry_key_rerenders_the_focused_failed_panel() {
        let (mut wm, shell) = dashboard();
        let mut contents = ContentSet::placeholders(wm.registry());
        let calls = Rc::new(Cell::new(0));
        contents.mount(
            BATHYMETRY,
            Box::new(Flaky {
                calls: calls.clone(),
            }),
        );
        let body = (
            (shell.frame.position.x + shell.frame.size.width / 2) as u16,
            (shell.frame.position.y + shell.frame.size.height / 2) as u16,
        );
        let script = vec![
            Some(mouse(MouseEventKind::Down(MouseButton::Left), body.0, body.1)),
            Some(mouse(MouseEventKind::Up(MouseButton::Left), body.0, body.1)),
            Some(key('r')),
            None,
            Some(key('q')),
        ];
        run_script(&mut wm, &mut contents, script);
        assert_eq!(wm.registry().active_window(), Some(BATHYMETRY));
        assert_eq!(calls.get(), 2);
        assert!(contents.boundary(BATHYMETRY).unwrap().failure().is_some());
    }

    #[test]
    fn retry_key_without_focus_leaves_failures_latched() {
        let (mut wm, _) = dashboard();
        let mut contents = ContentSet::placeholders(wm.registry());
        let calls = Rc::new(Cell::new(0));
        contents.mount(
            BATHYMETRY,
            Box::new(Flaky {
                calls: calls.clone(),
            }),
        );
        assert_eq!(wm.registry().active_window(), None);
        run_script(&mut wm, &mut contents, vec![Some(key('r')), None, Some(key('q'))]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn focus_loss_abandons_a_drag() {
        let (mut wm, shell) = dashboard();
        let mut contents = ContentSet::placeholders(wm.registry());
        let start = wm.registry().window(BATHYMETRY).unwrap().position();
        let grab = ((shell.frame.position.x + 4) as u16, shell.header_row() as u16);
        let script = vec![
            Some(mouse(MouseEventKind::Down(MouseButton::Left), grab.0, grab.1)),
            Some(mouse(MouseEventKind::Drag(MouseButton::Left), grab.0 - 8, grab.1 + 3)),
            Some(Event::FocusLost),
            Some(mouse(MouseEventKind::Up(MouseButton::Left), grab.0 - 8, grab.1 + 3)),
            Some(key('q')),
        ];
        run_script(&mut wm, &mut contents, script);
        assert!(!wm.gesture_in_flight());
        assert_eq!(wm.registry().dragging_window(), None);
        assert_eq!(wm.registry().window(BATHYMETRY).unwrap().position(), start);
    }

    #[test]
    fn retry_key_is_plain_r() {
        assert!(is_retry(&key('r')));
        assert!(!is_retry(&Event::Key(KeyEvent::new(
            KeyCode::Char('r'),
            KeyModifiers::CONTROL
        ))));
        assert!(!is_retry(&key('q')));
    }
}
