//! Header toolbar: one toggle per panel kind plus the mouse capture
//! indicator.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
};

use crate::layout::rect_contains;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};
use crate::window::PanelKind;

const BRAND: &str = " CSEM Insight ";
const MOUSE_CHUNK: &str = "[ mouse ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarHit {
    Panel(PanelKind),
    MouseCapture,
}

#[derive(Debug, Default)]
pub struct Toolbar {
    area: Rect,
    compact: bool,
    buttons: Vec<(ToolbarHit, Rect)>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Splits `area` into the one-row toolbar and everything below it.
    pub fn split(area: Rect) -> (Rect, Rect) {
        let height = 1u16.min(area.height);
        let bar = Rect { height, ..area };
        let rest = Rect {
            y: area.y.saturating_add(height),
            height: area.height - height,
            ..area
        };
        (bar, rest)
    }

    /// Like [`Toolbar::split`], also laying out the buttons for hit testing.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let (bar, rest) = Self::split(area);
        self.area = bar;
        self.layout_buttons();
        (bar, rest)
    }

    fn layout_buttons(&mut self) {
        self.buttons.clear();
        let bar = self.area;
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        let full: u16 = PanelKind::ALL
            .iter()
            .enumerate()
            .map(|(idx, &kind)| label(idx, kind, false).chars().count() as u16)
            .sum();
        let fixed = (BRAND.len() + MOUSE_CHUNK.len()) as u16;
        self.compact = full.saturating_add(fixed) > bar.width;

        let max_x = bar.x.saturating_add(bar.width);
        let mouse_width = MOUSE_CHUNK.len() as u16;
        let mouse_x = max_x.saturating_sub(mouse_width).max(bar.x);
        let mut x = bar.x.saturating_add(BRAND.len() as u16);
        for (idx, kind) in PanelKind::ALL.into_iter().enumerate() {
            let width = label(idx, kind, self.compact).chars().count() as u16;
            if x.saturating_add(width) > mouse_x {
                break;
            }
            self.buttons.push((
                ToolbarHit::Panel(kind),
                Rect {
                    x,
                    y: bar.y,
                    width,
                    height: 1,
                },
            ));
            x = x.saturating_add(width);
        }
        if mouse_x >= x {
            self.buttons.push((
                ToolbarHit::MouseCapture,
                Rect {
                    x: mouse_x,
                    y: bar.y,
                    width: mouse_width.min(max_x - mouse_x),
                    height: 1,
                },
            ));
        }
    }

    pub fn button(&self, kind: PanelKind) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(hit, _)| *hit == ToolbarHit::Panel(kind))
            .map(|(_, rect)| *rect)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ToolbarHit> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(hit, _)| *hit)
    }

    pub fn render<F>(&self, frame: &mut UiFrame<'_>, mouse_capture_enabled: bool, is_open: F)
    where
        F: Fn(PanelKind) -> bool,
    {
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.fill(
            area,
            Style::default()
                .bg(theme::toolbar_bg())
                .fg(theme::toolbar_fg()),
        );
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        let bar_style = Style::default()
            .bg(theme::toolbar_bg())
            .fg(theme::toolbar_fg());
        safe_set_string(
            buffer,
            bounds,
            area.x,
            area.y,
            BRAND,
            bar_style.add_modifier(Modifier::BOLD),
        );
        for (idx, (hit, rect)) in self.buttons.iter().enumerate() {
            match *hit {
                ToolbarHit::Panel(kind) => {
                    let style = if is_open(kind) {
                        Style::default()
                            .bg(theme::toolbar_open_bg())
                            .fg(theme::toolbar_open_fg())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        bar_style.fg(theme::toolbar_inactive_fg())
                    };
                    let text = label(idx, kind, self.compact);
                    safe_set_string(buffer, bounds, rect.x, rect.y, &text, style);
                }
                ToolbarHit::MouseCapture => {
                    let style = if mouse_capture_enabled {
                        bar_style
                            .fg(theme::indicator_on())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        bar_style.fg(theme::toolbar_inactive_fg())
                    };
                    safe_set_string(buffer, bounds, rect.x, rect.y, MOUSE_CHUNK, style);
                }
            }
        }
    }
}

fn label(index: usize, kind: PanelKind, compact: bool) -> String {
    let key = index + 1;
    if compact {
        format!(" {key} ")
    } else {
        format!(" {key} {} ", kind.label())
    }
}
