use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::shell::PanelShell;
use crate::layout::Frame;
use crate::theme;
use crate::ui::UiFrame;

/// Draws panel chrome. Implementations only paint cells inside `bounds`.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        shell: &PanelShell,
        bounds: Rect,
        title: &str,
        focused: bool,
    );

    /// Outline following the pointer while a docked panel is dragged.
    fn render_ghost(&self, frame: &mut UiFrame<'_>, ghost: Frame, bounds: Rect);
}

#[derive(Debug)]
pub struct DashboardDecorator;

impl DashboardDecorator {
    fn border(frame: &mut UiFrame<'_>, rect: Frame, bounds: Rect, style: Style, glyphs: [&str; 6]) {
        let [top_left, top_right, bottom_left, bottom_right, horizontal, vertical] = glyphs;
        let left = rect.position.x;
        let top = rect.position.y;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        if right <= left || bottom <= top {
            return;
        }
        for x in left..=right {
            let (t, b) = if x == left {
                (top_left, bottom_left)
            } else if x == right {
                (top_right, bottom_right)
            } else {
                (horizontal, horizontal)
            };
            frame.set_symbol_signed(x, top, t, style, bounds);
            frame.set_symbol_signed(x, bottom, b, style, bounds);
        }
        for y in top + 1..bottom {
            frame.set_symbol_signed(left, y, vertical, style, bounds);
            frame.set_symbol_signed(right, y, vertical, style, bounds);
        }
    }
}

impl WindowDecorator for DashboardDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        shell: &PanelShell,
        bounds: Rect,
        title: &str,
        focused: bool,
    ) {
        let header_style = if focused {
            Style::default()
                .bg(theme::header_focused_bg())
                .fg(theme::header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::header_bg())
                .fg(theme::header_fg())
        };
        let border_style = if focused {
            Style::default().fg(theme::border_focused())
        } else {
            Style::default().fg(theme::border())
        };

        let rect = shell.frame;
        frame.fill(rect.visible_in(bounds), Style::default());
        Self::border(
            frame,
            rect,
            bounds,
            border_style,
            ["┌", "┐", "└", "┘", "─", "│"],
        );

        // Header
        let header_y = shell.header_row();
        let left = rect.position.x + 1;
        let right = rect.right() - 1;
        for x in left..right {
            frame.set_symbol_signed(x, header_y, " ", header_style, bounds);
        }
        let title_room = match shell.dock_button() {
            Some(button) => button.position.x - left - 2,
            None => right - left - 1,
        };
        if title_room > 0 {
            let title: String = title.chars().take(title_room as usize).collect();
            frame.set_string_signed(left + 1, header_y, &title, header_style, bounds);
        }
        if let Some(button) = shell.dock_button() {
            let label = if shell.docked { "[<]" } else { "[>]" };
            frame.set_string_signed(
                button.position.x,
                button.position.y,
                label,
                header_style,
                bounds,
            );
        }
        if let Some(button) = shell.close_button() {
            frame.set_string_signed(
                button.position.x,
                button.position.y,
                "[x]",
                header_style,
                bounds,
            );
        }
    }

    fn render_ghost(&self, frame: &mut UiFrame<'_>, ghost: Frame, bounds: Rect) {
        let style = Style::default()
            .fg(theme::ghost())
            .add_modifier(Modifier::BOLD);
        Self::border(frame, ghost, bounds, style, ["+", "+", "+", "+", "-", "¦"]);
    }
}
