//! Per-panel chrome geometry and pointer hit testing.
//!
//! Layout in cells, relative to the panel frame:
//!
//! ```text
//! ┌──────────────────────────┐   row 0: border (north resize edge)
//! │ Title           [>] [x]  │   row 1: header, drag handle
//! │ content                  │
//! └──────────────────────────┘
//! ```

use crate::layout::floating::{ResizeEdge, resize_edge_at};
use crate::layout::{Frame, Point, Size};

use super::WindowId;

pub const BUTTON_WIDTH: i32 = 3;
const CHROME_ROWS: i32 = 2;

/// User intent under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellHit {
    Close,
    DockToggle,
    Header,
    Resize(ResizeEdge),
    Body,
}

/// Chrome of one panel at its on-screen frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelShell {
    pub id: WindowId,
    pub frame: Frame,
    pub docked: bool,
    pub resizable: bool,
}

impl PanelShell {
    pub fn new(id: WindowId, frame: Frame, docked: bool, resizable: bool) -> Self {
        Self {
            id,
            frame,
            docked,
            resizable,
        }
    }

    pub fn header_row(&self) -> i32 {
        self.frame.position.y + 1
    }

    /// Header buttons only appear once the header can hold them beside a
    /// sliver of title.
    fn has_buttons(&self) -> bool {
        self.frame.size.width >= BUTTON_WIDTH * 2 + 6 && self.frame.size.height >= CHROME_ROWS
    }

    pub fn close_button(&self) -> Option<Frame> {
        self.has_buttons().then(|| {
            Frame::new(
                Point::new(self.frame.right() - 1 - BUTTON_WIDTH, self.header_row()),
                Size::new(BUTTON_WIDTH, 1),
            )
        })
    }

    pub fn dock_button(&self) -> Option<Frame> {
        self.has_buttons().then(|| {
            Frame::new(
                Point::new(self.frame.right() - 2 - BUTTON_WIDTH * 2, self.header_row()),
                Size::new(BUTTON_WIDTH, 1),
            )
        })
    }

    /// Area handed to the content collaborator.
    pub fn content(&self) -> Frame {
        let Frame { position, size } = self.frame;
        Frame::new(
            Point::new(position.x + 1, position.y + CHROME_ROWS),
            Size::new(
                (size.width - 2).max(0),
                (size.height - CHROME_ROWS - 1).max(0),
            ),
        )
    }

    fn resize_enabled(&self) -> bool {
        !self.docked && self.resizable
    }

    pub fn hit_test(&self, point: Point) -> Option<ShellHit> {
        if !self.frame.contains(point) {
            return None;
        }
        if self.resize_enabled()
            && let Some(edge) = resize_edge_at(self.frame, point)
        {
            return Some(ShellHit::Resize(edge));
        }
        if self.close_button().is_some_and(|b| b.contains(point)) {
            return Some(ShellHit::Close);
        }
        if self.dock_button().is_some_and(|b| b.contains(point)) {
            return Some(ShellHit::DockToggle);
        }
        if point.y < self.frame.position.y + CHROME_ROWS {
            return Some(ShellHit::Header);
        }
        Some(ShellHit::Body)
    }
}
