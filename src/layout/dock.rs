//! Sidebar dock geometry: the dock's own width, its collapse state and the
//! vertical slots docked panels are laid out in.

use std::time::{Duration, Instant};

use ratatui::prelude::Rect;

use crate::config::LayoutDefaults;
use crate::constants::DOUBLE_CLICK_MS;

#[derive(Debug, Clone, Copy)]
struct GripDrag {
    start_x: i32,
    start_width: i32,
}

/// Result of a press on the dock grip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripPress {
    /// Second press inside the double-click window; collapse state flipped.
    Toggled { collapsed: bool },
    /// First press; a width drag is now in progress.
    ResizeStarted,
}

#[derive(Debug, Clone)]
pub struct SidebarDock {
    width: i32,
    expanded_width: i32,
    collapsed: bool,
    default_width: i32,
    min_width: i32,
    max_width: i32,
    collapsed_width: i32,
    grip_drag: Option<GripDrag>,
    last_grip_press: Option<Instant>,
}

impl SidebarDock {
    pub fn new(defaults: &LayoutDefaults) -> Self {
        let min_width = defaults.sidebar_min_width.max(1);
        let max_width = defaults.sidebar_max_width.max(min_width);
        let default_width = defaults.sidebar_default_width.clamp(min_width, max_width);
        Self {
            width: default_width,
            expanded_width: default_width,
            collapsed: false,
            default_width,
            min_width,
            max_width,
            collapsed_width: defaults.sidebar_collapsed_width.max(1),
            grip_drag: None,
            last_grip_press: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn resizing(&self) -> bool {
        self.grip_drag.is_some()
    }

    pub fn toggle_collapse(&mut self) {
        if self.collapsed {
            self.width = if self.expanded_width > 0 {
                self.expanded_width
            } else {
                self.default_width
            };
            self.collapsed = false;
        } else {
            self.expanded_width = self.width;
            self.width = self.collapsed_width;
            self.collapsed = true;
        }
        tracing::debug!(collapsed = self.collapsed, width = self.width, "dock collapse toggled");
    }

    /// Handle a press on the grip at column `x`.
    pub fn press_grip(&mut self, x: i32, now: Instant) -> GripPress {
        let window = Duration::from_millis(DOUBLE_CLICK_MS);
        if let Some(prev) = self.last_grip_press
            && now.saturating_duration_since(prev) <= window
        {
            self.last_grip_press = None;
            self.grip_drag = None;
            self.toggle_collapse();
            return GripPress::Toggled {
                collapsed: self.collapsed,
            };
        }
        self.last_grip_press = Some(now);
        self.begin_resize(x);
        GripPress::ResizeStarted
    }

    pub fn begin_resize(&mut self, x: i32) {
        self.grip_drag = Some(GripDrag {
            start_x: x,
            start_width: self.width,
        });
    }

    /// The dock sits on the right, so moving the grip left widens it.
    pub fn update_resize(&mut self, x: i32) -> Option<i32> {
        let drag = self.grip_drag?;
        let next = drag
            .start_width
            .saturating_add(drag.start_x.saturating_sub(x))
            .clamp(self.min_width, self.max_width);
        self.width = next;
        if next > self.collapsed_width {
            self.expanded_width = next;
            self.collapsed = false;
        }
        Some(next)
    }

    pub fn end_resize(&mut self) -> bool {
        self.grip_drag.take().is_some()
    }

    /// Splits `area` into the free canvas (left) and the dock (right).
    pub fn split(&self, area: Rect) -> (Rect, Rect) {
        let width = (self.width.max(0) as u16).min(area.width);
        let canvas = Rect {
            width: area.width - width,
            ..area
        };
        let dock = Rect {
            x: area.x + canvas.width,
            width,
            ..area
        };
        (canvas, dock)
    }

    /// Leftmost column of the dock; presses here resize or collapse it.
    pub fn grip_rect(&self, dock: Rect) -> Rect {
        Rect {
            width: dock.width.min(1),
            ..dock
        }
    }

    /// Vertical slots for `count` docked panels. The last slot absorbs the
    /// remainder so the dock is filled exactly.
    pub fn slots(&self, dock: Rect, count: usize) -> Vec<Rect> {
        if count == 0 || self.collapsed || dock.width <= 1 || dock.height == 0 {
            return Vec::new();
        }
        let inner = Rect {
            x: dock.x + 1,
            width: dock.width - 1,
            ..dock
        };
        let count_u16 = (count as u16).min(inner.height.max(1));
        let base = inner.height / count_u16;
        let mut slots = Vec::with_capacity(count);
        let mut y = inner.y;
        for idx in 0..count_u16 {
            let height = if idx + 1 == count_u16 {
                inner.y + inner.height - y
            } else {
                base
            };
            slots.push(Rect {
                y,
                height,
                ..inner
            });
            y += height;
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dock() -> SidebarDock {
        SidebarDock::new(&LayoutDefaults::pixels())
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut d = dock();
        d.begin_resize(1000);
        assert_eq!(d.update_resize(900), Some(580));
        assert_eq!(d.update_resize(0), Some(720));
        assert_eq!(d.update_resize(5000), Some(320));
        assert!(d.end_resize());
        assert!(!d.end_resize());
        assert_eq!(d.update_resize(10), None);
        assert_eq!(d.width(), 320);
    }

    #[test]
    fn collapse_round_trip_restores_width() {
        let mut d = dock();
        d.begin_resize(1000);
        d.update_resize(950);
        d.end_resize();
        assert_eq!(d.width(), 530);
        d.toggle_collapse();
        assert!(d.collapsed());
        assert_eq!(d.width(), 12);
        d.toggle_collapse();
        assert!(!d.collapsed());
        assert_eq!(d.width(), 530);
    }

    #[test]
    fn double_press_toggles_single_press_resizes() {
        let mut d = dock();
        let t0 = Instant::now();
        assert_eq!(d.press_grip(10, t0), GripPress::ResizeStarted);
        assert!(d.resizing());
        d.end_resize();
        assert_eq!(
            d.press_grip(10, t0 + Duration::from_millis(120)),
            GripPress::Toggled { collapsed: true }
        );
        assert!(!d.resizing());
        // a slow second press is a new drag
        let later = t0 + Duration::from_secs(5);
        assert_eq!(d.press_grip(10, later), GripPress::ResizeStarted);
        assert_eq!(
            d.press_grip(10, later + Duration::from_secs(2)),
            GripPress::ResizeStarted
        );
    }

    #[test]
    fn split_and_slots_fill_the_dock() {
        let d = SidebarDock::new(&LayoutDefaults::cells());
        let area = Rect {
            x: 0,
            y: 1,
            width: 120,
            height: 31,
        };
        let (canvas, side) = d.split(area);
        assert_eq!(canvas.width + side.width, 120);
        assert_eq!(side.width, 48);
        assert_eq!(side.x, 72);
        let slots = d.slots(side, 2);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].x, 73);
        assert_eq!(slots[0].height + slots[1].height, 31);
        assert_eq!(slots[1].y, slots[0].y + slots[0].height);
        assert!(d.slots(side, 0).is_empty());
    }
}
