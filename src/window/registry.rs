//! Canonical panel state.
//!
//! `WindowRegistry` is the single source of truth for where every panel lives,
//! its stacking order, which panel is focused and which one is being dragged.
//! It is an ordinary value owned by the input layer; nothing here is global.
//!
//! Every public mutation is one atomic state transition. An id the registry
//! does not know is a silent no-op: pointer gestures legitimately race with a
//! panel being closed from elsewhere, and the result of such a race is simply
//! "the gesture had no effect".

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::{Placement, WindowId, WindowState};
use crate::config::LayoutDefaults;
use crate::constants::INITIAL_GLOBAL_Z_INDEX;
use crate::layout::{
    Container, Frame, Point, Size, cascade_position, repair_position_for_container,
};

/// Structural inconsistency between the window map and the sidebar order.
///
/// Mutations keep these impossible by construction; seeing one is a bug in
/// the registry, not a condition callers are expected to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("sidebar order lists unknown window {0}")]
    UnknownSidebarEntry(WindowId),
    #[error("sidebar order lists {0}, which is not docked")]
    SidebarEntryNotDocked(WindowId),
    #[error("window {0} appears more than once in the sidebar order")]
    DuplicateSidebarEntry(WindowId),
    #[error("docked window {0} is missing from the sidebar order")]
    MissingSidebarEntry(WindowId),
    #[error("active window {0} is unknown or closed")]
    ActiveWindowNotOpen(WindowId),
    #[error("window {id} has z-index {z_index} above the counter {counter}")]
    ZIndexAhead {
        id: WindowId,
        z_index: u64,
        counter: u64,
    },
}

#[derive(Debug, Clone)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, WindowState>,
    sidebar_order: Vec<WindowId>,
    active_window: Option<WindowId>,
    dragging_window: Option<WindowId>,
    global_z_index: u64,
    viewport: Size,
    defaults: LayoutDefaults,
}

impl WindowRegistry {
    pub fn new(defaults: LayoutDefaults) -> Self {
        Self {
            windows: BTreeMap::new(),
            sidebar_order: Vec::new(),
            active_window: None,
            dragging_window: None,
            global_z_index: INITIAL_GLOBAL_Z_INDEX,
            viewport: defaults.default_viewport,
            defaults,
        }
    }

    /// Seeds the registry with panels exactly as given: no cascading, docked
    /// panels keep the order in which they appear.
    pub fn with_windows(
        defaults: LayoutDefaults,
        windows: impl IntoIterator<Item = WindowState>,
    ) -> Self {
        let mut registry = Self::new(defaults);
        for window in windows {
            if registry.windows.contains_key(&window.id) {
                continue;
            }
            if window.container() == Container::Sidebar {
                registry.sidebar_order.push(window.id);
            }
            registry.global_z_index = registry.global_z_index.max(window.z_index);
            registry.windows.insert(window.id, window);
        }
        registry.debug_check();
        registry
    }

    pub fn defaults(&self) -> &LayoutDefaults {
        &self.defaults
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowState> {
        self.windows.values()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn sidebar_order(&self) -> &[WindowId] {
        &self.sidebar_order
    }

    /// Sidebar order restricted to open panels; this is what the dock shows.
    pub fn visible_sidebar_order(&self) -> Vec<WindowId> {
        self.sidebar_order
            .iter()
            .copied()
            .filter(|id| self.windows.get(id).is_some_and(|w| w.is_open))
            .collect()
    }

    /// Index of a docked panel among the visible dock slots.
    pub fn slot_index(&self, id: WindowId) -> Option<usize> {
        self.visible_sidebar_order().iter().position(|&x| x == id)
    }

    /// Open free panels, bottom-most first.
    pub fn main_draw_order(&self) -> Vec<WindowId> {
        let mut open: Vec<&WindowState> = self
            .windows
            .values()
            .filter(|w| w.is_open && w.container() == Container::Main)
            .collect();
        open.sort_by_key(|w| (w.z_index, w.id));
        open.into_iter().map(|w| w.id).collect()
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    pub fn dragging_window(&self) -> Option<WindowId> {
        self.dragging_window
    }

    pub fn global_z_index(&self) -> u64 {
        self.global_z_index
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn register_window(&mut self, window: WindowState) {
        if self.windows.contains_key(&window.id) {
            tracing::debug!(window_id = %window.id, "ignoring duplicate registration");
            return;
        }
        let mut window = window;
        match window.container() {
            Container::Main => {
                let slot = self
                    .windows
                    .values()
                    .filter(|w| w.container() == Container::Main)
                    .count();
                let frame = window.placement.frame_mut();
                frame.position = cascade_position(frame.position, slot, &self.defaults);
            }
            Container::Sidebar => {
                if !self.sidebar_order.contains(&window.id) {
                    self.sidebar_order.push(window.id);
                }
            }
        }
        // A preset z never gets ahead of the counter.
        self.global_z_index = self.global_z_index.max(window.z_index);
        tracing::debug!(
            window_id = %window.id,
            container = ?window.container(),
            position = ?window.position(),
            z_index = window.z_index,
            "registered window"
        );
        self.windows.insert(window.id, window);
        self.debug_check();
    }

    pub fn move_window_to_container(&mut self, id: WindowId, target: Container) {
        let defaults = self.defaults;
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        let mut frame = window.frame();
        frame.position = repair_position_for_container(frame.position, target, &defaults);
        if target == Container::Main && frame.size.is_degenerate() {
            frame.size = defaults.default_main_size;
        }
        window.placement = Placement::in_container(frame, target);

        self.sidebar_order.retain(|&entry| entry != id);
        if target == Container::Sidebar {
            self.sidebar_order.insert(0, id);
        }
        tracing::debug!(window_id = %id, container = ?target, frame = ?frame, "moved window");
        self.debug_check();
    }

    /// Moves `active_id` to the slot currently held by `over_id`, shifting
    /// the entries in between by one. The relative order of everything else
    /// is unchanged.
    pub fn reorder_sidebar(&mut self, active_id: WindowId, over_id: WindowId) {
        if active_id == over_id {
            return;
        }
        let Some(old_index) = self.sidebar_order.iter().position(|&x| x == active_id) else {
            return;
        };
        let Some(new_index) = self.sidebar_order.iter().position(|&x| x == over_id) else {
            return;
        };
        let moved = self.sidebar_order.remove(old_index);
        self.sidebar_order.insert(new_index, moved);
        tracing::debug!(window_id = %active_id, from = old_index, to = new_index, "reordered sidebar");
        self.debug_check();
    }

    pub fn update_position(&mut self, id: WindowId, position: Point) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.placement.frame_mut().position = position;
        }
    }

    pub fn update_size(&mut self, id: WindowId, size: Size) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.placement.frame_mut().size = size;
        }
    }

    /// Writes the result of a resize in one step: the size always, the
    /// origin only when the gesture moved it.
    pub fn commit_frame(&mut self, id: WindowId, size: Size, position: Option<Point>) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        let frame = window.placement.frame_mut();
        frame.size = size;
        if let Some(position) = position {
            frame.position = position;
        }
        tracing::debug!(window_id = %id, frame = ?frame, "committed frame");
    }

    pub fn bring_to_front(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            return;
        }
        let z_index = self.next_z_index();
        if let Some(window) = self.windows.get_mut(&id) {
            window.z_index = z_index;
            // Focus only ever points at an open panel.
            if window.is_open {
                self.active_window = Some(id);
            }
        }
        self.debug_check();
    }

    /// Closes the focused panel, otherwise opens and focuses it.
    ///
    /// A panel that was closed is revealed at a fresh, vertically centered
    /// spot rather than wherever it was last left.
    pub fn toggle_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        if self.active_window == Some(id) && window.is_open {
            if let Some(window) = self.windows.get_mut(&id) {
                window.is_open = false;
            }
            self.active_window = None;
            tracing::debug!(window_id = %id, "closed window");
            self.debug_check();
            return;
        }

        let reveal = (!window.is_open).then(|| self.reveal_position(window.size()));
        let z_index = self.next_z_index();
        if let Some(window) = self.windows.get_mut(&id) {
            window.is_open = true;
            window.z_index = z_index;
            if let Some(position) = reveal {
                window.placement.frame_mut().position = position;
            }
        }
        self.active_window = Some(id);
        tracing::debug!(window_id = %id, z_index, revealed = reveal.is_some(), "opened window");
        self.debug_check();
    }

    pub fn set_dragging_window(&mut self, id: Option<WindowId>) {
        self.dragging_window = id;
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = BTreeSet::new();
        for &id in &self.sidebar_order {
            let window = self
                .windows
                .get(&id)
                .ok_or(InvariantViolation::UnknownSidebarEntry(id))?;
            if window.container() != Container::Sidebar {
                return Err(InvariantViolation::SidebarEntryNotDocked(id));
            }
            if !seen.insert(id) {
                return Err(InvariantViolation::DuplicateSidebarEntry(id));
            }
        }
        for window in self.windows.values() {
            if window.container() == Container::Sidebar && !seen.contains(&window.id) {
                return Err(InvariantViolation::MissingSidebarEntry(window.id));
            }
            if window.z_index > self.global_z_index {
                return Err(InvariantViolation::ZIndexAhead {
                    id: window.id,
                    z_index: window.z_index,
                    counter: self.global_z_index,
                });
            }
        }
        if let Some(id) = self.active_window
            && !self.windows.get(&id).is_some_and(|w| w.is_open)
        {
            return Err(InvariantViolation::ActiveWindowNotOpen(id));
        }
        Ok(())
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }

    fn next_z_index(&mut self) -> u64 {
        self.global_z_index = self.global_z_index.saturating_add(1);
        self.global_z_index
    }

    fn reveal_position(&self, size: Size) -> Point {
        let height = if size.height > 0 {
            size.height
        } else {
            self.defaults.reveal_fallback_height
        };
        let y = ((self.viewport.height - height) / 2).max(self.defaults.reveal_min_top);
        Point::new(self.defaults.reveal_x, y)
    }

    #[cfg(test)]
    fn corrupt_sidebar_order(&mut self, order: Vec<WindowId>) {
        self.sidebar_order = order;
    }
}
