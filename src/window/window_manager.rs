use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::decorator::{DashboardDecorator, WindowDecorator};
use super::defaults::window_id_for;
use super::shell::{PanelShell, ShellHit};
use super::{PanelKind, WindowId, WindowRegistry};
use crate::gesture::{DragCoordinator, DropTarget, ResizeController};
use crate::layout::dock::{GripPress, SidebarDock};
use crate::layout::{Container, Frame, Offset, Point, Size, rect_contains};
use crate::panel::{Toolbar, ToolbarHit};
use crate::theme;
use crate::ui::UiFrame;

/// Where a panel lands on screen this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSurface {
    /// Signed on-screen frame, chrome included.
    pub frame: Frame,
    /// Visible part of `frame`.
    pub full: Rect,
    /// Visible part of the content area.
    pub inner: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDraw {
    pub id: WindowId,
    pub kind: PanelKind,
    pub surface: PanelSurface,
    pub focused: bool,
    pub docked: bool,
}

/// Input layer over an injected [`WindowRegistry`].
///
/// Routes pointer and keyboard events to the panel shells, the gesture
/// controllers, the sidebar dock and the toolbar, and lays the result out for
/// drawing. Registry positions are relative to the canvas origin; shells and
/// pointer events are in screen cells.
#[derive(Debug)]
pub struct WindowManager {
    registry: WindowRegistry,
    drag: DragCoordinator,
    resize: ResizeController,
    dock: SidebarDock,
    toolbar: Toolbar,
    decorator: Arc<dyn WindowDecorator>,
    area: Rect,
    canvas: Rect,
    dock_area: Rect,
    // free panels bottom-most first, then docked panels
    shells: Vec<PanelShell>,
    mouse_capture_enabled: bool,
    mouse_capture_change: Option<bool>,
}

impl WindowManager {
    pub fn new(registry: WindowRegistry) -> Self {
        let defaults = *registry.defaults();
        Self {
            registry,
            drag: DragCoordinator::from_defaults(&defaults),
            resize: ResizeController::from_defaults(&defaults),
            dock: SidebarDock::new(&defaults),
            toolbar: Toolbar::new(),
            decorator: Arc::new(DashboardDecorator),
            area: Rect::default(),
            canvas: Rect::default(),
            dock_area: Rect::default(),
            shells: Vec::new(),
            mouse_capture_enabled: true,
            mouse_capture_change: None,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn dock(&self) -> &SidebarDock {
        &self.dock
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn decorator(&self) -> Arc<dyn WindowDecorator> {
        self.decorator.clone()
    }

    pub fn set_decorator(&mut self, decorator: Arc<dyn WindowDecorator>) {
        self.decorator = decorator;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn dock_area(&self) -> Rect {
        self.dock_area
    }

    pub fn shells(&self) -> &[PanelShell] {
        &self.shells
    }

    pub fn gesture_in_flight(&self) -> bool {
        self.drag.in_flight() || self.resize.in_flight() || self.dock.resizing()
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled != enabled {
            self.mouse_capture_enabled = enabled;
            self.mouse_capture_change = Some(enabled);
            if !enabled {
                self.cancel_gestures();
            }
        }
    }

    pub fn toggle_mouse_capture(&mut self) {
        self.set_mouse_capture_enabled(!self.mouse_capture_enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        self.mouse_capture_change.take()
    }

    /// Lays out toolbar, canvas and dock inside `area`.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.relayout();
    }

    pub fn toggle_panel(&mut self, kind: PanelKind) {
        self.registry.toggle_window(window_id_for(kind));
        self.relayout();
    }

    fn relayout(&mut self) {
        let (_, rest) = self.toolbar.split_area(self.area);
        let (canvas, dock_area) = self.dock.split(rest);
        self.canvas = canvas;
        self.dock_area = dock_area;
        self.registry
            .set_viewport(Size::new(canvas.width as i32, canvas.height as i32));
        self.shells = self.build_shells();
    }

    fn build_shells(&self) -> Vec<PanelShell> {
        let origin = Offset::new(self.canvas.x as i32, self.canvas.y as i32);
        let drag = self.drag.preview();
        let resize = self.resize.preview();
        let mut shells = Vec::new();
        for id in self.registry.main_draw_order() {
            let Some(window) = self.registry.window(id) else {
                continue;
            };
            let Some(mut frame) = window.free_frame() else {
                continue;
            };
            if let Some(preview) = resize
                && preview.id == id
            {
                frame = preview.frame;
            }
            if let Some(preview) = drag
                && preview.id == id
                && preview.origin == Container::Main
            {
                frame = frame.translated(preview.offset);
            }
            shells.push(PanelShell::new(
                id,
                frame.translated(origin),
                false,
                window.is_resizable(),
            ));
        }
        let docked = self.registry.visible_sidebar_order();
        let slots = self.dock.slots(self.dock_area, docked.len());
        for (id, slot) in docked.into_iter().zip(slots) {
            shells.push(PanelShell::new(id, Frame::from(slot), true, false));
        }
        shells
    }

    fn free_shell_at(&self, point: Point) -> Option<PanelShell> {
        self.shells
            .iter()
            .rev()
            .filter(|shell| !shell.docked)
            .find(|shell| shell.frame.contains(point))
            .copied()
    }

    fn docked_shell_at(&self, point: Point) -> Option<PanelShell> {
        self.shells
            .iter()
            .filter(|shell| shell.docked)
            .find(|shell| shell.frame.contains(point))
            .copied()
    }

    /// Resolves what a drag released at `point` would be dropped on. Free
    /// panels are never drop targets; the canvas under them is.
    pub fn drop_target_at(&self, point: Point) -> DropTarget {
        let (Ok(column), Ok(row)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
            return DropTarget::None;
        };
        if rect_contains(self.dock_area, column, row) {
            return self
                .docked_shell_at(point)
                .map_or(DropTarget::Sidebar, |shell| DropTarget::Window(shell.id));
        }
        if rect_contains(self.canvas, column, row) {
            return DropTarget::Canvas;
        }
        DropTarget::None
    }

    /// Drops every in-flight gesture without committing it.
    pub fn cancel_gestures(&mut self) -> bool {
        let dragged = self.drag.cancel(&mut self.registry).is_some();
        let resized = self.resize.cancel().is_some();
        let docked = self.dock.end_resize();
        if dragged || resized || docked {
            self.relayout();
            true
        } else {
            false
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.handle_event_at(event, Instant::now())
    }

    /// Same as [`handle_event`](Self::handle_event) with an explicit clock,
    /// which only matters for double presses on the dock grip.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Resize(width, height) => {
                self.set_area(Rect::new(0, 0, *width, *height));
                true
            }
            Event::FocusLost => self.cancel_gestures(),
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) if self.mouse_capture_enabled => {
                let consumed = self.handle_mouse(*mouse, now);
                if consumed {
                    self.relayout();
                }
                consumed
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press || key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Esc => self.cancel_gestures(),
            KeyCode::Char('m') => {
                self.toggle_mouse_capture();
                true
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.toggle_panel(PanelKind::ALL[index]);
                true
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        let point = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                // A press while a gesture is still open means its release
                // never arrived.
                if self.gesture_in_flight() {
                    tracing::debug!("stale gesture cancelled by new press");
                    self.cancel_gestures();
                }
                if button != MouseButton::Left {
                    return false;
                }
                self.press(mouse.column, mouse.row, now)
            }
            MouseEventKind::Drag(_) => self.pointer_moved(point),
            MouseEventKind::Up(_) => self.release(point),
            _ => false,
        }
    }

    fn press(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let point = Point::new(column as i32, row as i32);
        if rect_contains(self.toolbar.area(), column, row) {
            match self.toolbar.hit_test(column, row) {
                Some(ToolbarHit::Panel(kind)) => {
                    self.registry.toggle_window(window_id_for(kind));
                }
                Some(ToolbarHit::MouseCapture) => self.toggle_mouse_capture(),
                None => {}
            }
            return true;
        }
        if rect_contains(self.dock.grip_rect(self.dock_area), column, row) {
            if let GripPress::Toggled { collapsed } = self.dock.press_grip(point.x, now) {
                tracing::debug!(collapsed, "dock toggled from grip");
            }
            return true;
        }
        if rect_contains(self.dock_area, column, row) {
            if let Some(shell) = self.docked_shell_at(point) {
                self.press_shell(shell, point);
            }
            return true;
        }
        if rect_contains(self.canvas, column, row)
            && let Some(shell) = self.free_shell_at(point)
        {
            self.press_shell(shell, point);
            return true;
        }
        false
    }

    fn press_shell(&mut self, shell: PanelShell, point: Point) {
        let Some(hit) = shell.hit_test(point) else {
            return;
        };
        self.registry.bring_to_front(shell.id);
        match hit {
            ShellHit::Close => self.registry.toggle_window(shell.id),
            ShellHit::DockToggle => {
                let target = if shell.docked {
                    Container::Main
                } else {
                    Container::Sidebar
                };
                self.registry.move_window_to_container(shell.id, target);
            }
            ShellHit::Header => {
                self.drag.begin(&mut self.registry, shell.id, point);
            }
            ShellHit::Resize(edge) => {
                self.resize.begin(&self.registry, shell.id, edge, point);
            }
            ShellHit::Body => {}
        }
    }

    fn pointer_moved(&mut self, point: Point) -> bool {
        if self.resize.in_flight() {
            self.resize.update(point);
        } else if self.dock.resizing() {
            self.dock.update_resize(point.x);
        } else if self.drag.in_flight() {
            self.drag.update(&mut self.registry, point);
        } else {
            return false;
        }
        true
    }

    fn release(&mut self, point: Point) -> bool {
        if self.resize.in_flight() {
            self.resize.end(&mut self.registry);
        } else if self.dock.end_resize() {
            tracing::debug!(width = self.dock.width(), "dock resized");
        } else if self.drag.in_flight() {
            let target = self.drop_target_at(point);
            self.drag.end(&mut self.registry, target);
        } else {
            return false;
        }
        true
    }

    pub fn window_draw_plan(&self) -> Vec<PanelDraw> {
        let active = self.registry.active_window();
        self.shells
            .iter()
            .filter_map(|shell| {
                let window = self.registry.window(shell.id)?;
                let bounds = if shell.docked {
                    self.dock_area
                } else {
                    self.canvas
                };
                Some(PanelDraw {
                    id: shell.id,
                    kind: window.kind(),
                    surface: PanelSurface {
                        frame: shell.frame,
                        full: shell.frame.visible_in(bounds),
                        inner: shell.content().visible_in(bounds),
                    },
                    focused: active == Some(shell.id),
                    docked: shell.docked,
                })
            })
            .collect()
    }

    /// Toolbar, empty canvas and dock background.
    pub fn render_background(&self, frame: &mut UiFrame<'_>) {
        let registry = &self.registry;
        self.toolbar.render(frame, self.mouse_capture_enabled, |kind| {
            registry
                .window(window_id_for(kind))
                .is_some_and(|w| w.is_open())
        });
        frame.fill(self.canvas, Style::default());
        frame.fill(self.dock_area, Style::default().bg(theme::dock_bg()));
        let grip = self.dock.grip_rect(self.dock_area);
        let grip_style = if self.dock.resizing() {
            Style::default().fg(theme::grip_active())
        } else {
            Style::default().fg(theme::grip())
        };
        let glyph = if self.dock.collapsed() { "‹" } else { "┃" };
        for y in grip.y..grip.y.saturating_add(grip.height) {
            frame.set_symbol_signed(grip.x as i32, y as i32, glyph, grip_style, grip);
        }
    }

    pub fn render_chrome(&self, frame: &mut UiFrame<'_>, draw: &PanelDraw) {
        let Some(window) = self.registry.window(draw.id) else {
            return;
        };
        let Some(shell) = self.shells.iter().find(|s| s.id == draw.id) else {
            return;
        };
        let bounds = if draw.docked {
            self.dock_area
        } else {
            self.canvas
        };
        self.decorator
            .render_window(frame, shell, bounds, window.title(), draw.focused);
    }

    /// Outline of a docked panel being dragged out of the dock.
    pub fn drag_ghost(&self) -> Option<Frame> {
        let preview = self.drag.preview()?;
        if preview.origin != Container::Sidebar {
            return None;
        }
        self.shells
            .iter()
            .find(|s| s.id == preview.id && s.docked)
            .map(|s| s.frame.translated(preview.offset))
    }

    pub fn render_overlays(&self, frame: &mut UiFrame<'_>) {
        if let Some(ghost) = self.drag_ghost() {
            let (_, rest) = Toolbar::split(self.area);
            self.decorator.render_ghost(frame, ghost, rest);
        }
    }
}
