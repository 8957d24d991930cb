use crate::config::LayoutDefaults;
use crate::layout::{Container, Offset, Point};
use crate::window::{WindowId, WindowRegistry};

/// What the pointer was over when a drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Released outside every drop zone.
    None,
    /// The free canvas.
    Canvas,
    /// The dock surface itself, between or below docked panels.
    Sidebar,
    /// A docked panel.
    Window(WindowId),
}

/// Effect a finished gesture had on the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved { id: WindowId, position: Point },
    Undocked { id: WindowId },
    Docked { id: WindowId },
    Reordered { id: WindowId, over: WindowId },
    /// Dropped somewhere that changes nothing.
    Unchanged { id: WindowId },
    /// Released before the pointer travelled far enough to start a drag.
    Click { id: WindowId },
    Cancelled { id: WindowId },
}

/// Ephemeral drag feedback; never written to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub id: WindowId,
    pub origin: Container,
    pub offset: Offset,
}

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    id: WindowId,
    origin: Container,
    start_pointer: Point,
    start_position: Point,
    offset: Offset,
    active: bool,
}

/// Drives header drags between the canvas and the dock.
///
/// A press arms a pending gesture. It becomes a drag once the pointer has
/// moved `activation_distance` away; releasing earlier is a click.
#[derive(Debug, Clone)]
pub struct DragCoordinator {
    gesture: Option<DragGesture>,
    activation_distance: i32,
}

impl DragCoordinator {
    pub fn new(activation_distance: i32) -> Self {
        Self {
            gesture: None,
            activation_distance: activation_distance.max(0),
        }
    }

    pub fn from_defaults(defaults: &LayoutDefaults) -> Self {
        Self::new(defaults.drag_activation_distance)
    }

    /// True between a press and its release or cancel.
    pub fn in_flight(&self) -> bool {
        self.gesture.is_some()
    }

    /// True once the activation distance has been reached.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|g| g.active)
    }

    pub fn dragged(&self) -> Option<WindowId> {
        self.gesture.map(|g| g.id)
    }

    pub fn preview(&self) -> Option<DragPreview> {
        self.gesture.filter(|g| g.active).map(|g| DragPreview {
            id: g.id,
            origin: g.origin,
            offset: g.offset,
        })
    }

    /// Arms a gesture for `id` pressed at `pointer`.
    ///
    /// A gesture still in flight from an earlier press lost its release;
    /// it is cancelled first.
    pub fn begin(&mut self, registry: &mut WindowRegistry, id: WindowId, pointer: Point) -> bool {
        if self.in_flight() {
            self.cancel(registry);
        }
        let Some(window) = registry.window(id) else {
            return false;
        };
        self.gesture = Some(DragGesture {
            id,
            origin: window.container(),
            start_pointer: pointer,
            start_position: window.position(),
            offset: Offset::default(),
            active: false,
        });
        true
    }

    pub fn update(&mut self, registry: &mut WindowRegistry, pointer: Point) -> Option<DragPreview> {
        let activation_distance = self.activation_distance;
        let gesture = self.gesture.as_mut()?;
        gesture.offset = pointer.delta_from(gesture.start_pointer);
        if !gesture.active && gesture.offset.distance() >= activation_distance {
            gesture.active = true;
            if gesture.origin == Container::Main {
                registry.set_dragging_window(Some(gesture.id));
            }
            tracing::debug!(window_id = %gesture.id, origin = ?gesture.origin, "drag started");
        }
        self.preview()
    }

    /// Resolves the drop and commits it.
    ///
    /// The dragging marker is cleared whatever the outcome.
    pub fn end(&mut self, registry: &mut WindowRegistry, target: DropTarget) -> Option<DropOutcome> {
        let gesture = self.gesture.take()?;
        registry.set_dragging_window(None);
        if !gesture.active {
            return Some(DropOutcome::Click { id: gesture.id });
        }
        let outcome = resolve_drop(registry, &gesture, target);
        tracing::debug!(window_id = %gesture.id, ?target, ?outcome, "drag ended");
        Some(outcome)
    }

    pub fn cancel(&mut self, registry: &mut WindowRegistry) -> Option<DropOutcome> {
        let gesture = self.gesture.take()?;
        registry.set_dragging_window(None);
        tracing::debug!(window_id = %gesture.id, "drag cancelled");
        Some(DropOutcome::Cancelled { id: gesture.id })
    }
}

fn resolve_drop(
    registry: &mut WindowRegistry,
    gesture: &DragGesture,
    target: DropTarget,
) -> DropOutcome {
    let id = gesture.id;
    let Some(dragged) = registry.window(id).map(|w| w.container()) else {
        return DropOutcome::Unchanged { id };
    };
    let target_docked = match target {
        DropTarget::Window(over) => registry
            .window(over)
            .is_some_and(|w| w.container() == Container::Sidebar),
        _ => false,
    };

    match (dragged, target) {
        (Container::Main, DropTarget::None | DropTarget::Canvas) => {
            let position = gesture.start_position.offset(gesture.offset);
            registry.update_position(id, position);
            DropOutcome::Moved { id, position }
        }
        (Container::Sidebar, DropTarget::None | DropTarget::Canvas) => {
            let position = registry.defaults().default_main_position;
            registry.move_window_to_container(id, Container::Main);
            registry.update_position(id, position);
            DropOutcome::Undocked { id }
        }
        (Container::Main, DropTarget::Sidebar) => {
            registry.move_window_to_container(id, Container::Sidebar);
            DropOutcome::Docked { id }
        }
        (Container::Main, DropTarget::Window(_)) if target_docked => {
            registry.move_window_to_container(id, Container::Sidebar);
            DropOutcome::Docked { id }
        }
        (Container::Sidebar, DropTarget::Window(over)) if target_docked && over != id => {
            registry.reorder_sidebar(id, over);
            DropOutcome::Reordered { id, over }
        }
        _ => DropOutcome::Unchanged { id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Size;
    use crate::window::{PanelKind, WindowState};

    const A: WindowId = WindowId::new("a");
    const B: WindowId = WindowId::new("b");
    const S1: WindowId = WindowId::new("s1");
    const S2: WindowId = WindowId::new("s2");
    const S3: WindowId = WindowId::new("s3");

    fn setup() -> WindowRegistry {
        let free = |id| {
            WindowState::new(id, PanelKind::CustomPlot, "free")
                .with_frame(Point::new(100, 100), Size::new(600, 400))
                .opened(true)
        };
        let docked = |id| {
            WindowState::new(id, PanelKind::Settings, "docked")
                .docked()
                .opened(true)
        };
        WindowRegistry::with_windows(
            LayoutDefaults::pixels(),
            [free(A), free(B), docked(S1), docked(S2), docked(S3)],
        )
    }

    fn drag(
        reg: &mut WindowRegistry,
        id: WindowId,
        by: Offset,
        target: DropTarget,
    ) -> Option<DropOutcome> {
        let mut coordinator = DragCoordinator::from_defaults(reg.defaults());
        let start = Point::new(500, 500);
        assert!(coordinator.begin(reg, id, start));
        coordinator.update(reg, start.offset(by));
        coordinator.end(reg, target)
    }

    #[test]
    fn main_to_canvas_moves_by_delta() {
        let mut reg = setup();
        let out = drag(&mut reg, A, Offset::new(40, -20), DropTarget::Canvas);
        let position = Point::new(140, 80);
        assert_eq!(out, Some(DropOutcome::Moved { id: A, position }));
        assert_eq!(reg.window(A).unwrap().position(), position);
        assert_eq!(reg.dragging_window(), None);
    }

    #[test]
    fn sidebar_to_canvas_undocks_at_default_position() {
        let mut reg = setup();
        let out = drag(&mut reg, S2, Offset::new(-300, 0), DropTarget::None);
        assert_eq!(out, Some(DropOutcome::Undocked { id: S2 }));
        let w = reg.window(S2).unwrap();
        assert_eq!(w.container(), Container::Main);
        assert_eq!(w.position(), Point::new(200, 200));
        assert_eq!(w.size(), Size::new(400, 500));
        assert_eq!(reg.sidebar_order(), &[S1, S3]);
    }

    #[test]
    fn main_onto_dock_or_docked_panel_docks_at_front() {
        let mut reg = setup();
        let out = drag(&mut reg, A, Offset::new(600, 0), DropTarget::Window(S3));
        assert_eq!(out, Some(DropOutcome::Docked { id: A }));
        assert_eq!(reg.sidebar_order(), &[A, S1, S2, S3]);

        let out = drag(&mut reg, B, Offset::new(600, 0), DropTarget::Sidebar);
        assert_eq!(out, Some(DropOutcome::Docked { id: B }));
        assert_eq!(reg.sidebar_order()[0], B);
    }

    #[test]
    fn sidebar_onto_docked_panel_reorders() {
        let mut reg = setup();
        let out = drag(&mut reg, S1, Offset::new(0, 10), DropTarget::Window(S3));
        assert_eq!(out, Some(DropOutcome::Reordered { id: S1, over: S3 }));
        assert_eq!(reg.sidebar_order(), &[S2, S3, S1]);
    }

    #[test]
    fn other_drops_change_nothing() {
        let mut reg = setup();
        let before: Vec<_> = reg.windows().cloned().collect();
        // main panel dropped onto another main panel
        let out = drag(&mut reg, A, Offset::new(5, 5), DropTarget::Window(B));
        assert_eq!(out, Some(DropOutcome::Unchanged { id: A }));
        // docked panel dropped onto the dock surface or itself
        let out = drag(&mut reg, S1, Offset::new(5, 5), DropTarget::Sidebar);
        assert_eq!(out, Some(DropOutcome::Unchanged { id: S1 }));
        let out = drag(&mut reg, S1, Offset::new(5, 5), DropTarget::Window(S1));
        assert_eq!(out, Some(DropOutcome::Unchanged { id: S1 }));
        assert_eq!(reg.windows().cloned().collect::<Vec<_>>(), before);
        assert_eq!(reg.sidebar_order(), &[S1, S2, S3]);
    }

    #[test]
    fn release_below_activation_distance_is_a_click() {
        let mut reg = setup();
        let mut c = DragCoordinator::new(3);
        c.begin(&mut reg, A, Point::new(10, 10));
        assert_eq!(c.update(&mut reg, Point::new(12, 8)), None);
        assert!(!c.is_dragging());
        assert_eq!(reg.dragging_window(), None);
        assert_eq!(c.end(&mut reg, DropTarget::Sidebar), Some(DropOutcome::Click { id: A }));
        assert_eq!(reg.window(A).unwrap().container(), Container::Main);
    }

    #[test]
    fn dragging_marker_only_for_free_panels() {
        let mut reg = setup();
        let mut c = DragCoordinator::new(1);
        c.begin(&mut reg, A, Point::ORIGIN);
        let preview = c.update(&mut reg, Point::new(4, 0)).unwrap();
        assert_eq!(preview.offset, Offset::new(4, 0));
        assert_eq!(reg.dragging_window(), Some(A));
        // registry untouched during the drag
        assert_eq!(reg.window(A).unwrap().position(), Point::new(100, 100));
        c.cancel(&mut reg);

        c.begin(&mut reg, S1, Point::ORIGIN);
        c.update(&mut reg, Point::new(4, 0));
        assert!(c.is_dragging());
        assert_eq!(reg.dragging_window(), None);
    }

    #[test]
    fn new_press_cancels_a_stale_gesture() {
        let mut reg = setup();
        let mut c = DragCoordinator::new(1);
        c.begin(&mut reg, A, Point::ORIGIN);
        c.update(&mut reg, Point::new(9, 9));
        assert_eq!(reg.dragging_window(), Some(A));
        // release was lost; next press starts clean
        assert!(c.begin(&mut reg, B, Point::ORIGIN));
        assert_eq!(reg.dragging_window(), None);
        assert_eq!(c.dragged(), Some(B));
        assert_eq!(reg.window(A).unwrap().position(), Point::new(100, 100));
    }

    #[test]
    fn unknown_ids_do_not_start_gestures() {
        let mut reg = setup();
        let mut c = DragCoordinator::new(1);
        assert!(!c.begin(&mut reg, WindowId::new("nope"), Point::ORIGIN));
        assert!(!c.in_flight());
        assert_eq!(c.end(&mut reg, DropTarget::Canvas), None);
        assert_eq!(c.cancel(&mut reg), None);
    }
}
