use crate::config::LayoutDefaults;
use crate::layout::floating::{ResizeEdge, ResizeLimits, apply_resize};
use crate::layout::{Frame, Point};
use crate::window::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePreview {
    pub id: WindowId,
    pub edge: ResizeEdge,
    pub frame: Frame,
}

#[derive(Debug, Clone, Copy)]
struct ResizeGesture {
    id: WindowId,
    edge: ResizeEdge,
    start_pointer: Point,
    start: Frame,
    current: Frame,
}

/// Edge and corner resizing of free panels.
///
/// Only the preview frame moves while the pointer does; the registry sees a
/// single `commit_frame` on release.
#[derive(Debug, Clone)]
pub struct ResizeController {
    gesture: Option<ResizeGesture>,
    limits: ResizeLimits,
}

impl ResizeController {
    pub fn new(limits: ResizeLimits) -> Self {
        Self {
            gesture: None,
            limits,
        }
    }

    pub fn from_defaults(defaults: &LayoutDefaults) -> Self {
        Self::new(ResizeLimits::from_defaults(defaults))
    }

    pub fn limits(&self) -> ResizeLimits {
        self.limits
    }

    pub fn in_flight(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn preview(&self) -> Option<ResizePreview> {
        self.gesture.map(|g| ResizePreview {
            id: g.id,
            edge: g.edge,
            frame: g.current,
        })
    }

    /// Starts resizing `id` from `edge`. Unknown, docked, closed or fixed
    /// size panels are ignored.
    pub fn begin(
        &mut self,
        registry: &WindowRegistry,
        id: WindowId,
        edge: ResizeEdge,
        pointer: Point,
    ) -> bool {
        self.gesture = None;
        let Some(window) = registry.window(id) else {
            return false;
        };
        if !window.is_open() || !window.is_resizable() {
            return false;
        }
        let Some(start) = window.free_frame() else {
            return false;
        };
        tracing::debug!(window_id = %id, ?edge, ?start, "resize started");
        self.gesture = Some(ResizeGesture {
            id,
            edge,
            start_pointer: pointer,
            start,
            current: start,
        });
        true
    }

    pub fn update(&mut self, pointer: Point) -> Option<ResizePreview> {
        let limits = self.limits;
        let gesture = self.gesture.as_mut()?;
        let delta = pointer.delta_from(gesture.start_pointer);
        gesture.current = apply_resize(gesture.start, gesture.edge, delta, &limits);
        self.preview()
    }

    /// Commits the previewed frame. The origin is only written when a north
    /// or west edge moved it.
    pub fn end(&mut self, registry: &mut WindowRegistry) -> Option<Frame> {
        let gesture = self.gesture.take()?;
        let frame = gesture.current;
        let position = gesture.edge.moves_origin().then_some(frame.position);
        registry.commit_frame(gesture.id, frame.size, position);
        Some(frame)
    }

    pub fn cancel(&mut self) -> Option<WindowId> {
        let gesture = self.gesture.take()?;
        tracing::debug!(window_id = %gesture.id, "resize cancelled");
        Some(gesture.id)
    }
}
