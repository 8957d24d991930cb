use super::{Frame, Offset, Point, Size};

use crate::config::LayoutDefaults;

/// One of the eight resize directions, named by compass point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::N,
        ResizeEdge::S,
        ResizeEdge::E,
        ResizeEdge::W,
        ResizeEdge::NE,
        ResizeEdge::NW,
        ResizeEdge::SE,
        ResizeEdge::SW,
    ];

    pub fn has_north(self) -> bool {
        matches!(self, ResizeEdge::N | ResizeEdge::NE | ResizeEdge::NW)
    }

    pub fn has_south(self) -> bool {
        matches!(self, ResizeEdge::S | ResizeEdge::SE | ResizeEdge::SW)
    }

    pub fn has_east(self) -> bool {
        matches!(self, ResizeEdge::E | ResizeEdge::NE | ResizeEdge::SE)
    }

    pub fn has_west(self) -> bool {
        matches!(self, ResizeEdge::W | ResizeEdge::NW | ResizeEdge::SW)
    }

    /// Whether dragging this edge moves the panel origin.
    pub fn moves_origin(self) -> bool {
        self.has_north() || self.has_west()
    }
}

/// Inclusive bounds for a free panel's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeLimits {
    pub min: Size,
    pub max: Size,
}

impl ResizeLimits {
    pub fn new(min: Size, max: Size) -> Self {
        let min = Size::new(min.width.max(1), min.height.max(1));
        let max = Size::new(max.width.max(min.width), max.height.max(min.height));
        Self { min, max }
    }

    pub fn from_defaults(defaults: &LayoutDefaults) -> Self {
        Self::new(defaults.min_size, defaults.max_size)
    }

    fn clamp_width(&self, width: i32) -> i32 {
        width.clamp(self.min.width, self.max.width)
    }

    fn clamp_height(&self, height: i32) -> i32 {
        height.clamp(self.min.height, self.max.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHandle<R: Copy + Eq> {
    pub id: R,
    pub frame: Frame,
    pub edge: ResizeEdge,
}

/// Resizes `start` by pointer travel `delta` on `edge`.
///
/// East/south edges grow by the clamped delta. West/north edges derive both
/// the dimension and the origin shift from the same clamped value, so the
/// opposite edge stays exactly where it was.
pub fn apply_resize(start: Frame, edge: ResizeEdge, delta: Offset, limits: &ResizeLimits) -> Frame {
    let mut position = start.position;
    let mut width = start.size.width;
    let mut height = start.size.height;

    if edge.has_east() {
        width = limits.clamp_width(start.size.width.saturating_add(delta.dx));
    } else if edge.has_west() {
        width = limits.clamp_width(start.size.width.saturating_sub(delta.dx));
        position.x = start
            .position
            .x
            .saturating_add(start.size.width.saturating_sub(width));
    }

    if edge.has_south() {
        height = limits.clamp_height(start.size.height.saturating_add(delta.dy));
    } else if edge.has_north() {
        height = limits.clamp_height(start.size.height.saturating_sub(delta.dy));
        position.y = start
            .position
            .y
            .saturating_add(start.size.height.saturating_sub(height));
    }

    Frame::new(position, Size::new(width, height))
}

/// Hit regions for the eight handles around `frame`: one-cell corners and
/// the edges between them.
pub fn resize_handles_for_frame<R: Copy + Eq>(id: R, frame: Frame) -> Vec<ResizeHandle<R>> {
    let mut handles = Vec::new();
    let Frame { position, size } = frame;
    if size.is_degenerate() {
        return handles;
    }
    let right = position.x + size.width - 1;
    let bottom = position.y + size.height - 1;
    let cell = Size::new(1, 1);
    let corner = |x: i32, y: i32, edge: ResizeEdge| ResizeHandle {
        id,
        frame: Frame::new(Point::new(x, y), cell),
        edge,
    };
    handles.push(corner(position.x, position.y, ResizeEdge::NW));
    handles.push(corner(right, position.y, ResizeEdge::NE));
    handles.push(corner(position.x, bottom, ResizeEdge::SW));
    handles.push(corner(right, bottom, ResizeEdge::SE));
    if size.width > 2 {
        let span = Size::new(size.width - 2, 1);
        handles.push(ResizeHandle {
            id,
            frame: Frame::new(Point::new(position.x + 1, position.y), span),
            edge: ResizeEdge::N,
        });
        handles.push(ResizeHandle {
            id,
            frame: Frame::new(Point::new(position.x + 1, bottom), span),
            edge: ResizeEdge::S,
        });
    }
    if size.height > 2 {
        let span = Size::new(1, size.height - 2);
        handles.push(ResizeHandle {
            id,
            frame: Frame::new(Point::new(position.x, position.y + 1), span),
            edge: ResizeEdge::W,
        });
        handles.push(ResizeHandle {
            id,
            frame: Frame::new(Point::new(right, position.y + 1), span),
            edge: ResizeEdge::E,
        });
    }
    handles
}

pub fn resize_edge_at(frame: Frame, point: Point) -> Option<ResizeEdge> {
    resize_handles_for_frame((), frame)
        .into_iter()
        .find(|handle| handle.frame.contains(point))
        .map(|handle| handle.edge)
}
