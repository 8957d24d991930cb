pub mod dock;
pub mod floating;

use ratatui::prelude::Rect;

use crate::config::LayoutDefaults;

/// Which of the two layout models a panel currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Container {
    /// Free-floating canvas with absolute position, size and z-order.
    Main,
    /// Ordered dock list; panels size to their slot.
    Sidebar,
}

/// Signed position. Free panels may sit partially off the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_origin(self) -> bool {
        self == Self::ORIGIN
    }

    pub fn offset(self, delta: Offset) -> Self {
        Self {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
        }
    }

    /// Delta that moves `from` onto `self`.
    pub fn delta_from(self, from: Point) -> Offset {
        Offset {
            dx: self.x.saturating_sub(from.x),
            dy: self.y.saturating_sub(from.y),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension has never been given a usable value.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Pointer travel between two samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Chebyshev distance, matching how a cell grid measures travel.
    pub fn distance(self) -> i32 {
        self.dx.saturating_abs().max(self.dy.saturating_abs())
    }
}

/// Signed origin with size: the canonical geometry of a free panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    pub position: Point,
    pub size: Size,
}

impl Frame {
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    pub fn translated(self, delta: Offset) -> Self {
        Self {
            position: self.position.offset(delta),
            size: self.size,
        }
    }

    pub fn right(self) -> i32 {
        self.position.x.saturating_add(self.size.width)
    }

    pub fn bottom(self) -> i32 {
        self.position.y.saturating_add(self.size.height)
    }

    pub fn contains(self, point: Point) -> bool {
        if self.size.is_degenerate() {
            return false;
        }
        point.x >= self.position.x
            && point.x < self.right()
            && point.y >= self.position.y
            && point.y < self.bottom()
    }

    /// Portion of the frame that lands inside `bounds`, as a buffer rect.
    pub fn visible_in(self, bounds: Rect) -> Rect {
        let left = self.position.x.max(bounds.x as i32);
        let top = self.position.y.max(bounds.y as i32);
        let right = self.right().min(bounds.x as i32 + bounds.width as i32);
        let bottom = self.bottom().min(bounds.y as i32 + bounds.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

impl From<Rect> for Frame {
    fn from(rect: Rect) -> Self {
        Self {
            position: Point::new(rect.x as i32, rect.y as i32),
            size: Size::new(rect.width as i32, rect.height as i32),
        }
    }
}

/// Offsets a newly placed free panel along the diagonal.
///
/// The offset repeats every `cascade_cycle` slots so a long run of opened
/// panels never walks off the canvas.
pub fn cascade_position(base: Point, slot_index: usize, defaults: &LayoutDefaults) -> Point {
    let cycle = defaults.cascade_cycle.max(1);
    let step = (slot_index % cycle) as i32 * defaults.cascade_step;
    base.offset(Offset::new(step, step))
}

/// Replaces the "never placed" origin sentinel when a panel enters `Main`.
pub fn repair_position_for_container(
    position: Point,
    target: Container,
    defaults: &LayoutDefaults,
) -> Point {
    match target {
        Container::Main if position.is_origin() => defaults.default_main_position,
        _ => position,
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_wraps_after_cycle() {
        let defaults = LayoutDefaults::pixels();
        let base = Point::new(100, 100);
        assert_eq!(cascade_position(base, 0, &defaults), base);
        assert_eq!(cascade_position(base, 3, &defaults), Point::new(190, 190));
        assert_eq!(
            cascade_position(base, defaults.cascade_cycle, &defaults),
            cascade_position(base, 0, &defaults)
        );
        assert_eq!(
            cascade_position(base, defaults.cascade_cycle + 2, &defaults),
            cascade_position(base, 2, &defaults)
        );
    }

    #[test]
    fn repair_only_touches_origin_entering_main() {
        let defaults = LayoutDefaults::pixels();
        assert_eq!(
            repair_position_for_container(Point::ORIGIN, Container::Main, &defaults),
            defaults.default_main_position
        );
        assert_eq!(
            repair_position_for_container(Point::ORIGIN, Container::Sidebar, &defaults),
            Point::ORIGIN
        );
        // a real placement that happens to sit on an axis is kept
        assert_eq!(
            repair_position_for_container(Point::new(0, 5), Container::Main, &defaults),
            Point::new(0, 5)
        );
    }

    #[test]
    fn visible_in_clips_negative_offsets() {
        let bounds = Rect {
            x: 0,
            y: 1,
            width: 80,
            height: 23,
        };
        let frame = Frame::new(Point::new(-5, 3), Size::new(20, 6));
        assert_eq!(
            frame.visible_in(bounds),
            Rect {
                x: 0,
                y: 3,
                width: 15,
                height: 6
            }
        );
        let gone = Frame::new(Point::new(-30, 3), Size::new(20, 6));
        assert_eq!(gone.visible_in(bounds), Rect::default());
    }

    #[test]
    fn frame_contains_is_half_open() {
        let frame = Frame::new(Point::new(2, 2), Size::new(3, 3));
        assert!(frame.contains(Point::new(2, 2)));
        assert!(frame.contains(Point::new(4, 4)));
        assert!(!frame.contains(Point::new(5, 4)));
        assert!(!Frame::new(Point::new(0, 0), Size::ZERO).contains(Point::ORIGIN));
    }

    #[test]
    fn offset_distance_is_chebyshev() {
        assert_eq!(Offset::new(-3, 1).distance(), 3);
        assert_eq!(Point::new(4, 9).delta_from(Point::new(1, 10)), Offset::new(3, -1));
    }

    #[test]
    fn rect_contains_edge_cases() {
        let r = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(r, 0, 0));
        let r2 = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r2, 1, 1));
        assert!(!rect_contains(r2, 4, 1));
    }
}
