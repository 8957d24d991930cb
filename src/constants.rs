//! Shared crate-wide constants.
//!
//! Geometry is authored in the dashboard's native pixel units; hosts with a
//! coarser grid derive their values through `LayoutDefaults::scaled`.

use crate::layout::{Point, Size};

/// Diagonal step applied per cascade slot when a panel is placed on the canvas.
pub const CASCADE_STEP: i32 = 30;

/// Number of distinct cascade offsets before the diagonal wraps back to zero.
pub const CASCADE_CYCLE: usize = 10;

/// Where a panel lands when it enters the canvas without a usable position,
/// and where an undocked panel reappears after being dropped on the canvas.
pub const DEFAULT_MAIN_POSITION: Point = Point::new(200, 200);

/// Size given to a panel entering the canvas with a zero dimension. Docked
/// panels fill their slot and commonly never had a size of their own.
pub const DEFAULT_MAIN_SIZE: Size = Size::new(400, 500);

pub const WINDOW_MIN_SIZE: Size = Size::new(300, 200);
pub const WINDOW_MAX_SIZE: Size = Size::new(2000, 2000);

/// Horizontal position used when a closed panel is revealed.
pub const REVEAL_X: i32 = 60;

/// Revealed panels are vertically centered but never above this margin.
pub const REVEAL_MIN_TOP: i32 = 80;

/// Height assumed for centering when a panel has no height yet.
pub const REVEAL_FALLBACK_HEIGHT: i32 = 400;

/// Viewport assumed until the host reports a real one.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280, 800);

/// Pointer travel required before a header press turns into a drag.
pub const DRAG_ACTIVATION_DISTANCE: i32 = 3;

pub const SIDEBAR_DEFAULT_WIDTH: i32 = 480;
pub const SIDEBAR_MIN_WIDTH: i32 = 320;
pub const SIDEBAR_MAX_WIDTH: i32 = 720;
pub const SIDEBAR_COLLAPSED_WIDTH: i32 = 12;

/// First value handed out by the z counter. Seeded panels sit below it.
pub const INITIAL_GLOBAL_Z_INDEX: u64 = 100;

/// Pixel footprint of one terminal cell used by the terminal front-end.
pub const CELL_PIXELS: Size = Size::new(10, 25);

/// Two presses on the dock grip within this window count as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 500;
