//! Pointer gestures that end in a single registry commit.
//!
//! Both controllers hold their in-flight state outside the registry and only
//! touch it when the gesture completes, so a cancelled gesture leaves nothing
//! behind.

pub mod drag;
pub mod resize;

pub use drag::{DragCoordinator, DragPreview, DropOutcome, DropTarget};
pub use resize::{ResizeController, ResizePreview};
