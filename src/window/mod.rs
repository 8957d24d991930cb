pub mod decorator;
pub mod defaults;
pub mod registry;
pub mod shell;

mod window_manager;

use std::fmt;

pub use crate::layout::Container;
use crate::layout::{Frame, Point, Size};

pub use registry::{InvariantViolation, WindowRegistry};
pub use window_manager::{PanelDraw, PanelSurface, WindowManager};

/// Stable panel identifier. Panels are registered once per kind at start-up,
/// so ids are static strings and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(&'static str);

impl WindowId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Which content collaborator renders inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelKind {
    Settings,
    ResponsePlot,
    Bathymetry,
    CustomPlot,
    MisfitStats,
}

impl PanelKind {
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Settings,
        PanelKind::ResponsePlot,
        PanelKind::Bathymetry,
        PanelKind::CustomPlot,
        PanelKind::MisfitStats,
    ];

    /// Short label used by the toolbar.
    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Settings => "Settings",
            PanelKind::ResponsePlot => "Response",
            PanelKind::Bathymetry => "Bathymetry",
            PanelKind::CustomPlot => "Plot",
            PanelKind::MisfitStats => "Misfit",
        }
    }
}

/// Where a panel lives and the geometry that is meaningful there.
///
/// A docked panel keeps the last free frame it had so undocking can put it
/// back somewhere sensible; its slot is its index in the sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Free(Frame),
    Docked { restore: Frame },
}

impl Placement {
    pub fn container(&self) -> Container {
        match self {
            Placement::Free(_) => Container::Main,
            Placement::Docked { .. } => Container::Sidebar,
        }
    }

    pub fn frame(&self) -> Frame {
        match *self {
            Placement::Free(frame) | Placement::Docked { restore: frame } => frame,
        }
    }

    fn frame_mut(&mut self) -> &mut Frame {
        match self {
            Placement::Free(frame) | Placement::Docked { restore: frame } => frame,
        }
    }

    fn in_container(frame: Frame, container: Container) -> Self {
        match container {
            Container::Main => Placement::Free(frame),
            Container::Sidebar => Placement::Docked { restore: frame },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    id: WindowId,
    kind: PanelKind,
    title: String,
    placement: Placement,
    z_index: u64,
    is_open: bool,
    resizable: bool,
}

impl WindowState {
    pub fn new(id: WindowId, kind: PanelKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            placement: Placement::Free(Frame::default()),
            z_index: 0,
            is_open: false,
            resizable: true,
        }
    }

    pub fn docked(mut self) -> Self {
        self.placement = Placement::Docked {
            restore: self.placement.frame(),
        };
        self
    }

    pub fn with_frame(mut self, position: Point, size: Size) -> Self {
        *self.placement.frame_mut() = Frame::new(position, size);
        self
    }

    pub fn with_z_index(mut self, z_index: u64) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn opened(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn container(&self) -> Container {
        self.placement.container()
    }

    /// Stored frame, whether or not it is currently meaningful.
    pub fn frame(&self) -> Frame {
        self.placement.frame()
    }

    /// Frame of a free panel; `None` while docked.
    pub fn free_frame(&self) -> Option<Frame> {
        match self.placement {
            Placement::Free(frame) => Some(frame),
            Placement::Docked { .. } => None,
        }
    }

    pub fn position(&self) -> Point {
        self.frame().position
    }

    pub fn size(&self) -> Size {
        self.frame().size
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }
}
