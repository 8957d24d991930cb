//! Runtime configuration: command-line flags and the geometry defaults the
//! window manager is built with.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::constants::*;
use crate::layout::{Point, Size};

/// Geometry defaults for one unit system.
///
/// Every placement rule in the registry and the gesture controllers reads its
/// constants from here, so the same state machine serves a pixel canvas and a
/// terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDefaults {
    pub cascade_step: i32,
    pub cascade_cycle: usize,
    pub default_main_position: Point,
    pub default_main_size: Size,
    pub min_size: Size,
    pub max_size: Size,
    pub reveal_x: i32,
    pub reveal_min_top: i32,
    pub reveal_fallback_height: i32,
    pub default_viewport: Size,
    pub drag_activation_distance: i32,
    pub sidebar_default_width: i32,
    pub sidebar_min_width: i32,
    pub sidebar_max_width: i32,
    pub sidebar_collapsed_width: i32,
    /// Pixels per unit; `1×1` for the native pixel canvas.
    pub unit: Size,
}

impl LayoutDefaults {
    /// The dashboard's native pixel values.
    pub const fn pixels() -> Self {
        Self {
            cascade_step: CASCADE_STEP,
            cascade_cycle: CASCADE_CYCLE,
            default_main_position: DEFAULT_MAIN_POSITION,
            default_main_size: DEFAULT_MAIN_SIZE,
            min_size: WINDOW_MIN_SIZE,
            max_size: WINDOW_MAX_SIZE,
            reveal_x: REVEAL_X,
            reveal_min_top: REVEAL_MIN_TOP,
            reveal_fallback_height: REVEAL_FALLBACK_HEIGHT,
            default_viewport: DEFAULT_VIEWPORT,
            drag_activation_distance: DRAG_ACTIVATION_DISTANCE,
            sidebar_default_width: SIDEBAR_DEFAULT_WIDTH,
            sidebar_min_width: SIDEBAR_MIN_WIDTH,
            sidebar_max_width: SIDEBAR_MAX_WIDTH,
            sidebar_collapsed_width: SIDEBAR_COLLAPSED_WIDTH,
            unit: Size::new(1, 1),
        }
    }

    /// Values for a terminal grid of `CELL_PIXELS` sized cells.
    pub fn cells() -> Self {
        Self::pixels().scaled(CELL_PIXELS)
    }

    /// Rescale every length by `unit` pixels per axis. Non-zero lengths never
    /// collapse to zero.
    pub fn scaled(self, unit: Size) -> Self {
        let ux = unit.width.max(1);
        let uy = unit.height.max(1);
        let sx = |v: i32| scale_len(v, ux);
        let sy = |v: i32| scale_len(v, uy);
        Self {
            cascade_step: sx(self.cascade_step).min(sy(self.cascade_step)),
            cascade_cycle: self.cascade_cycle,
            default_main_position: Point::new(
                sx(self.default_main_position.x),
                sy(self.default_main_position.y),
            ),
            default_main_size: Size::new(
                sx(self.default_main_size.width),
                sy(self.default_main_size.height),
            ),
            min_size: Size::new(sx(self.min_size.width), sy(self.min_size.height)),
            max_size: Size::new(sx(self.max_size.width), sy(self.max_size.height)),
            reveal_x: sx(self.reveal_x),
            reveal_min_top: sy(self.reveal_min_top),
            reveal_fallback_height: sy(self.reveal_fallback_height),
            default_viewport: Size::new(
                sx(self.default_viewport.width),
                sy(self.default_viewport.height),
            ),
            drag_activation_distance: sx(self.drag_activation_distance)
                .min(sy(self.drag_activation_distance)),
            sidebar_default_width: sx(self.sidebar_default_width),
            sidebar_min_width: sx(self.sidebar_min_width),
            sidebar_max_width: sx(self.sidebar_max_width),
            sidebar_collapsed_width: sx(self.sidebar_collapsed_width),
            unit: Size::new(self.unit.width * ux, self.unit.height * uy),
        }
    }

    pub fn scale_point(&self, point: Point) -> Point {
        Point::new(
            scale_len(point.x, self.unit.width),
            scale_len(point.y, self.unit.height),
        )
    }

    pub fn scale_size(&self, size: Size) -> Size {
        Size::new(
            scale_len(size.width, self.unit.width),
            scale_len(size.height, self.unit.height),
        )
    }
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self::pixels()
    }
}

fn scale_len(value: i32, unit: i32) -> i32 {
    let unit = unit.max(1);
    let scaled = value / unit;
    if scaled == 0 && value != 0 {
        value.signum()
    } else {
        scaled
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dash-dock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dockable panel workspace for the survey dashboard"
)]
pub struct Cli {
    /// Append tracing output to this file. Without it logs are discarded,
    /// since the terminal is owned by the UI.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Maximum tracing level written to the log file.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,

    /// Input poll interval in milliseconds.
    #[arg(long = "poll-ms", value_name = "MS", default_value_t = 16)]
    pub poll_ms: u64,

    /// Start with mouse capture disabled.
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Level,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log: LogConfig,
    pub poll_interval: Duration,
    pub mouse_capture: bool,
    pub layout: LayoutDefaults,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            log: LogConfig {
                file: cli.log_file,
                level: cli.log_level,
            },
            poll_interval: Duration::from_millis(cli.poll_ms.max(1)),
            mouse_capture: !cli.no_mouse,
            layout: LayoutDefaults::cells(),
        }
    }
}
