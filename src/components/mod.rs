//! Panel content: the collaborator that fills a shell's content area.
//!
//! The window manager only owns chrome. Whatever draws inside a panel goes
//! through [`PanelContent`], and each mount is wrapped in a
//! [`ContentBoundary`] so one failing panel cannot take the dashboard down.

use std::collections::BTreeMap;

use ratatui::layout::Rect;
use ratatui::style::Style;
use thiserror::Error;
use tracing::{debug, warn};

use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::window::{PanelDraw, WindowId, WindowRegistry};

pub mod placeholder;

pub use placeholder::PlaceholderContent;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("panel content is unavailable: {0}")]
    Unavailable(String),
}

pub trait PanelContent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool)
    -> Result<(), ContentError>;
}

impl std::fmt::Debug for dyn PanelContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PanelContent")
    }
}

/// Isolates a content failure to its own panel.
///
/// The first error is logged and remembered; from then on the boundary
/// renders a fallback message instead of calling into the content again,
/// until [`ContentBoundary::reset`] clears it.
#[derive(Debug)]
pub struct ContentBoundary {
    id: WindowId,
    content: Box<dyn PanelContent>,
    failure: Option<String>,
}

impl ContentBoundary {
    pub fn new(id: WindowId, content: Box<dyn PanelContent>) -> Self {
        Self {
            id,
            content,
            failure: None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Forgets a failure so the next frame calls into the content again.
    /// Returns false when there was nothing to retry.
    pub fn reset(&mut self) -> bool {
        let had_failure = self.failure.take().is_some();
        if had_failure {
            debug!(window_id = %self.id, "retrying panel content");
        }
        had_failure
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.failure.is_none()
            && let Err(err) = self.content.render(frame, area, focused)
        {
            warn!(window_id = %self.id, error = %err, "panel content failed");
            self.failure = Some(err.to_string());
        }
        if let Some(message) = &self.failure {
            render_fallback(frame, area, message);
        }
    }
}

pub const RETRY_HINT: &str = "Press r to try again.";

fn render_fallback(frame: &mut UiFrame<'_>, area: Rect, message: &str) {
    frame.fill(area, Style::default());
    let style = Style::default().fg(theme::fallback_fg());
    let buffer = frame.buffer_mut();
    let bounds = area.intersection(buffer.area);
    let width = area.width as usize;
    safe_set_string(
        buffer,
        bounds,
        area.x,
        area.y,
        &truncate_to_width("This panel failed to render.", width),
        style,
    );
    if area.height > 1 {
        safe_set_string(
            buffer,
            bounds,
            area.x,
            area.y + 1,
            &truncate_to_width(message, width),
            style,
        );
    }
    if area.height > 2 {
        safe_set_string(
            buffer,
            bounds,
            area.x,
            area.y + 2,
            &truncate_to_width(RETRY_HINT, width),
            style,
        );
    }
}

/// Content mounts keyed by window id.
#[derive(Debug, Default)]
pub struct ContentSet {
    mounts: BTreeMap<WindowId, ContentBoundary>,
}

impl ContentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder content for every registered panel.
    pub fn placeholders(registry: &WindowRegistry) -> Self {
        let mut set = Self::new();
        for window in registry.windows() {
            set.mount(window.id(), Box::new(PlaceholderContent::new(window.kind())));
        }
        set
    }

    pub fn mount(&mut self, id: WindowId, content: Box<dyn PanelContent>) {
        self.mounts.insert(id, ContentBoundary::new(id, content));
    }

    pub fn boundary(&self, id: WindowId) -> Option<&ContentBoundary> {
        self.mounts.get(&id)
    }

    pub fn reset(&mut self, id: WindowId) -> bool {
        self.mounts.get_mut(&id).is_some_and(ContentBoundary::reset)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, draw: &PanelDraw) {
        if let Some(boundary) = self.mounts.get_mut(&draw.id) {
            boundary.render(frame, draw.surface.inner, draw.focused);
        }
    }
}
