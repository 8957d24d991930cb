//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps every write to
//! the visible area.
//!
//! Free panels carry signed origins and routinely hang off the canvas edge.
//! Drawing goes through this type so chrome and content code can work in
//! panel coordinates and leave clipping to one place.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Wraps a bare buffer, for off-screen rendering and tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Blanks `rect` with `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Writes one symbol at a signed position, dropped unless it lands in
    /// both `clip` and the frame.
    pub fn set_symbol_signed(&mut self, x: i32, y: i32, symbol: &str, style: Style, clip: Rect) {
        let Some(bounds) = self.clip_rect(clip) else {
            return;
        };
        if x < bounds.x as i32
            || y < bounds.y as i32
            || x >= bounds.x as i32 + bounds.width as i32
            || y >= bounds.y as i32 + bounds.height as i32
        {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Signed counterpart of [`safe_set_string`]; characters left of the
    /// clip are skipped rather than shifting the text.
    pub fn set_string_signed(&mut self, x: i32, y: i32, text: &str, style: Style, clip: Rect) {
        let mut buf = [0u8; 4];
        for (idx, ch) in text.chars().enumerate() {
            let symbol = ch.encode_utf8(&mut buf);
            self.set_symbol_signed(x + idx as i32, y, symbol, style, clip);
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
