use ratatui::style::Color;

// Centralized dashboard colors. Small helpers rather than constants so a
// caller never has to care which palette the terminal supports.

// Toolbar
pub fn toolbar_bg() -> Color {
    Color::DarkGray
}
pub fn toolbar_fg() -> Color {
    Color::White
}
pub fn toolbar_open_bg() -> Color {
    Color::Gray
}
pub fn toolbar_open_fg() -> Color {
    Color::Black
}
pub fn toolbar_inactive_fg() -> Color {
    Color::Gray
}

// Indicator
pub fn indicator_on() -> Color {
    Color::Green
}

// Decorator
pub fn header_focused_bg() -> Color {
    Color::Blue
}
pub fn header_bg() -> Color {
    Color::DarkGray
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn border_focused() -> Color {
    Color::Blue
}
pub fn border() -> Color {
    Color::DarkGray
}

// Dock
pub fn dock_bg() -> Color {
    Color::Black
}
pub fn grip() -> Color {
    Color::DarkGray
}
pub fn grip_active() -> Color {
    Color::Yellow
}

// Drag feedback
pub fn ghost() -> Color {
    Color::Yellow
}

// Content failures
pub fn fallback_fg() -> Color {
    Color::Red
}
