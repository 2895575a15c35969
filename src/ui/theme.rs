use crate::log::LogKind;
use crate::render::Tone;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub warning: Color,   // Yellow
    pub accent: Color,    // Mauve
    pub teal: Color,
    pub pink: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    warning: Color::Rgb(249, 226, 175),
    accent: Color::Rgb(203, 166, 247),
    teal: Color::Rgb(148, 226, 213),
    pink: Color::Rgb(245, 194, 231),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),
};

impl Theme {
    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Sorted => self.success,
            Tone::Found => self.teal,
            Tone::Swapping => self.error,
            Tone::Pivot => self.accent,
            Tone::Comparing => self.warning,
            Tone::Merging => self.pink,
            Tone::Visiting => self.secondary,
            Tone::Path => self.warning,
            Tone::Visited => self.teal,
            Tone::Range => self.primary,
            Tone::Normal => self.fg,
        }
    }

    pub fn log_kind(&self, kind: LogKind) -> Color {
        match kind {
            LogKind::Start => self.primary,
            LogKind::Compare => self.warning,
            LogKind::Swap => self.secondary,
            LogKind::Info => self.fg,
            LogKind::Found | LogKind::Success => self.success,
            LogKind::Error => self.error,
            LogKind::Warning => self.warning,
            LogKind::Visit => self.teal,
        }
    }
}
