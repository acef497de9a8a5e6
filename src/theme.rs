// Theme support for the TUI
//
// Provides color palettes that can be configured via config file.
// "auto" uses terminal's ANSI palette, "pink" reproduces the classic
// 256-color rose border look, named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Panel chrome
    pub border: Color,
    pub border_type: BorderType,
    pub title: Color,
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // File selector
    pub selection: Color,
    pub selection_fg: Color,
    pub directory: Color,
    pub disabled: Color,

    // Messages
    pub error: Color,
    pub success: Color,
    pub warning: Color,

    // Markdown
    pub heading_primary: Color,
    pub heading_secondary: Color,
    pub heading_other: Color,
    pub code_inline: Color,
    pub code_block: Color,
    pub link: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to "pink"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "auto" | "terminal" => Self::auto(),
            "nord" => Self::nord(),
            _ => Self::pink(),
        }
    }

    /// Rose borders on the terminal's own background
    pub fn pink() -> Self {
        Self {
            name: "pink".to_string(),
            border: Color::Indexed(205),
            border_type: BorderType::Rounded,
            title: Color::Indexed(212),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::Indexed(243),
            selection: Color::Indexed(212),
            selection_fg: Color::Black,
            directory: Color::Indexed(99),
            disabled: Color::Indexed(243),
            error: Color::Indexed(196),
            success: Color::Indexed(78),
            warning: Color::Indexed(214),
            heading_primary: Color::Indexed(212),
            heading_secondary: Color::Indexed(99),
            heading_other: Color::Indexed(75),
            code_inline: Color::Indexed(203),
            code_block: Color::Indexed(250),
            link: Color::Indexed(30),
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            border: Color::Magenta,
            border_type: BorderType::Rounded,
            title: Color::Cyan,
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            selection: Color::Magenta,
            selection_fg: Color::Black,
            directory: Color::Blue,
            disabled: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            heading_primary: Color::Magenta,
            heading_secondary: Color::Blue,
            heading_other: Color::Cyan,
            code_inline: Color::Yellow,
            code_block: Color::Gray,
            link: Color::Cyan,
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            border: Color::Rgb(0x4c, 0x56, 0x6a),      // polar night
            border_type: BorderType::Rounded,
            title: Color::Rgb(0x88, 0xc0, 0xd0),       // frost cyan
            background: Color::Rgb(0x2e, 0x34, 0x40),  // polar night
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),  // snow storm
            muted: Color::Rgb(0x61, 0x6e, 0x88),
            selection: Color::Rgb(0x88, 0xc0, 0xd0),   // frost cyan
            selection_fg: Color::Rgb(0x2e, 0x34, 0x40),
            directory: Color::Rgb(0x81, 0xa1, 0xc1),   // frost blue
            disabled: Color::Rgb(0x4c, 0x56, 0x6a),
            error: Color::Rgb(0xbf, 0x61, 0x6a),       // aurora red
            success: Color::Rgb(0xa3, 0xbe, 0x8c),     // aurora green
            warning: Color::Rgb(0xeb, 0xcb, 0x8b),     // aurora yellow
            heading_primary: Color::Rgb(0xb4, 0x8e, 0xad), // aurora purple
            heading_secondary: Color::Rgb(0x81, 0xa1, 0xc1),
            heading_other: Color::Rgb(0x8f, 0xbc, 0xbb), // frost teal
            code_inline: Color::Rgb(0xd0, 0x87, 0x70), // aurora orange
            code_block: Color::Rgb(0xe5, 0xe9, 0xf0),
            link: Color::Rgb(0x88, 0xc0, 0xd0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::pink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup_is_case_insensitive() {
        assert_eq!(Theme::by_name("NORD").name, "nord");
        assert_eq!(Theme::by_name("Auto").name, "auto");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_pink() {
        let theme = Theme::by_name("solarized");
        assert_eq!(theme.name, "pink");
        assert_eq!(theme.border, Color::Indexed(205));
    }
}
