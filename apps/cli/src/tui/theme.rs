//! Theme system for the TUI.
//!
//! Provides the News Explorer palette and a terminal-adaptive theme that
//! respects the user's terminal color scheme.

use ratatui::style::Color;
use std::env;

/// Check if the terminal supports true color (24-bit RGB).
fn supports_true_color() -> bool {
    if let Ok(colorterm) = env::var("COLORTERM") {
        let ct = colorterm.to_lowercase();
        if ct == "truecolor" || ct == "24bit" {
            return true;
        }
    }

    // Some terminals advertise it in TERM instead
    if let Ok(term) = env::var("TERM") {
        let t = term.to_lowercase();
        if t.contains("truecolor") || t.contains("24bit") || t.contains("direct") {
            return true;
        }
    }

    false
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// News Explorer palette (light text on dark)
    #[default]
    Explorer,
    /// Terminal-adaptive theme using ANSI colors
    Terminal,
}

/// Color palette for the TUI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // Backgrounds
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_selection: Color,

    // Borders
    pub border: Color,
    pub border_active: Color,

    // Text
    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent (links, active tab)
    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Keyword tag on cards
    pub tag: Color,

    // Spinner/loading
    pub spinner: Color,
}

impl Theme {
    /// News Explorer palette, RGB when the terminal supports it.
    pub fn explorer() -> Self {
        if supports_true_color() {
            Self::explorer_rgb()
        } else {
            Self::explorer_256()
        }
    }

    fn explorer_rgb() -> Self {
        Self {
            bg: Color::Rgb(0x1A, 0x1B, 0x22),
            bg_panel: Color::Rgb(0x22, 0x24, 0x2C),
            bg_selection: Color::Rgb(0x34, 0x37, 0x44),

            border: Color::Rgb(0x4A, 0x4E, 0x5E),
            border_active: Color::Rgb(0x2F, 0x71, 0xE5), // link blue

            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_secondary: Color::Rgb(0xD1, 0xD2, 0xD6),
            text_muted: Color::Rgb(0xB6, 0xBC, 0xBF),

            accent: Color::Rgb(0x2F, 0x71, 0xE5),

            success: Color::Rgb(0x8E, 0xEF, 0xB0),
            warning: Color::Rgb(0xEE, 0xD2, 0x63),
            error: Color::Rgb(0xFF, 0x00, 0x00),
            info: Color::Rgb(0x8E, 0xB2, 0xEB),

            tag: Color::Rgb(0xEE, 0xD2, 0x63),

            spinner: Color::Rgb(0x2F, 0x71, 0xE5),
        }
    }

    fn explorer_256() -> Self {
        // 232-255 grayscale, 16-231 color cube
        Self {
            bg: Color::Indexed(234),
            bg_panel: Color::Indexed(235),
            bg_selection: Color::Indexed(238),

            border: Color::Indexed(240),
            border_active: Color::Indexed(33),

            text: Color::Indexed(255),
            text_secondary: Color::Indexed(252),
            text_muted: Color::Indexed(248),

            accent: Color::Indexed(33),

            success: Color::Indexed(121),
            warning: Color::Indexed(221),
            error: Color::Indexed(196),
            info: Color::Indexed(111),

            tag: Color::Indexed(221),

            spinner: Color::Indexed(33),
        }
    }

    /// Create a terminal-adaptive theme using ANSI colors.
    pub fn terminal() -> Self {
        Self {
            bg: Color::Reset,
            bg_panel: Color::Reset,
            bg_selection: Color::DarkGray,

            border: Color::DarkGray,
            border_active: Color::Blue,

            text: Color::Reset,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            accent: Color::Blue,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,

            tag: Color::Yellow,

            spinner: Color::Blue,
        }
    }

    /// Get theme based on mode.
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Explorer => Self::explorer(),
            ThemeMode::Terminal => Self::terminal(),
        }
    }
}
