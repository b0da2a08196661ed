//! Theme definitions for meshmapper
//!
//! Provides three built-in themes: GitHub Dark, Nord, and Transparent.
//! Each theme defines colors for all UI elements.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent color
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub button_bg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Special indicators
    pub pinned_marker: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::GithubDark => Self::github_dark(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// GitHub dark theme (default)
    pub fn github_dark() -> Self {
        Self {
            // Base
            bg: Color::Rgb(13, 17, 23),           // #0d1117
            fg: Color::Rgb(255, 255, 255),        // #ffffff
            fg_dim: Color::Rgb(139, 148, 158),    // #8b949e

            // Accent (purple)
            accent: Color::Rgb(187, 134, 252),    // #bb86fc

            // Status
            success: Color::Rgb(63, 185, 80),     // #3fb950
            error: Color::Rgb(248, 81, 73),       // #f85149

            // UI elements
            border: Color::Rgb(48, 54, 61),       // #30363d
            border_focused: Color::Rgb(187, 134, 252), // #bb86fc
            button_bg: Color::Rgb(33, 38, 45),    // #21262d
            selection_bg: Color::Rgb(48, 54, 61), // #30363d
            selection_fg: Color::Rgb(255, 255, 255),

            pinned_marker: Color::Rgb(210, 153, 34), // yellow
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            // Base (Polar Night)
            bg: Color::Rgb(46, 52, 64),           // #2e3440
            fg: Color::Rgb(236, 239, 244),        // #eceff4
            fg_dim: Color::Rgb(76, 86, 106),      // #4c566a

            // Accent (Frost - blue)
            accent: Color::Rgb(136, 192, 208),    // #88c0d0

            // Status (Aurora)
            success: Color::Rgb(163, 190, 140),   // #a3be8c
            error: Color::Rgb(191, 97, 106),      // #bf616a

            // UI elements
            border: Color::Rgb(59, 66, 82),       // #3b4252
            border_focused: Color::Rgb(136, 192, 208), // #88c0d0
            button_bg: Color::Rgb(59, 66, 82),    // #3b4252
            selection_bg: Color::Rgb(76, 86, 106),    // #4c566a
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4

            pinned_marker: Color::Rgb(235, 203, 139),
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            // Base - use terminal defaults
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            accent: Color::Magenta,

            success: Color::Green,
            error: Color::Red,

            border: Color::DarkGray,
            border_focused: Color::Magenta,
            button_bg: Color::Reset,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            pinned_marker: Color::Yellow,
        }
    }

    // Style helpers for common UI patterns

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    pub fn button(&self) -> Style {
        Style::default().fg(self.fg).bg(self.button_bg)
    }

    pub fn button_focused(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Pinned shortcut marker
    pub fn marker_pinned(&self) -> Style {
        Style::default()
            .fg(self.pinned_marker)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let github = Theme::from_name(ThemeName::GithubDark);
        assert_eq!(github.bg, Color::Rgb(13, 17, 23));

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert_eq!(transparent.bg, Color::Reset);
    }
}
