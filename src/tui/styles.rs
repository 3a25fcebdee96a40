//! Botanical color palette and styles.

use ratatui::style::{Color, Modifier, Style};

/// Botanical theme color palette.
pub struct BotanicalTheme;

impl BotanicalTheme {
    // === Primary Colors ===

    /// Sea green, used for the predicted species
    pub const PRIMARY: Color = Color::Rgb(46, 139, 87); // #2E8B57

    /// Lighter green for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(110, 231, 183); // #6EE7B7

    /// Iris violet for accents
    pub const ACCENT: Color = Color::Rgb(139, 92, 246); // #8B5CF6

    // === Semantic Colors ===

    /// Amber - stale result
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - error
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue - info
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    /// Light slate for borders
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for the predicted species
    #[must_use]
    pub fn result() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for slider fill
    #[must_use]
    pub fn slider(focused: bool) -> Style {
        if focused {
            Style::default().fg(Self::PRIMARY_LIGHT)
        } else {
            Style::default().fg(Self::TEXT_MUTED)
        }
    }

    /// Style for a probability bar; the winning class is highlighted.
    #[must_use]
    pub fn bar(winner: bool) -> Style {
        if winner {
            Style::default().fg(Self::PRIMARY)
        } else {
            Style::default().fg(Self::ACCENT)
        }
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }
}
