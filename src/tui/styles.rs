//! Colour palette and preset styles for the terminal front end.
//!
//! Each prediction view has its own accent colour, the terminal stand-in for
//! a per-page background.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Label;
use crate::ports::{Backdrop, NoticeLevel};

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Deep teal, the default accent
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    pub const PRIMARY_DARK: Color = Color::Rgb(15, 118, 110); // #0F766E

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // Per-view accents
    pub const DIABETES: Color = Color::Rgb(99, 102, 241); // #6366F1
    pub const HEART: Color = Color::Rgb(225, 29, 72); // #E11D48
    pub const PARKINSONS: Color = Color::Rgb(217, 119, 6); // #D97706

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Near-black with blue tint
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    /// Accent colour for the active backdrop.
    #[must_use]
    pub fn accent(backdrop: Backdrop) -> Color {
        match backdrop {
            Backdrop::Plain => Self::PRIMARY,
            Backdrop::Diabetes => Self::DIABETES,
            Backdrop::HeartDisease => Self::HEART,
            Backdrop::Parkinsons => Self::PARKINSONS,
        }
    }

    /// Subtitle in the backdrop's accent colour
    #[must_use]
    pub fn subtitle(backdrop: Backdrop) -> Style {
        Style::default()
            .fg(Self::accent(backdrop))
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

    /// Style for a status notice of the given level
    #[must_use]
    pub fn notice(level: NoticeLevel) -> Style {
        let color = match level {
            NoticeLevel::Info => Self::INFO,
            NoticeLevel::Success => Self::SUCCESS,
            NoticeLevel::Warning => Self::WARNING,
            NoticeLevel::Error => Self::DANGER,
        };
        Style::default().fg(color)
    }

    /// Style for a test result heading
    #[must_use]
    pub fn label(label: Label) -> Style {
        let color = match label {
            Label::Positive => Self::DANGER,
            Label::Negative => Self::SUCCESS,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Highlighted menu entry
    #[must_use]
    pub fn selected(backdrop: Backdrop) -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::accent(backdrop))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused(backdrop: Backdrop) -> Style {
        Style::default().fg(Self::accent(backdrop))
    }

    #[must_use]
    pub fn header(backdrop: Backdrop) -> Style {
        let bg = match backdrop {
            Backdrop::Plain => Self::PRIMARY_DARK,
            other => Self::accent(other),
        };
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
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

/// Name shown in the sidebar header
pub const APP_NAME: &str = "Predictive Disease Detection App";

/// Sidebar columns, borders included. Wide enough for the header.
pub const SIDEBAR_WIDTH: u16 = 36;
