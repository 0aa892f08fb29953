//! Congress palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const SKY_TEAL: Color = Color::Rgb(38, 198, 218); // #26c6da
pub const CORAL: Color = Color::Rgb(255, 138, 128); // #ff8a80
pub const SUNNY_YELLOW: Color = Color::Rgb(255, 213, 79); // #ffd54f
pub const SUCCESS_GREEN: Color = Color::Rgb(102, 187, 106); // #66bb6a
pub const ERROR_RED: Color = Color::Rgb(239, 83, 80); // #ef5350

pub const DIM_WHITE: Color = Color::Rgb(207, 216, 220); // #cfd8dc
pub const BORDER_GRAY: Color = Color::Rgb(96, 125, 139); // #607d8b
pub const BG_DARK: Color = Color::Rgb(26, 35, 43); // #1a232b

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(SKY_TEAL).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(CORAL)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn body() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn tab_active() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(SUNNY_YELLOW).add_modifier(Modifier::BOLD)
}

/// Card heading inside the carousel track.
pub fn card_title() -> Style {
    Style::default().fg(SUNNY_YELLOW).add_modifier(Modifier::BOLD)
}

pub fn arrow() -> Style {
    Style::default().fg(SKY_TEAL).add_modifier(Modifier::BOLD)
}

pub fn dot_active() -> Style {
    Style::default().fg(CORAL)
}

pub fn dot_inactive() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn progress() -> Style {
    Style::default().fg(SKY_TEAL).bg(BG_DARK)
}

/// The big countdown digits on the home screen.
pub fn countdown_value() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}
