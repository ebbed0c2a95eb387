//! Colors of the terminal panel.
//!
//! Unrelated to the Newt themes the panel lets the user pick; this only
//! decides how the panel itself looks on a dark or light terminal.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Palette used by [`SettingsView`](super::SettingsView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Panel and domain titles
    pub title: Color,
    /// Border of the focused domain and the highlighted option
    pub focus: Color,
    /// Migration confirmation
    pub confirmation: Color,
    /// Delete hint and the confirmation popup border
    pub danger: Color,
    /// Marker in front of custom items
    pub custom_marker: Color,
    /// Option labels
    pub text: Color,
    /// Help line, sync note, unfocused borders
    pub muted: Color,
    /// Panel background
    pub background: Color,
    /// Background of the highlighted option
    pub selection_bg: Color,
}

impl Theme {
    /// Resolves the configured mode, asking the OS when it is `Auto`.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Auto => match dark_light::detect() {
                Ok(dark_light::Mode::Light) => Self::light(),
                // Unknown or undetectable terminals get the dark palette
                Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => {
                    Self::dark()
                }
            },
        }
    }

    /// Palette for dark terminals.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            title: Color::Cyan,
            focus: Color::Yellow,
            confirmation: Color::Green,
            danger: Color::Red,
            custom_marker: Color::Magenta,
            text: Color::White,
            muted: Color::DarkGray,
            background: Color::Black,
            selection_bg: Color::DarkGray,
        }
    }

    /// Palette for light terminals.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            title: Color::Blue,
            focus: Color::Rgb(180, 100, 0),
            confirmation: Color::Rgb(0, 128, 0),
            danger: Color::Red,
            custom_marker: Color::Rgb(140, 0, 140),
            text: Color::Black,
            muted: Color::Gray,
            background: Color::White,
            selection_bg: Color::Rgb(230, 230, 230),
        }
    }
}
