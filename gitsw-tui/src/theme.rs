use gitsw_core::config::{NamedColor, ThemeColor, ThemeConfig};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub highlight_fg: Color,
    pub input: Color,
    pub current: Color,
    pub hint: Color,
    pub muted: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: to_ratatui_color(&config.accent),
            highlight_fg: to_ratatui_color(&config.highlight_fg),
            input: to_ratatui_color(&config.input),
            current: to_ratatui_color(&config.current),
            hint: to_ratatui_color(&config.hint),
            muted: to_ratatui_color(&config.muted),
            error: to_ratatui_color(&config.error),
        }
    }

    pub fn normal(&self) -> Style {
        Style::default()
    }

    /// Matched part of an unselected row.
    pub fn matched(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.accent).fg(self.highlight_fg)
    }

    pub fn selected_matched(&self) -> Style {
        self.selected().add_modifier(Modifier::BOLD)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.input)
    }

    pub fn current(&self) -> Style {
        Style::default().fg(self.current)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
            NamedColor::DarkGray => Color::DarkGray,
        },
    }
}
