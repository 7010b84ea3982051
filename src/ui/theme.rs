use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_selected: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_accent: Color,
    pub breadcrumb: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub rule: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg_primary: Color::Rgb(24, 26, 33),
            bg_selected: Color::Rgb(50, 56, 74),

            text_primary: Color::Rgb(230, 233, 240),
            text_secondary: Color::Rgb(180, 185, 200),
            text_muted: Color::Rgb(120, 125, 145),
            text_accent: Color::Rgb(56, 141, 233),
            breadcrumb: Color::Rgb(70, 177, 123),

            border: Color::Rgb(60, 65, 80),
            border_focused: Color::Rgb(56, 141, 233),
            rule: Color::Rgb(60, 65, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            bg_primary: Color::Rgb(250, 250, 252),
            bg_selected: Color::Rgb(210, 220, 240),

            text_primary: Color::Rgb(30, 35, 45),
            text_secondary: Color::Rgb(70, 75, 90),
            text_muted: Color::Rgb(130, 135, 150),
            text_accent: Color::Rgb(0, 100, 200),
            breadcrumb: Color::Rgb(40, 140, 80),

            border: Color::Rgb(200, 205, 215),
            border_focused: Color::Rgb(0, 120, 200),
            rule: Color::Rgb(200, 205, 215),
        }
    }

    // Style helpers
    pub fn background(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_primary)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_selected)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.text_accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn breadcrumb(&self) -> Style {
        Style::default().fg(self.breadcrumb)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.text_accent)
        } else {
            Style::default().fg(self.text_secondary)
        }
    }

    pub fn rule(&self) -> Style {
        Style::default().fg(self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemeName,
        }
        let w: Wrapper = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(w.theme, ThemeName::Light);
        assert!(toml::from_str::<Wrapper>("theme = \"neon\"").is_err());
    }

    #[test]
    fn test_focus_changes_border() {
        let theme = Theme::named(ThemeName::Dark);
        assert_ne!(theme.border_style(true), theme.border_style(false));
        assert_eq!(theme.border_style(true).fg, Some(theme.border_focused));
    }
}
