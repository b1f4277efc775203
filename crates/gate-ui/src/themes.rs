use ratatui::style::{Color, Modifier, Style};

use gate_core::models::StatusTag;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark; 7–15 are light. Absent or unparseable values give
/// `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Styles used by the report view.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub danger: Style,
    pub neutral: Style,
    /// Suspicious-incident counter.
    pub warning: Style,

    // ── Efficiency gauge ─────────────────────────────────────────────────────
    pub gauge: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            danger: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            neutral: Style::default().fg(Color::Gray),
            warning: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            gauge: Style::default().fg(Color::Magenta).bg(Color::Black),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            danger: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            neutral: Style::default().fg(Color::DarkGray),
            warning: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            gauge: Style::default().fg(Color::Blue).bg(Color::White),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            success: Style::default().fg(Color::Green),
            danger: Style::default().fg(Color::Red),
            neutral: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            gauge: Style::default().fg(Color::Cyan),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style of a status cell.
    pub fn status_style(&self, tag: StatusTag) -> Style {
        match tag {
            StatusTag::Success => self.success,
            StatusTag::Danger => self.danger,
            StatusTag::Neutral => self.neutral,
        }
    }

    /// Style of the efficiency figure.
    ///
    /// * `≥ 80` → `success`
    /// * `50–79` → `warning`
    /// * `< 50` → `danger`
    pub fn efficiency_style(&self, efficiency: i64) -> Style {
        if efficiency >= 80 {
            self.success
        } else if efficiency >= 50 {
            self.warning
        } else {
            self.danger
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.success.fg, Some(Color::Green));
        assert_eq!(t.danger.fg, Some(Color::Red));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.success.add_modifier.contains(Modifier::BOLD));
        assert!(!t.danger.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(Theme::from_name("does-not-exist").header.fg.is_some());
    }

    #[test]
    fn test_status_style() {
        let t = Theme::dark();
        assert_eq!(t.status_style(StatusTag::Success).fg, Some(Color::Green));
        assert_eq!(t.status_style(StatusTag::Danger).fg, Some(Color::Red));
        assert_eq!(t.status_style(StatusTag::Neutral).fg, Some(Color::Gray));
    }

    #[test]
    fn test_efficiency_style_thresholds() {
        let t = Theme::dark();
        assert_eq!(t.efficiency_style(95).fg, Some(Color::Green));
        assert_eq!(t.efficiency_style(80).fg, Some(Color::Green));
        assert_eq!(t.efficiency_style(79).fg, Some(Color::Yellow));
        assert_eq!(t.efficiency_style(50).fg, Some(Color::Yellow));
        assert_eq!(t.efficiency_style(49).fg, Some(Color::Red));
    }
}
