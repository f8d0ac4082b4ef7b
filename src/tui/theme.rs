// theme support for the tui

use ratatui::style::{Color, Modifier, Style};
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Ward,
    Clinic,
    Nord,
    Dracula,
    Gruvbox,
    SolarizedLight,
}

impl ThemeKind {
    pub const ALL: &'static [ThemeKind] = &[
        Self::Ward,
        Self::Clinic,
        Self::Nord,
        Self::Dracula,
        Self::Gruvbox,
        Self::SolarizedLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ward => "ward (dark)",
            Self::Clinic => "clinic (light)",
            Self::Nord => "nord",
            Self::Dracula => "dracula",
            Self::Gruvbox => "gruvbox",
            Self::SolarizedLight => "solarized light",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }
}

/// Light terminals get the clinic theme, everything else (or unknown) gets ward.
pub fn detect_theme() -> ThemeKind {
    if !std::io::stdout().is_terminal() {
        return ThemeKind::Ward;
    }
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeKind::Clinic,
        _ => ThemeKind::Ward,
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Theme {
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Ward => Self {
                bg: Color::Rgb(16, 24, 32),
                fg: Color::Rgb(214, 226, 232),
                accent: Color::Rgb(34, 184, 207),
                border: Color::Rgb(48, 66, 80),
                selection: Color::Rgb(30, 48, 60),
                error: Color::Rgb(240, 98, 110),
                success: Color::Rgb(94, 214, 152),
                warning: Color::Rgb(240, 190, 90),
                muted: Color::Rgb(110, 130, 145),
            },
            ThemeKind::Clinic => Self {
                bg: Color::Rgb(240, 249, 251),
                fg: Color::Rgb(24, 40, 48),
                accent: Color::Rgb(14, 116, 144),
                border: Color::Rgb(165, 212, 227),
                selection: Color::Rgb(207, 236, 244),
                error: Color::Rgb(190, 40, 60),
                success: Color::Rgb(30, 130, 80),
                warning: Color::Rgb(180, 120, 20),
                muted: Color::Rgb(110, 125, 135),
            },
            ThemeKind::Nord => Self {
                bg: Color::Rgb(46, 52, 64),
                fg: Color::Rgb(236, 239, 244),
                accent: Color::Rgb(136, 192, 208),
                border: Color::Rgb(67, 76, 94),
                selection: Color::Rgb(59, 66, 82),
                error: Color::Rgb(191, 97, 106),
                success: Color::Rgb(163, 190, 140),
                warning: Color::Rgb(235, 203, 139),
                muted: Color::Rgb(97, 110, 136),
            },
            ThemeKind::Dracula => Self {
                bg: Color::Rgb(40, 42, 54),
                fg: Color::Rgb(248, 248, 242),
                accent: Color::Rgb(139, 233, 253),
                border: Color::Rgb(68, 71, 90),
                selection: Color::Rgb(68, 71, 90),
                error: Color::Rgb(255, 85, 85),
                success: Color::Rgb(80, 250, 123),
                warning: Color::Rgb(241, 250, 140),
                muted: Color::Rgb(98, 114, 164),
            },
            ThemeKind::Gruvbox => Self {
                bg: Color::Rgb(40, 40, 40),
                fg: Color::Rgb(235, 219, 178),
                accent: Color::Rgb(131, 165, 152),
                border: Color::Rgb(80, 73, 69),
                selection: Color::Rgb(60, 56, 54),
                error: Color::Rgb(251, 73, 52),
                success: Color::Rgb(184, 187, 38),
                warning: Color::Rgb(250, 189, 47),
                muted: Color::Rgb(146, 131, 116),
            },
            ThemeKind::SolarizedLight => Self {
                bg: Color::Rgb(253, 246, 227),
                fg: Color::Rgb(88, 110, 117),
                accent: Color::Rgb(42, 161, 152),
                border: Color::Rgb(238, 232, 213),
                selection: Color::Rgb(238, 232, 213),
                error: Color::Rgb(220, 50, 47),
                success: Color::Rgb(133, 153, 0),
                warning: Color::Rgb(181, 137, 0),
                muted: Color::Rgb(147, 161, 161),
            },
        }
    }

    // style helpers
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }
}
