use ratatui::prelude::*;

/// Theme lookup errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown theme '{0}' (available: mocha, latte)")]
    UnknownTheme(String),
}

/// Built-in colour schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInTheme {
    Mocha,
    Latte,
}

impl BuiltInTheme {
    pub const ALL: [BuiltInTheme; 2] = [BuiltInTheme::Mocha, BuiltInTheme::Latte];

    pub fn name(self) -> &'static str {
        match self {
            BuiltInTheme::Mocha => "mocha",
            BuiltInTheme::Latte => "latte",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ThemeError> {
        let wanted = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
    }
}

/// Runtime theme with direct field access for all UI elements
#[derive(Debug, Clone)]
pub struct Theme {
    pub default_fg: Color,
    pub default_bg: Color,

    // === Title Bar ===
    pub title: Style,

    // === Form ===
    pub field_label: Style,
    pub field_required: Style,
    pub field_text: Style,
    pub field_border: Style,
    pub field_border_focused: Style,

    // === Image Panel ===
    pub image_border: Style,
    pub image_placeholder: Style,
    pub image_caption: Style,

    // === Modal Backgrounds ===
    pub help_modal_bg: Color,
    pub notice_modal_bg: Color,
    pub confirm_modal_bg: Color,

    // === Status Bar ===
    pub status_bar_bg: Color,
    pub status_key: Style,
    pub status_desc: Style,
    pub flash_info: Style,
    pub flash_warn: Style,
    pub flash_error: Style,

    // === Path Prompt ===
    pub prompt_input: Style,
    pub prompt_border: Style,

    // === Help Modal ===
    pub help_title: Style,
    pub help_header: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub help_footer: Style,

    // === Notice Modal ===
    pub notice_text: Style,
    pub notice_info_border: Style,
    pub notice_warn_border: Style,
    pub notice_error_border: Style,

    // === Confirm Modal ===
    pub confirm_text: Style,
    pub confirm_key: Style,

    // === Divider ===
    pub divider: String,
    pub divider_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Theme {
    /// Load a built-in theme by name
    pub fn load(name: &str) -> Result<Self, ThemeError> {
        Ok(match BuiltInTheme::from_name(name)? {
            BuiltInTheme::Mocha => Self::catppuccin_mocha(),
            BuiltInTheme::Latte => Self::catppuccin_latte(),
        })
    }

    /// Catppuccin Mocha theme (dark)
    pub fn catppuccin_mocha() -> Self {
        let fg = Color::Rgb(205, 214, 244);
        let bg = Color::Rgb(30, 30, 46);
        let subtle = Color::Rgb(166, 173, 200);
        let blue = Color::Rgb(137, 180, 250);
        let yellow = Color::Rgb(249, 226, 175);
        let red = Color::Rgb(243, 139, 168);
        let modal_bg = Color::Rgb(24, 24, 37);

        Theme {
            default_fg: fg,
            default_bg: bg,

            title: Style::default().fg(blue).add_modifier(Modifier::BOLD),

            field_label: Style::default().fg(subtle),
            field_required: Style::default().fg(red),
            field_text: Style::default().fg(fg),
            field_border: Style::default().fg(Color::Rgb(88, 91, 112)),
            field_border_focused: Style::default().fg(blue),

            image_border: Style::default().fg(Color::Rgb(88, 91, 112)),
            image_placeholder: Style::default().fg(subtle).add_modifier(Modifier::ITALIC),
            image_caption: Style::default().fg(subtle),

            help_modal_bg: modal_bg,
            notice_modal_bg: modal_bg,
            confirm_modal_bg: modal_bg,

            status_bar_bg: Color::Rgb(49, 50, 68),
            status_key: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtle),
            flash_info: Style::default().fg(Color::Rgb(166, 227, 161)),
            flash_warn: Style::default().fg(yellow),
            flash_error: Style::default().fg(red),

            prompt_input: Style::default().fg(yellow),
            prompt_border: Style::default().fg(blue),

            help_title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            help_header: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(yellow).add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(fg),
            help_footer: Style::default().fg(subtle),

            notice_text: Style::default().fg(fg),
            notice_info_border: Style::default().fg(blue),
            notice_warn_border: Style::default().fg(yellow),
            notice_error_border: Style::default().fg(red),

            confirm_text: Style::default().fg(fg),
            confirm_key: Style::default().fg(red),

            divider: "│".to_string(),
            divider_style: Style::default().fg(Color::Rgb(69, 71, 90)),
        }
    }

    /// Catppuccin Latte theme (light)
    pub fn catppuccin_latte() -> Self {
        let fg = Color::Rgb(76, 79, 105);
        let bg = Color::Rgb(239, 241, 245);
        let subtle = Color::Rgb(108, 111, 133);
        let blue = Color::Rgb(30, 102, 245);
        let yellow = Color::Rgb(223, 142, 29);
        let red = Color::Rgb(210, 15, 57);
        let modal_bg = Color::Rgb(230, 233, 239);

        Theme {
            default_fg: fg,
            default_bg: bg,

            title: Style::default().fg(blue).add_modifier(Modifier::BOLD),

            field_label: Style::default().fg(subtle),
            field_required: Style::default().fg(red),
            field_text: Style::default().fg(fg),
            field_border: Style::default().fg(Color::Rgb(172, 176, 190)),
            field_border_focused: Style::default().fg(blue),

            image_border: Style::default().fg(Color::Rgb(172, 176, 190)),
            image_placeholder: Style::default().fg(subtle).add_modifier(Modifier::ITALIC),
            image_caption: Style::default().fg(subtle),

            help_modal_bg: modal_bg,
            notice_modal_bg: modal_bg,
            confirm_modal_bg: modal_bg,

            status_bar_bg: Color::Rgb(220, 224, 232),
            status_key: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtle),
            flash_info: Style::default().fg(Color::Rgb(64, 160, 43)),
            flash_warn: Style::default().fg(yellow),
            flash_error: Style::default().fg(red),

            prompt_input: Style::default().fg(fg),
            prompt_border: Style::default().fg(blue),

            help_title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            help_header: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(yellow).add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(fg),
            help_footer: Style::default().fg(subtle),

            notice_text: Style::default().fg(fg),
            notice_info_border: Style::default().fg(blue),
            notice_warn_border: Style::default().fg(yellow),
            notice_error_border: Style::default().fg(red),

            confirm_text: Style::default().fg(fg),
            confirm_key: Style::default().fg(red),

            divider: "│".to_string(),
            divider_style: Style::default().fg(Color::Rgb(204, 208, 218)),
        }
    }
}
