use log::Level;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::app::AppMode;
use crate::logging::FlashMessage;

const EDIT_HINTS: &[(&[&str], &str)] = &[
    (&["Tab", "S-Tab"], "field"),
    (&["F2"], "register"),
    (&["F3"], "search"),
    (&["F4"], "update"),
    (&["F5"], "delete"),
    (&["F6"], "upload"),
    (&["F7"], "clear"),
    (&["F1"], "help"),
    (&["C-q"], "quit"),
];

const UPLOAD_HINTS: &[(&[&str], &str)] = &[(&["Enter"], "load image"), (&["Esc"], "cancel")];

const CONFIRM_HINTS: &[(&[&str], &str)] = &[(&["y"], "delete"), (&["n", "Esc"], "cancel")];

const HELP_HINTS: &[(&[&str], &str)] = &[(&["↑", "↓"], "scroll"), (&["Esc"], "close help")];

/// Render the bottom bar: the newest flash message if any, otherwise key hints
pub fn render_keyboard_hints(
    frame: &mut Frame,
    area: Rect,
    mode: AppMode,
    flash_messages: &[FlashMessage],
    theme: &Theme,
) {
    if let Some(flash) = flash_messages.last() {
        let style = match flash.level {
            Level::Error => theme.flash_error,
            Level::Warn => theme.flash_warn,
            _ => theme.flash_info,
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(flash.message.as_str(), style)))
            .style(Style::default().bg(theme.status_bar_bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let hint_data = match mode {
        AppMode::Edit => EDIT_HINTS,
        AppMode::Upload => UPLOAD_HINTS,
        AppMode::Confirm => CONFIRM_HINTS,
        AppMode::Help => HELP_HINTS,
    };

    let mut hints = Vec::new();

    for (keys, description) in hint_data {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let paragraph =
        Paragraph::new(Line::from(hints)).style(theme.status_desc.bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}
