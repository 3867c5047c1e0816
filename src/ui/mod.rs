pub mod form;
pub mod help;
pub mod layout;
pub mod notice;
pub mod preview;
pub mod prompt;
pub mod status;
pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::models::RegistrationId;

pub use form::{FormRenderContext, render_form};
pub use help::render_help_overlay;
pub use layout::{MainLayout, centered_rect, create_main_layout};
pub use notice::{Notice, Severity, render_notice};
pub use preview::render_image_panel;
pub use prompt::render_path_prompt;
pub use status::render_keyboard_hints;
pub use theme::{BuiltInTheme, Theme, ThemeError};

/// Window title shown above the form
pub const APP_TITLE: &str = "Innovation Exhibition Registration";

/// Render the title bar
pub fn render_title(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(APP_TITLE, theme.title)).alignment(Alignment::Center),
        area,
    );
}

/// Render vertical divider line between form and image panels
pub fn render_divider(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = (0..area.height)
        .map(|_| Line::from(Span::styled(theme.divider.as_str(), theme.divider_style)))
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Render delete confirmation dialog overlay
pub fn render_confirm_overlay(frame: &mut Frame, area: Rect, id: RegistrationId, theme: &Theme) {
    let overlay_area = centered_rect(50, 30, area);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let message = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete participant {}?", id),
            theme.confirm_text.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "(The record and its image are removed permanently)",
            theme.help_footer,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme.confirm_key.add_modifier(Modifier::BOLD)),
            Span::styled(" - Yes, delete  ", theme.confirm_text),
            Span::styled("n", theme.confirm_key.add_modifier(Modifier::BOLD)),
            Span::styled(" - No, cancel", theme.confirm_text),
        ]),
    ];

    let paragraph = Paragraph::new(message)
        .block(
            Block::default()
                .style(Style::default().bg(theme.confirm_modal_bg))
                .padding(ratatui::widgets::Padding::uniform(1)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(paragraph, overlay_area);
}
