use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::Theme;
use super::layout::centered_rect;
use crate::form::{FormError, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Modal message reporting the result of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Notice for a completed action; None when the form itself shows the result
    pub fn from_outcome(outcome: &Outcome) -> Option<Self> {
        let severity = match outcome {
            Outcome::Found(_) | Outcome::Cleared => return None,
            Outcome::UpdateMissed(_) | Outcome::DeleteMissed(_) => Severity::Warning,
            _ => Severity::Info,
        };
        Some(Notice::new(severity, outcome.title(), outcome.message()))
    }

    pub fn from_error(error: &FormError) -> Self {
        let severity = match error {
            FormError::Validation(_) => Severity::Warning,
            FormError::Store(_) | FormError::File(_) => Severity::Error,
        };
        Notice::new(severity, error.title(), error.to_string())
    }
}

/// Render notice modal with dismissal instructions
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    let overlay_area = centered_rect(60, 30, area);

    // Clear the background area first to hide underlying content
    frame.render_widget(Clear, overlay_area);

    let (icon, border) = match notice.severity {
        Severity::Info => ("ℹ", theme.notice_info_border),
        Severity::Warning => ("⚠", theme.notice_warn_border),
        Severity::Error => ("✖", theme.notice_error_border),
    };

    let text = format!("{}\n\nPress any key to dismiss...", notice.message);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!("{} {}", icon, notice.title))
                .style(Style::default().bg(theme.notice_modal_bg))
                .padding(ratatui::widgets::Padding::uniform(1)),
        )
        .style(theme.notice_text)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, overlay_area);
}
