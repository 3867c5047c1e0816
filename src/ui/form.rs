use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_input::Input;

use super::Theme;
use super::layout::{MIN_TERMINAL_HEIGHT, field_areas, form_fits};
use crate::form::{Field, FormBuffer};

/// Rendering context for the form panel
pub struct FormRenderContext<'a> {
    pub buffer: &'a FormBuffer,
    pub focused: Field,
    /// Editor for the focused field (cursor and horizontal scroll)
    pub editor: &'a Input,
    /// Show the terminal cursor in the focused field
    pub show_cursor: bool,
    pub theme: &'a Theme,
}

/// Render the six labelled text fields
pub fn render_form(frame: &mut Frame, area: Rect, ctx: FormRenderContext) {
    // A partial form would hide fields that can still take focus
    if !form_fits(area) {
        let message = format!(
            "Terminal too small: need at least {} rows to show the form",
            MIN_TERMINAL_HEIGHT
        );
        frame.render_widget(
            Paragraph::new(message)
                .style(ctx.theme.notice_text)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    for (field, field_area) in field_areas(area) {
        let is_focused = field == ctx.focused;

        let mut title = vec![Span::styled(format!(" {}", field.label()), ctx.theme.field_label)];
        if field.is_required() {
            title.push(Span::styled(" *", ctx.theme.field_required));
        }
        title.push(Span::raw(" "));

        let border_style = if is_focused {
            ctx.theme.field_border_focused
        } else {
            ctx.theme.field_border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(title));
        let inner = block.inner(field_area);

        // Keep the cursor visible in long values
        let scroll = if is_focused {
            ctx.editor.visual_scroll(inner.width.saturating_sub(1) as usize)
        } else {
            0
        };

        let paragraph = Paragraph::new(ctx.buffer.get(field))
            .style(ctx.theme.field_text)
            .scroll((0, scroll as u16))
            .block(block);
        frame.render_widget(paragraph, field_area);

        if is_focused && ctx.show_cursor {
            let cursor = ctx.editor.visual_cursor().max(scroll) - scroll;
            frame.set_cursor_position(Position::new(inner.x + cursor as u16, inner.y));
        }
    }
}
