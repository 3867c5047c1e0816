use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_input::Input;

use super::Theme;
use super::layout::centered_rect;

/// Render the image path prompt as a 3-row box in the middle of the screen
pub fn render_path_prompt(frame: &mut Frame, area: Rect, input: &Input, theme: &Theme) {
    let column = centered_rect(70, 100, area);
    let prompt_area = Rect {
        x: column.x,
        y: area.y + area.height.saturating_sub(3) / 2,
        width: column.width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, prompt_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.prompt_border)
        .title("Image file (jpg, png, gif, bmp) - Enter to load, Esc to cancel")
        .padding(ratatui::widgets::Padding::horizontal(1));
    let inner = block.inner(prompt_area);

    let scroll = input.visual_scroll(inner.width.saturating_sub(1) as usize);
    let paragraph = Paragraph::new(input.value())
        .block(block)
        .style(theme.prompt_input)
        .scroll((0, scroll as u16));
    frame.render_widget(paragraph, prompt_area);

    let cursor = input.visual_cursor().max(scroll) - scroll;
    frame.set_cursor_position(Position::new(inner.x + cursor as u16, inner.y));
}
