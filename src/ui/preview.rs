use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui_image::StatefulImage;

use super::Theme;
use crate::image::{ImageProtocol, Preview};

/// Render the project image panel: bitmap or placeholder, caption underneath
pub fn render_image_panel(
    frame: &mut Frame,
    area: Rect,
    preview: &Preview,
    protocol: Option<&mut ImageProtocol>,
    pending_bytes: Option<usize>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.image_border)
        .title(Span::styled(" Project Image ", theme.field_label));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Image
            Constraint::Length(1), // Caption
        ])
        .split(inner);
    let image_area = chunks[0];
    let caption_area = chunks[1];

    match (preview.bitmap(), protocol) {
        (Some(bitmap), Some(protocol)) => {
            let state = protocol.state_for(bitmap, image_area);
            frame.render_stateful_widget(StatefulImage::new(None), image_area, state);
        }
        (Some(_), None) => render_placeholder(frame, image_area, "[Image loaded]", theme),
        (None, _) => {
            let text = preview.placeholder().unwrap_or_default();
            render_placeholder(frame, image_area, text, theme);
        }
    }

    let caption = match pending_bytes {
        Some(bytes) => format!("{} bytes attached", bytes),
        None => "F6 to upload".to_string(),
    };
    frame.render_widget(
        Paragraph::new(caption)
            .style(theme.image_caption)
            .alignment(Alignment::Center),
        caption_area,
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    // Vertically centre the single line
    let top_padding = area.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::from(""); top_padding as usize];
    lines.push(Line::from(Span::styled(text, theme.image_placeholder)));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
