use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::form::Field;

/// Rows taken by one bordered form field
pub const FIELD_HEIGHT: u16 = 3;

/// Rows needed to show every field
pub const FORM_HEIGHT: u16 = FIELD_HEIGHT * Field::ALL.len() as u16;

/// Terminal rows needed for the whole form (margin, title, spacers, hints)
pub const MIN_TERMINAL_HEIGHT: u16 = FORM_HEIGHT + 5;

/// Screen regions of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub title: Rect,
    pub form: Rect,
    pub divider: Rect,
    pub image: Rect,
    pub hints: Rect,
}

/// Create main application layout: title, form | divider | image panel, hints bar
pub fn create_main_layout(area: Rect) -> MainLayout {
    let margin_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top margin
            Constraint::Min(3),    // Content
        ])
        .split(area);

    let horizontal_margin = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2), // Left margin
            Constraint::Min(10),   // Content
            Constraint::Length(2), // Right margin
        ])
        .split(margin_chunks[1]);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Min(3),    // Form and image
            Constraint::Length(1), // Spacing before hints
            Constraint::Length(1), // Keyboard hints bar
        ])
        .split(horizontal_margin[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(58), // Form (left)
            Constraint::Length(3),      // Divider
            Constraint::Min(10),        // Image panel (right)
        ])
        .split(main_chunks[2]);

    MainLayout {
        title: main_chunks[0],
        form: content_chunks[0],
        divider: content_chunks[1],
        image: content_chunks[2],
        hints: main_chunks[4],
    }
}

/// One 3-row slot per form field, top to bottom; fields that do not fit are dropped
pub fn field_areas(form: Rect) -> Vec<(Field, Rect)> {
    Field::ALL
        .iter()
        .enumerate()
        .filter_map(|(i, &field)| {
            let y = form.y + i as u16 * FIELD_HEIGHT;
            if y + FIELD_HEIGHT > form.y + form.height {
                return None;
            }
            Some((
                field,
                Rect {
                    x: form.x,
                    y,
                    width: form.width,
                    height: FIELD_HEIGHT,
                },
            ))
        })
        .collect()
}

/// True when every field gets its slot in `form`
pub fn form_fits(form: Rect) -> bool {
    form.height >= FORM_HEIGHT
}

/// Create centered rectangle for popups/overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
