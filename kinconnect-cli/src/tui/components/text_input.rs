//! Plain single-line text input

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::FieldId;
use crate::tui::ui::{HitMap, HitTarget, ACCENT, DIM, ERROR, SECONDARY};

/// What to draw for one text input
#[derive(Debug, Clone, Copy)]
pub struct TextInput<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    /// Paints the border red
    pub invalid: bool,
}

/// Draw a bordered text input and record its hit area
pub fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    input: TextInput<'_>,
    field_id: FieldId,
    hits: &mut HitMap,
) {
    let border_color = match (input.invalid, input.focused) {
        (true, _) => ERROR,
        (false, true) => ACCENT,
        (false, false) => SECONDARY,
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", input.label),
            Style::default().fg(border_color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = Vec::new();
    if input.value.is_empty() {
        spans.push(Span::styled(input.placeholder, Style::default().fg(DIM)));
    } else {
        spans.push(Span::raw(input.value));
    }
    if input.focused {
        spans.push(Span::styled("|", Style::default().fg(ACCENT)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
    hits.push(area, HitTarget::Field(field_id));
}
