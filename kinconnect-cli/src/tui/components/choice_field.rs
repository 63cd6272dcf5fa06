//! Terminal rendering and state glue for searchable choice fields
//!
//! The field itself lives in `kinconnect_core`; pages own the value and pass
//! it in on every event and frame.

use kinconnect_core::{ChoiceField, FieldEvent, FieldView, Response};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::debug;

use crate::tui::app::FieldId;
use crate::tui::ui::{HitMap, HitTarget, ACCENT, DIM, HIGHLIGHT, SECONDARY};

/// Feed one event to `field`, storing any reported change into `value`
pub fn apply(field: &mut ChoiceField, value: &mut String, event: FieldEvent) -> Response {
    let current = value.clone();
    let mut changed: Option<String> = None;
    let response = field.handle(&current, event, |next| changed = Some(next.to_string()));

    if let Some(next) = changed {
        debug!(
            kind = %field.options().kind(),
            value = %next,
            custom = field.is_custom(&next),
            "choice value changed"
        );
        *value = next;
    }
    response
}

/// Draw the input box (3 rows: border, text, border)
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    view: &FieldView<'_>,
    field_id: FieldId,
    hits: &mut HitMap,
) {
    let border_color = if view.focused { ACCENT } else { SECONDARY };
    let mut title = vec![Span::styled(
        format!(" {} ", label),
        Style::default().fg(border_color).add_modifier(Modifier::BOLD),
    )];
    if view.custom {
        title.push(Span::styled("(custom) ", Style::default().fg(HIGHLIGHT)));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = Vec::new();
    if view.value.is_empty() {
        spans.push(Span::styled(view.display_text(), Style::default().fg(DIM)));
    } else {
        spans.push(Span::raw(view.value));
    }
    if view.focused {
        spans.push(Span::styled("|", Style::default().fg(ACCENT)));
    }
    let marker = if view.is_open() { " ▲" } else { " ▼" };
    spans.push(Span::styled(marker, Style::default().fg(SECONDARY)));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    hits.push(area, HitTarget::Field(field_id));
}

/// Draw the candidate list under `input_area`, clipped to `bounds`
///
/// Must run after the rest of the page so it overlays whatever is below the
/// input. Does nothing while the field is closed.
pub fn render_dropdown(
    frame: &mut Frame,
    input_area: Rect,
    bounds: Rect,
    view: &FieldView<'_>,
    max_rows: u16,
    field_id: FieldId,
    hits: &mut HitMap,
) {
    if !view.is_open() || view.candidates.is_empty() {
        return;
    }

    let top = input_area.bottom();
    let available = bounds.bottom().saturating_sub(top);
    let rows = (view.candidates.len() as u16).min(max_rows.max(1));
    let height = (rows + 2).min(available);
    if height <= 2 {
        return;
    }
    let visible = (height - 2) as usize;

    let area = Rect::new(input_area.x, top, input_area.width, height);
    frame.render_widget(Clear, area);

    // Scroll so the highlighted row stays visible
    let offset = match view.highlighted {
        Some(idx) if idx >= visible => idx + 1 - visible,
        _ => 0,
    };

    let title = format!(" {} matches ", view.candidates.len());
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(SECONDARY)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (row, (idx, candidate)) in view
        .candidates
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        let style = if view.highlighted == Some(idx) {
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(Span::styled(*candidate, style)), row_area);
        hits.push(row_area, HitTarget::Candidate(field_id, idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::screen_text;
    use kinconnect_core::{OptionKind, OptionSet};
    use ratatui::{backend::TestBackend, Terminal};

    fn field() -> ChoiceField {
        ChoiceField::new(
            OptionSet::new(
                OptionKind::MedicalConditions,
                ["Diabetes Type 1", "Diabetes Type 2", "Asthma"],
            ),
            "Pick one",
        )
    }

    #[test]
    fn test_apply_stores_changes() {
        let mut field = field();
        let mut value = String::new();
        apply(&mut field, &mut value, FieldEvent::Focus);
        apply(&mut field, &mut value, FieldEvent::InsertChar('d'));
        assert_eq!(value, "d");

        let response = apply(&mut field, &mut value, FieldEvent::Select(1));
        assert_eq!(response, Response::Selected);
        assert_eq!(value, "Diabetes Type 2");
    }

    #[test]
    fn test_dropdown_records_candidate_hits() {
        let mut field = field();
        let mut value = String::new();
        apply(&mut field, &mut value, FieldEvent::Focus);
        apply(&mut field, &mut value, FieldEvent::InsertChar('i'));

        let mut hits = HitMap::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| {
                let bounds = frame.area();
                let input = Rect::new(0, 0, 40, 3);
                let view = field.view(&value);
                render_input(frame, input, "Condition", &view, FieldId::Condition, &mut hits);
                render_dropdown(frame, input, bounds, &view, 8, FieldId::Condition, &mut hits);
            })
            .unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Diabetes Type 1"));
        assert!(!screen.contains("Asthma"));
        assert_eq!(hits.at(5, 1), Some(HitTarget::Field(FieldId::Condition)));
        assert_eq!(hits.at(5, 4), Some(HitTarget::Candidate(FieldId::Condition, 0)));
        assert_eq!(hits.at(5, 5), Some(HitTarget::Candidate(FieldId::Condition, 1)));
    }

    #[test]
    fn test_closed_field_draws_no_dropdown() {
        let field = field();
        let mut hits = HitMap::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| {
                let bounds = frame.area();
                let input = Rect::new(0, 0, 40, 3);
                let view = field.view("");
                render_input(frame, input, "Condition", &view, FieldId::Condition, &mut hits);
                render_dropdown(frame, input, bounds, &view, 8, FieldId::Condition, &mut hits);
            })
            .unwrap();

        assert!(screen_text(&terminal).contains("Pick one"));
        assert_eq!(hits.len(), 1);
    }
}
