//! `/test-dropdowns` - condition and allergy selects with their current values

use crossterm::event::{KeyCode, KeyEvent};
use kinconnect_core::{
    allergy_select, medical_condition_select, ChoiceField, FieldEvent, OptionsConfig, Response,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{FieldId, Route};
use crate::tui::components::{apply, render_dropdown, render_input};
use crate::tui::event::{field_event, HandleResult};
use crate::tui::ui::{render_links, HitMap, HitTarget, ACCENT, DIM, HIGHLIGHT, SECONDARY};

/// Focusable widgets in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Condition,
    Allergy,
    HomeLink,
    DashboardLink,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Condition,
        Focus::Allergy,
        Focus::HomeLink,
        Focus::DashboardLink,
    ];

    fn step(self, forward: bool) -> Focus {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }

    fn field(self) -> Option<FieldId> {
        match self {
            Focus::Condition => Some(FieldId::Condition),
            Focus::Allergy => Some(FieldId::Allergy),
            Focus::HomeLink | Focus::DashboardLink => None,
        }
    }

    fn link(self) -> Option<Route> {
        match self {
            Focus::HomeLink => Some(Route::Home),
            Focus::DashboardLink => Some(Route::Dashboard),
            Focus::Condition | Focus::Allergy => None,
        }
    }
}

#[derive(Debug)]
pub struct DropdownTestPage {
    /// Selected or typed medical condition
    pub condition: String,
    /// Selected or typed allergy
    pub allergy: String,
    condition_field: ChoiceField,
    allergy_field: ChoiceField,
    focus: Option<Focus>,
}

impl DropdownTestPage {
    pub fn new(options: &OptionsConfig) -> Self {
        Self {
            condition: String::new(),
            allergy: String::new(),
            condition_field: medical_condition_select(options, "Search medical conditions..."),
            allergy_field: allergy_select(options, "Search allergies..."),
            focus: None,
        }
    }

    pub fn on_enter(&mut self) {
        self.set_focus(Some(Focus::Condition));
    }

    pub fn on_leave(&mut self) {
        self.set_focus(None);
    }

    /// The choice field holding keyboard focus, if any
    pub fn focused_field(&self) -> Option<FieldId> {
        self.focus.and_then(Focus::field)
    }

    fn field_mut(&mut self, id: FieldId) -> Option<(&mut ChoiceField, &mut String)> {
        match id {
            FieldId::Condition => Some((&mut self.condition_field, &mut self.condition)),
            FieldId::Allergy => Some((&mut self.allergy_field, &mut self.allergy)),
            FieldId::Invite(_) => None,
        }
    }

    fn send(&mut self, id: FieldId, event: FieldEvent) -> Response {
        match self.field_mut(id) {
            Some((field, value)) => apply(field, value, event),
            None => Response::Ignored,
        }
    }

    fn set_focus(&mut self, focus: Option<Focus>) {
        if self.focus == focus {
            return;
        }
        if let Some(old) = self.focused_field() {
            self.send(old, FieldEvent::Blur);
        }
        self.focus = focus;
        if let Some(new) = self.focused_field() {
            self.send(new, FieldEvent::Focus);
        }
    }

    fn cycle(&mut self, forward: bool) {
        let next = self.focus.map_or(Focus::Condition, |f| f.step(forward));
        self.set_focus(Some(next));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HandleResult {
        match key.code {
            KeyCode::Tab => {
                self.cycle(true);
                return HandleResult::Continue;
            }
            KeyCode::BackTab => {
                self.cycle(false);
                return HandleResult::Continue;
            }
            _ => {}
        }

        let Some(focus) = self.focus else {
            self.set_focus(Some(Focus::Condition));
            return HandleResult::Continue;
        };

        if let Some(route) = focus.link() {
            return match key.code {
                KeyCode::Enter => HandleResult::Navigate(route),
                KeyCode::Esc => HandleResult::Navigate(Route::Home),
                KeyCode::Up | KeyCode::Left => {
                    self.cycle(false);
                    HandleResult::Continue
                }
                KeyCode::Down | KeyCode::Right => {
                    self.cycle(true);
                    HandleResult::Continue
                }
                _ => HandleResult::Continue,
            };
        }

        let (Some(id), Some(event)) = (focus.field(), field_event(key)) else {
            return HandleResult::Continue;
        };
        match self.send(id, event) {
            // Enter on a closed field moves on; Esc on a closed field leaves
            Response::Ignored => match key.code {
                KeyCode::Enter => {
                    self.cycle(true);
                    HandleResult::Continue
                }
                KeyCode::Esc => HandleResult::Navigate(Route::Home),
                _ => HandleResult::Continue,
            },
            Response::Handled | Response::Selected => HandleResult::Continue,
        }
    }

    /// Append pasted text to the focused select, filtering as if typed
    pub fn handle_paste(&mut self, text: &str) -> HandleResult {
        if let Some(id) = self.focused_field() {
            let current = match id {
                FieldId::Condition => &self.condition,
                FieldId::Allergy => &self.allergy,
                FieldId::Invite(_) => return HandleResult::Continue,
            };
            let next = format!("{}{}", current, text);
            self.send(id, FieldEvent::Input(next));
        }
        HandleResult::Continue
    }

    pub fn handle_click(&mut self, target: HitTarget) -> HandleResult {
        match target {
            HitTarget::Field(FieldId::Condition) => self.set_focus(Some(Focus::Condition)),
            HitTarget::Field(FieldId::Allergy) => self.set_focus(Some(Focus::Allergy)),
            HitTarget::Candidate(id, idx) => {
                let focus = match id {
                    FieldId::Condition => Focus::Condition,
                    FieldId::Allergy => Focus::Allergy,
                    FieldId::Invite(_) => return HandleResult::Continue,
                };
                self.set_focus(Some(focus));
                self.send(id, FieldEvent::Select(idx));
            }
            HitTarget::Link(route) => return HandleResult::Navigate(route),
            HitTarget::Field(FieldId::Invite(_)) | HitTarget::MenuItem(_) | HitTarget::Submit => {}
        }
        HandleResult::Continue
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, max_rows: u16, hits: &mut HitMap) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Condition
                Constraint::Length(3), // Allergy
                Constraint::Length(4), // Selected values
                Constraint::Length(1), // Links
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Dropdown Test",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Type to search, pick a match, or keep your own text",
                Style::default().fg(SECONDARY),
            )),
        ]);
        frame.render_widget(header, chunks[0]);

        let condition = self.condition_field.view(&self.condition);
        let allergy = self.allergy_field.view(&self.allergy);

        render_input(
            frame,
            chunks[1],
            "Medical Condition",
            &condition,
            FieldId::Condition,
            hits,
        );
        render_input(frame, chunks[2], "Allergy", &allergy, FieldId::Allergy, hits);

        let selected = Paragraph::new(vec![
            selected_line("Medical Condition", &self.condition, condition.custom),
            selected_line("Allergy", &self.allergy, allergy.custom),
        ])
        .block(
            Block::default()
                .title(" Selected values ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        );
        frame.render_widget(selected, chunks[3]);

        render_links(
            frame,
            chunks[4],
            &[
                (Route::Home, self.focus == Some(Focus::HomeLink)),
                (Route::Dashboard, self.focus == Some(Focus::DashboardLink)),
            ],
            hits,
        );

        // Overlay last so it sits above the panels below the inputs
        let open = match self.focused_field() {
            Some(FieldId::Condition) => Some((chunks[1], &condition, FieldId::Condition)),
            Some(FieldId::Allergy) => Some((chunks[2], &allergy, FieldId::Allergy)),
            _ => None,
        };
        if let Some((input, view, id)) = open {
            render_dropdown(frame, input, area, view, max_rows, id, hits);
        }
    }
}

fn selected_line<'a>(label: &'a str, value: &'a str, custom: bool) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{}: ", label),
        Style::default().fg(SECONDARY),
    )];
    if value.is_empty() {
        spans.push(Span::styled("None selected", Style::default().fg(DIM)));
    } else {
        spans.push(Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        if custom {
            spans.push(Span::styled(" (custom)", Style::default().fg(HIGHLIGHT)));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::screen_text;
    use crossterm::event::KeyModifiers;
    use kinconnect_core::DropdownState;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(page: &mut DropdownTestPage, text: &str) {
        for c in text.chars() {
            page.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn entered() -> DropdownTestPage {
        let mut page = DropdownTestPage::new(&OptionsConfig::default());
        page.on_enter();
        page
    }

    fn draw(page: &DropdownTestPage) -> (String, HitMap) {
        let mut hits = HitMap::default();
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                page.render(frame, area, 8, &mut hits);
            })
            .unwrap();
        (screen_text(&terminal), hits)
    }

    #[test]
    fn test_keyboard_pick() {
        let mut page = entered();
        type_text(&mut page, "dia");
        page.handle_key(press(KeyCode::Down));
        page.handle_key(press(KeyCode::Enter));

        assert_eq!(page.condition, "Diabetes Type 1");
        assert_eq!(page.condition_field.state(), DropdownState::Closed);
    }

    #[test]
    fn test_custom_entry_survives_tab() {
        let mut page = entered();
        page.handle_key(press(KeyCode::Tab));
        type_text(&mut page, "Peanut Allergy");
        page.handle_key(press(KeyCode::Tab));

        assert_eq!(page.allergy, "Peanut Allergy");
        assert_eq!(page.focused_field(), None);
        assert_eq!(page.allergy_field.state(), DropdownState::Closed);
        assert!(page.allergy_field.is_custom(&page.allergy));
    }

    #[test]
    fn test_enter_on_closed_field_moves_focus() {
        let mut page = entered();
        type_text(&mut page, "zzz");
        page.handle_key(press(KeyCode::Enter));
        assert_eq!(page.focused_field(), Some(FieldId::Allergy));
        assert_eq!(page.condition, "zzz");
    }

    #[test]
    fn test_escape_closes_then_leaves() {
        let mut page = entered();
        type_text(&mut page, "a");
        assert!(matches!(page.handle_key(press(KeyCode::Esc)), HandleResult::Continue));
        assert!(matches!(
            page.handle_key(press(KeyCode::Esc)),
            HandleResult::Navigate(Route::Home)
        ));
    }

    #[test]
    fn test_links_follow_on_enter() {
        let mut page = entered();
        page.handle_key(press(KeyCode::BackTab));
        assert!(matches!(
            page.handle_key(press(KeyCode::Enter)),
            HandleResult::Navigate(Route::Dashboard)
        ));
    }

    #[test]
    fn test_click_candidate_selects_it() {
        let mut page = entered();
        type_text(&mut page, "dia");

        let (screen, hits) = draw(&page);
        assert!(screen.contains("Diabetes Type 2"));

        // Find the row recorded for the second candidate and click it
        let (col, row) = (0..30u16)
            .flat_map(|y| (0..90u16).map(move |x| (x, y)))
            .find(|(x, y)| hits.at(*x, *y) == Some(HitTarget::Candidate(FieldId::Condition, 1)))
            .unwrap();
        let target = hits.at(col, row).unwrap();
        page.handle_click(target);

        assert_eq!(page.condition, "Diabetes Type 2");
        assert_eq!(page.condition_field.state(), DropdownState::Closed);
    }

    #[test]
    fn test_paste_appends_and_filters() {
        let mut page = entered();
        type_text(&mut page, "Diab");
        page.handle_paste("etes Type 2");

        assert_eq!(page.condition, "Diabetes Type 2");
        assert_eq!(page.condition_field.state(), DropdownState::Open);
        assert_eq!(
            page.condition_field.view(&page.condition).candidates,
            vec!["Diabetes Type 2"]
        );

        page.on_leave();
        page.handle_paste("ignored");
        assert_eq!(page.condition, "Diabetes Type 2");
    }

    #[test]
    fn test_click_other_field_moves_focus() {
        let mut page = entered();
        page.handle_click(HitTarget::Field(FieldId::Allergy));
        assert_eq!(page.focused_field(), Some(FieldId::Allergy));
        assert!(!page.condition_field.is_focused());
    }

    #[test]
    fn test_selected_values_panel() {
        let mut page = entered();
        page.handle_key(press(KeyCode::Tab));
        type_text(&mut page, "Cats");
        page.on_leave();

        let (screen, _) = draw(&page);
        assert!(screen.contains("Selected values"));
        assert!(screen.contains("Medical Condition: None selected"));
        assert!(screen.contains("Allergy: Cats (custom)"));
        assert!(screen.contains("[Home /]"));
        assert!(screen.contains("[Dashboard /dashboard]"));
    }
}
