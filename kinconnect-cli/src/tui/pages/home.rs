//! `/` - page menu

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::Route;
use crate::tui::event::HandleResult;
use crate::tui::ui::{HitMap, HitTarget, ACCENT, HIGHLIGHT, SECONDARY};

/// Menu entries in display order
const MENU: [(Route, &str); 3] = [
    (
        Route::DropdownTest,
        "Try the searchable condition and allergy selects",
    ),
    (Route::InvitePatient, "Invite a patient to connect"),
    (Route::Dashboard, "Invitations sent this session"),
];

#[derive(Debug, Default)]
pub struct HomePage {
    selected: usize,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Route {
        MENU[self.selected].0
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HandleResult {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1) % MENU.len();
                HandleResult::Continue
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.selected = (self.selected + MENU.len() - 1) % MENU.len();
                HandleResult::Continue
            }
            KeyCode::Enter => HandleResult::Navigate(self.selected()),
            KeyCode::Char('q') => HandleResult::Quit,
            _ => HandleResult::Continue,
        }
    }

    pub fn handle_click(&mut self, target: HitTarget) -> HandleResult {
        match target {
            HitTarget::MenuItem(idx) if idx < MENU.len() => {
                self.selected = idx;
                HandleResult::Navigate(self.selected())
            }
            HitTarget::Link(route) => HandleResult::Navigate(route),
            _ => HandleResult::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, hits: &mut HitMap) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Menu
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Welcome to KinConnect",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Connecting families and caregivers around a patient's care",
                Style::default().fg(SECONDARY),
            )),
        ]);
        frame.render_widget(header, chunks[0]);

        let block = Block::default()
            .title(" Pages ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SECONDARY));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        for (idx, (route, blurb)) in MENU.iter().enumerate() {
            let y = inner.y + idx as u16;
            if y >= inner.bottom() {
                break;
            }
            let row = Rect::new(inner.x, y, inner.width, 1);
            let selected = idx == self.selected;
            let marker = if selected { "▸ " } else { "  " };
            let title_style = if selected {
                Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(HIGHLIGHT)),
                Span::styled(format!("{:<16}", route.title()), title_style),
                Span::styled(format!("{:<18}", route.path()), Style::default().fg(ACCENT)),
                Span::styled(*blurb, Style::default().fg(SECONDARY)),
            ]);
            frame.render_widget(Paragraph::new(line), row);
            hits.push(row, HitTarget::MenuItem(idx));
        }
    }
}
