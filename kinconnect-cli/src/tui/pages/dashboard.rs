//! `/dashboard` - invitations sent this session

use crossterm::event::{KeyCode, KeyEvent};
use kinconnect_core::Invitation;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::app::Route;
use crate::tui::event::HandleResult;
use crate::tui::ui::{render_links, HitMap, HitTarget, ACCENT, DIM, SECONDARY, SUCCESS};

#[derive(Debug, Default)]
pub struct DashboardPage;

impl DashboardPage {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HandleResult {
        match key.code {
            KeyCode::Esc => HandleResult::Navigate(Route::Home),
            KeyCode::Char('i') => HandleResult::Navigate(Route::InvitePatient),
            _ => HandleResult::Continue,
        }
    }

    pub fn handle_click(&mut self, target: HitTarget) -> HandleResult {
        match target {
            HitTarget::Link(route) => HandleResult::Navigate(route),
            _ => HandleResult::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, sent: &[Invitation], hits: &mut HitMap) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(3),    // Invitations
                Constraint::Length(1), // Links
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Dashboard",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} invitation(s) sent", sent.len()),
                Style::default().fg(SECONDARY),
            ),
        ]));
        frame.render_widget(header, chunks[0]);

        let block = Block::default()
            .title(" Sent invitations ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SECONDARY));

        if sent.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No invitations sent yet. Press i to invite a patient.",
                Style::default().fg(DIM),
            ))
            .block(block);
            frame.render_widget(empty, chunks[1]);
        } else {
            // Newest first
            let items: Vec<ListItem> = sent
                .iter()
                .rev()
                .map(|invitation| {
                    let mut spans = vec![
                        Span::styled("✓ ", Style::default().fg(SUCCESS)),
                        Span::styled(
                            invitation.patient_name.clone(),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" <"),
                        Span::styled(invitation.patient_email.clone(), Style::default().fg(ACCENT)),
                        Span::raw(">"),
                    ];
                    if let Some(relationship) = &invitation.relationship {
                        spans.push(Span::styled(
                            format!(" ({})", relationship),
                            Style::default().fg(SECONDARY),
                        ));
                    }
                    spans.push(Span::styled(
                        format!("  {}", invitation.sent_at.format("%Y-%m-%d %H:%M UTC")),
                        Style::default().fg(DIM),
                    ));
                    ListItem::new(Line::from(spans))
                })
                .collect();
            frame.render_widget(List::new(items).block(block), chunks[1]);
        }

        render_links(
            frame,
            chunks[2],
            &[(Route::Home, false), (Route::InvitePatient, false)],
            hits,
        );
    }
}
