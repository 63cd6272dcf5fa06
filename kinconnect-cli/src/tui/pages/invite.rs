//! `/invite-patient` - invitation form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kinconnect_core::{
    invitation::MAX_MESSAGE_CHARS, InvitationSender, InviteField, PatientInvitation,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::tui::app::{FieldId, Route};
use crate::tui::components::{render_text_input, TextInput};
use crate::tui::event::{edit_text, HandleResult};
use crate::tui::ui::{render_links, HitMap, HitTarget, ACCENT, ERROR, SECONDARY};

/// Focusable widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteFocus {
    Field(InviteField),
    Submit,
    HomeLink,
    DashboardLink,
}

impl InviteFocus {
    const ORDER: [InviteFocus; 7] = [
        InviteFocus::Field(InviteField::PatientName),
        InviteFocus::Field(InviteField::PatientEmail),
        InviteFocus::Field(InviteField::Relationship),
        InviteFocus::Field(InviteField::Message),
        InviteFocus::Submit,
        InviteFocus::HomeLink,
        InviteFocus::DashboardLink,
    ];

    fn step(self, forward: bool) -> InviteFocus {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }
}

const PLACEHOLDERS: [(InviteField, &str); 4] = [
    (InviteField::PatientName, "Full name"),
    (InviteField::PatientEmail, "name@example.com"),
    (InviteField::Relationship, "e.g. Daughter, Spouse, Caregiver"),
    (InviteField::Message, "Optional note included with the invitation"),
];

const HOW_IT_WORKS: [&str; 4] = [
    "1. Enter the patient's name and email address.",
    "2. They receive an invitation to join KinConnect.",
    "3. Once they accept, you can coordinate care together.",
    "4. You can track sent invitations on the dashboard.",
];

#[derive(Debug)]
pub struct InvitePage {
    form: PatientInvitation,
    focus: Option<InviteFocus>,
    /// Last submission error and the field it points at
    error: Option<(Option<InviteField>, String)>,
}

impl Default for InvitePage {
    fn default() -> Self {
        Self::new()
    }
}

impl InvitePage {
    pub fn new() -> Self {
        Self {
            form: PatientInvitation::new(),
            focus: None,
            error: None,
        }
    }

    pub fn on_enter(&mut self) {
        self.focus = Some(InviteFocus::Field(InviteField::PatientName));
    }

    pub fn on_leave(&mut self) {
        self.focus = None;
    }

    pub fn form(&self) -> &PatientInvitation {
        &self.form
    }

    pub fn focus(&self) -> Option<InviteFocus> {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|(_, msg)| msg.as_str())
    }

    fn cycle(&mut self, forward: bool) {
        let first = InviteFocus::Field(InviteField::PatientName);
        self.focus = Some(self.focus.map_or(first, |f| f.step(forward)));
    }

    pub fn handle_key<S>(&mut self, key: KeyEvent, sender: &mut S) -> HandleResult
    where
        S: InvitationSender + ?Sized,
    {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit(sender);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.cycle(true);
                return HandleResult::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle(false);
                return HandleResult::Continue;
            }
            KeyCode::Esc => return HandleResult::Navigate(Route::Home),
            _ => {}
        }

        match self.focus {
            Some(InviteFocus::Field(field)) => {
                if key.code == KeyCode::Enter {
                    self.cycle(true);
                    HandleResult::Continue
                } else if edit_text(self.form.draft_mut().get_mut(field), key) {
                    self.edited(field)
                } else {
                    HandleResult::Continue
                }
            }
            Some(InviteFocus::Submit) if key.code == KeyCode::Enter => self.submit(sender),
            Some(InviteFocus::HomeLink) if key.code == KeyCode::Enter => {
                HandleResult::Navigate(Route::Home)
            }
            Some(InviteFocus::DashboardLink) if key.code == KeyCode::Enter => {
                HandleResult::Navigate(Route::Dashboard)
            }
            None => {
                self.on_enter();
                HandleResult::Continue
            }
            _ => HandleResult::Continue,
        }
    }

    /// Append pasted text to the focused field
    pub fn handle_paste(&mut self, text: &str) -> HandleResult {
        match self.focus {
            Some(InviteFocus::Field(field)) => {
                self.form.draft_mut().get_mut(field).push_str(text);
                self.edited(field)
            }
            _ => HandleResult::Continue,
        }
    }

    /// Editing the offending field retires its error and the status line
    fn edited(&mut self, field: InviteField) -> HandleResult {
        let stale = matches!(self.error, Some((Some(bad), _)) if bad == field);
        if stale {
            self.error = None;
            HandleResult::ClearStatus
        } else {
            HandleResult::Continue
        }
    }

    pub fn handle_click<S>(&mut self, target: HitTarget, sender: &mut S) -> HandleResult
    where
        S: InvitationSender + ?Sized,
    {
        match target {
            HitTarget::Field(FieldId::Invite(field)) => {
                self.focus = Some(InviteFocus::Field(field));
                HandleResult::Continue
            }
            HitTarget::Submit => {
                self.focus = Some(InviteFocus::Submit);
                self.submit(sender)
            }
            HitTarget::Link(route) => HandleResult::Navigate(route),
            _ => HandleResult::Continue,
        }
    }

    fn submit<S>(&mut self, sender: &mut S) -> HandleResult
    where
        S: InvitationSender + ?Sized,
    {
        let mut sent = false;
        match self.form.submit(sender, || sent = true) {
            Ok(invitation) if sent => {
                self.error = None;
                self.focus = Some(InviteFocus::Field(InviteField::PatientName));
                HandleResult::InvitationSent(invitation)
            }
            Ok(_) => HandleResult::Continue,
            Err(err) => {
                let field = err
                    .field()
                    .and_then(|key| InviteField::ALL.into_iter().find(|f| f.key() == key));
                if let Some(field) = field {
                    self.focus = Some(InviteFocus::Field(field));
                }
                let message = err.to_string();
                debug!(error = %message, "invitation rejected");
                self.error = Some((field, message.clone()));
                HandleResult::Status(message)
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, hits: &mut HitMap) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Length(3), // Relationship
                Constraint::Length(5), // Message
                Constraint::Length(1), // Submit
                Constraint::Length(1), // Error
                Constraint::Length(1), // Links
                Constraint::Min(0),
            ])
            .split(columns[0]);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Invite a Patient",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Send an invitation to connect and coordinate care",
                Style::default().fg(SECONDARY),
            )),
        ]);
        frame.render_widget(header, rows[0]);

        let draft = self.form.draft();
        let invalid = self.error.as_ref().and_then(|(field, _)| *field);
        for (idx, (field, placeholder)) in PLACEHOLDERS.iter().enumerate() {
            let value = draft.get(*field);
            let label = match field {
                InviteField::Message => format!(
                    "{} ({}/{})",
                    field.label(),
                    value.chars().count(),
                    MAX_MESSAGE_CHARS
                ),
                _ if field.is_required() => format!("{} *", field.label()),
                _ => field.label().to_string(),
            };
            let input = TextInput {
                label: &label,
                value,
                placeholder,
                focused: self.focus == Some(InviteFocus::Field(*field)),
                invalid: invalid == Some(*field),
            };
            render_text_input(frame, rows[idx + 1], input, FieldId::Invite(*field), hits);
        }

        let submit_focused = self.focus == Some(InviteFocus::Submit);
        let submit_style = if submit_focused {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        };
        let label = "[ Send invitation ]";
        let submit_area = Rect::new(
            rows[5].x,
            rows[5].y,
            (label.len() as u16).min(rows[5].width),
            rows[5].height,
        );
        frame.render_widget(Paragraph::new(Span::styled(label, submit_style)), submit_area);
        hits.push(submit_area, HitTarget::Submit);

        if let Some(msg) = self.error() {
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(ERROR))),
                rows[6],
            );
        }

        render_links(
            frame,
            rows[7],
            &[
                (Route::Home, self.focus == Some(InviteFocus::HomeLink)),
                (Route::Dashboard, self.focus == Some(InviteFocus::DashboardLink)),
            ],
            hits,
        );

        let steps: Vec<Line> = HOW_IT_WORKS
            .iter()
            .map(|step| Line::from(Span::raw(*step)))
            .collect();
        let panel = Paragraph::new(steps).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" How invitations work ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        );
        frame.render_widget(panel, columns[1]);
    }
}
