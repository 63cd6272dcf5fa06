//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, FieldId, Route};

/// Primary accent color
pub const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
pub const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
pub const HIGHLIGHT: Color = Color::Yellow;
/// Success color
pub const SUCCESS: Color = Color::Green;
/// Error color
pub const ERROR: Color = Color::Red;
/// Dim text color
pub const DIM: Color = Color::Rgb(100, 100, 100);

/// Something the pointer can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Row in the home menu
    MenuItem(usize),
    /// Navigation link
    Link(Route),
    /// Input box
    Field(FieldId),
    /// Dropdown row: field and candidate index
    Candidate(FieldId, usize),
    /// Invite form submit button
    Submit,
}

/// Clickable regions recorded while drawing a frame
#[derive(Debug, Default)]
pub struct HitMap {
    hits: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.hits.push((area, target));
        }
    }

    /// Topmost target at a cell; later regions (overlays) win
    pub fn at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.hits
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Main UI renderer
#[derive(Debug, Default)]
pub struct Ui {
    pub hits: HitMap,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the entire UI, recording clickable regions
    pub fn render(&mut self, frame: &mut Frame, app: &App) {
        self.hits.clear();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Status bar
                Constraint::Min(0),    // Page
                Constraint::Length(1), // Command bar
            ])
            .split(frame.area());

        render_status_bar(frame, app, chunks[0]);

        match app.route {
            Route::Home => app.home.render(frame, chunks[1], &mut self.hits),
            Route::Dashboard => {
                app.dashboard
                    .render(frame, chunks[1], app.sender.sent(), &mut self.hits)
            }
            Route::DropdownTest => {
                app.dropdown_test
                    .render(frame, chunks[1], app.max_dropdown_rows, &mut self.hits)
            }
            Route::InvitePatient => app.invite.render(frame, chunks[1], &mut self.hits),
        }

        render_command_bar(frame, app, chunks[2]);
    }
}

/// Render the status bar (top bar)
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " KinConnect ",
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.route.title(), Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(app.route.path(), Style::default().fg(SECONDARY)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(SECONDARY)),
    );

    frame.render_widget(paragraph, area);
}

/// Render the command bar (bottom bar): status message or key hints
fn render_command_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(msg) => Line::from(Span::styled(msg.as_str(), Style::default().fg(HIGHLIGHT))),
        None => {
            let hints = match app.route {
                Route::Home => "↑/↓: select | Enter: open | q: quit",
                Route::Dashboard => "Esc: home | Ctrl-g: home | Ctrl-q: quit",
                Route::DropdownTest => {
                    "type to filter | ↑/↓: highlight | Enter: pick | Tab: next | Ctrl-u: clear | Esc: close/home"
                }
                Route::InvitePatient => {
                    "Tab: next field | Ctrl-s: send | Ctrl-u: clear field | Esc: home"
                }
            };
            Line::from(Span::styled(hints, Style::default().fg(SECONDARY)))
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render a row of navigation links, recording their hit areas
pub fn render_links(frame: &mut Frame, area: Rect, links: &[(Route, bool)], hits: &mut HitMap) {
    let mut x = area.x;
    for (route, focused) in links {
        let label = format!("[{} {}]", route.title(), route.path());
        let width = (label.chars().count() as u16).min(area.right().saturating_sub(x));
        if width == 0 {
            break;
        }

        let style = if *focused {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED)
        };

        let link_area = Rect::new(x, area.y, width, 1);
        frame.render_widget(Paragraph::new(Span::styled(label, style)), link_area);
        hits.push(link_area, HitTarget::Link(*route));
        x = x.saturating_add(width + 2);
    }
}
