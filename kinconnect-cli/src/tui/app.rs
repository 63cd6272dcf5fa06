//! Core application state and routing

use std::fmt;
use std::str::FromStr;

use kinconnect_core::{InviteField, KinConfig, LoggingSender};
use tracing::info;

use super::event::HandleResult;
use super::pages::{DashboardPage, DropdownTestPage, HomePage, InvitePage};

/// Pages reachable in the TUI, keyed by their web route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/` - page menu
    #[default]
    Home,
    /// `/dashboard` - invitations sent this session
    Dashboard,
    /// `/test-dropdowns` - condition and allergy selects
    DropdownTest,
    /// `/invite-patient` - invitation form
    InvitePatient,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::Dashboard,
        Route::DropdownTest,
        Route::InvitePatient,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::DropdownTest => "/test-dropdowns",
            Route::InvitePatient => "/invite-patient",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Dashboard => "Dashboard",
            Route::DropdownTest => "Dropdown Test",
            Route::InvitePatient => "Invite Patient",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_end_matches('/') == trimmed)
            .ok_or_else(|| {
                let known: Vec<&str> = Route::ALL.iter().map(Route::path).collect();
                format!("unknown page '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Identifies a focusable input across pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Condition,
    Allergy,
    Invite(InviteField),
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Page being shown
    pub route: Route,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message (shown in the bottom bar)
    pub status_message: Option<String>,
    /// Dropdown height cap from config
    pub max_dropdown_rows: u16,
    pub home: HomePage,
    pub dashboard: DashboardPage,
    pub dropdown_test: DropdownTestPage,
    pub invite: InvitePage,
    /// Delivery backend for the invite page
    pub sender: LoggingSender,
}

impl App {
    /// Create a new App showing `route`
    pub fn new(config: &KinConfig, route: Route) -> Self {
        let mut app = Self {
            route: Route::Home,
            should_quit: false,
            status_message: None,
            max_dropdown_rows: config.ui.max_dropdown_rows,
            home: HomePage::new(),
            dashboard: DashboardPage::new(),
            dropdown_test: DropdownTestPage::new(&config.options),
            invite: InvitePage::new(),
            sender: LoggingSender::new(),
        };
        app.navigate(route);
        app
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch pages, moving focus out of the old page and into the new one
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            self.enter(route);
            return;
        }

        info!(from = %self.route, to = %route, "navigate");
        match self.route {
            Route::DropdownTest => self.dropdown_test.on_leave(),
            Route::InvitePatient => self.invite.on_leave(),
            Route::Home | Route::Dashboard => {}
        }
        self.route = route;
        self.enter(route);
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::DropdownTest => self.dropdown_test.on_enter(),
            Route::InvitePatient => self.invite.on_enter(),
            Route::Home | Route::Dashboard => {}
        }
    }

    /// Apply the outcome of an input event
    pub fn apply(&mut self, result: HandleResult) {
        match result {
            HandleResult::Continue => {}
            HandleResult::Quit => self.should_quit = true,
            HandleResult::Navigate(route) => {
                self.clear_status();
                self.navigate(route);
            }
            HandleResult::Status(msg) => self.set_status(msg),
            HandleResult::ClearStatus => self.clear_status(),
            HandleResult::InvitationSent(invitation) => {
                self.navigate(Route::Dashboard);
                self.set_status(format!("Invitation sent to {}", invitation.patient_email));
            }
        }
    }
}
