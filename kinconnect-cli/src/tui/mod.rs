//! KinConnect TUI - the care-coordination pages in a terminal
//!
//! - Home menu (`/`) and a session dashboard (`/dashboard`)
//! - Dropdown test harness (`/test-dropdowns`): searchable condition and
//!   allergy selects that also accept custom entries
//! - Patient invitation form (`/invite-patient`)
//!
//! Keyboard first; the mouse can focus inputs, pick dropdown rows and follow
//! links.

pub mod app;
pub mod components;
pub mod event;
pub mod pages;
pub mod terminal;
pub mod ui;

pub use app::{App, Route};
pub use terminal::run;
