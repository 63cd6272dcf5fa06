//! One module per route

pub mod dashboard;
pub mod dropdown_test;
pub mod home;
pub mod invite;

pub use dashboard::DashboardPage;
pub use dropdown_test::DropdownTestPage;
pub use home::HomePage;
pub use invite::InvitePage;
