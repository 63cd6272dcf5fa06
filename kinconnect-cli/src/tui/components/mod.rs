//! Reusable UI components
//!
//! Small drawing and event primitives shared by the pages.

pub mod choice_field;
pub mod text_input;

pub use choice_field::{apply, render_dropdown, render_input};
pub use text_input::{render_text_input, TextInput};
