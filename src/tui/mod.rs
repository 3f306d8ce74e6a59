//! TUI module: Terminal User Interface using Ratatui.
//!
//! Plays the display sink and the input side of the workflow:
//! - Sidebar menu with the entries offered to the session
//! - Sign-up, login and prediction forms
//! - Report panel for the content of the last cycle

mod app;
mod sink;
mod styles;
mod ui;

pub use app::App;
pub use sink::ContentBuffer;
pub use styles::MedicalTheme;
