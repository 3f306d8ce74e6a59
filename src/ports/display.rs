//! Display port: Trait for the sink that renders structured content.
//!
//! The application describes what to show; rendering is the sink's job.

use crate::domain::View;

/// Severity of a status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Per-view styling directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    #[default]
    Plain,
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Backdrop {
    /// Backdrop keyed by the active view.
    #[must_use]
    pub fn for_view(view: View) -> Self {
        match view {
            View::Diabetes => Self::Diabetes,
            View::HeartDisease => Self::HeartDisease,
            View::Parkinsons => Self::Parkinsons,
            View::Home | View::Login | View::Signup => Self::Plain,
        }
    }
}

/// One piece of structured content.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Title(String),
    Text(String),
    /// Bulleted list
    List(Vec<String>),
    /// Test result heading
    Heading(String),
    /// Key/value pairs, e.g. patient information
    InfoBlock(Vec<(String, String)>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

impl Content {
    pub fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self::Notice {
            level,
            message: message.into(),
        }
    }
}

/// Trait for anything that can display a render cycle.
pub trait DisplaySink {
    /// Set the styling directive for the current cycle.
    fn set_backdrop(&mut self, backdrop: Backdrop);

    /// Append content to the current cycle.
    fn emit(&mut self, content: Content);
}
