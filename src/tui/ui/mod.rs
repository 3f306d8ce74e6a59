//! UI module: View components for the TUI.

pub mod form;
pub mod report;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::MenuEntry;
use crate::ports::Backdrop;
use crate::tui::styles::{MedicalTheme, APP_NAME};

/// Sidebar with the entries offered in the current session state.
pub fn render_sidebar(
    f: &mut Frame,
    area: Rect,
    entries: &[MenuEntry],
    selected: usize,
    focused: bool,
    backdrop: Backdrop,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == selected {
                MedicalTheme::selected(backdrop)
            } else {
                MedicalTheme::text()
            };
            ListItem::new(Line::from(Span::styled(format!(" {} ", entry.label()), style)))
        })
        .collect();

    let border_style = if focused {
        MedicalTheme::border_focused(backdrop)
    } else {
        MedicalTheme::border()
    };

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(format!(" {APP_NAME} "), MedicalTheme::header(backdrop)))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(list, area);
}

/// Key hints for the current focus.
pub fn render_key_hints(f: &mut Frame, area: Rect, form_focused: bool, has_sample: bool) {
    let mut spans = if form_focused {
        vec![
            Span::styled("[↑↓/Tab] ", MedicalTheme::key_hint()),
            Span::styled("Field ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Submit ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menu ", MedicalTheme::key_desc()),
        ]
    } else {
        vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Open ", MedicalTheme::key_desc()),
            Span::styled("[Tab] ", MedicalTheme::key_hint()),
            Span::styled("Form ", MedicalTheme::key_desc()),
        ]
    };
    if form_focused && has_sample {
        spans.push(Span::styled("[F2] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Sample Data ", MedicalTheme::key_desc()));
    }
    spans.push(Span::styled("[Ctrl+Q] ", MedicalTheme::key_hint()));
    spans.push(Span::styled("Quit", MedicalTheme::key_desc()));

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: Predictions are indicative only and do not replace professional medical evaluation.",
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
