//! Content panel: renders whatever the last cycle wrote to the buffer.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Label;
use crate::ports::{Backdrop, Content, NoticeLevel};
use crate::tui::styles::MedicalTheme;

/// Turn content blocks into styled lines.
///
/// `label` colours the result heading when the cycle produced a result.
#[must_use]
pub fn content_lines(blocks: &[Content], backdrop: Backdrop, label: Option<Label>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            Content::Title(title) => {
                lines.push(Line::from(Span::styled(title.clone(), MedicalTheme::subtitle(backdrop))));
            }
            Content::Text(text) => {
                lines.push(Line::from(Span::styled(text.clone(), MedicalTheme::text())));
            }
            Content::List(items) => {
                lines.extend(items.iter().map(|item| {
                    Line::from(vec![
                        Span::styled("  • ", MedicalTheme::text_muted()),
                        Span::styled(item.clone(), MedicalTheme::text()),
                    ])
                }));
            }
            Content::Heading(heading) => {
                let style = label.map_or_else(|| MedicalTheme::subtitle(backdrop), MedicalTheme::label);
                lines.push(Line::from(Span::styled(heading.clone(), style)));
            }
            Content::InfoBlock(pairs) => {
                lines.extend(pairs.iter().map(|(key, value)| {
                    Line::from(vec![
                        Span::styled(format!("{key}: "), MedicalTheme::text_secondary()),
                        Span::styled(value.clone(), MedicalTheme::text()),
                    ])
                }));
            }
            Content::Table { headers, rows } => table_lines(&mut lines, headers, rows),
            Content::Notice { level, message } => {
                let marker = match level {
                    NoticeLevel::Info => "i ",
                    NoticeLevel::Success => "✓ ",
                    NoticeLevel::Warning | NoticeLevel::Error => "! ",
                };
                let style = MedicalTheme::notice(*level);
                lines.push(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(message.clone(), style),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Fixed-width columns sized to the widest cell.
fn table_lines(lines: &mut Vec<Line<'static>>, headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    lines.push(Line::from(Span::styled(format_row(headers), MedicalTheme::focused())));
    lines.extend(
        rows.iter()
            .map(|row| Line::from(Span::styled(format_row(row), MedicalTheme::text()))),
    );
}

pub fn render_report(
    f: &mut Frame,
    area: Rect,
    blocks: &[Content],
    backdrop: Backdrop,
    label: Option<Label>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused(backdrop));

    let p = Paragraph::new(content_lines(blocks, backdrop, label))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(p, area);
}
