//! Placeholder drawn in place of the table when no row is visible

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn empty_message(search_text: &str) -> String {
    if search_text.is_empty() {
        "No tracks in library".to_string()
    } else {
        format!("No tracks match '{}'", search_text)
    }
}

pub fn render_empty_state(frame: &mut Frame, area: Rect, search_text: &str, title: &str) {
    let hint = if search_text.is_empty() {
        "Press r to reload the library"
    } else {
        "Press / then Esc to clear the search"
    };

    // Push the message toward the vertical middle
    let padding = area.height.saturating_sub(4) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        empty_message(search_text),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message() {
        assert_eq!(empty_message(""), "No tracks in library");
        assert_eq!(empty_message("zzz"), "No tracks match 'zzz'");
    }
}
