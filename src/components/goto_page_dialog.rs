//! Go-to-page prompt
//!
//! The typed digits live in `Modal::GotoPage` so the App owns the text.

use crate::action::Action;
use crate::components::centered_popup;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_DIGITS: usize = 6;

#[derive(Default)]
pub struct GotoPageDialog;

impl GotoPageDialog {
    /// Edit `input` with `key`; Enter yields the requested page
    pub fn handle_input(&self, key: KeyEvent, input: &mut String) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => match input.parse::<usize>() {
                Ok(page) => Some(Action::GotoPage(page)),
                Err(_) => Some(Action::CloseModal),
            },
            KeyCode::Backspace => {
                input.pop();
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() && input.len() < MAX_DIGITS => {
                input.push(c);
                None
            }
            _ => None,
        }
    }

    pub fn draw_with_input(&self, frame: &mut Frame, area: Rect, input: &str, total_pages: usize) {
        let popup_area = centered_popup(area, 36, 6);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" Page: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    input.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", Style::default().fg(Color::Cyan)),
                Span::styled(format!("  of {}", total_pages), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Enter ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw("Go  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Go to page ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, popup_area);
    }
}
