//! Search bar
//!
//! Shows the live search text above the table. While search mode is on,
//! printable keys edit the text and every edit re-runs the pipeline.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct SearchBar {
    pub active: bool,
    text: String,
    selected_total: usize,
}

impl SearchBar {
    /// Set the query text and selection count shown on the next draw
    pub fn set_query(&mut self, search_text: &str, selected_total: usize) {
        self.text.clear();
        self.text.push_str(search_text);
        self.selected_total = selected_total;
    }
}

impl Component for SearchBar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Esc => Some(Action::ClearSearch),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearSearch)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SearchInput(c))
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EnterSearchMode => self.active = true,
            Action::ExitSearchMode => self.active = false,
            Action::ClearSearch => {
                // Esc both clears and leaves
                self.active = false;
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.active { Color::Cyan } else { Color::DarkGray };

        let mut spans = vec![Span::styled(" / ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))];
        if self.text.is_empty() && !self.active {
            spans.push(Span::styled(
                "Search tracks...",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(self.text.clone(), Style::default().fg(Color::White)));
        }
        if self.active {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search ");
        if self.selected_total > 0 {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" {} selected ", self.selected_total),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
        Ok(())
    }
}
