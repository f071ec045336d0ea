//! Quit confirmation dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Quit confirmation dialog
#[derive(Default)]
pub struct QuitDialog {
    /// Rows selected when the dialog opened; they are lost on quit
    pub selected: usize,
}

impl QuitDialog {
    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected;
    }

    fn warning(&self) -> Option<String> {
        match self.selected {
            0 => None,
            1 => Some("1 selected track will be lost".to_string()),
            n => Some(format!("{} selected tracks will be lost", n)),
        }
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let warning = self.warning();
        let height = if warning.is_some() { 8 } else { 7 };
        let popup_area = centered_popup(area, 44, height);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to quit?",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(warning) = warning {
            content.push(Line::from(Span::styled(warning, Style::default().fg(Color::Red))));
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Yes, quit  "),
            Span::styled(
                " n/Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("No, cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Quit? ")
                    .title_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_selection_warning() {
        let mut dialog = QuitDialog::default();
        assert_eq!(dialog.warning(), None);
        dialog.set_selected(1);
        assert_eq!(dialog.warning().as_deref(), Some("1 selected track will be lost"));
        dialog.set_selected(4);
        assert_eq!(dialog.warning().as_deref(), Some("4 selected tracks will be lost"));
    }

    #[test]
    fn test_confirm_keys() {
        let mut dialog = QuitDialog::default();
        let yes = dialog.handle_key_event(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE)).unwrap();
        assert_eq!(yes, Some(Action::ForceQuit));
        let no = dialog.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert_eq!(no, Some(Action::CloseModal));
    }
}
