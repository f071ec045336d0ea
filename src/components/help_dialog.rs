//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application. The scroll
//! position lives in the modal stack so reopening starts at the top.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog;

impl HelpDialog {
    /// Apply a scroll key to `offset`, returning true when the key was consumed
    pub fn scroll(key: KeyEvent, offset: &mut usize) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => *offset = offset.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => *offset = offset.saturating_sub(1),
            KeyCode::PageDown => *offset = offset.saturating_add(10),
            KeyCode::PageUp => *offset = offset.saturating_sub(10),
            _ => return false,
        }
        true
    }

    /// Draw at `scroll_offset`, returning the offset clamped to the content
    pub fn draw_with_offset(&self, frame: &mut Frame, area: Rect, scroll_offset: usize) -> usize {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin.min(area.width / 2),
            area.y + margin.min(area.height / 2),
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        let scroll_offset = scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        scroll_offset
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_offset(frame, area, 0);
        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Rows");
    add_shortcut(&mut lines, "j / ↓", "Move to next row");
    add_shortcut(&mut lines, "k / ↑", "Move to previous row");
    add_shortcut(&mut lines, "g", "Jump to first row on page");
    add_shortcut(&mut lines, "G", "Jump to last row on page");

    add_section(&mut lines, "Pages");
    add_shortcut(&mut lines, "l / →", "Next page");
    add_shortcut(&mut lines, "h / ←", "Previous page");
    add_shortcut(&mut lines, "L / End", "Last page");
    add_shortcut(&mut lines, "H / Home", "First page");
    add_shortcut(&mut lines, ":", "Go to page...");
    add_shortcut(&mut lines, "+ / -", "Change rows per page");
    add_shortcut(&mut lines, "p", "Toggle pagination");

    add_section(&mut lines, "Sort");
    add_shortcut(&mut lines, "1-9", "Sort by column N (again to reverse)");
    add_shortcut(&mut lines, "Click", "Sort by the clicked header");

    add_section(&mut lines, "Search");
    add_shortcut(&mut lines, "/", "Enter search mode");
    add_shortcut(&mut lines, "Enter", "Keep search and leave");
    add_shortcut(&mut lines, "Esc", "Clear search and leave");

    add_section(&mut lines, "Selection");
    add_shortcut(&mut lines, "Space", "Toggle row");
    add_shortcut(&mut lines, "a", "Select or clear the page");
    add_shortcut(&mut lines, "Esc", "Clear selection");
    add_shortcut(&mut lines, "Click", "Toggle the clicked row");

    add_section(&mut lines, "Library");
    add_shortcut(&mut lines, "x", "Export rows to CSV");
    add_shortcut(&mut lines, "r", "Reload library");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}
