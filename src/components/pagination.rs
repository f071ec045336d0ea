//! Pagination footer
//!
//! One line under the table: the range summary on the left and the page
//! indicator with navigation hints on the right.

use crate::engine::TableView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// `Showing X to Y of Z entries`, with the library size when filtered
pub fn range_summary(view: &TableView<'_>) -> String {
    let mut summary = format!(
        "Showing {} to {} of {} entries",
        view.range_start, view.range_end, view.matched
    );
    if view.matched != view.total {
        summary.push_str(&format!(" (filtered from {})", view.total));
    }
    summary
}

pub fn page_indicator(view: &TableView<'_>) -> String {
    format!("{} of {}", view.current_page, view.total_pages)
}

pub fn render_pagination(frame: &mut Frame, area: Rect, view: &TableView<'_>, paginate: bool) {
    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(32)])
        .areas(area);

    let summary = Paragraph::new(Line::from(Span::styled(
        format!(" {}", range_summary(view)),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(summary, left);

    if !paginate {
        let all = Paragraph::new(Span::styled("all rows ", Style::default().fg(Color::DarkGray)))
            .alignment(ratatui::layout::Alignment::Right);
        frame.render_widget(all, right);
        return;
    }

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    // Navigation hints only mean something with more than one page
    if view.total_pages > 1 {
        let muted = |enabled: bool| if enabled { key_style } else { Style::default().fg(Color::DarkGray) };
        spans.push(Span::styled("« ‹ ", muted(view.current_page > 1)));
    }
    spans.push(Span::styled(
        page_indicator(view),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    if view.total_pages > 1 {
        let enabled = view.current_page < view.total_pages;
        let style = if enabled { key_style } else { Style::default().fg(Color::DarkGray) };
        spans.push(Span::styled(" › »", style));
    }
    spans.push(Span::raw(" "));

    let paragraph = Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(paragraph, right);
}
