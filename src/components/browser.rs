//! Browser screen
//!
//! Composes the search bar, the table (or its empty state), the pagination
//! footer, the status bar and the key hints into one screen.

use crate::component::Component;
use crate::components::{
    calculate_main_layout, empty_state::render_empty_state, pagination::render_pagination,
    table::TableRenderContext, SearchBar, TableComponent,
};
use crate::engine::{ColumnDescriptor, QueryState, TableView};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Context needed for rendering the browser screen
pub struct BrowserRenderContext<'a, 'v> {
    pub columns: &'a [ColumnDescriptor],
    pub view: &'v TableView<'a>,
    pub state: &'a QueryState,
    pub source: &'a str,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_browser_screen(
    frame: &mut Frame,
    area: Rect,
    search: &mut SearchBar,
    table: &mut TableComponent,
    ctx: &BrowserRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    search.set_query(&ctx.state.search_text, ctx.view.selected_total);
    search.draw(frame, layout.search)?;

    if ctx.view.is_empty() {
        table.sync_page_len(0);
        render_empty_state(frame, layout.table, &ctx.state.search_text, ctx.source);
    } else {
        table.set_page(&TableRenderContext {
            columns: ctx.columns,
            view: ctx.view,
            sort: ctx.state.sort.as_ref(),
            title: ctx.source,
        });
        table.draw(frame, layout.table)?;
    }

    render_pagination(frame, layout.footer, ctx.view, ctx.state.paginate);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, search.active, ctx.view.selected_total);

    Ok(())
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &BrowserRenderContext) {
    let mut spans = vec![Span::styled(
        format!(" {} ", ctx.source),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(" "));

    if ctx.state.paginate {
        spans.push(Span::styled(
            format!("{} per page", ctx.state.page_size),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(sort) = &ctx.state.sort {
        let title = ctx
            .columns
            .iter()
            .find(|c| c.field == sort.field)
            .map_or(sort.field.as_str(), |c| c.title.as_str());
        spans.push(Span::styled(
            format!("  sorted by {} {}", title, sort.direction.arrow()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    // Errors replace everything but the source badge
    if let Some(error) = ctx.error {
        spans.truncate(2);
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, search_mode: bool, selected_total: usize) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = if search_mode {
        vec![
            key(" Enter ", Color::Green),
            Span::raw("Keep  "),
            key(" Esc ", Color::Yellow),
            Span::raw("Clear  "),
            Span::styled("type to filter", Style::default().fg(Color::DarkGray)),
        ]
    } else if selected_total > 0 {
        vec![
            key(" Space ", Color::Green),
            Span::raw("Toggle  "),
            key(" a ", Color::Green),
            Span::raw("Page  "),
            key(" Esc ", Color::Yellow),
            Span::raw("Clear  "),
            key(" x ", Color::Cyan),
            Span::raw("Export Selected  "),
            Span::styled(
                format!("{} selected", selected_total),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            key(" q ", Color::Yellow),
            Span::raw("Quit "),
            key(" / ", Color::Cyan),
            Span::raw("Search "),
            key(" 1-9 ", Color::Cyan),
            Span::raw("Sort "),
            key(" h/l ", Color::Cyan),
            Span::raw("Page "),
            key(" Space ", Color::Green),
            Span::raw("Select "),
            key(" x ", Color::Magenta),
            Span::raw("Export "),
            key(" r ", Color::Magenta),
            Span::raw("Reload "),
            key(" ? ", Color::White),
            Span::raw("Help"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}
