pub mod charts;
pub mod detail_panel;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod theme;
pub mod timeline_widget;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let charts_height = if app.show_charts { charts::HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEIGHT),
            Constraint::Min(timeline_widget::HEIGHT + 2),
            Constraint::Length(charts_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let content_area = chunks[1];
    let (timeline_area, detail_area) = if app.selected_layout().is_some() {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(detail_panel::WIDTH)])
            .split(content_area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (content_area, None)
    };

    let block = timeline_block(app);
    let inner = block.inner(timeline_area);
    frame.render_widget(block, timeline_area);
    let track_rows = Rect {
        height: inner.height.min(timeline_widget::HEIGHT),
        ..inner
    };
    app.set_timeline_area(track_rows);
    timeline_widget::render(
        frame,
        track_rows,
        &app.report.layout,
        &app.coordinator,
        app.selected_module,
        &app.theme,
    );

    if let Some(detail_area) = detail_area
        && let Some(layout) = app.selected_layout()
        && let Some(summary) = app.report.aggregate.modules.get(layout.module_index)
    {
        detail_panel::render(frame, detail_area, summary, layout, &app.theme);
    }

    header::render(
        frame,
        chunks[0],
        &app.report.aggregate,
        app.display_unit,
        &app.coordinator.zoom_label(),
        &app.theme,
    );
    if app.show_charts {
        charts::render(frame, chunks[2], &app.report, &app.theme);
    }
    statusbar::render(
        frame,
        chunks[3],
        app.status_message.as_ref(),
        &app.keybinds,
        app.show_charts,
        &app.theme,
    );

    // Help overlay last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}

fn timeline_block(app: &App) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.overlay_border))
        .title(Span::styled(
            " Chronologie ",
            Style::default()
                .fg(app.theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ))
}

#[cfg(test)]
mod tests;
