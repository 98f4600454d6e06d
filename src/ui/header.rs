use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::format_total;
use crate::timeline::aggregate::Aggregate;
use crate::timeline::duration::DisplayUnit;
use crate::ui::theme::Theme;

pub const HEIGHT: u16 = 3;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    aggregate: &Aggregate,
    unit: DisplayUnit,
    zoom_label: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name = if aggregate.course_name.trim().is_empty() {
        "Sans titre"
    } else {
        aggregate.course_name.as_str()
    };
    let secondary = Style::default().fg(theme.text_secondary);

    let spans = vec![
        Span::styled(
            " planline ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            name,
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Total: ", secondary),
        Span::styled(
            format_total(aggregate.total_in(unit), unit.label()),
            Style::default().fg(theme.text_primary),
        ),
        Span::raw("  "),
        Span::styled(format!("Modules: {}", aggregate.modules.len()), secondary),
        Span::raw("  "),
        Span::styled(format!("Zoom: {zoom_label}"), secondary),
        Span::raw("  "),
        Span::styled(theme.name, secondary),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
