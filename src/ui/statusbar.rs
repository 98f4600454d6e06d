use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, StatusKind, StatusMessage, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    status_message: Option<&StatusMessage>,
    keybinds: &ResolvedKeybinds,
    show_charts: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some(status) = status_message {
        let color = match status.kind {
            StatusKind::Info => theme.status_ok,
            StatusKind::Error => theme.status_err,
        };
        let line = Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let zoom = format!("{}/{}", key_label(keybinds.zoom_in), key_label(keybinds.zoom_out));
    let charts = if show_charts { "Masquer" } else { "Graphiques" };
    let pills = [
        (key_label(keybinds.quit), "Quitter"),
        (zoom, "Zoom"),
        (key_label(keybinds.zoom_reset), "100%"),
        ("\u{2190}\u{2192}".to_string(), "Défiler"),
        (key_label(keybinds.next_module), "Module"),
        (key_label(keybinds.cycle_unit), "Unité"),
        (key_label(keybinds.toggle_charts), charts),
        (key_label(keybinds.reload), "Recharger"),
        (key_label(keybinds.help), "Aide"),
    ];

    let mut spans = Vec::new();
    for (key, desc) in &pills {
        spans.extend(pill_spans(key, desc, theme));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
