use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::format::{format_duration, truncate_unicode};
use crate::timeline::aggregate::ModuleSummary;
use crate::timeline::layout::ModuleLayout;
use crate::ui::theme::Theme;

pub const WIDTH: u16 = 38;

/// Module card: target against design, moments, then one entry per step
/// with its type, tool and duration.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    summary: &ModuleSummary,
    layout: &ModuleLayout,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.selection_border))
        .title(Span::styled(
            format!(" {} ", truncate_unicode(&summary.title, usize::from(WIDTH - 6))),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let mut lines = vec![
        detail_line("Cible", target_text(summary), theme),
        detail_line("Conçu", format_duration(summary.designed_seconds), theme),
        detail_line(
            "Remplissage",
            format!("{:.0}%", layout.fill_ratio * 100.0),
            theme,
        ),
    ];

    if let Some(comparison) = summary.comparison() {
        let style = if summary.duration_alert() {
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.status_ok)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", "Écart"), label_style(theme)),
            Span::styled(format!("Conçu {} Cible", comparison.symbol()), style),
        ]));
    }
    if layout.overflow {
        lines.push(Line::from(Span::styled(
            " Dépassement de la cible",
            Style::default().fg(theme.track_overflow),
        )));
    }

    if !summary.moments.is_empty() {
        lines.push(Line::default());
        lines.push(section_line("Moments", theme));
        for moment in &summary.moments {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<24}", truncate_unicode(&moment.title, 23)),
                    Style::default().fg(theme.text_primary),
                ),
                Span::styled(moment.display(), Style::default().fg(theme.text_secondary)),
            ]));
        }
    }

    if !summary.steps.is_empty() {
        lines.push(Line::default());
        lines.push(section_line("Étapes", theme));
        for step in &summary.steps {
            lines.push(Line::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(theme.pedagogy_color(&step.pedagogical_type)),
                ),
                Span::styled(step.title.clone(), Style::default().fg(theme.text_primary)),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "   {} · {} · {}",
                    step.type_label(),
                    step.tool_label(),
                    format_duration(step.seconds)
                ),
                Style::default().fg(theme.text_secondary),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn target_text(summary: &ModuleSummary) -> String {
    if summary.has_target() {
        format_duration(summary.target_seconds)
    } else {
        "estimée".to_string()
    }
}

fn label_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD)
}

fn section_line(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn detail_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<12}"), label_style(theme)),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}
