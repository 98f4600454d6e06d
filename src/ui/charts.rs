use std::f64::consts::TAU;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::format::truncate_unicode;
use crate::timeline::Report;
use crate::timeline::chart::{ChartData, PieSlice, bar_rows, pie_slices};
use crate::timeline::dimension::Dimension;
use crate::ui::theme::{HATCH_GLYPH, SOLID_GLYPH, Theme};
use crate::ui::timeline_widget::EMPTY_MESSAGE;

pub const HEIGHT: u16 = 10;
const LEGEND_WIDTH: u16 = 24;

/// Filled disc, one slice per bucket, clockwise from 12 o'clock.
pub struct PieWidget<'a> {
    chart: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> PieWidget<'a> {
    pub fn new(chart: &'a ChartData, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }
}

impl Widget for PieWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.chart.is_empty() {
            let msg = EMPTY_MESSAGE;
            let w = msg.width() as u16;
            let x = area.x + area.width.saturating_sub(w) / 2;
            let y = area.y + area.height / 2;
            buf.set_string(
                x,
                y,
                truncate_unicode(msg, usize::from(area.width)),
                Style::default().fg(self.theme.text_secondary),
            );
            return;
        }

        let slices = pie_slices(self.chart);
        // Cells are about twice as tall as they are wide.
        let cx = f64::from(area.width) / 2.0;
        let cy = f64::from(area.height);
        let radius = (f64::from(area.width).min(f64::from(area.height) * 2.0) / 2.0 - 0.5).max(0.5);

        for row in 0..area.height {
            for col in 0..area.width {
                let dx = f64::from(col) + 0.5 - cx;
                let dy = (f64::from(row) + 0.5) * 2.0 - cy;
                if dx.hypot(dy) > radius {
                    continue;
                }
                let Some(slice) = slice_at(&slices, clockwise_angle(dx, dy)) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(SOLID_GLYPH);
                    cell.set_style(Style::default().fg(self.theme.category_color(&slice.key)));
                }
            }
        }
    }
}

/// Angle from 12 o'clock, clockwise, in [0, TAU). `dy` grows downwards.
fn clockwise_angle(dx: f64, dy: f64) -> f64 {
    dx.atan2(-dy).rem_euclid(TAU)
}

fn slice_at(slices: &[PieSlice], angle: f64) -> Option<&PieSlice> {
    slices
        .iter()
        .find(|s| s.contains(angle))
        .or_else(|| slices.last())
}

pub fn legend_lines<'a>(chart: &'a ChartData, theme: &Theme, width: u16) -> Vec<Line<'a>> {
    let label_width = usize::from(width.saturating_sub(8));
    chart
        .buckets
        .iter()
        .map(|bucket| {
            Line::from(vec![
                Span::styled(
                    "● ",
                    Style::default().fg(theme.category_color(&bucket.key)),
                ),
                Span::styled(
                    format!(
                        "{:<label_width$}",
                        truncate_unicode(bucket.label(), label_width)
                    ),
                    Style::default().fg(theme.text_primary),
                ),
                Span::styled(
                    format!("{:>4}%", bucket.rounded_pct()),
                    Style::default()
                        .fg(theme.text_secondary)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

/// Horizontal bars, one per bucket: label on one line, bar and percentage
/// on the next.
pub struct BarChartWidget<'a> {
    chart: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> BarChartWidget<'a> {
    pub fn new(chart: &'a ChartData, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }
}

impl Widget for BarChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.chart.is_empty() || area.width == 0 {
            return;
        }
        let rows = bar_rows(self.chart, area.width);
        let drawable = area.width.saturating_sub(crate::timeline::chart::BAR_TEXT_RESERVE);
        for (i, row) in rows.iter().enumerate() {
            let y = area.y + (i as u16) * 2;
            if y + 1 >= area.y + area.height {
                break;
            }
            buf.set_string(
                area.x,
                y,
                truncate_unicode(row.key.label(), usize::from(area.width)),
                Style::default().fg(self.theme.text_secondary),
            );

            let (glyph, color) = if row.solid {
                (SOLID_GLYPH, self.theme.bar_primary)
            } else {
                (HATCH_GLYPH, self.theme.bar_secondary)
            };
            for col in 0..drawable {
                if let Some(cell) = buf.cell_mut((area.x + col, y + 1)) {
                    if col < row.length {
                        cell.set_char(glyph);
                        cell.set_style(Style::default().fg(color));
                    } else {
                        cell.set_char(' ');
                        cell.set_style(Style::default().bg(self.theme.bar_background));
                    }
                }
            }
            buf.set_string(
                area.x + row.length.min(drawable) + 1,
                y + 1,
                &row.pct_label,
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

fn chart_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Pie with legend on the left, one bar chart per modality on the right.
pub fn render(frame: &mut ratatui::Frame, area: Rect, report: &Report, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let pie_block = chart_block(Dimension::Pedagogy.title(), theme);
    let pie_inner = pie_block.inner(chunks[0]);
    frame.render_widget(pie_block, chunks[0]);

    let legend_width = LEGEND_WIDTH.min(pie_inner.width / 2);
    let pie_parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(4), Constraint::Length(legend_width)])
        .split(pie_inner);
    frame.render_widget(PieWidget::new(&report.pedagogy, theme), pie_parts[0]);
    frame.render_widget(
        Paragraph::new(legend_lines(&report.pedagogy, theme, legend_width)),
        pie_parts[1],
    );

    let count = report.bars.len().max(1) as u32;
    let bar_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(report.bars.iter().map(|_| Constraint::Ratio(1, count)))
        .split(chunks[1]);
    for (chart, bar_area) in report.bars.iter().zip(bar_areas.iter()) {
        let block = chart_block(chart.dimension.title(), theme);
        let inner = block.inner(*bar_area);
        frame.render_widget(block, *bar_area);
        frame.render_widget(BarChartWidget::new(chart, theme), inner);
    }
}
