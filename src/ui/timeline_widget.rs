use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::format::truncate_unicode;
use crate::timeline::dimension::Dimension;
use crate::timeline::layout::{ModuleLayout, SubTrack, TimelineLayout};
use crate::timeline::scroll::ScrollCoordinator;
use crate::ui::theme::{
    ESTIMATED_GLYPH, HATCH_GLYPH, MISSING_GLYPH, OVERFLOW_GLYPH, SOLID_GLYPH, Theme,
};

pub const GUTTER_WIDTH: u16 = 13;
pub const EMPTY_MESSAGE: &str = "Aucune donnée";

/// Scrollable rows, top to bottom. Indices double as scroll track ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackRow {
    Ruler,
    Target,
    Labels,
    Designed,
    Sub(Dimension),
    Scrollbar,
}

pub const ROWS: [TrackRow; 10] = [
    TrackRow::Ruler,
    TrackRow::Target,
    TrackRow::Labels,
    TrackRow::Designed,
    TrackRow::Sub(Dimension::Pedagogy),
    TrackRow::Sub(Dimension::Grouping),
    TrackRow::Sub(Dimension::Trainer),
    TrackRow::Sub(Dimension::Place),
    TrackRow::Sub(Dimension::TimeMode),
    TrackRow::Scrollbar,
];

/// Rows that scroll in lockstep; the scrollbar proxy is not one of them.
pub const TRACK_COUNT: usize = ROWS.len() - 1;

pub const HEIGHT: u16 = ROWS.len() as u16;

impl TrackRow {
    pub fn gutter_label(self) -> &'static str {
        match self {
            TrackRow::Ruler => "",
            TrackRow::Target => "Cible",
            TrackRow::Labels => "",
            TrackRow::Designed => "Conçu",
            TrackRow::Sub(dimension) => dimension.title(),
            TrackRow::Scrollbar => "",
        }
    }

    /// Row under `y`, relative to the top of the widget.
    pub fn at(y: u16) -> Option<TrackRow> {
        ROWS.get(usize::from(y)).copied()
    }

    pub fn track_index(self) -> Option<usize> {
        ROWS.iter()
            .position(|&r| r == self)
            .filter(|&idx| idx < TRACK_COUNT)
    }
}

/// Part of `area` the tracks draw into, right of the gutter.
pub fn track_area(area: Rect) -> Rect {
    let gutter = GUTTER_WIDTH.min(area.width);
    Rect::new(
        area.x + gutter,
        area.y,
        area.width - gutter,
        area.height.min(HEIGHT),
    )
}

/// Maps course-axis percentages to viewport columns.
#[derive(Debug, Clone, Copy)]
struct Axis {
    content: f64,
    offset: i32,
    viewport: i32,
}

impl Axis {
    fn new(coordinator: &ScrollCoordinator, viewport: u16, offset: u16) -> Self {
        Self {
            content: f64::from(coordinator.content_width()),
            offset: i32::from(offset),
            viewport: i32::from(viewport),
        }
    }

    fn col(&self, pct: f64) -> i32 {
        (pct / 100.0 * self.content).round() as i32 - self.offset
    }

    /// Visible `[start, end)` columns of a span, at least one column wide.
    fn span(&self, start_pct: f64, width_pct: f64) -> Option<(u16, u16)> {
        if width_pct <= 0.0 {
            return None;
        }
        let x0 = self.col(start_pct);
        let x1 = self.col(start_pct + width_pct).max(x0 + 1);
        let (x0, x1) = (x0.max(0), x1.min(self.viewport));
        (x0 < x1).then_some((x0 as u16, x1 as u16))
    }
}

pub struct TimelineWidget<'a> {
    layout: &'a TimelineLayout,
    coordinator: &'a ScrollCoordinator,
    selected: Option<usize>,
    theme: &'a Theme,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(
        layout: &'a TimelineLayout,
        coordinator: &'a ScrollCoordinator,
        selected: Option<usize>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            layout,
            coordinator,
            selected,
            theme,
        }
    }
}

pub fn render(
    frame: &mut ratatui::Frame,
    area: Rect,
    layout: &TimelineLayout,
    coordinator: &ScrollCoordinator,
    selected: Option<usize>,
    theme: &Theme,
) {
    frame.render_widget(TimelineWidget::new(layout, coordinator, selected, theme), area);
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= GUTTER_WIDTH || area.height == 0 {
            return;
        }
        if self.layout.is_empty() {
            let msg = EMPTY_MESSAGE;
            let w = msg.width() as u16;
            if area.width >= w {
                let x = area.x + (area.width - w) / 2;
                let y = area.y + area.height / 2;
                buf.set_string(x, y, msg, Style::default().fg(Color::DarkGray));
            }
            return;
        }

        let tracks = track_area(area);

        for (i, row) in ROWS.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_string(
                area.x,
                y,
                truncate_unicode(row.gutter_label(), usize::from(GUTTER_WIDTH - 1)),
                Style::default().fg(self.theme.text_secondary),
            );
            let line = Rect::new(tracks.x, y, tracks.width, 1);
            let offset = row.track_index().map_or(self.coordinator.proxy_offset(), |idx| {
                self.coordinator.track_offset(idx)
            });
            let axis = Axis::new(self.coordinator, tracks.width, offset);
            match row {
                TrackRow::Ruler => self.render_ruler(line, &axis, buf),
                TrackRow::Target => self.render_target(line, &axis, buf),
                TrackRow::Labels => self.render_labels(line, &axis, buf),
                TrackRow::Designed => self.render_designed(line, &axis, buf),
                TrackRow::Sub(dimension) => self.render_sub_track(*dimension, line, &axis, buf),
                TrackRow::Scrollbar => self.render_scrollbar(line, buf),
            }
        }
    }
}

impl TimelineWidget<'_> {
    fn is_selected(&self, module: &ModuleLayout) -> bool {
        self.selected == Some(module.module_index)
    }

    fn render_ruler(&self, line: Rect, axis: &Axis, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.ruler);
        let mut next_free = 0i32;
        for tick in &self.layout.ruler {
            let col = axis.col(tick.offset_pct);
            if col < next_free || col >= axis.viewport {
                continue;
            }
            let text = format!("|{}", tick.label);
            let room = (axis.viewport - col) as usize;
            let text = truncate_unicode(&text, room);
            buf.set_string(line.x + col as u16, line.y, &text, style);
            next_free = col + text.width() as i32 + 1;
        }
    }

    fn render_target(&self, line: Rect, axis: &Axis, buf: &mut Buffer) {
        for module in &self.layout.modules {
            let Some((x0, x1)) = axis.span(module.offset_pct, module.width_pct) else {
                continue;
            };
            let (glyph, color) = if module.estimated {
                (ESTIMATED_GLYPH, self.theme.track_estimated)
            } else {
                (SOLID_GLYPH, self.theme.track_target)
            };
            let mut style = Style::default().fg(color);
            if self.is_selected(module) {
                style = style.add_modifier(Modifier::BOLD);
            }
            fill(buf, line, x0, gap_end(x0, x1), glyph, style);
        }
    }

    fn render_labels(&self, line: Rect, axis: &Axis, buf: &mut Buffer) {
        for module in &self.layout.modules {
            let Some((x0, x1)) = axis.span(module.offset_pct, module.width_pct) else {
                continue;
            };
            let style = if self.is_selected(module) {
                Style::default()
                    .fg(self.theme.selection_border)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_primary)
            };
            let room = usize::from(gap_end(x0, x1) - x0);
            let label = truncate_unicode(&module.label, room);
            buf.set_string(line.x + x0, line.y, &label, style);
        }
    }

    fn render_designed(&self, line: Rect, axis: &Axis, buf: &mut Buffer) {
        for module in &self.layout.modules {
            let Some((x0, x1)) = axis.span(module.offset_pct, module.width_pct) else {
                continue;
            };
            let end = gap_end(x0, x1);
            let fill_width = module.width_pct * module.visible_fill_pct() / 100.0;
            let color = if module.overflow {
                self.theme.track_overflow
            } else {
                self.theme.track_designed
            };
            if let Some((f0, f1)) = axis.span(module.offset_pct, fill_width) {
                fill(buf, line, f0, f1.min(end), SOLID_GLYPH, Style::default().fg(color));
            }
            if module.overflow && end > x0 {
                fill(
                    buf,
                    line,
                    end - 1,
                    end,
                    OVERFLOW_GLYPH,
                    Style::default()
                        .fg(self.theme.track_overflow)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }

    fn render_sub_track(&self, dimension: Dimension, line: Rect, axis: &Axis, buf: &mut Buffer) {
        for module in &self.layout.modules {
            let Some((x0, x1)) = axis.span(module.offset_pct, module.width_pct) else {
                continue;
            };
            let end = gap_end(x0, x1);
            let Some(track) = module.track(dimension) else {
                continue;
            };
            self.render_segments(module, track, line, axis, end, buf);
            // shortfall against the target shows on the pedagogy row only
            if dimension == Dimension::Pedagogy
                && let Some((start, width)) = module.missing_span()
                && let Some((m0, m1)) = axis.span(start, width)
            {
                fill(
                    buf,
                    line,
                    m0,
                    m1.min(end),
                    MISSING_GLYPH,
                    Style::default().fg(self.theme.track_missing),
                );
            }
        }
    }

    fn render_segments(
        &self,
        module: &ModuleLayout,
        track: &SubTrack,
        line: Rect,
        axis: &Axis,
        end: u16,
        buf: &mut Buffer,
    ) {
        for segment in &track.segments {
            let Some((start, width)) = module.segment_span(segment) else {
                continue;
            };
            let Some((s0, s1)) = axis.span(start, width) else {
                continue;
            };
            let glyph = if track.dimension == Dimension::Pedagogy || segment.solid {
                SOLID_GLYPH
            } else {
                HATCH_GLYPH
            };
            let style = Style::default().fg(self.theme.category_color(&segment.category));
            fill(buf, line, s0, s1.min(end), glyph, style);
        }
    }

    fn render_scrollbar(&self, line: Rect, buf: &mut Buffer) {
        let viewport = f64::from(line.width);
        let content = f64::from(self.coordinator.content_width().max(line.width));
        let thumb_len = ((viewport / content) * viewport).round().max(1.0) as u16;
        let thumb_start =
            ((f64::from(self.coordinator.proxy_offset()) / content) * viewport).round() as u16;
        let thumb_end = (thumb_start + thumb_len).min(line.width);

        fill(
            buf,
            line,
            0,
            line.width,
            '─',
            Style::default().fg(self.theme.text_secondary),
        );
        fill(
            buf,
            line,
            thumb_start.min(line.width),
            thumb_end,
            '━',
            Style::default().fg(self.theme.text_primary),
        );
    }
}

/// Leaves one blank column between adjacent module blocks.
fn gap_end(x0: u16, x1: u16) -> u16 {
    if x1 - x0 > 2 { x1 - 1 } else { x1 }
}

fn fill(buf: &mut Buffer, line: Rect, x0: u16, x1: u16, glyph: char, style: Style) {
    for col in x0..x1.min(line.width) {
        if let Some(cell) = buf.cell_mut((line.x + col, line.y)) {
            cell.set_char(glyph);
            cell.set_style(style);
        }
    }
}
