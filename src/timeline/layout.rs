use serde::Serialize;

use super::aggregate::{Aggregate, ModuleSummary};
use super::dimension::{CategoryKey, Dimension};
use super::ruler::{RulerTick, ruler_ticks};
use super::scale::{OverflowPolicy, Scale, resolve_scale};

pub const DEFAULT_LABEL_MIN_WIDTH_PCT: f64 = 5.0;
pub const NARROW_LABEL: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub overflow_policy: OverflowPolicy,
    /// Blocks narrower than this show a dot instead of their title.
    pub label_min_width_pct: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            overflow_policy: OverflowPolicy::Strict,
            label_min_width_pct: DEFAULT_LABEL_MIN_WIDTH_PCT,
        }
    }
}

/// One step inside a sub-track. Offsets and widths are percentages of the
/// module's inner (designed) width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub step_index: usize,
    pub offset_pct: f64,
    pub width_pct: f64,
    pub seconds: f64,
    pub category: CategoryKey,
    /// Solid vs. hatched emphasis.
    pub solid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubTrack {
    pub dimension: Dimension,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleLayout {
    pub module_index: usize,
    pub title: String,
    /// Text shown under the target and designed blocks.
    pub label: String,
    /// Horizontal share of the course axis; identical on every track.
    pub offset_pct: f64,
    pub width_pct: f64,
    pub target_seconds: f64,
    pub designed_seconds: f64,
    pub segment_seconds: f64,
    /// No explicit target: the block stands in with the designed time.
    pub estimated: bool,
    /// designed / segment, not capped.
    pub fill_ratio: f64,
    pub overflow: bool,
    /// Width of the filled part of sub-tracks, as % of the block. Not capped.
    pub inner_width_pct: f64,
    /// Unfilled remainder against an explicit target, as % of the block.
    pub missing_pct: Option<f64>,
    pub pedagogy: SubTrack,
    pub details: Vec<SubTrack>,
}

impl ModuleLayout {
    pub fn visible_fill_pct(&self) -> f64 {
        (self.fill_ratio * 100.0).min(100.0)
    }

    pub fn visible_inner_pct(&self) -> f64 {
        self.inner_width_pct.min(100.0)
    }

    pub fn end_pct(&self) -> f64 {
        self.offset_pct + self.width_pct
    }

    pub fn detail(&self, dimension: Dimension) -> Option<&SubTrack> {
        self.details.iter().find(|t| t.dimension == dimension)
    }

    pub fn track(&self, dimension: Dimension) -> Option<&SubTrack> {
        if dimension == Dimension::Pedagogy {
            Some(&self.pedagogy)
        } else {
            self.detail(dimension)
        }
    }

    /// Course-axis span `(start, width)` of a segment, clipped to the block.
    /// `None` when the segment falls entirely past the block's right edge.
    pub fn segment_span(&self, segment: &Segment) -> Option<(f64, f64)> {
        let inner = self.width_pct * self.inner_width_pct / 100.0;
        let start = self.offset_pct + inner * segment.offset_pct / 100.0;
        let end = (start + inner * segment.width_pct / 100.0).min(self.end_pct());
        if end <= start {
            return None;
        }
        Some((start, end - start))
    }

    /// Course-axis span of the missing indicator, right after the fill.
    pub fn missing_span(&self) -> Option<(f64, f64)> {
        self.missing_pct.map(|pct| {
            let width = self.width_pct * pct / 100.0;
            (self.end_pct() - width, width)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub scale: Scale,
    pub modules: Vec<ModuleLayout>,
    pub ruler: Vec<RulerTick>,
}

impl TimelineLayout {
    pub fn empty(scale: Scale) -> Self {
        Self {
            scale,
            modules: Vec::new(),
            ruler: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module whose block covers `pct` on the course axis.
    pub fn module_at(&self, pct: f64) -> Option<&ModuleLayout> {
        self.modules
            .iter()
            .find(|m| pct >= m.offset_pct && pct < m.end_pct())
    }
}

fn sub_track(module: &ModuleSummary, dimension: Dimension) -> SubTrack {
    let mut segments = Vec::new();
    let mut offset_pct = 0.0;
    for step in module.steps.iter().filter(|s| s.is_drawable()) {
        let width_pct = step.seconds / module.designed_seconds * 100.0;
        let category = step.category(dimension);
        segments.push(Segment {
            step_index: step.index,
            offset_pct,
            width_pct,
            seconds: step.seconds,
            solid: category.is_primary(),
            category,
        });
        offset_pct += width_pct;
    }
    SubTrack {
        dimension,
        segments,
    }
}

fn module_layout(
    module: &ModuleSummary,
    scale: &Scale,
    offset_pct: f64,
    options: &LayoutOptions,
) -> ModuleLayout {
    let segment_seconds = module.segment_seconds();
    let width_pct = scale.pct(segment_seconds);
    let fill_ratio = module.designed_seconds / segment_seconds;
    let missing_pct = (module.has_target() && module.designed_seconds < segment_seconds)
        .then(|| (segment_seconds - module.designed_seconds) / segment_seconds * 100.0);
    let label = if width_pct > options.label_min_width_pct {
        module.title.clone()
    } else {
        NARROW_LABEL.to_string()
    };

    ModuleLayout {
        module_index: module.index,
        title: module.title.clone(),
        label,
        offset_pct,
        width_pct,
        target_seconds: module.target_seconds,
        designed_seconds: module.designed_seconds,
        segment_seconds,
        estimated: !module.has_target(),
        fill_ratio,
        overflow: options.overflow_policy.overflows(module),
        inner_width_pct: fill_ratio * 100.0,
        missing_pct,
        pedagogy: sub_track(module, Dimension::Pedagogy),
        details: Dimension::DETAIL_TRACKS
            .iter()
            .map(|&d| sub_track(module, d))
            .collect(),
    }
}

/// Lays out every track on the shared scale. Modules with nothing to draw
/// are skipped; an empty scale yields an empty layout.
pub fn compute_layout(aggregate: &Aggregate, options: &LayoutOptions) -> TimelineLayout {
    let scale = resolve_scale(aggregate);
    if scale.is_empty() {
        return TimelineLayout::empty(scale);
    }

    let mut modules = Vec::with_capacity(aggregate.modules.len());
    let mut offset_pct = 0.0;
    for module in &aggregate.modules {
        if module.segment_seconds() <= 0.0 {
            continue;
        }
        let layout = module_layout(module, &scale, offset_pct, options);
        offset_pct = layout.end_pct();
        modules.push(layout);
    }

    TimelineLayout {
        ruler: ruler_ticks(scale.total_seconds),
        scale,
        modules,
    }
}
