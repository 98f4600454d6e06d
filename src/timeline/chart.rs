use std::f64::consts::TAU;

use serde::Serialize;

use super::aggregate::Aggregate;
use super::dimension::{CategoryKey, Dimension};

/// Columns kept free to the right of a bar for its percentage text.
pub const BAR_TEXT_RESERVE: u16 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: CategoryKey,
    pub seconds: f64,
    /// Share of the chart total, 0..=1.
    pub pct: f64,
}

impl Bucket {
    pub fn label(&self) -> &str {
        self.key.label()
    }

    /// Whole percent, as shown next to slices and bars.
    pub fn rounded_pct(&self) -> u32 {
        (self.pct * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub dimension: Dimension,
    /// First-seen order of categories over the course.
    pub buckets: Vec<Bucket>,
    pub total: f64,
}

impl ChartData {
    /// Nothing timed along this dimension; render a placeholder.
    pub fn is_empty(&self) -> bool {
        self.total <= 0.0
    }
}

/// Sums step durations per category. Zero-duration steps are left out.
pub fn aggregate_by_dimension(aggregate: &Aggregate, dimension: Dimension) -> ChartData {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut total = 0.0;
    for step in aggregate.steps().filter(|s| s.is_drawable()) {
        let key = step.category(dimension);
        match buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.seconds += step.seconds,
            None => buckets.push(Bucket {
                key,
                seconds: step.seconds,
                pct: 0.0,
            }),
        }
        total += step.seconds;
    }
    if total > 0.0 {
        for bucket in &mut buckets {
            bucket.pct = bucket.seconds / total;
        }
    }
    ChartData {
        dimension,
        buckets,
        total,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub key: CategoryKey,
    /// Radians, clockwise from 12 o'clock.
    pub start_angle: f64,
    pub sweep: f64,
}

impl PieSlice {
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.start_angle + self.sweep
    }
}

pub fn pie_slices(chart: &ChartData) -> Vec<PieSlice> {
    if chart.is_empty() {
        return Vec::new();
    }
    let mut start_angle = 0.0;
    chart
        .buckets
        .iter()
        .map(|bucket| {
            let sweep = bucket.seconds / chart.total * TAU;
            let slice = PieSlice {
                key: bucket.key.clone(),
                start_angle,
                sweep,
            };
            start_angle += sweep;
            slice
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRow {
    pub key: CategoryKey,
    pub length: u16,
    pub pct_label: String,
    pub solid: bool,
}

/// One bar per bucket. Bars scale against `available_width` minus the room
/// kept for the percentage text.
pub fn bar_rows(chart: &ChartData, available_width: u16) -> Vec<BarRow> {
    let drawable = f64::from(available_width.saturating_sub(BAR_TEXT_RESERVE));
    chart
        .buckets
        .iter()
        .map(|bucket| BarRow {
            key: bucket.key.clone(),
            length: (drawable * bucket.pct).round() as u16,
            pct_label: format!("{}%", bucket.rounded_pct()),
            solid: bucket.key.is_primary(),
        })
        .collect()
}
