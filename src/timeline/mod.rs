pub mod aggregate;
pub mod chart;
pub mod debounce;
pub mod dimension;
pub mod duration;
pub mod layout;
pub mod ruler;
pub mod scale;
pub mod scroll;

use serde::Serialize;

use crate::plan::model::Course;
use aggregate::{Aggregate, aggregate};
use chart::{ChartData, aggregate_by_dimension};
use dimension::Dimension;
use layout::{LayoutOptions, TimelineLayout, compute_layout};

/// Everything one recomputation pass produces. Rebuilt whole on each pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub aggregate: Aggregate,
    pub layout: TimelineLayout,
    pub pedagogy: ChartData,
    pub bars: Vec<ChartData>,
}

impl Report {
    pub fn bar(&self, dimension: Dimension) -> Option<&ChartData> {
        self.bars.iter().find(|c| c.dimension == dimension)
    }
}

pub fn recompute(course: &Course, options: &LayoutOptions) -> Report {
    let aggregate = aggregate(course);
    let layout = compute_layout(&aggregate, options);
    let pedagogy = aggregate_by_dimension(&aggregate, Dimension::Pedagogy);
    let bars = Dimension::BAR_CHARTS
        .iter()
        .map(|&d| aggregate_by_dimension(&aggregate, d))
        .collect();
    Report {
        aggregate,
        layout,
        pedagogy,
        bars,
    }
}
