use serde::Serialize;

use super::aggregate::{Aggregate, ModuleSummary};

/// Slack allowed between designed and target time before flagging it.
pub const TARGET_TOLERANCE_SECONDS: f64 = 60.0;

/// When the designed-fill track raises its overflow indicator. Both
/// policies only fire against an explicit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Any excess over the segment.
    #[default]
    Strict,
    /// Excess beyond `TARGET_TOLERANCE_SECONDS`.
    Tolerant,
}

impl OverflowPolicy {
    pub fn from_str_config(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "tolerant" | "tolerance" => OverflowPolicy::Tolerant,
            _ => OverflowPolicy::Strict,
        }
    }

    pub fn overflows(self, module: &ModuleSummary) -> bool {
        if !module.has_target() {
            return false;
        }
        let excess = module.designed_seconds - module.segment_seconds();
        match self {
            OverflowPolicy::Strict => excess > 0.0,
            OverflowPolicy::Tolerant => excess > TARGET_TOLERANCE_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub designed_seconds: f64,
    pub planned_seconds: f64,
    /// Common denominator for every track.
    pub total_seconds: f64,
}

impl Scale {
    pub fn is_empty(&self) -> bool {
        self.total_seconds <= 0.0
    }

    /// Percentage of the axis covered by `seconds`.
    pub fn pct(&self, seconds: f64) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            seconds / self.total_seconds * 100.0
        }
    }
}

/// The axis must fit both what was targeted and what was designed, so the
/// larger of the two totals wins.
pub fn resolve_scale(aggregate: &Aggregate) -> Scale {
    let planned_seconds: f64 = aggregate
        .modules
        .iter()
        .map(ModuleSummary::segment_seconds)
        .sum();
    Scale {
        designed_seconds: aggregate.total_seconds,
        planned_seconds,
        total_seconds: aggregate.total_seconds.max(planned_seconds),
    }
}
