use serde::Serialize;

/// Upper bound on ticks for one axis; longer axes widen the step.
pub const MAX_TICKS: u64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulerTick {
    pub minutes: u64,
    /// Position along the course axis, 0..=100.
    pub offset_pct: f64,
    pub label: String,
}

/// Tick spacing in minutes for an axis spanning `total_minutes`.
pub fn ruler_step_minutes(total_minutes: f64) -> u32 {
    if total_minutes > 2000.0 {
        240
    } else if total_minutes > 480.0 {
        60
    } else if total_minutes > 120.0 {
        30
    } else {
        10
    }
}

pub fn tick_label(minutes: u64) -> String {
    if minutes == 0 {
        "0".to_string()
    } else if minutes >= 60 && minutes.is_multiple_of(60) {
        format!("{}h", minutes / 60)
    } else {
        minutes.to_string()
    }
}

pub fn ruler_ticks(scale_seconds: f64) -> Vec<RulerTick> {
    if scale_seconds <= 0.0 || !scale_seconds.is_finite() {
        return Vec::new();
    }
    let total_minutes = scale_seconds / 60.0;
    let mut step = f64::from(ruler_step_minutes(total_minutes));
    let max_ticks = MAX_TICKS as f64;
    let count = (total_minutes / step).floor();
    if count > max_ticks {
        step *= (count / max_ticks).ceil();
    }
    let count = ((total_minutes / step).floor() as u64).min(MAX_TICKS);

    let mut ticks = Vec::with_capacity(count as usize + 1);
    for i in 0..=count {
        let at = i as f64 * step;
        let offset_pct = at / total_minutes * 100.0;
        if offset_pct > 100.0 {
            break;
        }
        let minutes = at as u64;
        ticks.push(RulerTick {
            minutes,
            offset_pct,
            label: tick_label(minutes),
        });
    }
    ticks
}
