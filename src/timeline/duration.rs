use serde::Serialize;

use crate::plan::model::RawDuration;

pub const DEFAULT_UNIT_SECONDS: f64 = 60.0;

/// Canonical seconds for `value` expressed in `unit_seconds`.
///
/// Negative or non-finite values count as 0, as does a product too large
/// to represent. A non-finite or non-positive unit falls back to minutes.
/// Never fails.
pub fn to_seconds(value: f64, unit_seconds: f64) -> f64 {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    let unit = if unit_seconds.is_finite() && unit_seconds > 0.0 {
        unit_seconds
    } else {
        DEFAULT_UNIT_SECONDS
    };
    let seconds = value * unit;
    if seconds.is_finite() { seconds } else { 0.0 }
}

/// Unit seconds after the same fallback `to_seconds` applies.
pub fn effective_unit(unit_seconds: Option<f64>) -> f64 {
    match unit_seconds {
        Some(u) if u.is_finite() && u > 0.0 => u,
        _ => DEFAULT_UNIT_SECONDS,
    }
}

impl RawDuration {
    pub fn seconds(&self) -> f64 {
        to_seconds(
            self.value.unwrap_or(0.0),
            self.unit_seconds.unwrap_or(DEFAULT_UNIT_SECONDS),
        )
    }
}

/// Unit used to display the course total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

impl DisplayUnit {
    pub fn divisor(self) -> f64 {
        match self {
            DisplayUnit::Minutes => 60.0,
            DisplayUnit::Hours => 3_600.0,
            DisplayUnit::Days => 86_400.0,
            DisplayUnit::Weeks => 604_800.0,
            DisplayUnit::Months => 2_592_000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayUnit::Minutes => "min",
            DisplayUnit::Hours => "Heures",
            DisplayUnit::Days => "Jours",
            DisplayUnit::Weeks => "Semaines",
            DisplayUnit::Months => "Mois",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DisplayUnit::Minutes => DisplayUnit::Hours,
            DisplayUnit::Hours => DisplayUnit::Days,
            DisplayUnit::Days => DisplayUnit::Weeks,
            DisplayUnit::Weeks => DisplayUnit::Months,
            DisplayUnit::Months => DisplayUnit::Minutes,
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hours" | "hour" | "h" => DisplayUnit::Hours,
            "days" | "day" | "d" => DisplayUnit::Days,
            "weeks" | "week" | "w" => DisplayUnit::Weeks,
            "months" | "month" | "mo" => DisplayUnit::Months,
            _ => DisplayUnit::Minutes,
        }
    }

    /// `seconds` in this unit: whole minutes, otherwise one decimal.
    pub fn convert(self, seconds: f64) -> f64 {
        let value = seconds / self.divisor();
        match self {
            DisplayUnit::Minutes => value.round(),
            _ => round_to_tenth(value),
        }
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
