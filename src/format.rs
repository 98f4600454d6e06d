use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// One decimal, without a trailing `.0`.
pub fn trim_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

const MINUTES_PER_DAY: i64 = 1_440;
const MINUTES_PER_WEEK: i64 = 10_080;
const MINUTES_PER_MONTH: i64 = 43_200;

/// Compact duration for module and step labels.
///
/// `1h30`, `2h`, `0h45` under a day, then `1.5j`, `2sem`, `1.2mo`.
pub fn format_duration(seconds: f64) -> String {
    let minutes = if seconds.is_finite() {
        (seconds / 60.0).round() as i64
    } else {
        0
    };
    if minutes <= 0 {
        return "0m".to_string();
    }
    let m = minutes as f64;
    if minutes >= MINUTES_PER_MONTH {
        return format!("{}mo", trim_decimal(m / MINUTES_PER_MONTH as f64));
    }
    if minutes >= MINUTES_PER_WEEK {
        return format!("{}sem", trim_decimal(m / MINUTES_PER_WEEK as f64));
    }
    if minutes >= MINUTES_PER_DAY {
        return format!("{}j", trim_decimal(m / MINUTES_PER_DAY as f64));
    }
    let (h, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("{h}h")
    } else {
        format!("{h}h{rest}")
    }
}

/// Total in the chosen display unit, e.g. `7.5 Heures`.
pub fn format_total(value: f64, unit_label: &str) -> String {
    format!("{} {unit_label}", trim_decimal(value))
}
