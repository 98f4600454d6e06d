use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::model::{Course, Moment, Module, RawDuration, Step};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectFile {
    key_params: KeyParams,
    activities: Vec<ActivityRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct KeyParams {
    #[serde(deserialize_with = "loose_string")]
    name: String,
    #[serde(deserialize_with = "loose_string")]
    learning_time_unit: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ActivityRecord {
    #[serde(deserialize_with = "loose_string")]
    title: String,
    #[serde(deserialize_with = "loose_number")]
    target_time: Option<f64>,
    #[serde(deserialize_with = "loose_number")]
    target_unit: Option<f64>,
    moments: Vec<MomentRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MomentRecord {
    #[serde(deserialize_with = "loose_string")]
    title: String,
    #[serde(deserialize_with = "loose_number")]
    target_time: Option<f64>,
    #[serde(deserialize_with = "loose_number")]
    target_unit: Option<f64>,
    steps: Vec<StepRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StepRecord {
    #[serde(deserialize_with = "loose_string")]
    title: String,
    #[serde(deserialize_with = "loose_string")]
    gws_tool: String,
    #[serde(rename = "type", deserialize_with = "loose_string")]
    kind: String,
    #[serde(deserialize_with = "loose_number")]
    duration: Option<f64>,
    #[serde(deserialize_with = "loose_number")]
    unit: Option<f64>,
    #[serde(deserialize_with = "loose_string")]
    group_mode: String,
    #[serde(deserialize_with = "loose_string")]
    trainer: String,
    #[serde(deserialize_with = "loose_string")]
    place: String,
    #[serde(deserialize_with = "loose_string")]
    time: String,
}

impl From<StepRecord> for Step {
    fn from(r: StepRecord) -> Self {
        Step {
            title: r.title,
            pedagogical_type: r.kind.into(),
            tool: r.gws_tool,
            duration: RawDuration {
                value: r.duration,
                unit_seconds: r.unit,
            },
            group_mode: r.group_mode.into(),
            trainer: r.trainer.into(),
            place: r.place.into(),
            time_mode: r.time.into(),
        }
    }
}

impl From<MomentRecord> for Moment {
    fn from(r: MomentRecord) -> Self {
        Moment {
            title: r.title,
            target: RawDuration {
                value: r.target_time,
                unit_seconds: r.target_unit,
            },
            steps: r.steps.into_iter().map(Step::from).collect(),
        }
    }
}

impl From<ActivityRecord> for Module {
    fn from(r: ActivityRecord) -> Self {
        Module {
            title: r.title,
            target: RawDuration {
                value: r.target_time,
                unit_seconds: r.target_unit,
            },
            moments: r.moments.into_iter().map(Moment::from).collect(),
        }
    }
}

/// Parses a project export held in memory.
pub fn parse_course(contents: &str) -> Result<Course> {
    let project: ProjectFile =
        serde_json::from_str(contents).wrap_err("plan is not a valid project export")?;
    Ok(Course {
        name: project.key_params.name,
        learning_time_unit: project.key_params.learning_time_unit,
        modules: project.activities.into_iter().map(Module::from).collect(),
    })
}

pub fn load_course(path: &Path) -> Result<Course> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read plan {}", path.display()))?;
    parse_course(&contents).wrap_err_with(|| format!("failed to parse plan {}", path.display()))
}

fn loose_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn loose_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(&s),
        _ => None,
    })
}

/// Reads the longest leading decimal number of `s` ("12.5 min" -> 12.5).
/// Returns `None` when `s` does not start with a number.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::model::{GroupMode, PedagogicalType, Place, TimeMode, TrainerPresence};

    const EXPORT: &str = r#"{
        "version": "2.0-GWS",
        "keyParams": { "name": "Onboarding", "learningTimeUnit": "hours" },
        "activities": [
            {
                "title": "Découverte",
                "targetTime": "2",
                "targetUnit": "3600",
                "moments": [
                    {
                        "title": "Intro",
                        "targetTime": "",
                        "targetUnit": "60",
                        "steps": [
                            {
                                "title": "Tour de table",
                                "gwsTool": "meet",
                                "type": "demonstration",
                                "duration": "20",
                                "unit": "60",
                                "groupMode": "class",
                                "trainer": "present",
                                "place": "online",
                                "time": "sync"
                            },
                            {
                                "title": "Atelier",
                                "type": "lab",
                                "duration": 45,
                                "unit": null,
                                "groupMode": "groups",
                                "trainer": "absent",
                                "place": "situ",
                                "time": "async"
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_project_export() {
        let course = parse_course(EXPORT).unwrap();
        assert_eq!(course.name, "Onboarding");
        assert_eq!(course.learning_time_unit, "hours");
        assert_eq!(course.modules.len(), 1);

        let module = &course.modules[0];
        assert_eq!(module.title, "Découverte");
        assert_eq!(module.target, RawDuration::new(2.0, 3600.0));

        let moment = &module.moments[0];
        assert_eq!(moment.target.value, None);
        assert_eq!(moment.target.unit_seconds, Some(60.0));

        let first = &moment.steps[0];
        assert_eq!(first.pedagogical_type, PedagogicalType::Demonstration);
        assert_eq!(first.tool, "meet");
        assert_eq!(first.duration, RawDuration::new(20.0, 60.0));
        assert_eq!(first.place, Place::Online);

        let second = &moment.steps[1];
        assert_eq!(second.tool, "");
        assert_eq!(second.duration.value, Some(45.0));
        assert_eq!(second.duration.unit_seconds, None);
        assert_eq!(second.group_mode, GroupMode::Groups);
        assert_eq!(second.trainer, TrainerPresence::Absent);
        assert_eq!(second.time_mode, TimeMode::Async);
    }

    #[test]
    fn missing_sections_default() {
        let course = parse_course("{}").unwrap();
        assert!(course.modules.is_empty());
        assert_eq!(course.name, "");
    }

    #[test]
    fn missing_categorical_fields_use_defaults() {
        let course = parse_course(
            r#"{"activities":[{"moments":[{"steps":[{"title":"x","duration":"5"}]}]}]}"#,
        )
        .unwrap();
        let step = &course.modules[0].moments[0].steps[0];
        assert_eq!(step.pedagogical_type, PedagogicalType::None);
        assert_eq!(step.group_mode, GroupMode::Class);
        assert_eq!(step.trainer, TrainerPresence::Present);
        assert_eq!(step.place, Place::Situ);
        assert_eq!(step.time_mode, TimeMode::Sync);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_course("{ not json").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_course(Path::new("/nonexistent/plan.json")).unwrap_err();
        assert!(format!("{err:?}").contains("/nonexistent/plan.json"));
    }

    #[test]
    fn float_prefix_parsing() {
        assert_eq!(parse_float_prefix("12"), Some(12.0));
        assert_eq!(parse_float_prefix(" 12.5 min"), Some(12.5));
        assert_eq!(parse_float_prefix("-3"), Some(-3.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
    }
}
