use serde::Serialize;

use super::dimension::{CategoryKey, Dimension, tool_label};
use super::duration::{DisplayUnit, effective_unit, round_to_tenth};
use super::scale::TARGET_TOLERANCE_SECONDS;
use crate::plan::model::{
    Course, GroupMode, Moment, Module, PedagogicalType, Place, Step, TimeMode, TrainerPresence,
};

pub const UNTITLED_STEP: &str = "Sans titre";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    /// Position among all steps of the module, zero-duration ones included.
    pub index: usize,
    pub title: String,
    pub seconds: f64,
    pub pedagogical_type: PedagogicalType,
    pub tool: String,
    pub group_mode: GroupMode,
    pub trainer: TrainerPresence,
    pub place: Place,
    pub time_mode: TimeMode,
}

impl StepSummary {
    fn from_step(index: usize, step: &Step) -> Self {
        let title = if step.title.trim().is_empty() {
            UNTITLED_STEP.to_string()
        } else {
            step.title.clone()
        };
        Self {
            index,
            title,
            seconds: step.duration.seconds(),
            pedagogical_type: step.pedagogical_type.clone(),
            tool: step.tool.clone(),
            group_mode: step.group_mode.clone(),
            trainer: step.trainer.clone(),
            place: step.place.clone(),
            time_mode: step.time_mode.clone(),
        }
    }

    pub fn category(&self, dimension: Dimension) -> CategoryKey {
        match dimension {
            Dimension::Pedagogy => CategoryKey::Pedagogy(self.pedagogical_type.clone()),
            Dimension::Tool => CategoryKey::Tool(self.tool.trim().to_string()),
            Dimension::Grouping => CategoryKey::Grouping(self.group_mode.clone()),
            Dimension::Trainer => CategoryKey::Trainer(self.trainer.clone()),
            Dimension::Place => CategoryKey::Place(self.place.clone()),
            Dimension::TimeMode => CategoryKey::TimeMode(self.time_mode.clone()),
        }
    }

    pub fn type_label(&self) -> &str {
        self.pedagogical_type.label()
    }

    pub fn tool_label(&self) -> &str {
        tool_label(&self.tool)
    }

    pub fn is_drawable(&self) -> bool {
        self.seconds > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentSummary {
    pub title: String,
    pub seconds: f64,
    pub unit_seconds: f64,
    /// Total expressed in the moment's own unit.
    pub display_value: f64,
    pub unit_label: String,
}

impl MomentSummary {
    fn from_moment(moment: &Moment) -> Self {
        let seconds: f64 = moment.steps.iter().map(|s| s.duration.seconds()).sum();
        let unit_seconds = effective_unit(moment.target.unit_seconds);
        let raw = seconds / unit_seconds;
        let display_value = if unit_seconds == 60.0 {
            raw.round()
        } else {
            round_to_tenth(raw)
        };
        Self {
            title: moment.title.clone(),
            seconds,
            unit_seconds,
            display_value,
            unit_label: unit_label(unit_seconds),
        }
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.display_value, self.unit_label)
    }
}

fn unit_label(unit_seconds: f64) -> String {
    const UNITS: [DisplayUnit; 5] = [
        DisplayUnit::Minutes,
        DisplayUnit::Hours,
        DisplayUnit::Days,
        DisplayUnit::Weeks,
        DisplayUnit::Months,
    ];
    UNITS
        .iter()
        .find(|u| u.divisor() == unit_seconds)
        .map(|u| u.label().to_string())
        .unwrap_or_else(|| format!("x{unit_seconds}s"))
}

/// How the designed time sits against an explicit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetComparison {
    Equal,
    Over,
    Under,
}

impl TargetComparison {
    pub fn symbol(self) -> &'static str {
        match self {
            TargetComparison::Equal => "=",
            TargetComparison::Over => ">",
            TargetComparison::Under => "<",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub index: usize,
    pub title: String,
    /// 0 when the author set no target.
    pub target_seconds: f64,
    pub designed_seconds: f64,
    pub moments: Vec<MomentSummary>,
    pub steps: Vec<StepSummary>,
}

impl ModuleSummary {
    fn from_module(index: usize, module: &Module) -> Self {
        let title = if module.title.trim().is_empty() {
            format!("Module {}", index + 1)
        } else {
            module.title.clone()
        };
        let steps: Vec<StepSummary> = module
            .steps()
            .enumerate()
            .map(|(i, step)| StepSummary::from_step(i, step))
            .collect();
        let designed_seconds = steps.iter().map(|s| s.seconds).sum();
        Self {
            index,
            title,
            target_seconds: module.target.seconds(),
            designed_seconds,
            moments: module.moments.iter().map(MomentSummary::from_moment).collect(),
            steps,
        }
    }

    pub fn has_target(&self) -> bool {
        self.target_seconds > 0.0
    }

    /// Share of the visual scale: the target when set, else the designed time.
    pub fn segment_seconds(&self) -> f64 {
        if self.has_target() {
            self.target_seconds
        } else {
            self.designed_seconds
        }
    }

    pub fn comparison(&self) -> Option<TargetComparison> {
        if !self.has_target() {
            return None;
        }
        let diff = self.designed_seconds - self.target_seconds;
        Some(if diff.abs() < TARGET_TOLERANCE_SECONDS {
            TargetComparison::Equal
        } else if diff > 0.0 {
            TargetComparison::Over
        } else {
            TargetComparison::Under
        })
    }

    /// Designed time strays from the explicit target by more than the tolerance.
    pub fn duration_alert(&self) -> bool {
        self.has_target()
            && (self.target_seconds - self.designed_seconds).abs() > TARGET_TOLERANCE_SECONDS
    }
}

/// Totals for one pass over the course. Layout and charts both read from
/// here so they always agree on the numbers they show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub course_name: String,
    pub total_seconds: f64,
    pub modules: Vec<ModuleSummary>,
}

impl Aggregate {
    pub fn steps(&self) -> impl Iterator<Item = &StepSummary> {
        self.modules.iter().flat_map(|m| m.steps.iter())
    }

    pub fn total_in(&self, unit: DisplayUnit) -> f64 {
        unit.convert(self.total_seconds)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Walks modules, moments and steps in document order.
pub fn aggregate(course: &Course) -> Aggregate {
    let modules: Vec<ModuleSummary> = course
        .modules
        .iter()
        .enumerate()
        .map(|(i, module)| ModuleSummary::from_module(i, module))
        .collect();
    let total_seconds = modules.iter().map(|m| m.designed_seconds).sum();

    Aggregate {
        course_name: course.name.clone(),
        total_seconds,
        modules,
    }
}
