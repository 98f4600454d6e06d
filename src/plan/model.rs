use serde::{Deserialize, Serialize};

/// Raw duration as typed by the author: a value and a unit expressed in
/// seconds. Either side may be missing or non-numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDuration {
    pub value: Option<f64>,
    pub unit_seconds: Option<f64>,
}

impl RawDuration {
    pub fn new(value: f64, unit_seconds: f64) -> Self {
        Self {
            value: Some(value),
            unit_seconds: Some(unit_seconds),
        }
    }

    pub fn minutes(value: f64) -> Self {
        Self::new(value, 60.0)
    }

    pub fn unset() -> Self {
        Self::default()
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            default = $default:ident,
            primary = [$($primary:ident),*],
            $($variant:ident => ($key:literal, $label:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A key this build does not know; kept verbatim.
            Other(String),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn from_key(key: &str) -> Self {
                match key.trim() {
                    "" => $name::$default,
                    $($key => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }

            pub fn key(&self) -> &str {
                match self {
                    $($name::$variant => $key,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            #[allow(unreachable_patterns)]
            pub fn is_primary(&self) -> bool {
                match self {
                    $($name::$primary => true,)*
                    _ => false,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                $name::from_key(&key)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                $name::from_key(key)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.key().to_string()
            }
        }
    };
}

categorical! {
    /// Pedagogical nature of a step. Drives the colour of the pedagogy track
    /// and the pie chart.
    pub enum PedagogicalType {
        default = None,
        primary = [],
        None => ("none", "Neutre"),
        Demonstration => ("demonstration", "Démonstration"),
        Lab => ("lab", "Labo Pratique"),
        Collaboration => ("collaboration", "Co-édition"),
        Evaluation => ("evaluation", "Quiz / Certif."),
        Scenario => ("scenario", "Cas Métier"),
        Migration => ("migration", "Transition"),
    }
}

categorical! {
    pub enum GroupMode {
        default = Class,
        primary = [Class],
        Class => ("class", "Classe"),
        Groups => ("groups", "Sous-groupes"),
        Individual => ("individual", "Individuel"),
    }
}

categorical! {
    pub enum TrainerPresence {
        default = Present,
        primary = [Present],
        Present => ("present", "Présent"),
        Absent => ("absent", "Absent"),
    }
}

categorical! {
    pub enum Place {
        default = Situ,
        primary = [Situ],
        Situ => ("situ", "Présentiel"),
        Online => ("online", "Distanciel"),
        Hybrid => ("hybrid", "Hybride"),
    }
}

categorical! {
    pub enum TimeMode {
        default = Sync,
        primary = [Sync],
        Sync => ("sync", "Synchrone"),
        Async => ("async", "Asynchrone"),
    }
}

/// Atomic timed activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub pedagogical_type: PedagogicalType,
    pub tool: String,
    pub duration: RawDuration,
    pub group_mode: GroupMode,
    pub trainer: TrainerPresence,
    pub place: Place,
    pub time_mode: TimeMode,
}

impl Step {
    pub fn new(title: &str, pedagogical_type: PedagogicalType, duration: RawDuration) -> Self {
        Self {
            title: title.to_string(),
            pedagogical_type,
            duration,
            ..Self::default()
        }
    }

    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tool = tool.to_string();
        self
    }

    pub fn with_group_mode(mut self, group_mode: GroupMode) -> Self {
        self.group_mode = group_mode;
        self
    }

    pub fn with_trainer(mut self, trainer: TrainerPresence) -> Self {
        self.trainer = trainer;
        self
    }

    pub fn with_place(mut self, place: Place) -> Self {
        self.place = place;
        self
    }

    pub fn with_time_mode(mut self, time_mode: TimeMode) -> Self {
        self.time_mode = time_mode;
        self
    }
}

/// Ordered phase of a module. Its target unit is only used to display the
/// moment total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub title: String,
    pub target: RawDuration,
    pub steps: Vec<Step>,
}

impl Moment {
    pub fn new(title: &str, steps: Vec<Step>) -> Self {
        Self {
            title: title.to_string(),
            target: RawDuration::unset(),
            steps,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub target: RawDuration,
    pub moments: Vec<Moment>,
}

impl Module {
    pub fn new(title: &str, target: RawDuration, moments: Vec<Moment>) -> Self {
        Self {
            title: title.to_string(),
            target,
            moments,
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.moments.iter().flat_map(|m| m.steps.iter())
    }
}

/// Read-only snapshot of the whole plan, as handed over by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    /// Display unit key chosen by the author (`mins`, `hours`, ...).
    pub learning_time_unit: String,
    pub modules: Vec<Module>,
}

impl Course {
    pub fn new(name: &str, modules: Vec<Module>) -> Self {
        Self {
            name: name.to_string(),
            learning_time_unit: String::new(),
            modules,
        }
    }

    pub fn step_count(&self) -> usize {
        self.modules.iter().map(|m| m.steps().count()).sum()
    }
}
