use serde::Serialize;

use crate::plan::model::{GroupMode, PedagogicalType, Place, TimeMode, TrainerPresence};

pub const DEFAULT_TOOL_LABEL: &str = "Général";

/// Workspace tools the editor offers, by key. Other keys show as typed.
pub const KNOWN_TOOLS: [(&str, &str); 12] = [
    ("meet", "Google Meet"),
    ("docs", "Google Docs"),
    ("sheets", "Google Sheets"),
    ("slides", "Google Slides"),
    ("forms", "Google Forms"),
    ("drive", "Google Drive"),
    ("classroom", "Google Classroom"),
    ("chat", "Google Chat"),
    ("gmail", "Gmail"),
    ("calendar", "Google Agenda"),
    ("sites", "Google Sites"),
    ("keep", "Google Keep"),
];

/// Display text for a tool key; blank means the general default.
pub fn tool_label(key: &str) -> &str {
    let key = key.trim();
    if key.is_empty() {
        return DEFAULT_TOOL_LABEL;
    }
    KNOWN_TOOLS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map_or(key, |(_, label)| *label)
}

/// Classification axis a step can be bucketed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Pedagogy,
    Tool,
    Grouping,
    Trainer,
    Place,
    TimeMode,
}

impl Dimension {
    /// The four modality axes drawn as detail tracks, top to bottom.
    pub const DETAIL_TRACKS: [Dimension; 4] = [
        Dimension::Grouping,
        Dimension::Trainer,
        Dimension::Place,
        Dimension::TimeMode,
    ];

    /// Bar charts, in display order.
    pub const BAR_CHARTS: [Dimension; 5] = [
        Dimension::Grouping,
        Dimension::Place,
        Dimension::TimeMode,
        Dimension::Trainer,
        Dimension::Tool,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Dimension::Pedagogy => "Pédagogie",
            Dimension::Tool => "Outils",
            Dimension::Grouping => "Regroupement",
            Dimension::Trainer => "Formateur",
            Dimension::Place => "Lieu",
            Dimension::TimeMode => "Temporalité",
        }
    }
}

/// Stable category of a step along one dimension. Display labels are
/// resolved from it, never the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "dimension", content = "key", rename_all = "snake_case")]
pub enum CategoryKey {
    Pedagogy(PedagogicalType),
    Tool(String),
    Grouping(GroupMode),
    Trainer(TrainerPresence),
    Place(Place),
    TimeMode(TimeMode),
}

impl CategoryKey {
    pub fn dimension(&self) -> Dimension {
        match self {
            CategoryKey::Pedagogy(_) => Dimension::Pedagogy,
            CategoryKey::Tool(_) => Dimension::Tool,
            CategoryKey::Grouping(_) => Dimension::Grouping,
            CategoryKey::Trainer(_) => Dimension::Trainer,
            CategoryKey::Place(_) => Dimension::Place,
            CategoryKey::TimeMode(_) => Dimension::TimeMode,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryKey::Pedagogy(t) => t.label(),
            CategoryKey::Tool(tool) => tool_label(tool),
            CategoryKey::Grouping(g) => g.label(),
            CategoryKey::Trainer(t) => t.label(),
            CategoryKey::Place(p) => p.label(),
            CategoryKey::TimeMode(t) => t.label(),
        }
    }

    /// Solid rendering: whole class, trainer present, on site, synchronous.
    /// Everything else, tools and pedagogy included, is secondary.
    pub fn is_primary(&self) -> bool {
        match self {
            CategoryKey::Grouping(g) => g.is_primary(),
            CategoryKey::Trainer(t) => t.is_primary(),
            CategoryKey::Place(p) => p.is_primary(),
            CategoryKey::TimeMode(t) => t.is_primary(),
            CategoryKey::Pedagogy(_) | CategoryKey::Tool(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tool_gets_default_label() {
        assert_eq!(CategoryKey::Tool(String::new()).label(), DEFAULT_TOOL_LABEL);
        assert_eq!(CategoryKey::Tool("   ".into()).label(), DEFAULT_TOOL_LABEL);
    }

    #[test]
    fn known_tools_show_display_text() {
        assert_eq!(CategoryKey::Tool("meet".into()).label(), "Google Meet");
        assert_eq!(tool_label("Forms"), "Google Forms");
        assert_eq!(tool_label(" docs "), "Google Docs");
        assert_eq!(tool_label("miro"), "miro");
    }

    #[test]
    fn labels_resolve_from_keys() {
        assert_eq!(
            CategoryKey::Grouping(GroupMode::Individual).label(),
            "Individuel"
        );
        assert_eq!(
            CategoryKey::Pedagogy(PedagogicalType::Lab).label(),
            "Labo Pratique"
        );
        assert_eq!(
            CategoryKey::Place(Place::Other("boat".into())).label(),
            "boat"
        );
    }

    #[test]
    fn dimension_of_key() {
        assert_eq!(
            CategoryKey::TimeMode(TimeMode::Async).dimension(),
            Dimension::TimeMode
        );
        assert_eq!(CategoryKey::Tool("x".into()).dimension(), Dimension::Tool);
    }
}
