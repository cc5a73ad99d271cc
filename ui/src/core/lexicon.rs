//! Fixed vocabularies used throughout the planner.
//!
//! Every enumeration here is addressable two ways: by its stored code
//! (`"class"`) and by its display label (`"Class (Teacher - Student)"`).
//! The lookup tables are built once and queried in both directions, so
//! snapshot loading, form selects, and the outline importer all normalize
//! through the same path.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Common surface for the planner's coded vocabularies.
pub trait Coded: Sized + Copy + 'static {
    /// All variants in declared (display) order.
    fn all() -> &'static [Self];

    /// The stable code stored in snapshots.
    fn code(self) -> &'static str;

    /// The human-readable label shown in selects and on the map.
    fn label(self) -> &'static str;

    fn from_code(raw: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.code() == raw)
    }

    /// Accepts either the code or the label, case-insensitively.
    fn from_text(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|v| v.code() == needle || v.label().to_ascii_lowercase() == needle)
    }
}

/// Social configuration of an activity. Declared order is the row order of
/// the design map, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    Community,
    Class,
    Group,
    Individual,
}

impl Interaction {
    pub const ALL: [Interaction; 4] = [
        Interaction::Community,
        Interaction::Class,
        Interaction::Group,
        Interaction::Individual,
    ];

    /// Row index on the design map.
    pub fn row(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    /// Short name without the social-plane gloss.
    pub fn short_label(self) -> &'static str {
        match self {
            Interaction::Community => "Community",
            Interaction::Class => "Class",
            Interaction::Group => "Group",
            Interaction::Individual => "Individual",
        }
    }

    /// The parenthesised gloss, used on the row labels.
    pub fn gloss(self) -> &'static str {
        match self {
            Interaction::Community => "(Student - Community)",
            Interaction::Class => "(Teacher - Student)",
            Interaction::Group => "(Student - Student)",
            Interaction::Individual => "(Student - Content)",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Interaction::Community => "#9ca3af",
            Interaction::Class => "#cfe8fb",
            Interaction::Group => "#ffe39a",
            Interaction::Individual => "#bfbfbf",
        }
    }
}

impl Coded for Interaction {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            Interaction::Community => "community",
            Interaction::Class => "class",
            Interaction::Group => "group",
            Interaction::Individual => "individual",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Interaction::Community => "Community (Student - Community)",
            Interaction::Class => "Class (Teacher - Student)",
            Interaction::Group => "Group (Student - Student)",
            Interaction::Individual => "Individual (Student - Content)",
        }
    }
}

/// Active learning process an activity instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Activate,
    Promote,
    Facilitate,
    Monitor,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Activate,
        Strategy::Promote,
        Strategy::Facilitate,
        Strategy::Monitor,
    ];

    pub fn color(self) -> &'static str {
        match self {
            Strategy::Activate => "#6aced8",
            Strategy::Promote => "#cc6bff",
            Strategy::Facilitate => "#ffc000",
            Strategy::Monitor => "#f6bbbf",
        }
    }
}

impl Coded for Strategy {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            Strategy::Activate => "activate",
            Strategy::Promote => "promote",
            Strategy::Facilitate => "facilitate",
            Strategy::Monitor => "monitor",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Strategy::Activate => "Activate Learning",
            Strategy::Promote => "Promote thinking and discussion",
            Strategy::Facilitate => "Facilitate Demonstration of Learning",
            Strategy::Monitor => "Monitor and Provide Feedback",
        }
    }
}

/// Technology-integration purpose tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyApplication {
    SupportAssessment,
    FosterConceptual,
    ProvideDifferentiation,
    FacilitateLearningTogether,
    DevelopMetacognition,
    EnablePersonalisation,
    EmbedScaffolding,
    IncreaseMotivation,
}

impl KeyApplication {
    pub const ALL: [KeyApplication; 8] = [
        KeyApplication::SupportAssessment,
        KeyApplication::FosterConceptual,
        KeyApplication::ProvideDifferentiation,
        KeyApplication::FacilitateLearningTogether,
        KeyApplication::DevelopMetacognition,
        KeyApplication::EnablePersonalisation,
        KeyApplication::EmbedScaffolding,
        KeyApplication::IncreaseMotivation,
    ];

    pub fn color(self) -> &'static str {
        match self {
            KeyApplication::SupportAssessment => "#7dd3fc",
            KeyApplication::FosterConceptual => "#a78bfa",
            KeyApplication::ProvideDifferentiation => "#34d399",
            KeyApplication::FacilitateLearningTogether => "#fbbf24",
            KeyApplication::DevelopMetacognition => "#fb7185",
            KeyApplication::EnablePersonalisation => "#38bdf8",
            KeyApplication::EmbedScaffolding => "#f472b6",
            KeyApplication::IncreaseMotivation => "#f97316",
        }
    }
}

impl Coded for KeyApplication {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            KeyApplication::SupportAssessment => "support-assessment",
            KeyApplication::FosterConceptual => "foster-conceptual",
            KeyApplication::ProvideDifferentiation => "provide-differentiation",
            KeyApplication::FacilitateLearningTogether => "facilitate-learning-together",
            KeyApplication::DevelopMetacognition => "develop-metacognition",
            KeyApplication::EnablePersonalisation => "enable-personalisation",
            KeyApplication::EmbedScaffolding => "embed-scaffolding",
            KeyApplication::IncreaseMotivation => "increase-motivation",
        }
    }

    fn label(self) -> &'static str {
        match self {
            KeyApplication::SupportAssessment => "Support Assessment for Learning",
            KeyApplication::FosterConceptual => "Foster Conceptual Change",
            KeyApplication::ProvideDifferentiation => "Provide Differentiation",
            KeyApplication::FacilitateLearningTogether => "Facilitate Learning Together",
            KeyApplication::DevelopMetacognition => "Develop Metacognition",
            KeyApplication::EnablePersonalisation => "Enable Personalisation",
            KeyApplication::EmbedScaffolding => "Embed Scaffolding",
            KeyApplication::IncreaseMotivation => "Increase Motivation",
        }
    }
}

/// Level of technology integration for the whole lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TechIntegration {
    #[default]
    Optional,
    Replacement,
    Amplification,
    Transformation,
}

impl TechIntegration {
    pub const ALL: [TechIntegration; 4] = [
        TechIntegration::Optional,
        TechIntegration::Replacement,
        TechIntegration::Amplification,
        TechIntegration::Transformation,
    ];
}

impl Coded for TechIntegration {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> &'static str {
        match self {
            TechIntegration::Optional => "optional",
            TechIntegration::Replacement => "replacement",
            TechIntegration::Amplification => "amplification",
            TechIntegration::Transformation => "transformation",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TechIntegration::Optional => "Optional",
            TechIntegration::Replacement => "Replacement",
            TechIntegration::Amplification => "Amplification",
            TechIntegration::Transformation => "Transformation",
        }
    }
}

impl Serialize for TechIntegration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TechIntegration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Unknown values fall back to the default rather than failing the load.
        Ok(TechIntegration::from_code(&raw).unwrap_or_default())
    }
}

/// Serde adapter for optional coded fields stored as plain strings, where the
/// empty string means unset and unknown codes degrade to unset.
pub mod opt_code {
    use super::Coded;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Coded,
        S: Serializer,
    {
        serializer.serialize_str(value.map(Coded::code).unwrap_or(""))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Coded,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(T::from_code(&raw))
    }
}

type TextTable<T> = Lazy<HashMap<String, T>>;

// Case-folded code+label tables, built once and queried in both directions
// by the importer and the snapshot loader.
static INTERACTION_TEXT: TextTable<Interaction> = Lazy::new(text_table::<Interaction>);
static STRATEGY_TEXT: TextTable<Strategy> = Lazy::new(text_table::<Strategy>);
static KEY_APP_TEXT: TextTable<KeyApplication> = Lazy::new(text_table::<KeyApplication>);
static TECH_TEXT: TextTable<TechIntegration> = Lazy::new(text_table::<TechIntegration>);

fn text_table<T: Coded>() -> HashMap<String, T> {
    let mut table = HashMap::new();
    for variant in T::all().iter().copied() {
        table.insert(variant.code().to_ascii_lowercase(), variant);
        table.insert(variant.label().to_ascii_lowercase(), variant);
    }
    table
}

fn lookup<T: Coded>(table: &HashMap<String, T>, raw: &str) -> Option<T> {
    let needle = raw.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    table.get(&needle).copied()
}

pub fn interaction_from_text(raw: &str) -> Option<Interaction> {
    lookup(&INTERACTION_TEXT, raw)
}

pub fn strategy_from_text(raw: &str) -> Option<Strategy> {
    lookup(&STRATEGY_TEXT, raw)
}

pub fn key_app_from_text(raw: &str) -> Option<KeyApplication> {
    lookup(&KEY_APP_TEXT, raw)
}

pub fn tech_integration_from_text(raw: &str) -> Option<TechIntegration> {
    lookup(&TECH_TEXT, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_variant() {
        for v in Interaction::ALL {
            assert_eq!(Interaction::from_code(v.code()), Some(v));
        }
        for v in Strategy::ALL {
            assert_eq!(Strategy::from_code(v.code()), Some(v));
        }
        for v in KeyApplication::ALL {
            assert_eq!(KeyApplication::from_code(v.code()), Some(v));
        }
        for v in TechIntegration::ALL {
            assert_eq!(TechIntegration::from_code(v.code()), Some(v));
        }
    }

    #[test]
    fn text_lookup_accepts_code_or_label() {
        assert_eq!(interaction_from_text("class"), Some(Interaction::Class));
        assert_eq!(
            interaction_from_text("Class (Teacher - Student)"),
            Some(Interaction::Class)
        );
        assert_eq!(
            strategy_from_text("ACTIVATE LEARNING"),
            Some(Strategy::Activate)
        );
        assert_eq!(
            key_app_from_text("embed-scaffolding"),
            Some(KeyApplication::EmbedScaffolding)
        );
        assert_eq!(
            tech_integration_from_text("Amplification"),
            Some(TechIntegration::Amplification)
        );
    }

    #[test]
    fn unknown_text_resolves_to_unset() {
        assert_eq!(interaction_from_text("plenary"), None);
        assert_eq!(strategy_from_text(""), None);
        assert_eq!(key_app_from_text("   "), None);
    }

    #[test]
    fn row_order_matches_declared_order() {
        assert_eq!(Interaction::Community.row(), 0);
        assert_eq!(Interaction::Class.row(), 1);
        assert_eq!(Interaction::Group.row(), 2);
        assert_eq!(Interaction::Individual.row(), 3);
    }
}
