//! The activity store: the single source of truth for everything the planner
//! edits. Views project this state; nothing is ever read back out of the DOM.
//!
//! Identity rules: activity ids are dense and 1-based in display order.
//! Every structural mutation (add, insert, delete, import, clear) finishes
//! with a renumbering pass, so `id == position + 1` holds whenever a handler
//! returns.

use serde::{Deserialize, Serialize};

use super::lexicon::{self, Coded, Interaction, KeyApplication, Strategy, TechIntegration};

/// Soft character limit for the details field (cosmetic counter, non-blocking).
pub const DETAILS_LIMIT: usize = 115;
/// Soft character limit for the tool field.
pub const TOOL_LIMIT: usize = 25;
/// Default planned time for a freshly added activity, in minutes.
pub const DEFAULT_MINUTES: &str = "5";

/// One planned learning activity.
///
/// `minutes` is stored as entered (text) and normalized on read; the wire
/// names (`alp`, `keyApp`, `time`, `tech`) match the persisted snapshot
/// format so existing snapshots load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    #[serde(default, with = "lexicon::opt_code")]
    pub interaction: Option<Interaction>,
    #[serde(default, rename = "alp", with = "lexicon::opt_code")]
    pub strategy: Option<Strategy>,
    #[serde(default, rename = "keyApp", with = "lexicon::opt_code")]
    pub key_app: Option<KeyApplication>,
    #[serde(default = "default_minutes", rename = "time")]
    pub minutes: String,
    #[serde(default)]
    pub details: String,
    #[serde(default, rename = "tech")]
    pub tool: String,
}

fn default_minutes() -> String {
    DEFAULT_MINUTES.to_string()
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            id: 0,
            interaction: None,
            strategy: None,
            key_app: None,
            minutes: default_minutes(),
            details: String::new(),
            tool: String::new(),
        }
    }
}

impl Activity {
    /// Complete activities are the only ones that reach the map, charts and
    /// exports. Interaction, strategy and details are the compulsory fields.
    pub fn is_complete(&self) -> bool {
        self.interaction.is_some() && self.strategy.is_some() && !self.details.trim().is_empty()
    }

    /// Planned minutes, parsed from the stored text and clamped to ≥ 0.
    /// Unparseable input counts as zero.
    pub fn planned_minutes(&self) -> u32 {
        self.minutes
            .trim()
            .parse::<i64>()
            .map(|v| v.max(0) as u32)
            .unwrap_or(0)
    }
}

/// Editable field addresses for [`PlannerState::update`]. Form handlers and
/// the inline map editor both funnel edits through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Interaction,
    Strategy,
    KeyApp,
    Minutes,
    Details,
    Tool,
}

/// Lesson-level metadata, a single record beside the activity list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonMeta {
    pub topic: String,
    pub level: String,
    pub student_profile: String,
    pub duration: String,
    pub learning_outcomes: String,
    pub prerequisite_knowledge: String,
    pub learning_issues: String,
    pub tech_integration: TechIntegration,
}

impl LessonMeta {
    /// Planned lesson duration in minutes, if the field holds a valid
    /// non-negative number.
    pub fn planned_minutes(&self) -> Option<u32> {
        self.duration
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= 0)
            .map(|v| v as u32)
    }

    pub fn display_topic(&self) -> &str {
        let trimmed = self.topic.trim();
        if trimmed.is_empty() {
            "Lesson Design Map"
        } else {
            trimmed
        }
    }
}

/// The whole editable state; serializes directly as the persisted snapshot
/// `{ "meta": {...}, "activities": [...] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerState {
    #[serde(default)]
    pub meta: LessonMeta,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl PlannerState {
    /// Fresh state as seeded on first launch: empty metadata, one blank
    /// activity ready for editing.
    pub fn seeded() -> Self {
        let mut state = Self::default();
        state.add();
        state
    }

    /// Appends a default-valued activity and returns its id.
    pub fn add(&mut self) -> u32 {
        self.add_from(Activity::default())
    }

    /// Appends an activity carrying the provided field values (snapshot
    /// restore and import go through here). The caller's id is ignored; the
    /// store assigns the next sequential one.
    pub fn add_from(&mut self, mut activity: Activity) -> u32 {
        let id = self.activities.len() as u32 + 1;
        activity.id = id;
        self.activities.push(activity);
        id
    }

    /// Inserts a blank activity immediately after `id`, renumbers, and
    /// returns the new activity's id. No-op returning `None` when `id` is
    /// not present.
    pub fn insert_after(&mut self, id: u32) -> Option<u32> {
        let index = self.activities.iter().position(|a| a.id == id)?;
        self.activities.insert(index + 1, Activity::default());
        self.renumber();
        Some(index as u32 + 2)
    }

    /// Mutates one field of one activity. Unknown ids are a silent no-op
    /// (`false`). Negative minute entries are clamped to zero before being
    /// stored; enumerated fields accept codes, with anything unknown
    /// resolving to unset.
    pub fn update(&mut self, id: u32, field: ActivityField, value: &str) -> bool {
        let Some(activity) = self.activities.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        match field {
            ActivityField::Interaction => activity.interaction = Interaction::from_code(value),
            ActivityField::Strategy => activity.strategy = Strategy::from_code(value),
            ActivityField::KeyApp => activity.key_app = KeyApplication::from_code(value),
            ActivityField::Minutes => {
                if value.trim().parse::<i64>().map(|v| v < 0).unwrap_or(false) {
                    activity.minutes = "0".to_string();
                } else {
                    activity.minutes = value.to_string();
                }
            }
            ActivityField::Details => activity.details = value.to_string(),
            ActivityField::Tool => activity.tool = value.to_string(),
        }
        true
    }

    /// Removes one activity and renumbers the rest.
    pub fn delete(&mut self, id: u32) {
        self.activities.retain(|a| a.id != id);
        self.renumber();
    }

    /// Wipes everything back to the first-launch state.
    pub fn clear(&mut self) {
        self.meta = LessonMeta::default();
        self.activities.clear();
        self.add();
    }

    /// Reassigns ids 1..N in display order, carrying field data forward.
    pub fn renumber(&mut self) {
        for (index, activity) in self.activities.iter_mut().enumerate() {
            activity.id = index as u32 + 1;
        }
    }

    /// Replaces the whole state (outline import), renumbering the incoming
    /// activities.
    pub fn replace_with(&mut self, meta: LessonMeta, activities: Vec<Activity>) {
        self.meta = meta;
        self.activities = activities;
        self.renumber();
        if self.activities.is_empty() {
            self.add();
        }
    }

    pub fn list(&self) -> &[Activity] {
        &self.activities
    }

    /// Complete activities in id order; the renderer's input.
    pub fn complete_activities(&self) -> Vec<Activity> {
        let mut complete: Vec<Activity> = self
            .activities
            .iter()
            .filter(|a| a.is_complete())
            .cloned()
            .collect();
        complete.sort_by_key(|a| a.id);
        complete
    }

    /// Ids of activities still missing a compulsory field. These stay in the
    /// store; they are only excluded from rendering and export.
    pub fn incomplete_ids(&self) -> Vec<u32> {
        self.activities
            .iter()
            .filter(|a| !a.is_complete())
            .map(|a| a.id)
            .collect()
    }

    /// Sum of planned minutes across complete activities.
    pub fn total_minutes(&self) -> u32 {
        self.activities
            .iter()
            .filter(|a| a.is_complete())
            .map(Activity::planned_minutes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(state: &mut PlannerState, id: u32) {
        state.update(id, ActivityField::Interaction, "class");
        state.update(id, ActivityField::Strategy, "activate");
        state.update(id, ActivityField::Details, "Think-pair-share warmup");
    }

    fn assert_dense_ids(state: &PlannerState) {
        let ids: Vec<u32> = state.list().iter().map(|a| a.id).collect();
        let expected: Vec<u32> = (1..=state.list().len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn seeded_state_has_one_blank_activity() {
        let state = PlannerState::seeded();
        assert_eq!(state.list().len(), 1);
        assert_eq!(state.list()[0].id, 1);
        assert_eq!(state.list()[0].minutes, "5");
        assert!(!state.list()[0].is_complete());
    }

    #[test]
    fn ids_stay_dense_across_add_and_delete_sequences() {
        let mut state = PlannerState::default();
        for _ in 0..5 {
            state.add();
            assert_dense_ids(&state);
        }
        state.delete(2);
        assert_dense_ids(&state);
        assert_eq!(state.list().len(), 4);
        state.delete(1);
        state.delete(3);
        assert_dense_ids(&state);
        state.add();
        assert_dense_ids(&state);
        assert_eq!(state.list().len(), 3);
    }

    #[test]
    fn renumber_carries_field_values_forward() {
        let mut state = PlannerState::default();
        state.add();
        state.add();
        state.add();
        state.update(3, ActivityField::Details, "Exit ticket");
        state.update(3, ActivityField::Minutes, "12");
        state.delete(1);
        let survivor = &state.list()[1];
        assert_eq!(survivor.id, 2);
        assert_eq!(survivor.details, "Exit ticket");
        assert_eq!(survivor.minutes, "12");
    }

    #[test]
    fn insert_after_lands_between_and_renumbers() {
        let mut state = PlannerState::default();
        state.add();
        state.add();
        state.update(1, ActivityField::Details, "first");
        state.update(2, ActivityField::Details, "second");
        let new_id = state.insert_after(1);
        assert_eq!(new_id, Some(2));
        assert_dense_ids(&state);
        assert_eq!(state.list()[0].details, "first");
        assert_eq!(state.list()[1].details, "");
        assert_eq!(state.list()[2].details, "second");
        assert_eq!(state.insert_after(99), None);
    }

    #[test]
    fn negative_minutes_clamp_to_zero() {
        let mut state = PlannerState::default();
        state.add();
        state.update(1, ActivityField::Minutes, "-3");
        assert_eq!(state.list()[0].minutes, "0");
        state.update(1, ActivityField::Minutes, "15");
        assert_eq!(state.list()[0].minutes, "15");
        // Non-numeric text is stored as-is and aggregates as zero.
        state.update(1, ActivityField::Minutes, "a while");
        assert_eq!(state.list()[0].planned_minutes(), 0);
    }

    #[test]
    fn update_on_unknown_id_is_a_silent_noop() {
        let mut state = PlannerState::default();
        state.add();
        let before = state.clone();
        assert!(!state.update(7, ActivityField::Details, "ghost"));
        assert_eq!(state, before);
    }

    #[test]
    fn completeness_requires_all_three_compulsory_fields() {
        let mut state = PlannerState::default();
        state.add();
        assert_eq!(state.incomplete_ids(), vec![1]);
        state.update(1, ActivityField::Interaction, "group");
        state.update(1, ActivityField::Strategy, "promote");
        assert_eq!(state.incomplete_ids(), vec![1]);
        state.update(1, ActivityField::Details, "Jigsaw reading");
        assert!(state.incomplete_ids().is_empty());
        assert_eq!(state.complete_activities().len(), 1);
    }

    #[test]
    fn unknown_enum_codes_resolve_to_unset() {
        let mut state = PlannerState::default();
        state.add();
        state.update(1, ActivityField::Interaction, "class");
        state.update(1, ActivityField::Interaction, "not-a-row");
        assert_eq!(state.list()[0].interaction, None);
    }

    #[test]
    fn clear_reseeds_a_single_blank_activity() {
        let mut state = PlannerState::seeded();
        state.meta.topic = "Fractions".into();
        complete(&mut state, 1);
        state.add();
        state.clear();
        assert_eq!(state.meta, LessonMeta::default());
        assert_eq!(state.list().len(), 1);
        assert!(!state.list()[0].is_complete());
    }

    #[test]
    fn total_minutes_counts_only_complete_activities() {
        let mut state = PlannerState::default();
        state.add();
        state.add();
        complete(&mut state, 1);
        state.update(1, ActivityField::Minutes, "20");
        state.update(2, ActivityField::Minutes, "45");
        assert_eq!(state.total_minutes(), 20);
    }
}
