//! Snapshot round-trip and wire-format compatibility.
//!
//! The persisted snapshot is the only durable state, so its JSON shape is a
//! contract: saving then loading must reproduce the planner field for field,
//! and snapshots written by earlier versions of the tool (camelCase meta
//! keys, `alp`/`keyApp`/`time`/`tech` activity keys, empty strings for unset
//! enumerations) must keep loading unchanged.

use ui::core::lexicon::{Interaction, KeyApplication, Strategy, TechIntegration};
use ui::core::store::{ActivityField, PlannerState};

fn sample_state() -> PlannerState {
    let mut state = PlannerState::default();
    state.meta.topic = "Photosynthesis".into();
    state.meta.level = "Secondary 2".into();
    state.meta.student_profile = "Mixed readiness".into();
    state.meta.duration = "60".into();
    state.meta.learning_outcomes = "Explain light-dependent reactions".into();
    state.meta.prerequisite_knowledge = "Cell structure".into();
    state.meta.learning_issues = "Confuses energy and matter".into();
    state.meta.tech_integration = TechIntegration::Amplification;

    let id = state.add();
    state.update(id, ActivityField::Interaction, "class");
    state.update(id, ActivityField::Strategy, "activate");
    state.update(id, ActivityField::KeyApp, "support-assessment");
    state.update(id, ActivityField::Minutes, "10");
    state.update(id, ActivityField::Details, "Retrieval quiz");
    state.update(id, ActivityField::Tool, "Kahoot");

    // A second, still-incomplete activity must survive the round trip too.
    state.add();
    state
}

#[test]
fn snapshot_round_trips_field_for_field() {
    let state = sample_state();
    let json = serde_json::to_string(&state).unwrap();
    let restored: PlannerState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn snapshot_uses_the_stable_wire_keys() {
    let state = sample_state();
    let value = serde_json::to_value(&state).unwrap();

    let meta = &value["meta"];
    for key in [
        "topic",
        "level",
        "studentProfile",
        "duration",
        "learningOutcomes",
        "prerequisiteKnowledge",
        "learningIssues",
        "techIntegration",
    ] {
        assert!(meta.get(key).is_some(), "meta is missing wire key {key}");
    }
    assert_eq!(meta["techIntegration"], "amplification");

    let first = &value["activities"][0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["interaction"], "class");
    assert_eq!(first["alp"], "activate");
    assert_eq!(first["keyApp"], "support-assessment");
    assert_eq!(first["time"], "10");
    assert_eq!(first["tech"], "Kahoot");

    // Unset enumerations serialize as empty strings, not nulls.
    let second = &value["activities"][1];
    assert_eq!(second["interaction"], "");
    assert_eq!(second["alp"], "");
    assert_eq!(second["keyApp"], "");
}

#[test]
fn legacy_snapshot_json_loads_unchanged() {
    let legacy = r#"{
        "meta": {
            "topic": "Forces",
            "level": "P5",
            "studentProfile": "",
            "duration": "45",
            "learningOutcomes": "Identify balanced forces",
            "prerequisiteKnowledge": "",
            "learningIssues": "",
            "techIntegration": "optional"
        },
        "activities": [
            {
                "id": 1,
                "interaction": "group",
                "alp": "promote",
                "keyApp": "facilitate-learning-together",
                "time": "20",
                "details": "Station rotation",
                "tech": "Padlet"
            },
            {
                "id": 2,
                "interaction": "",
                "alp": "",
                "keyApp": "",
                "time": "5",
                "details": "",
                "tech": ""
            }
        ]
    }"#;

    let state: PlannerState = serde_json::from_str(legacy).unwrap();
    assert_eq!(state.meta.topic, "Forces");
    assert_eq!(state.meta.tech_integration, TechIntegration::Optional);
    assert_eq!(state.activities.len(), 2);

    let first = &state.activities[0];
    assert_eq!(first.interaction, Some(Interaction::Group));
    assert_eq!(first.strategy, Some(Strategy::Promote));
    assert_eq!(
        first.key_app,
        Some(KeyApplication::FacilitateLearningTogether)
    );
    assert_eq!(first.minutes, "20");
    assert_eq!(first.tool, "Padlet");

    let second = &state.activities[1];
    assert!(second.interaction.is_none());
    assert!(!second.is_complete());
    assert_eq!(state.incomplete_ids(), vec![2]);
}

#[test]
fn unknown_codes_in_a_snapshot_degrade_to_unset() {
    let odd = r#"{
        "meta": { "techIntegration": "holograms" },
        "activities": [
            { "id": 1, "interaction": "plenary", "alp": "activate", "time": "5", "details": "d", "tech": "" }
        ]
    }"#;
    let state: PlannerState = serde_json::from_str(odd).unwrap();
    assert_eq!(state.meta.tech_integration, TechIntegration::Optional);
    assert!(state.activities[0].interaction.is_none());
    assert_eq!(state.activities[0].strategy, Some(Strategy::Activate));
}

#[test]
fn imported_outline_survives_a_save_load_cycle() {
    let outline = "Topic: Waves\nDuration: 50\n\nActivity 1\nInteraction: individual\nProcess: Monitor and Provide Feedback\nTime: 15\nDetails: Simulation worksheet\n";
    let plan = ui::import::parse_plan(outline).unwrap();

    let mut state = PlannerState::default();
    state.replace_with(plan.meta, plan.activities);

    let json = serde_json::to_string(&state).unwrap();
    let restored: PlannerState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.activities[0].id, 1);
    assert_eq!(restored.activities[0].interaction, Some(Interaction::Individual));
    assert_eq!(restored.total_minutes(), 15);
}
