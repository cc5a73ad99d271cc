//! Line-oriented outline importer.
//!
//! Accepts a markdown-like lesson outline: metadata as `key: value` lines,
//! activities opened by headings containing "Activity", enumerated fields
//! given as either stored codes or display labels. Unrecognized keys are
//! skipped; lines without a key pattern continue the previously active
//! multi-line field.

use thiserror::Error;

use crate::core::lexicon::{
    interaction_from_text, key_app_from_text, strategy_from_text, tech_integration_from_text,
};
use crate::core::store::{Activity, LessonMeta};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("the outline contains no recognizable lesson content")]
    Empty,
}

/// Parse result, ready to replace the store contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedPlan {
    pub meta: LessonMeta,
    pub activities: Vec<Activity>,
}

/// Fields that accept continuation lines.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Continuation {
    MetaStudentProfile,
    MetaLearningOutcomes,
    MetaPrerequisiteKnowledge,
    MetaLearningIssues,
    ActivityDetails,
}

pub fn parse_plan(text: &str) -> Result<ParsedPlan, ImportError> {
    let mut meta = LessonMeta::default();
    let mut activities: Vec<Activity> = Vec::new();
    let mut current: Option<Activity> = None;
    let mut continuation: Option<Continuation> = None;
    let mut matched_anything = false;

    for raw_line in text.lines() {
        let line = strip_markup(raw_line);
        if line.is_empty() {
            continuation = None;
            continue;
        }

        if is_activity_heading(line) {
            if let Some(done) = current.take() {
                activities.push(done);
            }
            let mut fresh = Activity::default();
            fresh.minutes = String::new();
            current = Some(fresh);
            continuation = None;
            matched_anything = true;
            continue;
        }

        if let Some((key, value)) = split_key_value(line) {
            let normalized = normalize_key(key);
            let applied = match current.as_mut() {
                Some(activity) => {
                    apply_activity_key(activity, &normalized, value, &mut continuation)
                }
                None => apply_meta_key(&mut meta, &normalized, value, &mut continuation),
            };
            if applied {
                matched_anything = true;
            } else {
                // Unrecognized key: drop the line, keep any open continuation
                // closed so stray sections don't bleed into earlier fields.
                continuation = None;
            }
            continue;
        }

        if let Some(target) = continuation {
            append_continuation(&mut meta, current.as_mut(), target, line);
        }
    }

    if let Some(done) = current.take() {
        activities.push(done);
    }

    for activity in &mut activities {
        if activity.minutes.trim().is_empty() {
            activity.minutes = crate::core::store::DEFAULT_MINUTES.to_string();
        }
    }

    if !matched_anything {
        return Err(ImportError::Empty);
    }

    Ok(ParsedPlan { meta, activities })
}

/// Strips heading hashes and list bullets so `## Activity 2` and
/// `- Topic: Algebra` both parse.
fn strip_markup(line: &str) -> &str {
    let mut rest = line.trim();
    while let Some(stripped) = rest.strip_prefix('#') {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix("- ").or_else(|| rest.strip_prefix("* ")) {
        rest = stripped.trim_start();
    }
    rest.trim_end()
}

/// A heading line introducing the next activity: "Activity", "Activity 3",
/// "Activity 3: warmup" and so on.
fn is_activity_heading(line: &str) -> bool {
    let lowered = line.to_ascii_lowercase();
    let Some(rest) = lowered.strip_prefix("activity") else {
        return false;
    };
    // Reject field keys like "activity details:"; a heading follows the word
    // with nothing, a number, or a bare delimiter.
    let rest = rest.trim_start();
    rest.is_empty()
        || rest.starts_with(|c: char| c.is_ascii_digit() || c == ':' || c == '.' || c == '-')
}

/// Splits `key: value` where the part before the colon plausibly names a
/// field. Anything longer is treated as prose (a continuation line).
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.len() > 40 {
        return None;
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '(' || c == ')') {
        return None;
    }
    Some((key, value.trim()))
}

/// Case-insensitive, punctuation-insensitive key form: "Student Profile" →
/// "studentprofile".
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn apply_meta_key(
    meta: &mut LessonMeta,
    key: &str,
    value: &str,
    continuation: &mut Option<Continuation>,
) -> bool {
    *continuation = None;
    match key {
        "topic" | "lessontopic" | "title" => meta.topic = value.to_string(),
        "level" | "classlevel" | "yearlevel" => meta.level = value.to_string(),
        "studentprofile" | "profile" => {
            meta.student_profile = value.to_string();
            *continuation = Some(Continuation::MetaStudentProfile);
        }
        "duration" | "plannedduration" | "durationmins" | "durationminutes" => {
            meta.duration = numeric_prefix(value)
        }
        "learningoutcomes" | "outcomes" => {
            meta.learning_outcomes = value.to_string();
            *continuation = Some(Continuation::MetaLearningOutcomes);
        }
        "prerequisiteknowledge" | "prerequisites" => {
            meta.prerequisite_knowledge = value.to_string();
            *continuation = Some(Continuation::MetaPrerequisiteKnowledge);
        }
        "learningissues" | "issues" | "learningissuetobeaddressed" => {
            meta.learning_issues = value.to_string();
            *continuation = Some(Continuation::MetaLearningIssues);
        }
        "techintegration" | "technologyintegration" | "leveloftechnologyintegration" => {
            meta.tech_integration = tech_integration_from_text(value).unwrap_or_default()
        }
        _ => return false,
    }
    true
}

fn apply_activity_key(
    activity: &mut Activity,
    key: &str,
    value: &str,
    continuation: &mut Option<Continuation>,
) -> bool {
    *continuation = None;
    match key {
        "interaction" | "interactiontype" => {
            activity.interaction = interaction_from_text(value);
        }
        "strategy" | "process" | "activelearningprocess" | "alp" => {
            activity.strategy = strategy_from_text(value);
        }
        "keyapplication" | "keyapplicationoftechnology" | "keyapp" => {
            activity.key_app = key_app_from_text(value);
        }
        "time" | "timemins" | "minutes" | "duration" => {
            activity.minutes = numeric_prefix(value);
        }
        "details" | "activitydetails" | "description" => {
            activity.details = value.to_string();
            *continuation = Some(Continuation::ActivityDetails);
        }
        "tool" | "techtool" | "tech" => activity.tool = value.to_string(),
        _ => return false,
    }
    true
}

fn append_continuation(
    meta: &mut LessonMeta,
    activity: Option<&mut Activity>,
    target: Continuation,
    line: &str,
) {
    let slot = match target {
        Continuation::MetaStudentProfile => &mut meta.student_profile,
        Continuation::MetaLearningOutcomes => &mut meta.learning_outcomes,
        Continuation::MetaPrerequisiteKnowledge => &mut meta.prerequisite_knowledge,
        Continuation::MetaLearningIssues => &mut meta.learning_issues,
        Continuation::ActivityDetails => match activity {
            Some(activity) => &mut activity.details,
            None => return,
        },
    };
    if !slot.is_empty() {
        slot.push(' ');
    }
    slot.push_str(line);
}

/// Leading numeric run of a value like "30 mins"; empty when there is none.
fn numeric_prefix(value: &str) -> String {
    value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::{Interaction, KeyApplication, Strategy, TechIntegration};

    const OUTLINE: &str = "\
Topic: Photosynthesis
LEVEL: Secondary 2
Duration: 60 mins
Student Profile: Mixed readiness,
mostly visual learners
Learning Outcomes: Explain light-dependent reactions
Technology Integration: Amplification

## Activity 1
Interaction Type: Class (Teacher - Student)
Active Learning Process: activate
Time: 10 mins
Details: Retrieval quiz on last week's
energy transfer diagrams
Tech Tool: Kahoot

## Activity 2
Interaction: group
Process: Promote thinking and discussion
Key Application: Facilitate Learning Together
Time: 25
Details: Jigsaw groups annotate leaf diagrams
";

    #[test]
    fn outline_parses_meta_and_activities() {
        let plan = parse_plan(OUTLINE).unwrap();
        assert_eq!(plan.meta.topic, "Photosynthesis");
        assert_eq!(plan.meta.level, "Secondary 2");
        assert_eq!(plan.meta.duration, "60");
        assert_eq!(plan.meta.tech_integration, TechIntegration::Amplification);
        assert_eq!(plan.activities.len(), 2);

        let first = &plan.activities[0];
        assert_eq!(first.interaction, Some(Interaction::Class));
        assert_eq!(first.strategy, Some(Strategy::Activate));
        assert_eq!(first.minutes, "10");
        assert_eq!(first.tool, "Kahoot");

        let second = &plan.activities[1];
        assert_eq!(second.interaction, Some(Interaction::Group));
        assert_eq!(second.strategy, Some(Strategy::Promote));
        assert_eq!(
            second.key_app,
            Some(KeyApplication::FacilitateLearningTogether)
        );
    }

    #[test]
    fn continuation_lines_extend_the_active_field() {
        let plan = parse_plan(OUTLINE).unwrap();
        assert_eq!(
            plan.meta.student_profile,
            "Mixed readiness, mostly visual learners"
        );
        assert_eq!(
            plan.activities[0].details,
            "Retrieval quiz on last week's energy transfer diagrams"
        );
    }

    #[test]
    fn unknown_keys_are_ignored_and_break_continuations() {
        let plan = parse_plan(
            "Topic: Algebra\nLearning Outcomes: Solve for x\nMood: optimistic\nleftover prose line",
        )
        .unwrap();
        assert_eq!(plan.meta.topic, "Algebra");
        // "Mood" is skipped and also closes the outcomes continuation, so the
        // trailing prose is dropped instead of gluing onto outcomes.
        assert_eq!(plan.meta.learning_outcomes, "Solve for x");
    }

    #[test]
    fn unmapped_enum_values_resolve_to_unset() {
        let plan = parse_plan(
            "Activity 1\nInteraction: interpretive dance\nStrategy: osmosis\nDetails: d",
        )
        .unwrap();
        assert_eq!(plan.activities[0].interaction, None);
        assert_eq!(plan.activities[0].strategy, None);
    }

    #[test]
    fn missing_time_defaults_like_a_fresh_activity() {
        let plan = parse_plan("Activity 1\nDetails: quick poll").unwrap();
        assert_eq!(plan.activities[0].minutes, "5");
    }

    #[test]
    fn activity_details_key_is_not_a_heading() {
        let plan = parse_plan("Activity 1\nActivity Details: annotate the map").unwrap();
        assert_eq!(plan.activities.len(), 1);
        assert_eq!(plan.activities[0].details, "annotate the map");
    }

    #[test]
    fn titled_headings_still_open_activities() {
        let plan = parse_plan(
            "Activity 1: warmup\nDetails: a\n\nActivity 2: group work\nDetails: b",
        )
        .unwrap();
        assert_eq!(plan.activities.len(), 2);
        assert_eq!(plan.activities[1].details, "b");
    }

    #[test]
    fn empty_outline_is_an_error() {
        assert!(parse_plan("").is_err());
        assert!(parse_plan("just some prose\nwith no keys at all").is_err());
    }
}
