//! Plain-text lesson prompt for use outside the tool, plus clipboard
//! delivery.

use crate::core::lexicon::Coded;
use crate::core::store::{Activity, LessonMeta};

/// Builds the copyable lesson summary. Incomplete activities are excluded,
/// matching the map and the charts.
pub fn build_prompt(meta: &LessonMeta, complete: &[Activity]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Lesson: {}\n", meta.display_topic()));
    if !meta.level.trim().is_empty() {
        out.push_str(&format!("Level: {}\n", meta.level.trim()));
    }
    if !meta.duration.trim().is_empty() {
        out.push_str(&format!("Planned duration: {} minutes\n", meta.duration.trim()));
    }
    if !meta.student_profile.trim().is_empty() {
        out.push_str(&format!("Student profile: {}\n", meta.student_profile.trim()));
    }
    if !meta.learning_outcomes.trim().is_empty() {
        out.push_str(&format!("Learning outcomes: {}\n", meta.learning_outcomes.trim()));
    }
    if !meta.prerequisite_knowledge.trim().is_empty() {
        out.push_str(&format!(
            "Prerequisite knowledge: {}\n",
            meta.prerequisite_knowledge.trim()
        ));
    }
    if !meta.learning_issues.trim().is_empty() {
        out.push_str(&format!("Learning issues: {}\n", meta.learning_issues.trim()));
    }
    out.push_str(&format!(
        "Technology integration: {}\n",
        meta.tech_integration.label()
    ));

    out.push_str("\nActivity sequence:\n");
    let total: u32 = complete.iter().map(Activity::planned_minutes).sum();
    for activity in complete {
        let interaction = activity
            .interaction
            .map(Coded::label)
            .unwrap_or("Unspecified");
        let strategy = activity.strategy.map(Coded::label).unwrap_or("Unspecified");
        out.push_str(&format!(
            "{}. [{} | {}] ({} min) {}",
            activity.id,
            interaction,
            strategy,
            activity.planned_minutes(),
            activity.details.trim(),
        ));
        if let Some(key_app) = activity.key_app {
            out.push_str(&format!(" | Key application: {}", key_app.label()));
        }
        if !activity.tool.trim().is_empty() {
            out.push_str(&format!(" | Tool: {}", activity.tool.trim()));
        }
        out.push('\n');
    }
    out.push_str(&format!("Total activity time: {total} minutes\n"));
    out.push_str(
        "\nReview this lesson design. Comment on the pacing, the balance of social \
         interaction, the spread of active learning processes, and whether the \
         technology choices serve the stated outcomes.\n",
    );
    out
}

/// Copies text to the system clipboard.
pub async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        if !document.exec_command("copy").unwrap_or(false) {
            textarea.remove();
            return Err("Clipboard copy blocked".into());
        }
        textarea.remove();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{ActivityField, PlannerState};

    #[test]
    fn prompt_lists_metadata_and_sequence() {
        let mut state = PlannerState::default();
        state.meta.topic = "Fractions".into();
        state.meta.duration = "60".into();
        state.meta.learning_outcomes = "Compare unit fractions".into();
        let id = state.add();
        state.update(id, ActivityField::Interaction, "class");
        state.update(id, ActivityField::Strategy, "activate");
        state.update(id, ActivityField::Minutes, "10");
        state.update(id, ActivityField::Details, "Number talk");
        state.update(id, ActivityField::Tool, "Mini whiteboards");

        let prompt = build_prompt(&state.meta, &state.complete_activities());
        assert!(prompt.starts_with("Lesson: Fractions\n"));
        assert!(prompt.contains("Planned duration: 60 minutes"));
        assert!(prompt.contains("Learning outcomes: Compare unit fractions"));
        assert!(prompt
            .contains("1. [Class (Teacher - Student) | Activate Learning] (10 min) Number talk"));
        assert!(prompt.contains("Tool: Mini whiteboards"));
        assert!(prompt.contains("Total activity time: 10 minutes"));
    }

    #[test]
    fn prompt_skips_blank_metadata_lines() {
        let state = PlannerState::default();
        let prompt = build_prompt(&state.meta, &[]);
        assert!(prompt.contains("Lesson: Lesson Design Map"));
        assert!(!prompt.contains("Student profile:"));
        assert!(prompt.contains("Technology integration: Optional"));
    }
}
