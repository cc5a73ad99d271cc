use dioxus::prelude::*;

use super::plan_activities::ActivityFormList;
use super::{edit_planner, SaveIndicator, SaveStatus};
use crate::components::app_navbar::generate_link;
use crate::core::format::missing_fields_message;
use crate::core::lexicon::{Coded, TechIntegration};
use crate::core::storage;
use crate::core::store::{LessonMeta, PlannerState};
use crate::import::parse_plan;

/// The editing page: lesson metadata, the activity list, outline import,
/// and the generate/clear actions.
#[component]
pub fn Plan() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let save_status = use_context::<Signal<SaveStatus>>();
    let mut generate_error = use_signal(|| Option::<String>::None);
    let mut confirm_clear = use_signal(|| false);

    let state = planner();
    let incomplete = state.incomplete_ids();
    let has_complete = !state.complete_activities().is_empty();

    let meta_setter = move |apply: fn(&mut LessonMeta, String)| {
        move |evt: Event<FormData>| {
            edit_planner(planner, save_status, |s| apply(&mut s.meta, evt.value()));
        }
    };

    let tech_value = state.meta.tech_integration.code();

    let on_add = move |_| {
        edit_planner(planner, save_status, |s| {
            s.add();
        });
    };

    let on_clear = move |_| {
        if !confirm_clear() {
            confirm_clear.set(true);
            return;
        }
        confirm_clear.set(false);
        if let Err(err) = storage::wipe() {
            log::warn!("unable to remove stored snapshot: {err}");
        }
        edit_planner(planner, save_status, |s| s.clear());
    };

    let on_generate_blocked = move |_| {
        let ids = planner.peek().incomplete_ids();
        generate_error.set(Some(missing_fields_message(&ids)));
    };

    rsx! {
        section { class: "page page-plan",
            div { class: "page-heading",
                h1 { "Plan the lesson" }
                SaveIndicator {}
            }
            p { "Describe the lesson, then sequence its activities. Everything saves locally as you type." }

            section { class: "meta-form",
                h2 { "Lesson details" }
                div { class: "meta-form__grid",
                    label { "Topic"
                        input {
                            value: "{state.meta.topic}",
                            placeholder: "e.g. Photosynthesis",
                            oninput: meta_setter(|m, v| m.topic = v),
                        }
                    }
                    label { "Level"
                        input {
                            value: "{state.meta.level}",
                            placeholder: "e.g. Secondary 2",
                            oninput: meta_setter(|m, v| m.level = v),
                        }
                    }
                    label { "Duration (mins)"
                        input {
                            r#type: "number",
                            min: "0",
                            value: "{state.meta.duration}",
                            oninput: meta_setter(|m, v| m.duration = v),
                        }
                    }
                    label { "Level of technology integration"
                        select {
                            value: "{tech_value}",
                            oninput: meta_setter(|m, v| {
                                m.tech_integration =
                                    TechIntegration::from_code(&v).unwrap_or_default();
                            }),
                            for variant in TechIntegration::ALL.iter() {
                                option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                            }
                        }
                    }
                }
                label { class: "meta-form__wide", "Student profile"
                    textarea {
                        value: "{state.meta.student_profile}",
                        oninput: meta_setter(|m, v| m.student_profile = v),
                    }
                }
                label { class: "meta-form__wide", "Learning outcomes"
                    textarea {
                        value: "{state.meta.learning_outcomes}",
                        oninput: meta_setter(|m, v| m.learning_outcomes = v),
                    }
                }
                label { class: "meta-form__wide", "Prerequisite knowledge"
                    textarea {
                        value: "{state.meta.prerequisite_knowledge}",
                        oninput: meta_setter(|m, v| m.prerequisite_knowledge = v),
                    }
                }
                label { class: "meta-form__wide", "Learning issues to be addressed"
                    textarea {
                        value: "{state.meta.learning_issues}",
                        oninput: meta_setter(|m, v| m.learning_issues = v),
                    }
                }
            }

            ImportPanel {}

            section { class: "activities-section",
                h2 { "Activities" }
                if !incomplete.is_empty() {
                    p { class: "validation-warning", {missing_fields_message(&incomplete)} }
                }
                ActivityFormList {}
                div { class: "activities-actions",
                    button { r#type: "button", class: "btn", onclick: on_add, "Add activity" }
                    if confirm_clear() {
                        button {
                            r#type: "button",
                            class: "btn btn-inline-delete",
                            onclick: on_clear,
                            "Really clear everything?"
                        }
                        button {
                            r#type: "button",
                            class: "btn btn-ghost",
                            onclick: move |_| confirm_clear.set(false),
                            "Keep my plan"
                        }
                    } else {
                        button {
                            r#type: "button",
                            class: "btn btn-ghost",
                            onclick: on_clear,
                            "Clear all"
                        }
                    }
                }
            }

            div { class: "generate-row",
                if has_complete {
                    {generate_link("Generate design map").unwrap_or_else(|| rsx! {
                        span { class: "btn btn-primary btn-disabled", "Generate design map" }
                    })}
                } else {
                    button {
                        r#type: "button",
                        class: "btn btn-primary",
                        onclick: on_generate_blocked,
                        "Generate design map"
                    }
                }
                if let Some(message) = generate_error() {
                    p { class: "validation-error", "{message}" }
                }
            }
        }
    }
}

/// Paste-an-outline importer. Replaces the whole plan on success.
#[component]
fn ImportPanel() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let save_status = use_context::<Signal<SaveStatus>>();
    let mut draft = use_signal(String::new);
    let mut outcome = use_signal(|| Option::<Result<usize, String>>::None);

    let on_import = move |_| {
        let text = (*draft.peek()).clone();
        match parse_plan(&text) {
            Ok(plan) => {
                let imported = plan.activities.len();
                edit_planner(planner, save_status, |s| {
                    s.replace_with(plan.meta.clone(), plan.activities.clone());
                });
                draft.set(String::new());
                outcome.set(Some(Ok(imported)));
            }
            Err(err) => outcome.set(Some(Err(err.to_string()))),
        }
    };

    rsx! {
        details { class: "import-panel",
            summary { "Import a lesson outline" }
            p { class: "import-panel__hint",
                "Paste a markdown-style outline: metadata as \"key: value\" lines, activities under \"Activity\" headings. Importing replaces the current plan."
            }
            textarea {
                class: "import-panel__input",
                placeholder: "Topic: Photosynthesis\nDuration: 60\n\n## Activity 1\nInteraction: class\nProcess: Activate Learning\nTime: 10\nDetails: Retrieval quiz",
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
            }
            div { class: "import-panel__actions",
                button { r#type: "button", class: "btn", onclick: on_import, "Import outline" }
                match outcome() {
                    Some(Ok(count)) => rsx! {
                        span { class: "import-panel__ok", "Imported {count} activities" }
                    },
                    Some(Err(err)) => rsx! {
                        span { class: "import-panel__error", "{err}" }
                    },
                    None => rsx! {},
                }
            }
        }
    }
}
