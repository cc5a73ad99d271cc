use dioxus::prelude::*;

use super::{edit_planner, SaveStatus};
use crate::core::format::char_counter;
use crate::core::lexicon::{Coded, Interaction, KeyApplication, Strategy};
use crate::core::store::{ActivityField, PlannerState, DETAILS_LIMIT, TOOL_LIMIT};

/// The editable activity blocks, one per stored activity in id order.
#[component]
pub fn ActivityFormList() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let ids: Vec<u32> = planner().list().iter().map(|a| a.id).collect();

    rsx! {
        div { class: "activities-container",
            for id in ids.into_iter() {
                ActivityForm { key: "{id}", id }
            }
        }
    }
}

#[component]
fn ActivityForm(id: u32) -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let save_status = use_context::<Signal<SaveStatus>>();

    let state = planner();
    let Some(activity) = state.list().iter().find(|a| a.id == id).cloned() else {
        return rsx! {};
    };

    let interaction_value = activity.interaction.map(Coded::code).unwrap_or("");
    let strategy_value = activity.strategy.map(Coded::code).unwrap_or("");
    let key_app_value = activity.key_app.map(Coded::code).unwrap_or("");

    let details_used = activity.details.chars().count();
    let details_counter = char_counter(details_used, DETAILS_LIMIT);
    let details_counter_class = if details_used > DETAILS_LIMIT {
        "char-counter over"
    } else {
        "char-counter"
    };
    let tool_used = activity.tool.chars().count();
    let tool_counter = char_counter(tool_used, TOOL_LIMIT);
    let tool_counter_class = if tool_used > TOOL_LIMIT {
        "char-counter over"
    } else {
        "char-counter"
    };

    let field_handler = move |field: ActivityField| {
        move |evt: Event<FormData>| {
            edit_planner(planner, save_status, |s| {
                s.update(id, field, &evt.value());
            });
        }
    };

    let on_delete = move |_| {
        edit_planner(planner, save_status, |s| s.delete(id));
    };

    rsx! {
        div { class: "activity-item",
            div { class: "activity-header",
                div { class: "activity-number", "{id}" }
                div { class: "activity-body",
                    div { class: "activity-fields",
                        div { class: "form-group",
                            label { "Interaction type " span { class: "required", "*" } }
                            select {
                                value: "{interaction_value}",
                                oninput: field_handler(ActivityField::Interaction),
                                option { value: "", "Select type" }
                                for variant in Interaction::ALL.iter() {
                                    option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                                }
                            }
                        }
                        div { class: "form-group",
                            label { "Active learning process " span { class: "required", "*" } }
                            select {
                                value: "{strategy_value}",
                                oninput: field_handler(ActivityField::Strategy),
                                option { value: "", "Select process" }
                                for variant in Strategy::ALL.iter() {
                                    option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                                }
                            }
                        }
                        div { class: "form-group",
                            label { "Time (mins)" }
                            input {
                                r#type: "number",
                                min: "0",
                                value: "{activity.minutes}",
                                placeholder: "5",
                                oninput: field_handler(ActivityField::Minutes),
                            }
                        }
                    }
                    div { class: "form-group activity-extra",
                        label {
                            "Activity details "
                            span { class: "required", "*" }
                            span { class: "field-hint", " ≤ {DETAILS_LIMIT} characters" }
                        }
                        textarea {
                            maxlength: "{DETAILS_LIMIT}",
                            placeholder: "Describe the activity...",
                            value: "{activity.details}",
                            oninput: field_handler(ActivityField::Details),
                        }
                        div { class: "{details_counter_class}", "{details_counter}" }
                    }
                    div { class: "form-group activity-extra",
                        label { "Key application of technology" }
                        select {
                            value: "{key_app_value}",
                            oninput: field_handler(ActivityField::KeyApp),
                            option { value: "", "Select category" }
                            for variant in KeyApplication::ALL.iter() {
                                option { key: "{variant.code()}", value: "{variant.code()}", "{variant.label()}" }
                            }
                        }
                    }
                    div { class: "form-group activity-extra",
                        label {
                            "Tech tool (optional)"
                            span { class: "field-hint", " ≤ {TOOL_LIMIT} characters" }
                        }
                        input {
                            maxlength: "{TOOL_LIMIT}",
                            placeholder: "e.g., Padlet, SLS, HTML Interactives",
                            value: "{activity.tool}",
                            oninput: field_handler(ActivityField::Tool),
                        }
                        div { class: "{tool_counter_class}", "{tool_counter}" }
                    }
                }
                div { class: "activity-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-inline-delete",
                        onclick: on_delete,
                        "Delete activity"
                    }
                }
            }
        }
    }
}
