use dioxus::prelude::*;

use crate::charts::{interaction_chart, key_app_chart, strategy_chart};
use crate::core::store::PlannerState;
use crate::export::{
    build_deck, build_prompt, capped_scale, charts_scene, copy_to_clipboard, download_bytes,
    map_scene, scene_to_png, timestamp_slug, CHARTS_RASTER_SCALE,
};
use crate::map::MapLayout;

const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Progress of the export in flight. Failures surface here; nothing fails
/// silently.
#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

/// Runs one export job. The `busy` flag serializes exports: while one is in
/// flight every trigger is disabled, so a second request cannot start.
fn run_export<F>(
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
    working: &'static str,
    task: F,
) where
    F: std::future::Future<Output = Result<String, String>> + 'static,
{
    if busy() {
        return;
    }
    busy.set(true);
    status.set(ExportStatus::Working(working));

    #[cfg(target_arch = "wasm32")]
    {
        crate::core::platform::spawn_future(async move {
            match task.await {
                Ok(message) => status.set(ExportStatus::Done(message)),
                Err(err) => status.set(ExportStatus::Error(err)),
            }
            busy.set(false);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match crate::core::platform::block_on(task) {
            Ok(message) => status.set(ExportStatus::Done(message)),
            Err(err) => status.set(ExportStatus::Error(err)),
        }
        busy.set(false);
    }
}

async fn export_map_png(state: PlannerState) -> Result<String, String> {
    let complete = state.complete_activities();
    let layout = MapLayout::compute(&complete, &state.meta);
    let scene = map_scene(&layout, &state.meta);
    let scale = capped_scale(scene.width, scene.height);
    let png = scene_to_png(&scene, scale).await?;
    let filename = format!("design-map-{}.png", timestamp_slug());
    Ok(match download_bytes(&filename, "image/png", png).await? {
        Some(path) => format!("Map PNG saved to {path}"),
        None => "Map PNG download started".to_string(),
    })
}

async fn export_charts_png(state: PlannerState) -> Result<String, String> {
    let complete = state.complete_activities();
    let scene = charts_scene(&[
        strategy_chart(&complete),
        interaction_chart(&complete),
        key_app_chart(&complete),
    ]);
    let png = scene_to_png(&scene, CHARTS_RASTER_SCALE).await?;
    let filename = format!("design-map-charts-{}.png", timestamp_slug());
    Ok(match download_bytes(&filename, "image/png", png).await? {
        Some(path) => format!("Charts PNG saved to {path}"),
        None => "Charts PNG download started".to_string(),
    })
}

async fn export_slide_deck(state: PlannerState) -> Result<String, String> {
    let complete = state.complete_activities();
    let layout = MapLayout::compute(&complete, &state.meta);
    let charts = charts_scene(&[
        strategy_chart(&complete),
        interaction_chart(&complete),
        key_app_chart(&complete),
    ]);
    let charts_png = scene_to_png(&charts, CHARTS_RASTER_SCALE).await?;
    let deck = build_deck(&layout, &state.meta, &charts, &charts_png)?;
    let filename = format!("design-map-{}.pptx", timestamp_slug());
    Ok(match download_bytes(&filename, PPTX_MIME, deck).await? {
        Some(path) => format!("Slide deck saved to {path}"),
        None => "Slide deck download started".to_string(),
    })
}

async fn export_prompt(state: PlannerState) -> Result<String, String> {
    let prompt = build_prompt(&state.meta, &state.complete_activities());
    copy_to_clipboard(prompt).await?;
    Ok("Lesson prompt copied to clipboard".to_string())
}

fn status_feedback(status: &ExportStatus) -> Option<(&'static str, String)> {
    match status {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-status", format!("{label}…"))),
        ExportStatus::Done(message) => {
            Some(("export-status export-status--ok", format!("✅ {message}")))
        }
        ExportStatus::Error(err) => {
            Some(("export-status export-status--error", format!("⚠️ {err}")))
        }
    }
}

/// Export actions for the rendered map: raster image, slide deck, and the
/// copyable lesson prompt.
#[component]
pub fn ExportPanel() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let on_map_png = move |_| {
        let state = (*planner.peek()).clone();
        run_export(status, busy, "Rendering map PNG", export_map_png(state));
    };
    let on_charts_png = move |_| {
        let state = (*planner.peek()).clone();
        run_export(status, busy, "Rendering charts PNG", export_charts_png(state));
    };
    let on_deck = move |_| {
        let state = (*planner.peek()).clone();
        run_export(status, busy, "Building slide deck", export_slide_deck(state));
    };
    let on_prompt = move |_| {
        let state = (*planner.peek()).clone();
        run_export(status, busy, "Copying lesson prompt", export_prompt(state));
    };

    let feedback = status_feedback(&status());

    rsx! {
        section { class: "export-panel",
            h2 { "Export" }
            p { "Download the rendered map, rebuild it as slides, or copy a plain-text prompt." }
            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    disabled: busy(),
                    onclick: on_map_png,
                    "Download map PNG"
                }
                button {
                    r#type: "button",
                    class: "btn",
                    disabled: busy(),
                    onclick: on_charts_png,
                    "Download charts PNG"
                }
                button {
                    r#type: "button",
                    class: "btn",
                    disabled: busy(),
                    onclick: on_deck,
                    "Download slide deck"
                }
                button {
                    r#type: "button",
                    class: "btn btn-ghost",
                    disabled: busy(),
                    onclick: on_prompt,
                    "Copy lesson prompt"
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

/// The charts page's single download action.
#[component]
pub fn ChartsDownload() -> Element {
    let planner = use_context::<Signal<PlannerState>>();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let on_charts_png = move |_| {
        let state = (*planner.peek()).clone();
        run_export(status, busy, "Rendering charts PNG", export_charts_png(state));
    };

    let feedback = status_feedback(&status());

    rsx! {
        div { class: "export-panel export-panel--compact",
            button {
                r#type: "button",
                class: "btn btn-primary",
                disabled: busy(),
                onclick: on_charts_png,
                "Download charts PNG"
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
