use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum.
/// Each closure receives the label text and returns a link that already
/// contains it.
///
/// Wiring for a platform crate (web/desktop):
/// 1. Define functions returning `Link { to: Route::..., class: "navbar__link", "{label}" }`.
/// 2. Call `ui::components::app_navbar::register_nav(builder)` at the top of `App()`.
/// 3. Render `AppNavbar {}` in the layout.
pub struct NavBuilder {
    pub plan: fn(label: &str) -> Element,
    pub map: fn(label: &str) -> Element,
    pub charts: fn(label: &str) -> Element,
    /// Call-to-action link used by the plan view's "Generate design map"
    /// button; styled by the caller-provided class.
    pub generate: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// The plan view's navigation into the rendered map, if the platform has
/// registered its routes.
pub fn generate_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.generate)(label))
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|b| {
        let plan = (b.plan)("Plan");
        let map = (b.map)("Design map");
        let charts = (b.charts)("Charts");

        rsx! {
            nav { class: "navbar__links",
                {plan}
                {map}
                {charts}
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "DesignMap" }
                    }
                    span { class: "navbar__brand-subtitle", "Plot a lesson across people and time" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}
