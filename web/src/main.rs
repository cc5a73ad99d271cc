use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Charts, DesignMapPage, Plan};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Plan {},
    #[route("/map")]
    DesignMapPage {},
    #[route("/charts")]
    Charts {},
}

// Embedded shared theme (ui/assets/theme/main.css).
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_plan(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Plan {},
        "{label}"
    })
}
fn nav_map(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::DesignMapPage {},
        "{label}"
    })
}
fn nav_charts(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Charts {},
        "{label}"
    })
}
fn nav_generate(label: &str) -> Element {
    rsx!(Link {
        class: "btn btn-primary",
        to: Route::DesignMapPage {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::views::use_planner_root();
    register_nav(NavBuilder {
        plan: nav_plan,
        map: nav_map,
        charts: nav_charts,
        generate: nav_generate,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
