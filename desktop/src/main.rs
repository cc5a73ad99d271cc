#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Charts, DesignMapPage, Plan};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/")]
    Plan {},
    #[route("/map")]
    DesignMapPage {},
    #[route("/charts")]
    Charts {},
}

// Embedded shared theme (ui/assets/theme/main.css); no separate desktop
// assets needed.
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

#[cfg(feature = "desktop")]
fn main() {
    env_logger::init();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("DesignMap – v{}", env!("CARGO_PKG_VERSION")))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    env_logger::init();
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

#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
