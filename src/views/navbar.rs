use crate::components::DayClock;
use crate::Route;
use dioxus::prelude::*;

/// The Navbar component that will be rendered on all pages of our app since every page is under the layout.
#[component]
pub fn Navbar() -> Element {
    rsx! {
        div { id: "navbar", class: "flex flex-row items-center justify-between mb-5 px-4 py-2",
            Link { class: "nav-link text-xl font-bold", to: Route::Dashboard {}, "AutoGlow" }
            DayClock {}
        }

        SuspenseBoundary {
            fallback: move |_| rsx! {
                div {
                    width: "100%",
                    height: "100%",
                    display: "flex",
                    align_items: "center",
                    justify_content: "center",
                    "Loading..."
                }
            },
            Outlet::<Route> {}
        }
    }
}
