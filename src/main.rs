use dioxus::prelude::*;
use views::{Dashboard, Navbar};

mod components;
mod config;
mod telemetry;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
        #[route("/")]
        Dashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus_logger::init(tracing::Level::INFO) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
