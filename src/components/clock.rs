use crate::telemetry::clock::until_rollover;
use chrono::Local;
use dioxus::prelude::*;

fn readout() -> (String, String) {
    let now = Local::now();
    let reset = until_rollover(now)
        .map(|left| format!("{}h {:02}m", left.num_hours(), left.num_minutes() % 60))
        .unwrap_or_else(|| "--".to_string());
    (now.format("%a %d %b %H:%M:%S").to_string(), reset)
}

/// Local time and how long until today's totals reset.
#[component]
pub fn DayClock() -> Element {
    let mut state = use_signal(readout);

    use_future(move || async move {
        loop {
            #[cfg(feature = "server")]
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            #[cfg(not(feature = "server"))]
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;

            state.set(readout());
        }
    });

    let (now, reset) = state();

    rsx! {
        div { class: "flex flex-col items-end font-mono",
            span { class: "text-lg text-gray-500", "{now}" }
            span { class: "text-xs text-gray-400", "Daily reset in {reset}" }
        }
    }
}
