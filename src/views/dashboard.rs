use crate::components::format::device_count;
use crate::components::StatusPanel;
use crate::telemetry::dispatch::{Dashboard as DashboardState, Input, Refresh, Tab, UserAction};
use crate::telemetry::storage::{self, PlatformStore};
use crate::telemetry::{clock, use_telemetry_handler};
use crate::views::{DailyCharts, WeeklyCharts};
use dioxus::prelude::*;

type State = CopyValue<DashboardState<PlatformStore>>;

/// Bump the render revision unless the dispatcher reported no visible change.
fn redraw(mut revision: Signal<u64>, refresh: Refresh) {
    if refresh != Refresh::Nothing {
        tracing::debug!("Dashboard refresh: {:?}", refresh);
        *revision.write() += 1;
    }
}

fn apply(mut state: State, revision: Signal<u64>, input: Input) {
    let refresh = state.write().handle(input);
    redraw(revision, refresh);
}

/// The dashboard page, rendered for `[Route::Dashboard]`. Owns the device
/// registry for the lifetime of the page.
#[component]
pub fn Dashboard() -> Element {
    // Server and client both render the empty dashboard first; stored devices
    // are merged in once the page runs in the browser.
    let mut state: State = use_hook(|| CopyValue::new(DashboardState::new(storage::platform_store())));
    let revision = use_signal(|| 0u64);
    let mut stream_error = use_signal(|| None::<String>);

    use_effect(move || {
        let refresh = state.write().load_stored(clock::today());
        redraw(revision, refresh);
    });

    use_telemetry_handler(
        move |raw| {
            apply(state, revision, Input::Transport(raw));
            if stream_error.peek().is_some() {
                stream_error.set(None);
            }
        },
        move |e| {
            tracing::warn!("Telemetry stream error: {}", e);
            stream_error.set(Some(e));
        },
    );

    // Pages left open overnight still roll over at midnight
    use_future(move || async move {
        loop {
            #[cfg(feature = "server")]
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            #[cfg(not(feature = "server"))]
            gloo_timers::future::sleep(std::time::Duration::from_secs(30)).await;

            let refresh = state.write().tick(clock::today());
            redraw(revision, refresh);
        }
    });

    // Subscribe this render to dispatcher changes
    let _ = revision();

    let (ids, selected_id, device, tab, storage_ok) = {
        let s = state.read();
        (
            s.registry().device_ids().map(str::to_string).collect::<Vec<_>>(),
            s.selected_id().map(str::to_string),
            s.selected_device().cloned(),
            s.tab(),
            s.storage_available(),
        )
    };
    let count = device_count(ids.len());

    let tab_class = move |t: Tab| {
        if t == tab {
            "px-4 py-2 rounded-t-lg font-semibold bg-white dark:bg-gray-800 border-b-2 border-yellow-400"
        } else {
            "px-4 py-2 rounded-t-lg text-gray-500 hover:bg-gray-100 dark:hover:bg-gray-800"
        }
    };

    rsx! {
        div { class: "container mx-auto p-4 space-y-4",
            div { class: "flex flex-wrap items-center gap-4",
                h1 { class: "text-2xl font-bold", "Light Sensors" }
                span { class: "text-gray-500", "{count}" }
                select {
                    class: "px-3 py-1.5 rounded border border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-800",
                    disabled: ids.is_empty(),
                    onchange: move |e| apply(state, revision, Input::User(UserAction::Select(e.value()))),
                    for id in ids.iter() {
                        option {
                            key: "{id}",
                            value: "{id}",
                            selected: selected_id.as_deref() == Some(id.as_str()),
                            "{id}"
                        }
                    }
                }
            }

            if let Some(e) = stream_error() {
                div { class: "p-2 rounded bg-red-50 dark:bg-red-900/30 text-red-700 dark:text-red-300 text-sm",
                    "Telemetry stream unavailable: {e}. Retrying..."
                }
            }
            if !storage_ok {
                div { class: "p-2 rounded bg-yellow-50 dark:bg-yellow-900/30 text-yellow-800 dark:text-yellow-200 text-sm",
                    "Local storage is unavailable, data will not survive a reload."
                }
            }

            div { class: "flex gap-1 border-b border-gray-200 dark:border-gray-700",
                button {
                    class: tab_class(Tab::Daily),
                    onclick: move |_| apply(state, revision, Input::User(UserAction::SwitchTab(Tab::Daily))),
                    "Daily"
                }
                button {
                    class: tab_class(Tab::Weekly),
                    onclick: move |_| apply(state, revision, Input::User(UserAction::SwitchTab(Tab::Weekly))),
                    "Weekly"
                }
            }

            match device {
                None => rsx! {
                    div { class: "p-8 text-center text-gray-400 italic", "Waiting for the first device to report..." }
                },
                Some(device) => rsx! {
                    match tab {
                        Tab::Daily => rsx! { DailyCharts { device: device.clone() } },
                        Tab::Weekly => rsx! { WeeklyCharts { device: device.clone() } },
                    }
                    StatusPanel { device: device.clone() }
                },
            }
        }
    }
}
