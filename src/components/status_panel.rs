use crate::components::format::{format_joules, format_time};
use crate::components::EventList;
use crate::telemetry::aggregator::DeviceTelemetry;
use crate::telemetry::events::LightStatus;
use dioxus::prelude::*;

#[component]
pub fn StatusPanel(device: DeviceTelemetry) -> Element {
    let (indicator_class, indicator_text) = match device.status() {
        Some(LightStatus::On) => ("bg-yellow-300 shadow-[0_0_12px_#fde047]", "ON"),
        Some(LightStatus::Off) => ("bg-gray-600", "OFF"),
        None => ("bg-gray-300 dark:bg-gray-700 opacity-50", "Unknown"),
    };
    let (motion_class, motion_text) = match device.motion_detected() {
        Some(true) => ("text-red-600 dark:text-red-400 font-bold", "Detected"),
        Some(false) => ("text-green-600 dark:text-green-400", "None"),
        None => ("text-gray-400 italic", "Unknown"),
    };
    let on_time = format_time(device.daily_total_on_time() * 60.0);
    let energy = format_joules(device.daily_total_energy());
    let events: Vec<_> = device.events().iter().cloned().collect();

    rsx! {
        div { class: "grid grid-cols-1 lg:grid-cols-[20rem_1fr] gap-4",
            div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow space-y-3",
                div { class: "flex items-center justify-between",
                    span { class: "text-gray-600 dark:text-gray-400", "Light:" }
                    div { class: "flex items-center gap-2",
                        span { class: "inline-block w-4 h-4 rounded-full {indicator_class}" }
                        span { class: "font-semibold", "{indicator_text}" }
                    }
                }
                div { class: "flex items-center justify-between",
                    span { class: "text-gray-600 dark:text-gray-400", "Motion:" }
                    span { class: "{motion_class}", "{motion_text}" }
                }
                div { class: "flex items-center justify-between",
                    span { class: "text-gray-600 dark:text-gray-400", "On today:" }
                    span { class: "font-semibold", "{on_time}" }
                }
                div { class: "flex items-center justify-between",
                    span { class: "text-gray-600 dark:text-gray-400", "Energy today:" }
                    span { class: "font-semibold font-mono", "{energy}" }
                }
            }
            div {
                h2 { class: "text-lg font-semibold mb-2", "Event Log" }
                EventList { events }
            }
        }
    }
}
