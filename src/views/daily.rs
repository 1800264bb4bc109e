use crate::components::{BarChart, LineChart};
use crate::config::MAX_MINUTES_PER_HOUR;
use crate::telemetry::aggregator::DeviceTelemetry;
use crate::telemetry::clock::{hour_label, HOURS_PER_DAY};
use dioxus::prelude::*;

#[component]
pub fn DailyCharts(device: DeviceTelemetry) -> Element {
    let labels: Vec<String> = (0..HOURS_PER_DAY).map(hour_label).collect();
    let on_time = device.on_time_by_hour().to_vec();
    let on_time_labels = on_time.iter().map(|m| format!("{:.2} min", m)).collect::<Vec<_>>();
    let guides = [15.0, 30.0, 45.0, 60.0]
        .into_iter()
        .map(|m| (m, format!("{} min", m)))
        .collect::<Vec<_>>();
    let energy = device.energy_by_hour().to_vec();

    rsx! {
        div { class: "grid grid-cols-1 gap-8",
            div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow w-full",
                h2 { class: "text-lg font-semibold mb-2", "Light On Time (min per hour)" }
                div { class: "h-64 w-full",
                    BarChart {
                        values: on_time,
                        labels: labels.clone(),
                        value_labels: on_time_labels,
                        max: MAX_MINUTES_PER_HOUR,
                        guides,
                        color: "#00e676",
                    }
                }
            }
            div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow w-full",
                h2 { class: "text-lg font-semibold mb-2", "Cumulative Energy (J)" }
                div { class: "h-64 w-full",
                    LineChart {
                        values: energy,
                        labels,
                        unit: " J".to_string(),
                        color: "#ffc107",
                    }
                }
            }
        }
    }
}
