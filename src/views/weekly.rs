use crate::components::bar_chart::auto_max;
use crate::components::format::{format_hm, format_time};
use crate::components::BarChart;
use crate::telemetry::aggregator::DeviceTelemetry;
use dioxus::prelude::*;

fn ticks(max: f64, label: impl Fn(f64) -> String) -> Vec<(f64, String)> {
    (1..=4)
        .map(|i| {
            let v = max * i as f64 / 4.0;
            (v, label(v))
        })
        .collect()
}

/// Totals of the days archived at each rollover, oldest on the left.
#[component]
pub fn WeeklyCharts(device: DeviceTelemetry) -> Element {
    let days: Vec<_> = device.history().iter().rev().cloned().collect();

    if days.is_empty() {
        return rsx! {
            div { class: "p-8 text-center text-gray-400 italic",
                "Weekly totals appear after the first full day of data."
            }
        };
    }

    let labels: Vec<String> = days.iter().map(|d| d.date.format("%a %d").to_string()).collect();

    let on_time: Vec<f64> = days.iter().map(|d| d.on_time_minutes * 60.0).collect();
    let on_time_max = auto_max(on_time.iter().copied());
    let on_time_labels = on_time.iter().map(|s| format_hm(*s)).collect::<Vec<_>>();

    let energy: Vec<f64> = days.iter().map(|d| d.energy_j).collect();
    let energy_max = auto_max(energy.iter().copied());
    let energy_labels = energy.iter().map(|j| format!("{:.2} J", j)).collect::<Vec<_>>();

    let average = device.weekly_average();
    let avg_on_time = average
        .map(|a| format_time(a.on_time_minutes * 60.0))
        .unwrap_or_default();
    let avg_energy = average
        .map(|a| format!("{:.2} J", a.energy_j))
        .unwrap_or_default();

    rsx! {
        div { class: "grid grid-cols-1 gap-8",
            div { class: "grid grid-cols-2 gap-4",
                div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow",
                    div { class: "text-sm text-gray-500", "Average on time" }
                    div { class: "text-2xl font-bold", "{avg_on_time}" }
                }
                div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow",
                    div { class: "text-sm text-gray-500", "Average energy" }
                    div { class: "text-2xl font-bold", "{avg_energy}" }
                }
            }
            div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow w-full",
                h2 { class: "text-lg font-semibold mb-2", "Light On Time" }
                div { class: "h-64 w-full",
                    BarChart {
                        values: on_time,
                        labels: labels.clone(),
                        value_labels: on_time_labels,
                        max: on_time_max,
                        guides: ticks(on_time_max, format_hm),
                        color: "#ffc107",
                    }
                }
            }
            div { class: "p-4 bg-white dark:bg-gray-800 rounded-lg shadow w-full",
                h2 { class: "text-lg font-semibold mb-2", "Energy Consumed (J)" }
                div { class: "h-64 w-full",
                    BarChart {
                        values: energy,
                        labels,
                        value_labels: energy_labels,
                        max: energy_max,
                        guides: ticks(energy_max, |j| format!("{:.1} J", j)),
                        color: "#00c896",
                    }
                }
            }
        }
    }
}
