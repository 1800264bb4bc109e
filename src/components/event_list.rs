use crate::telemetry::aggregator::EventRecord;
use crate::telemetry::events::LightStatus;
use dioxus::prelude::*;

#[component]
pub fn EventList(events: Vec<EventRecord>) -> Element {
    rsx! {
        div {
            class: "bg-black text-green-400 p-4 rounded-lg font-mono text-sm h-96 overflow-y-auto",
            if events.is_empty() {
                div { class: "text-gray-500 italic", "Waiting for events..." }
            }
            for event in events.iter() {
                {
                    let status_class = match event.status {
                        LightStatus::On => "text-yellow-300 font-bold",
                        LightStatus::Off => "text-gray-400 font-bold",
                    };
                    rsx! {
                        div { class: "mb-2 border-b border-gray-800 pb-1 grid grid-cols-[5.5rem_2.5rem_1fr] gap-2",
                            span { class: "text-gray-500", "{event.time}" }
                            span { class: "{status_class}", "{event.status}" }
                            span { "{event.details}" }
                        }
                    }
                }
            }
        }
    }
}
