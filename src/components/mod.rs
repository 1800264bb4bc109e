//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to defined common UI elements like buttons, forms, and modals.

pub mod format;

pub mod bar_chart;
pub use bar_chart::BarChart;

pub mod line_chart;
pub use line_chart::LineChart;

mod clock;
pub use clock::DayClock;

mod event_list;
pub use event_list::EventList;

mod status_panel;
pub use status_panel::StatusPanel;
