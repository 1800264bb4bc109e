//! The views module contains the components for all Layouts and Routes for our app. Each layout and route in our [`Route`]
//! enum will render one of these components.
//!
//! The [`Navbar`] layout wraps every page with the app title and the local clock.

mod dashboard;
pub use dashboard::Dashboard;

mod daily;
pub use daily::DailyCharts;

mod weekly;
pub use weekly::WeeklyCharts;

mod navbar;
pub use navbar::Navbar;
