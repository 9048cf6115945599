//! Dioxus RSX components for the beach pollution map.

mod control_panel;
mod error_banner;
mod loading_spinner;
mod map_view;

pub use control_panel::{ControlPanel, RecentUpdates, ReportForm, SiteSelector};
pub use error_banner::ErrorBanner;
pub use loading_spinner::LoadingSpinner;
pub use map_view::MapView;
