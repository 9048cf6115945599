//! Beach Pollution Map
//!
//! Full-screen Leaflet map of Mumbai's beaches with a pollution heat overlay,
//! one marker per beach and a control panel for filing complaints and
//! cleanups.
//!
//! Data flow:
//! 1. `AppState::new` seeds `BeachState` from the CSV embedded in `beach-core`.
//! 2. Every change goes through `AppState::dispatch`, which runs the pure
//!    reducer and publishes the new snapshot.
//! 3. `MapView` loads Leaflet, mounts the map, then re-syncs the heat overlay
//!    and markers whenever the site list changes.
//! 4. Marker clicks are sent to the action coroutine below and dispatched
//!    from there.

use beach_core::BeachAction;
use beach_map_ui::components::{ControlPanel, ErrorBanner, LoadingSpinner, MapView};
use beach_map_ui::state::AppState;
use dioxus::prelude::*;
use futures::StreamExt;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("beach-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Actions raised outside component handlers (marker clicks)
    use_coroutine(move |mut rx: UnboundedReceiver<BeachAction>| async move {
        while let Some(action) = rx.next().await {
            state.dispatch(action);
        }
    });

    let loading = state.beach.read().is_loading;
    let error = state.beach.read().error.clone();

    rsx! {
        div {
            style: "position: relative; height: 100vh; width: 100%;",
            MapView {}
            ControlPanel {}
            if loading {
                LoadingSpinner {}
            }
            {error.map(|message| rsx! { ErrorBanner { message } })}
        }
    }
}
