//! The Leaflet map with its heat and marker layers.

use crate::config::{MapConfig, MAP_CONTAINER_ID};
use crate::js_bridge;
use crate::layers::MapLayers;
use crate::state::AppState;
use crate::timer::sleep_ms;
use beach_core::BeachAction;
use beach_sync::markers::SelectHandler;
use beach_sync::HeatPointsCache;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Interval between checks for the Leaflet bridge.
const BRIDGE_POLL_MS: u32 = 100;

/// Give up on Leaflet after this long.
const BRIDGE_TIMEOUT_MS: u32 = 15_000;

/// Wait until Leaflet and the bridge are loaded. False on timeout.
async fn wait_for_bridge() -> bool {
    let mut waited = 0;
    while !js_bridge::bridge_ready() {
        if waited >= BRIDGE_TIMEOUT_MS {
            return false;
        }
        sleep_ms(BRIDGE_POLL_MS).await;
        waited += BRIDGE_POLL_MS;
    }
    true
}

/// Full-size map container. Mounts Leaflet on first render and keeps the
/// heat overlay and markers in step with `AppState`.
///
/// Marker clicks are sent to the `BeachAction` coroutine provided by the app
/// root, so selection changes are dispatched inside the Dioxus runtime.
#[component]
pub fn MapView() -> Element {
    let mut state = use_context::<AppState>();
    let actions = use_coroutine_handle::<BeachAction>();
    let layers: Rc<RefCell<Option<MapLayers>>> = use_hook(|| Rc::new(RefCell::new(None)));
    let cache: Rc<RefCell<HeatPointsCache>> = use_hook(|| Rc::new(RefCell::new(HeatPointsCache::default())));

    // Mount Leaflet and both layers once the bridge is loaded
    let mount_layers = layers.clone();
    use_effect(move || {
        let mount_layers = mount_layers.clone();
        spawn(async move {
            state.dispatch(BeachAction::SetLoading(true));
            js_bridge::init_map_scripts();

            if !wait_for_bridge().await {
                log::error!("Leaflet did not load within {} ms", BRIDGE_TIMEOUT_MS);
                state.dispatch(BeachAction::SetError(Some("Failed to load the map library".to_string())));
                state.dispatch(BeachAction::SetLoading(false));
                return;
            }

            let on_select: SelectHandler = Rc::new(move |id| actions.send(BeachAction::SelectSite(id)));
            match MapLayers::mount(MAP_CONTAINER_ID, &MapConfig::default(), on_select) {
                Ok(mounted) => {
                    *mount_layers.borrow_mut() = Some(mounted);
                    state.map_ready.set(true);
                }
                Err(e) => {
                    log::error!("Failed to mount map layers: {:#}", e);
                    js_bridge::destroy_map(MAP_CONTAINER_ID);
                    state.dispatch(BeachAction::SetError(Some(format!("Map initialization failed: {}", e))));
                }
            }
            state.dispatch(BeachAction::SetLoading(false));
        });
    });

    // Same Rc while the site list is untouched, so the memo holds its value
    let heat_points = use_memo(move || cache.borrow_mut().get(&state.beach.read().sites));
    let sites = use_memo(move || state.beach.read().sites.clone());

    let heat_layers = layers.clone();
    use_effect(move || {
        let points = heat_points();
        if !(state.map_ready)() {
            return;
        }
        if let Some(mounted) = heat_layers.borrow().as_ref() {
            mounted.set_heat_points(points);
        }
    });

    let marker_layers = layers.clone();
    use_effect(move || {
        let sites = sites();
        if !(state.map_ready)() {
            return;
        }
        if let Some(mounted) = marker_layers.borrow_mut().as_mut() {
            mounted.sync_markers(&sites);
        }
    });

    use_drop(move || {
        if layers.borrow_mut().take().is_some() {
            log::info!("Map layers released");
        }
        js_bridge::destroy_map(MAP_CONTAINER_ID);
    });

    rsx! {
        div {
            id: "{MAP_CONTAINER_ID}",
            style: "height: 100%; width: 100%; border: 2px solid #ccc; box-sizing: border-box;",
        }
    }
}
