//! Leaflet-backed implementations of the synchronizer traits.

use crate::js_bridge::{call_bridge, number_pair};
use beach_core::{GeoPoint, SiteId};
use beach_sync::markers::SelectHandler;
use beach_sync::viewport::{ListenerKey, ViewportHandler};
use beach_sync::{ContainerSize, MapViewport, MarkerLayer, PixelPoint, ViewportEvent};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

/// Projection and viewport events of one Leaflet map.
///
/// Each subscription keeps its `Closure` alive until unsubscribed; anything
/// still registered when the viewport drops is detached from the map then.
pub struct LeafletViewport {
    map_id: String,
    next_key: Cell<u64>,
    listeners: RefCell<HashMap<ListenerKey, (ViewportEvent, Closure<dyn FnMut()>)>>,
}

impl LeafletViewport {
    /// Bind to a map already created with [`crate::js_bridge::create_map`].
    pub fn attach(map_id: &str) -> anyhow::Result<Self> {
        let size = call_bridge("size", &[JsValue::from_str(map_id)])?;
        if size.is_null() {
            anyhow::bail!("no Leaflet map in #{}", map_id);
        }
        Ok(Self {
            map_id: map_id.to_string(),
            next_key: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        })
    }

    fn detach_listener(&self, event: ViewportEvent, closure: &Closure<dyn FnMut()>) {
        let result = call_bridge(
            "off",
            &[
                JsValue::from_str(&self.map_id),
                JsValue::from_str(event.name()),
                closure.as_ref().clone(),
            ],
        );
        if let Err(e) = result {
            log::warn!("Failed to remove {} listener: {}", event.name(), e);
        }
    }
}

impl MapViewport for LeafletViewport {
    fn project(&self, at: GeoPoint) -> Option<PixelPoint> {
        let value = call_bridge(
            "project",
            &[
                JsValue::from_str(&self.map_id),
                JsValue::from_f64(at.lat),
                JsValue::from_f64(at.lng),
            ],
        )
        .ok()?;
        let (x, y) = number_pair(&value)?;
        Some(PixelPoint { x, y })
    }

    fn container_size(&self) -> Option<ContainerSize> {
        let value = call_bridge("size", &[JsValue::from_str(&self.map_id)]).ok()?;
        let (width, height) = number_pair(&value)?;
        Some(ContainerSize {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        })
    }

    fn subscribe(&self, event: ViewportEvent, handler: ViewportHandler) -> ListenerKey {
        let key = ListenerKey(self.next_key.get());
        self.next_key.set(key.0 + 1);

        let closure = Closure::<dyn FnMut()>::new(move || handler(event));
        let result = call_bridge(
            "on",
            &[
                JsValue::from_str(&self.map_id),
                JsValue::from_str(event.name()),
                closure.as_ref().clone(),
            ],
        );
        if let Err(e) = result {
            log::warn!("Failed to add {} listener: {}", event.name(), e);
        }
        self.listeners.borrow_mut().insert(key, (event, closure));
        key
    }

    fn unsubscribe(&self, key: ListenerKey) {
        let removed = self.listeners.borrow_mut().remove(&key);
        if let Some((event, closure)) = removed {
            self.detach_listener(event, &closure);
        }
    }
}

impl Drop for LeafletViewport {
    fn drop(&mut self) {
        let listeners: Vec<_> = self.listeners.borrow_mut().drain().collect();
        for (_, (event, closure)) in listeners {
            self.detach_listener(event, &closure);
        }
    }
}

/// Leaflet markers of one map, keyed by site id.
///
/// The click closures are owned here and dropped together with their marker.
pub struct LeafletMarkers {
    map_id: String,
    click_handlers: HashMap<SiteId, Closure<dyn FnMut()>>,
}

impl LeafletMarkers {
    pub fn new(map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
            click_handlers: HashMap::new(),
        }
    }

    fn call(&self, name: &str, id: &SiteId, extra: &[JsValue]) -> Option<JsValue> {
        let mut args = vec![JsValue::from_str(&self.map_id), JsValue::from_str(id.as_str())];
        args.extend_from_slice(extra);
        match call_bridge(name, &args) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Marker call {} for '{}' failed: {}", name, id, e);
                None
            }
        }
    }
}

impl MarkerLayer for LeafletMarkers {
    fn add_marker(&mut self, id: &SiteId, at: GeoPoint, on_click: SelectHandler) {
        let site_id = id.clone();
        let closure = Closure::<dyn FnMut()>::new(move || on_click(site_id.clone()));
        self.call(
            "addMarker",
            id,
            &[
                JsValue::from_f64(at.lat),
                JsValue::from_f64(at.lng),
                closure.as_ref().clone(),
            ],
        );
        self.click_handlers.insert(id.clone(), closure);
    }

    fn remove_marker(&mut self, id: &SiteId) {
        self.call("removeMarker", id, &[]);
        self.click_handlers.remove(id);
    }

    fn bind_popup(&mut self, id: &SiteId, html: &str) {
        self.call("bindPopup", id, &[JsValue::from_str(html)]);
    }

    fn is_popup_open(&self, id: &SiteId) -> bool {
        self.call("isPopupOpen", id, &[])
            .and_then(|open| open.as_bool())
            .unwrap_or(false)
    }

    fn set_open_popup_content(&mut self, id: &SiteId, html: &str) {
        self.call("setPopupContent", id, &[JsValue::from_str(html)]);
    }
}
