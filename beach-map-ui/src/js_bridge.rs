//! Typed wrappers around the Leaflet bridge.
//!
//! Leaflet is loaded from a CDN at runtime (unless the host page already has
//! it) and `assets/js/leaflet-bridge.js` is evaluated once `L` exists. The
//! bridge lives on `window.beachMap`; this module calls its functions through
//! `js_sys::Reflect` and converts failures into `anyhow` errors.

use crate::config::MapConfig;
use anyhow::{anyhow, Context};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

// Embed the bridge at compile time
static LEAFLET_BRIDGE_JS: &str = include_str!("../assets/js/leaflet-bridge.js");

const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Beach map JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Inject Leaflet if needed and evaluate the bridge once `L` is defined.
///
/// The bridge source is parked on `window` so the polling callback can eval it
/// at global scope. `window.__beachMapReady` flips to true when done; poll it
/// with [`bridge_ready`].
pub fn init_map_scripts() {
    let store_js = format!(
        "window.__beachMapBridge = {};",
        serde_json::to_string(LEAFLET_BRIDGE_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    call_js(&format!(
        r#"
        (function() {{
            if (typeof L === 'undefined' && !document.getElementById('leaflet-js')) {{
                var css = document.createElement('link');
                css.rel = 'stylesheet';
                css.href = '{LEAFLET_CSS_URL}';
                document.head.appendChild(css);
                var js = document.createElement('script');
                js.id = 'leaflet-js';
                js.src = '{LEAFLET_JS_URL}';
                document.head.appendChild(js);
            }}
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined') {{
                    clearInterval(waitForLeaflet);
                    if (window.__beachMapBridge) {{
                        (0, eval)(window.__beachMapBridge);
                        delete window.__beachMapBridge;
                    }}
                    window.__beachMapReady = true;
                    console.log('Beach map bridge initialized');
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// True once Leaflet and the bridge are both loaded.
pub fn bridge_ready() -> bool {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("__beachMapReady")).ok())
        .and_then(|flag| flag.as_bool())
        .unwrap_or(false)
}

fn bridge() -> anyhow::Result<JsValue> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let bridge = Reflect::get(&window, &JsValue::from_str("beachMap"))
        .map_err(|e| anyhow!("reading window.beachMap failed: {:?}", e))?;
    if bridge.is_undefined() || bridge.is_null() {
        return Err(anyhow!("map bridge not loaded"));
    }
    Ok(bridge)
}

/// Call `window.beachMap[name](...args)`.
pub fn call_bridge(name: &str, args: &[JsValue]) -> anyhow::Result<JsValue> {
    let bridge = bridge()?;
    let function: Function = Reflect::get(&bridge, &JsValue::from_str(name))
        .map_err(|e| anyhow!("reading beachMap.{} failed: {:?}", name, e))?
        .dyn_into()
        .map_err(|_| anyhow!("beachMap.{} is not a function", name))?;
    let args: Array = args.iter().collect();
    function
        .apply(&bridge, &args)
        .map_err(|e| anyhow!("beachMap.{} failed: {:?}", name, e))
}

/// Create the Leaflet map inside the element with id `map_id`.
pub fn create_map(map_id: &str, config: &MapConfig) -> anyhow::Result<()> {
    let config_json = serde_json::to_string(config).context("serializing map config")?;
    let created = call_bridge(
        "create",
        &[JsValue::from_str(map_id), JsValue::from_str(&config_json)],
    )?;
    if created.as_bool() != Some(true) {
        return Err(anyhow!("map container '{}' not found", map_id));
    }
    log::info!("Leaflet map created in #{}", map_id);
    Ok(())
}

/// Remove the map and any markers still attached. Safe to call twice.
pub fn destroy_map(map_id: &str) {
    if let Err(e) = call_bridge("destroy", &[JsValue::from_str(map_id)]) {
        log::debug!("destroy_map: {}", e);
    }
}

/// Read a JS `[a, b]` pair of numbers.
pub(crate) fn number_pair(value: &JsValue) -> Option<(f64, f64)> {
    let pair: &Array = value.dyn_ref()?;
    Some((pair.get(0).as_f64()?, pair.get(1).as_f64()?))
}
