//! Loading spinner component.

use dioxus::prelude::*;

/// Centered notice shown while Leaflet and the map layers load.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); z-index: 1000; padding: 12px 20px; background: rgba(255, 255, 255, 0.9); border-radius: 4px; color: #666;",
            "Loading map..."
        }
    }
}
