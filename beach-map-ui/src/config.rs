//! Map configuration.

use beach_core::GeoPoint;
use beach_sync::HeatmapConfig;
use serde::Serialize;

/// DOM id of the Leaflet container div.
pub const MAP_CONTAINER_ID: &str = "beach-map";

/// How many entries the control panel lists under "Recent Updates".
pub const RECENT_UPDATES: usize = 3;

/// Base map options. Serialized to JSON and handed to the Leaflet bridge;
/// `heatmap` stays on the Rust side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub center: GeoPoint,
    pub zoom: u8,
    pub zoom_control: bool,
    pub tile_url: String,
    pub attribution: String,
    #[serde(skip)]
    pub heatmap: HeatmapConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Mumbai
            center: GeoPoint::new(19.0760, 72.8777),
            zoom: 12,
            zoom_control: false,
            tile_url: "https://cartodb-basemaps-{s}.global.ssl.fastly.net/light_all/{z}/{x}/{y}.png"
                .to_string(),
            attribution: "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, &copy; <a href=\"http://cartodb.com/attributions\">CartoDB</a>"
                .to_string(),
            heatmap: HeatmapConfig::default(),
        }
    }
}
