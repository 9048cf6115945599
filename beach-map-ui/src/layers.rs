//! The two synchronized layers of one mounted map.

use crate::canvas::CanvasSurface;
use crate::config::MapConfig;
use crate::js_bridge;
use crate::leaflet::{LeafletMarkers, LeafletViewport};
use crate::timer::BrowserScheduler;
use beach_core::Site;
use beach_sync::markers::SelectHandler;
use beach_sync::{HeatOverlay, HeatPoint, MarkerSynchronizer};
use std::rc::Rc;

pub type WebHeatOverlay = HeatOverlay<LeafletViewport, CanvasSurface, BrowserScheduler>;

/// Heat overlay and marker pool bound to a Leaflet map.
///
/// Dropping it releases both layers (listeners, pending repaint, canvas,
/// markers and click closures) but leaves the map itself alone; pair it with
/// [`js_bridge::destroy_map`].
pub struct MapLayers {
    // Declared first so it drops before the markers.
    heat: WebHeatOverlay,
    markers: MarkerSynchronizer<LeafletMarkers>,
}

impl MapLayers {
    /// Create the Leaflet map in `map_id` and activate both synchronizers.
    ///
    /// Requires [`js_bridge::bridge_ready`].
    pub fn mount(map_id: &str, config: &MapConfig, on_select: SelectHandler) -> anyhow::Result<Self> {
        js_bridge::create_map(map_id, config)?;
        let viewport = Rc::new(LeafletViewport::attach(map_id)?);
        let surface = CanvasSurface::mount(map_id)?;
        let heat = HeatOverlay::activate(viewport, surface, BrowserScheduler, config.heatmap.clone());
        let markers = MarkerSynchronizer::new(LeafletMarkers::new(map_id), on_select);
        log::info!("Map layers mounted in #{}", map_id);
        Ok(Self { heat, markers })
    }

    pub fn set_heat_points(&self, points: Rc<[HeatPoint]>) {
        self.heat.set_points(points);
    }

    pub fn sync_markers(&mut self, sites: &[Site]) {
        self.markers.sync(sites);
    }
}
