//! Application state managed via Dioxus context.
//!
//! `AppState` wraps the reducer-driven `BeachState` in a signal provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()` and change it only through [`AppState::dispatch`].

use beach_core::{reduce, BeachAction, BeachState, ReportKind, SiteId};
use chrono::Utc;
use dioxus::prelude::*;

/// Shared application state for the beach map.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Current snapshot; replaced wholesale on every action
    pub beach: Signal<BeachState>,
    /// Whether the Leaflet map and both layers are mounted
    pub map_ready: Signal<bool>,
}

impl AppState {
    /// Seed the state from the embedded beach list. A broken fixture leaves
    /// the site list empty and reports the problem in the banner.
    pub fn new() -> Self {
        let beach = match BeachState::seeded(Utc::now()) {
            Ok(state) => {
                log::info!("Loaded {} beaches", state.sites.len());
                state
            }
            Err(e) => {
                log::error!("Failed to load beach list: {}", e);
                BeachState {
                    error: Some(format!("Failed to load beach list: {}", e)),
                    ..BeachState::default()
                }
            }
        };
        Self {
            beach: Signal::new(beach),
            map_ready: Signal::new(false),
        }
    }

    /// Reduce `action` against the current snapshot and publish the result.
    pub fn dispatch(&mut self, action: BeachAction) {
        log::debug!("dispatch {:?}", action);
        let next = reduce(&self.beach.peek(), action);
        self.beach.set(next);
    }

    pub fn select_site(&mut self, id: impl Into<SiteId>) {
        self.dispatch(BeachAction::SelectSite(id.into()));
    }

    pub fn report_update(&mut self, site_id: impl Into<SiteId>, kind: ReportKind, description: Option<String>) {
        self.dispatch(BeachAction::report(site_id, kind, description, Utc::now()));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
