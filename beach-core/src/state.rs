//! The immutable application snapshot produced by the reducer.

use crate::seed;
use crate::site::{Site, SiteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Snapshot of everything the map view renders.
///
/// Snapshots are never mutated; the reducer builds a new one per action.
/// `sites` is shared behind an `Rc` so actions that leave the site list alone
/// hand back the very same allocation, letting consumers skip work with
/// `Rc::ptr_eq`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeachState {
    /// Monitored beaches in display order.
    pub sites: Rc<Vec<Site>>,
    /// Lookup key into `sites`; may be empty or stale, see [`BeachState::selected_site`].
    pub selected_site_id: Option<SiteId>,
    pub is_loading: bool,
    /// Message for the error banner.
    pub error: Option<String>,
}

impl BeachState {
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            sites: Rc::new(sites),
            ..Self::default()
        }
    }

    /// Build the initial state from the embedded beach fixture.
    pub fn seeded(loaded_at: DateTime<Utc>) -> crate::Result<Self> {
        Ok(Self::new(seed::parse_sites(seed::SEED_CSV, loaded_at)?))
    }

    pub fn site(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id.as_str() == id)
    }

    /// The selected site, or `None` when the cursor is unset, empty, or points
    /// at an id that is not in the list.
    pub fn selected_site(&self) -> Option<&Site> {
        self.selected_site_id
            .as_ref()
            .filter(|id| !id.is_empty())
            .and_then(|id| self.site(id.as_str()))
    }
}
