use beach_core::format::{display_timestamp, escape_html};
use beach_core::{GeoPoint, Site, SiteId};
use log::warn;
use std::collections::BTreeMap;

/// What the synchronizer knows about a marker already on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct PooledMarker {
    /// Position it was created at.
    pub at: GeoPoint,
    /// Popup HTML last bound to it.
    pub popup: String,
}

/// Live markers keyed by site identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerPool {
    entries: BTreeMap<SiteId, PooledMarker>,
}

impl MarkerPool {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PooledMarker> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &SiteId> {
        self.entries.keys()
    }
}

/// A change to apply to the map's marker layer.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerCommand {
    /// Add a marker and wire its click to site selection.
    Create { id: SiteId, at: GeoPoint },
    /// Replace the popup content, in place if the popup is open.
    UpdateContent { id: SiteId, html: String },
    /// Take the marker off the map.
    Remove { id: SiteId },
}

/// Popup HTML for a site: name, integer percent and last update time.
pub fn popup_html(site: &Site) -> String {
    format!(
        "<div><b>{}</b><br/>Pollution level: {}%<br/>Last updated: {}</div>",
        escape_html(&site.name),
        site.pollution.percent(),
        display_timestamp(&site.last_updated),
    )
}

/// Diff `previous` against `sites`.
///
/// Existing markers are reused as-is (never recreated, never moved); content
/// updates are emitted only when the popup HTML changed, and markers whose
/// site is gone are removed. Calling it again with the returned pool and the
/// same sites yields no commands.
pub fn reconcile(previous: &MarkerPool, sites: &[Site]) -> (MarkerPool, Vec<MarkerCommand>) {
    let mut next = MarkerPool::default();
    let mut commands = Vec::new();

    for site in sites {
        if next.entries.contains_key(&site.id) {
            warn!("Duplicate site id '{}' in marker reconcile, skipping", site.id);
            continue;
        }

        let html = popup_html(site);
        let entry = match previous.entries.get(&site.id) {
            Some(existing) => {
                if existing.popup != html {
                    commands.push(MarkerCommand::UpdateContent {
                        id: site.id.clone(),
                        html: html.clone(),
                    });
                }
                PooledMarker {
                    at: existing.at,
                    popup: html,
                }
            }
            None => {
                commands.push(MarkerCommand::Create {
                    id: site.id.clone(),
                    at: site.at,
                });
                commands.push(MarkerCommand::UpdateContent {
                    id: site.id.clone(),
                    html: html.clone(),
                });
                PooledMarker { at: site.at, popup: html }
            }
        };
        next.entries.insert(site.id.clone(), entry);
    }

    for id in previous.entries.keys() {
        if !next.entries.contains_key(id) {
            commands.push(MarkerCommand::Remove { id: id.clone() });
        }
    }

    (next, commands)
}
