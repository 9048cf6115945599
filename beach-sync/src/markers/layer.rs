use super::reconcile::{reconcile, MarkerCommand, MarkerPool};
use beach_core::{GeoPoint, Site, SiteId};
use log::{debug, info};
use std::rc::Rc;

/// Called with the site id when its marker is clicked.
pub type SelectHandler = Rc<dyn Fn(SiteId)>;

/// Marker and popup primitives of the base map.
pub trait MarkerLayer {
    /// Add a marker at `at` and call `on_click` when it is clicked.
    fn add_marker(&mut self, id: &SiteId, at: GeoPoint, on_click: SelectHandler);
    fn remove_marker(&mut self, id: &SiteId);
    fn bind_popup(&mut self, id: &SiteId, html: &str);
    fn is_popup_open(&self, id: &SiteId) -> bool;
    /// Replace the content of the currently open popup without closing it.
    fn set_open_popup_content(&mut self, id: &SiteId, html: &str);
}

/// Apply reconcile output to `layer`.
pub fn apply_commands<L: MarkerLayer>(layer: &mut L, commands: &[MarkerCommand], on_select: &SelectHandler) {
    for command in commands {
        match command {
            MarkerCommand::Create { id, at } => layer.add_marker(id, *at, on_select.clone()),
            MarkerCommand::UpdateContent { id, html } => {
                if layer.is_popup_open(id) {
                    layer.set_open_popup_content(id, html);
                } else {
                    layer.bind_popup(id, html);
                }
            }
            MarkerCommand::Remove { id } => layer.remove_marker(id),
        }
    }
}

/// Owns the live marker pool for one map.
///
/// Dropping the synchronizer removes every marker it created.
pub struct MarkerSynchronizer<L: MarkerLayer> {
    layer: L,
    pool: MarkerPool,
    on_select: SelectHandler,
}

impl<L: MarkerLayer> MarkerSynchronizer<L> {
    pub fn new(layer: L, on_select: SelectHandler) -> Self {
        Self {
            layer,
            pool: MarkerPool::default(),
            on_select,
        }
    }

    /// Reconcile against `sites`. Returns the number of commands applied.
    pub fn sync(&mut self, sites: &[Site]) -> usize {
        let (pool, commands) = reconcile(&self.pool, sites);
        apply_commands(&mut self.layer, &commands, &self.on_select);
        self.pool = pool;
        debug!("Marker sync applied {} commands", commands.len());
        commands.len()
    }

    pub fn pool(&self) -> &MarkerPool {
        &self.pool
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    /// Remove every pooled marker from the map and empty the pool.
    pub fn teardown(&mut self) {
        if self.pool.is_empty() {
            return;
        }
        let pool = std::mem::take(&mut self.pool);
        for id in pool.ids() {
            self.layer.remove_marker(id);
        }
        info!("Removed {} markers", pool.len());
    }
}

impl<L: MarkerLayer> Drop for MarkerSynchronizer<L> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{LayerOp, RecordingLayer};
    use beach_core::{reduce, BeachAction, BeachState, ReportKind};
    use chrono::Utc;
    use std::cell::RefCell;

    fn state() -> BeachState {
        BeachState::new(vec![
            Site::new("juhu", "Juhu Beach", GeoPoint::new(19.100, 72.830), 0.7, Utc::now()),
            Site::new("aksa", "Aksa Beach", GeoPoint::new(19.176, 72.795), 0.5, Utc::now()),
        ])
    }

    fn synchronizer() -> (MarkerSynchronizer<RecordingLayer>, Rc<RefCell<Vec<SiteId>>>) {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        let handler: SelectHandler = Rc::new(move |id| sink.borrow_mut().push(id));
        (MarkerSynchronizer::new(RecordingLayer::default(), handler), clicks)
    }

    #[test]
    fn test_sync_creates_markers_with_popups() {
        let (mut sync, _) = synchronizer();
        let s = state();
        assert_eq!(sync.sync(&s.sites), 4);
        assert_eq!(sync.layer().marker_count(), 2);
        let ops = sync.layer_mut().take_ops();
        assert_eq!(ops[0], LayerOp::Add("juhu".into()));
        assert!(matches!(&ops[1], LayerOp::Bind(id, html) if id == "juhu" && html.contains("Juhu Beach")));
        assert_eq!(sync.layer().position("aksa"), Some(GeoPoint::new(19.176, 72.795)));
    }

    #[test]
    fn test_second_sync_is_a_noop() {
        let (mut sync, _) = synchronizer();
        let s = state();
        sync.sync(&s.sites);
        sync.layer_mut().take_ops();
        assert_eq!(sync.sync(&s.sites), 0);
        assert!(sync.layer_mut().take_ops().is_empty());
    }

    #[test]
    fn test_open_popup_updated_in_place() {
        let (mut sync, _) = synchronizer();
        let s = state();
        sync.sync(&s.sites);
        sync.layer_mut().take_ops();
        sync.layer_mut().open_popup("juhu");

        let next = reduce(&s, BeachAction::report("juhu", ReportKind::Cleanup, None, Utc::now()));
        sync.sync(&next.sites);
        let ops = sync.layer_mut().take_ops();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], LayerOp::SetOpen(id, html) if id == "juhu" && html.contains("60%")));
    }

    #[test]
    fn test_marker_click_emits_selection() {
        let (mut sync, clicks) = synchronizer();
        sync.sync(&state().sites);
        sync.layer().click("aksa");
        assert_eq!(*clicks.borrow(), vec![SiteId::from("aksa")]);
    }

    #[test]
    fn test_teardown_removes_all_markers() {
        let (mut sync, _) = synchronizer();
        sync.sync(&state().sites);
        sync.layer_mut().take_ops();
        sync.teardown();
        assert_eq!(sync.layer().marker_count(), 0);
        assert!(sync.pool().is_empty());
        let ops = sync.layer_mut().take_ops();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(op, LayerOp::Remove(_))));

        sync.teardown();
        assert!(sync.layer_mut().take_ops().is_empty());
    }

    #[test]
    fn test_resync_after_teardown_recreates() {
        let (mut sync, _) = synchronizer();
        let s = state();
        sync.sync(&s.sites);
        sync.teardown();
        sync.layer_mut().take_ops();
        assert_eq!(sync.sync(&s.sites), 4);
        assert_eq!(sync.layer().marker_count(), 2);
    }
}
