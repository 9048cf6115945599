//! One map marker per site, reconciled against the site list.
//!
//! `reconcile` is pure: it diffs the previous `MarkerPool` against the current
//! sites and returns the next pool plus the `MarkerCommand`s that bring the map
//! in line. `MarkerSynchronizer` owns the pool and applies those commands to a
//! `MarkerLayer`.

mod layer;
mod reconcile;

pub use layer::{apply_commands, MarkerLayer, MarkerSynchronizer, SelectHandler};
pub use reconcile::{popup_html, reconcile, MarkerCommand, MarkerPool, PooledMarker};
