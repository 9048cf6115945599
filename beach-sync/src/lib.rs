//! Synchronizers that keep a map's visual layers consistent with `BeachState`.
//!
//! This crate provides:
//! - `viewport`: the slice of the base map the synchronizers depend on
//! - `heat`: heat point projection, rendering and the debounced `HeatOverlay`
//! - `markers`: the pure marker reconciler and the `MarkerSynchronizer` that
//!   applies its commands to a `MarkerLayer`
//! - `debounce`: at-most-one-pending deferred work over a `Scheduler`
//! - `derive`: heat points derived from the site list, cached by identity
//!
//! Everything talks to the browser through traits, so the reconciliation and
//! lifecycle rules are tested natively with recording fakes.

pub mod debounce;
pub mod derive;
pub mod heat;
pub mod markers;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use debounce::{Debouncer, Scheduler};
pub use derive::{heat_points, HeatPoint, HeatPointsCache};
pub use heat::{HeatOverlay, HeatSurface, HeatmapConfig};
pub use markers::{MarkerLayer, MarkerSynchronizer};
pub use viewport::{ContainerSize, MapViewport, PixelPoint, ViewportEvent};
