//! Core types and the pure pollution state engine.
//!
//! This crate provides:
//! - `site`: monitored beaches, pollution levels and their history entries
//! - `state`: the immutable `BeachState` snapshot
//! - `action` / `reducer`: the actions and the `(state, action) -> state` transition
//! - `seed`: the embedded beach fixture loaded at mount
//! - `format`: display helpers shared by popups and the control panel
//!
//! Nothing in here performs I/O or touches the browser, so every transition
//! can be unit tested and replayed natively.

pub mod action;
pub mod error;
pub mod format;
pub mod reducer;
pub mod seed;
pub mod site;
pub mod state;

pub use action::BeachAction;
pub use error::{BeachError, Result};
pub use reducer::{reduce, replay};
pub use site::{GeoPoint, PollutionLevel, PollutionUpdate, ReportKind, Site, SiteId};
pub use state::BeachState;
