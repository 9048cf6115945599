//! Browser side of the beach pollution map.
//!
//! This crate provides:
//! - `js_bridge`: loads Leaflet and the `window.beachMap` helper, and calls into it
//! - `leaflet`: `MapViewport` and `MarkerLayer` backed by the bridge
//! - `canvas`: the `HeatSurface` canvas stacked over the map
//! - `timer`: `setTimeout` scheduler for the debounce and an async sleep
//! - `layers`: acquires and releases both synchronizers for one map
//! - `state`: reactive `AppState` holding the reducer-driven `BeachState`
//! - `components`: map view, control panel, error banner and spinner

pub mod canvas;
pub mod components;
pub mod config;
pub mod js_bridge;
pub mod layers;
pub mod leaflet;
pub mod state;
pub mod timer;
