//! Heat overlay: a canvas-style intensity field drawn over the map.
//!
//! Data flow:
//! 1. `set_points` stores the latest `HeatPoint`s and repaints at once.
//! 2. Each repaint projects points to container pixels through `MapViewport`.
//! 3. `HeatRenderer` turns the pixel samples into an RGBA `HeatFrame`.
//! 4. The frame is handed to the `HeatSurface` (a canvas in the browser).
//!
//! Viewport events only schedule a repaint through the overlay's `Debouncer`.

mod config;
mod gradient;
mod overlay;
mod render;

pub use config::{HeatmapConfig, REPAINT_DEBOUNCE_MS};
pub use gradient::{Gradient, GradientStop, Rgba};
pub use overlay::{HeatOverlay, HeatSurface};
pub use render::{HeatFrame, HeatRenderer, HeatSample};
