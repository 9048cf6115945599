use super::gradient::Gradient;

/// Quiet period before a viewport change triggers a repaint.
pub const REPAINT_DEBOUNCE_MS: u32 = 200;

/// Heat overlay rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Radius of a single point's footprint, in pixels.
    pub radius: f64,
    /// Fraction of the radius that fades out; 0 is a hard disc, 1 fades from the center.
    pub blur: f64,
    /// Lower bound on the alpha of any painted pixel.
    pub min_opacity: f64,
    /// Upper bound on the alpha of any painted pixel.
    pub max_opacity: f64,
    /// Intensity rendered at full heat. Fixed so a pollution value always maps
    /// to the same color, whatever the current maximum across sites.
    pub max_value: f64,
    pub gradient: Gradient,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            blur: 0.75,
            min_opacity: 0.0,
            max_opacity: 0.5,
            max_value: 1.0,
            gradient: Gradient::default(),
        }
    }
}
