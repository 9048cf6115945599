/// Straight (non-premultiplied) 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const PINK: Rgba = Rgba::rgb(255, 192, 203);
    pub const LIGHT_RED: Rgba = Rgba::rgb(255, 102, 102);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const DARK_RED: Rgba = Rgba::rgb(139, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Normalized intensity in `[0, 1]` where this color starts.
    pub offset: f64,
    pub color: Rgba,
}

/// Intensity to color mapping.
///
/// Below the first stop nothing is drawn. Between stops colors are linearly
/// interpolated; at or above the last stop the last color is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        for stop in stops.iter_mut() {
            stop.offset = stop.offset.clamp(0.0, 1.0);
        }
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn color_at(&self, intensity: f64) -> Rgba {
        let t = intensity.clamp(0.0, 1.0);
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if t < first.offset {
            return Rgba::TRANSPARENT;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                if span <= f64::EPSILON {
                    return hi.color;
                }
                return lo.color.lerp(hi.color, (t - lo.offset) / span);
            }
        }
        last.color
    }

    /// 256-entry lookup table indexed by `round(intensity * 255)`.
    pub fn palette(&self) -> Vec<Rgba> {
        (0..256)
            .map(|i| self.color_at(i as f64 / 255.0))
            .collect()
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(vec![
            GradientStop { offset: 0.2, color: Rgba::PINK },
            GradientStop { offset: 0.4, color: Rgba::LIGHT_RED },
            GradientStop { offset: 0.7, color: Rgba::RED },
            GradientStop { offset: 1.0, color: Rgba::DARK_RED },
        ])
    }
}
