use super::config::HeatmapConfig;
use super::gradient::Rgba;
use crate::viewport::ContainerSize;

/// A projected heat point in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// A rendered overlay, row-major straight-alpha RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl HeatFrame {
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = ((y * self.width + x) * 4) as usize;
        Rgba::new(self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3])
    }

    /// True when no pixel is visible.
    pub fn is_blank(&self) -> bool {
        self.rgba.chunks_exact(4).all(|px| px[3] == 0)
    }
}

/// Rasterizes heat samples.
///
/// Each sample stamps a radial alpha falloff weighted by `value / max_value`:
/// solid inside `radius * (1 - blur)`, fading linearly to zero at `radius`.
/// Stamps are composited source-over into an alpha buffer, and each pixel's
/// accumulated alpha then picks its color from the gradient palette. Output
/// alpha is clamped into `[min_opacity, max_opacity]`.
pub struct HeatRenderer {
    config: HeatmapConfig,
    palette: Vec<Rgba>,
}

impl HeatRenderer {
    pub fn new(config: HeatmapConfig) -> Self {
        let palette = config.gradient.palette();
        Self { config, palette }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn render(&self, samples: &[HeatSample], size: ContainerSize) -> HeatFrame {
        let width = size.width as usize;
        let height = size.height as usize;
        let alpha = self.accumulate(samples, width, height);

        let min_opacity = self.config.min_opacity.clamp(0.0, 1.0);
        let max_opacity = self.config.max_opacity.clamp(min_opacity, 1.0);
        let mut rgba = vec![0u8; width * height * 4];
        for (i, &a) in alpha.iter().enumerate() {
            if a <= 0.0 {
                continue;
            }
            let index = ((a as f64) * 255.0).round().clamp(0.0, 255.0) as usize;
            let color = self.palette[index];
            if color.a == 0 {
                continue;
            }
            let opacity = (a as f64).clamp(min_opacity, max_opacity) * (color.a as f64 / 255.0);
            let px = &mut rgba[i * 4..i * 4 + 4];
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = (opacity * 255.0).round() as u8;
        }

        HeatFrame {
            width: size.width,
            height: size.height,
            rgba,
        }
    }

    fn accumulate(&self, samples: &[HeatSample], width: usize, height: usize) -> Vec<f32> {
        let mut alpha = vec![0f32; width * height];
        if width == 0 || height == 0 {
            return alpha;
        }

        let radius = self.config.radius.max(1.0);
        let solid = radius * (1.0 - self.config.blur.clamp(0.0, 1.0));
        let max_value = self.config.max_value.max(f64::EPSILON);

        for sample in samples {
            if !(sample.x.is_finite() && sample.y.is_finite()) {
                continue;
            }
            let weight = (sample.value / max_value).clamp(0.0, 1.0);
            if weight <= 0.0 {
                continue;
            }

            let min_x = (sample.x - radius).floor().max(0.0) as i64;
            let max_x = (sample.x + radius).ceil().min(width as f64 - 1.0) as i64;
            let min_y = (sample.y - radius).floor().max(0.0) as i64;
            let max_y = (sample.y + radius).ceil().min(height as f64 - 1.0) as i64;

            for py in min_y..=max_y {
                for px in min_x..=max_x {
                    let distance = (px as f64 - sample.x).hypot(py as f64 - sample.y);
                    let falloff = if distance <= solid {
                        1.0
                    } else if distance >= radius {
                        continue;
                    } else {
                        (radius - distance) / (radius - solid)
                    };
                    let src = (falloff * weight) as f32;
                    let dst = &mut alpha[py as usize * width + px as usize];
                    *dst += src * (1.0 - *dst);
                }
            }
        }
        alpha
    }
}
