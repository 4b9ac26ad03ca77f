//! Iteration-count-to-color mapping
//!
//! Pure per-pixel shading: a sample that exhausted the iteration budget is
//! interior and gets the interior color; everything else is shaded by how
//! quickly it escaped. Two strategies, selected by configuration.

use serde::{Deserialize, Serialize};

/// Shading strategy applied to every field sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Palette {
    /// Gray level proportional to the iteration count; interior is black.
    Grayscale,
    /// Per-channel interpolation from `dark` to `light` driven by the
    /// engine's smoothed hue; interior points get `interior`.
    Gradient {
        dark: (u8, u8, u8),
        light: (u8, u8, u8),
        interior: (u8, u8, u8),
    },
}

impl Palette {
    /// Shade one sample. `count` is the pixel's iteration count, `hue` the
    /// engine's normalized smooth value, `budget` the current iteration cap.
    ///
    /// Deterministic and position-independent; out-of-range hues are clamped
    /// so the result is always a valid 8-bit color.
    pub fn shade(&self, count: u32, hue: f64, budget: u32) -> (u8, u8, u8) {
        match *self {
            Self::Grayscale => {
                if count >= budget {
                    return (0, 0, 0);
                }
                let level = (f64::from(count) / f64::from(budget) * 255.0).round() as u8;
                (level, level, level)
            },
            Self::Gradient {
                dark,
                light,
                interior,
            } => {
                if count >= budget {
                    return interior;
                }
                let h = hue.clamp(0.0, 1.0);
                (
                    lerp_channel(dark.0, light.0, h),
                    lerp_channel(dark.1, light.1, h),
                    lerp_channel(dark.2, light.2, h),
                )
            },
        }
    }
}

/// Interpolate one color channel, rounding to the nearest step.
#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
        .round()
        .clamp(0.0, 255.0) as u8
}
