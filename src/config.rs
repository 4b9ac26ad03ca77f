//! Startup configuration
//!
//! All knobs are fixed at construction: window size and title, the initial
//! view, how each click refines it, and the palette. Loaded from a JSON file
//! with sensible defaults when the file is absent.

use crate::color::Palette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Plane coordinate at the image center on startup
    pub center_re: f64,
    pub center_im: f64,
    /// Initial iteration budget
    pub iterations: u32,
    /// Added to the budget on every accepted click
    pub iteration_step: u32,
    /// Multiplies the zoom on every accepted click; must be > 1
    pub zoom_factor: f64,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            title: "Fractal Interactive".to_string(),
            center_re: -0.5,
            center_im: 0.0,
            iterations: 2000,
            iteration_step: 1000,
            zoom_factor: 5.0,
            palette: Palette::Gradient {
                dark: (0, 0, 0),
                light: (255, 255, 255),
                interior: (0, 0, 0),
            },
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let config: Self = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Reject values the viewer cannot start with.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "window dimensions must be nonzero: {}x{}",
                self.width, self.height
            ));
        }
        if self.iterations == 0 {
            return Err("iteration budget must be nonzero".to_string());
        }
        if self.iteration_step == 0 {
            return Err("iteration step must be nonzero".to_string());
        }
        if self.zoom_factor <= 1.0 {
            return Err(format!("zoom factor must be > 1, got {}", self.zoom_factor));
        }
        Ok(())
    }
}
