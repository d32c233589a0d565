//! Renderer and movement tuning.
//!
//! Every field has a default, so a settings file only needs the values it
//! wants to change.

use std::{fs, io, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("bad settings file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fov range [{min}, {max}] is empty or outside (0, 180) degrees")]
    FovRange { min: f32, max: f32 },

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// World units per map unit.
    pub block_size: f32,
    /// Walls farther than this (world units) are not drawn; fog reaches 0 here.
    pub max_depth: f32,

    // === View ===
    pub fov_deg: f32,
    pub fov_min_deg: f32,
    pub fov_max_deg: f32,
    /// Floor/ceiling texture repeats per world unit.
    pub plane_scale: f32,
    /// Peak weight of the mirrored wall on the floor right below it.
    pub reflection: f32,
    pub background: [f32; 3],
    /// Draw the top-down debug map over the frame.
    pub show_map: bool,

    // === Movement ===
    /// radians / second
    pub turn_speed: f32,
    /// world units / second
    pub move_speed: f32,
    /// radians of FoV / second
    pub zoom_speed: f32,
    /// Closest the viewer may get to any wall, world units.
    pub collision_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_size: 8.0,
            max_depth: 60.0,

            fov_deg: 60.0,
            fov_min_deg: 20.0,
            fov_max_deg: 120.0,
            plane_scale: 0.5,
            reflection: 0.35,
            background: [0.0, 0.0, 0.0],
            show_map: false,

            turn_speed: 1.8,
            move_speed: 4.0,
            zoom_speed: 1.0,
            collision_radius: 2.0,
        }
    }
}

impl Settings {
    /// Read a JSON settings file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [
            ("block_size", self.block_size),
            ("max_depth", self.max_depth),
            ("collision_radius", self.collision_radius),
        ] {
            if !(v > 0.0) {
                return Err(ConfigError::NotPositive(name));
            }
        }
        let (min, max) = (self.fov_min_deg, self.fov_max_deg);
        if !(min > 0.0 && min <= max && max < 180.0) {
            return Err(ConfigError::FovRange { min, max });
        }
        Ok(())
    }

    /// Start FoV in radians, inside [`Settings::fov_range`].
    #[inline]
    pub fn fov(&self) -> f32 {
        let (min, max) = self.fov_range();
        self.fov_deg.to_radians().max(min).min(max)
    }

    /// `(min, max)` FoV in radians; an inverted pair is swapped.
    #[inline]
    pub fn fov_range(&self) -> (f32, f32) {
        let (a, b) = (self.fov_min_deg.to_radians(), self.fov_max_deg.to_radians());
        (a.min(b), a.max(b))
    }

    #[inline]
    pub fn background(&self) -> Vec3 {
        Vec3::from_array(self.background)
    }
}
