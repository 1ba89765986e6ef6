//! Game settings and tuning
//!
//! Every gameplay constant the simulation and composer consume lives here, so
//! a level pack can ship its own balance as JSON. Defaults match `consts`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SceneError};

/// How beast contact damages the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactDamage {
    /// One point per beast for every frame the probe shares its cell
    #[default]
    EveryFrame,
    /// One point per beast each time the probe enters its cell
    OncePerEntry,
}

/// Screen corner the minimap is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MinimapAnchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl MinimapAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinimapAnchor::TopLeft => "top-left",
            MinimapAnchor::TopRight => "top-right",
            MinimapAnchor::BottomLeft => "bottom-left",
            MinimapAnchor::BottomRight => "bottom-right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top-left" | "tl" => Some(MinimapAnchor::TopLeft),
            "top-right" | "tr" => Some(MinimapAnchor::TopRight),
            "bottom-left" | "bl" => Some(MinimapAnchor::BottomLeft),
            "bottom-right" | "br" => Some(MinimapAnchor::BottomRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    /// Player x/z are clamped to [-half_extent, half_extent]
    pub half_extent: f32,
    pub eye_height: f32,
    /// Height the probe is pinned to
    pub ground_y: f32,
    pub probe_lookahead: f32,
    pub goal_cell: (i32, i32),
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            half_extent: MAZE_HALF_EXTENT,
            eye_height: EYE_HEIGHT,
            ground_y: GROUND_Y,
            probe_lookahead: PROBE_LOOKAHEAD,
            goal_cell: GOAL_CELL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub start_health: u32,
    pub start_position: Vec3,
    pub start_direction: Vec3,
    /// Units per millisecond
    pub move_speed: f32,
    /// Radians per pixel
    pub look_sensitivity: f32,
    /// Vertical field of view (radians)
    pub fov_y: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            start_health: START_HEALTH,
            start_position: Vec3::from_array(PLAYER_START_POSITION),
            start_direction: Vec3::from_array(PLAYER_START_DIRECTION),
            move_speed: MOVE_SPEED,
            look_sensitivity: LOOK_SENSITIVITY,
            fov_y: std::f32::consts::FRAC_PI_2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeastSettings {
    pub amplitude: f32,
    pub period_ms: f64,
    pub contact: ContactDamage,
}

impl Default for BeastSettings {
    fn default() -> Self {
        Self {
            amplitude: BEAST_AMPLITUDE,
            period_ms: BEAST_PERIOD_MS,
            contact: ContactDamage::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapSettings {
    /// Edge length of the square minimap viewport (pixels)
    pub size: u32,
    pub anchor: MinimapAnchor,
    pub camera_position: Vec3,
    pub camera_direction: Vec3,
    pub camera_up: Vec3,
    /// World units covered vertically by the orthographic view
    pub camera_height: f32,
}

impl Default for MinimapSettings {
    fn default() -> Self {
        Self {
            size: MINIMAP_SIZE,
            anchor: MinimapAnchor::TopLeft,
            camera_position: Vec3::from_array(MINIMAP_CAMERA_POSITION),
            camera_direction: Vec3::NEG_Y,
            camera_up: Vec3::X,
            camera_height: MINIMAP_CAMERA_HEIGHT,
        }
    }
}

/// Single directional light sent to both programs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(0.5),
            ambient: Vec3::ONE,
            direction: Vec3::NEG_Y,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub clear_color: [f32; 4],
    pub light: DirectionalLight,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.88, 0.65, 0.15, 1.0],
            light: DirectionalLight::default(),
        }
    }
}

/// All tunable settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub maze: MazeSettings,
    pub player: PlayerSettings,
    pub beast: BeastSettings,
    pub minimap: MinimapSettings,
    pub render: RenderSettings,
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.player.start_health == 0 {
            return Err(SceneError::InvalidConfig(
                "player.start_health must be positive".into(),
            ));
        }
        if self.beast.period_ms.is_nan() || self.beast.period_ms <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "beast.period_ms must be positive".into(),
            ));
        }
        if self.maze.half_extent.is_nan() || self.maze.half_extent <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "maze.half_extent must be positive".into(),
            ));
        }
        if self.minimap.size == 0 {
            return Err(SceneError::InvalidConfig("minimap.size must be non-zero".into()));
        }
        if self.minimap.camera_height.is_nan() || self.minimap.camera_height <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "minimap.camera_height must be positive".into(),
            ));
        }
        Ok(())
    }
}
