//! Maze Runner - a first-person maze game with a top-down minimap
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level store, pickups, hazards, outcome)
//! - `camera`: Perspective and orthographic cameras shared by sim and renderer
//! - `renderer`: Dual-camera frame composition and the WebGPU backend
//! - `input`: Camera controllers (fly, scripted, autopilot)
//! - `ui`: Presentation collaborators (HUD text, optional parameter controls)
//! - `settings`: Data-driven tuning

pub mod camera;
pub mod error;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use camera::{Camera, OrthographicCamera, PerspectiveCamera};
pub use error::{Result, SceneError};
pub use session::Session;
pub use settings::Settings;

/// Default gameplay constants
pub mod consts {
    /// Maze half-extent; the player is clamped to [-31, 31] on x and z
    pub const MAZE_HALF_EXTENT: f32 = 31.0;
    /// Camera eye height, re-applied every frame
    pub const EYE_HEIGHT: f32 = 1.0;
    /// Ground plane height the probe is pinned to
    pub const GROUND_Y: f32 = -1.0;
    /// Distance ahead of the camera where the avatar stands
    pub const PROBE_LOOKAHEAD: f32 = 2.0;
    /// Goal cell (x, z) after ceil quantization
    pub const GOAL_CELL: (i32, i32) = (30, 31);

    /// Player defaults
    pub const START_HEALTH: u32 = 10;
    pub const PLAYER_START_POSITION: [f32; 3] = [0.0, 2.0, 0.0];
    pub const PLAYER_START_DIRECTION: [f32; 3] = [-1.0, 0.0, -2.0];
    /// Units per millisecond
    pub const MOVE_SPEED: f32 = 0.01;
    /// Radians per pixel of mouse movement
    pub const LOOK_SENSITIVITY: f32 = 0.002;

    /// Beast sway along X
    pub const BEAST_AMPLITUDE: f32 = 5.0;
    pub const BEAST_PERIOD_MS: f64 = 1000.0;

    /// Minimap viewport edge in pixels
    pub const MINIMAP_SIZE: u32 = 200;
    pub const MINIMAP_CAMERA_POSITION: [f32; 3] = [0.0, 30.0, 0.0];
    pub const MINIMAP_CAMERA_HEIGHT: f32 = 60.0;

    /// Fixed goal key placement
    pub const KEY_POSITION: [f32; 3] = [29.7, -0.5, 31.0];
}

/// Facing angle around +Y for a horizontal direction.
///
/// Uses `atan(x / z)` with a half-turn correction when `z` is negative so the
/// avatar never flips while walking. A zero horizontal direction yields 0.
#[inline]
pub fn facing_yaw(direction: glam::Vec3) -> f32 {
    if direction.x == 0.0 && direction.z == 0.0 {
        return 0.0;
    }
    let yaw = (direction.x / direction.z).atan();
    if direction.z < 0.0 {
        std::f32::consts::PI + yaw
    } else {
        yaw
    }
}
