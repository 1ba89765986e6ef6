//! Cameras
//!
//! The simulation owns one player-controlled perspective camera and one fixed
//! orthographic minimap camera. Both expose a view-projection transform.

use glam::{Mat4, Vec3};

use crate::settings::Settings;

/// First-person camera driven by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// View direction; not required to be normalized
    pub direction: Vec3,
    /// Width / height
    pub aspect_ratio: f32,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, direction: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            direction,
            aspect_ratio,
            fov_y: std::f32::consts::FRAC_PI_2,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// Player camera at its configured start
    pub fn from_settings(settings: &Settings, aspect_ratio: f32) -> Self {
        Self {
            fov_y: settings.player.fov_y,
            ..Self::new(
                settings.player.start_position,
                settings.player.start_direction,
                aspect_ratio,
            )
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction.normalize_or(Vec3::NEG_Z), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Fixed top-down camera used for the minimap
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    /// World units covered vertically
    pub height: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthographicCamera {
    pub fn new(position: Vec3, direction: Vec3, up: Vec3, height: f32) -> Self {
        Self {
            position,
            direction,
            up,
            height,
            aspect_ratio: 1.0,
            near: 0.01,
            far: 1000.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let m = &settings.minimap;
        Self::new(m.camera_position, m.camera_direction, m.camera_up, m.camera_height)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction.normalize_or(Vec3::NEG_Y), self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half_h = self.height / 2.0;
        let half_w = half_h * self.aspect_ratio;
        Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Either camera variant, as consumed by the composer
#[derive(Debug, Clone, Copy)]
pub enum Camera<'a> {
    Perspective(&'a PerspectiveCamera),
    Orthographic(&'a OrthographicCamera),
}

impl Camera<'_> {
    pub fn position(&self) -> Vec3 {
        match self {
            Camera::Perspective(c) => c.position,
            Camera::Orthographic(c) => c.position,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        match self {
            Camera::Perspective(c) => c.view_projection(),
            Camera::Orthographic(c) => c.view_projection(),
        }
    }
}
