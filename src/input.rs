//! Camera controllers
//!
//! A controller moves the player camera from device-neutral input. The
//! simulation re-applies eye height and maze bounds afterwards, so
//! controllers are free to move in 3D.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::camera::PerspectiveCamera;
use crate::settings::PlayerSettings;

/// Keep pitch away from the poles so `look_to_rh` stays well defined
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Input for one frame, already decoded from keyboard/mouse
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Mouse movement in pixels since the last frame
    pub look_dx: f32,
    pub look_dy: f32,
}

impl ControllerInput {
    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Default::default()
        }
    }
}

pub trait CameraController {
    fn update(&mut self, camera: &mut PerspectiveCamera, input: &ControllerInput, dt_ms: f64);
}

/// Yaw around +Y, measured like `facing_yaw` (0 looks down +Z)
pub fn yaw_pitch(direction: Vec3) -> (f32, f32) {
    let dir = direction.normalize_or(Vec3::NEG_Z);
    let yaw = dir.x.atan2(dir.z);
    let pitch = dir.y.clamp(-1.0, 1.0).asin();
    (yaw, pitch)
}

pub fn direction_from(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(sy * cp, sp, cy * cp)
}

/// Mouse-look plus WASD translation along the view direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyController {
    /// Units per millisecond
    pub move_speed: f32,
    /// Radians per pixel
    pub look_sensitivity: f32,
}

impl FlyController {
    pub fn new(move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            move_speed,
            look_sensitivity,
        }
    }

    pub fn from_settings(player: &PlayerSettings) -> Self {
        Self::new(player.move_speed, player.look_sensitivity)
    }
}

impl Default for FlyController {
    fn default() -> Self {
        Self::from_settings(&PlayerSettings::default())
    }
}

impl CameraController for FlyController {
    fn update(&mut self, camera: &mut PerspectiveCamera, input: &ControllerInput, dt_ms: f64) {
        if input.look_dx != 0.0 || input.look_dy != 0.0 {
            let (yaw, pitch) = yaw_pitch(camera.direction);
            let yaw = yaw - input.look_dx * self.look_sensitivity;
            let pitch = (pitch - input.look_dy * self.look_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
            camera.direction = direction_from(yaw, pitch);
        }

        let forward = camera.direction.normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let mut motion = Vec3::ZERO;
        if input.forward {
            motion += forward;
        }
        if input.back {
            motion -= forward;
        }
        if input.right {
            motion += right;
        }
        if input.left {
            motion -= right;
        }
        let step = self.move_speed * dt_ms as f32;
        camera.position += motion.normalize_or_zero() * step;
    }
}

/// Replays a fixed input sequence, one entry per frame, then idles
#[derive(Debug, Clone)]
pub struct ScriptedController {
    inputs: Vec<ControllerInput>,
    cursor: usize,
    fly: FlyController,
}

impl ScriptedController {
    pub fn new(inputs: Vec<ControllerInput>, fly: FlyController) -> Self {
        Self {
            inputs,
            cursor: 0,
            fly,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.inputs.len()
    }
}

impl CameraController for ScriptedController {
    fn update(&mut self, camera: &mut PerspectiveCamera, _input: &ControllerInput, dt_ms: f64) {
        let Some(scripted) = self.inputs.get(self.cursor).copied() else {
            return;
        };
        self.cursor += 1;
        self.fly.update(camera, &scripted, dt_ms);
    }
}

/// Headless wanderer: walks forward and periodically picks a new heading.
///
/// Headings come from a seeded `Pcg32`, so two runs with the same seed and
/// frame times trace the same path.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fly: FlyController,
    target_yaw: f32,
    /// Time left before picking a new heading
    retarget_in_ms: f64,
    /// Max turn per millisecond
    turn_rate: f32,
}

impl Autopilot {
    const RETARGET_MIN_MS: f64 = 500.0;
    const RETARGET_MAX_MS: f64 = 3000.0;

    pub fn new(seed: u64, fly: FlyController) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fly,
            target_yaw: 0.0,
            retarget_in_ms: 0.0,
            turn_rate: 0.003,
        }
    }
}

impl CameraController for Autopilot {
    fn update(&mut self, camera: &mut PerspectiveCamera, _input: &ControllerInput, dt_ms: f64) {
        self.retarget_in_ms -= dt_ms;
        if self.retarget_in_ms <= 0.0 {
            self.target_yaw = self.rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
            self.retarget_in_ms = self
                .rng
                .random_range(Self::RETARGET_MIN_MS..Self::RETARGET_MAX_MS);
            log::trace!("Autopilot heading {:.2} rad", self.target_yaw);
        }

        let (yaw, _) = yaw_pitch(camera.direction);
        // Shortest signed angle to the target heading
        let delta = (self.target_yaw - yaw + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU)
            - std::f32::consts::PI;
        let max_turn = self.turn_rate * dt_ms as f32;
        let turn = delta.clamp(-max_turn, max_turn);
        camera.direction = direction_from(yaw + turn, 0.0);

        self.fly.update(camera, &ControllerInput::forward(), dt_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 1.0)
    }

    #[test]
    fn test_yaw_pitch_roundtrip_axes() {
        for dir in [Vec3::Z, Vec3::X, Vec3::NEG_Z, Vec3::new(1.0, 0.5, -2.0).normalize()] {
            let (yaw, pitch) = yaw_pitch(dir);
            assert!(direction_from(yaw, pitch).abs_diff_eq(dir, 1e-5), "{dir}");
        }
    }

    #[test]
    fn test_fly_forward_moves_along_view() {
        let mut cam = camera();
        let mut fly = FlyController::new(0.01, 0.002);
        fly.update(&mut cam, &ControllerInput::forward(), 100.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 1.0, -1.0), 1e-5));
    }

    #[test]
    fn test_fly_strafe_right() {
        let mut cam = camera();
        let mut fly = FlyController::new(0.01, 0.002);
        let input = ControllerInput {
            right: true,
            ..Default::default()
        };
        fly.update(&mut cam, &input, 100.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5));
    }

    #[test]
    fn test_fly_opposing_keys_cancel() {
        let mut cam = camera();
        let mut fly = FlyController::default();
        let input = ControllerInput {
            forward: true,
            back: true,
            ..Default::default()
        };
        fly.update(&mut cam, &input, 100.0);
        assert_eq!(cam.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_fly_mouse_right_turns_right() {
        let mut cam = camera();
        let mut fly = FlyController::new(0.01, 0.002);
        let input = ControllerInput {
            look_dx: 100.0,
            ..Default::default()
        };
        fly.update(&mut cam, &input, 16.0);
        // Looking down -Z, right is +X
        assert!(cam.direction.x > 0.0);
        assert!((cam.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fly_pitch_is_clamped() {
        let mut cam = camera();
        let mut fly = FlyController::new(0.01, 1.0);
        let input = ControllerInput {
            look_dy: -10.0,
            ..Default::default()
        };
        fly.update(&mut cam, &input, 16.0);
        let (_, pitch) = yaw_pitch(cam.direction);
        assert!(pitch <= MAX_PITCH + 1e-5);
        assert!(cam.direction.y < 1.0);
    }

    #[test]
    fn test_scripted_replays_then_idles() {
        let mut cam = camera();
        let mut script = ScriptedController::new(
            vec![ControllerInput::forward(), ControllerInput::forward()],
            FlyController::new(0.01, 0.002),
        );
        for _ in 0..5 {
            script.update(&mut cam, &ControllerInput::default(), 100.0);
        }
        assert!(script.is_finished());
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 1.0, -2.0), 1e-5));
    }

    #[test]
    fn test_autopilot_is_deterministic() {
        let run = |seed| {
            let mut cam = camera();
            let mut pilot = Autopilot::new(seed, FlyController::default());
            for _ in 0..300 {
                pilot.update(&mut cam, &ControllerInput::default(), 16.0);
            }
            cam.position
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn test_autopilot_keeps_walking() {
        let mut cam = camera();
        let mut pilot = Autopilot::new(1, FlyController::new(0.01, 0.002));
        pilot.update(&mut cam, &ControllerInput::default(), 100.0);
        let moved = (cam.position - Vec3::new(0.0, 1.0, 0.0)).length();
        assert!((moved - 1.0).abs() < 1e-4);
        assert!(cam.direction.y.abs() < 1e-6);
    }
}
