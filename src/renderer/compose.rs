//! Dual-camera frame composition
//!
//! Builds a `FramePlan` from game state: a full-surface pass from the player
//! camera, then a scissored minimap pass from the top-down camera. Both passes
//! draw the same entity set in the same order. The plan is pure data; the GPU
//! backend only executes it.

use glam::{Mat4, Vec3};
use std::f32::consts::PI;

use crate::camera::Camera;
use crate::consts::KEY_POSITION;
use crate::facing_yaw;
use crate::settings::{DirectionalLight, MinimapAnchor, Settings};
use crate::sim::{GameState, beast_offset};

/// Meshes supplied by the asset loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Maze,
    Ground,
    Key,
    Coin,
    Health,
    Beast,
    Avatar,
}

impl MeshKind {
    pub const ALL: [MeshKind; 7] = [
        MeshKind::Maze,
        MeshKind::Ground,
        MeshKind::Key,
        MeshKind::Coin,
        MeshKind::Health,
        MeshKind::Beast,
        MeshKind::Avatar,
    ];
}

/// Textures supplied by the asset loader (ground is generated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Maze,
    Ground,
    Key,
    Coin,
    Health,
    Beast,
}

/// Shader program a draw binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// Sampled texture times tint
    Textured,
    /// Lit flat color
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub shininess: f32,
}

impl Material {
    /// Texture-only: lighting adds nothing
    pub const UNLIT: Material = Material {
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
        ambient: Vec3::ZERO,
        shininess: 2.0,
    };

    pub const AVATAR: Material = Material {
        diffuse: Vec3::splat(0.1),
        specular: Vec3::splat(0.3),
        ambient: Vec3::new(0.8, 0.7, 0.5),
        shininess: 2.0,
    };
}

/// One mesh draw with its own bindings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshKind,
    pub program: Program,
    pub texture: Option<TextureKind>,
    pub model: Mat4,
    pub tint: [f32; 4],
    pub material: Material,
}

impl DrawCall {
    fn textured(mesh: MeshKind, texture: TextureKind, model: Mat4) -> Self {
        Self {
            mesh,
            program: Program::Textured,
            texture: Some(texture),
            model,
            tint: [1.0; 4],
            material: Material::UNLIT,
        }
    }
}

/// Pixel rectangle, origin at the top-left of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Drawable surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.full_rect().aspect_ratio()
    }
}

/// Camera data bound for a whole pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassCamera {
    pub view_projection: Mat4,
    pub position: Vec3,
}

impl From<Camera<'_>> for PassCamera {
    fn from(camera: Camera<'_>) -> Self {
        Self {
            view_projection: camera.view_projection(),
            position: camera.position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub label: &'static str,
    pub viewport: Rect,
    pub scissor: Rect,
    /// Restrict writes (including the clear) to `scissor`
    pub scissor_test: bool,
    pub camera: PassCamera,
    pub draws: Vec<DrawCall>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: [f32; 4],
    pub light: DirectionalLight,
    pub passes: Vec<Pass>,
}

/// Compose the player view and the minimap into one frame
pub fn compose_frame(state: &GameState, settings: &Settings, surface: SurfaceSize) -> FramePlan {
    let draws = scene_draws(state, settings);
    let full = surface.full_rect();
    let minimap = minimap_rect(surface, settings.minimap.size, settings.minimap.anchor);

    let main_pass = Pass {
        label: "player",
        viewport: full,
        scissor: full,
        scissor_test: false,
        camera: Camera::Perspective(&state.player).into(),
        draws: draws.clone(),
    };
    let minimap_pass = Pass {
        label: "minimap",
        viewport: minimap,
        scissor: minimap,
        scissor_test: true,
        camera: Camera::Orthographic(&state.minimap).into(),
        draws,
    };

    FramePlan {
        clear_color: settings.render.clear_color,
        light: settings.render.light,
        passes: vec![main_pass, minimap_pass],
    }
}

/// Square minimap rectangle in a surface corner, clamped to the surface
pub fn minimap_rect(surface: SurfaceSize, size: u32, anchor: MinimapAnchor) -> Rect {
    let w = size.min(surface.width);
    let h = size.min(surface.height);
    let right = surface.width - w;
    let bottom = surface.height - h;
    match anchor {
        MinimapAnchor::TopLeft => Rect::new(0, 0, w, h),
        MinimapAnchor::TopRight => Rect::new(right, 0, w, h),
        MinimapAnchor::BottomLeft => Rect::new(0, bottom, w, h),
        MinimapAnchor::BottomRight => Rect::new(right, bottom, w, h),
    }
}

/// Translate, then rotate, then scale
#[inline]
fn instance(position: Vec3, rotation: Mat4, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * rotation * Mat4::from_scale(scale)
}

/// Every live entity, in draw order: maze, ground, key, coins, health
/// pickups, beasts, avatar
pub fn scene_draws(state: &GameState, settings: &Settings) -> Vec<DrawCall> {
    let level = &state.level;
    let mut draws = Vec::with_capacity(4 + level.coins().len() + level.health_pickups().len() + level.beasts().len());

    draws.push(DrawCall::textured(
        MeshKind::Maze,
        TextureKind::Maze,
        Mat4::from_scale(Vec3::splat(0.5)),
    ));

    draws.push(DrawCall {
        tint: [1.0, 0.0, 0.0, 1.0],
        ..DrawCall::textured(
            MeshKind::Ground,
            TextureKind::Ground,
            instance(Vec3::new(0.0, -2.0, 0.0), Mat4::IDENTITY, Vec3::new(100.0, 1.0, 100.0)),
        )
    });

    draws.push(DrawCall::textured(
        MeshKind::Key,
        TextureKind::Key,
        instance(
            Vec3::from_array(KEY_POSITION),
            Mat4::from_rotation_y(PI / 4.0 + PI),
            Vec3::splat(20.0),
        ),
    ));

    for pos in level.coins() {
        draws.push(DrawCall::textured(
            MeshKind::Coin,
            TextureKind::Coin,
            instance(*pos, Mat4::IDENTITY, Vec3::splat(5.0)),
        ));
    }

    for pos in level.health_pickups() {
        draws.push(DrawCall::textured(
            MeshKind::Health,
            TextureKind::Health,
            instance(*pos, Mat4::from_rotation_x(PI), Vec3::splat(10.0)),
        ));
    }

    let offset = beast_offset(state.time_ms, settings.beast.amplitude, settings.beast.period_ms);
    for pos in level.beasts() {
        draws.push(DrawCall::textured(
            MeshKind::Beast,
            TextureKind::Beast,
            Mat4::from_translation(*pos) * Mat4::from_translation(Vec3::new(offset, 0.0, 0.0)),
        ));
    }

    draws.push(DrawCall {
        mesh: MeshKind::Avatar,
        program: Program::Color,
        texture: None,
        model: Mat4::from_translation(state.probe) * Mat4::from_rotation_y(facing_yaw(state.player.direction)),
        tint: [0.0, 1.0, 1.0, 1.0],
        material: Material::AVATAR,
    });

    draws
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cell, EntityKind, FrameInput, Level, tick};

    fn state() -> (GameState, Settings) {
        let settings = Settings::default();
        let level = Level::from_positions(
            vec![Vec3::new(5.0, 0.0, 5.0), Vec3::new(-3.0, 0.0, 7.0)],
            vec![Vec3::new(10.0, 0.0, -2.0)],
            vec![Vec3::new(2.0, 0.0, 5.0)],
        );
        (GameState::new(level, &settings, 16.0 / 9.0), settings)
    }

    fn count(draws: &[DrawCall], mesh: MeshKind) -> usize {
        draws.iter().filter(|d| d.mesh == mesh).count()
    }

    #[test]
    fn test_two_passes() {
        let (state, settings) = state();
        let plan = compose_frame(&state, &settings, SurfaceSize::new(1280, 720));
        assert_eq!(plan.passes.len(), 2);

        let main = &plan.passes[0];
        assert_eq!(main.viewport, Rect::new(0, 0, 1280, 720));
        assert!(!main.scissor_test);
        assert_eq!(main.camera.view_projection, state.player.view_projection());

        let mini = &plan.passes[1];
        assert_eq!(mini.viewport, Rect::new(0, 0, 200, 200));
        assert_eq!(mini.scissor, mini.viewport);
        assert!(mini.scissor_test);
        assert_eq!(mini.camera.view_projection, state.minimap.view_projection());
        assert_eq!(main.draws, mini.draws);
        assert_eq!(plan.clear_color, [0.88, 0.65, 0.15, 1.0]);
    }

    #[test]
    fn test_draw_order_and_counts() {
        let (state, settings) = state();
        let draws = scene_draws(&state, &settings);
        let order: Vec<MeshKind> = draws.iter().map(|d| d.mesh).collect();
        assert_eq!(
            order,
            vec![
                MeshKind::Maze,
                MeshKind::Ground,
                MeshKind::Key,
                MeshKind::Coin,
                MeshKind::Coin,
                MeshKind::Health,
                MeshKind::Beast,
                MeshKind::Avatar,
            ]
        );
        assert_eq!(draws.last().map(|d| d.program), Some(Program::Color));
        assert!(draws[..draws.len() - 1].iter().all(|d| d.program == Program::Textured));
    }

    #[test]
    fn test_consumed_pickup_not_drawn() {
        let (mut state, settings) = state();
        state.player.direction = Vec3::X;
        state.player.position = Vec3::new(3.0, 1.0, 5.0);
        tick(&mut state, &FrameInput::default(), &settings);
        assert_eq!(state.level.len(EntityKind::Coin), 1);

        let draws = scene_draws(&state, &settings);
        assert_eq!(count(&draws, MeshKind::Coin), 1);
        let coin = draws.iter().find(|d| d.mesh == MeshKind::Coin).unwrap();
        assert_eq!(coin.model.w_axis.truncate(), Vec3::new(-3.0, 0.0, 7.0));
    }

    #[test]
    fn test_health_transform_order() {
        let (state, settings) = state();
        let draws = scene_draws(&state, &settings);
        let health = draws.iter().find(|d| d.mesh == MeshKind::Health).unwrap();
        // Scale 10, flip about X, then move to (10, 0, -2)
        let p = health.model.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(10.0, -10.0, -2.0), 1e-4));
    }

    #[test]
    fn test_ground_and_key_transforms() {
        let (state, settings) = state();
        let draws = scene_draws(&state, &settings);
        let ground = draws.iter().find(|d| d.mesh == MeshKind::Ground).unwrap();
        let p = ground.model.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(100.0, -1.0, 100.0), 1e-4));
        assert_eq!(ground.tint, [1.0, 0.0, 0.0, 1.0]);

        let key = draws.iter().find(|d| d.mesh == MeshKind::Key).unwrap();
        assert!(key.model.w_axis.truncate().abs_diff_eq(Vec3::new(29.7, -0.5, 31.0), 1e-5));
    }

    #[test]
    fn test_drawn_beast_matches_tested_cell() {
        let (mut state, settings) = state();
        state.player.direction = Vec3::X;
        state.player.position = Vec3::new(3.0, 1.0, 5.0);
        // Remove the coin under the probe first so only the beast matters
        tick(&mut state, &FrameInput::default(), &settings);
        let health_before = state.counters.health;

        let report = tick(
            &mut state,
            &FrameInput {
                dt_ms: 500.0,
                timer_finished: false,
            },
            &settings,
        );
        let draws = scene_draws(&state, &settings);
        let beast = draws.iter().find(|d| d.mesh == MeshKind::Beast).unwrap();
        let drawn = beast.model.w_axis.truncate();
        assert_eq!(Cell::of(drawn), Cell::of(state.probe));
        assert_eq!(report.health, health_before - 1);
    }

    #[test]
    fn test_avatar_faces_travel_direction() {
        let (mut state, settings) = state();
        state.player.direction = Vec3::new(0.0, 0.0, -1.0);
        state.probe = Vec3::new(1.0, -1.0, 2.0);
        let draws = scene_draws(&state, &settings);
        let avatar = draws.last().unwrap();
        let forward = avatar.model.transform_vector3(Vec3::Z);
        assert!(forward.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
        assert_eq!(avatar.model.w_axis.truncate(), Vec3::new(1.0, -1.0, 2.0));
        assert_eq!(avatar.material, Material::AVATAR);
    }

    #[test]
    fn test_minimap_anchors() {
        let s = SurfaceSize::new(800, 600);
        assert_eq!(minimap_rect(s, 200, MinimapAnchor::TopLeft), Rect::new(0, 0, 200, 200));
        assert_eq!(minimap_rect(s, 200, MinimapAnchor::TopRight), Rect::new(600, 0, 200, 200));
        assert_eq!(minimap_rect(s, 200, MinimapAnchor::BottomLeft), Rect::new(0, 400, 200, 200));
        assert_eq!(
            minimap_rect(s, 200, MinimapAnchor::BottomRight),
            Rect::new(600, 400, 200, 200)
        );
    }

    #[test]
    fn test_minimap_clamped_to_small_surface() {
        let s = SurfaceSize::new(150, 100);
        assert_eq!(minimap_rect(s, 200, MinimapAnchor::BottomRight), Rect::new(0, 0, 150, 100));
    }

    #[test]
    fn test_compose_is_repeatable() {
        let (state, settings) = state();
        let surface = SurfaceSize::new(1280, 720);
        let plan = compose_frame(&state, &settings, surface);
        assert_eq!(plan, compose_frame(&state, &settings, surface));
        assert_eq!(plan.light, settings.render.light);
    }
}
