//! Cell-quantized collision
//!
//! Collision is 2D in the ground plane: two positions collide when their
//! ceil-rounded x and z match. Y is ignored. The test is discrete, so a probe
//! moving more than a cell per frame can step over a pickup.

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::settings::MazeSettings;

/// Ground-plane grid cell (ceil of x and z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn of(pos: Vec3) -> Self {
        Self {
            x: pos.x.ceil() as i32,
            z: pos.z.ceil() as i32,
        }
    }

    /// Cell of a beast after its X sway is applied
    #[inline]
    pub fn of_beast(pos: Vec3, offset_x: f32) -> Self {
        Self {
            x: (pos.x + offset_x).ceil() as i32,
            z: pos.z.ceil() as i32,
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

/// True when `a` and `b` quantize to the same ground cell
#[inline]
pub fn same_cell(a: Vec3, b: Vec3) -> bool {
    Cell::of(a) == Cell::of(b)
}

/// Snap the camera back inside the maze after the controller moved it
pub fn clamp_to_maze(camera: &mut PerspectiveCamera, half_extent: f32) {
    camera.position.x = camera.position.x.clamp(-half_extent, half_extent);
    camera.position.z = camera.position.z.clamp(-half_extent, half_extent);
}

/// Point where the avatar stands: ahead of the camera, pinned to the ground
pub fn probe(camera: &PerspectiveCamera, maze: &MazeSettings) -> Vec3 {
    let mut p = camera.position + camera.direction * maze.probe_lookahead;
    p.y = maze.ground_y;
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(x: f32, z: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::new(x, 1.0, z), Vec3::new(1.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn test_cell_uses_ceil() {
        assert_eq!(Cell::of(Vec3::new(4.2, 9.0, -0.5)), Cell::new(5, 0));
        assert_eq!(Cell::of(Vec3::new(5.0, 0.0, 5.0)), Cell::new(5, 5));
        assert_eq!(Cell::of(Vec3::new(-1.0, 0.0, -1.01)), Cell::new(-1, -1));
    }

    #[test]
    fn test_same_cell_ignores_y() {
        assert!(same_cell(Vec3::new(5.0, 0.0, 5.0), Vec3::new(4.5, -1.0, 4.1)));
        assert!(!same_cell(Vec3::new(5.0, 0.0, 5.0), Vec3::new(5.01, 0.0, 5.0)));
    }

    #[test]
    fn test_beast_cell_includes_offset() {
        assert_eq!(Cell::of_beast(Vec3::new(2.0, 0.0, 3.0), 2.5), Cell::new(5, 3));
    }

    #[test]
    fn test_clamp_positive_and_negative() {
        let mut cam = camera_at(50.0, 3.0);
        clamp_to_maze(&mut cam, 31.0);
        assert_eq!(cam.position.x, 31.0);
        assert_eq!(cam.position.z, 3.0);

        let mut cam = camera_at(-50.0, -40.0);
        clamp_to_maze(&mut cam, 31.0);
        assert_eq!(cam.position.x, -31.0);
        assert_eq!(cam.position.z, -31.0);
    }

    #[test]
    fn test_probe_lookahead_and_ground() {
        let cam = PerspectiveCamera::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 0.5, 2.0), 1.0);
        let p = probe(&cam, &MazeSettings::default());
        assert_eq!(p, Vec3::new(5.0, -1.0, 5.0));
    }
}
