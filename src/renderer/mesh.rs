//! Placeholder geometry
//!
//! Model files come from an external asset loader. These primitives stand in
//! for them when nothing has been loaded, so a scene is still visible.

use glam::Vec3;

use super::compose::MeshKind;
use super::vertex::MeshVertex;

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append a square face centred at `center`; `u x v` is the outward normal
    fn push_face(&mut self, center: Vec3, u: Vec3, v: Vec3, half: f32, uv_scale: f32) {
        let normal = u.cross(v).normalize_or_zero();
        let base = self.vertices.len() as u32;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (su, sv) in corners {
            let p = center + (u * su + v * sv) * half;
            let tex = [(su + 1.0) * 0.5 * uv_scale, (sv + 1.0) * 0.5 * uv_scale];
            self.vertices.push(MeshVertex::new(p.to_array(), tex, normal.to_array()));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Horizontal square at y = 0 facing +Y, texture repeated `repeat` times
pub fn plane(half: f32, repeat: f32) -> MeshData {
    let mut mesh = MeshData::default();
    mesh.push_face(Vec3::ZERO, Vec3::Z, Vec3::X, half, repeat);
    mesh
}

/// Axis-aligned cube centred at the origin
pub fn cube(half: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let faces = [
        (Vec3::Y, Vec3::Z),
        (Vec3::Z, Vec3::Y),
        (Vec3::Z, Vec3::X),
        (Vec3::X, Vec3::Z),
        (Vec3::X, Vec3::Y),
        (Vec3::Y, Vec3::X),
    ];
    for (u, v) in faces {
        mesh.push_face(u.cross(v) * half, u, v, half, 1.0);
    }
    mesh
}

/// Stand-in geometry per mesh slot, sized for the slot's draw transform
pub fn placeholder(kind: MeshKind) -> MeshData {
    match kind {
        MeshKind::Ground => plane(1.0, 8.0),
        // Coins are drawn at scale 5, health at 10, the key at 20
        MeshKind::Coin => cube(0.05),
        MeshKind::Health => cube(0.03),
        MeshKind::Key => cube(0.02),
        MeshKind::Beast => cube(0.5),
        MeshKind::Avatar => cube(0.25),
        // Maze walls only come from the loader
        MeshKind::Maze => MeshData::default(),
    }
}
