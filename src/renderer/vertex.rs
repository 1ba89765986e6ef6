//! Vertex and uniform layouts shared with `scene.wgsl`

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::compose::{DrawCall, PassCamera};
use crate::settings::DirectionalLight;

/// Mesh vertex as produced by the asset loader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub const fn new(position: [f32; 3], tex_coord: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            color: [1.0; 4],
            tex_coord,
            normal,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
        2 => Float32x2,
        3 => Float32x3,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-pass uniform (binding group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub light_ambient: [f32; 4],
    /// Normalized
    pub light_direction: [f32; 4],
}

impl CameraUniform {
    pub fn new(camera: &PassCamera, light: &DirectionalLight) -> Self {
        Self {
            view_projection: camera.view_projection.to_cols_array_2d(),
            camera_position: camera.position.extend(1.0).to_array(),
            light_diffuse: light.diffuse.extend(0.0).to_array(),
            light_specular: light.specular.extend(0.0).to_array(),
            light_ambient: light.ambient.extend(0.0).to_array(),
            light_direction: light.direction.normalize_or_zero().extend(0.0).to_array(),
        }
    }
}

/// Per-draw uniform (binding group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model` for normals
    pub model_it: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    /// xyz = ambient, w = shininess
    pub material_ambient: [f32; 4],
}

impl DrawUniform {
    pub fn new(draw: &DrawCall) -> Self {
        let m = &draw.material;
        Self {
            model: draw.model.to_cols_array_2d(),
            model_it: normal_matrix(draw.model).to_cols_array_2d(),
            tint: draw.tint,
            material_diffuse: m.diffuse.extend(0.0).to_array(),
            material_specular: m.specular.extend(0.0).to_array(),
            material_ambient: m.ambient.extend(m.shininess).to_array(),
        }
    }
}

/// Inverse-transpose, falling back to identity for singular transforms
pub fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() < f32::EPSILON {
        Mat4::IDENTITY
    } else {
        model.inverse().transpose()
    }
}

/// Round `size` up to the dynamic-offset alignment
pub fn aligned_stride(size: usize, alignment: u32) -> u64 {
    let alignment = alignment.max(1) as u64;
    (size as u64).div_ceil(alignment) * alignment
}
