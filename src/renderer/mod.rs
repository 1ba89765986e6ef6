//! Rendering module
//!
//! `compose` turns the game state into a backend-neutral `FramePlan` (two
//! passes: first-person and minimap). `pipeline` executes that plan with wgpu.

pub mod compose;
pub mod mesh;
pub mod pipeline;
pub mod texture;
pub mod vertex;

pub use compose::{
    DrawCall, FramePlan, Material, MeshKind, Pass, PassCamera, Program, Rect, SurfaceSize,
    TextureKind, compose_frame, minimap_rect,
};
pub use mesh::{MeshData, placeholder};
pub use pipeline::RenderState;
pub use texture::{Checkerboard, MipLevel, checkerboard, ground_texture, mip_chain};
pub use vertex::MeshVertex;
