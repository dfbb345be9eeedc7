//! Vertex data structure handed to the renderer.
//!
//! The layout is plain `#[repr(C)]` data so a renderer can upload a mesh's vertex
//! vector as-is with `bytemuck::cast_slice`.

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), world space
/// - Normal: 3x f32 (12 bytes), outward face normal
/// - Color: 3x f32 (12 bytes), linear RGB
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 3],
    /// Outward normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// Flat block color
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Vertex {
            position,
            normal,
            color,
        }
    }
}
