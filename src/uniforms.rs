// uniforms.rs — per-frame parameters for the background projection shader

use crate::panorama::Viewport;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniforms {
    pub rotation: [f32; 4], // camera -> world, xyzw
    pub aspect: f32,
    pub fov_rad: f32,
    pub projection_scale: f32,
    pub projection_distance: f32,
    pub mode: u32, // see ProjectionMode::shader_id
    pub pad1: f32,
    pub pad2: f32,
    pub pad3: f32,
}

impl ViewUniforms {
    pub fn new() -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0, 1.0],
            aspect: 1.0,
            fov_rad: crate::panorama::DEFAULT_FOV.to_radians(),
            projection_scale: 1.0,
            projection_distance: 0.0,
            mode: 0,
            pad1: 0.0,
            pad2: 0.0,
            pad3: 0.0,
        }
    }

    /// Shared camera part. Lens specific fields are written by the view.
    pub fn update_camera(&mut self, viewport: &Viewport) {
        self.rotation = viewport.camera.rotation.to_array();
        self.aspect = viewport.resolution.aspect();
        self.fov_rad = viewport.camera.fov.clamp(1.0, 180.0).to_radians();
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for ViewUniforms {
    fn default() -> Self {
        Self::new()
    }
}
