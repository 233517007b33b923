// view/rectilinear.rs — gnomonic projection, straight lines stay straight

use glam::{Vec2, Vec3};

use super::{half_fov, lens_plane_to_screen, screen_to_lens_plane, ProjectionView, ViewBase, ViewBounds};
use crate::config::ViewConfig;
use crate::error::Result;
use crate::panorama::{ProjectionMode, Viewport};
use crate::uniforms::ViewUniforms;

/// Largest fov the shader gets; tan(fov/2) blows up at 180°.
const MAX_SAFE_FOV: f32 = 179.9;

#[derive(Debug, Clone)]
pub struct RectilinearView {
    base: ViewBase,
}

impl RectilinearView {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        let defaults = ViewBounds::from_degrees((5.0, MAX_SAFE_FOV), Some((-90.0, 90.0)));
        Ok(Self {
            base: ViewBase::new(ProjectionMode::Rectilinear, defaults, config)?,
        })
    }
}

impl ProjectionView for RectilinearView {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn world_to_screen(&self, world: Vec3, parallax: f32, viewport: &Viewport) -> Option<Vec2> {
        let dir = (viewport.camera.rotation.inverse() * world).normalize_or_zero();

        // Eye sits `parallax` units behind the sphere centre.
        let eye = Vec3::new(0.0, 0.0, parallax.clamp(0.0, 1.0));
        let ray = dir - eye;
        let depth = -ray.z;
        if depth <= f32::EPSILON {
            return None;
        }

        let tan = half_fov(viewport).tan();
        let plane = Vec2::new(
            ray.x / depth / (tan * viewport.resolution.aspect()),
            ray.y / depth / tan,
        );
        Some(lens_plane_to_screen(plane, viewport, self.base.projection_scale))
    }

    fn screen_to_world(&self, screen: Vec2, viewport: &Viewport) -> Vec3 {
        let plane = screen_to_lens_plane(screen, viewport, self.base.projection_scale);
        let tan = half_fov(viewport).tan();
        let dir = Vec3::new(plane.x * tan * viewport.resolution.aspect(), plane.y * tan, -1.0);
        viewport.camera.rotation * dir.normalize()
    }

    fn update_uniforms(&self, uniforms: &mut ViewUniforms) {
        uniforms.mode = self.mode().shader_id();
        uniforms.projection_scale = self.base.projection_scale;
        uniforms.projection_distance = 0.0;
        uniforms.fov_rad = uniforms.fov_rad.min(MAX_SAFE_FOV.to_radians());
    }
}
