// view/flat.rs — equirectangular unwrap around the camera

use glam::{Vec2, Vec3};

use super::{half_fov, lens_plane_to_screen, screen_to_lens_plane, ProjectionView, ViewBase, ViewBounds};
use crate::config::ViewConfig;
use crate::error::Result;
use crate::panorama::{ProjectionMode, Viewport};
use crate::uniforms::ViewUniforms;

#[derive(Debug, Clone)]
pub struct FlatView {
    base: ViewBase,
}

impl FlatView {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        let defaults = ViewBounds::from_degrees((5.0, 180.0), Some((-90.0, 90.0)));
        Ok(Self {
            base: ViewBase::new(ProjectionMode::Flat, defaults, config)?,
        })
    }
}

impl ProjectionView for FlatView {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn world_to_screen(&self, world: Vec3, _parallax: f32, viewport: &Viewport) -> Option<Vec2> {
        let dir = (viewport.camera.rotation.inverse() * world).try_normalize()?;
        let longitude = dir.x.atan2(-dir.z);
        let latitude = dir.y.clamp(-1.0, 1.0).asin();

        let half = half_fov(viewport);
        let plane = Vec2::new(longitude / (half * viewport.resolution.aspect()), latitude / half);
        Some(lens_plane_to_screen(plane, viewport, self.base.projection_scale))
    }

    fn screen_to_world(&self, screen: Vec2, viewport: &Viewport) -> Vec3 {
        let plane = screen_to_lens_plane(screen, viewport, self.base.projection_scale);
        let half = half_fov(viewport);
        let longitude = plane.x * half * viewport.resolution.aspect();
        let latitude = (plane.y * half).clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);

        let dir = Vec3::new(
            latitude.cos() * longitude.sin(),
            latitude.sin(),
            -latitude.cos() * longitude.cos(),
        );
        viewport.camera.rotation * dir
    }

    fn update_uniforms(&self, uniforms: &mut ViewUniforms) {
        uniforms.mode = self.mode().shader_id();
        uniforms.projection_scale = self.base.projection_scale;
        uniforms.projection_distance = 0.0;
    }
}
