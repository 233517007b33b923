// view/equidistant.rs — fisheye, distance from centre proportional to angle

use glam::{Vec2, Vec3};

use super::{half_fov, lens_plane_to_screen, screen_to_lens_plane, ProjectionView, ViewBase, ViewBounds};
use crate::config::ViewConfig;
use crate::error::Result;
use crate::panorama::{ProjectionMode, Viewport};
use crate::uniforms::ViewUniforms;

/// Directions closer than this to straight behind have no stable screen position.
const ANTIPODE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct EquidistantView {
    base: ViewBase,
}

impl EquidistantView {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        let defaults = ViewBounds::from_degrees((5.0, 180.0), Some((-90.0, 90.0)));
        Ok(Self {
            base: ViewBase::new(ProjectionMode::Equidistant, defaults, config)?,
        })
    }
}

impl ProjectionView for EquidistantView {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn world_to_screen(&self, world: Vec3, _parallax: f32, viewport: &Viewport) -> Option<Vec2> {
        let dir = (viewport.camera.rotation.inverse() * world).try_normalize()?;
        let theta = (-dir.z).clamp(-1.0, 1.0).acos();
        if theta > std::f32::consts::PI - ANTIPODE_EPSILON {
            return None;
        }

        let radial = Vec2::new(dir.x, dir.y).normalize_or_zero() * theta;
        let half = half_fov(viewport);
        let plane = Vec2::new(radial.x / (half * viewport.resolution.aspect()), radial.y / half);
        Some(lens_plane_to_screen(plane, viewport, self.base.projection_scale))
    }

    fn screen_to_world(&self, screen: Vec2, viewport: &Viewport) -> Vec3 {
        let plane = screen_to_lens_plane(screen, viewport, self.base.projection_scale);
        let half = half_fov(viewport);
        let radial = Vec2::new(plane.x * half * viewport.resolution.aspect(), plane.y * half);

        let theta = radial.length();
        let dir = if theta <= f32::EPSILON {
            Vec3::NEG_Z
        } else {
            let side = radial / theta * theta.sin();
            Vec3::new(side.x, side.y, -theta.cos())
        };
        viewport.camera.rotation * dir
    }

    fn update_uniforms(&self, uniforms: &mut ViewUniforms) {
        uniforms.mode = self.mode().shader_id();
        uniforms.projection_scale = self.base.projection_scale;
        uniforms.projection_distance = 0.0;
    }
}
