// view/stereographic.rs — little planet, projected from the point behind the viewer

use glam::{Vec2, Vec3};

use super::{half_fov, lens_plane_to_screen, screen_to_lens_plane, ProjectionView, ViewBase, ViewBounds};
use crate::config::ViewConfig;
use crate::error::Result;
use crate::panorama::{ProjectionMode, Viewport};
use crate::uniforms::ViewUniforms;

const ANTIPODE_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct StereographicView {
    base: ViewBase,
}

impl StereographicView {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        let defaults = ViewBounds::from_degrees((10.0, 180.0), Some((-90.0, 90.0)));
        Ok(Self {
            base: ViewBase::new(ProjectionMode::Stereographic, defaults, config)?,
        })
    }
}

/// Plane radius for an angle `theta` off the view axis.
fn stereo_radius(theta: f32) -> f32 {
    2.0 * (theta * 0.5).tan()
}

impl ProjectionView for StereographicView {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn world_to_screen(&self, world: Vec3, _parallax: f32, viewport: &Viewport) -> Option<Vec2> {
        let dir = (viewport.camera.rotation.inverse() * world).try_normalize()?;
        let theta = (-dir.z).clamp(-1.0, 1.0).acos();
        if theta > std::f32::consts::PI - ANTIPODE_EPSILON {
            return None;
        }

        let radial = Vec2::new(dir.x, dir.y).normalize_or_zero() * stereo_radius(theta);
        let edge = stereo_radius(half_fov(viewport));
        let plane = Vec2::new(radial.x / (edge * viewport.resolution.aspect()), radial.y / edge);
        Some(lens_plane_to_screen(plane, viewport, self.base.projection_scale))
    }

    fn screen_to_world(&self, screen: Vec2, viewport: &Viewport) -> Vec3 {
        let plane = screen_to_lens_plane(screen, viewport, self.base.projection_scale);
        let edge = stereo_radius(half_fov(viewport));
        let radial = Vec2::new(plane.x * edge * viewport.resolution.aspect(), plane.y * edge);

        let rho = radial.length();
        let dir = if rho <= f32::EPSILON {
            Vec3::NEG_Z
        } else {
            let theta = 2.0 * (rho * 0.5).atan();
            let side = radial / rho * theta.sin();
            Vec3::new(side.x, side.y, -theta.cos())
        };
        viewport.camera.rotation * dir
    }

    fn update_uniforms(&self, uniforms: &mut ViewUniforms) {
        uniforms.mode = self.mode().shader_id();
        uniforms.projection_scale = self.base.projection_scale;
        // Projection centre on the far side of the unit sphere.
        uniforms.projection_distance = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panorama::{DisplayResolution, PanoramaCamera};

    fn viewport(fov: f32) -> Viewport {
        let mut camera = PanoramaCamera::new();
        camera.fov = fov;
        Viewport::new(camera, DisplayResolution::new(1000, 1000, 1.0))
    }

    fn view() -> StereographicView {
        StereographicView::new(&ViewConfig::new("stereographic")).unwrap()
    }

    #[test]
    fn half_fov_maps_to_the_screen_edge() {
        let vp = viewport(120.0);
        let sixty = Vec3::new(60.0_f32.to_radians().sin(), 0.0, -60.0_f32.to_radians().cos());
        assert_eq!(view().world_to_screen(sixty, 0.0, &vp), Some(Vec2::new(1000.0, 500.0)));
    }

    #[test]
    fn side_points_land_past_the_edge_of_a_narrow_view() {
        let vp = viewport(90.0);
        let side = Vec3::new(1.0, 0.0, 0.0);
        let screen = view().world_to_screen(side, 0.0, &vp).unwrap();
        // 2·tan(45°) / 2·tan(22.5°) = 1 / tan(22.5°) ≈ 2.414 planes from centre.
        assert_eq!(screen, Vec2::new((500.0_f32 * (1.0 + 1.0 / 22.5_f32.to_radians().tan())).round(), 500.0));
    }

    #[test]
    fn antipode_is_hidden() {
        let vp = viewport(180.0);
        assert_eq!(view().world_to_screen(Vec3::Z, 0.0, &vp), None);
        assert!(view().world_to_screen(Vec3::new(0.1, 0.0, 1.0), 0.0, &vp).is_some());
    }

    #[test]
    fn uniforms_place_the_projection_centre() {
        let mut uniforms = ViewUniforms::new();
        view().update_uniforms(&mut uniforms);
        assert_eq!(uniforms.mode, 2);
        assert_eq!(uniforms.projection_distance, 1.0);
    }
}
