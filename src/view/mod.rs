// view/mod.rs — the projection contract shared by every lens model
//
// Screen points are pixels, origin top-left, y down. Fragments are the
// device independent form produced by `screen_to_fragment`; lens models work
// on the centred plane returned by `fragment_to_ndc` (y up, [-1, 1] across
// the vertical field of view).

mod equidistant;
mod flat;
mod rectilinear;
mod stereographic;

pub use equidistant::EquidistantView;
pub use flat::FlatView;
pub use rectilinear::RectilinearView;
pub use stereographic::StereographicView;

use glam::{Vec2, Vec3};

use crate::config::ViewConfig;
use crate::error::{Error, Result};
use crate::panorama::{DisplayResolution, PanoramaCamera, ProjectionMode, Viewport};
use crate::uniforms::ViewUniforms;

/// Angular limits of a view, radians. `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewBounds {
    pub fov_min: Option<f32>,
    pub fov_max: Option<f32>,
    pub yaw_min: Option<f32>,
    pub yaw_max: Option<f32>,
    pub pitch_min: Option<f32>,
    pub pitch_max: Option<f32>,
}

impl ViewBounds {
    /// Bounds written in degrees.
    pub fn from_degrees(fov: (f32, f32), pitch: Option<(f32, f32)>) -> Self {
        Self {
            fov_min: Some(fov.0.to_radians()),
            fov_max: Some(fov.1.to_radians()),
            yaw_min: None,
            yaw_max: None,
            pitch_min: pitch.map(|p| p.0.to_radians()),
            pitch_max: pitch.map(|p| p.1.to_radians()),
        }
    }

    /// Apply per-field overrides (degrees) from configuration.
    fn overridden(self, config: &ViewConfig) -> Result<Self> {
        let pick = |value: Option<f32>, default: Option<f32>| value.map(f32::to_radians).or(default);
        let bounds = Self {
            fov_min: pick(config.fov_min, self.fov_min),
            fov_max: pick(config.fov_max, self.fov_max),
            yaw_min: pick(config.yaw_min, self.yaw_min),
            yaw_max: pick(config.yaw_max, self.yaw_max),
            pitch_min: pick(config.pitch_min, self.pitch_min),
            pitch_max: pick(config.pitch_max, self.pitch_max),
        };

        check_pair("fov", bounds.fov_min, bounds.fov_max)?;
        check_pair("yaw", bounds.yaw_min, bounds.yaw_max)?;
        check_pair("pitch", bounds.pitch_min, bounds.pitch_max)?;
        Ok(bounds)
    }

    pub fn clamp_fov(&self, fov: f32) -> f32 {
        clamp_open(fov, self.fov_min, self.fov_max)
    }

    pub fn clamp_yaw(&self, yaw: f32) -> f32 {
        clamp_open(yaw, self.yaw_min, self.yaw_max)
    }

    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        clamp_open(pitch, self.pitch_min, self.pitch_max)
    }
}

fn check_pair(field: &'static str, min: Option<f32>, max: Option<f32>) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(Error::InvalidBounds {
            field,
            min: min.to_degrees(),
            max: max.to_degrees(),
        }),
        _ => Ok(()),
    }
}

fn clamp_open(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let value = min.map_or(value, |min| value.max(min));
    max.map_or(value, |max| value.min(max))
}

/// State common to every lens model. Fixed once the view is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBase {
    mode: ProjectionMode,
    bounds: ViewBounds,
    projection_scale: f32,
}

impl ViewBase {
    pub fn new(mode: ProjectionMode, defaults: ViewBounds, config: &ViewConfig) -> Result<Self> {
        let bounds = defaults.overridden(config)?;
        let projection_scale = match config.projection_scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            Some(scale) => {
                log::warn!("ignoring projection scale {} for {} view", scale, mode);
                1.0
            }
            None => 1.0,
        };

        Ok(Self {
            mode,
            bounds,
            projection_scale,
        })
    }
}

/// A lens model mapping between screen pixels and world directions.
pub trait ProjectionView {
    fn base(&self) -> &ViewBase;

    /// Screen position of a world point. `parallax` in [0, 1] blends toward
    /// a projection centre placed behind the camera; lenses without a depth
    /// effect ignore it. `None` when this lens cannot show the point.
    fn world_to_screen(&self, world: Vec3, parallax: f32, viewport: &Viewport) -> Option<Vec2>;

    /// Unit world direction seen through a screen pixel.
    fn screen_to_world(&self, screen: Vec2, viewport: &Viewport) -> Vec3;

    /// Write this lens's parameters into the shader uniforms.
    fn update_uniforms(&self, uniforms: &mut ViewUniforms);

    /// Current field of view of the live camera, radians.
    fn projection_fov(&self, camera: &PanoramaCamera) -> f32 {
        camera.fov.to_radians()
    }

    fn mode(&self) -> ProjectionMode {
        self.base().mode
    }

    fn view_type(&self) -> &'static str {
        self.base().mode.as_str()
    }

    fn bounds(&self) -> &ViewBounds {
        &self.base().bounds
    }

    fn projection_scale(&self) -> f32 {
        self.base().projection_scale
    }

    fn fov_min(&self) -> Option<f32> {
        self.bounds().fov_min
    }

    fn fov_max(&self) -> Option<f32> {
        self.bounds().fov_max
    }

    fn yaw_min(&self) -> Option<f32> {
        self.bounds().yaw_min
    }

    fn yaw_max(&self) -> Option<f32> {
        self.bounds().yaw_max
    }

    fn pitch_min(&self) -> Option<f32> {
        self.bounds().pitch_min
    }

    fn pitch_max(&self) -> Option<f32> {
        self.bounds().pitch_max
    }
}

/// Build the view named by `config.kind`.
pub fn create_view(config: &ViewConfig) -> Result<Box<dyn ProjectionView>> {
    let view: Box<dyn ProjectionView> = match config.kind.parse::<ProjectionMode>()? {
        ProjectionMode::Rectilinear => Box::new(RectilinearView::new(config)?),
        ProjectionMode::Equidistant => Box::new(EquidistantView::new(config)?),
        ProjectionMode::Stereographic => Box::new(StereographicView::new(config)?),
        ProjectionMode::Flat => Box::new(FlatView::new(config)?),
    };
    log::debug!("created {} view", view.view_type());
    Ok(view)
}

/// Pixel to fragment space.
pub fn screen_to_fragment(screen: Vec2, resolution: &DisplayResolution) -> Vec2 {
    let width = resolution.width as f32;
    let height = resolution.height as f32;
    Vec2::new(
        2.0 * (screen.x / width - 1.0) * resolution.ratio,
        2.0 * (screen.y / height - 1.0) * resolution.ratio,
    )
}

/// Inverse of [`screen_to_fragment`], rounded to whole pixels, with y taken
/// from a bottom-up frame to the top-down pixel frame.
pub fn fragment_to_screen(fragment: Vec2, resolution: &DisplayResolution) -> Vec2 {
    let width = resolution.width as f32;
    let height = resolution.height as f32;
    let x = (fragment.x / (2.0 * resolution.ratio) + 1.0) * width;
    let y = (fragment.y / (2.0 * resolution.ratio) + 1.0) * height;
    Vec2::new(x.round(), height - y.round())
}

pub fn fragment_to_ndc(fragment: Vec2, resolution: &DisplayResolution) -> Vec2 {
    fragment / resolution.ratio + Vec2::ONE
}

pub fn ndc_to_fragment(ndc: Vec2, resolution: &DisplayResolution) -> Vec2 {
    (ndc - Vec2::ONE) * resolution.ratio
}

/// First step of every `screen_to_world`: pixel to y-up lens plane.
fn screen_to_lens_plane(screen: Vec2, viewport: &Viewport, scale: f32) -> Vec2 {
    let fragment = screen_to_fragment(screen, &viewport.resolution);
    let ndc = fragment_to_ndc(fragment, &viewport.resolution);
    Vec2::new(ndc.x, -ndc.y) / scale
}

/// Last step of every `world_to_screen`.
fn lens_plane_to_screen(plane: Vec2, viewport: &Viewport, scale: f32) -> Vec2 {
    let fragment = ndc_to_fragment(plane * scale, &viewport.resolution);
    fragment_to_screen(fragment, &viewport.resolution)
}

/// Half of the vertical field of view, radians.
fn half_fov(viewport: &Viewport) -> f32 {
    viewport.camera.fov.to_radians() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    fn viewport(width: u32, height: u32, yaw: f32, pitch: f32, fov: f32) -> Viewport {
        let mut camera = PanoramaCamera::new();
        camera.look_at(yaw, pitch);
        camera.fov = fov;
        Viewport::new(camera, DisplayResolution::new(width, height, 1.0))
    }

    fn all_views() -> Vec<Box<dyn ProjectionView>> {
        ProjectionMode::ALL
            .into_iter()
            .map(|mode| create_view(&ViewConfig::new(mode.as_str())).unwrap())
            .collect()
    }

    #[test]
    fn fragment_golden_values() {
        let resolution = DisplayResolution::new(1000, 500, 1.0);
        let fragment = screen_to_fragment(Vec2::new(750.0, 400.0), &resolution);
        assert!(approx(fragment, Vec2::new(-0.5, -0.4)));
        assert_eq!(fragment_to_screen(fragment, &resolution), Vec2::new(750.0, 100.0));
    }

    #[test]
    fn fragment_round_trip_flips_y() {
        for ratio in [1.0, 1.5, 2.0] {
            let resolution = DisplayResolution::new(640, 360, ratio);
            for x in (0..=640).step_by(37) {
                for y in (0..=360).step_by(29) {
                    let p = Vec2::new(x as f32, y as f32);
                    let back = fragment_to_screen(screen_to_fragment(p, &resolution), &resolution);
                    assert_eq!(back, Vec2::new(p.x, 360.0 - p.y), "{p} ratio {ratio}");
                }
            }
        }
    }

    #[test]
    fn ndc_is_centred_on_the_screen() {
        let resolution = DisplayResolution::new(800, 600, 2.0);
        let centre = screen_to_fragment(Vec2::new(400.0, 300.0), &resolution);
        assert!(approx(fragment_to_ndc(centre, &resolution), Vec2::ZERO));
        let corner = screen_to_fragment(Vec2::new(800.0, 600.0), &resolution);
        assert!(approx(fragment_to_ndc(corner, &resolution), Vec2::ONE));
        assert!(approx(ndc_to_fragment(Vec2::ONE, &resolution), corner));
    }

    #[test]
    fn factory_builds_each_type() {
        for view in all_views() {
            assert_eq!(view.view_type(), view.mode().as_str());
            assert_eq!(view.projection_scale(), 1.0);
            assert_eq!(view.yaw_min(), None);
            assert_eq!(view.yaw_max(), None);
        }
        assert!(matches!(
            create_view(&ViewConfig::new("cylindrical")),
            Err(Error::UnknownViewType(_))
        ));
    }

    #[test]
    fn config_overrides_defaults_per_field() {
        let mut config = ViewConfig::new("rectilinear");
        config.fov_max = Some(120.0);
        config.yaw_min = Some(-45.0);
        config.yaw_max = Some(45.0);
        let view = create_view(&config).unwrap();

        assert!((view.fov_min().unwrap() - 5.0_f32.to_radians()).abs() < 1e-6);
        assert!((view.fov_max().unwrap() - 120.0_f32.to_radians()).abs() < 1e-6);
        assert!((view.yaw_min().unwrap() + 45.0_f32.to_radians()).abs() < 1e-6);
        assert!((view.pitch_max().unwrap() - 90.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn zero_bounds_are_not_unbounded() {
        let mut config = ViewConfig::new("flat");
        config.yaw_min = Some(0.0);
        config.yaw_max = Some(0.0);
        let view = create_view(&config).unwrap();
        assert_eq!(view.yaw_min(), Some(0.0));
        assert_eq!(view.bounds().clamp_yaw(1.0), 0.0);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut config = ViewConfig::new("equidistant");
        config.pitch_min = Some(30.0);
        config.pitch_max = Some(-30.0);
        assert!(matches!(
            create_view(&config),
            Err(Error::InvalidBounds { field: "pitch", .. })
        ));
    }

    #[test]
    fn bad_projection_scale_falls_back_to_one() {
        let mut config = ViewConfig::new("stereographic");
        config.projection_scale = Some(-2.0);
        assert_eq!(create_view(&config).unwrap().projection_scale(), 1.0);
        config.projection_scale = Some(2.0);
        assert_eq!(create_view(&config).unwrap().projection_scale(), 2.0);
    }

    #[test]
    fn clamping_respects_open_sides() {
        let bounds = ViewBounds {
            fov_min: Some(0.5),
            fov_max: None,
            yaw_min: None,
            yaw_max: None,
            pitch_min: Some(-1.0),
            pitch_max: Some(1.0),
        };
        assert_eq!(bounds.clamp_fov(0.1), 0.5);
        assert_eq!(bounds.clamp_fov(10.0), 10.0);
        assert_eq!(bounds.clamp_yaw(-100.0), -100.0);
        assert_eq!(bounds.clamp_pitch(2.0), 1.0);
        assert_eq!(bounds.clamp_pitch(-2.0), -1.0);
    }

    #[test]
    fn projection_fov_reads_the_camera() {
        let vp = viewport(800, 600, 0.0, 0.0, 90.0);
        for view in all_views() {
            assert!((view.projection_fov(&vp.camera) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        }
    }

    #[test]
    fn screen_centre_looks_along_the_camera() {
        let vp = viewport(800, 600, 35.0, -10.0, 70.0);
        for view in all_views() {
            let dir = view.screen_to_world(Vec2::new(400.0, 300.0), &vp);
            assert!((dir.length() - 1.0).abs() < 1e-5, "{}", view.view_type());
            assert!((dir - vp.camera.forward()).length() < 1e-5, "{}", view.view_type());
        }
    }

    #[test]
    fn top_of_screen_is_up() {
        let vp = viewport(800, 600, 0.0, 0.0, 60.0);
        for view in all_views() {
            let dir = view.screen_to_world(Vec2::new(400.0, 0.0), &vp);
            assert!(dir.y > 0.0, "{}", view.view_type());
            let right = view.screen_to_world(Vec2::new(800.0, 300.0), &vp);
            assert!(right.x > 0.0, "{}", view.view_type());
        }
    }

    #[test]
    fn pixels_survive_screen_to_world_to_screen() {
        let vp = viewport(1280, 720, -120.0, 25.0, 75.0);
        for view in all_views() {
            for x in (8..1280).step_by(97) {
                for y in (8..720).step_by(71) {
                    let pixel = Vec2::new(x as f32, y as f32);
                    let world = view.screen_to_world(pixel, &vp);
                    let back = view.world_to_screen(world, 0.0, &vp);
                    assert_eq!(back, Some(pixel), "{} at {pixel}", view.view_type());
                }
            }
        }
    }

    #[test]
    fn projection_scale_zooms_about_the_centre() {
        let vp = viewport(800, 600, 0.0, 0.0, 60.0);
        let mut config = ViewConfig::new("rectilinear");
        let plain = create_view(&config).unwrap();
        config.projection_scale = Some(2.0);
        let zoomed = create_view(&config).unwrap();

        let dir = plain.screen_to_world(Vec2::new(500.0, 300.0), &vp);
        assert_eq!(zoomed.world_to_screen(dir, 0.0, &vp), Some(Vec2::new(600.0, 300.0)));
    }

    #[test]
    fn uniforms_carry_lens_parameters() {
        for view in all_views() {
            let mut uniforms = ViewUniforms::new();
            view.update_uniforms(&mut uniforms);
            assert_eq!(uniforms.mode, view.mode().shader_id());
            assert_eq!(uniforms.projection_scale, view.projection_scale());
        }
    }
}
