// panorama.rs — camera, display resolution and projection mode tags

use std::fmt;
use std::str::FromStr;

use glam::{EulerRot, Quat, Vec3};

use crate::error::Error;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 46.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    Rectilinear,   // gnomonic, straight lines stay straight
    Equidistant,   // fisheye, radius proportional to angle
    Stereographic, // little planet
    Flat,          // equirectangular unwrap
}

impl ProjectionMode {
    pub const ALL: [ProjectionMode; 4] = [
        ProjectionMode::Rectilinear,
        ProjectionMode::Equidistant,
        ProjectionMode::Stereographic,
        ProjectionMode::Flat,
    ];

    /// Identifier used in configuration and exposed as the view `type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionMode::Rectilinear => "rectilinear",
            ProjectionMode::Equidistant => "equidistant",
            ProjectionMode::Stereographic => "stereographic",
            ProjectionMode::Flat => "flat",
        }
    }

    /// Mode id understood by the background shader.
    pub fn shader_id(self) -> u32 {
        match self {
            ProjectionMode::Rectilinear => 0,
            ProjectionMode::Equidistant => 1,
            ProjectionMode::Stereographic => 2,
            ProjectionMode::Flat => 4,
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownViewType(s.to_string()))
    }
}

/// The part of the render camera this crate reads and writes.
///
/// `rotation` maps camera space (looking down -Z, +Y up) into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoramaCamera {
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl PanoramaCamera {
    pub fn new() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            fov: DEFAULT_FOV,
        }
    }

    /// Point the camera at `yaw`/`pitch` (degrees), with no roll.
    pub fn look_at(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), 0.0);
    }

    /// Yaw and pitch in degrees.
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let (yaw, pitch, _roll) = self.rotation.to_euler(EulerRot::YXZ);
        (yaw.to_degrees(), pitch.to_degrees())
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl Default for PanoramaCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Size of the drawable surface in pixels plus the fragment scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayResolution {
    pub width: u32,
    pub height: u32,
    pub ratio: f32,
}

impl DisplayResolution {
    pub fn new(width: u32, height: u32, ratio: f32) -> Self {
        Self { width, height, ratio }
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Camera plus the surface it is drawn on; what every projection reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub camera: PanoramaCamera,
    pub resolution: DisplayResolution,
}

impl Viewport {
    pub fn new(camera: PanoramaCamera, resolution: DisplayResolution) -> Self {
        Self { camera, resolution }
    }
}
