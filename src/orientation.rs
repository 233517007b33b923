// orientation.rs — device orientation samples and their fusion into a camera rotation

use std::f32::consts::FRAC_1_SQRT_2;

use glam::{Quat, Vec3};
use serde::{Deserialize, Deserializer};

/// Aligns the sensor's "lying flat" frame with the camera's "looking forward"
/// frame: -90° about X.
pub const OFFSET_ROTATION: Quat = Quat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);

/// One device orientation reading, in degrees.
///
/// Platforms may omit any field; a missing or non-finite field makes the
/// whole sample unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct OrientationSample {
    #[serde(default, deserialize_with = "numeric")]
    pub alpha: Option<f32>,
    #[serde(default, deserialize_with = "numeric")]
    pub beta: Option<f32>,
    #[serde(default, deserialize_with = "numeric")]
    pub gamma: Option<f32>,
}

fn numeric<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(|v| v as f32))
}

impl OrientationSample {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// `(alpha, beta, gamma)` when every field is a finite number.
    pub fn angles(&self) -> Option<(f32, f32, f32)> {
        match (self.alpha, self.beta, self.gamma) {
            (Some(a), Some(b), Some(g)) if a.is_finite() && b.is_finite() && g.is_finite() => {
                Some((a, b, g))
            }
            _ => None,
        }
    }
}

/// Camera rotation for a sample seen while the screen is turned by
/// `screen_rotation` radians. `None` when the sample is not usable.
pub fn fuse(sample: &OrientationSample, screen_rotation: f32) -> Option<Quat> {
    let (alpha, beta, gamma) = sample.angles()?;

    // Intrinsic YXZ: heading, then forward tilt, then negated side tilt.
    let device = Quat::from_rotation_y(alpha.to_radians())
        * Quat::from_rotation_x(beta.to_radians())
        * Quat::from_rotation_z(-gamma.to_radians());

    let screen = Quat::from_axis_angle(Vec3::Z, -screen_rotation);
    let q = (device * OFFSET_ROTATION * screen).normalize();

    // Sensor to render-camera handedness. Keep exactly as is.
    Some(Quat::from_xyzw(-q.y, -q.x, -q.z, q.w))
}
