// platform.rs — what the host device tells us about its sensors and screen

/// Host capabilities and screen state, read on demand by the controllers.
///
/// Angles are in degrees, as reported by the platform.
pub trait OrientationPlatform {
    /// The device has an orientation sensor.
    fn has_gyroscope(&self) -> bool;

    /// Angle from the screen orientation API, when available.
    fn screen_orientation_angle(&self) -> Option<f32>;

    /// Legacy window orientation angle, consulted when the screen API is missing.
    fn window_orientation(&self) -> Option<f32>;
}

/// Plain-data platform: values are set by whoever drives the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticPlatform {
    pub gyroscope: bool,
    pub screen_angle: Option<f32>,
    pub window_angle: Option<f32>,
}

impl StaticPlatform {
    pub fn with_gyroscope() -> Self {
        Self {
            gyroscope: true,
            screen_angle: Some(0.0),
            window_angle: None,
        }
    }
}

impl OrientationPlatform for StaticPlatform {
    fn has_gyroscope(&self) -> bool {
        self.gyroscope
    }

    fn screen_orientation_angle(&self) -> Option<f32> {
        self.screen_angle
    }

    fn window_orientation(&self) -> Option<f32> {
        self.window_angle
    }
}
