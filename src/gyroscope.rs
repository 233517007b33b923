// gyroscope.rs — drives the camera rotation from device orientation events

use glam::Quat;

use crate::config::ControllerConfig;
use crate::controller::{self, ControllerType};
use crate::orientation::{self, OrientationSample};
use crate::panorama::PanoramaCamera;
use crate::platform::OrientationPlatform;
use crate::signal::{GyroscopeEvent, GyroscopeSignals, Subscription};

/// Turns device orientation samples into the rotation the camera picks up
/// every frame.
///
/// The controller never touches the camera on its own: event handling only
/// recomputes the fused rotation, and [`update`](Self::update) copies it over
/// when the render loop asks.
#[derive(Debug)]
pub struct GyroscopeController {
    config: ControllerConfig,
    enabled: bool,
    subscription: Option<Subscription>,
    /// Screen rotation relative to the device, radians.
    screen_rotation: f32,
    fused: Quat,
}

impl GyroscopeController {
    /// Boot a controller. It enables itself when configured to and the
    /// device actually has an orientation sensor.
    pub fn new(
        config: ControllerConfig,
        signals: &mut GyroscopeSignals,
        platform: &dyn OrientationPlatform,
        controllers_enabled: bool,
    ) -> Self {
        let mut controller = Self {
            config,
            enabled: false,
            subscription: None,
            screen_rotation: 0.0,
            fused: Quat::IDENTITY,
        };

        if controller.config.enabled && platform.has_gyroscope() {
            controller.enable(signals, platform, controllers_enabled);
        }

        controller
    }

    pub fn uid(&self) -> &str {
        &self.config.uid
    }

    pub fn kind(&self) -> ControllerType {
        ControllerType::Gyroscope
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn screen_rotation(&self) -> f32 {
        self.screen_rotation
    }

    pub fn fused_rotation(&self) -> Quat {
        self.fused
    }

    /// Subscribe to the gyroscope signals and seed state from the current
    /// platform values, so the first frame does not use a stale rotation.
    pub fn enable(
        &mut self,
        signals: &mut GyroscopeSignals,
        platform: &dyn OrientationPlatform,
        controllers_enabled: bool,
    ) {
        if !controller::guard(controllers_enabled, self.config.enabled) {
            return;
        }

        if self.subscription.is_none() {
            self.subscription = Some(signals.subscribe());
        }
        self.enabled = true;
        log::debug!("gyroscope controller {:?} enabled", self.config.uid);

        self.on_screen_orientation_change(platform);
        if let Some(sample) = signals.last_device_orientation() {
            self.on_device_orientation_change(&sample, controllers_enabled);
        }
    }

    pub fn disable(&mut self, signals: &mut GyroscopeSignals, controllers_enabled: bool) {
        if !controller::guard(controllers_enabled, self.config.enabled) {
            return;
        }

        if let Some(subscription) = self.subscription.take() {
            signals.unsubscribe(subscription);
        }
        self.enabled = false;
        log::debug!("gyroscope controller {:?} disabled", self.config.uid);
    }

    /// Run the handlers for every event queued since the last call.
    pub fn handle_events(&mut self, platform: &dyn OrientationPlatform, controllers_enabled: bool) {
        while let Some(event) = self.subscription.as_ref().and_then(Subscription::try_next) {
            match event {
                GyroscopeEvent::DeviceOrientation(sample) => {
                    self.on_device_orientation_change(&sample, controllers_enabled)
                }
                GyroscopeEvent::ScreenOrientation => self.on_screen_orientation_change(platform),
            }
        }
    }

    pub fn on_screen_orientation_change(&mut self, platform: &dyn OrientationPlatform) {
        let angle = platform
            .screen_orientation_angle()
            .or_else(|| platform.window_orientation());

        match angle {
            Some(degrees) => self.screen_rotation = degrees.to_radians(),
            None => log::warn!(
                "no screen orientation available, keeping {} rad",
                self.screen_rotation
            ),
        }
    }

    pub fn on_device_orientation_change(&mut self, sample: &OrientationSample, controllers_enabled: bool) {
        if !controllers_enabled {
            return;
        }

        match orientation::fuse(sample, self.screen_rotation) {
            Some(rotation) => {
                log::trace!("fused rotation {:?}", rotation);
                self.fused = rotation;
            }
            None => log::trace!("skipping incomplete orientation sample {:?}", sample),
        }
    }

    /// Called once per frame by the render loop.
    pub fn update(&self, camera: &mut PanoramaCamera) {
        if self.enabled {
            camera.rotation = self.fused;
        }
    }

    /// Disable and release the controller. The subscription goes away with
    /// it even when the guard refuses to disable.
    pub fn destroy(mut self, signals: &mut GyroscopeSignals, controllers_enabled: bool) {
        self.disable(signals, controllers_enabled);
        if let Some(subscription) = self.subscription.take() {
            signals.unsubscribe(subscription);
        }
    }
}
