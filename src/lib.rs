// lib.rs — orientation fusion and projection views for a panoramic viewer

pub mod config;
pub mod controller;
pub mod error;
pub mod gyroscope;
pub mod orientation;
pub mod panorama;
pub mod platform;
pub mod signal;
pub mod uniforms;
pub mod view;

pub use config::{ControllerConfig, ViewConfig};
pub use controller::ControllerType;
pub use error::{Error, Result};
pub use gyroscope::GyroscopeController;
pub use orientation::{OrientationSample, OFFSET_ROTATION};
pub use panorama::{DisplayResolution, PanoramaCamera, ProjectionMode, Viewport};
pub use platform::{OrientationPlatform, StaticPlatform};
pub use signal::{GyroscopeEvent, GyroscopeSignals, Subscription};
pub use uniforms::ViewUniforms;
pub use view::{create_view, ProjectionView, ViewBase, ViewBounds};
