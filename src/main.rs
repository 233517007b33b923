// main.rs — replays a recorded sensor session through the gyroscope controller
//
// Usage: panorama_replay [--session <file>] [file]
// Log level via RUST_LOG (e.g. RUST_LOG=panorama_orientation=trace).

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::Deserialize;

use panorama_orientation::{
    create_view, ControllerConfig, DisplayResolution, GyroscopeController, GyroscopeSignals,
    OrientationSample, PanoramaCamera, ProjectionView, StaticPlatform, ViewConfig, ViewUniforms, Viewport,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    #[serde(default = "enabled_by_default")]
    controllers_enabled: bool,
    #[serde(default)]
    platform: PlatformState,
    controller: ControllerConfig,
    view: ViewConfig,
    resolution: Resolution,
    fov: Option<f32>,
    steps: Vec<Step>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlatformState {
    gyroscope: bool,
    screen_angle: Option<f32>,
    window_angle: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Resolution {
    width: u32,
    height: u32,
    #[serde(default = "unit_ratio")]
    ratio: f32,
}

fn unit_ratio() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Step {
    DeviceOrientation(OrientationSample),
    /// New screen angle in degrees; `null` when the screen API went away.
    ScreenOrientation(Option<f32>),
    ControllersEnabled(bool),
    Enable,
    Disable,
    Frame,
    Pick([f32; 2]),
    Project([f32; 3]),
}

fn main() {
    env_logger::init();

    let Some(path) = session_path_from_args() else {
        eprintln!("usage: panorama_replay [--session <file>] [file]");
        std::process::exit(2);
    };

    if let Err(e) = run(&path) {
        log::error!("replay of {:?} failed: {}", path, e);
        std::process::exit(1);
    }
}

fn session_path_from_args() -> Option<PathBuf> {
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        if a == "--session" {
            return it.next().map(PathBuf::from);
        }
        if !a.starts_with("--") {
            return Some(PathBuf::from(a));
        }
    }
    None
}

fn run(path: &Path) -> panorama_orientation::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let session: Session = serde_json::from_str(&text)?;

    let mut platform = StaticPlatform {
        gyroscope: session.platform.gyroscope,
        screen_angle: session.platform.screen_angle,
        window_angle: session.platform.window_angle,
    };
    let mut controllers_enabled = session.controllers_enabled;

    let mut camera = PanoramaCamera::new();
    if let Some(fov) = session.fov {
        camera.fov = fov;
    }
    let resolution = DisplayResolution::new(
        session.resolution.width,
        session.resolution.height,
        session.resolution.ratio,
    );
    let mut viewport = Viewport::new(camera, resolution);

    let view = create_view(&session.view)?;
    viewport.camera.fov = view.bounds().clamp_fov(viewport.camera.fov.to_radians()).to_degrees();

    let mut signals = GyroscopeSignals::new();
    let mut controller =
        GyroscopeController::new(session.controller, &mut signals, &platform, controllers_enabled);
    log::info!(
        "replaying {} steps, controller {:?} {}",
        session.steps.len(),
        controller.uid(),
        if controller.is_enabled() { "enabled" } else { "disabled" }
    );

    let mut uniforms = ViewUniforms::new();
    let mut frame = 0usize;

    for step in session.steps {
        match step {
            Step::DeviceOrientation(sample) => signals.dispatch_device_orientation(sample),
            Step::ScreenOrientation(angle) => {
                platform.screen_angle = angle;
                signals.dispatch_screen_orientation();
            }
            Step::ControllersEnabled(enabled) => controllers_enabled = enabled,
            Step::Enable => controller.enable(&mut signals, &platform, controllers_enabled),
            Step::Disable => controller.disable(&mut signals, controllers_enabled),
            Step::Frame => {
                controller.handle_events(&platform, controllers_enabled);
                controller.update(&mut viewport.camera);
                uniforms.update_camera(&viewport);
                view.update_uniforms(&mut uniforms);

                let q = viewport.camera.rotation;
                let (yaw, pitch) = viewport.camera.yaw_pitch();
                println!(
                    "frame {:>4}  q=({:+.5}, {:+.5}, {:+.5}, {:+.5})  yaw {:+7.2}°  pitch {:+6.2}°",
                    frame, q.x, q.y, q.z, q.w, yaw, pitch
                );
                frame += 1;
            }
            Step::Pick([x, y]) => {
                let dir = view.screen_to_world(Vec2::new(x, y), &viewport);
                println!("pick ({}, {}) -> ({:+.4}, {:+.4}, {:+.4})", x, y, dir.x, dir.y, dir.z);
            }
            Step::Project([x, y, z]) => match view.world_to_screen(Vec3::new(x, y, z), 0.0, &viewport) {
                Some(p) => println!("project ({}, {}, {}) -> ({}, {})", x, y, z, p.x, p.y),
                None => println!("project ({}, {}, {}) -> not visible in {} view", x, y, z, view.view_type()),
            },
        }
    }

    controller.destroy(&mut signals, controllers_enabled);
    Ok(())
}
