//! Scenecore demo
//!
//! Runs the scene core headless: imports a model, authors a square
//! trajectory through the same actions the keyboard triggers, then steps the
//! camera and waypoint motion for a number of fixed-length frames.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{debug, info};
use winit::{event::DeviceEvent, event::ElementState, keyboard::KeyCode};

use scenecore::gfx::camera::CameraManager;
use scenecore::gfx::geometry::{generate_cube, obj::load_obj_or_empty};
use scenecore::gfx::resources::material::{load_mtl, load_mtl_or_default, Material};
use scenecore::gfx::scene::{Mesh, MotionSettings, RotationAxis, SceneContext};
use scenecore::input::{Axis, Direction, SceneAction};
use scenecore::performance::FrameClock;
use scenecore::simulation::{SimulationManager, WaypointMotion};

/// Headless scene core demo
#[derive(Parser, Debug)]
#[command(name = "scenecore-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Import a model and run waypoint motion without a window")]
struct Cli {
    /// OBJ model to import (defaults to a unit cube)
    #[arg(long)]
    obj: Option<PathBuf>,

    /// MTL file (defaults to the model's mtllib)
    #[arg(long)]
    mtl: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frame length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Stop at the last waypoint instead of looping
    #[arg(long)]
    no_loop: bool,

    /// Minimum seconds between repeated authoring actions
    #[arg(long, default_value_t = 0.2)]
    debounce: f64,
}

/// An unreadable model is logged and replaced by an empty mesh
fn load_mesh(cli: &Cli) -> (Mesh, Option<PathBuf>) {
    let Some(path) = &cli.obj else {
        return (generate_cube().to_mesh(), None);
    };

    let mesh = load_obj_or_empty(path);
    let stats = mesh.stats();
    info!(
        "Imported {}: {} positions, {} normals, {} tex coords, {} triangles",
        path.display(),
        stats.positions,
        stats.normals,
        stats.tex_coords,
        stats.triangles
    );
    let material_path = mesh.material_path();
    (mesh.into_mesh(), material_path)
}

fn load_material(cli: &Cli, library: Option<PathBuf>) -> Result<Material> {
    if let Some(path) = &cli.mtl {
        return load_mtl(path).with_context(|| format!("importing {}", path.display()));
    }
    Ok(library.map(load_mtl_or_default).unwrap_or_default())
}

/// Authors a unit square for the selected object, one side per nudge run
fn author_square(scene: &mut SceneContext, now: &mut f64) {
    let step = scene.settings.debounce_interval + 0.01;
    let nudges = (1.0 / scene.settings.nudge_step).round() as usize;
    let sides = [
        (Axis::X, Direction::Positive),
        (Axis::Z, Direction::Negative),
        (Axis::X, Direction::Negative),
    ];

    scene.apply(SceneAction::AddWaypoint, *now);
    // A held key inside the debounce window adds nothing
    if !scene.apply(SceneAction::AddWaypoint, *now) {
        debug!("Repeated waypoint suppressed");
    }

    for (axis, direction) in sides {
        for _ in 0..nudges {
            scene.apply(SceneAction::Nudge(axis, direction), *now);
        }
        *now += step;
        scene.apply(SceneAction::AddWaypoint, *now);
    }
}

impl Cli {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "--dt must be a positive number of seconds, got {}",
            self.dt
        );
        ensure!(
            self.debounce.is_finite() && self.debounce >= 0.0,
            "--debounce must be a non-negative number of seconds, got {}",
            self.debounce
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cli.validate()?;

    let (mesh, library) = load_mesh(&cli);
    let material = load_material(&cli, library)?;
    info!(
        "Material '{}': Kd {:?}, Ns {}",
        material.name, material.diffuse, material.shininess
    );

    let settings = MotionSettings {
        debounce_interval: cli.debounce,
        ..MotionSettings::default()
    };
    let mut scene = SceneContext::with_settings(CameraManager::default(), mesh, material, settings);
    scene.seed_demo_objects();
    for object in &mut scene.objects {
        object.loop_trajectory = !cli.no_loop;
    }

    let mut now = 0.0;
    author_square(&mut scene, &mut now);
    scene.apply(SceneAction::SetRotation(RotationAxis::Y), now);
    scene.apply(SceneAction::ToggleMotion, now);

    let mut manager = SimulationManager::new();
    manager.attach_simulation(Box::new(WaypointMotion::new()), &mut scene);

    // Glance right and walk forward for the first half second
    scene
        .camera_manager
        .process_event(&DeviceEvent::MouseMotion { delta: (50.0, 0.0) });
    scene.handle_key(KeyCode::KeyW, ElementState::Pressed, now);
    let walk_frames = (0.5 / cli.dt).ceil() as u32;

    let mut clock = FrameClock::new();
    for frame in 0..cli.frames {
        if frame == walk_frames {
            scene.handle_key(KeyCode::KeyW, ElementState::Released, now);
        }
        clock.record(Duration::from_secs_f32(cli.dt));
        scene.update(cli.dt);
        manager.update(cli.dt, &mut scene);
    }

    for (index, object) in scene.objects.iter().enumerate() {
        let p = object.position;
        info!(
            "Object {}: ({:.3}, {:.3}, {:.3}), target {}/{}, {}",
            index,
            p.x,
            p.y,
            p.z,
            object.current_target,
            object.waypoints.len(),
            if object.is_moving { "moving" } else { "idle" }
        );
    }

    let camera = &scene.camera_manager.camera;
    let eye = camera.position();
    info!(
        "Camera at ({:.3}, {:.3}, {:.3}), yaw {:.1}, pitch {:.1}, fov {:.1}",
        eye.x,
        eye.y,
        eye.z,
        camera.yaw(),
        camera.pitch(),
        camera.fov()
    );
    debug!("View-projection: {:?}", scene.camera_manager.get_view_proj_matrix());
    if let Some(model) = scene.model_matrix(0) {
        debug!("Model matrix of object 0: {:?}", model);
    }

    let stats = scene.get_statistics();
    let metrics = clock.metrics();
    info!(
        "Simulated {} frames ({:.2} s at {:.1} fps): {} objects, {} moving, {} waypoints",
        metrics.frame_count,
        clock.elapsed_secs(),
        metrics.fps,
        stats.object_count,
        stats.moving_objects,
        stats.total_waypoints
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("scenecore-demo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_frame_length_must_be_finite_and_positive() {
        assert!(parse(&[]).validate().is_ok());
        assert!(parse(&["--dt", "inf"]).validate().is_err());
        assert!(parse(&["--dt", "NaN"]).validate().is_err());
        assert!(parse(&["--dt", "0"]).validate().is_err());
        assert!(parse(&["--debounce", "inf"]).validate().is_err());
    }

    #[test]
    fn test_missing_model_continues_with_empty_mesh() {
        let cli = parse(&["--obj", "/definitely/not/here/model.obj"]);
        let (mesh, library) = load_mesh(&cli);
        assert_eq!(mesh.vertex_count(), 0);
        assert!(library.is_none());

        let (cube, _) = load_mesh(&parse(&[]));
        assert_eq!(cube.triangle_count(), 12);
    }
}
