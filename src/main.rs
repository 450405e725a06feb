//! Headless snake simulation runner.
//!
//! Loads a scene and a rules file, then steps the simulation at a fixed delta
//! and logs every command that would reach the audio, camera, score label
//! and menu collaborators.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scene level1.json --frames 600
//! ```
//!
//! Without `--scene` a small built-in level is used.

use std::path::PathBuf;

use bevy_ecs::prelude::Entity;
use clap::Parser;
use log::{error, info};

use snakecore::components::snake::FruitCount;
use snakecore::events::feedback::{Collaborators, Color, Screen};
use snakecore::game::{RuleTag, Scene, SceneError, SceneObject, spawn_scene};
use snakecore::resources::gameconfig::GameConfig;
use snakecore::resources::gamestate::GameStates;
use snakecore::simulation::Simulation;

/// Snake simulation core, headless runner
#[derive(Parser)]
#[command(version, about = "Steps the snake simulation without a window and logs its feedback.")]
struct Cli {
    /// Scene description in JSON.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Rules file in INI format.
    #[arg(long, value_name = "PATH", default_value = "./snake.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 900)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

/// Collaborators that only log what they are asked to do.
struct LoggingCollaborators;

impl Collaborators for LoggingCollaborators {
    fn play(&mut self, sound_id: &str) {
        info!("[audio] play {sound_id}");
    }

    fn follow(&mut self, entity: Entity) {
        info!("[camera] follow {entity:?}");
    }

    fn animate_count(&mut self, label: &str, value: u32, color: Color, size: f32, duration: f32) {
        info!(
            "[score] {label} = {value} (rgb {},{},{}, size {size}, {duration}s)",
            color.r, color.g, color.b
        );
    }

    fn show_screen(&mut self, screen: Screen) {
        info!("[menu] show {screen:?}");
    }
}

/// A corridor with a fruit, a speed boost, a bounce block and a wall behind it.
fn demo_scene() -> Scene {
    Scene {
        objects: vec![
            SceneObject::new("head", 0.0, 0.0, RuleTag::Head),
            SceneObject::new("apple", 24.0, 0.0, RuleTag::Fruit),
            SceneObject::new("boost", 48.0, 0.0, RuleTag::Speed),
            SceneObject::new("boing", 96.0, 0.0, RuleTag::Bounce),
            SceneObject::new("box", -64.0, 0.0, RuleTag::Wall).with_extent(8.0, 32.0),
        ],
    }
}

fn load_scene(cli: &Cli) -> Result<Scene, SceneError> {
    match &cli.scene {
        Some(path) => Scene::load_from_file(path),
        None => Ok(demo_scene()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("Using default rules: {e}");
    }

    let scene = match load_scene(&cli) {
        Ok(scene) => scene,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let mut sim = Simulation::new(config.clone());
    let head = match spawn_scene(sim.world_mut(), &scene, &config) {
        Ok(head) => head,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let mut collaborators = LoggingCollaborators;
    let mut frames_run = 0;
    for _ in 0..cli.frames {
        sim.update(cli.dt);
        sim.dispatch_feedback(&mut collaborators);
        frames_run += 1;
        if sim.game_state() == GameStates::GameOver {
            break;
        }
    }

    let count = sim.get::<FruitCount>(head).copied().unwrap_or_default();
    info!(
        "Stopped after {frames_run} frames: state {:?}, {}/{} fruits eaten",
        sim.game_state(),
        count.eaten,
        count.goal
    );
}
