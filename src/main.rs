#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod camera;
mod collision;
mod config;
mod constants;
mod entities;
mod entity;
mod event_dispatch;
mod events;
mod geom;
mod input;
mod level;
mod map;
mod physics;
mod render;
mod script;
mod state;

use input::{Action, InputState};
use level::GameStatus;

// ---------------------------------------------------------------------------------------------------------------------

#[derive(StructOpt, Debug)]
#[structopt(name = "smb", about = "Headless side-scrolling platformer simulation")]
struct Options {
    /// Level file to load
    #[structopt(short, long, parse(from_os_str), default_value = "res/1-1.txt")]
    level: PathBuf,

    /// Input script to replay; without one the player stands still
    #[structopt(short, long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Number of frames to simulate. Defaults to the script's length, or 600
    #[structopt(short, long)]
    frames: Option<u64>,

    /// Milliseconds per frame. Defaults to 16
    #[structopt(long)]
    dt: Option<f32>,

    /// Override the per-tick gravity
    #[structopt(long)]
    gravity: Option<f32>,

    /// Override the vertical velocity cap
    #[structopt(long)]
    max_velocity: Option<f32>,

    /// Print the camera's view of the level when the run ends
    #[structopt(long)]
    snapshot: bool,
}

const DEFAULT_FRAME_COUNT: u64 = 600;

// ---------------------------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = Options::from_args();

    let mut config = config::SimConfig::default();
    if let Some(gravity) = opt.gravity {
        config.gravity = gravity;
    }
    if let Some(max_velocity) = opt.max_velocity {
        config.max_velocity = max_velocity;
    }

    let script = match &opt.script {
        Some(path) => script::InputScript::load(path)?,
        None => script::InputScript::default(),
    };
    let dt = opt.dt.unwrap_or(constants::DEFAULT_FRAME_DT);
    let frames = opt.frames.unwrap_or_else(|| {
        if script.total_frames() > 0 {
            script.total_frames()
        } else {
            DEFAULT_FRAME_COUNT
        }
    });

    let mut level = level::Level::load(&opt.level, config)?;
    let mut camera = camera::Camera::new(level.config());
    let mut input = InputState::default();
    if level.player().is_none() {
        warn!("Level {} has no player", opt.level.display());
    }

    for frame in 0..frames {
        input.update(script.actions_for_frame(frame));

        if input.is_active(Action::Quit) {
            info!("Quit on frame {}", frame);
            break;
        }
        if input.is_active(Action::Pause) {
            continue;
        }

        level.update(dt, &input);
        camera.update(&level);

        match level.status() {
            GameStatus::Running | GameStatus::NoPlayer => {}
            status => {
                info!("Run ended on frame {}: {:?}", frame, status);
                break;
            }
        }
    }

    let tally = level.tally();
    info!(
        "Simulated {} frames. coins: {} mushrooms: {} stomps: {} enemies woken: {}",
        level.frame(),
        tally.coins,
        tally.mushrooms,
        tally.stomps,
        tally.enemies_activated
    );

    if opt.snapshot {
        let config = level.config();
        let mut canvas =
            render::TextCanvas::new(config.screen_width, config.screen_height, config.tile_size);
        render::draw(&level, &camera, &mut canvas);
        print!("{}", canvas);
    }

    Ok(())
}
