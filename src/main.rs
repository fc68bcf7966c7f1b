#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod game;
mod resources;
mod systems;

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use clap::Parser;

use crate::resources::gameconfig::GameConfig;
use crate::resources::inputtrace::InputTrace;
use crate::resources::level::LevelGrid;
use crate::resources::texturestore::TextureStore;
use crate::systems::input::{toggle_debug_mode, update_input_state};
use crate::systems::render::render_system;

#[derive(Parser)]
#[command(version, about = "Sidearm: a small side-scrolling run-and-gun")]
struct Cli {
    /// INI file with window and gameplay settings.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON level file. Uses the built-in level when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Run this many frames without a window and print a summary.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Fixed frame delta for headless runs, in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Replay a recorded input trace without a window.
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Directory holding the PNG textures.
    #[arg(long, value_name = "DIR", default_value = "./assets")]
    assets: PathBuf,
}

fn report(world: &mut World) {
    let summary = game::summarize(world);
    log::info!("Run finished: {:?}", summary);
    println!(
        "frames={} elapsed={:.3}s player={:?} state={:?} bullets={} enemies_alive={} enemies_dead={}",
        summary.frames,
        summary.elapsed,
        summary.player_position.map(|p| (p.x, p.y)),
        summary.player_state,
        summary.bullets,
        summary.live_enemies,
        summary.dead_enemies
    );
}

fn run_windowed(mut world: World, mut update: Schedule, assets: &Path) {
    let config = world.resource::<GameConfig>().clone();

    let mut builder = raylib::init();
    builder
        .size(config.window_width as i32, config.window_height as i32)
        .title("Sidearm");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    let mut textures = TextureStore::new();
    textures.load_dir(&mut rl, &thread, assets, &game::tex::ALL);
    world.insert_resource(textures);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut input = Schedule::default();
    input.add_systems((update_input_state, toggle_debug_mode).chain());
    let mut render = Schedule::default();
    render.add_systems(render_system);

    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        input.run(&mut world);
        game::step_frame(&mut world, &mut update, dt);
        render.run(&mut world);
    }

    // Textures must be unloaded while the window still exists.
    world.remove_resource::<TextureStore>();
    report(&mut world);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    let level = match &cli.level {
        Some(path) => LevelGrid::from_file(path),
        None => Ok(LevelGrid::default_level()),
    };
    let level = match level {
        Ok(level) => level,
        Err(e) => {
            log::error!("Failed to load level: {}", e);
            std::process::exit(1);
        }
    };

    let mut world = World::new();
    if let Err(e) = game::setup_world(&mut world, config, &level) {
        log::error!("Invalid level: {}", e);
        std::process::exit(1);
    }
    let mut update = game::build_update_schedule();

    if let Some(path) = &cli.replay {
        let trace = match InputTrace::from_file(path) {
            Ok(trace) => trace,
            Err(e) => {
                log::error!("Failed to load input trace: {}", e);
                std::process::exit(1);
            }
        };
        log::info!(
            "Replaying {} frames ({:.2}s) from {}",
            trace.frames.len(),
            trace.duration(),
            path.display()
        );
        game::run_trace(&mut world, &mut update, &trace);
        report(&mut world);
        return;
    }

    if let Some(frames) = cli.headless {
        if !(cli.dt.is_finite() && cli.dt >= 0.0) {
            log::error!("--dt must be a non-negative number of seconds");
            std::process::exit(1);
        }
        log::info!("Running {} headless frames at dt={}", frames, cli.dt);
        game::run_frames(&mut world, &mut update, frames, cli.dt);
        report(&mut world);
        return;
    }

    run_windowed(world, update, &cli.assets);
}
