#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Runner experience.
//!
//! ```bash
//! # Interactive window
//! maze-runner play --seed 7
//!
//! # Solve a generated maze in the terminal
//! maze-runner solve --algorithm bfs --rows 12 --columns 30
//!
//! # Run every strategy against the same maze
//! maze-runner compare --config maze-runner.toml
//! ```

mod config;
mod simulation;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use maze_runner_core::{Algorithm, Command, GamePhase};
use maze_runner_rendering::{
    text, Color, HudPresentation, Presentation, RenderingBackend, Scene, TileGridPresentation,
};
use maze_runner_rendering_macroquad::MacroquadBackend;
use maze_runner_system_navigation::{NavigationRequest, NavigationState};
use maze_runner_system_pathfinding::{search, SearchScratch};
use maze_runner_world::query;

use self::{
    config::{CliConfig, SessionArgs},
    simulation::Simulation,
};

/// Explore fog-covered mazes and compare search strategies.
#[derive(Parser, Debug)]
#[command(name = "maze-runner", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Open a window and play interactively (default)
    Play,
    /// Solve one maze in the terminal and print the walk
    Solve {
        /// Upper bound on simulated playback ticks
        #[arg(long, default_value_t = 10_000)]
        max_ticks: u32,
    },
    /// Run every algorithm against the same maze
    Compare,
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = CliConfig::load(&cli.session)?;
    let seed = cli.session.seed.unwrap_or_else(rand::random);
    log::info!("using seed {seed}");

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(&config, seed),
        Commands::Solve { max_ticks } => solve(&config, seed, max_ticks),
        Commands::Compare => compare(&config, seed),
    }
}

fn simulation(config: &CliConfig, seed: u64) -> Simulation {
    Simulation::new(
        config.session,
        config.navigation_config(),
        config.navigation.algorithm,
        seed,
    )
}

fn blank_scene(config: &CliConfig, banner: &str) -> Result<Scene> {
    let grid = TileGridPresentation::new(
        config.session.columns,
        config.session.rows,
        TileGridPresentation::DEFAULT_CELL_LENGTH,
        Color::from_rgb_u8(48, 50, 60),
    )
    .context("invalid grid presentation")?;
    Ok(Scene::new(grid, HudPresentation::new(banner)))
}

fn play(config: &CliConfig, seed: u64) -> Result<()> {
    let mut simulation = simulation(config, seed);
    let scene = blank_scene(config, query::welcome_banner(simulation.world()))?;
    let presentation = Presentation::new("Maze Runner", Color::from_rgb_u8(12, 12, 16), scene);

    let window = config.window;
    MacroquadBackend::new()
        .with_vsync(window.vsync)
        .with_show_fps(window.show_fps)
        .with_window_size(window.width, window.height)
        .run(presentation, move |dt, input, scene| {
            simulation.handle_frame(dt, input);
            simulation.populate_scene(scene);
        })
}

fn solve(config: &CliConfig, seed: u64, max_ticks: u32) -> Result<()> {
    let mut simulation = simulation(config, seed);
    let session_seed = simulation.new_session();
    simulation.apply(Command::StartMission);
    if simulation.phase() != GamePhase::Running {
        bail!("maze generation was rejected");
    }

    let algorithm = simulation.algorithm();
    simulation.request(NavigationRequest::Solve { algorithm });

    let mut scene = blank_scene(config, "")?;
    simulation.set_reveal_all(true);
    simulation.populate_scene(&mut scene);
    println!("maze seed {session_seed:#018x}, planned with {algorithm}:");
    print!("{}", text::render_scene(&scene));

    let step_delay = config.navigation_config().step_delay.max(Duration::from_millis(1));
    let mut ticks = 0;
    while simulation.navigation_state() == NavigationState::Walking && ticks < max_ticks {
        simulation.tick(step_delay);
        ticks += 1;
    }

    simulation.set_reveal_all(false);
    simulation.populate_scene(&mut scene);
    println!();
    print!("{}", text::render_scene(&scene));

    let stats = simulation.stats();
    match simulation.navigation_state() {
        NavigationState::Won => println!(
            "{algorithm} escaped in {} steps after exploring {} cells",
            stats.steps, stats.explored
        ),
        NavigationState::Walking => println!("stopped after {ticks} ticks while still walking"),
        NavigationState::Idle => {
            let agent = simulation
                .agent()
                .map_or_else(|| "nowhere".to_owned(), |cell| cell.to_string());
            println!(
                "{algorithm} found no path after exploring {} cells; agent stays at {agent}",
                stats.explored
            );
        }
    }
    Ok(())
}

fn compare(config: &CliConfig, seed: u64) -> Result<()> {
    let mut simulation = simulation(config, seed);
    let session_seed = simulation.new_session();
    let world = simulation.world();
    let (Some(grid), Some(start), Some(end)) = (
        query::grid_view(world),
        query::start(world),
        query::end(world),
    ) else {
        bail!("maze generation was rejected");
    };

    println!("maze seed {session_seed:#018x}, {start} -> {end}");
    println!("{:<4} {:>8} {:>9} {:>8}", "algo", "reached", "explored", "length");
    let mut scratch = SearchScratch::new();
    for algorithm in Algorithm::ALL {
        let outcome = search(algorithm, &grid, start, end, &mut scratch);
        println!(
            "{:<4} {:>8} {:>9} {:>8}",
            algorithm.label(),
            outcome.reached,
            outcome.explored_count(),
            outcome.path.len()
        );
    }
    Ok(())
}
