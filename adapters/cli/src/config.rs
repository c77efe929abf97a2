//! Layered configuration: built-in defaults, an optional TOML file, then flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use clap::Args;
use maze_runner_core::{Algorithm, SessionConfig};
use maze_runner_system_navigation::{Config as NavigationConfig, DEFAULT_STEP_DELAY};
use serde::Deserialize;

/// Flags shared by every subcommand. Each one overrides the configuration file.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct SessionArgs {
    /// TOML file with `[session]`, `[navigation]` and `[window]` tables
    #[arg(short, long, global = true)]
    pub(crate) config: Option<std::path::PathBuf>,

    /// Seed for maze generation; random when omitted
    #[arg(long, global = true)]
    pub(crate) seed: Option<u64>,

    /// Number of maze rows
    #[arg(long, global = true)]
    pub(crate) rows: Option<u32>,

    /// Number of maze columns
    #[arg(long, global = true)]
    pub(crate) columns: Option<u32>,

    /// Chance in 0.0..=1.0 that a generated cell is a wall
    #[arg(long, global = true)]
    pub(crate) wall_probability: Option<f32>,

    /// Manhattan radius of the fog reveal around the agent
    #[arg(long, global = true)]
    pub(crate) reveal_radius: Option<u32>,

    /// Search strategy: bfs, dfs or astar
    #[arg(short, long, global = true)]
    pub(crate) algorithm: Option<Algorithm>,
}

/// Contents of the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    pub(crate) session: SessionConfig,
    pub(crate) navigation: NavigationSettings,
    pub(crate) window: WindowSettings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct NavigationSettings {
    pub(crate) step_delay_ms: u64,
    pub(crate) algorithm: Algorithm,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            step_delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
            algorithm: Algorithm::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct WindowSettings {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            show_fps: false,
        }
    }
}

impl CliConfig {
    /// Loads the file named by `--config`, if any, and applies the flag overrides.
    pub(crate) fn load(args: &SessionArgs) -> Result<Self> {
        let mut config = match args.config.as_deref() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        config
            .session
            .validate()
            .context("invalid session configuration")?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_overrides(&mut self, args: &SessionArgs) {
        if let Some(rows) = args.rows {
            self.session.rows = rows;
        }
        if let Some(columns) = args.columns {
            self.session.columns = columns;
        }
        if let Some(probability) = args.wall_probability {
            self.session.wall_probability = probability;
        }
        if let Some(radius) = args.reveal_radius {
            self.session.reveal_radius = radius;
        }
        if let Some(algorithm) = args.algorithm {
            self.navigation.algorithm = algorithm;
        }
    }

    /// Navigator tunables derived from the `[navigation]` table.
    pub(crate) fn navigation_config(&self) -> NavigationConfig {
        NavigationConfig {
            step_delay: Duration::from_millis(self.navigation.step_delay_ms),
        }
    }
}
