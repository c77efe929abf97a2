#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Navigation system that turns player requests into paced agent movement.
//!
//! The navigator gates solve, walk-to and manual-move requests on the session
//! phase and its own [`NavigationState`], asks the pathfinding strategies for
//! a route and then releases one [`Command::AdvanceAgent`] per step delay. It
//! also maintains the optional guide route shown to the player.

mod guide;
mod playback;

use std::time::Duration;

use log::{debug, info};
use maze_runner_core::{Algorithm, CellCoord, Command, Direction, Event, GamePhase, GridView};
use maze_runner_system_pathfinding::{search, SearchScratch};

use self::{guide::Guide, playback::Playback};

/// Delay between playback steps used when none is configured.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(60);

/// Tunables for the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Simulated time between consecutive playback steps.
    pub step_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}

/// Playback state of the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationState {
    /// Ready to accept a request.
    Idle,
    /// Walking a path; further requests are rejected.
    Walking,
    /// The goal was reached. Cleared by a new session or a return to the menu.
    Won,
}

/// Player intent forwarded by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Route the agent to the goal with the selected algorithm.
    Solve {
        /// Search strategy used to plan the route.
        algorithm: Algorithm,
    },
    /// Route the agent to an arbitrary cell using A*.
    WalkTo {
        /// Destination picked by the player.
        cell: CellCoord,
    },
    /// Step the agent once in a direction.
    Move {
        /// Direction of the step.
        direction: Direction,
    },
}

/// Read-only snapshot of the maze handed to the navigator each frame.
#[derive(Clone, Copy, Debug)]
pub struct NavigationView<'a> {
    /// Current cells of the maze.
    pub grid: GridView<'a>,
    /// Cell occupied by the agent.
    pub agent: CellCoord,
    /// Goal cell.
    pub end: CellCoord,
}

/// Pure system that reacts to world events and player requests.
#[derive(Debug)]
pub struct Navigator {
    config: Config,
    phase: GamePhase,
    state: NavigationState,
    playback: Playback,
    guide: Guide,
    scratch: SearchScratch,
}

impl Navigator {
    /// Creates a navigator in the idle state.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            phase: GamePhase::Menu,
            state: NavigationState::Idle,
            playback: Playback::default(),
            guide: Guide::default(),
            scratch: SearchScratch::new(),
        }
    }

    /// Current playback state.
    #[must_use]
    pub const fn state(&self) -> NavigationState {
        self.state
    }

    /// Reports whether playback is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state == NavigationState::Walking
    }

    /// Cells of the active path the agent has not stepped onto yet.
    #[must_use]
    pub fn active_path(&self) -> &[CellCoord] {
        self.playback.remaining()
    }

    /// Advisory route from the agent to the goal, empty when hidden or unreachable.
    #[must_use]
    pub fn guide_path(&self) -> &[CellCoord] {
        self.guide.path()
    }

    /// Reports whether the guide is switched on.
    #[must_use]
    pub const fn guide_enabled(&self) -> bool {
        self.guide.is_enabled()
    }

    /// Switches the guide on or off. The route is computed on the next `handle`.
    pub fn set_guide_enabled(&mut self, enabled: bool) {
        self.guide.set_enabled(enabled);
    }

    /// Consumes world events and an optional request, emitting world commands.
    ///
    /// Events are processed first, then the request, then the playback clock,
    /// and finally the guide is refreshed against `view`.
    pub fn handle(
        &mut self,
        events: &[Event],
        request: Option<NavigationRequest>,
        view: Option<NavigationView<'_>>,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            self.observe(event);
        }

        if let Some(request) = request {
            self.dispatch(request, view.as_ref(), out);
        }

        if self.state == NavigationState::Walking {
            if let Some(to) = self.playback.next_step(self.config.step_delay) {
                out.push(Command::AdvanceAgent { to });
            } else if self.playback.is_finished() {
                debug!("playback finished");
                self.playback.cancel();
                self.state = NavigationState::Idle;
            }
        }

        let showing = self.phase == GamePhase::Running && self.state != NavigationState::Won;
        match view {
            Some(view) => self
                .guide
                .refresh(showing, Some(&view.grid), view.agent, view.end),
            None => self.guide.clear(),
        }
    }

    fn observe(&mut self, event: &Event) {
        match event {
            Event::SessionCreated { .. } => {
                self.playback.cancel();
                self.state = NavigationState::Idle;
                self.guide.clear();
            }
            Event::PhaseChanged { phase } => {
                self.phase = *phase;
                match phase {
                    GamePhase::Won => {
                        self.playback.cancel();
                        self.state = NavigationState::Won;
                    }
                    GamePhase::Menu | GamePhase::Briefing => {
                        self.playback.cancel();
                        self.state = NavigationState::Idle;
                    }
                    GamePhase::Running => self.guide.invalidate(),
                }
            }
            Event::TimeAdvanced { dt } => self.playback.accumulate(*dt),
            Event::AgentMoved { .. } | Event::WallToggled { .. } => self.guide.invalidate(),
            Event::GoalReached { steps } => {
                info!("agent arrived after {steps} steps");
                self.playback.cancel();
                self.state = NavigationState::Won;
            }
            Event::AgentMoveRejected { reason } if self.state == NavigationState::Walking => {
                debug!("playback aborted: {reason}");
                self.playback.cancel();
                self.state = NavigationState::Idle;
            }
            _ => {}
        }
    }

    fn dispatch(
        &mut self,
        request: NavigationRequest,
        view: Option<&NavigationView<'_>>,
        out: &mut Vec<Command>,
    ) {
        if self.phase != GamePhase::Running || self.state != NavigationState::Idle {
            debug!(
                "ignored {request:?} in phase {:?} while {:?}",
                self.phase, self.state
            );
            return;
        }
        let Some(view) = view else {
            debug!("ignored {request:?} without a maze");
            return;
        };

        let (algorithm, goal) = match request {
            NavigationRequest::Move { direction } => {
                out.push(Command::MoveAgent { direction });
                return;
            }
            NavigationRequest::Solve { algorithm } => (algorithm, view.end),
            NavigationRequest::WalkTo { cell } => {
                if !view.grid.contains(cell) || view.grid.is_wall(cell) {
                    debug!("ignored walk to unreachable target {cell}");
                    return;
                }
                (Algorithm::AStar, cell)
            }
        };

        let outcome = search(algorithm, &view.grid, view.agent, goal, &mut self.scratch);
        out.push(Command::RecordSearch {
            explored: outcome.explored_count(),
        });

        if outcome.path.is_empty() {
            debug!("no path from {} to {goal}", view.agent);
            return;
        }

        self.playback.start(outcome.path, self.config.step_delay);
        self.state = NavigationState::Walking;
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
