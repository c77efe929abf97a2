#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Runner.

mod generation;
mod grid;
mod visibility;

use log::{debug, info, trace};
use maze_runner_core::{
    CellCoord, Command, EditError, Event, GamePhase, MazeLayout, MoveError, SessionError, Stats,
    WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::grid::Grid;

/// Represents the authoritative Maze Runner world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    phase: GamePhase,
    session: Option<Session>,
}

impl World {
    /// Creates a new world resting in the menu without a maze.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            phase: GamePhase::Menu,
            session: None,
        }
    }

    fn install(&mut self, layout: &MazeLayout, reveal_radius: u32, out_events: &mut Vec<Event>) {
        let grid = match Grid::from_layout(layout) {
            Ok(grid) => grid,
            Err(error) => {
                debug!("rejected maze layout: {error}");
                out_events.push(Event::SessionRejected {
                    reason: SessionError::Layout(error),
                });
                return;
            }
        };

        let mut session = Session::new(grid, reveal_radius);
        let start = session.grid.start();
        let revealed = visibility::reveal(&mut session.grid, start, reveal_radius);

        info!(
            "new {}x{} maze, start {} end {}, {} walls",
            layout.columns,
            layout.rows,
            layout.start,
            layout.end,
            layout.walls.len()
        );

        out_events.push(Event::SessionCreated {
            columns: layout.columns,
            rows: layout.rows,
            start,
            end: session.grid.end(),
        });
        if !revealed.is_empty() {
            out_events.push(Event::CellsRevealed { cells: revealed });
        }

        self.session = Some(session);
        self.set_phase(GamePhase::Briefing, out_events);
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn toggle_wall(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let result = match (&mut self.session, self.phase.allows_edits()) {
            (Some(session), true) => session.grid.toggle_wall(cell),
            _ => Err(EditError::InvalidPhase),
        };

        match result {
            Ok(wall) => out_events.push(Event::WallToggled { cell, wall }),
            Err(reason) => {
                debug!("rejected wall toggle at {cell}: {reason}");
                out_events.push(Event::WallToggleRejected { cell, reason });
            }
        }
    }

    fn move_agent(&mut self, destination: MoveTarget, out_events: &mut Vec<Event>) {
        let result = match (&mut self.session, self.phase) {
            (Some(session), GamePhase::Running) => session.move_agent(destination),
            _ => Err(MoveError::InvalidPhase),
        };

        let moved = match result {
            Ok(moved) => moved,
            Err(reason) => {
                debug!("rejected agent move {destination:?}: {reason}");
                out_events.push(Event::AgentMoveRejected { reason });
                return;
            }
        };

        trace!("agent {} -> {}", moved.from, moved.to);
        out_events.push(Event::AgentMoved {
            from: moved.from,
            to: moved.to,
        });
        if !moved.revealed.is_empty() {
            out_events.push(Event::CellsRevealed {
                cells: moved.revealed,
            });
        }

        if moved.arrived {
            info!("goal reached after {} steps", moved.steps);
            out_events.push(Event::GoalReached { steps: moved.steps });
            self.set_phase(GamePhase::Won, out_events);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewSession { config, seed } => {
            if let Err(error) = config.validate() {
                debug!("rejected session config: {error}");
                out_events.push(Event::SessionRejected {
                    reason: SessionError::Config(error),
                });
                return;
            }
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout = generation::generate_layout(&config, &mut rng);
            world.install(&layout, config.reveal_radius, out_events);
        }
        Command::LoadLayout {
            layout,
            reveal_radius,
        } => {
            world.install(&layout, reveal_radius, out_events);
        }
        Command::StartMission => {
            if world.phase == GamePhase::Briefing {
                world.set_phase(GamePhase::Running, out_events);
            } else {
                debug!("ignored mission start in phase {:?}", world.phase);
            }
        }
        Command::ReturnToMenu => {
            world.session = None;
            world.set_phase(GamePhase::Menu, out_events);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::ToggleWall { cell } => {
            world.toggle_wall(cell, out_events);
        }
        Command::MoveAgent { direction } => {
            world.move_agent(MoveTarget::Direction(direction), out_events);
        }
        Command::AdvanceAgent { to } => {
            world.move_agent(MoveTarget::PathCell(to), out_events);
        }
        Command::RecordSearch { explored } => {
            if let Some(session) = world.session.as_mut() {
                session.stats.explored = explored;
                out_events.push(Event::SearchRecorded { explored });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use maze_runner_core::{CellCoord, GamePhase, GridView, Stats};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Read-only view of the maze cells, if a maze exists.
    #[must_use]
    pub fn grid_view(world: &World) -> Option<GridView<'_>> {
        world.session.as_ref().map(|session| session.grid.view())
    }

    /// Cell currently occupied by the agent.
    #[must_use]
    pub fn agent(world: &World) -> Option<CellCoord> {
        world.session.as_ref().map(|session| session.agent)
    }

    /// Cell where the agent entered the maze.
    #[must_use]
    pub fn start(world: &World) -> Option<CellCoord> {
        world.session.as_ref().map(|session| session.grid.start())
    }

    /// Cell the agent must reach.
    #[must_use]
    pub fn end(world: &World) -> Option<CellCoord> {
        world.session.as_ref().map(|session| session.grid.end())
    }

    /// Counters for the current session. Zeroed when no maze exists.
    #[must_use]
    pub fn stats(world: &World) -> Stats {
        world
            .session
            .as_ref()
            .map(|session| session.stats)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
struct Session {
    grid: Grid,
    agent: CellCoord,
    reveal_radius: u32,
    stats: Stats,
}

impl Session {
    fn new(grid: Grid, reveal_radius: u32) -> Self {
        Self {
            agent: grid.start(),
            grid,
            reveal_radius,
            stats: Stats::default(),
        }
    }

    fn move_agent(&mut self, target: MoveTarget) -> Result<AgentMove, MoveError> {
        let view = self.grid.view();
        let to = match target {
            MoveTarget::Direction(direction) => {
                let to = direction
                    .step_from(self.agent)
                    .filter(|cell| view.contains(*cell))
                    .ok_or(MoveError::OutOfBounds)?;
                if view.is_wall(to) {
                    return Err(MoveError::Blocked);
                }
                to
            }
            MoveTarget::PathCell(to) => {
                if !view.contains(to) {
                    return Err(MoveError::OutOfBounds);
                }
                if !self.agent.is_adjacent_to(to) {
                    return Err(MoveError::NotAdjacent);
                }
                to
            }
        };

        let from = self.agent;
        self.agent = to;
        self.stats.steps = self.stats.steps.saturating_add(1);
        let _ = self.grid.mark_visited(to);
        let revealed = visibility::reveal(&mut self.grid, to, self.reveal_radius);

        Ok(AgentMove {
            from,
            to,
            revealed,
            arrived: to == self.grid.end(),
            steps: self.stats.steps,
        })
    }
}

#[derive(Clone, Copy, Debug)]
enum MoveTarget {
    Direction(maze_runner_core::Direction),
    PathCell(CellCoord),
}

#[derive(Debug)]
struct AgentMove {
    from: CellCoord,
    to: CellCoord,
    revealed: Vec<CellCoord>,
    arrived: bool,
    steps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{ConfigError, Direction, LayoutError, SessionConfig};

    fn corridor_layout() -> MazeLayout {
        MazeLayout::open(5, 3, CellCoord::new(0, 1), CellCoord::new(4, 1))
            .with_walls([CellCoord::new(1, 0), CellCoord::new(1, 2)])
    }

    fn running_world(layout: MazeLayout) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLayout {
                layout,
                reveal_radius: 1,
            },
            &mut events,
        );
        apply(&mut world, Command::StartMission, &mut events);
        world
    }

    #[test]
    fn new_world_rests_in_menu() {
        let world = World::new();
        assert_eq!(query::phase(&world), GamePhase::Menu);
        assert!(query::grid_view(&world).is_none());
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn load_layout_reveals_start_area_and_goal() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::LoadLayout {
                layout: corridor_layout(),
                reveal_radius: 1,
            },
            &mut events,
        );

        assert_eq!(
            events.first(),
            Some(&Event::SessionCreated {
                columns: 5,
                rows: 3,
                start: CellCoord::new(0, 1),
                end: CellCoord::new(4, 1),
            })
        );
        assert_eq!(
            events.last(),
            Some(&Event::PhaseChanged {
                phase: GamePhase::Briefing
            })
        );
        let view = query::grid_view(&world).expect("maze installed");
        assert!(view.is_revealed(CellCoord::new(0, 0)));
        assert!(view.is_revealed(CellCoord::new(1, 1)));
        assert!(view.is_revealed(CellCoord::new(4, 1)));
        assert!(!view.is_revealed(CellCoord::new(2, 1)));
        assert_eq!(query::agent(&world), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn moves_are_rejected_before_mission_starts() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLayout {
                layout: corridor_layout(),
                reveal_radius: 1,
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::MoveAgent {
                direction: Direction::East,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::AgentMoveRejected {
                reason: MoveError::InvalidPhase
            }]
        );
        assert_eq!(query::agent(&world), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn manual_move_marks_visited_and_reveals() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveAgent {
                direction: Direction::East,
            },
            &mut events,
        );

        assert_eq!(
            events[0],
            Event::AgentMoved {
                from: CellCoord::new(0, 1),
                to: CellCoord::new(1, 1),
            }
        );
        assert_eq!(
            events[1],
            Event::CellsRevealed {
                cells: vec![CellCoord::new(1, 0), CellCoord::new(2, 1), CellCoord::new(1, 2)]
            }
        );
        let view = query::grid_view(&world).expect("maze installed");
        assert!(view.cell(CellCoord::new(1, 1)).expect("cell").visited);
        assert_eq!(query::stats(&world).steps, 1);
    }

    #[test]
    fn manual_move_rejects_walls_and_edges() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveAgent {
                direction: Direction::West,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveAgent {
                direction: Direction::East,
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::MoveAgent {
                direction: Direction::North,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::AgentMoveRejected {
                reason: MoveError::Blocked
            }]
        );
        assert_eq!(query::agent(&world), Some(CellCoord::new(1, 1)));
        assert_eq!(query::stats(&world).steps, 1);
    }

    #[test]
    fn advance_walks_through_walls_but_requires_adjacency() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::AdvanceAgent {
                to: CellCoord::new(2, 1),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::AgentMoveRejected {
                reason: MoveError::NotAdjacent
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::AdvanceAgent {
                to: CellCoord::new(0, 0),
            },
            &mut events,
        );
        assert!(matches!(events[0], Event::AgentMoved { .. }));
        apply(
            &mut world,
            Command::AdvanceAgent {
                to: CellCoord::new(1, 0),
            },
            &mut events,
        );
        assert_eq!(query::agent(&world), Some(CellCoord::new(1, 0)));
    }

    #[test]
    fn reaching_goal_wins_and_locks_movement() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        for _ in 0..4 {
            apply(
                &mut world,
                Command::MoveAgent {
                    direction: Direction::East,
                },
                &mut events,
            );
        }

        assert!(events.contains(&Event::GoalReached { steps: 4 }));
        assert_eq!(query::phase(&world), GamePhase::Won);

        events.clear();
        apply(
            &mut world,
            Command::MoveAgent {
                direction: Direction::West,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::ToggleWall {
                cell: CellCoord::new(2, 0),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![
                Event::AgentMoveRejected {
                    reason: MoveError::InvalidPhase
                },
                Event::WallToggleRejected {
                    cell: CellCoord::new(2, 0),
                    reason: EditError::InvalidPhase
                },
            ]
        );
    }

    #[test]
    fn wall_edits_protect_start_and_end() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::ToggleWall {
                cell: CellCoord::new(4, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::ToggleWall {
                cell: CellCoord::new(3, 1),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::WallToggleRejected {
                    cell: CellCoord::new(4, 1),
                    reason: EditError::Protected
                },
                Event::WallToggled {
                    cell: CellCoord::new(3, 1),
                    wall: true
                },
            ]
        );
    }

    #[test]
    fn invalid_session_config_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::NewSession {
                config: SessionConfig {
                    rows: 0,
                    ..SessionConfig::default()
                },
                seed: 1,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::SessionRejected {
                reason: SessionError::Config(ConfigError::NoRows)
            }]
        );
        assert_eq!(query::phase(&world), GamePhase::Menu);
    }

    #[test]
    fn oversized_layouts_and_configs_are_rejected_without_allocating() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::LoadLayout {
                layout: MazeLayout::open(
                    u32::MAX,
                    u32::MAX,
                    CellCoord::new(0, 0),
                    CellCoord::new(1, 0),
                ),
                reveal_radius: 2,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::NewSession {
                config: SessionConfig {
                    columns: u32::MAX,
                    rows: u32::MAX,
                    ..SessionConfig::default()
                },
                seed: 3,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::SessionRejected {
                    reason: SessionError::Layout(LayoutError::TooLarge {
                        columns: u32::MAX,
                        rows: u32::MAX,
                    }),
                },
                Event::SessionRejected {
                    reason: SessionError::Config(ConfigError::TooLarge {
                        columns: u32::MAX,
                        rows: u32::MAX,
                    }),
                },
            ]
        );
        assert_eq!(query::phase(&world), GamePhase::Running);
        assert_eq!(query::agent(&world), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn new_session_is_reproducible_from_seed() {
        let mut first = World::new();
        let mut second = World::new();
        let mut first_events = Vec::new();
        let mut second_events = Vec::new();
        let command = Command::NewSession {
            config: SessionConfig::default(),
            seed: 0x5eed,
        };

        apply(&mut first, command.clone(), &mut first_events);
        apply(&mut second, command, &mut second_events);

        assert_eq!(first_events, second_events);
        let first_cells: Vec<_> = query::grid_view(&first).expect("maze").iter().collect();
        let second_cells: Vec<_> = query::grid_view(&second).expect("maze").iter().collect();
        assert_eq!(first_cells, second_cells);
    }

    #[test]
    fn return_to_menu_discards_the_maze() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(&mut world, Command::ReturnToMenu, &mut events);

        assert_eq!(
            events,
            vec![Event::PhaseChanged {
                phase: GamePhase::Menu
            }]
        );
        assert!(query::agent(&world).is_none());
        assert_eq!(query::stats(&world), Stats::default());
    }

    #[test]
    fn record_search_updates_stats() {
        let mut world = running_world(corridor_layout());
        let mut events = Vec::new();

        apply(&mut world, Command::RecordSearch { explored: 12 }, &mut events);

        assert_eq!(events, vec![Event::SearchRecorded { explored: 12 }]);
        assert_eq!(query::stats(&world).explored, 12);
    }
}
