use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use maze_runner_core::{
    Algorithm, CellCoord, Command, Direction, Event, GamePhase, MazeLayout, SessionConfig,
};
use maze_runner_system_navigation::{
    NavigationRequest, NavigationState, NavigationView, Navigator, DEFAULT_STEP_DELAY,
};
use maze_runner_world::{self as world, query, World};

struct Harness {
    world: World,
    navigator: Navigator,
    log: Vec<Event>,
}

impl Harness {
    fn new() -> Self {
        Self {
            world: World::new(),
            navigator: Navigator::default(),
            log: Vec::new(),
        }
    }

    fn running(layout: MazeLayout) -> Self {
        let mut harness = Self::new();
        harness.command(Command::LoadLayout {
            layout,
            reveal_radius: 2,
        });
        harness.command(Command::StartMission);
        harness
    }

    fn command(&mut self, command: Command) {
        self.pump(Some(command), None);
    }

    fn request(&mut self, request: NavigationRequest) {
        self.pump(None, Some(request));
    }

    fn tick(&mut self) {
        self.command(Command::Tick {
            dt: DEFAULT_STEP_DELAY,
        });
    }

    fn pump(&mut self, command: Option<Command>, mut request: Option<NavigationRequest>) {
        let mut events = Vec::new();
        if let Some(command) = command {
            world::apply(&mut self.world, command, &mut events);
        }

        loop {
            let mut commands = Vec::new();
            self.navigator
                .handle(&events, request.take(), view(&self.world), &mut commands);
            self.log.append(&mut events);
            if commands.is_empty() {
                break;
            }
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }

    fn agent(&self) -> CellCoord {
        query::agent(&self.world).expect("agent placed")
    }
}

fn view(world: &World) -> Option<NavigationView<'_>> {
    Some(NavigationView {
        grid: query::grid_view(world)?,
        agent: query::agent(world)?,
        end: query::end(world)?,
    })
}

fn corridor(columns: u32, rows: u32) -> MazeLayout {
    let row = rows / 2;
    MazeLayout::open(
        columns,
        rows,
        CellCoord::new(0, row),
        CellCoord::new(columns - 1, row),
    )
}

#[test]
fn solve_walks_agent_to_goal() {
    let mut harness = Harness::running(corridor(6, 3));

    harness.request(NavigationRequest::Solve {
        algorithm: Algorithm::BreadthFirst,
    });
    assert_eq!(harness.agent(), CellCoord::new(1, 1));
    assert_eq!(harness.navigator.state(), NavigationState::Walking);

    for _ in 0..10 {
        harness.tick();
    }

    assert_eq!(harness.agent(), CellCoord::new(5, 1));
    assert_eq!(query::phase(&harness.world), GamePhase::Won);
    assert_eq!(harness.navigator.state(), NavigationState::Won);
    assert!(harness.log.contains(&Event::GoalReached { steps: 5 }));

    let recorded = harness.log.iter().find_map(|event| match event {
        Event::SearchRecorded { explored } => Some(*explored),
        _ => None,
    });
    let stats = query::stats(&harness.world);
    assert_eq!(Some(stats.explored), recorded);
    assert_eq!(stats.steps, 5);

    let view = query::grid_view(&harness.world).expect("maze installed");
    for column in 1..6 {
        assert!(view.cell(CellCoord::new(column, 1)).expect("cell").visited);
    }
}

#[test]
fn unreachable_goal_leaves_agent_in_place() {
    let start = CellCoord::new(0, 0);
    let layout = MazeLayout::open(5, 5, start, CellCoord::new(4, 4))
        .with_walls((0..5).map(|column| CellCoord::new(column, 2)));

    for algorithm in Algorithm::ALL {
        let mut harness = Harness::running(layout.clone());

        harness.request(NavigationRequest::Solve { algorithm });
        for _ in 0..5 {
            harness.tick();
        }

        assert_eq!(harness.agent(), start, "{algorithm} moved the agent");
        assert_eq!(query::stats(&harness.world).steps, 0);
        assert_eq!(harness.navigator.state(), NavigationState::Idle);
        assert_eq!(query::phase(&harness.world), GamePhase::Running);
        assert!(!harness
            .log
            .iter()
            .any(|event| matches!(event, Event::AgentMoved { .. })));
    }
}

#[test]
fn steps_are_paced_by_simulated_time() {
    let mut harness = Harness::running(corridor(6, 1));

    harness.request(NavigationRequest::Solve {
        algorithm: Algorithm::AStar,
    });
    harness.command(Command::Tick {
        dt: Duration::from_millis(20),
    });
    assert_eq!(harness.agent(), CellCoord::new(1, 0));

    harness.command(Command::Tick {
        dt: Duration::from_millis(40),
    });
    assert_eq!(harness.agent(), CellCoord::new(2, 0));
}

#[test]
fn wall_toggled_onto_planned_path_is_walked_through() {
    let mut harness = Harness::running(corridor(5, 1));

    harness.request(NavigationRequest::Solve {
        algorithm: Algorithm::AStar,
    });
    harness.command(Command::ToggleWall {
        cell: CellCoord::new(2, 0),
    });
    assert!(harness.log.contains(&Event::WallToggled {
        cell: CellCoord::new(2, 0),
        wall: true,
    }));

    for _ in 0..5 {
        harness.tick();
    }

    assert!(harness.log.contains(&Event::AgentMoved {
        from: CellCoord::new(1, 0),
        to: CellCoord::new(2, 0),
    }));
    assert_eq!(query::phase(&harness.world), GamePhase::Won);
}

#[test]
fn busy_navigator_rejects_new_requests() {
    let mut harness = Harness::running(corridor(8, 3));

    harness.request(NavigationRequest::Solve {
        algorithm: Algorithm::DepthFirst,
    });
    harness.request(NavigationRequest::WalkTo {
        cell: CellCoord::new(0, 0),
    });
    harness.request(NavigationRequest::Move {
        direction: Direction::North,
    });

    let searches = harness
        .log
        .iter()
        .filter(|event| matches!(event, Event::SearchRecorded { .. }))
        .count();
    assert_eq!(searches, 1);
    assert!(!harness
        .log
        .iter()
        .any(|event| matches!(event, Event::AgentMoveRejected { .. })));
}

#[test]
fn walk_to_finishes_idle_at_target() {
    let mut harness = Harness::running(corridor(6, 3));

    harness.request(NavigationRequest::WalkTo {
        cell: CellCoord::new(2, 0),
    });
    for _ in 0..5 {
        harness.tick();
    }

    assert_eq!(harness.agent(), CellCoord::new(2, 0));
    assert_eq!(harness.navigator.state(), NavigationState::Idle);
    assert!(harness.navigator.active_path().is_empty());
    assert_eq!(query::phase(&harness.world), GamePhase::Running);
}

#[test]
fn new_session_cancels_playback() {
    let mut harness = Harness::running(corridor(10, 1));

    harness.request(NavigationRequest::Solve {
        algorithm: Algorithm::BreadthFirst,
    });
    harness.command(Command::LoadLayout {
        layout: corridor(10, 1),
        reveal_radius: 2,
    });

    assert_eq!(harness.navigator.state(), NavigationState::Idle);
    assert!(harness.navigator.active_path().is_empty());
    assert_eq!(query::phase(&harness.world), GamePhase::Briefing);

    harness.tick();
    assert_eq!(harness.agent(), CellCoord::new(0, 0));
}

#[test]
fn guide_tracks_agent_and_walls() {
    let mut harness = Harness::running(corridor(5, 3));
    harness.navigator.set_guide_enabled(true);
    harness.tick();
    assert_eq!(harness.navigator.guide_path().len(), 4);

    harness.request(NavigationRequest::Move {
        direction: Direction::East,
    });
    assert_eq!(harness.navigator.guide_path().len(), 3);

    harness.command(Command::ToggleWall {
        cell: CellCoord::new(3, 1),
    });
    assert_eq!(harness.navigator.guide_path().len(), 5);
    assert!(!harness
        .navigator
        .guide_path()
        .contains(&CellCoord::new(3, 1)));

    harness.navigator.set_guide_enabled(false);
    harness.tick();
    assert!(harness.navigator.guide_path().is_empty());
}

#[test]
fn guide_is_hidden_outside_running_phase() {
    let mut harness = Harness::new();
    harness.navigator.set_guide_enabled(true);
    harness.command(Command::LoadLayout {
        layout: corridor(5, 1),
        reveal_radius: 1,
    });
    assert!(harness.navigator.guide_path().is_empty());

    harness.command(Command::StartMission);
    assert_eq!(harness.navigator.guide_path().len(), 4);

    harness.command(Command::ReturnToMenu);
    assert!(harness.navigator.guide_path().is_empty());
}

#[test]
fn scripted_session_replays_identically() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert!(!first.is_empty());
}

fn replay() -> Vec<u64> {
    let mut harness = Harness::new();
    harness.navigator.set_guide_enabled(true);
    harness.command(Command::NewSession {
        config: SessionConfig::default(),
        seed: 0x00c0_ffee,
    });
    harness.command(Command::StartMission);
    harness.request(NavigationRequest::Solve {
        algorithm: Algorithm::AStar,
    });
    for _ in 0..120 {
        harness.tick();
    }
    harness.request(NavigationRequest::Move {
        direction: Direction::South,
    });

    harness
        .log
        .iter()
        .map(|event| {
            let mut hasher = DefaultHasher::new();
            format!("{event:?}").hash(&mut hasher);
            hasher.finish()
        })
        .collect()
}
