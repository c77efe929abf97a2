//! Frame-by-frame wiring of the world and its systems.

use std::time::Duration;

use maze_runner_core::{Algorithm, CellCoord, Command, Event, GamePhase, SessionConfig, Stats};
use maze_runner_rendering::{FrameInput, Scene};
use maze_runner_system_editor::{Editor, EditorInput};
use maze_runner_system_navigation::{
    Config as NavigationConfig, NavigationRequest, NavigationState, NavigationView, Navigator,
};
use maze_runner_world::{self as world, query, World};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Owns the world and the systems reacting to it.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    navigator: Navigator,
    editor: Editor,
    session: SessionConfig,
    seeds: ChaCha8Rng,
    algorithm: Algorithm,
    reveal_all: bool,
}

impl Simulation {
    /// Session seeds are drawn from a ChaCha stream keyed by `seed`.
    pub(crate) fn new(
        session: SessionConfig,
        navigation: NavigationConfig,
        algorithm: Algorithm,
        seed: u64,
    ) -> Self {
        Self {
            world: World::new(),
            navigator: Navigator::new(navigation),
            editor: Editor::new(),
            session,
            seeds: ChaCha8Rng::seed_from_u64(seed),
            algorithm,
            reveal_all: false,
        }
    }

    /// Generates a fresh maze and returns the seed it was built from.
    pub(crate) fn new_session(&mut self) -> u64 {
        let seed = self.seeds.next_u64();
        self.pump(
            [Command::NewSession {
                config: self.session,
                seed,
            }],
            None,
            EditorInput::default(),
        );
        seed
    }

    /// Applies a single command and lets the systems react to it.
    pub(crate) fn apply(&mut self, command: Command) {
        self.pump([command], None, EditorInput::default());
    }

    /// Forwards a navigation request without advancing time.
    pub(crate) fn request(&mut self, request: NavigationRequest) {
        self.pump([], Some(request), EditorInput::default());
    }

    /// Advances simulated time.
    pub(crate) fn tick(&mut self, dt: Duration) {
        self.apply(Command::Tick { dt });
    }

    /// Translates one frame of adapter input into commands and requests.
    pub(crate) fn handle_frame(&mut self, dt: Duration, input: FrameInput) {
        if input.cycle_algorithm {
            self.algorithm = self.algorithm.next();
        }
        if input.toggle_guide {
            self.navigator
                .set_guide_enabled(!self.navigator.guide_enabled());
        }
        if input.toggle_reveal_all {
            self.reveal_all = !self.reveal_all;
        }
        if input.new_session {
            let _ = self.new_session();
        }

        let mut commands = Vec::new();
        if input.start_mission {
            commands.push(Command::StartMission);
        }
        if input.return_to_menu {
            commands.push(Command::ReturnToMenu);
        }
        commands.push(Command::Tick { dt });

        let request = self.frame_request(&input);
        let editor_input = EditorInput::new(
            input.toggle_edit_mode,
            input.cursor_cell,
            input.pointer_pressed,
            input.pointer_held,
        );
        self.pump(commands, request, editor_input);
    }

    fn frame_request(&self, input: &FrameInput) -> Option<NavigationRequest> {
        if input.solve {
            return Some(NavigationRequest::Solve {
                algorithm: self.algorithm,
            });
        }
        if let Some(direction) = input.move_direction {
            return Some(NavigationRequest::Move { direction });
        }
        let editing = self.editor.is_enabled() != input.toggle_edit_mode;
        match input.cursor_cell {
            Some(cell) if input.pointer_pressed && !editing => {
                Some(NavigationRequest::WalkTo { cell })
            }
            _ => None,
        }
    }

    /// Applies `commands`, then feeds the resulting events to every system
    /// until no further commands are produced.
    fn pump<I>(&mut self, commands: I, mut request: Option<NavigationRequest>, input: EditorInput)
    where
        I: IntoIterator<Item = Command>,
    {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        let mut editor_input = Some(input);
        loop {
            let mut commands = Vec::new();
            self.navigator
                .handle(&events, request.take(), view(&self.world), &mut commands);

            // Follow-up passes keep the held pointer so an ongoing stroke survives.
            let pass_input = editor_input.take().unwrap_or(EditorInput {
                toggle_edit_mode: false,
                pointer_pressed: false,
                ..input
            });
            self.editor.handle(
                &events,
                pass_input,
                self.navigator.is_busy(),
                &mut commands,
            );

            log_rejections(&events);
            events.clear();
            if commands.is_empty() {
                break;
            }
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }

    /// Copies the current world and system state into `scene`.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        scene.reveal_all = self.reveal_all;
        match query::grid_view(&self.world) {
            Some(view) => {
                scene.populate_cells(&view);
                scene.agent = query::agent(&self.world);
                scene.active_path.clear();
                scene
                    .active_path
                    .extend_from_slice(self.navigator.active_path());
                scene.guide_path.clear();
                scene
                    .guide_path
                    .extend_from_slice(self.navigator.guide_path());
            }
            None => scene.clear_maze(),
        }

        let hud = &mut scene.hud;
        query::welcome_banner(&self.world).clone_into(&mut hud.banner);
        hud.phase = query::phase(&self.world);
        hud.algorithm = self.algorithm;
        hud.stats = query::stats(&self.world);
        hud.edit_mode = self.editor.is_enabled();
        hud.guide_enabled = self.navigator.guide_enabled();
        hud.navigating = self.navigator.is_busy();
        hud.start = query::start(&self.world);
        hud.end = query::end(&self.world);
        hud.distance_to_goal = scene
            .agent
            .zip(hud.end)
            .map(|(agent, end)| agent.manhattan_distance(end));
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn phase(&self) -> GamePhase {
        query::phase(&self.world)
    }

    pub(crate) fn stats(&self) -> Stats {
        query::stats(&self.world)
    }

    pub(crate) fn agent(&self) -> Option<CellCoord> {
        query::agent(&self.world)
    }

    pub(crate) fn navigation_state(&self) -> NavigationState {
        self.navigator.state()
    }

    pub(crate) fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn set_reveal_all(&mut self, reveal_all: bool) {
        self.reveal_all = reveal_all;
    }
}

fn view(world: &World) -> Option<NavigationView<'_>> {
    Some(NavigationView {
        grid: query::grid_view(world)?,
        agent: query::agent(world)?,
        end: query::end(world)?,
    })
}

fn log_rejections(events: &[Event]) {
    for event in events {
        match event {
            Event::SessionRejected { reason } => log::warn!("session rejected: {reason}"),
            Event::AgentMoveRejected { reason } => log::debug!("move rejected: {reason}"),
            Event::WallToggleRejected { cell, reason } => {
                log::debug!("edit at {cell} rejected: {reason}");
            }
            _ => {}
        }
    }
}
