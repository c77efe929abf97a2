#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Runner.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so
//! the dependency is declared without its default `audio` feature.
//!
//! The control panel uses Macroquad's immediate-mode UI module. All UI-specific
//! calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext};
use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::input::{
    is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position, KeyCode,
    MouseButton,
};
use maze_runner_core::{CellCoord, Direction, GamePhase};
use maze_runner_rendering::{
    CellVisual, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use std::time::{Duration, Instant};

/// Width of the control panel docked on the right edge of the window.
const CONTROL_PANEL_WIDTH: f32 = 240.0;

/// Tracks control-panel button presses so they can be merged with physical
/// input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    latched: FrameInput,
}

impl ControlPanelInputState {
    /// Returns the latched button actions and clears them so each fires once.
    pub fn take(&mut self) -> FrameInput {
        std::mem::take(&mut self.latched)
    }

    /// Records button actions pressed this frame.
    pub fn register(&mut self, actions: FrameInput) {
        self.latched = self.latched.combine(actions);
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// Arrow keys or `WASD` step the agent.
    move_direction: Option<Direction>,
    /// `Space` solves with the selected algorithm.
    solve: bool,
    /// `Tab` selects the next algorithm.
    cycle_algorithm: bool,
    /// `E` flips edit mode.
    toggle_edit_mode: bool,
    /// `G` flips the guide overlay.
    toggle_guide: bool,
    /// `R` flips the reveal-all overlay.
    toggle_reveal_all: bool,
    /// `N` generates a new maze.
    new_session: bool,
    /// `Enter` starts the mission.
    start_mission: bool,
    /// `M` returns to the menu.
    return_to_menu: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let move_direction = if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            Some(Direction::North)
        } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
            Some(Direction::South)
        } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
            Some(Direction::West)
        } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
            Some(Direction::East)
        } else {
            None
        };

        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            move_direction,
            solve: is_key_pressed(KeyCode::Space),
            cycle_algorithm: is_key_pressed(KeyCode::Tab),
            toggle_edit_mode: is_key_pressed(KeyCode::E),
            toggle_guide: is_key_pressed(KeyCode::G),
            toggle_reveal_all: is_key_pressed(KeyCode::R),
            new_session: is_key_pressed(KeyCode::N),
            start_mission: is_key_pressed(KeyCode::Enter),
            return_to_menu: is_key_pressed(KeyCode::M),
        }
    }

    fn into_frame_input(self) -> FrameInput {
        FrameInput {
            move_direction: self.move_direction,
            solve: self.solve,
            cycle_algorithm: self.cycle_algorithm,
            toggle_edit_mode: self.toggle_edit_mode,
            toggle_guide: self.toggle_guide,
            toggle_reveal_all: self.toggle_reveal_all,
            new_session: self.new_session,
            start_mission: self.start_mission,
            return_to_menu: self.return_to_menu,
            ..FrameInput::default()
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_size: Option<(i32, i32)>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = Some((width, height));
        self
    }
}

/// Averages frame timings over one-second windows.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and reports averages once a second has elapsed.
    fn record_frame(&mut self, frame: Duration, render: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.render_accum += render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let metrics = FpsMetrics {
            per_second: frames as f32 / seconds,
            avg_render: self.render_accum / frames.max(1),
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_size,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let (window_width, window_height) = window_size.unwrap_or((1280, 720));
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut control_panel_input = ControlPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics_before = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let (cursor_x, cursor_y) = mouse_position();
                let frame_input = gather_frame_input_from_observations(
                    &scene,
                    &metrics_before,
                    Vec2::new(cursor_x, cursor_y),
                    is_mouse_button_pressed(MouseButton::Left),
                    is_mouse_button_down(MouseButton::Left),
                )
                .combine(keyboard.into_frame_input())
                .combine(control_panel_input.take());

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let render_start = Instant::now();
                draw_cells(&scene, &metrics);
                draw_grid_lines(&scene, &metrics);
                draw_path_markers(&scene.guide_path, &metrics, palette().guide, 0.18);
                draw_path_markers(&scene.active_path, &metrics, palette().path, 0.28);
                draw_agent(scene.agent, &metrics);
                draw_banner(&scene, &metrics);

                let panel_left = (screen_width - CONTROL_PANEL_WIDTH).max(0.0);
                macroquad::shapes::draw_rectangle(
                    panel_left,
                    0.0,
                    CONTROL_PANEL_WIDTH,
                    screen_height,
                    to_macroquad_color(palette().panel),
                );
                let mut root_ui = macroquad::ui::root_ui();
                let pressed = draw_control_panel_ui(
                    &mut root_ui,
                    ControlPanelUiContext {
                        origin: macroquad::math::Vec2::new(panel_left, 0.0),
                        size: macroquad::math::Vec2::new(CONTROL_PANEL_WIDTH, screen_height),
                        background: to_macroquad_color(palette().panel),
                        hud: &scene.hud,
                        reveal_all: scene.reveal_all,
                    },
                );
                control_panel_input.register(pressed);

                let render_duration = render_start.elapsed();
                if let Some(FpsMetrics {
                    per_second,
                    avg_render,
                }) = fps_counter.record_frame(frame_dt, render_duration)
                {
                    if show_fps {
                        info!(
                            "FPS: {per_second:.2} | render: {:>6.2}ms",
                            avg_render.as_secs_f64() * 1_000.0
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Screen-space placement of the maze for the current window size.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    grid_width_scaled: f32,
    grid_height_scaled: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let tile_grid = scene.tile_grid;
        let world_width = tile_grid.width();
        let world_height = tile_grid.height();
        let available_width = (screen_width - CONTROL_PANEL_WIDTH).max(0.0);
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (available_width / world_width).min(screen_height / world_height)
        };

        let grid_width_scaled = world_width * scale;
        let grid_height_scaled = world_height * scale;

        Self {
            scale,
            offset_x: ((available_width - grid_width_scaled) * 0.5).max(0.0),
            offset_y: ((screen_height - grid_height_scaled) * 0.5).max(0.0),
            grid_width_scaled,
            grid_height_scaled,
            cell_step: tile_grid.cell_length * scale,
        }
    }

    fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            self.offset_x + cell.column() as f32 * self.cell_step,
            self.offset_y + cell.row() as f32 * self.cell_step,
        )
    }

    fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_step * 0.5)
    }
}

fn gather_frame_input_from_observations(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    pointer_pressed: bool,
    pointer_held: bool,
) -> FrameInput {
    let mut input = FrameInput::default();

    if metrics.scale <= f32::EPSILON {
        return input;
    }

    let tile_grid = scene.tile_grid;
    if tile_grid.columns == 0 || tile_grid.rows == 0 {
        return input;
    }

    let world_position = Vec2::new(
        (cursor_position.x - metrics.offset_x) / metrics.scale,
        (cursor_position.y - metrics.offset_y) / metrics.scale,
    );

    let inside = cursor_position.x >= metrics.offset_x
        && cursor_position.x < metrics.offset_x + metrics.grid_width_scaled
        && cursor_position.y >= metrics.offset_y
        && cursor_position.y < metrics.offset_y + metrics.grid_height_scaled;

    if inside {
        input.cursor_cell = tile_grid.cell_at(world_position);
        input.pointer_pressed = pointer_pressed;
        input.pointer_held = pointer_held;
    }

    input
}

/// Colors used for the maze layers.
#[derive(Clone, Copy, Debug)]
struct Palette {
    hidden: Color,
    floor: Color,
    wall: Color,
    trail: Color,
    start: Color,
    end: Color,
    path: Color,
    guide: Color,
    agent: Color,
    panel: Color,
}

fn palette() -> Palette {
    Palette {
        hidden: Color::from_rgb_u8(24, 26, 33),
        floor: Color::from_rgb_u8(222, 219, 205),
        wall: Color::from_rgb_u8(62, 68, 82),
        trail: Color::from_rgb_u8(110, 150, 200).lighten(0.4),
        start: Color::from_rgb_u8(84, 170, 96),
        end: Color::from_rgb_u8(206, 72, 64),
        path: Color::from_rgb_u8(240, 190, 60),
        guide: Color::from_rgb_u8(51, 204, 230).with_alpha(0.7),
        agent: Color::from_rgb_u8(245, 120, 40),
        panel: Color::from_rgb_u8(18, 18, 24),
    }
}

fn visual_color(visual: CellVisual) -> Color {
    let palette = palette();
    match visual {
        CellVisual::Hidden => palette.hidden,
        CellVisual::Floor => palette.floor,
        CellVisual::Wall => palette.wall,
        CellVisual::Trail => palette.trail,
        CellVisual::Start => palette.start,
        CellVisual::End => palette.end,
    }
}

fn draw_cells(scene: &Scene, metrics: &SceneMetrics) {
    if metrics.cell_step <= f32::EPSILON {
        return;
    }

    for (cell, visual) in scene.iter_cells() {
        let origin = metrics.cell_origin(cell);
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(visual_color(visual)),
        );
    }
}

fn draw_grid_lines(scene: &Scene, metrics: &SceneMetrics) {
    if scene.cells.is_empty() || metrics.cell_step <= f32::EPSILON {
        return;
    }

    let tile_grid = scene.tile_grid;
    let color = to_macroquad_color(tile_grid.line_color);
    for column in 0..=tile_grid.columns {
        let x = metrics.offset_x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            x,
            metrics.offset_y,
            x,
            metrics.offset_y + metrics.grid_height_scaled,
            1.0,
            color,
        );
    }

    for row in 0..=tile_grid.rows {
        let y = metrics.offset_y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            metrics.offset_x,
            y,
            metrics.offset_x + metrics.grid_width_scaled,
            y,
            1.0,
            color,
        );
    }
}

fn draw_path_markers(path: &[CellCoord], metrics: &SceneMetrics, color: Color, radius: f32) {
    if path.is_empty() || metrics.cell_step <= f32::EPSILON {
        return;
    }

    let color = to_macroquad_color(color);
    for &cell in path {
        let center = metrics.cell_center(cell);
        macroquad::shapes::draw_circle(center.x, center.y, metrics.cell_step * radius, color);
    }
}

fn draw_agent(agent: Option<CellCoord>, metrics: &SceneMetrics) {
    let Some(cell) = agent else {
        return;
    };
    let center = metrics.cell_center(cell);
    let radius = (metrics.cell_step * 0.4).max(2.0);
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(palette().agent));
}

fn draw_banner(scene: &Scene, metrics: &SceneMetrics) {
    let text = match scene.hud.phase {
        GamePhase::Menu => scene.hud.banner.as_str(),
        GamePhase::Briefing => "Press Enter to begin the mission.",
        GamePhase::Won => "You escaped the maze! Press N for another.",
        GamePhase::Running => return,
    };
    let x = metrics.offset_x + 16.0;
    let y = metrics.offset_y + 32.0;
    let _ = macroquad::text::draw_text(text, x, y, 28.0, macroquad::color::WHITE);
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
