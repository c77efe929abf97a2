//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use maze_runner_core::GamePhase;
use maze_runner_rendering::{FrameInput, HudPresentation};

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext<'a> {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin.
    pub(crate) background: Color,
    /// Status values to list in the panel.
    pub(crate) hud: &'a HudPresentation,
    /// Whether the reveal-all overlay is on.
    pub(crate) reveal_all: bool,
}

/// Renders the control panel and reports the buttons pressed this frame.
pub(crate) fn draw_control_panel_ui(ui: &mut Ui, context: ControlPanelUiContext<'_>) -> FrameInput {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .color_selected(Color::from_rgba(70, 70, 70, 255))
        .color_selected_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_inactive(Color::from_rgba(56, 56, 56, 200))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let hud = context.hud;
    let mut pressed = FrameInput::default();
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        if let (Some(start), Some(end)) = (hud.start, hud.end) {
            ui.label(None, &format!("Start: {start}"));
            ui.label(None, &format!("Objective: {end}"));
        }
        if let Some(distance) = hud.distance_to_goal {
            ui.label(None, &format!("Distance to go: {distance}"));
        }
        ui.label(None, &format!("Algorithm: {}", hud.algorithm));
        ui.label(None, &format!("Steps: {}", hud.stats.steps));
        ui.label(None, &format!("Explored: {}", hud.stats.explored));
        let mode = if hud.edit_mode { "Mode: Edit" } else { "Mode: Walk" };
        ui.label(None, mode);
        if hud.navigating {
            ui.label(None, "Navigating...");
        }

        match hud.phase {
            GamePhase::Menu | GamePhase::Won => {
                pressed.new_session = ui.button(None, "New Maze (N)");
            }
            GamePhase::Briefing => {
                pressed.start_mission = ui.button(None, "Start (Enter)");
            }
            GamePhase::Running => {
                pressed.solve = ui.button(None, "Solve (Space)");
                pressed.cycle_algorithm = ui.button(None, "Next Algorithm (Tab)");
                pressed.toggle_edit_mode = ui.button(None, "Edit Walls (E)");
                pressed.new_session = ui.button(None, "New Maze (N)");
            }
        }

        let guide = if hud.guide_enabled { "Hide Guide (G)" } else { "Show Guide (G)" };
        pressed.toggle_guide = ui.button(None, guide);
        let reveal = if context.reveal_all {
            "Restore Fog (R)"
        } else {
            "Reveal All (R)"
        };
        pressed.toggle_reveal_all = ui.button(None, reveal);
        if hud.phase != GamePhase::Menu {
            pressed.return_to_menu = ui.button(None, "Menu (M)");
        }
    });

    ui.pop_skin();

    pressed
}
