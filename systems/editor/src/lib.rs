#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure edit-mode system responsible for emitting wall toggle commands.

use log::debug;
use maze_runner_core::{CellCoord, Command, Event, GamePhase};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorInput {
    /// Indicates whether the player flipped edit mode on this frame.
    pub toggle_edit_mode: bool,
    /// Cell currently hovered by the pointer, if it lies on the maze.
    pub pointer_cell: Option<CellCoord>,
    /// Indicates whether the pointer button went down on this frame.
    pub pointer_pressed: bool,
    /// Indicates whether the pointer button is held down.
    pub pointer_held: bool,
}

impl EditorInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(
        toggle_edit_mode: bool,
        pointer_cell: Option<CellCoord>,
        pointer_pressed: bool,
        pointer_held: bool,
    ) -> Self {
        Self {
            toggle_edit_mode,
            pointer_cell,
            pointer_pressed,
            pointer_held,
        }
    }
}

/// Edit-mode system that translates pointer input into wall toggles.
///
/// A press toggles the hovered cell. While the button stays held, every newly
/// entered cell is toggled once, which lets the player paint or erase strokes.
#[derive(Debug, Clone)]
pub struct Editor {
    phase: GamePhase,
    enabled: bool,
    last_painted: Option<CellCoord>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates a new editor with edit mode switched off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            enabled: false,
            last_painted: None,
        }
    }

    /// Reports whether edit mode is switched on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reports whether pointer input would currently edit the maze.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.enabled && self.phase.allows_edits()
    }

    /// Consumes world events and adapter-derived input to emit editor commands.
    ///
    /// `navigation_busy` suppresses edits while the agent is walking a path.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: EditorInput,
        navigation_busy: bool,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::PhaseChanged { phase } => self.phase = *phase,
                Event::SessionCreated { .. } => self.last_painted = None,
                _ => {}
            }
        }

        if input.toggle_edit_mode {
            self.enabled = !self.enabled;
            self.last_painted = None;
            debug!("edit mode {}", if self.enabled { "on" } else { "off" });
        }

        if !input.pointer_held && !input.pointer_pressed {
            self.last_painted = None;
            return;
        }

        if !self.is_active() || navigation_busy {
            return;
        }

        let Some(cell) = input.pointer_cell else {
            return;
        };

        if input.pointer_pressed || self.last_painted != Some(cell) {
            out.push(Command::ToggleWall { cell });
            self.last_painted = Some(cell);
        }
    }
}
