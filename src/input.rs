use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, ModifiersState};

use crate::drawing::{Color, Tool, deserialize_color, deserialize_fill};
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    GestureStart { x: f32, y: f32 },
    GestureMove { x: f32, y: f32 },
    GestureEnd,
    CommitText { text: String },
    Undo,
    Redo,
    SelectTool { tool: Tool },
    SetStroke {
        tool: Tool,
        #[serde(deserialize_with = "deserialize_color")]
        color: Color,
    },
    SetFill {
        tool: Tool,
        #[serde(default, deserialize_with = "deserialize_fill")]
        color: Option<Color>,
    },
    SetSize { tool: Tool, size: f32 },
}

impl Command {
    pub fn start(point: Point) -> Self {
        Command::GestureStart {
            x: point[0],
            y: point[1],
        }
    }

    pub fn move_to(point: Point) -> Self {
        Command::GestureMove {
            x: point[0],
            y: point[1],
        }
    }
}

/// Left button press/release at the current cursor position.
pub fn pointer_button(state: ElementState, button: MouseButton, cursor: Point) -> Option<Command> {
    match (button, state) {
        (MouseButton::Left, ElementState::Pressed) => Some(Command::start(cursor)),
        (MouseButton::Left, ElementState::Released) => Some(Command::GestureEnd),
        _ => None,
    }
}

pub fn pointer_moved(cursor: Point) -> Command {
    Command::move_to(cursor)
}

pub fn tool_for_key(key: KeyCode) -> Option<Tool> {
    match key {
        KeyCode::Digit1 => Some(Tool::Line),
        KeyCode::Digit2 => Some(Tool::Rectangle),
        KeyCode::Digit3 => Some(Tool::Circle),
        KeyCode::Digit4 => Some(Tool::Arrow),
        KeyCode::Digit5 => Some(Tool::Brush),
        KeyCode::Digit6 => Some(Tool::Text),
        KeyCode::Digit7 => Some(Tool::Eraser),
        _ => None,
    }
}

/// Keyboard shortcuts. Keys are ignored while a text overlay has focus so
/// typing does not switch tools.
pub fn key_pressed(key: KeyCode, modifiers: ModifiersState, writing: bool) -> Option<Command> {
    if writing {
        return None;
    }
    let command_key = modifiers.control_key() || modifiers.super_key();
    match key {
        KeyCode::KeyZ if command_key && modifiers.shift_key() => Some(Command::Redo),
        KeyCode::KeyZ if command_key => Some(Command::Undo),
        KeyCode::KeyY if command_key => Some(Command::Redo),
        _ if command_key => None,
        _ => tool_for_key(key).map(|tool| Command::SelectTool { tool }),
    }
}
