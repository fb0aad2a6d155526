use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::config::Config;
use crate::drawing::{Tool, parse_color, parse_fill};
use crate::input::Command;
use crate::state::Mode;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn tool_from_name(name: &str) -> Result<Tool, JsValue> {
    Tool::ALL
        .into_iter()
        .find(|tool| tool.name() == name)
        .ok_or_else(|| js_error(format!("unknown tool `{}`", name)))
}

#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging();
}

/// Board handle for the page's canvas glue.
#[wasm_bindgen]
pub struct WebBoard {
    board: Board,
}

impl WebBoard {
    fn apply(&mut self, command: Command) -> Result<(), JsValue> {
        self.board.apply(command).map_err(js_error)
    }
}

#[wasm_bindgen]
impl WebBoard {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<WebBoard, JsValue> {
        let config = Config {
            width,
            height,
            ..Config::default()
        };
        Ok(WebBoard {
            board: Board::new(&config).map_err(js_error)?,
        })
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.apply(Command::start([x, y]))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.apply(Command::move_to([x, y]))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<(), JsValue> {
        self.apply(Command::GestureEnd)
    }

    #[wasm_bindgen(js_name = commitText)]
    pub fn commit_text(&mut self, text: String) -> Result<(), JsValue> {
        self.apply(Command::CommitText { text })
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.apply(Command::Undo)
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.apply(Command::Redo)
    }

    #[wasm_bindgen(js_name = selectTool)]
    pub fn select_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let tool = tool_from_name(tool)?;
        self.apply(Command::SelectTool { tool })
    }

    #[wasm_bindgen(js_name = setStroke)]
    pub fn set_stroke(&mut self, tool: &str, color: &str) -> Result<(), JsValue> {
        let tool = tool_from_name(tool)?;
        let color = parse_color(color).map_err(js_error)?;
        self.apply(Command::SetStroke { tool, color })
    }

    #[wasm_bindgen(js_name = setFill)]
    pub fn set_fill(&mut self, tool: &str, color: &str) -> Result<(), JsValue> {
        let tool = tool_from_name(tool)?;
        let color = parse_fill(color).map_err(js_error)?;
        self.apply(Command::SetFill { tool, color })
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, tool: &str, size: f32) -> Result<(), JsValue> {
        let tool = tool_from_name(tool)?;
        self.apply(Command::SetSize { tool, size })
    }

    pub fn writing(&self) -> bool {
        self.board.mode() == Mode::Writing
    }

    /// `[x, y]` for the text overlay, empty when no text is being written.
    #[wasm_bindgen(js_name = textOverlay)]
    pub fn text_overlay(&self) -> Vec<f32> {
        self.board
            .text_overlay()
            .map(|p| p.to_vec())
            .unwrap_or_default()
    }

    /// Raw RGBA pixels of the rendered canvas, for `ImageData`.
    pub fn pixels(&self) -> Vec<u8> {
        self.board.surface().image().as_raw().clone()
    }

    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.board.export_png().map_err(js_error)
    }
}
