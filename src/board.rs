use std::path::Path;

use crate::config::Config;
use crate::drawing::DrawingElement;
use crate::error::DrawError;
use crate::geometry::Point;
use crate::input::Command;
use crate::raster::RasterSurface;
use crate::renderer::Renderer;
use crate::state::{DrawingState, Mode};
use crate::tool_config::ToolConfig;

/// A drawing state machine wired to its tool settings and an output surface.
///
/// Every command is applied synchronously, and the surface is redrawn before
/// `apply` returns whenever the element list changed.
pub struct Board {
    state: DrawingState,
    tools: ToolConfig,
    renderer: Renderer,
    surface: RasterSurface,
    rendered_revision: Option<u64>,
}

impl Board {
    pub fn new(config: &Config) -> Result<Self, DrawError> {
        let mut surface = RasterSurface::new(config.width, config.height);
        if let Some(path) = &config.font_path {
            surface.load_font(path)?;
        }
        let mut board = Self {
            state: DrawingState::new().with_erase_tolerance(config.erase_tolerance),
            tools: config.tools.clone(),
            renderer: Renderer::new(config.background, config.rough_options()),
            surface,
            rendered_revision: None,
        };
        board.refresh();
        Ok(board)
    }

    pub fn elements(&self) -> &[DrawingElement] {
        self.state.elements()
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Position for the text input overlay, while one is needed.
    pub fn text_overlay(&self) -> Option<Point> {
        self.state.text_anchor()
    }

    pub fn apply(&mut self, command: Command) -> Result<(), DrawError> {
        match command {
            Command::GestureStart { x, y } => {
                let style = self.tools.style(self.state.tool());
                self.state.gesture_start([x, y], &style)?;
            }
            Command::GestureMove { x, y } => self.state.gesture_move([x, y]),
            Command::GestureEnd => self.state.gesture_end(),
            Command::CommitText { text } => self.state.commit_text(&text),
            Command::Undo => self.state.undo(),
            Command::Redo => self.state.redo(),
            Command::SelectTool { tool } => {
                self.state.set_tool(tool);
                log::debug!("tool changed to {}", tool);
            }
            Command::SetStroke { tool, color } => self.tools.set_stroke(tool, color),
            Command::SetFill { tool, color } => self.tools.set_fill(tool, color),
            Command::SetSize { tool, size } => self.tools.set_size(tool, size),
        }
        self.refresh();
        Ok(())
    }

    pub fn replay<I>(&mut self, commands: I) -> Result<(), DrawError>
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    fn refresh(&mut self) {
        let revision = self.state.revision();
        if self.rendered_revision == Some(revision) {
            return;
        }
        self.renderer.render(self.state.elements(), &mut self.surface);
        self.rendered_revision = Some(revision);
    }

    pub fn export_png(&self) -> Result<Vec<u8>, DrawError> {
        self.surface.encode_png()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), DrawError> {
        self.surface.save_png(path)
    }
}
