use crate::drawing::{DrawingElement, ElementKind, Style, Tool};
use crate::error::DrawError;
use crate::factory::{create_element, update_element};
use crate::geometry::Point;
use crate::history::History;
use crate::hit_test::{ERASE_TOLERANCE, is_near_with};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Drawing,
    Erasing,
    Writing,
}

/// Owns the element list and its undo history, and applies gesture events.
///
/// While a gesture is drawing, the in-progress element is always the last one
/// in `elements`. The list is only ever shortened by erasing or by moving
/// through the history.
#[derive(Debug, Clone)]
pub struct DrawingState {
    elements: Vec<DrawingElement>,
    history: History,
    tool: Tool,
    mode: Mode,
    erase_tolerance: f32,
    revision: u64,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingState {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            history: History::new(),
            tool: Tool::Line,
            mode: Mode::Idle,
            erase_tolerance: ERASE_TOLERANCE,
            revision: 0,
        }
    }

    pub fn with_erase_tolerance(mut self, tolerance: f32) -> Self {
        self.erase_tolerance = tolerance;
        self
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bumped whenever the element list changes, so callers know to redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Where a text overlay should appear while an element is being written.
    pub fn text_anchor(&self) -> Option<Point> {
        match self.mode {
            Mode::Writing => self.elements.last().map(|el| el.start),
            Mode::Idle | Mode::Drawing | Mode::Erasing => None,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn commit(&mut self) {
        self.history.commit(self.elements.clone());
    }

    pub fn gesture_start(&mut self, point: Point, style: &Style) -> Result<(), DrawError> {
        match self.mode {
            Mode::Writing => {
                log::trace!("gesture start ignored while writing");
                return Ok(());
            }
            Mode::Idle | Mode::Drawing | Mode::Erasing => {}
        }

        if self.tool == Tool::Eraser {
            self.mode = Mode::Erasing;
            log::debug!("erasing from {:?}", point);
            return Ok(());
        }

        let element = create_element(self.elements.len(), self.tool, point, point, style)?;
        self.elements.push(element);
        self.touch();
        self.mode = match self.tool {
            Tool::Text => Mode::Writing,
            _ => Mode::Drawing,
        };
        log::debug!("{} started at {:?}, mode {:?}", self.tool, point, self.mode);
        Ok(())
    }

    pub fn gesture_move(&mut self, point: Point) {
        match self.mode {
            Mode::Drawing => {
                if let Some(element) = self.elements.last_mut() {
                    update_element(element, point);
                    self.touch();
                }
            }
            Mode::Erasing => self.erase_at(point),
            Mode::Idle | Mode::Writing => {}
        }
    }

    pub fn gesture_end(&mut self) {
        match self.mode {
            Mode::Writing => {}
            Mode::Drawing => {
                self.commit();
                self.mode = Mode::Idle;
            }
            Mode::Erasing | Mode::Idle => self.mode = Mode::Idle,
        }
    }

    /// Removes every element near `point`. Each move commits a snapshot, even
    /// when nothing was hit, so erasing is undone move by move.
    fn erase_at(&mut self, point: Point) {
        let tolerance = self.erase_tolerance;
        let before = self.elements.len();
        self.elements
            .retain(|element| !is_near_with(element, point, tolerance));
        let removed = before - self.elements.len();
        if removed > 0 {
            log::debug!("erased {} element(s) at {:?}", removed, point);
        }
        self.touch();
        self.commit();
    }

    /// Finishes a text element with its final content.
    pub fn commit_text(&mut self, text: &str) {
        if self.mode != Mode::Writing {
            log::trace!("text commit ignored outside of writing");
            return;
        }
        self.mode = Mode::Idle;

        if let Some(ElementKind::Text { content }) = self.elements.last_mut().map(|el| &mut el.kind)
        {
            *content = text.to_string();
            self.touch();
            self.commit();
        }
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.elements = snapshot.to_vec();
            self.mode = Mode::Idle;
            self.touch();
            log::debug!("undo to snapshot {}", self.history.cursor());
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.elements = snapshot.to_vec();
            self.mode = Mode::Idle;
            self.touch();
            log::debug!("redo to snapshot {}", self.history.cursor());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::BLACK;

    fn style() -> Style {
        Style::new(BLACK)
    }

    fn draw(state: &mut DrawingState, tool: Tool, from: Point, to: Point) {
        state.set_tool(tool);
        state.gesture_start(from, &style()).unwrap();
        state.gesture_move(to);
        state.gesture_end();
    }

    #[test]
    fn test_draw_commits_on_end() {
        let mut state = DrawingState::new();
        state.set_tool(Tool::Rectangle);
        state.gesture_start([0.0, 0.0], &style()).unwrap();
        assert_eq!(state.mode(), Mode::Drawing);
        state.gesture_move([10.0, 10.0]);
        assert_eq!(state.history().len(), 1);
        state.gesture_end();
        assert_eq!(state.mode(), Mode::Idle);
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.elements(), state.history().current());
        assert_eq!(state.elements()[0].end, [10.0, 10.0]);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut state = DrawingState::new();
        for i in 0..5 {
            let x = i as f32 * 20.0;
            draw(&mut state, Tool::Line, [x, 0.0], [x, 10.0]);
        }
        let after = state.elements().to_vec();
        for _ in 0..5 {
            state.undo();
        }
        assert!(state.elements().is_empty());
        for _ in 0..5 {
            state.redo();
        }
        assert_eq!(state.elements(), after.as_slice());
    }

    #[test]
    fn test_boundary_noops() {
        let mut state = DrawingState::new();
        let revision = state.revision();
        state.undo();
        assert_eq!(state.revision(), revision);
        draw(&mut state, Tool::Line, [0.0, 0.0], [5.0, 5.0]);
        let elements = state.elements().to_vec();
        let revision = state.revision();
        state.redo();
        assert_eq!(state.elements(), elements.as_slice());
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn test_new_commit_discards_redo() {
        let mut state = DrawingState::new();
        draw(&mut state, Tool::Line, [0.0, 0.0], [5.0, 5.0]);
        draw(&mut state, Tool::Line, [10.0, 0.0], [15.0, 5.0]);
        state.undo();
        draw(&mut state, Tool::Circle, [0.0, 0.0], [50.0, 50.0]);
        let elements = state.elements().to_vec();
        state.redo();
        assert_eq!(state.elements(), elements.as_slice());
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].tool(), Tool::Circle);
    }

    #[test]
    fn test_erase_removes_only_matches() {
        let mut state = DrawingState::new();
        draw(&mut state, Tool::Line, [0.0, 0.0], [100.0, 0.0]);
        draw(&mut state, Tool::Line, [0.0, 50.0], [100.0, 50.0]);
        draw(&mut state, Tool::Line, [0.0, 100.0], [100.0, 100.0]);
        let history_len = state.history().len();

        state.set_tool(Tool::Eraser);
        state.gesture_start([50.0, 50.0], &style()).unwrap();
        assert_eq!(state.mode(), Mode::Erasing);
        assert_eq!(state.elements().len(), 3);
        state.gesture_move([50.0, 50.0]);

        let ys: Vec<f32> = state.elements().iter().map(|el| el.start[1]).collect();
        assert_eq!(ys, vec![0.0, 100.0]);
        assert_eq!(state.history().len(), history_len + 1);

        state.gesture_end();
        assert_eq!(state.mode(), Mode::Idle);
        assert_eq!(state.history().len(), history_len + 1);
    }

    #[test]
    fn test_erase_commits_per_move() {
        let mut state = DrawingState::new();
        draw(&mut state, Tool::Line, [0.0, 0.0], [100.0, 0.0]);
        draw(&mut state, Tool::Line, [0.0, 50.0], [100.0, 50.0]);
        state.set_tool(Tool::Eraser);
        state.gesture_start([50.0, 0.0], &style()).unwrap();
        state.gesture_move([50.0, 0.0]);
        state.gesture_move([50.0, 25.0]);
        state.gesture_move([50.0, 50.0]);
        state.gesture_end();
        assert!(state.elements().is_empty());
        assert_eq!(state.history().len(), 6);
        state.undo();
        assert_eq!(state.elements().len(), 1);
    }

    #[test]
    fn test_erase_miss_still_commits() {
        let mut state = DrawingState::new();
        draw(&mut state, Tool::Line, [0.0, 0.0], [100.0, 0.0]);
        let history_len = state.history().len();

        state.set_tool(Tool::Eraser);
        state.gesture_start([500.0, 500.0], &style()).unwrap();
        state.gesture_move([500.0, 500.0]);
        assert_eq!(state.history().len(), history_len + 1);
        state.gesture_move([510.0, 500.0]);
        state.gesture_end();

        assert_eq!(state.elements().len(), 1);
        assert_eq!(state.history().len(), history_len + 2);
    }

    #[test]
    fn test_text_flow() {
        let mut state = DrawingState::new();
        state.set_tool(Tool::Text);
        state.gesture_start([30.0, 40.0], &style()).unwrap();
        assert_eq!(state.mode(), Mode::Writing);
        assert_eq!(state.text_anchor(), Some([30.0, 40.0]));

        // gestures are absorbed until the text is committed
        state.gesture_end();
        state.gesture_start([90.0, 90.0], &style()).unwrap();
        state.gesture_move([95.0, 95.0]);
        assert_eq!(state.mode(), Mode::Writing);
        assert_eq!(state.elements().len(), 1);
        assert_eq!(state.history().len(), 1);

        state.commit_text("hello");
        assert_eq!(state.mode(), Mode::Idle);
        assert_eq!(state.history().len(), 2);
        assert_eq!(
            state.elements()[0].kind,
            ElementKind::Text {
                content: "hello".to_string()
            }
        );
        assert_eq!(state.text_anchor(), None);
    }

    #[test]
    fn test_empty_text_is_committed() {
        let mut state = DrawingState::new();
        state.set_tool(Tool::Text);
        state.gesture_start([5.0, 5.0], &style()).unwrap();
        state.commit_text("");
        assert_eq!(state.mode(), Mode::Idle);
        assert_eq!(state.elements().len(), 1);
        assert_eq!(
            state.elements()[0].kind,
            ElementKind::Text {
                content: String::new()
            }
        );
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_text_commit_outside_writing_is_ignored() {
        let mut state = DrawingState::new();
        draw(&mut state, Tool::Line, [0.0, 0.0], [5.0, 5.0]);
        state.commit_text("stray");
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.elements()[0].tool(), Tool::Line);
    }

    #[test]
    fn test_brush_gesture_accumulates_points() {
        let mut state = DrawingState::new();
        state.set_tool(Tool::Brush);
        state.gesture_start([0.0, 0.0], &style()).unwrap();
        for i in 1..=6 {
            state.gesture_move([i as f32 * 4.0, i as f32 * 2.0]);
        }
        state.gesture_end();
        match &state.elements()[0].kind {
            ElementKind::Brush { points, outline } => {
                assert_eq!(points.len(), 7);
                assert!(!outline.is_empty());
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_ids_follow_list_position() {
        let mut state = DrawingState::new();
        draw(&mut state, Tool::Line, [0.0, 0.0], [5.0, 5.0]);
        draw(&mut state, Tool::Arrow, [0.0, 0.0], [5.0, 5.0]);
        let ids: Vec<usize> = state.elements().iter().map(|el| el.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
