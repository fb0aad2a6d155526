use crate::drawing::DrawingElement;

/// Linear undo log of element-list snapshots.
///
/// Always holds at least one snapshot, and the cursor always points at one of
/// them. Committing after an undo drops the snapshots past the cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<DrawingElement>>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
        }
    }

    pub fn commit(&mut self, elements: Vec<DrawingElement>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(elements);
        self.cursor = self.snapshots.len() - 1;
        log::debug!(
            "history commit: {} snapshots, cursor {}",
            self.snapshots.len(),
            self.cursor
        );
    }

    /// Steps back one snapshot and returns it, or `None` at the oldest one.
    pub fn undo(&mut self) -> Option<&[DrawingElement]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Steps forward one snapshot and returns it, or `None` at the newest one.
    pub fn redo(&mut self) -> Option<&[DrawingElement]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn current(&self) -> &[DrawingElement] {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
