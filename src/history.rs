//! Linear undo/redo history over full scene snapshots.
//!
//! Every committed mutation pushes one snapshot (a full clone of the object
//! vector); continuous drags/resizes amount to one snapshot per pointer-up.
//! Pushing truncates any redo tail. Snapshots are immutable once pushed.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::scene::CanvasObject;

/// Snapshot stack with a current index.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Vec<CanvasObject>>,
    index: usize,
}

impl History {
    /// Create a history whose first entry is the empty scene, so the very
    /// first commit is undoable.
    #[must_use]
    pub fn new() -> Self {
        Self { snapshots: vec![Vec::new()], index: 0 }
    }

    /// Record a new snapshot of the scene, discarding any redo tail.
    pub fn push(&mut self, scene: &[CanvasObject]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(scene.to_vec());
        self.index = self.snapshots.len() - 1;
    }

    /// The snapshot at the current position (the scene as of the last
    /// commit). Used to revert a cancelled in-place gesture.
    #[must_use]
    pub fn current(&self) -> &[CanvasObject] {
        &self.snapshots[self.index]
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Step back one snapshot. A no-op at the start of history.
    pub fn undo(&mut self) -> Option<Vec<CanvasObject>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Step forward one snapshot. A no-op at the end of history.
    pub fn redo(&mut self) -> Option<Vec<CanvasObject>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Drop everything and restart from the empty scene.
    pub fn reset(&mut self) {
        self.snapshots = vec![Vec::new()];
        self.index = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
