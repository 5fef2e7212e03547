use std::collections::VecDeque;

use tracing::debug;

use super::{HistoryEntry, TextState, TreeState};

/// Linear undo/redo stack of snapshots.
///
/// The cursor always points at a valid entry, so a history is never empty.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    /// Maximum number of entries kept, 0 meaning unbounded.
    limit: usize,
}

impl History {
    pub fn new(initial: HistoryEntry) -> Self {
        Self::with_limit(initial, 0)
    }

    pub fn with_limit(initial: HistoryEntry, limit: usize) -> Self {
        Self {
            entries: VecDeque::from([initial]),
            cursor: 0,
            limit,
        }
    }

    /// Records a new snapshot after the cursor, discarding any redo entries.
    ///
    /// Text equal to the current entry's only refreshes its tree state.
    pub fn commit(&mut self, tree: TreeState, text: TextState) {
        self.entries.truncate(self.cursor + 1);
        if let Some(current) = self.entries.get_mut(self.cursor) {
            if current.text == text {
                current.tree = tree;
                return;
            }
        }

        self.entries.push_back(HistoryEntry { tree, text });
        self.cursor = self.entries.len() - 1;

        if self.limit > 0 {
            while self.entries.len() > self.limit {
                self.entries.pop_front();
                self.cursor -= 1;
            }
        }
        debug!("Committed history entry {} of {}", self.cursor + 1, self.entries.len());
    }

    pub fn undo(&mut self) -> Option<&TextState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].text)
    }

    pub fn redo(&mut self) -> Option<&TextState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].text)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
