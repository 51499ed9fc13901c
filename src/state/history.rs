use std::collections::VecDeque;

/// One recorded snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry<T> {
    /// Monotonic sequence number, unique within one history.
    pub seq: u64,
    /// Snapshot value.
    pub value: T,
}

/// Bounded undo/redo buffer.
///
/// Holds at most `capacity` undo snapshots; recording past that evicts the oldest one.
/// Recording a new snapshot discards the redo side.
#[derive(Clone, Debug)]
pub struct EditHistory<T> {
    capacity: usize,
    next_seq: u64,
    undo: VecDeque<HistoryEntry<T>>,
    redo: Vec<HistoryEntry<T>>,
}

impl<T> EditHistory<T> {
    /// Empty history keeping up to `capacity` undo steps (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            next_seq: 0,
            undo: VecDeque::with_capacity(capacity.max(1)),
            redo: Vec::new(),
        }
    }

    fn entry(&mut self, value: T) -> HistoryEntry<T> {
        let seq = self.next_seq;
        self.next_seq += 1;
        HistoryEntry { seq, value }
    }

    /// Record the value that was current before an edit.
    pub fn record(&mut self, previous: T) -> u64 {
        self.redo.clear();
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        let entry = self.entry(previous);
        let seq = entry.seq;
        self.undo.push_back(entry);
        seq
    }

    /// Step back: returns the restored value and keeps `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let entry = self.undo.pop_back()?;
        let keep = self.entry(current);
        self.redo.push(keep);
        Some(entry.value)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let entry = self.redo.pop()?;
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        let keep = self.entry(current);
        self.undo.push_back(keep);
        Some(entry.value)
    }

    /// Number of available undo steps.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of available redo steps.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Most recent undo snapshot.
    pub fn peek_undo(&self) -> Option<&HistoryEntry<T>> {
        self.undo.back()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/history.rs"]
mod tests;
