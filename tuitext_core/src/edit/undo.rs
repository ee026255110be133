//! Coalescing undo/redo history.

use compact_str::CompactString;
use std::collections::VecDeque;

/// `VecDeque`-backed history ring: oldest entries drop silently once `max_size`
/// is reached.
struct FixedDeque<T> {
  dq: VecDeque<T>,
  max_size: usize,
}

impl<T> FixedDeque<T> {
  fn new(max_size: usize) -> Self {
    Self {
      dq: VecDeque::with_capacity(max_size),
      max_size,
    }
  }

  fn push_back_overwrite(&mut self, value: T) {
    while self.dq.len() >= self.max_size && !self.dq.is_empty() {
      self.dq.pop_front();
    }
    self.dq.push_back(value);
  }

  fn pop_back(&mut self) -> Option<T> {
    self.dq.pop_back()
  }

  fn len(&self) -> usize {
    self.dq.len()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
  pub char_idx: usize,
  pub payload: CompactString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
  pub char_idx: usize,
  pub payload: CompactString,
}

/// One unit of a change: insert `payload` at `char_idx`, or delete `payload`
/// starting at `char_idx`. A "replace" is recorded as delete then insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  Insert(Insert),
  Delete(Delete),
}

/// A coalesced group of operations, committed as one undo/redo step.
#[derive(Debug, Clone, Default)]
pub struct Change {
  ops: Vec<Operation>,
}

impl Change {
  pub fn operations(&self) -> &[Operation] {
    &self.ops
  }

  pub fn is_empty(&self) -> bool {
    self.ops.is_empty()
  }

  pub fn record_insert(&mut self, char_idx: usize, payload: &str) {
    if payload.is_empty() {
      return;
    }
    if let Some(Operation::Insert(insert)) = self.ops.last_mut() {
      if char_idx == insert.char_idx + insert.payload.chars().count() {
        insert.payload.push_str(payload);
        return;
      }
    }
    self.ops.push(Operation::Insert(Insert {
      char_idx,
      payload: CompactString::from(payload),
    }));
  }

  pub fn record_delete(&mut self, char_idx: usize, payload: &str) {
    if payload.is_empty() {
      return;
    }
    let n = payload.chars().count();

    if let Some(Operation::Delete(delete)) = self.ops.last_mut() {
      if delete.char_idx == char_idx {
        delete.payload.push_str(payload);
        return;
      }
      if delete.char_idx > char_idx && delete.char_idx - char_idx <= n {
        let mut merged = CompactString::from(payload);
        merged.push_str(&delete.payload);
        delete.char_idx = char_idx;
        delete.payload = merged;
        return;
      }
    }
    if let Some(Operation::Insert(insert)) = self.ops.last_mut() {
      if insert.char_idx == char_idx && insert.payload.chars().count() == n {
        // The deletion exactly cancels the prior insertion: drop both.
        self.ops.pop();
        return;
      }
    }
    self.ops.push(Operation::Delete(Delete {
      char_idx,
      payload: CompactString::from(payload),
    }));
  }
}

const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Coalescing undo/redo stack. Edits accumulate into the current [`Change`]
/// until [`UndoManager::commit`] closes it off (typically on a cursor move or
/// an explicit boundary, mirroring how most editors group a burst of typing
/// into one undo step).
pub struct UndoManager {
  history: FixedDeque<Change>,
  redo_stack: Vec<Change>,
  current: Change,
}

impl Default for UndoManager {
  fn default() -> Self {
    Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
  }
}

impl UndoManager {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      history: FixedDeque::new(capacity),
      redo_stack: Vec::new(),
      current: Change::default(),
    }
  }

  pub fn record_insert(&mut self, char_idx: usize, payload: &str) {
    self.current.record_insert(char_idx, payload);
    self.redo_stack.clear();
  }

  pub fn record_delete(&mut self, char_idx: usize, payload: &str) {
    self.current.record_delete(char_idx, payload);
    self.redo_stack.clear();
  }

  /// Closes the in-progress change, pushing it onto history if non-empty.
  pub fn commit(&mut self) {
    if !self.current.is_empty() {
      let change = std::mem::take(&mut self.current);
      self.history.push_back_overwrite(change);
    }
  }

  /// Pops the most recent committed change for the caller to invert and
  /// apply, moving it onto the redo stack.
  pub fn pop_undo(&mut self) -> Option<Change> {
    self.commit();
    let change = self.history.pop_back()?;
    self.redo_stack.push(change.clone());
    Some(change)
  }

  /// Pops the most recently undone change for the caller to re-apply.
  pub fn pop_redo(&mut self) -> Option<Change> {
    let change = self.redo_stack.pop()?;
    self.history.push_back_overwrite(change.clone());
    Some(change)
  }

  pub fn history_len(&self) -> usize {
    self.history.len()
  }
}

#[cfg(test)]
mod undo_tests {
  use super::*;

  #[test]
  fn adjacent_inserts_coalesce_into_one_operation() {
    let mut change = Change::default();
    change.record_insert(0, "a");
    change.record_insert(1, "b");
    assert_eq!(change.operations().len(), 1);
    match &change.operations()[0] {
      Operation::Insert(i) => assert_eq!(i.payload.as_str(), "ab"),
      _ => panic!("expected insert"),
    }
  }

  #[test]
  fn delete_that_cancels_a_pending_insert_drops_both() {
    let mut change = Change::default();
    change.record_insert(0, "x");
    change.record_delete(0, "x");
    assert!(change.is_empty());
  }

  #[test]
  fn commit_then_undo_returns_the_change_and_enables_redo() {
    let mut mgr = UndoManager::default();
    mgr.record_insert(0, "hi");
    mgr.commit();
    assert_eq!(mgr.history_len(), 1);
    let undone = mgr.pop_undo().unwrap();
    assert_eq!(undone.operations().len(), 1);
    assert_eq!(mgr.history_len(), 0);
    let redone = mgr.pop_redo().unwrap();
    assert_eq!(redone.operations().len(), 1);
    assert_eq!(mgr.history_len(), 1);
  }

  #[test]
  fn new_edit_after_undo_clears_the_redo_stack() {
    let mut mgr = UndoManager::default();
    mgr.record_insert(0, "a");
    mgr.commit();
    mgr.pop_undo();
    mgr.record_insert(0, "b");
    assert!(mgr.pop_redo().is_none());
  }

  #[test]
  fn history_beyond_capacity_drops_the_oldest_change() {
    let mut mgr = UndoManager::with_capacity(2);
    for i in 0..5 {
      mgr.record_insert(0, "x");
      mgr.commit();
      let _ = i;
    }
    assert_eq!(mgr.history_len(), 2);
  }
}
