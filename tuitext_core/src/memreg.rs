//! Memory registry: a slot table mapping a small integer mem-id to a byte
//! buffer plus an ownership flag.

use crate::prelude::CoreError;

/// Reserved id meaning "no buffer"; never assigned by [`MemRegistry::register`].
pub const INVALID_MEM_ID: u8 = 0xFF;

const CAPACITY: usize = INVALID_MEM_ID as usize;

struct MemSlot {
  bytes: Vec<u8>,
  owned: bool,
}

/// Slot table of at most 255 entries. Ids are never re-used until their
/// slot is explicitly freed via [`MemRegistry::unregister`] or
/// [`MemRegistry::clear_all`].
#[derive(Default)]
pub struct MemRegistry {
  slots: Vec<Option<MemSlot>>,
  free_list: Vec<u8>,
}

impl MemRegistry {
  pub fn new() -> Self {
    Self {
      slots: Vec::new(),
      free_list: Vec::new(),
    }
  }

  /// Registers `bytes` under a fresh id. `owned` records whether this
  /// registry is considered the sole owner of the buffer (a bookkeeping
  /// flag only; the registry always holds the bytes directly).
  pub fn register(&mut self, bytes: Vec<u8>, owned: bool) -> Result<u8, CoreError> {
    if let Some(id) = self.free_list.pop() {
      self.slots[id as usize] = Some(MemSlot { bytes, owned });
      return Ok(id);
    }
    if self.slots.len() >= CAPACITY {
      return Err(CoreError::OutOfMemory);
    }
    let id = self.slots.len() as u8;
    self.slots.push(Some(MemSlot { bytes, owned }));
    Ok(id)
  }

  /// Replaces the buffer at an already-registered slot.
  pub fn replace(&mut self, id: u8, bytes: Vec<u8>, owned: bool) -> Result<(), CoreError> {
    let slot = self.slot_mut(id)?;
    *slot = MemSlot { bytes, owned };
    Ok(())
  }

  /// Frees `id`'s slot, making it eligible for reuse by a later `register`.
  pub fn unregister(&mut self, id: u8) -> Result<(), CoreError> {
    self.slot_mut(id)?;
    self.slots[id as usize] = None;
    self.free_list.push(id);
    Ok(())
  }

  /// Frees every active slot. Existing ids become invalid.
  pub fn clear_all(&mut self) {
    self.slots.clear();
    self.free_list.clear();
  }

  pub fn get(&self, id: u8) -> Result<&[u8], CoreError> {
    Ok(&self.slot(id)?.bytes)
  }

  pub fn is_owned(&self, id: u8) -> Result<bool, CoreError> {
    Ok(self.slot(id)?.owned)
  }

  pub fn len(&self) -> usize {
    self.slots.iter().filter(|s| s.is_some()).count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn slot(&self, id: u8) -> Result<&MemSlot, CoreError> {
    if id == INVALID_MEM_ID {
      return Err(CoreError::InvalidMemId(id));
    }
    self
      .slots
      .get(id as usize)
      .and_then(|s| s.as_ref())
      .ok_or(CoreError::InvalidMemId(id))
  }

  fn slot_mut(&mut self, id: u8) -> Result<&mut MemSlot, CoreError> {
    if id == INVALID_MEM_ID {
      return Err(CoreError::InvalidMemId(id));
    }
    self
      .slots
      .get_mut(id as usize)
      .and_then(|s| s.as_mut())
      .ok_or(CoreError::InvalidMemId(id))
  }
}

#[cfg(test)]
mod memreg_tests {
  use super::*;

  #[test]
  fn register_then_get_roundtrips() {
    let mut reg = MemRegistry::new();
    let id = reg.register(b"hello".to_vec(), true).unwrap();
    assert_eq!(reg.get(id).unwrap(), b"hello");
  }

  #[test]
  fn invalid_mem_id_is_rejected() {
    let reg = MemRegistry::new();
    assert!(matches!(
      reg.get(INVALID_MEM_ID),
      Err(CoreError::InvalidMemId(_))
    ));
  }

  #[test]
  fn unregister_then_get_fails() {
    let mut reg = MemRegistry::new();
    let id = reg.register(b"x".to_vec(), true).unwrap();
    reg.unregister(id).unwrap();
    assert!(matches!(reg.get(id), Err(CoreError::InvalidMemId(_))));
  }

  #[test]
  fn freed_slot_is_reused() {
    let mut reg = MemRegistry::new();
    let id = reg.register(b"x".to_vec(), true).unwrap();
    reg.unregister(id).unwrap();
    let id2 = reg.register(b"y".to_vec(), true).unwrap();
    assert_eq!(id, id2);
    assert_eq!(reg.get(id2).unwrap(), b"y");
  }

  #[test]
  fn double_unregister_fails() {
    let mut reg = MemRegistry::new();
    let id = reg.register(b"x".to_vec(), true).unwrap();
    reg.unregister(id).unwrap();
    assert!(matches!(reg.unregister(id), Err(CoreError::InvalidMemId(_))));
  }

  #[test]
  fn clear_all_invalidates_every_id() {
    let mut reg = MemRegistry::new();
    let a = reg.register(b"a".to_vec(), true).unwrap();
    let b = reg.register(b"b".to_vec(), true).unwrap();
    reg.clear_all();
    assert!(reg.get(a).is_err());
    assert!(reg.get(b).is_err());
  }
}
