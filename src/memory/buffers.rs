//! Persistent buffers, the program memory. The store is keyed by slot, kept in insertion order so
//! the final-state report lists buffers in the order the program created them.

use crate::address::Slot;
use crate::error::{Error, Result};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Buffer {
  pub slot  : Slot,
  pub value : String
}

#[derive(Clone, Default, Debug)]
pub struct Buffers {
  buffers: Vec<Buffer>
}

impl Buffers {

  pub fn get(&self, slot: Slot) -> Option<&Buffer> {
    self.buffers.iter().find(|buffer| buffer.slot == slot)
  }

  pub fn read(&self, slot: Slot) -> Result<&str> {
    self.get(slot)
        .map(|buffer| buffer.value.as_str())
        .ok_or(Error::NoSuchBuffer(slot))
  }

  /// Overwrites the buffer at `slot`, creating it if it does not exist yet.
  pub fn write(&mut self, slot: Slot, value: String) {
    match self.buffers.iter_mut().find(|buffer| buffer.slot == slot) {
      Some(buffer) => buffer.value = value,
      None         => self.buffers.push(Buffer { slot, value })
    }
  }

  /// Removes the buffer at `slot`, returning `None` if there was none.
  pub fn remove(&mut self, slot: Slot) -> Option<Buffer> {
    let position = self.buffers.iter().position(|buffer| buffer.slot == slot)?;
    Some(self.buffers.remove(position))
  }

  /// The lowest slot above every slot in use. Fails once the highest possible slot is taken.
  pub fn allocate(&self) -> Result<Slot> {
    match self.buffers.iter().map(|buffer| buffer.slot).max() {
      Some(highest) => highest.checked_add(1).ok_or(Error::NoFreeSlot),
      None          => Ok(0)
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
    self.buffers.iter()
  }

  pub fn len(&self) -> usize {
    self.buffers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffers.is_empty()
  }
}
