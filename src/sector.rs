//! A sector is the unit of invocation: an instruction sequence plus the write-ahead store its
//! callers stage values into.

use crate::bytecode::Instruction;
use crate::memory::WriteAheadStore;

/// The sector execution starts in.
pub const ENTRY_SECTOR: usize = 0;

#[derive(Clone, Debug)]
pub struct Sector {
  pub id          : usize,
  instructions    : Vec<Instruction>,
  pub write_ahead : WriteAheadStore
}

impl Sector {
  pub fn new(id: usize) -> Sector {
    Sector {
      id,
      instructions : vec![],
      write_ahead  : WriteAheadStore::default()
    }
  }

  pub fn push(&mut self, instruction: Instruction) {
    self.instructions.push(instruction);
  }

  pub fn instructions(&self) -> &[Instruction] {
    &self.instructions
  }

  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }
}
