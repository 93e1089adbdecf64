/*!
  The machine's memory stores. Registers, persistent buffers and temporary buffers are shared by
  every sector and live in `Memory`. Write-ahead stores belong to individual sectors and live in
  `crate::sector::Sector`.
*/

mod buffers;
mod registers;
mod temporary;
mod write_ahead;

pub use buffers::{Buffer, Buffers};
pub use registers::{Input, Output, Port, Register, Registers, StandardRegister, Storage};
pub use temporary::{Temporaries, LAST};
pub use write_ahead::{WriteAheadBuffer, WriteAheadStore};

#[derive(Debug, Default)]
pub struct Memory {
  pub registers   : Registers,
  pub buffers     : Buffers,
  pub temporaries : Temporaries
}

impl Memory {
  pub fn new(registers: Registers) -> Memory {
    Memory {
      registers,
      buffers     : Buffers::default(),
      temporaries : Temporaries::default()
    }
  }
}
