/*!

  The instruction set. A program is text, one instruction per line:

  ```text
  OPCODE-arg0,arg1,...
  ```

  Operands stay raw strings until the instruction executes, because most of them may be
  addressing tokens (`$#3$`, `$@0$`) whose value depends on memory at that moment. The opcode,
  on the other hand, is resolved once at load time through the `strum` derives below, so an
  unknown name is rejected before anything runs.

  Executing an instruction touches only the shared memory stores. Anything involving sectors
  (calls and the write-ahead protocol) is returned to the engine as a `Signal`.

*/

mod instruction;
mod loader;

pub use instruction::{Destination, Instruction, Signal, NEW};
pub use loader::{load, parse_instruction, OPERAND_SEPARATOR, OPCODE_SEPARATOR, SECTOR_DELIMITER};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/// Opcodes of the virtual machine, spelled in programs exactly as their uppercase names.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter,
  Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Opcode {
  // Memory moves //
  BufWrite,          // BUFWRITE-slot,value
  RegWrite,          // REGWRITE-register,value
  RegCpyToBuf,       // REGCPYTOBUF-register,slot
  BufCpyToReg,       // BUFCPYTOREG-slot,register

  // Control //
  GotoSector,        // GOTOSECTOR-sector

  // Arithmetic, results land in temporary buffers //
  Add,               // ADD-lhs,rhs
  Sub,               // SUB-lhs,rhs
  Div,               // DIV-lhs,rhs
  Mul,               // MUL-lhs,rhs
  TmpBufCpy,         // TMPBUFCPY-index|_last_,slot
  TmpBufRm,          // TMPBUFRM-index|_last_

  // Write-ahead protocol //
  WabWrite,          // WABWRITE-sector,id,content
  WabRm,             // WABRM-id
  WabCpyToBuf,       // WABCPYTOBUF-id,slot|_new_

  BufRm,             // BUFRM-slot
}

impl Opcode {
  /// The number of operands the opcode takes.
  pub fn arity(&self) -> usize {
    match self {
      | Opcode::GotoSector
      | Opcode::TmpBufRm
      | Opcode::WabRm
      | Opcode::BufRm => 1,

      | Opcode::WabWrite => 3,

      _ => 2
    }
  }
}


#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn names_round_trip() {
    for opcode in Opcode::iter() {
      assert_eq!(Opcode::from_str(&opcode.to_string()).unwrap(), opcode);
    }
    assert_eq!(Opcode::WabCpyToBuf.to_string(), "WABCPYTOBUF");
    assert_eq!(Opcode::from_str("REGCPYTOBUF").unwrap(), Opcode::RegCpyToBuf);
  }

  #[test]
  fn names_are_case_sensitive() {
    assert!(Opcode::from_str("bufwrite").is_err());
    assert!(Opcode::from_str("FOOBAR").is_err());
  }
}
