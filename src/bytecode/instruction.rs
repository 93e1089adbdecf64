use std::fmt::{Display, Formatter};

use tracing::debug;

use super::{Opcode, OPCODE_SEPARATOR, OPERAND_SEPARATOR};
use crate::address::{evaluate, parse_index, parse_integer, Slot};
use crate::error::{Error, Result};
use crate::memory::{Memory, LAST};

/// Asks `WABCPYTOBUF` to allocate a fresh persistent buffer slot.
pub const NEW: &str = "_new_";

/// Where a committed write-ahead value goes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Destination {
  Slot(Slot),
  Allocate
}

/// What the engine has to do after an instruction has run.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Signal {
  Continue,
  /// Run the sector to completion, then resume the caller.
  Invoke(usize),
  /// Stage `content` in the write-ahead store of `sector`.
  Stage { sector: usize, id: usize, content: String },
  /// Copy write-ahead entry `id` of the running sector into a persistent buffer.
  Commit { id: usize, destination: Destination },
  /// Drop write-ahead entry `id` of the running sector.
  Discard(usize)
}

/// One parsed line of a program. The operand count always matches the opcode's arity.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Instruction {
  opcode   : Opcode,
  operands : Vec<String>,
  line     : usize
}

impl Instruction {

  pub fn new(opcode: Opcode, operands: Vec<String>, line: usize) -> Result<Instruction> {
    match operands.len() == opcode.arity() {
      true  => Ok(Instruction { opcode, operands, line }),
      false => Err(Error::WrongArity {
        line,
        opcode,
        expected : opcode.arity(),
        given    : operands.len()
      })
    }
  }

  pub fn opcode(&self) -> Opcode {
    self.opcode
  }

  pub fn operands(&self) -> &[String] {
    &self.operands
  }

  /// The source line this instruction was loaded from.
  pub fn line(&self) -> usize {
    self.line
  }

  // region Operand helpers

  fn raw(&self, n: usize) -> &str {
    &self.operands[n]
  }

  fn value(&self, n: usize, memory: &Memory) -> Result<String> {
    evaluate(self.raw(n), memory)
  }

  fn index(&self, n: usize, memory: &Memory) -> Result<usize> {
    parse_index(&self.value(n, memory)?)
  }

  fn integer(&self, n: usize, memory: &Memory) -> Result<i64> {
    parse_integer(&self.value(n, memory)?)
  }

  // endregion

  /**
    Executes the instruction against the shared memory stores.

    Operands are resolved through the evaluator except where the instruction set says they are
    raw: both operands of `TMPBUFCPY`, the content of `WABWRITE`, and the `_last_`/`_new_`
    keywords.
  */
  pub fn execute(&self, memory: &mut Memory) -> Result<Signal> {
    match self.opcode {

      Opcode::BufWrite => {
        let slot  = self.index(0, memory)?;
        let value = self.value(1, memory)?;
        memory.buffers.write(slot, value);
      }

      Opcode::RegWrite => {
        let register = self.index(0, memory)?;
        let value    = self.value(1, memory)?;
        memory.registers.write(register, value)?;
      }

      Opcode::RegCpyToBuf => {
        let register = self.index(0, memory)?;
        let slot     = self.index(1, memory)?;
        let value    = memory.registers.read(register)?.to_string();
        memory.buffers.write(slot, value);
      }

      Opcode::BufCpyToReg => {
        let slot     = self.index(0, memory)?;
        let register = self.index(1, memory)?;
        let value    = memory.buffers.read(slot)?.to_string();
        memory.registers.write(register, value)?;
      }

      Opcode::GotoSector => {
        return Ok(Signal::Invoke(self.index(0, memory)?));
      }

      | Opcode::Add
      | Opcode::Sub
      | Opcode::Mul
      | Opcode::Div => {
        let lhs    = self.integer(0, memory)?;
        let rhs    = self.integer(1, memory)?;
        let result = arithmetic(self.opcode, lhs, rhs)?;
        memory.temporaries.push(result.to_string());
      }

      Opcode::TmpBufCpy => {
        let index = memory.temporaries.resolve(self.raw(0))?;
        let slot  = parse_index(self.raw(1))?;
        let value = memory.temporaries.get(index)?.to_string();
        memory.buffers.write(slot, value);
      }

      Opcode::TmpBufRm => {
        let index =
          match self.raw(0) == LAST {
            true  => memory.temporaries.last_index()?,
            false => self.index(0, memory)?
          };
        memory.temporaries.remove(index)?;
      }

      Opcode::WabWrite => {
        return Ok(Signal::Stage {
          sector  : self.index(0, memory)?,
          id      : self.index(1, memory)?,
          content : self.raw(2).to_string()
        });
      }

      Opcode::WabRm => {
        return Ok(Signal::Discard(self.index(0, memory)?));
      }

      Opcode::WabCpyToBuf => {
        let id = self.index(0, memory)?;
        let destination =
          match self.raw(1) == NEW {
            true  => Destination::Allocate,
            false => Destination::Slot(self.index(1, memory)?)
          };
        return Ok(Signal::Commit { id, destination });
      }

      Opcode::BufRm => {
        let slot = self.index(0, memory)?;
        if memory.buffers.remove(slot).is_none() {
          // Removing an absent buffer is deliberately not an error.
          debug!(line = self.line, slot, "BUFRM of a buffer that does not exist");
        }
      }

    } // end match opcode

    Ok(Signal::Continue)
  }
}

/// Integer arithmetic for the four arithmetic opcodes. Division truncates toward zero.
fn arithmetic(opcode: Opcode, lhs: i64, rhs: i64) -> Result<i64> {
  let result =
    match opcode {
      Opcode::Add => lhs.checked_add(rhs),
      Opcode::Sub => lhs.checked_sub(rhs),
      Opcode::Mul => lhs.checked_mul(rhs),
      Opcode::Div => {
        if rhs == 0 {
          return Err(Error::DivisionByZero);
        }
        lhs.checked_div(rhs)
      }
      _ => unreachable!("{} is not an arithmetic opcode", opcode)
    };

  result.ok_or(Error::Overflow { opcode, lhs, rhs })
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let separator = OPERAND_SEPARATOR.to_string();
    write!(f, "{}{}{}", self.opcode, OPCODE_SEPARATOR, self.operands.join(separator.as_str()))
  }
}
