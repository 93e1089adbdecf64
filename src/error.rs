//! Every failure the machine can report. All of them are fatal: the engine stops at the first
//! error and hands it back to the caller.

use crate::bytecode::Opcode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  // region Parse errors

  #[error("line {line}: malformed instruction `{text}`, expected `OPCODE-arg,arg,...`")]
  MalformedInstruction { line: usize, text: String },

  #[error("line {line}: {name} is not an operation")]
  UnknownOpcode { line: usize, name: String },

  #[error("line {line}: {opcode} requires {expected} operands but was given {given}")]
  WrongArity { line: usize, opcode: Opcode, expected: usize, given: usize },

  #[error("line {line}: sector {sector} is opened here but never closed")]
  UnterminatedSector { line: usize, sector: usize },

  #[error("program has no entry sector")]
  EmptyProgram,

  // endregion

  // region Addressing errors

  #[error("invalid addressing mode in `{token}`")]
  InvalidAddressingMode { token: String },

  // endregion

  // region Bounds errors

  #[error("register {0} does not exist")]
  NoSuchRegister(usize),

  #[error("buffer not found: slot {0}")]
  NoSuchBuffer(usize),

  #[error("temporary buffer {index} does not exist ({len} allocated)")]
  NoSuchTemporary { index: usize, len: usize },

  #[error("temporary buffer memory is empty, `_last_` has nothing to refer to")]
  NoLastTemporary,

  #[error("sector {sector} has no write-ahead buffer {id}")]
  NoSuchWriteAhead { sector: usize, id: usize },

  #[error("sector {0} does not exist")]
  NoSuchSector(usize),

  // endregion

  // region Arithmetic errors

  #[error("`{0}` is not an integer")]
  NotAnInteger(String),

  #[error("`{0}` is not a valid slot or index")]
  NotAnIndex(String),

  #[error("division by zero")]
  DivisionByZero,

  #[error("{opcode} overflowed on {lhs} and {rhs}")]
  Overflow { opcode: Opcode, lhs: i64, rhs: i64 },

  // endregion

  // region Resource errors

  #[error("no persistent buffer slot is left to allocate")]
  NoFreeSlot,

  #[error("sector call depth exceeded the limit of {0}")]
  CallDepthExceeded(usize),

  #[error("register {slot} I/O failed: {source}")]
  Port { slot: usize, source: std::io::Error },

  // endregion

  /// A runtime error together with the instruction that raised it.
  #[error("sector {sector}, line {line} `{instruction}`: {source}")]
  Fault { sector: usize, line: usize, instruction: String, source: Box<Error> },
}

impl Error {
  /// The underlying error, with any instruction context peeled off.
  pub fn root(&self) -> &Error {
    match self {
      Error::Fault { source, .. } => source.root(),
      other                       => other
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
