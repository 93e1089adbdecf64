//! An `Either` type that holds the address of either a register or a persistent buffer, and the
//! evaluator that resolves raw operand tokens against machine memory.
//!
//! Addressing tokens look like `$#3$` (persistent buffer slot 3) or `$@0$` (register 0). Anything
//! not wrapped in `$` is a literal and is returned unchanged.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::memory::Memory;

/// Slots are naturally indices into a memory store.
pub type Slot = usize;

pub const SENTINEL        : char = '$';
pub const BUFFER_MARKER   : char = '#';
pub const REGISTER_MARKER : char = '@';

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Address {
  /// A slot in the persistent buffer store.
  Buffer(Slot),
  /// A register slot.
  Register(Slot)
}

impl Address {

  /**
    Parses an addressing token. Returns `Ok(None)` if the token is a literal, that is, if it is
    not wrapped in `$` on both ends.

    A wrapped token must carry a marker and a slot number; anything else is an
    `Error::InvalidAddressingMode`, and a bad slot number is an `Error::NotAnIndex`.
  */
  pub fn parse(token: &str) -> Result<Option<Address>> {
    let inner =
      match token.len() >= 2 && token.starts_with(SENTINEL) && token.ends_with(SENTINEL) {
        true  => &token[1..token.len() - 1],
        false => return Ok(None)
      };

    let mut chars = inner.chars();
    let marker    = chars.next();
    let digits    = chars.as_str();

    let make: fn(Slot) -> Address =
      match marker {
        Some(BUFFER_MARKER)   => Address::Buffer,
        Some(REGISTER_MARKER) => Address::Register,
        _ => {
          return Err(Error::InvalidAddressingMode { token: token.to_string() });
        }
      };

    let slot = digits.parse::<Slot>().map_err(|_| Error::NotAnIndex(digits.to_string()))?;
    Ok(Some(make(slot)))
  }

}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Address::Buffer(i) => {
        write!(f, "{}{}{}{}", SENTINEL, BUFFER_MARKER, i, SENTINEL)
      },
      Address::Register(i) => {
        write!(f, "{}{}{}{}", SENTINEL, REGISTER_MARKER, i, SENTINEL)
      }
    }
  }
}

/// Resolves one raw operand token to the value it denotes in the current memory state.
pub fn evaluate(token: &str, memory: &Memory) -> Result<String> {
  match Address::parse(token)? {
    Some(Address::Buffer(slot))   => memory.buffers.read(slot).map(str::to_string),
    Some(Address::Register(slot)) => memory.registers.read(slot).map(str::to_string),
    None                          => Ok(token.to_string())
  }
}

/// Parses a resolved value as a slot, register number, sector id or index.
pub fn parse_index(value: &str) -> Result<usize> {
  value.parse::<usize>().map_err(|_| Error::NotAnIndex(value.to_string()))
}

/// Parses a resolved value as an arithmetic operand.
pub fn parse_integer(value: &str) -> Result<i64> {
  value.parse::<i64>().map_err(|_| Error::NotAnInteger(value.to_string()))
}
