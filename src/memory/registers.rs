/*!
  Registers are fixed-identity cells whose write path can have I/O side effects. The side effect
  belongs to a `Port` installed behind each slot: the standard machine wires slot 0 to stdout
  with a line terminator, slot 1 to stdout without one, and slot 2 to stdin. A plain `Storage`
  port makes a register an ordinary cell.

  Reading a register never touches its port; it returns whatever the last write left behind.
*/

use std::fmt::{Debug, Formatter};
use std::io::{self, BufRead, Write};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display as StrumDisplay;

use crate::address::Slot;
use crate::error::{Error, Result};

/// The slots every standard machine is created with.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
#[repr(usize)]
pub enum StandardRegister {
  /// Emits the written value followed by a line terminator.
  Line  = 0,
  /// Emits the written value as is.
  Print = 1,
  /// Ignores the written value and stores a line read from input instead.
  Input = 2,
}

/**
  The capability behind a register slot.

  `write` sees every value written to the register. Afterwards `read` is asked whether the
  register should hold something else instead: input ports answer with the value they read,
  every other port answers `None` and the written value is stored.
*/
pub trait Port {
  fn write(&mut self, _value: &str) -> io::Result<()> {
    Ok(())
  }

  fn read(&mut self) -> io::Result<Option<String>> {
    Ok(None)
  }
}

/// A register with no side effects.
#[derive(Clone, Copy, Default, Debug)]
pub struct Storage;

impl Port for Storage {}

/// Writes every value to a sink, optionally followed by a newline.
#[derive(Debug)]
pub struct Output<W: Write> {
  sink     : W,
  newline  : bool
}

impl<W: Write> Output<W> {
  pub fn line(sink: W) -> Self {
    Output { sink, newline: true }
  }

  pub fn raw(sink: W) -> Self {
    Output { sink, newline: false }
  }
}

impl<W: Write> Port for Output<W> {
  fn write(&mut self, value: &str) -> io::Result<()> {
    self.sink.write_all(value.as_bytes())?;
    if self.newline {
      self.sink.write_all(b"\n")?;
    }
    self.sink.flush()
  }
}

/// Blocks for one line of input whenever the register is written. The whole line is kept,
/// spaces included, rather than a single whitespace-delimited word.
#[derive(Debug)]
pub struct Input<R: BufRead> {
  source: R
}

impl<R: BufRead> Input<R> {
  pub fn new(source: R) -> Self {
    Input { source }
  }
}

impl<R: BufRead> Port for Input<R> {
  fn read(&mut self) -> io::Result<Option<String>> {
    let mut line = String::new();
    // End of input reads as the empty string.
    self.source.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
  }
}


pub struct Register {
  pub slot  : Slot,
  pub value : String,
  port      : Box<dyn Port>
}

impl Register {
  pub fn new(slot: Slot, port: Box<dyn Port>) -> Register {
    Register { slot, value: String::new(), port }
  }

  fn write(&mut self, value: String) -> io::Result<()> {
    self.port.write(&value)?;
    self.value =
      match self.port.read()? {
        Some(input) => input,
        None        => value
      };
    Ok(())
  }
}

impl Debug for Register {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Register")
     .field("slot", &self.slot)
     .field("value", &self.value)
     .finish_non_exhaustive()
  }
}


/// The register file. Slots are dense, starting at zero, and fixed for the whole run.
#[derive(Debug)]
pub struct Registers {
  registers: Vec<Register>
}

impl Registers {

  /// Registers 0 and 1 write to stdout, register 2 reads from stdin.
  pub fn standard() -> Registers {
    Registers::with_ports(vec![
      Box::new(Output::line(io::stdout())),
      Box::new(Output::raw(io::stdout())),
      Box::new(Input::new(io::stdin().lock())),
    ])
  }

  /// One register per port, numbered in order.
  pub fn with_ports(ports: Vec<Box<dyn Port>>) -> Registers {
    Registers {
      registers: ports.into_iter()
                      .enumerate()
                      .map(|(slot, port)| Register::new(slot, port))
                      .collect()
    }
  }

  pub fn read(&self, slot: Slot) -> Result<&str> {
    self.registers
        .get(slot)
        .map(|register| register.value.as_str())
        .ok_or(Error::NoSuchRegister(slot))
  }

  /// Runs the register's write path, applying its port's side effects.
  pub fn write(&mut self, slot: Slot, value: String) -> Result<()> {
    let register = self.registers.get_mut(slot).ok_or(Error::NoSuchRegister(slot))?;
    register.write(value).map_err(|source| Error::Port { slot, source })
  }

  pub fn iter(&self) -> impl Iterator<Item = &Register> {
    self.registers.iter()
  }

  pub fn len(&self) -> usize {
    self.registers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registers.is_empty()
  }
}

impl Default for Registers {
  /// The standard three slots as plain storage, for machines without a console.
  fn default() -> Registers {
    Registers::with_ports(vec![Box::new(Storage), Box::new(Storage), Box::new(Storage)])
  }
}
