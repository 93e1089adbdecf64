//! Shared helpers: run a program with registers wired to an in-memory transcript and input.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use sectorvm::memory::{Input, Memory, Output, Registers};
use sectorvm::{Config, Engine, Error};

/// Collects everything registers 0 and 1 emit.
#[derive(Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
  pub fn contents(&self) -> String {
    String::from_utf8(self.0.borrow().clone()).unwrap()
  }
}

impl Write for Transcript {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.borrow_mut().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

pub struct Run {
  pub engine : Engine,
  pub output : Transcript,
  pub result : Result<(), Error>
}

/// Standard register layout, with stdout and stdin replaced.
pub fn memory(output: &Transcript, input: &str) -> Memory {
  Memory::new(Registers::with_ports(vec![
    Box::new(Output::line(output.clone())),
    Box::new(Output::raw(output.clone())),
    Box::new(Input::new(Cursor::new(input.to_string()))),
  ]))
}

pub fn load(program: &str, input: &str) -> Result<(Engine, Transcript), Error> {
  let output = Transcript::default();
  let engine = Engine::load(program, memory(&output, input), Config::default())?;
  Ok((engine, output))
}

/// Loads and runs a program that is expected to load cleanly.
pub fn run(program: &str, input: &str) -> Run {
  let (mut engine, output) = load(program, input).expect("program failed to load");
  let result = engine.run();
  Run { engine, output, result }
}
