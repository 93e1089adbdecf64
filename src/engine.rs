/*!
  The engine owns the loaded sectors and every memory store for the duration of one run.

  Execution starts at sector 0. Sector calls form a depth-first call tree: `GOTOSECTOR` suspends
  the caller until the callee, and everything the callee calls in turn, has run to completion.
  Suspended callers are kept on an explicit frame stack instead of the host call stack, so a
  program that calls itself forever fails with `Error::CallDepthExceeded` once the configured
  limit is reached.

  Write-ahead protocol:

    WABWRITE-s,id,v    stages v in sector s's store, at any time
    GOTOSECTOR-s       runs s; s can see everything staged for it
    WABCPYTOBUF-id,b   (inside s) copies the staged value into buffer b
    <s returns>        s's store is emptied

  A sector's store is emptied exactly once per invocation, when it returns to its caller. The
  entry sector has no caller, so its store survives the run and shows up in the final report.
*/

use tracing::{debug, trace};

use crate::bytecode::{load, Destination, Signal};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::memory::Memory;
use crate::sector::{Sector, ENTRY_SECTOR};

/// A suspended or running sector invocation.
#[derive(Copy, Clone, Debug)]
struct Frame {
  sector : usize,
  /// Index of the next instruction to execute.
  next   : usize
}

impl Frame {
  fn new(sector: usize) -> Frame {
    Frame { sector, next: 0 }
  }
}

#[derive(Debug)]
pub struct Engine {
  config   : Config,
  sectors  : Vec<Sector>,
  memory   : Memory,
  /// Instructions executed so far.
  executed : usize
}

impl Engine {

  pub fn new(sectors: Vec<Sector>, memory: Memory, config: Config) -> Result<Engine> {
    if sectors.is_empty() {
      return Err(Error::EmptyProgram);
    }
    Ok(Engine { config, sectors, memory, executed: 0 })
  }

  /// Loads program text and builds an engine for it. Nothing runs until `run` is called.
  pub fn load(text: &str, memory: Memory, config: Config) -> Result<Engine> {
    Engine::new(load(text)?, memory, config)
  }

  // region Accessors

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn sectors(&self) -> &[Sector] {
    &self.sectors
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn executed(&self) -> usize {
    self.executed
  }

  // endregion

  // region Execution

  /// Runs the entry sector to completion. The first error aborts the run.
  pub fn run(&mut self) -> Result<()> {
    let mut frames: Vec<Frame> = vec![Frame::new(ENTRY_SECTOR)];
    debug!(sector = ENTRY_SECTOR, "entering sector");

    loop {
      let (current, position) =
        match frames.last_mut() {
          Some(frame) => {
            let at = (frame.sector, frame.next);
            frame.next += 1;
            at
          }
          None => break
        };

      if position >= self.sectors[current].len() {
        frames.pop();
        self.returned(current, !frames.is_empty());
        continue;
      }

      self.step(current, position, &mut frames)
          .map_err(|error| self.fault(current, position, error))?;

      #[cfg(feature = "trace_computation")]
      trace!("\n{}", self);
    }

    Ok(())
  }

  /// Executes one instruction and acts on the signal it returns.
  fn step(&mut self, current: usize, position: usize, frames: &mut Vec<Frame>) -> Result<()> {
    let instruction = &self.sectors[current].instructions()[position];
    trace!(sector = current, line = instruction.line(), "{}", instruction);

    let signal = instruction.execute(&mut self.memory)?;
    self.executed += 1;

    match signal {

      Signal::Continue => {}

      Signal::Invoke(target) => {
        self.sector(target)?;
        if frames.len() >= self.config.max_call_depth {
          return Err(Error::CallDepthExceeded(self.config.max_call_depth));
        }
        debug!(sector = target, caller = current, depth = frames.len(), "entering sector");
        frames.push(Frame::new(target));
      }

      Signal::Stage { sector, id, content } => {
        self.sector_mut(sector)?.write_ahead.stage(id, content);
      }

      Signal::Commit { id, destination } => {
        let value =
          self.sectors[current]
              .write_ahead
              .get(id)
              .ok_or(Error::NoSuchWriteAhead { sector: current, id })?
              .to_string();
        let slot =
          match destination {
            Destination::Slot(slot) => slot,
            Destination::Allocate   => self.memory.buffers.allocate()?
          };
        self.memory.buffers.write(slot, value);
      }

      Signal::Discard(id) => {
        self.sectors[current]
            .write_ahead
            .remove(id)
            .ok_or(Error::NoSuchWriteAhead { sector: current, id })?;
      }

    } // end match signal

    Ok(())
  }

  /// Bookkeeping for a finished invocation.
  fn returned(&mut self, sector: usize, has_caller: bool) {
    match has_caller {
      true  => {
        let dropped = self.sectors[sector].write_ahead.clear();
        debug!(sector, dropped, "sector returned, write-ahead store cleared");
      }
      false => {
        debug!(sector, executed = self.executed, "entry sector returned");
      }
    }
  }

  // endregion

  // region Low-level utility methods

  fn sector(&self, id: usize) -> Result<&Sector> {
    self.sectors.get(id).ok_or(Error::NoSuchSector(id))
  }

  fn sector_mut(&mut self, id: usize) -> Result<&mut Sector> {
    self.sectors.get_mut(id).ok_or(Error::NoSuchSector(id))
  }

  /// Attaches the failing instruction to a runtime error.
  fn fault(&self, sector: usize, position: usize, error: Error) -> Error {
    let instruction = &self.sectors[sector].instructions()[position];
    Error::Fault {
      sector,
      line        : instruction.line(),
      instruction : instruction.to_string(),
      source      : Box::new(error)
    }
  }

  // endregion

}
