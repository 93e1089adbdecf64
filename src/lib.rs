/*!
  A stack-of-sectors bytecode virtual machine.

  Programs are text. Instructions are grouped into sectors, procedure-like units delimited by
  `#-#` lines and numbered in load order; sector 0 is the entry point. Instructions run against
  four memory stores:

  * registers, whose writes can print to stdout or read from stdin,
  * persistent buffers, the program memory, keyed by slot,
  * temporary buffers, where arithmetic results land,
  * write-ahead buffers, one store per sector, used to pass values into a sector before calling
    it and emptied when that call returns.

  The pipeline is:

  ```text
  text -> bytecode::load -> Sectors -> Engine::run -> final Memory
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bytecode;
pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
mod report;
pub mod sector;

pub use config::Config;
pub use engine::Engine;
pub use error::{Error, Result};
pub use memory::Memory;
