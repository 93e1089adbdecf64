//! Run configuration. The command line front end maps its flags onto a `Config`; library users
//! build one directly or take the default.

/// How many sector invocations may be nested before the run fails.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Config {
  /// Nesting limit for `GOTOSECTOR`, counting the entry sector.
  pub max_call_depth : usize,
  /// Print every memory store as a table once the run finishes.
  pub dump_state     : bool
}

impl Default for Config {
  fn default() -> Config {
    Config {
      max_call_depth : DEFAULT_MAX_CALL_DEPTH,
      dump_state     : false
    }
  }
}
