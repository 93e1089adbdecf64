//! Temporary buffers hold arithmetic results until the program copies them into persistent
//! buffers. Entries are addressed by position; removing one shifts every later entry down.

use crate::address::parse_index;
use crate::error::{Error, Result};

/// Resolves to the index of the most recently appended temporary buffer.
pub const LAST: &str = "_last_";

#[derive(Clone, Default, Debug)]
pub struct Temporaries {
  values: Vec<String>
}

impl Temporaries {

  /// Appends a value and returns the index it landed at.
  pub fn push(&mut self, value: String) -> usize {
    self.values.push(value);
    self.values.len() - 1
  }

  pub fn last_index(&self) -> Result<usize> {
    self.values.len().checked_sub(1).ok_or(Error::NoLastTemporary)
  }

  /// Resolves a raw operand that is either `_last_` or a literal index.
  pub fn resolve(&self, raw: &str) -> Result<usize> {
    match raw == LAST {
      true  => self.last_index(),
      false => parse_index(raw)
    }
  }

  pub fn get(&self, index: usize) -> Result<&str> {
    self.values
        .get(index)
        .map(String::as_str)
        .ok_or(Error::NoSuchTemporary { index, len: self.values.len() })
  }

  pub fn remove(&mut self, index: usize) -> Result<String> {
    match index < self.values.len() {
      true  => Ok(self.values.remove(index)),
      false => Err(Error::NoSuchTemporary { index, len: self.values.len() })
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.values.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}
