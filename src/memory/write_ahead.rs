//! The write-ahead store of a single sector: values staged by a caller before it invokes the
//! sector. The engine clears the store when the sector's invocation returns.

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct WriteAheadBuffer {
  pub id    : usize,
  pub value : String
}

#[derive(Clone, Default, Debug)]
pub struct WriteAheadStore {
  entries: Vec<WriteAheadBuffer>
}

impl WriteAheadStore {

  /// Stages a value under `id`. Staging the same id twice keeps the newer value.
  pub fn stage(&mut self, id: usize, value: String) {
    match self.entries.iter_mut().find(|entry| entry.id == id) {
      Some(entry) => entry.value = value,
      None        => self.entries.push(WriteAheadBuffer { id, value })
    }
  }

  pub fn get(&self, id: usize) -> Option<&str> {
    self.entries
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.value.as_str())
  }

  pub fn remove(&mut self, id: usize) -> Option<WriteAheadBuffer> {
    let position = self.entries.iter().position(|entry| entry.id == id)?;
    Some(self.entries.remove(position))
  }

  /// Empties the store, returning how many entries were dropped.
  pub fn clear(&mut self) -> usize {
    let dropped = self.entries.len();
    self.entries.clear();
    dropped
  }

  pub fn iter(&self) -> impl Iterator<Item = &WriteAheadBuffer> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
