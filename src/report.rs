//! Renders the final state of every memory store as tables. `Display` for `Engine` lives here so
//! the engine itself stays free of presentation concerns.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::engine::Engine;
use crate::memory::StandardRegister;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

fn make_table<K, V>(key: &str, rows: impl IntoIterator<Item = (K, V)>) -> Table
  where K: Display, V: Display
{
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->key, ubl->"Value"]);

  for (k, v) in rows {
    table.add_row(row![r->k, v]);
  }
  table
}

/// `0 (line)` for the standard slots, the bare number otherwise.
fn register_label(slot: usize) -> String {
  match StandardRegister::try_from(slot) {
    Ok(name) => format!("{} ({})", slot, name),
    Err(_)   => slot.to_string()
  }
}

impl Display for Engine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let memory = self.memory();

    let buffers =
      make_table("Slot", memory.buffers.iter().map(|buffer| (buffer.slot, &buffer.value)));
    let registers =
      make_table(
        "Slot",
        memory.registers.iter().map(|register| (register_label(register.slot), &register.value))
      );
    let temporaries = make_table("Index", memory.temporaries.iter().enumerate());

    let mut write_ahead = Table::new();
    write_ahead.set_format(*TABLE_DISPLAY_FORMAT);
    write_ahead.set_titles(row![ubr->"Sector", ubr->"Id", ubl->"Value"]);
    for sector in self.sectors() {
      for entry in sector.write_ahead.iter() {
        write_ahead.add_row(row![r->sector.id, r->entry.id, entry.value]);
      }
    }

    writeln!(f, "---------------- PROGRAM RESULT ----------------")?;
    writeln!(f, "--- BUFFERS ---\n{}", buffers)?;
    writeln!(f, "--- REGISTERS ---\n{}", registers)?;
    writeln!(f, "--- TEMPORARY BUFFER MEMORY ---\n{}", temporaries)?;
    write!(f, "--- WRITE-AHEAD BUFFERS ---\n{}", write_ahead)
  }
}
