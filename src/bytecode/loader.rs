/*!
  Turns program text into sectors.

  A line consisting of exactly `#-#` opens a sector; the next one closes it. Sectors are numbered
  in the order they are opened, starting at zero. Every non-empty line inside a sector is one
  instruction. Lines outside sectors are ignored, which leaves room for free-form notes between
  sectors. Leading whitespace is stripped from every line before any of this happens.
*/

use std::str::FromStr;

use nom::{
  bytes::complete::{take_till, take_till1},
  character::complete::char as one_char,
  combinator::all_consuming,
  multi::separated_list1,
  sequence::separated_pair,
  IResult
};
use tracing::info;

use super::{Instruction, Opcode};
use crate::error::{Error, Result};
use crate::sector::Sector;

pub const SECTOR_DELIMITER  : &str = "#-#";
pub const OPCODE_SEPARATOR  : char = '-';
pub const OPERAND_SEPARATOR : char = ',';

/// `OPCODE-arg,arg,...`, split once on the opcode separator. Operands may be empty.
fn instruction_p(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
  all_consuming(
    separated_pair(
      take_till1(|c: char| c == OPCODE_SEPARATOR),
      one_char(OPCODE_SEPARATOR),
      separated_list1(
        one_char(OPERAND_SEPARATOR),
        take_till(|c: char| c == OPERAND_SEPARATOR)
      )
    )
  )(input)
}

/// Parses a single instruction line. `line` is only used for error reporting.
pub fn parse_instruction(text: &str, line: usize) -> Result<Instruction> {
  let (name, operands) =
    match instruction_p(text) {
      Ok((_rest, parsed)) => parsed,
      Err(_e) => {
        return Err(Error::MalformedInstruction { line, text: text.to_string() });
      }
    };

  let opcode =
    Opcode::from_str(name)
      .map_err(|_| Error::UnknownOpcode { line, name: name.to_string() })?;

  Instruction::new(opcode, operands.into_iter().map(str::to_string).collect(), line)
}

/**
  Loads every sector of a program. Any malformed line, unknown opcode or unclosed sector fails
  the whole load, so nothing executes unless the entire program parsed.
*/
pub fn load(text: &str) -> Result<Vec<Sector>> {
  let mut sectors: Vec<Sector> = Vec::new();
  // The sector being filled and the line that opened it.
  let mut open: Option<(Sector, usize)> = None;

  for (index, line) in text.lines().enumerate() {
    let line_number = index + 1;
    let line        = line.trim_start();

    if line == SECTOR_DELIMITER {
      match open.take() {
        Some((sector, _)) => sectors.push(sector),
        None              => open = Some((Sector::new(sectors.len()), line_number))
      }
      continue;
    }

    if line.is_empty() {
      continue;
    }

    if let Some((sector, _)) = open.as_mut() {
      sector.push(parse_instruction(line, line_number)?);
    }
  }

  if let Some((sector, line)) = open {
    return Err(Error::UnterminatedSector { line, sector: sector.id });
  }

  info!(
    sectors      = sectors.len(),
    instructions = sectors.iter().map(Sector::len).sum::<usize>(),
    "loaded program"
  );

  Ok(sectors)
}
