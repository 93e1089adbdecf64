//! Whole programs, run end to end with captured register I/O.

mod common;

use common::{load, run};
use sectorvm::Error;

#[test]
fn demo_program() {
  let run = run(include_str!("../demos/echo.sbc"), "Ada\n");
  run.result.unwrap();

  assert_eq!(run.output.contents(), "name?\nAda\n42\n");
  let buffers = &run.engine.memory().buffers;
  assert_eq!(buffers.read(0).unwrap(), "Ada");
  assert_eq!(buffers.read(1).unwrap(), "42");
  assert!(run.engine.memory().temporaries.is_empty());
}

#[test]
fn regwrite_zero_emits_one_line() {
  let run = run("#-#\nREGWRITE-0,hello\n#-#\n", "");
  run.result.unwrap();

  assert_eq!(run.output.contents(), "hello\n");
  assert_eq!(run.engine.memory().registers.read(0).unwrap(), "hello");
}

#[test]
fn register_one_has_no_terminator() {
  let run = run("#-#\nREGWRITE-1,a\nREGWRITE-1,b\nREGWRITE-0,$@1$\n#-#\n", "");
  run.result.unwrap();

  assert_eq!(run.output.contents(), "abb\n");
}

#[test]
fn register_two_reads_input() {
  let run = run("#-#\nREGWRITE-2,ignored\nREGCPYTOBUF-2,3\n#-#\n", "typed text\n");
  run.result.unwrap();

  assert_eq!(run.output.contents(), "");
  assert_eq!(run.engine.memory().buffers.read(3).unwrap(), "typed text");
}

#[test]
fn straight_line_code_runs_each_instruction_once() {
  let program = "
    #-#
      REGWRITE-0,one
      REGWRITE-0,two
      BUFWRITE-0,x
      REGWRITE-0,three
    #-#
  ";
  let run = run(program, "");
  run.result.unwrap();

  assert_eq!(run.output.contents(), "one\ntwo\nthree\n");
  assert_eq!(run.engine.executed(), 4);
}

#[test]
fn repeated_copy_into_absent_slot_makes_one_buffer() {
  let program = "
    #-#
      REGWRITE-1,first
      REGCPYTOBUF-1,4
      REGWRITE-1,second
      REGCPYTOBUF-1,4
    #-#
  ";
  let run = run(program, "");
  run.result.unwrap();

  let buffers = &run.engine.memory().buffers;
  assert_eq!(buffers.len(), 1);
  assert_eq!(buffers.read(4).unwrap(), "second");
}

#[test]
fn add_then_copy_last() {
  let run = run("#-#\nADD-2,3\nTMPBUFCPY-_last_,5\n#-#\n", "");
  run.result.unwrap();

  assert_eq!(run.engine.memory().buffers.read(5).unwrap(), "5");
}

#[test]
fn division_by_zero_is_fatal_and_leaves_no_temporary() {
  let run = run("#-#\nDIV-4,0\nREGWRITE-0,unreachable\n#-#\n", "");
  let error = run.result.unwrap_err();

  assert!(matches!(error.root(), Error::DivisionByZero));
  assert!(matches!(error, Error::Fault { sector: 0, line: 2, .. }));
  assert!(run.engine.memory().temporaries.is_empty());
  assert_eq!(run.output.contents(), "");
}

#[test]
fn output_before_a_fault_stays_emitted() {
  let run = run("#-#\nREGWRITE-0,before\nBUFCPYTOREG-9,0\n#-#\n", "");
  let error = run.result.unwrap_err();

  assert!(matches!(error.root(), Error::NoSuchBuffer(9)));
  assert_eq!(run.output.contents(), "before\n");
}

#[test]
fn write_ahead_store_is_scoped_to_one_invocation() {
  let program = "
    #-#
      WABWRITE-1,0,payload
      GOTOSECTOR-1
      GOTOSECTOR-1
    #-#
    #-#
      WABCPYTOBUF-0,_new_
    #-#
  ";
  let run = run(program, "");
  let error = run.result.unwrap_err();

  assert!(matches!(error.root(), Error::NoSuchWriteAhead { sector: 1, id: 0 }));
  // The first invocation committed the value before its store was cleared.
  assert_eq!(run.engine.memory().buffers.read(0).unwrap(), "payload");
  assert!(run.engine.sectors()[1].write_ahead.is_empty());
}

#[test]
fn store_is_cleared_after_nested_calls_return() {
  let program = "
    #-#
      WABWRITE-1,0,outer
      GOTOSECTOR-1
      REGWRITE-0,done
    #-#
    #-#
      WABWRITE-2,0,inner
      GOTOSECTOR-2
      WABCPYTOBUF-0,10
    #-#
    #-#
      WABCPYTOBUF-0,20
    #-#
  ";
  let run = run(program, "");
  run.result.unwrap();

  let buffers = &run.engine.memory().buffers;
  assert_eq!(buffers.read(10).unwrap(), "outer");
  assert_eq!(buffers.read(20).unwrap(), "inner");
  assert!(run.engine.sectors()[1].write_ahead.is_empty());
  assert!(run.engine.sectors()[2].write_ahead.is_empty());
  assert_eq!(run.output.contents(), "done\n");
}

#[test]
fn staging_inside_the_callee_window() {
  // A sector may stage into itself while it runs and commit right away.
  let program = "
    #-#
      GOTOSECTOR-1
    #-#
    #-#
      WABWRITE-1,5,self
      WABCPYTOBUF-5,2
    #-#
  ";
  let run = run(program, "");
  run.result.unwrap();

  assert_eq!(run.engine.memory().buffers.read(2).unwrap(), "self");
}

#[test]
fn addressing_tokens_pick_the_store() {
  let program = "
    #-#
      BUFWRITE-3,1
      REGWRITE-1,$#3$
      BUFWRITE-$@1$,from register
      REGWRITE-0,$#1$
    #-#
  ";
  let run = run(program, "");
  run.result.unwrap();

  assert_eq!(run.output.contents(), "1from register\n");
}

#[test]
fn invalid_addressing_mode_is_fatal() {
  let run = run("#-#\nREGWRITE-0,$!1$\n#-#\n", "");
  assert!(matches!(
    run.result.unwrap_err().root(),
    Error::InvalidAddressingMode { token } if token == "$!1$"
  ));
}

#[test]
fn bufrm_of_absent_slot_is_a_no_op() {
  let run = run("#-#\nBUFWRITE-1,a\nBUFRM-2\nBUFRM-1\nBUFRM-1\n#-#\n", "");
  run.result.unwrap();

  assert!(run.engine.memory().buffers.is_empty());
}

#[test]
fn unknown_opcode_fails_before_anything_runs() {
  let program = "#-#\nREGWRITE-0,never printed\nGOTOSECTOR-1\n#-#\n#-#\nFOOBAR-1,2\n#-#\n";
  assert!(matches!(load(program, ""), Err(Error::UnknownOpcode { line: 6, .. })));
}

#[test]
fn unterminated_sector_fails_the_load() {
  assert!(matches!(
    load("#-#\nREGWRITE-0,a\n", ""),
    Err(Error::UnterminatedSector { line: 1, sector: 0 })
  ));
}

#[test]
fn self_calling_sector_fails_with_depth_error() {
  let run = run("#-#\nGOTOSECTOR-0\n#-#\n", "");
  assert!(matches!(run.result.unwrap_err().root(), Error::CallDepthExceeded(_)));
}

#[test]
fn allocating_past_the_highest_slot_is_fatal() {
  let program = "
    #-#
      BUFWRITE-18446744073709551615,top
      WABWRITE-0,0,staged
      WABCPYTOBUF-0,_new_
    #-#
  ";
  let run = run(program, "");
  let error = run.result.unwrap_err();

  assert!(matches!(error.root(), Error::NoFreeSlot));
  assert!(matches!(error, Error::Fault { sector: 0, line: 5, .. }));
  let buffers = &run.engine.memory().buffers;
  assert_eq!(buffers.len(), 1);
  assert!(buffers.read(0).is_err());
}

#[test]
fn tmpbufrm_index_can_come_from_a_buffer() {
  let program = "
    #-#
      ADD-1,1
      ADD-2,2
      ADD-3,3
      BUFWRITE-0,1
      TMPBUFRM-$#0$
    #-#
  ";
  let run = run(program, "");
  run.result.unwrap();

  let temporaries: Vec<&str> = run.engine.memory().temporaries.iter().collect();
  assert_eq!(temporaries, ["2", "6"]);
}
