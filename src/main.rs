use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sectorvm::config::DEFAULT_MAX_CALL_DEPTH;
use sectorvm::memory::{Memory, Registers};
use sectorvm::{Config, Engine};

#[derive(Parser)]
#[command(name = "sectorvm", version)]
#[command(about = "Runs a sector bytecode program")]
struct Cli {
  #[arg(help = "Bytecode file to execute")]
  file: PathBuf,

  #[arg(
    long,
    alias = "virtual-machine-enable-debug-output",
    help = "Print every memory store as a table after the program finishes"
  )]
  debug_output: bool,

  #[arg(
    long,
    default_value_t = DEFAULT_MAX_CALL_DEPTH,
    help = "Maximum nesting depth of sector calls"
  )]
  max_call_depth: usize,
}

fn main() -> Result<()> {
  // Logs go to stderr; stdout belongs to the program's registers.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = Config {
    max_call_depth : cli.max_call_depth,
    dump_state     : cli.debug_output
  };

  let text =
    fs::read_to_string(&cli.file)
      .with_context(|| format!("Failed to read {}", cli.file.display()))?;

  let mut engine =
    Engine::load(&text, Memory::new(Registers::standard()), config)
      .with_context(|| format!("Failed to load {}", cli.file.display()))?;

  engine.run().context("Execution failed")?;

  if config.dump_state {
    println!("{}", engine);
  }

  Ok(())
}
