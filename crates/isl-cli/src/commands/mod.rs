//! CLI command definitions and handlers.

pub mod dataset;

use clap::{Parser, Subcommand};

/// ISL toolkit - dataset inspection
#[derive(Parser)]
#[command(name = "isl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect a recorded sign dataset
    Dataset(dataset::DatasetArgs),
}
