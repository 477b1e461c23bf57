//! Command-line interface for the payment network simulator.
//!
//! The single `run` command grows one or more networks with the chosen
//! topology and prints their size and power-law exponents.

mod commands;

pub use commands::{
    Cli, CliError, Command, DirectedArgs, RunCommand, RunSummary, SequenceSummary, TopologyArgs,
    UndirectedArgs, render_summary, run_cli,
};
