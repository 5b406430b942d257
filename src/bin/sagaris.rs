//! Sagaris CLI binary.

use clap::Parser;
use sagaris::cli::{args::*, commands::*};
use std::process;

fn main() {
    let args = SagarisArgs::parse();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
