//! capi-build - build orchestration for a C-ABI library workspace
//!
//! Drives the external toolchain to build, lint and clean the workspace,
//! collects the produced libraries and keeps release metadata in sync.
//!
//! ## Architecture
//!
//! ```text
//! CLI → commands/ → build/ (target, command, linker, artifacts) → cargo | cross
//!                 → release/ (version, license)                 → cargo
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod release;
mod utils;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        let code = error::report(&err);
        std::process::exit(code);
    }
}
