//! cbuild - a portable native build orchestrator for C projects
//!
//! Picks the host's native C toolchain, assembles one compiler invocation
//! over the project's sources and static libraries, and runs it.
//!
//! ## Architecture
//!
//! ```text
//! CLI → config → build/ (platform, scanner → toolchains → command → runner) → gcc | cl
//! ```

mod build;
mod cli;
mod config;
mod error;
mod exec;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::BuildError;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute() {
        Ok(outcome) => ExitCode::from(u8::try_from(outcome.process_exit_code()).unwrap_or(1)),
        Err(e) => {
            match e.downcast_ref::<BuildError>() {
                Some(build_error) => build_error.display_with_hints(),
                None => print_error(&format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}
