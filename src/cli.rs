//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::build::{self, BuildOutcome};
use crate::config::BuildConfig;

/// cbuild - portable native build orchestrator for C projects
///
/// Compiles every C file under src/ with the host's native toolchain (GCC on
/// Linux and macOS, MSVC on Windows), using include/ as the include path and
/// linking the static libraries found under library/.
#[derive(Parser, Debug)]
#[command(name = "cbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build profile: debug (default) or release, case-insensitive
    #[arg(env = "CBUILD_PROFILE")]
    pub profile: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the compiler invocation as JSON instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Execute one build run
    pub fn execute(self) -> Result<BuildOutcome> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // The fixed layout resolves against the working directory
        let config = BuildConfig::load(
            PathBuf::new(),
            self.profile.as_deref(),
            self.dry_run,
            self.verbose,
        )?;

        build::run(&config)
    }
}
