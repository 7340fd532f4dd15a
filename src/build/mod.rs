//! Native build orchestration
//!
//! One run probes the host, scans the fixed project layout, selects the
//! toolchain, assembles a single compiler invocation and executes it.
//!
//! ## Architecture
//!
//! ```text
//! platform ─┐
//!           ├─> toolchains ─> command ─> runner
//! scanner ──┘
//! ```
//!
//! ## Modules
//!
//! - `platform` - Host OS/architecture normalization
//! - `scanner` - Source, header and library discovery
//! - `toolchains` - GCC/MSVC flag tables
//! - `command` - Invocation assembly
//! - `runner` - Compiler execution and outcome reporting
//! - `diagnostics` - Failure pattern analysis

pub mod command;
pub mod diagnostics;
pub mod platform;
pub mod runner;
pub mod scanner;
pub mod toolchains;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{BuildConfig, BuildProfile};
use crate::utils::paths::ensure_dir;
use crate::utils::terminal::{print_detail, print_info, print_warning};

pub use command::InvocationPlan;
pub use platform::PlatformIdentity;
pub use runner::{BuildOutcome, BuildRunner};
pub use scanner::InputSet;
pub use toolchains::ToolchainSpec;

/// Everything a dry run reports
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub platform: &'a PlatformIdentity,
    pub profile: BuildProfile,
    pub toolchain: &'a ToolchainSpec,
    pub invocation: &'a InvocationPlan,
}

/// Run the whole pipeline on the current host
pub fn run(config: &BuildConfig) -> Result<BuildOutcome> {
    let platform = PlatformIdentity::probe()?;
    run_for_platform(config, platform)
}

/// Run the pipeline for an already probed platform
///
/// Pre-flight failures are returned as errors before any process is spawned;
/// compiler failures come back as an unsuccessful [`BuildOutcome`].
pub fn run_for_platform(config: &BuildConfig, platform: PlatformIdentity) -> Result<BuildOutcome> {
    if config.verbose {
        print_info(&format!("Building {} for {}", config.profile, platform));
    }

    let inputs = scanner::scan(
        &config.source_dir(),
        &config.include_dir(),
        &config.library_dir(),
        platform.operating_system,
    )?;

    if config.verbose {
        report_inputs(config, &inputs);
    }

    let spec = toolchains::select(&platform, config.profile);
    let output = config.output_path();
    let plan = command::build_plan(&spec, &inputs, &output, config.msvc_link_layout);

    if config.dry_run {
        let report = PlanReport {
            platform: &platform,
            profile: config.profile,
            toolchain: &spec,
            invocation: &plan,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize build plan")?;
        println!("{}", json);
        return Ok(BuildOutcome::success());
    }

    if let Some(dir) = config.output_dir() {
        ensure_dir(&dir)?;
    }

    Ok(BuildRunner::new(spec.compiler, config.profile, config.verbose).run(plan))
}

fn report_inputs(config: &BuildConfig, inputs: &InputSet) {
    print_detail("sources", inputs.source_files.len());
    for source in &inputs.source_files {
        print_detail("", source.display());
    }

    let include_dir = config.include_dir();
    if !include_dir.is_dir() {
        print_warning(&format!(
            "include directory {} does not exist",
            include_dir.display()
        ));
    } else if inputs.header_files.is_empty() {
        print_warning(&format!("no headers found under {}", include_dir.display()));
    } else {
        print_detail("headers", inputs.header_files.len());
    }

    print_detail("libraries", inputs.library_files.len());
    for library in &inputs.library_files {
        print_detail("", library.display());
    }
}
