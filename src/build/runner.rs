//! Compiler execution
//!
//! The runner is the only stage that never fails: launch errors and nonzero
//! compiler exits both end up as a [`BuildOutcome`].

use console::style;

use crate::build::command::InvocationPlan;
use crate::build::diagnostics::analyze_compiler_output;
use crate::build::toolchains::CompilerFamily;
use crate::config::BuildProfile;
use crate::error::hints;
use crate::exec::subprocess::{find_program, run_command};
use crate::utils::terminal::{create_spinner, print_detail, print_error, print_success, print_warning};

/// Terminal result of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub succeeded: bool,
    /// Compiler exit code; `None` if it never started or was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured compiler output or launch error for failed runs
    pub diagnostic_text: Option<String>,
}

impl BuildOutcome {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            exit_code: Some(0),
            diagnostic_text: None,
        }
    }

    pub fn failure(exit_code: Option<i32>, diagnostic_text: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            exit_code,
            diagnostic_text: Some(diagnostic_text.into()),
        }
    }

    /// Exit status for the orchestrator process: 0 on success, otherwise the
    /// compiler's own nonzero code, or 1 when it reported none
    pub fn process_exit_code(&self) -> i32 {
        if self.succeeded {
            return 0;
        }
        self.exit_code.filter(|code| *code != 0).unwrap_or(1)
    }
}

/// Runs one invocation plan and reports the result
#[derive(Debug, Clone, Copy)]
pub struct BuildRunner {
    compiler: CompilerFamily,
    profile: BuildProfile,
    verbose: bool,
}

impl BuildRunner {
    pub fn new(compiler: CompilerFamily, profile: BuildProfile, verbose: bool) -> Self {
        Self {
            compiler,
            profile,
            verbose,
        }
    }

    /// Execute the plan and wait for the compiler to exit
    pub fn run(&self, plan: InvocationPlan) -> BuildOutcome {
        if self.verbose {
            match find_program(&plan.executable) {
                Some(path) => print_detail("compiler", path.display()),
                None => print_warning(&format!("'{}' was not found on PATH", plan.executable)),
            }
            print_detail("command", &plan);
        }

        let spinner = (!self.verbose).then(|| {
            create_spinner(&format!("Compiling with {} ({})...", self.compiler, self.profile))
        });

        let result = run_command(&plan.executable, &plan.arguments);

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match result {
            Err(e) => {
                let detail = format!("{:#}", e);
                print_error("Compilation failed.");
                eprintln!("{}", detail);
                eprintln!(
                    "\n{} {}",
                    style("HINT:").yellow().bold(),
                    hints::compiler(&plan.executable)
                );
                BuildOutcome::failure(None, detail)
            }
            Ok(result) => {
                let output = result.combined_output();
                if !output.trim().is_empty() {
                    eprint!("{}", output);
                    if !output.ends_with('\n') {
                        eprintln!();
                    }
                }

                if result.success {
                    print_success(&format!(
                        "Compilation successful with {} in {} mode.",
                        self.compiler, self.profile
                    ));
                    if self.verbose {
                        print_detail("time", format!("{:.2}s", result.duration.as_secs_f64()));
                    }
                    return BuildOutcome::success();
                }

                let status = result
                    .exit_code
                    .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {}", c));
                print_error(&format!("Compilation failed ({}).", status));

                if let Some(diag) = analyze_compiler_output(&output, self.compiler) {
                    diag.print();
                }

                let text = if output.trim().is_empty() {
                    format!("{} failed with {}", plan.executable, status)
                } else {
                    output
                };
                BuildOutcome::failure(result.exit_code, text)
            }
        }
    }
}
