//! Compiler invocation assembly
//!
//! Pure: no filesystem or process access happens here, so everything up to
//! the actual compiler launch can be checked without a compiler installed.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::build::scanner::InputSet;
use crate::build::toolchains::msvc::MsvcLinkLayout;
use crate::build::toolchains::ToolchainSpec;

/// Fully resolved executable and argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationPlan {
    pub executable: String,
    pub arguments: Vec<String>,
}

impl InvocationPlan {
    /// Shell-like rendering for verbose output
    pub fn command_line(&self) -> String {
        std::iter::once(self.executable.as_str())
            .chain(self.arguments.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for InvocationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

/// Compose the invocation for `spec` over `inputs`
///
/// Argument order: output, arch flags, profile flags, sources, include
/// directories, libraries.
pub fn build_plan(
    spec: &ToolchainSpec,
    inputs: &InputSet,
    output: &Path,
    link_layout: MsvcLinkLayout,
) -> InvocationPlan {
    let toolchain = spec.compiler.toolchain(link_layout);

    let mut arguments = toolchain.output_args(output);
    arguments.extend(spec.arch_flags.iter().cloned());
    arguments.extend(spec.profile_flags.iter().cloned());
    arguments.extend(inputs.source_files.iter().map(|p| p.display().to_string()));
    for dir in &inputs.header_dirs {
        arguments.extend(toolchain.include_args(dir));
    }
    arguments.extend(toolchain.library_args(&inputs.library_files));

    InvocationPlan {
        executable: toolchain.executable().to_string(),
        arguments,
    }
}
