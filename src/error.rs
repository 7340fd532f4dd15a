//! Error types and helpers for user-friendly error messages
//!
//! Every pre-flight failure carries a hint telling the user how to fix it.
//! Failures of the compiler itself never show up here: the runner turns
//! them into a [`BuildOutcome`](crate::build::BuildOutcome).

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors detected before the compiler is launched
#[derive(Error, Debug)]
pub enum BuildError {
    /// Invalid build profile or malformed project file
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Host operating system has no modeled toolchain
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String, hint: String },

    /// Host CPU architecture has no flag mapping
    #[error("Unsupported architecture: {arch}")]
    UnsupportedArchitecture { arch: String, hint: String },

    /// Nothing to compile
    #[error("No C sources found in {}", dir.display())]
    MissingSources {
        dir: PathBuf,
        expected: Vec<String>,
        hint: String,
    },
}

impl BuildError {
    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            os: os.into(),
            hint: hints::supported_platforms().to_string(),
        }
    }

    pub fn unsupported_architecture(arch: impl Into<String>) -> Self {
        Self::UnsupportedArchitecture {
            arch: arch.into(),
            hint: hints::supported_architectures().to_string(),
        }
    }

    /// Create a missing sources error for the given source root
    pub fn missing_sources(dir: impl Into<PathBuf>) -> Self {
        Self::MissingSources {
            dir: dir.into(),
            expected: vec![
                "src/        C sources (*.c), searched recursively".to_string(),
                "include/    headers, passed as the include path".to_string(),
                "library/    prebuilt static libraries (*.a, *.lib on Windows)".to_string(),
            ],
            hint: hints::missing_sources().to_string(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            BuildError::Configuration { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            BuildError::UnsupportedPlatform { hint, .. }
            | BuildError::UnsupportedArchitecture { hint, .. }
            | BuildError::MissingSources { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
        }

        if let BuildError::MissingSources { expected, .. } = self {
            eprintln!("\n{}", style("EXPECTED:").cyan().bold());
            for exp in expected {
                eprintln!("  • {}", exp);
            }
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    pub fn invalid_profile() -> &'static str {
        "Build profile must be one of (case-insensitive):\n\
         • debug   (default) - debug symbols, no optimization\n\
         • release           - optimized build"
    }

    pub fn invalid_project_file() -> &'static str {
        "CBuild.toml is invalid. Supported keys:\n\
         • [output] name = \"output_program\"\n\
         • [output] directory = \"build\"   (\"\" writes into the working directory)\n\
         • [toolchain] msvc_link = \"grouped\" | \"per-library\""
    }

    pub fn supported_platforms() -> &'static str {
        "Supported host operating systems: Linux, macOS (GCC toolchain), Windows (MSVC toolchain)."
    }

    pub fn supported_architectures() -> &'static str {
        "Supported host architectures: x86, x86_64 (amd64), ARM, ARM64 (aarch64)."
    }

    pub fn missing_sources() -> &'static str {
        "Place at least one .c file under the src/ directory of the working directory."
    }

    /// Installation hint for a compiler that could not be launched
    pub fn compiler(executable: &str) -> &'static str {
        match executable {
            "cl" => {
                "Install Visual Studio with the 'Desktop development with C++' workload\n\
                 and run from a Developer Command Prompt so that cl.exe is on PATH."
            }
            _ => {
                "Install GCC and ensure it is on PATH:\n\
                 • macOS: xcode-select --install\n\
                 • Ubuntu: sudo apt install build-essential\n\
                 • Fedora: sudo dnf install gcc"
            }
        }
    }
}
