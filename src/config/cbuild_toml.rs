//! CBuild.toml project file parsing
//!
//! The project file is optional. When present it may override the output
//! artifact name, the output directory and the MSVC library link layout:
//!
//! ```toml
//! [output]
//! name = "hello"
//! directory = "out"      # "" writes into the working directory
//!
//! [toolchain]
//! msvc_link = "per-library"
//! ```
//!
//! The source, include and library directories are fixed and cannot be
//! changed here.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::build::toolchains::msvc::MsvcLinkLayout;
use crate::error::{hints, BuildError};

/// Name of the optional project file in the working directory
pub const PROJECT_FILE: &str = "CBuild.toml";

/// Output artifact name used when the project file does not set one
pub const DEFAULT_OUTPUT_NAME: &str = "output_program";

/// Output directory used when the project file does not set one
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Root of CBuild.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Artifact name, without extension
    pub name: Option<String>,

    /// Directory receiving the artifact, created on demand
    pub directory: Option<String>,
}

/// `[toolchain]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainConfig {
    #[serde(default)]
    pub msvc_link: MsvcLinkLayout,
}

impl ProjectConfig {
    /// Load CBuild.toml from `dir`, falling back to defaults when absent
    pub fn load_or_default(dir: &Path) -> Result<Self, BuildError> {
        let path = dir.join(PROJECT_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            BuildError::config_error_with_hint(
                format!("Failed to read {}", path.display()),
                Some(e.into()),
                hints::invalid_project_file(),
            )
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, BuildError> {
        let config: Self = toml::from_str(content).map_err(|e| {
            BuildError::config_error_with_hint(
                format!("Failed to parse {}: {}", PROJECT_FILE, e.message()),
                Some(e.into()),
                hints::invalid_project_file(),
            )
        })?;

        if let Some(name) = &config.output.name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(BuildError::config_error_with_hint(
                    format!("Invalid output name '{}'", name),
                    None,
                    hints::invalid_project_file(),
                ));
            }
        }

        Ok(config)
    }

    pub fn output_name(&self) -> String {
        self.output
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string())
    }

    /// Resolved output directory; `None` means the working directory
    pub fn output_directory(&self) -> Option<PathBuf> {
        match self.output.directory.as_deref() {
            None => Some(PathBuf::from(DEFAULT_OUTPUT_DIR)),
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.output_name(), "output_program");
        assert_eq!(config.output_directory(), Some(PathBuf::from("build")));
        assert_eq!(config.toolchain.msvc_link, MsvcLinkLayout::Grouped);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[output]
name = "hello"
directory = "out"

[toolchain]
msvc_link = "per-library"
"#;
        let config = ProjectConfig::parse(toml).unwrap();
        assert_eq!(config.output_name(), "hello");
        assert_eq!(config.output_directory(), Some(PathBuf::from("out")));
        assert_eq!(config.toolchain.msvc_link, MsvcLinkLayout::PerLibrary);
    }

    #[test]
    fn test_empty_directory_means_working_dir() {
        let config = ProjectConfig::parse("[output]\ndirectory = \"\"\n").unwrap();
        assert_eq!(config.output_directory(), None);
    }

    #[test]
    fn test_unknown_link_layout_is_config_error() {
        let err = ProjectConfig::parse("[toolchain]\nmsvc_link = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, BuildError::Configuration { .. }));
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = ProjectConfig::parse("[output]\nsrc = \"code\"\n").unwrap_err();
        assert!(matches!(err, BuildError::Configuration { .. }));
    }

    #[test]
    fn test_output_name_with_separator_rejected() {
        let err = ProjectConfig::parse("[output]\nname = \"bin/app\"\n").unwrap_err();
        assert!(err.to_string().contains("bin/app"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "[output]\nname = \"tool\"\n").unwrap();
        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.output_name(), "tool");
    }
}
