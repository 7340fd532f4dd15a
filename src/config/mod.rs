//! Run configuration
//!
//! Everything a run needs is collected once into a [`BuildConfig`] at startup
//! and handed down the pipeline unchanged.

pub mod cbuild_toml;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::build::toolchains::msvc::MsvcLinkLayout;
use crate::error::{hints, BuildError};

pub use cbuild_toml::ProjectConfig;

/// Fixed directory holding C sources
pub const SOURCE_DIR: &str = "src";

/// Fixed directory passed as the include path
pub const INCLUDE_DIR: &str = "include";

/// Fixed directory holding prebuilt static libraries
pub const LIBRARY_DIR: &str = "library";

/// Build profile controlling optimization and debug-symbol flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildProfile {
    #[default]
    Debug,
    Release,
}

impl BuildProfile {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }

    /// Parse an optional user argument; absent means Debug
    pub fn from_arg(arg: Option<&str>) -> Result<Self, BuildError> {
        match arg {
            None => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for BuildProfile {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildProfile::Debug),
            "release" => Ok(BuildProfile::Release),
            _ => Err(BuildError::config_error_with_hint(
                format!("Invalid build profile '{}'", s),
                None,
                hints::invalid_profile(),
            )),
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable configuration for one orchestrator run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub profile: BuildProfile,
    /// Artifact name without extension
    pub output_name: String,
    /// Directory receiving the artifact; `None` writes into `project_root`
    pub output_directory: Option<PathBuf>,
    /// Directory the fixed layout is resolved against; empty means the
    /// working directory, keeping every path in the command relative
    pub project_root: PathBuf,
    pub msvc_link_layout: MsvcLinkLayout,
    /// Print the invocation plan instead of running it
    pub dry_run: bool,
    pub verbose: bool,
}

impl BuildConfig {
    /// Combine the profile argument with the optional project file in `project_root`
    pub fn load(
        project_root: impl Into<PathBuf>,
        profile_arg: Option<&str>,
        dry_run: bool,
        verbose: bool,
    ) -> Result<Self, BuildError> {
        // Profile first: an invalid profile must fail before anything else is read
        let profile = BuildProfile::from_arg(profile_arg)?;
        let project_root = project_root.into();
        let project = ProjectConfig::load_or_default(&project_root)?;

        Ok(Self {
            profile,
            output_name: project.output_name(),
            output_directory: project.output_directory(),
            project_root,
            msvc_link_layout: project.toolchain.msvc_link,
            dry_run,
            verbose,
        })
    }

    pub fn source_dir(&self) -> PathBuf {
        self.project_root.join(SOURCE_DIR)
    }

    pub fn include_dir(&self) -> PathBuf {
        self.project_root.join(INCLUDE_DIR)
    }

    pub fn library_dir(&self) -> PathBuf {
        self.project_root.join(LIBRARY_DIR)
    }

    /// Directory the artifact is written to, relative to `project_root`
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_directory
            .as_deref()
            .map(|dir| self.project_root.join(dir))
    }

    /// Path of the artifact without a platform-specific extension
    pub fn output_path(&self) -> PathBuf {
        match self.output_dir() {
            Some(dir) => dir.join(&self.output_name),
            None => self.project_root.join(&self.output_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_to_debug() {
        assert_eq!(BuildProfile::from_arg(None).unwrap(), BuildProfile::Debug);
    }

    #[test]
    fn test_profile_is_case_insensitive() {
        assert_eq!("RELEASE".parse::<BuildProfile>().unwrap(), BuildProfile::Release);
        assert_eq!("Debug".parse::<BuildProfile>().unwrap(), BuildProfile::Debug);
    }

    #[test]
    fn test_invalid_profile_is_config_error() {
        let err = "Production".parse::<BuildProfile>().unwrap_err();
        assert!(matches!(err, BuildError::Configuration { .. }));
        assert!(err.to_string().contains("Production"));
    }

    #[test]
    fn test_surrounding_whitespace_is_rejected() {
        for value in [" release ", "debug\n", ""] {
            let err = value.parse::<BuildProfile>().unwrap_err();
            assert!(matches!(err, BuildError::Configuration { .. }), "{:?}", value);
        }
    }

    #[test]
    fn test_invalid_profile_checked_before_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CBuild.toml"), "not toml [").unwrap();
        let err = BuildConfig::load(dir.path(), Some("Production"), false, false).unwrap_err();
        assert!(err.to_string().contains("Invalid build profile"));
    }

    #[test]
    fn test_output_path_defaults_to_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::load(dir.path(), Some("release"), false, false).unwrap();
        assert_eq!(config.profile, BuildProfile::Release);
        assert_eq!(
            config.output_path(),
            dir.path().join("build").join("output_program")
        );
    }

    #[test]
    fn test_output_path_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("CBuild.toml"),
            "[output]\nname = \"app\"\ndirectory = \"\"\n",
        )
        .unwrap();
        let config = BuildConfig::load(dir.path(), None, false, false).unwrap();
        assert_eq!(config.output_dir(), None);
        assert_eq!(config.output_path(), dir.path().join("app"));
    }

    #[test]
    fn test_fixed_layout() {
        let config = BuildConfig::load("/proj", None, false, false).unwrap();
        assert_eq!(config.source_dir(), PathBuf::from("/proj/src"));
        assert_eq!(config.include_dir(), PathBuf::from("/proj/include"));
        assert_eq!(config.library_dir(), PathBuf::from("/proj/library"));
    }
}
