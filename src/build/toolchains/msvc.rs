//! MSVC flag vocabulary (Windows)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Toolchain;
use crate::build::platform::Architecture;
use crate::config::BuildProfile;

/// How library paths are handed to the MSVC linker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MsvcLinkLayout {
    /// A single `/link` token followed by every library path
    #[default]
    Grouped,
    /// One `"/link <lib>"` token per library, for scripts that expect it
    PerLibrary,
}

/// MSVC toolchain
#[derive(Debug, Clone, Copy, Default)]
pub struct MsvcToolchain {
    link_layout: MsvcLinkLayout,
}

impl MsvcToolchain {
    pub fn new(link_layout: MsvcLinkLayout) -> Self {
        Self { link_layout }
    }
}

impl Toolchain for MsvcToolchain {
    fn executable(&self) -> &str {
        "cl"
    }

    fn arch_flags(&self, arch: Architecture) -> &'static [&'static str] {
        match arch {
            Architecture::X86_32 => &["/arch:IA32"],
            Architecture::X86_64 => &["/arch:AVX"],
            Architecture::Arm64 => &["/arch:ARM64"],
            Architecture::Arm32 => &["/arch:ARM"],
        }
    }

    fn profile_flags(&self, profile: BuildProfile) -> &'static [&'static str] {
        match profile {
            BuildProfile::Debug => &["/Zi", "/Od", "/DEBUG"],
            BuildProfile::Release => &["/O2", "/DNDEBUG"],
        }
    }

    fn output_args(&self, output: &Path) -> Vec<String> {
        vec![format!("/Fe:{}.exe", output.display())]
    }

    fn include_args(&self, dir: &Path) -> Vec<String> {
        vec![format!("/I{}", dir.display())]
    }

    fn library_args(&self, libraries: &[PathBuf]) -> Vec<String> {
        if libraries.is_empty() {
            return Vec::new();
        }

        match self.link_layout {
            MsvcLinkLayout::Grouped => std::iter::once("/link".to_string())
                .chain(libraries.iter().map(|lib| lib.display().to_string()))
                .collect(),
            MsvcLinkLayout::PerLibrary => libraries
                .iter()
                .map(|lib| format!("/link {}", lib.display()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn libs() -> Vec<PathBuf> {
        vec![PathBuf::from("library/a.lib"), PathBuf::from("library/b.lib")]
    }

    #[test]
    fn test_arch_table() {
        let cl = MsvcToolchain::default();
        assert_eq!(cl.arch_flags(Architecture::X86_32), ["/arch:IA32"]);
        assert_eq!(cl.arch_flags(Architecture::X86_64), ["/arch:AVX"]);
        assert_eq!(cl.arch_flags(Architecture::Arm64), ["/arch:ARM64"]);
        assert_eq!(cl.arch_flags(Architecture::Arm32), ["/arch:ARM"]);
    }

    #[test]
    fn test_output_gets_exe_suffix() {
        let cl = MsvcToolchain::default();
        assert_eq!(cl.output_args(Path::new("build/app")), ["/Fe:build/app.exe"]);
    }

    #[test]
    fn test_include_is_concatenated() {
        let cl = MsvcToolchain::default();
        assert_eq!(cl.include_args(Path::new("include")), ["/Iinclude"]);
    }

    #[test]
    fn test_grouped_link_layout() {
        let cl = MsvcToolchain::new(MsvcLinkLayout::Grouped);
        assert_eq!(
            cl.library_args(&libs()),
            ["/link", "library/a.lib", "library/b.lib"]
        );
    }

    #[test]
    fn test_per_library_link_layout() {
        let cl = MsvcToolchain::new(MsvcLinkLayout::PerLibrary);
        assert_eq!(
            cl.library_args(&libs()),
            ["/link library/a.lib", "/link library/b.lib"]
        );
    }

    #[test]
    fn test_no_libraries_no_link_token() {
        let cl = MsvcToolchain::new(MsvcLinkLayout::Grouped);
        assert!(cl.library_args(&[]).is_empty());
    }
}
