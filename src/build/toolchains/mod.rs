//! Toolchain selection
//!
//! Maps a host [`PlatformIdentity`] and [`BuildProfile`] to the compiler family
//! and flag set used for the build. Each family's flag vocabulary lives in its
//! own module behind the [`Toolchain`] trait.

pub mod gcc;
pub mod msvc;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::build::platform::{Architecture, OperatingSystem, PlatformIdentity};
use crate::config::BuildProfile;

use self::gcc::GccToolchain;
use self::msvc::{MsvcLinkLayout, MsvcToolchain};

/// Flag vocabulary of a compiler family
pub trait Toolchain {
    /// Executable resolved on PATH
    fn executable(&self) -> &str;

    /// Flags selecting the target instruction set
    fn arch_flags(&self, arch: Architecture) -> &'static [&'static str];

    /// Optimization and debug-symbol flags
    fn profile_flags(&self, profile: BuildProfile) -> &'static [&'static str];

    /// Arguments naming the output artifact
    fn output_args(&self, output: &Path) -> Vec<String>;

    /// Arguments adding an include search directory
    fn include_args(&self, dir: &Path) -> Vec<String>;

    /// Arguments linking prebuilt static libraries
    fn library_args(&self, libraries: &[PathBuf]) -> Vec<String>;
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    /// GNU Compiler Collection and compatible drivers
    Gcc,
    /// Microsoft Visual C++
    Msvc,
}

impl CompilerFamily {
    pub const fn for_os(os: OperatingSystem) -> Self {
        match os {
            OperatingSystem::Linux | OperatingSystem::MacOS => CompilerFamily::Gcc,
            OperatingSystem::Windows => CompilerFamily::Msvc,
        }
    }

    /// Flag vocabulary for this family
    pub fn toolchain(&self, link_layout: MsvcLinkLayout) -> Box<dyn Toolchain> {
        match self {
            CompilerFamily::Gcc => Box::new(GccToolchain),
            CompilerFamily::Msvc => Box::new(MsvcToolchain::new(link_layout)),
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerFamily::Gcc => write!(f, "GCC"),
            CompilerFamily::Msvc => write!(f, "MSVC"),
        }
    }
}

/// Compiler identity plus the ordered flags it is invoked with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainSpec {
    pub compiler: CompilerFamily,
    pub arch_flags: Vec<String>,
    pub profile_flags: Vec<String>,
}

/// Select the toolchain for a host and profile
///
/// Pure: identical inputs always produce an identical spec.
pub fn select(platform: &PlatformIdentity, profile: BuildProfile) -> ToolchainSpec {
    let compiler = CompilerFamily::for_os(platform.operating_system);
    let toolchain = compiler.toolchain(MsvcLinkLayout::default());

    ToolchainSpec {
        compiler,
        arch_flags: owned_flags(toolchain.arch_flags(platform.architecture)),
        profile_flags: owned_flags(toolchain.profile_flags(profile)),
    }
}

fn owned_flags(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|f| f.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OS: [OperatingSystem; 3] = [
        OperatingSystem::Linux,
        OperatingSystem::MacOS,
        OperatingSystem::Windows,
    ];
    const ALL_ARCH: [Architecture; 4] = [
        Architecture::X86_32,
        Architecture::X86_64,
        Architecture::Arm32,
        Architecture::Arm64,
    ];
    const ALL_PROFILES: [BuildProfile; 2] = [BuildProfile::Debug, BuildProfile::Release];

    #[test]
    fn test_linux_x86_64_release() {
        let platform = PlatformIdentity::new(OperatingSystem::Linux, Architecture::X86_64);
        let spec = select(&platform, BuildProfile::Release);
        assert_eq!(spec.compiler, CompilerFamily::Gcc);
        assert_eq!(spec.arch_flags, vec!["-m64"]);
        assert_eq!(spec.profile_flags, vec!["-O2"]);
    }

    #[test]
    fn test_macos_uses_gcc_family() {
        let platform = PlatformIdentity::new(OperatingSystem::MacOS, Architecture::Arm64);
        let spec = select(&platform, BuildProfile::Debug);
        assert_eq!(spec.compiler, CompilerFamily::Gcc);
        assert_eq!(spec.arch_flags, vec!["-march=armv8-a"]);
        assert_eq!(spec.profile_flags, vec!["-g"]);
    }

    #[test]
    fn test_windows_debug() {
        let platform = PlatformIdentity::new(OperatingSystem::Windows, Architecture::X86_32);
        let spec = select(&platform, BuildProfile::Debug);
        assert_eq!(spec.compiler, CompilerFamily::Msvc);
        assert_eq!(spec.arch_flags, vec!["/arch:IA32"]);
        assert_eq!(spec.profile_flags, vec!["/Zi", "/Od", "/DEBUG"]);
    }

    #[test]
    fn test_selection_is_pure() {
        for os in ALL_OS {
            for arch in ALL_ARCH {
                for profile in ALL_PROFILES {
                    let platform = PlatformIdentity::new(os, arch);
                    let first = select(&platform, profile);
                    let second = select(&platform, profile);
                    assert_eq!(first, second);
                    assert!(!first.arch_flags.is_empty());
                    assert!(!first.profile_flags.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CompilerFamily::Gcc.to_string(), "GCC");
        assert_eq!(CompilerFamily::Msvc.to_string(), "MSVC");
    }
}
