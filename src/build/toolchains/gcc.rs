//! GCC-family flag vocabulary (Linux, macOS)
//!
//! Static libraries are linked by passing their paths directly, not through
//! `-l` search.

use std::path::{Path, PathBuf};

use super::Toolchain;
use crate::build::platform::Architecture;
use crate::config::BuildProfile;

/// GCC-family toolchain
#[derive(Debug, Clone, Copy, Default)]
pub struct GccToolchain;

impl Toolchain for GccToolchain {
    fn executable(&self) -> &str {
        "gcc"
    }

    fn arch_flags(&self, arch: Architecture) -> &'static [&'static str] {
        match arch {
            Architecture::X86_32 => &["-m32"],
            Architecture::X86_64 => &["-m64"],
            Architecture::Arm64 => &["-march=armv8-a"],
            Architecture::Arm32 => &["-march=armv7-a"],
        }
    }

    fn profile_flags(&self, profile: BuildProfile) -> &'static [&'static str] {
        match profile {
            BuildProfile::Debug => &["-g"],
            BuildProfile::Release => &["-O2"],
        }
    }

    fn output_args(&self, output: &Path) -> Vec<String> {
        vec!["-o".to_string(), output.display().to_string()]
    }

    fn include_args(&self, dir: &Path) -> Vec<String> {
        vec!["-I".to_string(), dir.display().to_string()]
    }

    fn library_args(&self, libraries: &[PathBuf]) -> Vec<String> {
        libraries.iter().map(|lib| lib.display().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_table() {
        let gcc = GccToolchain;
        assert_eq!(gcc.arch_flags(Architecture::X86_32), ["-m32"]);
        assert_eq!(gcc.arch_flags(Architecture::X86_64), ["-m64"]);
        assert_eq!(gcc.arch_flags(Architecture::Arm64), ["-march=armv8-a"]);
        assert_eq!(gcc.arch_flags(Architecture::Arm32), ["-march=armv7-a"]);
    }

    #[test]
    fn test_include_is_separate_token() {
        assert_eq!(GccToolchain.include_args(Path::new("include")), ["-I", "include"]);
    }

    #[test]
    fn test_libraries_are_positional() {
        let libs = vec![PathBuf::from("library/libfoo.a")];
        assert_eq!(GccToolchain.library_args(&libs), ["library/libfoo.a"]);
    }
}
