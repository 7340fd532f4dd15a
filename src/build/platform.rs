//! Host platform and architecture detection
//!
//! Normalization is a pure function over the raw OS and architecture
//! strings so that every mapping can be exercised from any host.

use std::fmt;

use serde::Serialize;

use crate::error::BuildError;

/// Host operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Linux,
    MacOS,
    Windows,
}

impl OperatingSystem {
    /// Normalize an OS name such as `linux`, `Darwin` or `windows`
    pub fn normalize(raw: &str) -> Result<Self, BuildError> {
        let os = raw.to_ascii_lowercase();
        if os.contains("linux") {
            Ok(OperatingSystem::Linux)
        } else if os.contains("darwin") || os.contains("macos") {
            Ok(OperatingSystem::MacOS)
        } else if os.contains("windows") {
            Ok(OperatingSystem::Windows)
        } else {
            Err(BuildError::unsupported_platform(raw))
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "linux",
            OperatingSystem::MacOS => "macos",
            OperatingSystem::Windows => "windows",
        }
    }

    pub const fn is_windows(&self) -> bool {
        matches!(self, OperatingSystem::Windows)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86_32,
    X86_64,
    Arm32,
    Arm64,
}

impl Architecture {
    /// Normalize a machine name such as `x86_64`, `AMD64`, `arm64` or `armv7l`
    ///
    /// 64-bit names are matched before their 32-bit counterparts, so
    /// `x86_64` never classifies as x86 and `arm64` never as ARM.
    pub fn normalize(raw: &str) -> Result<Self, BuildError> {
        let arch = raw.to_ascii_lowercase();
        if arch.contains("x86_64") || arch.contains("amd64") {
            Ok(Architecture::X86_64)
        } else if (arch.contains("x86") && !arch.contains("64")) || is_ia32_name(&arch) {
            Ok(Architecture::X86_32)
        } else if arch.contains("arm64") || arch.contains("aarch64") {
            Ok(Architecture::Arm64)
        } else if arch.contains("arm") {
            Ok(Architecture::Arm32)
        } else {
            Err(BuildError::unsupported_architecture(raw))
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86_32 => "x86",
            Architecture::X86_64 => "x86_64",
            Architecture::Arm32 => "arm",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `i386` through `i686`
fn is_ia32_name(arch: &str) -> bool {
    let bytes = arch.as_bytes();
    bytes.len() == 4 && bytes[0] == b'i' && (b'3'..=b'6').contains(&bytes[1]) && &arch[2..] == "86"
}

/// Combined host identity (e.g. "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformIdentity {
    pub operating_system: OperatingSystem,
    pub architecture: Architecture,
}

impl PlatformIdentity {
    pub const fn new(operating_system: OperatingSystem, architecture: Architecture) -> Self {
        Self {
            operating_system,
            architecture,
        }
    }

    /// Normalize raw OS and architecture names
    pub fn from_names(os: &str, arch: &str) -> Result<Self, BuildError> {
        Ok(Self::new(
            OperatingSystem::normalize(os)?,
            Architecture::normalize(arch)?,
        ))
    }

    /// Probe the host this process runs on
    pub fn probe() -> Result<Self, BuildError> {
        Self::from_names(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.architecture, self.operating_system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_normalization() {
        assert_eq!(OperatingSystem::normalize("Linux").unwrap(), OperatingSystem::Linux);
        assert_eq!(OperatingSystem::normalize("Darwin").unwrap(), OperatingSystem::MacOS);
        assert_eq!(OperatingSystem::normalize("macos").unwrap(), OperatingSystem::MacOS);
        assert_eq!(OperatingSystem::normalize("Windows").unwrap(), OperatingSystem::Windows);
    }

    #[test]
    fn test_unknown_os_is_unsupported() {
        let err = OperatingSystem::normalize("freebsd").unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_arch_normalization() {
        let cases = [
            ("x86", Architecture::X86_32),
            ("i686", Architecture::X86_32),
            ("i386", Architecture::X86_32),
            ("x86_64", Architecture::X86_64),
            ("AMD64", Architecture::X86_64),
            ("arm64", Architecture::Arm64),
            ("aarch64", Architecture::Arm64),
            ("arm", Architecture::Arm32),
            ("armv7l", Architecture::Arm32),
        ];
        for (raw, expected) in cases {
            assert_eq!(Architecture::normalize(raw).unwrap(), expected, "{}", raw);
        }
    }

    #[test]
    fn test_64_bit_names_never_downgrade() {
        for raw in ["arm64", "ARM64", "arm64e", "aarch64", "aarch64_be"] {
            assert_ne!(Architecture::normalize(raw).unwrap(), Architecture::Arm32, "{}", raw);
        }
        for raw in ["x86_64", "X86_64", "x86_64h", "amd64"] {
            assert_ne!(Architecture::normalize(raw).unwrap(), Architecture::X86_32, "{}", raw);
        }
    }

    #[test]
    fn test_riscv_is_unsupported() {
        let err = Architecture::normalize("riscv64").unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedArchitecture { .. }));
    }

    #[test]
    fn test_unsupported_os_reported_before_arch() {
        let err = PlatformIdentity::from_names("plan9", "riscv64").unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_display() {
        let id = PlatformIdentity::from_names("linux", "x86_64").unwrap();
        assert_eq!(id.to_string(), "x86_64-linux");
    }
}
