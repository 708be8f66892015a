//! Host platform facts used to pick a preset configuration.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{MachineError, Result};

/// CPU family, as far as preset selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CpuFamily {
    /// x86 and x86-64.
    X86,
    /// 32- and 64-bit ARM.
    Arm,
    Other,
}

impl CpuFamily {
    /// Classify an architecture name as reported by `std::env::consts::ARCH`.
    pub fn from_arch(arch: &str) -> Self {
        match arch {
            "x86" | "x86_64" => CpuFamily::X86,
            "arm" | "aarch64" => CpuFamily::Arm,
            _ => CpuFamily::Other,
        }
    }
}

impl std::fmt::Display for CpuFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuFamily::X86 => write!(f, "x86"),
            CpuFamily::Arm => write!(f, "arm"),
            CpuFamily::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for CpuFamily {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "x86_64" | "x86-64" | "i386" | "i686" | "amd64" => Ok(CpuFamily::X86),
            "arm" | "aarch64" | "arm64" => Ok(CpuFamily::Arm),
            "other" => Ok(CpuFamily::Other),
            _ => Err(MachineError::UnknownPlatformName {
                kind: "CPU family",
                name: s.into(),
            }),
        }
    }
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsType {
    Linux,
    Windows,
    MacOs,
    Other,
}

impl OsType {
    /// Classify an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" | "android" => OsType::Linux,
            "windows" => OsType::Windows,
            "macos" | "ios" => OsType::MacOs,
            _ => OsType::Other,
        }
    }

    pub fn is_windows(self) -> bool {
        self == OsType::Windows
    }
}

impl std::fmt::Display for OsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsType::Linux => write!(f, "linux"),
            OsType::Windows => write!(f, "windows"),
            OsType::MacOs => write!(f, "macos"),
            OsType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for OsType {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linux" | "android" => Ok(OsType::Linux),
            "windows" | "win32" | "win64" => Ok(OsType::Windows),
            "macos" | "darwin" | "ios" => Ok(OsType::MacOs),
            "other" => Ok(OsType::Other),
            _ => Err(MachineError::UnknownPlatformName {
                kind: "OS type",
                name: s.into(),
            }),
        }
    }
}

/// The facts preset selection needs about a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformInfo {
    pub cpu_family: CpuFamily,
    pub os_type: OsType,
    /// Whether the CPU architecture uses 32-bit pointers.
    pub is_32bit: bool,
}

impl PlatformInfo {
    pub fn new(cpu_family: CpuFamily, os_type: OsType, is_32bit: bool) -> Self {
        Self {
            cpu_family,
            os_type,
            is_32bit,
        }
    }

    /// Facts about the platform this binary was compiled for.
    pub fn host() -> Self {
        Self {
            cpu_family: CpuFamily::from_arch(std::env::consts::ARCH),
            os_type: OsType::from_os(std::env::consts::OS),
            is_32bit: cfg!(target_pointer_width = "32"),
        }
    }

    /// Pointer width in bits.
    pub fn pointer_bits(&self) -> u32 {
        if self.is_32bit {
            32
        } else {
            64
        }
    }

    /// The preset configuration for this platform.
    pub fn select_config(&self) -> Result<Config> {
        Config::select(self.is_32bit, self.cpu_family, self.os_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_arch_names() {
        assert_eq!(CpuFamily::from_arch("x86_64"), CpuFamily::X86);
        assert_eq!(CpuFamily::from_arch("x86"), CpuFamily::X86);
        assert_eq!(CpuFamily::from_arch("arm"), CpuFamily::Arm);
        assert_eq!(CpuFamily::from_arch("aarch64"), CpuFamily::Arm);
        assert_eq!(CpuFamily::from_arch("riscv64"), CpuFamily::Other);
    }

    #[test]
    fn classify_os_names() {
        assert_eq!(OsType::from_os("linux"), OsType::Linux);
        assert_eq!(OsType::from_os("windows"), OsType::Windows);
        assert_eq!(OsType::from_os("macos"), OsType::MacOs);
        assert_eq!(OsType::from_os("freebsd"), OsType::Other);
        assert!(OsType::Windows.is_windows());
        assert!(!OsType::Linux.is_windows());
    }

    #[test]
    fn parse_names() {
        assert_eq!("AMD64".parse::<CpuFamily>().unwrap(), CpuFamily::X86);
        assert_eq!("arm64".parse::<CpuFamily>().unwrap(), CpuFamily::Arm);
        assert_eq!("Windows".parse::<OsType>().unwrap(), OsType::Windows);
    }

    #[test]
    fn unknown_names_report_kind() {
        let err = "sparc".parse::<CpuFamily>().unwrap_err();
        assert!(matches!(
            err,
            MachineError::UnknownPlatformName { kind: "CPU family", ref name } if name == "sparc"
        ));
        assert_eq!(err.to_string(), "unknown CPU family 'sparc'");

        let err = "plan9".parse::<OsType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown OS type 'plan9'");
    }

    #[test]
    fn host_pointer_width() {
        let host = PlatformInfo::host();
        assert_eq!(host.pointer_bits(), usize::BITS);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for cpu in [CpuFamily::X86, CpuFamily::Arm, CpuFamily::Other] {
            assert_eq!(cpu.to_string().parse::<CpuFamily>().unwrap(), cpu);
        }
        for os in [OsType::Linux, OsType::Windows, OsType::MacOs, OsType::Other] {
            assert_eq!(os.to_string().parse::<OsType>().unwrap(), os);
        }
    }
}
