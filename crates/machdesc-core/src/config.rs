//! Preset configurations for the supported architecture/OS pairings.
//!
//! Each [`Config`] maps to one row of size data and one row of alignment
//! data. The rows are plain `const` tables; nothing is computed at run time.

use serde::{Deserialize, Serialize};

use crate::error::{MachineError, Result};
use crate::platform::{CpuFamily, OsType};

/// Sizes in bytes of the primitives whose width depends on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PrimitiveSizes {
    pub int: u32,
    pub long: u32,
    pub float: u32,
    pub double: u32,
    pub long_double: u32,
    pub pointer: u32,
    /// Memory page size.
    pub page: u32,
}

/// Alignments in bytes of every primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PrimitiveAlignments {
    pub int8: u32,
    pub int16: u32,
    pub int32: u32,
    pub int64: u32,
    pub int: u32,
    pub long: u32,
    pub float: u32,
    pub double: u32,
    pub long_double: u32,
    pub pointer: u32,
}

const fn sizes(
    int: u32,
    long: u32,
    float: u32,
    double: u32,
    long_double: u32,
    pointer: u32,
    page: u32,
) -> PrimitiveSizes {
    PrimitiveSizes {
        int,
        long,
        float,
        double,
        long_double,
        pointer,
        page,
    }
}

#[allow(clippy::too_many_arguments)]
const fn alignments(
    int8: u32,
    int16: u32,
    int32: u32,
    int64: u32,
    int: u32,
    long: u32,
    float: u32,
    double: u32,
    long_double: u32,
    pointer: u32,
) -> PrimitiveAlignments {
    PrimitiveAlignments {
        int8,
        int16,
        int32,
        int64,
        int,
        long,
        float,
        double,
        long_double,
        pointer,
    }
}

//                                          int long float double ldouble ptr page
const SIZE_ARM_EABI: PrimitiveSizes = sizes(4, 4, 4, 8, 8, 4, 4096);
const SIZE_X86_32_UNIX: PrimitiveSizes = sizes(4, 4, 4, 8, 12, 4, 4096);
const SIZE_X86_32_WINDOWS: PrimitiveSizes = sizes(4, 4, 4, 8, 12, 4, 4096);
const SIZE_X86_64_UNIX: PrimitiveSizes = sizes(4, 8, 4, 8, 16, 8, 4096);
const SIZE_X86_64_WINDOWS: PrimitiveSizes = sizes(4, 4, 4, 8, 16, 8, 4096);

//                                                    i8 i16 i32 i64 int long float double ldouble ptr
const ALIGN_ARM_EABI: PrimitiveAlignments = alignments(1, 2, 4, 8, 4, 4, 4, 8, 8, 4);
const ALIGN_X86_32_UNIX: PrimitiveAlignments = alignments(1, 2, 4, 4, 4, 4, 4, 4, 4, 4);
const ALIGN_X86_32_WINDOWS: PrimitiveAlignments = alignments(1, 2, 4, 8, 4, 4, 4, 8, 4, 4);
const ALIGN_X86_64_UNIX: PrimitiveAlignments = alignments(1, 2, 4, 8, 4, 8, 4, 8, 16, 8);
const ALIGN_X86_64_WINDOWS: PrimitiveAlignments = alignments(1, 2, 4, 8, 4, 4, 4, 8, 16, 8);

/// A named architecture/OS pairing with known primitive layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Config {
    #[serde(rename = "arm-eabi")]
    ArmEabi,
    #[serde(rename = "x86-32-unix")]
    X86_32Unix,
    #[serde(rename = "x86-32-windows")]
    X86_32Windows,
    #[serde(rename = "x86-64-unix")]
    X86_64Unix,
    #[serde(rename = "x86-64-windows")]
    X86_64Windows,
}

impl Config {
    /// Every preset, in table order.
    pub const ALL: [Config; 5] = [
        Config::ArmEabi,
        Config::X86_32Unix,
        Config::X86_32Windows,
        Config::X86_64Unix,
        Config::X86_64Windows,
    ];

    /// Stable kebab-case identifier.
    pub fn name(self) -> &'static str {
        match self {
            Config::ArmEabi => "arm-eabi",
            Config::X86_32Unix => "x86-32-unix",
            Config::X86_32Windows => "x86-32-windows",
            Config::X86_64Unix => "x86-64-unix",
            Config::X86_64Windows => "x86-64-windows",
        }
    }

    /// One-line human description.
    pub fn description(self) -> &'static str {
        match self {
            Config::ArmEabi => "32-bit ARM, Embedded ABI",
            Config::X86_32Unix => "32-bit x86, System V (Linux, BSD, macOS)",
            Config::X86_32Windows => "32-bit x86, Windows",
            Config::X86_64Unix => "64-bit x86, System V LP64",
            Config::X86_64Windows => "64-bit x86, Windows LLP64",
        }
    }

    pub fn sizes(self) -> &'static PrimitiveSizes {
        match self {
            Config::ArmEabi => &SIZE_ARM_EABI,
            Config::X86_32Unix => &SIZE_X86_32_UNIX,
            Config::X86_32Windows => &SIZE_X86_32_WINDOWS,
            Config::X86_64Unix => &SIZE_X86_64_UNIX,
            Config::X86_64Windows => &SIZE_X86_64_WINDOWS,
        }
    }

    pub fn alignments(self) -> &'static PrimitiveAlignments {
        match self {
            Config::ArmEabi => &ALIGN_ARM_EABI,
            Config::X86_32Unix => &ALIGN_X86_32_UNIX,
            Config::X86_32Windows => &ALIGN_X86_32_WINDOWS,
            Config::X86_64Unix => &ALIGN_X86_64_UNIX,
            Config::X86_64Windows => &ALIGN_X86_64_WINDOWS,
        }
    }

    /// Pick the preset for a CPU/OS pairing.
    ///
    /// On 32-bit targets ARM always maps to ARM-EABI, whatever the OS. There is
    /// no 64-bit ARM preset, so that combination is reported as unsupported
    /// rather than falling through to an x86 table.
    pub fn select(is_32bit: bool, cpu: CpuFamily, os: OsType) -> Result<Config> {
        if is_32bit {
            if cpu == CpuFamily::Arm {
                Ok(Config::ArmEabi)
            } else if os.is_windows() {
                Ok(Config::X86_32Windows)
            } else {
                Ok(Config::X86_32Unix)
            }
        } else if cpu == CpuFamily::Arm {
            Err(MachineError::UnsupportedPlatform {
                cpu: cpu.to_string(),
                os: os.to_string(),
                bits: 64,
            })
        } else if os.is_windows() {
            Ok(Config::X86_64Windows)
        } else {
            Ok(Config::X86_64Unix)
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Config {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Config::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| MachineError::UnknownConfig { name: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_rows() {
        assert_eq!(*Config::ArmEabi.sizes(), sizes(4, 4, 4, 8, 8, 4, 4096));
        assert_eq!(*Config::X86_32Unix.sizes(), sizes(4, 4, 4, 8, 12, 4, 4096));
        assert_eq!(*Config::X86_32Windows.sizes(), sizes(4, 4, 4, 8, 12, 4, 4096));
        assert_eq!(*Config::X86_64Unix.sizes(), sizes(4, 8, 4, 8, 16, 8, 4096));
        assert_eq!(*Config::X86_64Windows.sizes(), sizes(4, 4, 4, 8, 16, 8, 4096));
    }

    #[test]
    fn alignment_rows() {
        let x86_32_unix = Config::X86_32Unix.alignments();
        assert_eq!(x86_32_unix.int64, 4);
        assert_eq!(x86_32_unix.double, 4);
        assert_eq!(x86_32_unix.long_double, 4);

        let x86_32_windows = Config::X86_32Windows.alignments();
        assert_eq!(x86_32_windows.int64, 8);
        assert_eq!(x86_32_windows.double, 8);
        assert_eq!(x86_32_windows.long_double, 4);

        assert_eq!(Config::X86_64Unix.alignments().long, 8);
        assert_eq!(Config::X86_64Windows.alignments().long, 4);
        assert_eq!(Config::ArmEabi.alignments().long_double, 8);
    }

    #[test]
    fn parse_names() {
        for config in Config::ALL {
            assert_eq!(config.name().parse::<Config>().unwrap(), config);
        }
        assert_eq!("X86_64_UNIX".parse::<Config>().unwrap(), Config::X86_64Unix);
    }

    #[test]
    fn parse_unknown_name() {
        let err = "aarch64-linux".parse::<Config>().unwrap_err();
        assert!(matches!(err, MachineError::UnknownConfig { ref name } if name == "aarch64-linux"));
    }

    #[test]
    fn select_32bit() {
        use crate::platform::CpuFamily::{Arm, X86};
        use crate::platform::OsType::{Linux, MacOs, Windows};
        assert_eq!(Config::select(true, Arm, Linux).unwrap(), Config::ArmEabi);
        assert_eq!(Config::select(true, Arm, Windows).unwrap(), Config::ArmEabi);
        assert_eq!(Config::select(true, X86, Windows).unwrap(), Config::X86_32Windows);
        assert_eq!(Config::select(true, X86, Linux).unwrap(), Config::X86_32Unix);
        assert_eq!(
            Config::select(true, CpuFamily::Other, MacOs).unwrap(),
            Config::X86_32Unix
        );
    }

    #[test]
    fn select_64bit() {
        use crate::platform::CpuFamily::X86;
        use crate::platform::OsType::{Linux, MacOs, Windows};
        assert_eq!(Config::select(false, X86, Windows).unwrap(), Config::X86_64Windows);
        assert_eq!(Config::select(false, X86, Linux).unwrap(), Config::X86_64Unix);
        assert_eq!(Config::select(false, X86, MacOs).unwrap(), Config::X86_64Unix);
    }

    #[test]
    fn select_64bit_arm_unsupported() {
        for os in [OsType::Linux, OsType::Windows, OsType::MacOs] {
            let err = Config::select(false, CpuFamily::Arm, os).unwrap_err();
            assert!(matches!(err, MachineError::UnsupportedPlatform { bits: 64, .. }));
        }
    }

    #[test]
    fn serde_names_match_display() {
        for config in Config::ALL {
            let json = serde_json::to_string(&config).unwrap();
            assert_eq!(json, format!("\"{}\"", config.name()));
        }
    }
}
