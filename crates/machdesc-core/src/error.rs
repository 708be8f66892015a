//! Error types for machine description operations.

use std::path::PathBuf;

/// Errors that can occur while building, querying or persisting a machine description.
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    /// No preset configuration exists with this name.
    #[error("unknown machine configuration '{name}'")]
    UnknownConfig {
        /// The name that failed to resolve.
        name: String,
    },

    /// The CPU/OS combination has no preset configuration.
    #[error("no machine configuration for {bits}-bit {cpu} on {os}")]
    UnsupportedPlatform {
        /// CPU family name.
        cpu: String,
        /// Operating system name.
        os: String,
        /// Pointer width in bits.
        bits: u32,
    },

    /// Page arithmetic was asked about a negative byte count.
    #[error("size must be non-negative, got {size}")]
    NegativeSize {
        /// The rejected size.
        size: i64,
    },

    /// Rounding an offset up to an alignment does not fit in 64 bits.
    #[error("offset {offset} aligned to {align} bytes overflows")]
    OffsetOverflow {
        /// The offset being aligned.
        offset: u64,
        /// The alignment it was rounded up to.
        align: u64,
    },

    /// A CPU family or OS name was not recognized.
    #[error("unknown {kind} '{name}'")]
    UnknownPlatformName {
        /// What was being named ("CPU family" or "OS type").
        kind: &'static str,
        /// The name that failed to resolve.
        name: String,
    },

    /// Page arithmetic on a description with a zero page size.
    #[error("page size is zero")]
    ZeroPageSize,

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading/writing description files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Description file not found.
    #[error("machine description not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for machine description operations.
pub type Result<T> = std::result::Result<T, MachineError>;
