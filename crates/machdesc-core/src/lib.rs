//! Primitive layout descriptions of native target ABIs.
//!
//! A [`MachineDescription`] records the sizes and alignments of the C
//! primitives, the pointer width, the page size and the byte order of one
//! target. Code generators read it when emitting correctly aligned struct
//! accessors.
//!
//! Descriptions come from:
//! - **Presets:** five fixed [`Config`] tables (ARM-EABI and x86 32/64-bit on Unix and Windows)
//! - **Explicit values:** any caller-supplied sizes and alignments
//! - **The host:** [`MachineDescription::measure_host`] and the `create_static*` factories

pub mod config;
pub mod endian;
pub mod error;
pub mod machine;
pub mod parse;
pub mod platform;
pub mod primitive;

pub use config::{Config, PrimitiveAlignments, PrimitiveSizes};
pub use error::{MachineError, Result};
pub use machine::MachineDescription;
pub use platform::{CpuFamily, OsType, PlatformInfo};
pub use primitive::Primitive;
