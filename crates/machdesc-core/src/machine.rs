//! Machine description: the primitive layout of one target.
//!
//! A [`MachineDescription`] is built once, from a preset [`Config`] or from
//! explicit values, and only read afterwards. Code generators consult it for
//! primitive sizes and alignments when laying out native structs.

use std::ffi::{c_double, c_float, c_int, c_long};
use std::mem::{align_of, size_of};

use serde::{Deserialize, Serialize};

use crate::config::{Config, PrimitiveAlignments, PrimitiveSizes};
use crate::endian::query_is_little_endian;
use crate::error::{MachineError, Result};
use crate::platform::PlatformInfo;
use crate::primitive::Primitive;

const INT8_SIZE: u32 = 1;
const INT16_SIZE: u32 = 2;
const INT32_SIZE: u32 = 4;
const INT64_SIZE: u32 = 8;

/// Primitive sizes, alignments, page size and byte order of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MachineDescription {
    runtime_validated: bool,
    little_endian: bool,
    sizes: PrimitiveSizes,
    alignments: PrimitiveAlignments,
}

impl MachineDescription {
    /// Build a description from explicit values.
    ///
    /// Values are stored verbatim. No cross-field checks are made; see
    /// [`crate::parse::validate_description`] for an opt-in check. The
    /// fixed-width integer sizes are not part of the input.
    pub fn new(
        runtime_validated: bool,
        little_endian: bool,
        sizes: PrimitiveSizes,
        alignments: PrimitiveAlignments,
    ) -> Self {
        Self {
            runtime_validated,
            little_endian,
            sizes,
            alignments,
        }
    }

    /// Build a description by copying a preset's size and alignment rows.
    pub fn from_config(runtime_validated: bool, little_endian: bool, config: Config) -> Self {
        Self::new(
            runtime_validated,
            little_endian,
            *config.sizes(),
            *config.alignments(),
        )
    }

    /// Like [`MachineDescription::from_config`], resolving the preset by name.
    pub fn from_config_name(runtime_validated: bool, little_endian: bool, name: &str) -> Result<Self> {
        let config = name.parse::<Config>()?;
        Ok(Self::from_config(runtime_validated, little_endian, config))
    }

    /// Static description for a preset, with the host's byte order.
    pub fn create_static_config(config: Config) -> Self {
        Self::from_config(false, query_is_little_endian(), config)
    }

    pub fn create_static_arm_eabi() -> Self {
        Self::create_static_config(Config::ArmEabi)
    }

    pub fn create_static_unix32() -> Self {
        Self::create_static_config(Config::X86_32Unix)
    }

    pub fn create_static_unix64() -> Self {
        Self::create_static_config(Config::X86_64Unix)
    }

    pub fn create_static_windows32() -> Self {
        Self::create_static_config(Config::X86_32Windows)
    }

    pub fn create_static_windows64() -> Self {
        Self::create_static_config(Config::X86_64Windows)
    }

    /// Static description for the host CPU/OS, given its pointer width.
    ///
    /// Fails on 64-bit ARM, which has no preset.
    pub fn create_static(is_32bit: bool) -> Result<Self> {
        let host = PlatformInfo::host();
        Self::create_static_for(&PlatformInfo { is_32bit, ..host })
    }

    /// Static description for the given platform facts.
    pub fn create_static_for(platform: &PlatformInfo) -> Result<Self> {
        Ok(Self::create_static_config(platform.select_config()?))
    }

    /// Runtime-validated description of the host.
    ///
    /// Sizes and alignments Rust can observe directly are measured. Long double
    /// and the page size are taken from the host's preset.
    pub fn measure_host() -> Result<Self> {
        let preset = PlatformInfo::host().select_config()?;
        let sizes = PrimitiveSizes {
            int: size_of::<c_int>() as u32,
            long: size_of::<c_long>() as u32,
            float: size_of::<c_float>() as u32,
            double: size_of::<c_double>() as u32,
            long_double: preset.sizes().long_double,
            pointer: size_of::<*const u8>() as u32,
            page: preset.sizes().page,
        };
        let alignments = PrimitiveAlignments {
            int8: align_of::<i8>() as u32,
            int16: align_of::<i16>() as u32,
            int32: align_of::<i32>() as u32,
            int64: align_of::<i64>() as u32,
            int: align_of::<c_int>() as u32,
            long: align_of::<c_long>() as u32,
            float: align_of::<c_float>() as u32,
            double: align_of::<c_double>() as u32,
            long_double: preset.alignments().long_double,
            pointer: align_of::<*const u8>() as u32,
        };
        Ok(Self::new(true, query_is_little_endian(), sizes, alignments))
    }

    /// Whether the values were measured on the running machine rather than
    /// taken from a preset.
    pub fn is_runtime_validated(&self) -> bool {
        self.runtime_validated
    }

    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    /// True iff pointers are 4 bytes.
    pub fn is_32bit(&self) -> bool {
        self.sizes.pointer == 4
    }

    pub fn is_64bit(&self) -> bool {
        !self.is_32bit()
    }

    pub fn sizes(&self) -> &PrimitiveSizes {
        &self.sizes
    }

    pub fn alignments(&self) -> &PrimitiveAlignments {
        &self.alignments
    }

    pub fn int8_size(&self) -> u32 {
        INT8_SIZE
    }

    pub fn int16_size(&self) -> u32 {
        INT16_SIZE
    }

    pub fn int32_size(&self) -> u32 {
        INT32_SIZE
    }

    pub fn int64_size(&self) -> u32 {
        INT64_SIZE
    }

    pub fn int_size(&self) -> u32 {
        self.sizes.int
    }

    pub fn long_size(&self) -> u32 {
        self.sizes.long
    }

    pub fn float_size(&self) -> u32 {
        self.sizes.float
    }

    pub fn double_size(&self) -> u32 {
        self.sizes.double
    }

    pub fn long_double_size(&self) -> u32 {
        self.sizes.long_double
    }

    pub fn pointer_size(&self) -> u32 {
        self.sizes.pointer
    }

    pub fn page_size(&self) -> u32 {
        self.sizes.page
    }

    pub fn int8_alignment(&self) -> u32 {
        self.alignments.int8
    }

    pub fn int16_alignment(&self) -> u32 {
        self.alignments.int16
    }

    pub fn int32_alignment(&self) -> u32 {
        self.alignments.int32
    }

    pub fn int64_alignment(&self) -> u32 {
        self.alignments.int64
    }

    pub fn int_alignment(&self) -> u32 {
        self.alignments.int
    }

    pub fn long_alignment(&self) -> u32 {
        self.alignments.long
    }

    pub fn float_alignment(&self) -> u32 {
        self.alignments.float
    }

    pub fn double_alignment(&self) -> u32 {
        self.alignments.double
    }

    pub fn long_double_alignment(&self) -> u32 {
        self.alignments.long_double
    }

    pub fn pointer_alignment(&self) -> u32 {
        self.alignments.pointer
    }

    /// Size in bytes of a primitive on this target.
    pub fn size_of(&self, primitive: Primitive) -> u32 {
        match primitive {
            Primitive::Int8 => INT8_SIZE,
            Primitive::Int16 => INT16_SIZE,
            Primitive::Int32 => INT32_SIZE,
            Primitive::Int64 => INT64_SIZE,
            Primitive::Int => self.sizes.int,
            Primitive::Long => self.sizes.long,
            Primitive::Float => self.sizes.float,
            Primitive::Double => self.sizes.double,
            Primitive::LongDouble => self.sizes.long_double,
            Primitive::Pointer => self.sizes.pointer,
        }
    }

    /// Alignment in bytes of a primitive on this target.
    pub fn alignment_of(&self, primitive: Primitive) -> u32 {
        match primitive {
            Primitive::Int8 => self.alignments.int8,
            Primitive::Int16 => self.alignments.int16,
            Primitive::Int32 => self.alignments.int32,
            Primitive::Int64 => self.alignments.int64,
            Primitive::Int => self.alignments.int,
            Primitive::Long => self.alignments.long,
            Primitive::Float => self.alignments.float,
            Primitive::Double => self.alignments.double,
            Primitive::LongDouble => self.alignments.long_double,
            Primitive::Pointer => self.alignments.pointer,
        }
    }

    /// Round `offset` up to the alignment of `primitive`.
    pub fn align_offset(&self, offset: u64, primitive: Primitive) -> Result<u64> {
        let align = u64::from(self.alignment_of(primitive)).max(1);
        offset
            .checked_next_multiple_of(align)
            .ok_or(MachineError::OffsetOverflow { offset, align })
    }

    /// Number of pages needed to hold `size` bytes.
    pub fn page_count(&self, size: i64) -> Result<u64> {
        if size < 0 {
            return Err(MachineError::NegativeSize { size });
        }
        let page = u64::from(self.sizes.page);
        if page == 0 {
            return Err(MachineError::ZeroPageSize);
        }
        Ok((size as u64).div_ceil(page))
    }

    /// `size` rounded up to a whole number of pages.
    pub fn page_aligned_size(&self, size: i64) -> Result<u64> {
        // count * page < size + page, so this cannot overflow for i64 sizes.
        Ok(self.page_count(size)? * u64::from(self.sizes.page))
    }

    /// The preset with exactly these sizes and alignments, if there is one.
    pub fn matching_config(&self) -> Option<Config> {
        Config::ALL
            .into_iter()
            .find(|c| *c.sizes() == self.sizes && *c.alignments() == self.alignments)
    }
}

impl std::fmt::Display for MachineDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = &self.sizes;
        let a = &self.alignments;
        writeln!(
            f,
            "machine description: runtime-validated {}, little-endian {}, 32-bit {}, primitive size / alignment:",
            self.runtime_validated,
            self.little_endian,
            self.is_32bit()
        )?;
        writeln!(f, "  int8    {} / {}, int16   {} / {}", INT8_SIZE, a.int8, INT16_SIZE, a.int16)?;
        writeln!(f, "  int     {} / {}, long    {} / {}", s.int, a.int, s.long, a.long)?;
        writeln!(f, "  int32   {} / {}, int64   {} / {}", INT32_SIZE, a.int32, INT64_SIZE, a.int64)?;
        writeln!(
            f,
            "  float   {} / {}, double  {} / {}, ldouble {} / {}",
            s.float, a.float, s.double, a.double, s.long_double, a.long_double
        )?;
        write!(f, "  pointer {} / {}, page    {}", s.pointer, a.pointer, s.page)
    }
}
