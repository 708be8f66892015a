//! C primitive types whose size or alignment a description records.

use serde::{Deserialize, Serialize};

/// A primitive type with a layout entry in every machine description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Primitive {
    Int8,
    Int16,
    Int32,
    Int64,
    Int,
    Long,
    Float,
    Double,
    LongDouble,
    Pointer,
}

impl Primitive {
    pub const ALL: [Primitive; 10] = [
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::LongDouble,
        Primitive::Pointer,
    ];

    /// Size for the fixed-width integers, which is the same on every target.
    pub fn fixed_size(self) -> Option<u32> {
        match self {
            Primitive::Int8 => Some(1),
            Primitive::Int16 => Some(2),
            Primitive::Int32 => Some(4),
            Primitive::Int64 => Some(8),
            _ => None,
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Int8 => write!(f, "int8_t"),
            Primitive::Int16 => write!(f, "int16_t"),
            Primitive::Int32 => write!(f, "int32_t"),
            Primitive::Int64 => write!(f, "int64_t"),
            Primitive::Int => write!(f, "int"),
            Primitive::Long => write!(f, "long"),
            Primitive::Float => write!(f, "float"),
            Primitive::Double => write!(f, "double"),
            Primitive::LongDouble => write!(f, "long double"),
            Primitive::Pointer => write!(f, "void*"),
        }
    }
}
