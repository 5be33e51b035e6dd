//! Primitive data types and bitfield storage-unit validation.
//!
//! Composites are built out of these primitives. Bitfields occupy a bit range
//! inside a storage unit whose type must be one of the integer primitives.

use serde::{Deserialize, Serialize};

/// Primitive data type of a component (or of a bitfield storage unit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Char,
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
}

impl DataType {
    /// Byte size of the type.
    pub fn len(&self) -> usize {
        match self {
            DataType::Char | DataType::Bool | DataType::Int8 | DataType::UInt8 => 1,
            DataType::Int16 | DataType::UInt16 => 2,
            DataType::Int32 | DataType::UInt32 | DataType::Float => 4,
            DataType::Int64 | DataType::UInt64 | DataType::Double => 8,
        }
    }

    /// Alignment requirement in bytes (natural alignment for primitives).
    pub fn alignment(&self) -> usize {
        self.len()
    }

    /// C-style display name, as shown in the component table.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Char => "char",
            DataType::Bool => "bool",
            DataType::Int8 => "int8_t",
            DataType::UInt8 => "uint8_t",
            DataType::Int16 => "short",
            DataType::UInt16 => "ushort",
            DataType::Int32 => "int",
            DataType::UInt32 => "uint",
            DataType::Int64 => "longlong",
            DataType::UInt64 => "ulonglong",
            DataType::Float => "float",
            DataType::Double => "double",
        }
    }

    /// True for types that may serve as a bitfield storage unit.
    pub fn is_integer(&self) -> bool {
        !matches!(self, DataType::Float | DataType::Double)
    }

    /// Number of bits a bitfield of this base type can span at most.
    pub fn bit_capacity(&self) -> u8 {
        (self.len() * 8) as u8
    }

    /// All primitives, in display order.
    pub fn all() -> &'static [DataType] {
        &[
            DataType::Char,
            DataType::Bool,
            DataType::Int8,
            DataType::UInt8,
            DataType::Int16,
            DataType::UInt16,
            DataType::Int32,
            DataType::UInt32,
            DataType::Int64,
            DataType::UInt64,
            DataType::Float,
            DataType::Double,
        ]
    }

    /// Default storage unit used when an insertion request carries no base type.
    pub fn default_bitfield_base() -> DataType {
        DataType::Int32
    }
}

/// A validated (base type, bit width) pair describing a bitfield to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitFieldSpec {
    pub base: DataType,
    pub bit_size: u8,
}

impl BitFieldSpec {
    /// Build a spec, rejecting non-integer bases and widths outside
    /// `1..=base.bit_capacity()`.
    pub fn new(base: DataType, bit_size: u8) -> Option<Self> {
        if !base.is_integer() || bit_size == 0 || bit_size > base.bit_capacity() {
            return None;
        }
        Some(Self { base, bit_size })
    }
}
