use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::BufferError;

/// Element type of a typed buffer. All multi-byte types are little-endian on
/// the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl DType {
    pub const ALL: [DType; 8] = [
        DType::Int8,
        DType::Uint8,
        DType::Int16,
        DType::Uint16,
        DType::Int32,
        DType::Uint32,
        DType::Float32,
        DType::Float64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::Uint8 => "uint8",
            DType::Int16 => "int16",
            DType::Uint16 => "uint16",
            DType::Int32 => "int32",
            DType::Uint32 => "uint32",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
        }
    }

    /// Size in bytes of one element
    pub fn element_size(&self) -> usize {
        match self {
            DType::Int8 | DType::Uint8 => 1,
            DType::Int16 | DType::Uint16 => 2,
            DType::Int32 | DType::Uint32 | DType::Float32 => 4,
            DType::Float64 => 8,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, DType::Float32 | DType::Float64)
    }
}

impl FromStr for DType {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::ALL
            .iter()
            .find(|dtype| dtype.as_str() == s)
            .copied()
            .ok_or_else(|| BufferError::UnsupportedDataType {
                dtype: s.to_string(),
            })
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
