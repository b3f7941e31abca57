use bytemuck::Pod;
use serde::{Deserialize, Serialize};

use super::{dtype::DType, error::BufferError};

/// Numeric element of a typed buffer, convertible through `f64` the way
/// typed-array assignment converts numbers
pub trait Element: Pod {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_int_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                // integer targets wrap, and NaN becomes 0
                fn from_f64(value: f64) -> Self {
                    value as i64 as $ty
                }
            }
        )*
    };
}

impl_int_element!(i8, u8, i16, u16, i32, u32);

impl Element for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Element for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// A homogeneous numeric array tagged with its element type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "data", rename_all = "lowercase")]
pub enum TypedBuffer {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

macro_rules! with_values {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            TypedBuffer::Int8($values) => $body,
            TypedBuffer::Uint8($values) => $body,
            TypedBuffer::Int16($values) => $body,
            TypedBuffer::Uint16($values) => $body,
            TypedBuffer::Int32($values) => $body,
            TypedBuffer::Uint32($values) => $body,
            TypedBuffer::Float32($values) => $body,
            TypedBuffer::Float64($values) => $body,
        }
    };
}

fn read_elements<T: Element>(bytes: &[u8]) -> Vec<T> {
    bytemuck::allocation::pod_collect_to_vec(bytes)
}

impl TypedBuffer {
    /// Builds a typed view over raw little-endian bytes
    pub fn from_bytes(dtype: DType, bytes: &[u8]) -> Result<Self, BufferError> {
        let element_size = dtype.element_size();
        if bytes.len() % element_size != 0 {
            return Err(BufferError::MisalignedLength {
                dtype: dtype.to_string(),
                byte_length: bytes.len(),
                element_size,
            });
        }
        Ok(match dtype {
            DType::Int8 => TypedBuffer::Int8(read_elements(bytes)),
            DType::Uint8 => TypedBuffer::Uint8(bytes.to_vec()),
            DType::Int16 => TypedBuffer::Int16(read_elements(bytes)),
            DType::Uint16 => TypedBuffer::Uint16(read_elements(bytes)),
            DType::Int32 => TypedBuffer::Int32(read_elements(bytes)),
            DType::Uint32 => TypedBuffer::Uint32(read_elements(bytes)),
            DType::Float32 => TypedBuffer::Float32(read_elements(bytes)),
            DType::Float64 => TypedBuffer::Float64(read_elements(bytes)),
        })
    }

    /// Same as [`TypedBuffer::from_bytes`], taking the data type by name
    pub fn from_bytes_named(dtype: &str, bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_bytes(dtype.parse()?, bytes)
    }

    /// Raw little-endian bytes of this buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        with_values!(self, values => bytemuck::cast_slice::<_, u8>(values.as_slice()).to_vec())
    }

    pub fn dtype(&self) -> DType {
        match self {
            TypedBuffer::Int8(_) => DType::Int8,
            TypedBuffer::Uint8(_) => DType::Uint8,
            TypedBuffer::Int16(_) => DType::Int16,
            TypedBuffer::Uint16(_) => DType::Uint16,
            TypedBuffer::Int32(_) => DType::Int32,
            TypedBuffer::Uint32(_) => DType::Uint32,
            TypedBuffer::Float32(_) => DType::Float32,
            TypedBuffer::Float64(_) => DType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_len(&self) -> usize {
        self.len() * self.dtype().element_size()
    }

    /// Element at `index` as a number
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_values!(self, values => values.get(index).map(|value| value.to_f64()))
    }

    /// Stores `value` at `index`, converted to this buffer's element type.
    /// Returns `false` if `index` is out of range.
    pub fn set_from_f64(&mut self, index: usize, value: f64) -> bool {
        with_values!(self, values => match values.get_mut(index) {
            Some(slot) => {
                *slot = Element::from_f64(value);
                true
            }
            None => false,
        })
    }

    /// Element at `index` interpreted as a position into another buffer.
    /// `None` for floats, negative values, or out-of-range reads.
    pub fn index_at(&self, index: usize) -> Option<usize> {
        if !self.dtype().is_integer() {
            return None;
        }
        let value = self.get_f64(index)?;
        if value < 0.0 {
            return None;
        }
        Some(value as usize)
    }

    /// All elements as numbers
    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_values!(self, values => values.iter().map(|value| value.to_f64()).collect())
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<Vec<$ty>> for TypedBuffer {
                fn from(values: Vec<$ty>) -> Self {
                    TypedBuffer::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec!(
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64
);
