use thiserror::Error;

/// Errors that can occur when building or reading a typed buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Data type tag not in the supported set
    #[error("Unsupported data type {dtype:?}. Expected one of int8, uint8, int16, uint16, int32, uint32, float32, float64")]
    UnsupportedDataType { dtype: String },

    /// Byte length does not divide into whole elements
    #[error("Buffer of {byte_length} bytes is not a whole number of {dtype} elements ({element_size} bytes each)")]
    MisalignedLength {
        dtype: String,
        byte_length: usize,
        element_size: usize,
    },
}

/// Errors that can occur when applying a typed-buffer patch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// Underlying buffer decoding failed
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Patch referenced a raw buffer that was not attached
    #[error("Patch for attribute {attr:?} expects raw buffer #{index} but only {available} were attached")]
    MissingBuffer {
        attr: String,
        index: usize,
        available: usize,
    },

    /// Sparse update indices and values disagree in length
    #[error("Patch for attribute {attr:?} has {indices} indices but {values} values")]
    LengthMismatch {
        attr: String,
        indices: usize,
        values: usize,
    },

    /// Sparse update indices must use an integer element type
    #[error("Patch for attribute {attr:?} uses non-integer index type {dtype}")]
    NonIntegerIndices { attr: String, dtype: String },
}
