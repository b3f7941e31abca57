use thiserror::Error;

/// Errors that can occur while decoding messages exchanged between host and
/// renderer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Custom op `type` not in the known set
    #[error("Unknown custom op type {op_type:?}")]
    UnknownOpType { op_type: String },

    /// Custom op arguments could not be decoded
    #[error("Malformed arguments for custom op {op_type:?}: {reason}")]
    MalformedOp { op_type: String, reason: String },

    /// Message envelope could not be decoded
    #[error("Malformed message: {reason}")]
    MalformedMessage { reason: String },
}
