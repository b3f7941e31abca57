mod dtype;
mod error;
mod patch;
mod typed_buffer;

pub use dtype::DType;
pub use error::{BufferError, PatchError};
pub use patch::{
    apply_patch, apply_patch_with_commit, encode_change, encode_update, BufferPatchMessage,
    BufferTarget, EncodedPatch,
};
pub use typed_buffer::{Element, TypedBuffer};
