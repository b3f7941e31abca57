use log::warn;
use serde::{Deserialize, Serialize};

use super::{dtype::DType, error::PatchError, typed_buffer::TypedBuffer};

/// Control message describing a typed-buffer patch. The raw bytes travel
/// alongside it as separate buffers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BufferPatchMessage {
    /// Replace `attr` wholesale with `buffers[0]`
    BufferChange {
        attr: String,
        #[serde(rename = "type")]
        dtype: String,
    },
    /// Write `buffers[1][i]` at position `buffers[0][i]` of `attr`
    BufferUpdate {
        attr: String,
        #[serde(rename = "type")]
        dtype: String,
        indices_type: String,
    },
}

impl BufferPatchMessage {
    pub fn attr(&self) -> &str {
        match self {
            BufferPatchMessage::BufferChange { attr, .. }
            | BufferPatchMessage::BufferUpdate { attr, .. } => attr,
        }
    }
}

/// A patch message together with the raw buffers it refers to
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedPatch {
    pub message: BufferPatchMessage,
    pub buffers: Vec<Vec<u8>>,
}

/// Encodes a full replacement of `attr`
pub fn encode_change(attr: &str, buffer: &TypedBuffer) -> EncodedPatch {
    EncodedPatch {
        message: BufferPatchMessage::BufferChange {
            attr: attr.to_string(),
            dtype: buffer.dtype().to_string(),
        },
        buffers: vec![buffer.to_bytes()],
    }
}

/// Encodes a sparse update of `attr`. `indices` must hold integers and have
/// the same length as `values`.
pub fn encode_update(
    attr: &str,
    indices: &TypedBuffer,
    values: &TypedBuffer,
) -> Result<EncodedPatch, PatchError> {
    if !indices.dtype().is_integer() {
        return Err(PatchError::NonIntegerIndices {
            attr: attr.to_string(),
            dtype: indices.dtype().to_string(),
        });
    }
    if indices.len() != values.len() {
        return Err(PatchError::LengthMismatch {
            attr: attr.to_string(),
            indices: indices.len(),
            values: values.len(),
        });
    }
    Ok(EncodedPatch {
        message: BufferPatchMessage::BufferUpdate {
            attr: attr.to_string(),
            dtype: values.dtype().to_string(),
            indices_type: indices.dtype().to_string(),
        },
        buffers: vec![indices.to_bytes(), values.to_bytes()],
    })
}

/// Anything holding named typed buffers that a patch can be applied to
pub trait BufferTarget {
    fn buffer_mut(&mut self, attr: &str) -> Option<&mut TypedBuffer>;
    fn set_buffer(&mut self, attr: &str, buffer: TypedBuffer);
}

/// Applies a patch to `target`. See [`apply_patch_with_commit`].
pub fn apply_patch<T: BufferTarget + ?Sized>(
    target: &mut T,
    message: &BufferPatchMessage,
    raw_buffers: &[Vec<u8>],
) -> Result<bool, PatchError> {
    apply_patch_with_commit(target, message, raw_buffers, || {})
}

/// Applies a patch to `target` and runs `on_commit` once if it was applied.
///
/// Returns `Ok(false)` without touching anything when a sparse update targets
/// an absent or empty buffer. Indices falling outside the target are skipped.
pub fn apply_patch_with_commit<T, F>(
    target: &mut T,
    message: &BufferPatchMessage,
    raw_buffers: &[Vec<u8>],
    on_commit: F,
) -> Result<bool, PatchError>
where
    T: BufferTarget + ?Sized,
    F: FnOnce(),
{
    match message {
        BufferPatchMessage::BufferChange { attr, dtype } => {
            let dtype: DType = dtype.parse()?;
            let bytes = raw_buffer(attr, raw_buffers, 0)?;
            let buffer = TypedBuffer::from_bytes(dtype, bytes)?;
            target.set_buffer(attr, buffer);
        }
        BufferPatchMessage::BufferUpdate {
            attr,
            dtype,
            indices_type,
        } => {
            let dtype: DType = dtype.parse()?;
            let indices_dtype: DType = indices_type.parse()?;
            if !indices_dtype.is_integer() {
                return Err(PatchError::NonIntegerIndices {
                    attr: attr.clone(),
                    dtype: indices_dtype.to_string(),
                });
            }
            let indices =
                TypedBuffer::from_bytes(indices_dtype, raw_buffer(attr, raw_buffers, 0)?)?;
            let values = TypedBuffer::from_bytes(dtype, raw_buffer(attr, raw_buffers, 1)?)?;
            if indices.len() != values.len() {
                return Err(PatchError::LengthMismatch {
                    attr: attr.clone(),
                    indices: indices.len(),
                    values: values.len(),
                });
            }

            let Some(existing) = target.buffer_mut(attr).filter(|buffer| !buffer.is_empty())
            else {
                warn!(
                    "Ignoring buffer_update for {:?}: target buffer is absent or empty",
                    attr
                );
                return Ok(false);
            };

            let mut skipped = 0;
            for i in 0..indices.len() {
                let (Some(index), Some(value)) = (indices.index_at(i), values.get_f64(i)) else {
                    skipped += 1;
                    continue;
                };
                if !existing.set_from_f64(index, value) {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                warn!(
                    "buffer_update for {:?} skipped {} out-of-range indices (target length {})",
                    attr,
                    skipped,
                    existing.len()
                );
            }
        }
    }
    on_commit();
    Ok(true)
}

fn raw_buffer<'a>(
    attr: &str,
    raw_buffers: &'a [Vec<u8>],
    index: usize,
) -> Result<&'a [u8], PatchError> {
    raw_buffers
        .get(index)
        .map(Vec::as_slice)
        .ok_or_else(|| PatchError::MissingBuffer {
            attr: attr.to_string(),
            index,
            available: raw_buffers.len(),
        })
}
