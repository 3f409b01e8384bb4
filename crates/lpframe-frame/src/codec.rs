use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: little-endian u32 payload length = 4 bytes.
pub const HEADER_SIZE: usize = 4;

/// Largest payload the header can describe.
pub const MAX_PAYLOAD: usize = u32::MAX as usize;

/// Encode the header for a payload of `len` bytes.
///
/// Lengths that do not fit in a `u32` are rejected rather than wrapped.
pub fn encode_header(len: usize) -> Result<[u8; HEADER_SIZE]> {
    let len = u32::try_from(len).map_err(|_| FrameError::PayloadTooLarge {
        size: len,
        max: MAX_PAYLOAD,
    })?;
    Ok(len.to_le_bytes())
}

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬──────────────────┐
/// │ Length       │ Payload          │
/// │ (4B LE u32)  │ (Length bytes)   │
/// └──────────────┴──────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let header = encode_header(payload.len())?;
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_slice(&header);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer and returns the payload.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Bytes>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let payload_len = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;
    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    if src.len() < HEADER_SIZE + payload_len {
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    Ok(Some(src.split_to(payload_len).freeze()))
}

/// Configuration shared by the framer and the frame reader.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: [`MAX_PAYLOAD`].
    pub max_payload_size: usize,
}

impl FrameConfig {
    /// The configured maximum, clamped to what the header can describe.
    pub fn effective_max(&self) -> usize {
        self.max_payload_size.min(MAX_PAYLOAD)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
        }
    }
}
