//! Whole-stream length-prefixed framing.
//!
//! An input stream is drained to end-of-stream and re-emitted as a single
//! frame:
//! - A 4-byte little-endian unsigned payload length
//! - The payload bytes, verbatim
//!
//! No version byte, no checksum, no terminator. The header is the only
//! framing signal.

pub mod codec;
pub mod error;
pub mod framer;
pub mod reader;

pub use codec::{decode_frame, encode_frame, encode_header, FrameConfig, HEADER_SIZE, MAX_PAYLOAD};
pub use error::{FrameError, Result};
pub use framer::{frame, FrameSummary, Framer};
pub use reader::FrameReader;
