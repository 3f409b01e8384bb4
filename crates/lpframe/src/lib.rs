//! Length-prefix a byte stream for a process that expects framed input.
//!
//! lpframe reads its input to completion and writes it back out as a single
//! frame: a 4-byte little-endian length followed by the payload. It is the
//! sending half of protocols such as browser native messaging, packaged as a
//! library and as the `lpframe` command.
//!
//! # Crate Structure
//!
//! - [`frame`]: the framer, the wire codec, and a reader for the receiving side

/// Re-export frame types.
pub mod frame {
    pub use lpframe_frame::*;
}
