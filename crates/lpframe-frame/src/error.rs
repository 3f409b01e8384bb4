/// Errors that can occur while framing or reading back a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The input stream failed before end-of-stream.
    #[error("failed reading input: {0}")]
    Read(#[source] std::io::Error),

    /// The output stream failed while writing or flushing the frame.
    #[error("failed writing output: {0}")]
    Write(#[source] std::io::Error),

    /// The output stream stopped accepting bytes.
    #[error("output closed (zero-length write)")]
    OutputClosed,

    /// The payload does not fit the header or exceeds the configured maximum.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The stream ended before a complete frame was received.
    #[error("incomplete frame (expected {expected} bytes, got {actual})")]
    Incomplete { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
