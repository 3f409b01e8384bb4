use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, BytesMut};
use tracing::{debug, warn};

use crate::codec::{encode_header, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// What a successful [`Framer::frame`] call put on the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    /// Payload bytes drained from the input (the header value).
    pub payload_len: usize,
}

impl FrameSummary {
    /// Total bytes written to the output (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload_len
    }
}

/// Drains a `Read` stream and writes it to a `Write` stream as one frame.
///
/// The whole input is buffered before anything is written, so a failing or
/// oversized input never produces output.
#[derive(Debug, Clone, Default)]
pub struct Framer {
    config: FrameConfig,
}

impl Framer {
    /// Create a framer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a framer with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self { config }
    }

    /// Read `input` to end-of-stream, then write the length header and the
    /// payload to `output` and flush it.
    pub fn frame<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<FrameSummary> {
        let buf = self.accumulate(&mut input)?;
        emit(buf, &mut output)
    }

    /// Update maximum payload size for subsequent calls.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current framer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    // The returned buffer starts with HEADER_SIZE placeholder bytes.
    fn accumulate<R: Read>(&self, input: &mut R) -> Result<BytesMut> {
        let max = self.config.effective_max();
        let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
        buf.put_bytes(0, HEADER_SIZE);

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            let read = match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Read(err)),
            };

            // Bytes seen so far, not the full input: reading stops here.
            let size = buf.len() - HEADER_SIZE + read;
            if size > max {
                warn!(size, max, "payload exceeds maximum, nothing written");
                return Err(FrameError::PayloadTooLarge { size, max });
            }

            buf.extend_from_slice(&chunk[..read]);
        }

        debug!(payload_len = buf.len() - HEADER_SIZE, "input drained");
        Ok(buf)
    }
}

/// Frame `input` onto `output` with the default configuration.
pub fn frame<R: Read, W: Write>(input: R, output: W) -> Result<FrameSummary> {
    Framer::new().frame(input, output)
}

fn emit<W: Write>(mut buf: BytesMut, output: &mut W) -> Result<FrameSummary> {
    let payload_len = buf.len() - HEADER_SIZE;
    let header = encode_header(payload_len)?;
    buf[..HEADER_SIZE].copy_from_slice(&header);

    write_all(output, &buf)?;
    flush(output)?;

    let summary = FrameSummary { payload_len };
    debug!(wire_size = summary.wire_size(), "frame written");
    Ok(summary)
}

fn write_all<W: Write>(output: &mut W, buf: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < buf.len() {
        match output.write(&buf[offset..]) {
            Ok(0) => return Err(FrameError::OutputClosed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(FrameError::Write(err)),
        }
    }
    Ok(())
}

fn flush<W: Write>(output: &mut W) -> Result<()> {
    loop {
        match output.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(FrameError::Write(err)),
        }
    }
}
