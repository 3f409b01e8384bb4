use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use crate::codec::{decode_frame, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally; callers always get whole payloads.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame's payload (blocking).
    ///
    /// Returns `Err(FrameError::Incomplete)` when end-of-stream is reached
    /// before a whole frame is buffered.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        loop {
            if let Some(payload) = decode_frame(&mut self.buf, self.config.effective_max())? {
                return Ok(payload);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Read(err)),
            };

            if read == 0 {
                return Err(FrameError::Incomplete {
                    expected: self.expected_len(),
                    actual: self.buf.len(),
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Bytes buffered but not yet returned as part of a frame.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn expected_len(&self) -> usize {
        match self.buf.get(..HEADER_SIZE) {
            Some(h) => HEADER_SIZE + u32::from_le_bytes([h[0], h[1], h[2], h[3]]) as usize,
            None => HEADER_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use bytes::BufMut;

    use super::*;
    use crate::codec::encode_frame;
    use crate::framer::frame;

    #[test]
    fn read_single_frame() {
        let mut wire = BytesMut::new();
        encode_frame(b"hello", &mut wire).unwrap();

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        let payload = reader.read_frame().unwrap();

        assert_eq!(payload.as_ref(), b"hello");
        assert!(reader.buffered().is_empty());
    }

    #[test]
    fn reads_what_the_framer_wrote() {
        let mut wire = Vec::new();
        frame(&b"{\"type\":\"getVersion\"}"[..], &mut wire).unwrap();

        let mut reader = FrameReader::new(Cursor::new(wire));
        let payload = reader.read_frame().unwrap();

        assert_eq!(payload.as_ref(), b"{\"type\":\"getVersion\"}");
    }

    #[test]
    fn read_empty_frame() {
        let mut reader = FrameReader::new(Cursor::new(vec![0u8; 4]));
        let payload = reader.read_frame().unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn read_frame_across_partial_reads() {
        let mut wire = BytesMut::new();
        encode_frame(b"split payload", &mut wire).unwrap();

        let mut reader = FrameReader::new(Trickle {
            data: wire.to_vec(),
            pos: 0,
            step: 3,
        });
        let payload = reader.read_frame().unwrap();

        assert_eq!(payload.as_ref(), b"split payload");
    }

    #[test]
    fn eof_before_header_is_incomplete() {
        let mut reader = FrameReader::new(Cursor::new(Vec::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(
            err,
            FrameError::Incomplete {
                expected: 4,
                actual: 0
            }
        ));
    }

    #[test]
    fn eof_mid_payload_is_incomplete() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(10);
        wire.put_slice(b"abc");

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        let err = reader.read_frame().unwrap_err();

        assert!(matches!(
            err,
            FrameError::Incomplete {
                expected: 14,
                actual: 7
            }
        ));
    }

    #[test]
    fn oversize_header_rejected() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(64);

        let cfg = FrameConfig {
            max_payload_size: 8,
        };
        let mut reader = FrameReader::with_config(Cursor::new(wire.to_vec()), cfg);

        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 64, max: 8 }));
    }

    #[test]
    fn read_failure_propagates() {
        let mut reader = FrameReader::new(Broken);
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Read(_)));
    }

    #[test]
    fn trailing_bytes_stay_buffered() {
        let mut wire = BytesMut::new();
        encode_frame(b"one", &mut wire).unwrap();
        wire.put_slice(b"xy");

        let mut reader = FrameReader::new(Cursor::new(wire.to_vec()));
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"one");
        assert_eq!(reader.buffered(), b"xy");

        let _ = reader.get_ref();
        let _inner = reader.into_inner();
    }

    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let end = (self.pos + self.step).min(self.data.len());
            let n = (end - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device error"))
        }
    }
}
