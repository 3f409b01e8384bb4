use std::fmt;
use std::io;

use lpframe::frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::BrokenPipe | io::ErrorKind::UnexpectedEof => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(err: FrameError) -> CliError {
    match err {
        FrameError::Read(source) => io_error("failed reading stdin", source),
        FrameError::Write(source) => io_error("failed writing stdout", source),
        FrameError::OutputClosed => CliError::new(FAILURE, format!("stdout: {err}")),
        FrameError::PayloadTooLarge { .. } => CliError::new(DATA_INVALID, format!("stdin: {err}")),
        other => CliError::new(INTERNAL, other.to_string()),
    }
}
