//! Core record types, decoding and errors

pub mod appender;
pub mod decoder;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod timestamp;

pub use appender::Appender;
pub use decoder::{decode, Decoder, RawLogRecord};
pub use error::{ConsoleError, Result};
pub use log_level::{LogLevel, LEVEL_TOKENS};
pub use log_record::{LogRecord, DEFAULT_MESSAGE, DEFAULT_TAG};
pub use timestamp::{format_display, parse_iso8601, DISPLAY_FORMAT};
