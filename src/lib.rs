//! # Remote Console
//!
//! A remote log sink: other processes POST structured log records over HTTP
//! and they are printed to this terminal, one colorized line per record.
//!
//! ## Pipeline
//!
//! - **Decoder**: raw request bytes to a fully populated [`LogRecord`]; only a
//!   body that is not a JSON object is rejected, missing fields get defaults
//! - **Renderer**: [`ConsoleAppender`] writes the record with level colors and
//!   always restores the terminal's default style afterwards
//! - **Transport**: a single `POST /` endpoint answering 204 or 400

pub mod appenders;
pub mod config;
pub mod core;
pub mod server;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleStyle, LevelStyle};
    pub use crate::config::{Cli, ServerConfig, DEFAULT_PORT};
    pub use crate::core::{
        decode, Appender, ConsoleError, Decoder, LogLevel, LogRecord, RawLogRecord, Result,
        DEFAULT_MESSAGE, DEFAULT_TAG,
    };
    pub use crate::server::{build_router, Ingest, Outcome};
}

pub use appenders::ConsoleAppender;
pub use config::{Cli, ServerConfig, DEFAULT_PORT};
pub use core::{
    decode, Appender, ConsoleError, Decoder, LogLevel, LogRecord, RawLogRecord, Result,
    DEFAULT_MESSAGE, DEFAULT_TAG,
};
pub use server::{build_router, Ingest, Outcome};
