//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, Local};

/// Tag used when the payload carries none
pub const DEFAULT_TAG: &str = "unknown";

/// Message used when the payload carries none
pub const DEFAULT_MESSAGE: &str = "no message";

/// One remote log event, always fully populated.
///
/// The timestamp keeps the offset it was sent with so that rendering shows the
/// sender's wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: DateTime<FixedOffset>,
    level: LogLevel,
    tag: String,
    message: String,
}

impl LogRecord {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogLevel,
        tag: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level,
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// A record stamped with the current local time
    pub fn now(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Local::now().fixed_offset(), level, tag, message)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
