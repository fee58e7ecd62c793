//! Appender trait for decoded record destinations

use super::log_record::LogRecord;

/// Destination for decoded records.
///
/// Appending never fails from the caller's point of view: an appender that
/// cannot write reports the problem through operator logging and returns.
pub trait Appender: Send + Sync {
    fn append(&self, record: &LogRecord);
    fn name(&self) -> &str;
}
