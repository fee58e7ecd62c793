//! Appender implementations

pub mod console;

pub use console::{format_line, ConsoleAppender, ConsoleStyle, LevelStyle};

// Re-export trait for convenience
pub use crate::core::Appender;
