//! Console appender implementation
//!
//! Renders each record as one colorized line. The terminal's current colors
//! are process-wide state, so the sink and the style it is in live together
//! behind one mutex: setting the level style, writing the line and resetting
//! to the default style happen as a single critical section.

use crate::core::{format_display, Appender, LogLevel, LogRecord};
use colored::Color;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::io::{self, Stdout, Write};
use std::sync::{Arc, OnceLock};

/// SGR sequence restoring the terminal's default colors
pub const RESET_SEQUENCE: &str = "\x1b[0m";

/// Colors used for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub foreground: Color,
    pub background: Option<Color>,
}

/// Indexed by `LogLevel as usize`
const LEVEL_STYLES: [LevelStyle; 6] = [
    // Trace
    LevelStyle {
        foreground: Color::White,
        background: None,
    },
    // Debug
    LevelStyle {
        foreground: Color::Cyan,
        background: None,
    },
    // Info
    LevelStyle {
        foreground: Color::Yellow,
        background: None,
    },
    // Warning
    LevelStyle {
        foreground: Color::BrightYellow,
        background: None,
    },
    // Error
    LevelStyle {
        foreground: Color::Red,
        background: None,
    },
    // Fatal
    LevelStyle {
        foreground: Color::BrightWhite,
        background: Some(Color::Red),
    },
];

/// Style for a level missing from the table: Fatal's foreground, no highlight
pub const UNKNOWN_LEVEL_STYLE: LevelStyle = LevelStyle {
    foreground: Color::BrightWhite,
    background: None,
};

impl LevelStyle {
    pub fn for_level(level: LogLevel) -> Self {
        LEVEL_STYLES
            .get(level as usize)
            .copied()
            .unwrap_or(UNKNOWN_LEVEL_STYLE)
    }
}

/// Colors the sink is currently set to; `None` means the terminal default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl ConsoleStyle {
    pub fn is_default(&self) -> bool {
        *self == ConsoleStyle::default()
    }
}

struct ConsoleState<W> {
    sink: W,
    style: ConsoleStyle,
    use_colors: bool,
}

impl<W: Write> ConsoleState<W> {
    fn apply(&mut self, style: LevelStyle) -> io::Result<()> {
        let previous = std::mem::replace(
            &mut self.style,
            ConsoleStyle {
                foreground: Some(style.foreground),
                background: style.background,
            },
        );
        if !self.use_colors {
            return Ok(());
        }

        let mut sequence = String::new();
        // An earlier reset never reached the sink
        if !previous.is_default() {
            sequence.push_str(RESET_SEQUENCE);
        }
        sequence.push_str(&format!("\x1b[{}m", style.foreground.to_fg_str()));
        if let Some(background) = style.background {
            sequence.push_str(&format!("\x1b[{}m", background.to_bg_str()));
        }
        self.sink.write_all(sequence.as_bytes())
    }

    /// The tracked style only becomes the default once the reset sequence
    /// has actually reached the sink.
    fn reset(&mut self) -> io::Result<()> {
        if self.use_colors {
            self.sink.write_all(RESET_SEQUENCE.as_bytes())?;
        }
        self.style = ConsoleStyle::default();
        Ok(())
    }
}

/// Resets the sink to the default style when dropped, whatever happened while
/// it was held.
struct ResetGuard<'a, W: Write> {
    state: &'a mut ConsoleState<W>,
}

impl<W: Write> ResetGuard<'_, W> {
    /// The reset goes out before the newline: a Fatal background does not
    /// bleed into the next row, and nothing written to the terminal after
    /// the line ends picks up its color.
    fn write_line(&mut self, style: LevelStyle, line: &str) -> io::Result<()> {
        self.state.apply(style)?;
        self.state.sink.write_all(line.as_bytes())?;
        self.state.reset()?;
        self.state.sink.write_all(b"\n")?;
        self.state.sink.flush()
    }
}

impl<W: Write> Drop for ResetGuard<'_, W> {
    fn drop(&mut self) {
        if self.state.style.is_default() {
            return;
        }
        if let Err(err) = self.state.reset().and_then(|()| self.state.sink.flush()) {
            tracing::warn!(error = %err, "failed to reset console style");
        }
    }
}

/// Control characters other than tab; a tab keeps the line intact.
fn needs_escape(c: char) -> bool {
    c.is_control() && c != '\t'
}

/// Escape control characters so a record always occupies exactly one line and
/// cannot smuggle its own escape sequences onto the terminal.
fn escape_controls(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if needs_escape(c) {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Format a record as plain text, without colors or trailing newline.
///
/// # Examples
///
/// ```
/// use remote_console::appenders::console::format_line;
/// use remote_console::core::{LogLevel, LogRecord};
/// use chrono::DateTime;
///
/// let timestamp = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.678Z").unwrap();
/// let record = LogRecord::new(timestamp, LogLevel::Error, "net", "connection lost");
/// assert_eq!(
///     format_line(&record),
///     "2024-01-02 03:04:05.678 [E] <net>: connection lost"
/// );
/// ```
pub fn format_line(record: &LogRecord) -> String {
    format!(
        "{} [{}] <{}>: {}",
        format_display(&record.timestamp()),
        record.level().initial(),
        escape_controls(record.tag()),
        escape_controls(record.message())
    )
}

pub struct ConsoleAppender<W: Write = Stdout> {
    state: Mutex<ConsoleState<W>>,
}

static STDOUT_CONSOLE: OnceLock<Arc<ConsoleAppender<Stdout>>> = OnceLock::new();

impl ConsoleAppender<Stdout> {
    /// The process-wide stdout console.
    ///
    /// Every caller shares the same instance and therefore the same lock.
    /// Colors start enabled only when stdout is a terminal and
    /// `NO_COLOR`/`CLICOLOR` allow them.
    pub fn stdout() -> Arc<Self> {
        Arc::clone(STDOUT_CONSOLE.get_or_init(|| {
            let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();
            Arc::new(ConsoleAppender::with_sink(io::stdout(), use_colors))
        }))
    }
}

impl<W: Write> ConsoleAppender<W> {
    /// Wrap an arbitrary sink, e.g. a buffer in tests
    pub fn with_sink(sink: W, use_colors: bool) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                sink,
                style: ConsoleStyle::default(),
                use_colors,
            }),
        }
    }

    pub fn set_use_colors(&self, use_colors: bool) {
        self.state.lock().use_colors = use_colors;
    }

    pub fn use_colors(&self) -> bool {
        self.state.lock().use_colors
    }

    /// Style the sink is currently in
    pub fn current_style(&self) -> ConsoleStyle {
        self.state.lock().style
    }

    /// Inspect the sink while holding the console lock
    pub fn with_sink_ref<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.state.lock().sink)
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().sink
    }

    /// Write one record. Write failures are reported to the operator log;
    /// the style is reset regardless.
    pub fn render(&self, record: &LogRecord) {
        let line = format_line(record);
        let style = LevelStyle::for_level(record.level());

        let mut state = self.state.lock();
        let mut guard = ResetGuard { state: &mut *state };
        if let Err(err) = guard.write_line(style, &line) {
            tracing::warn!(error = %err, level = %record.level(), "failed to write log record");
        }
    }
}

impl<W: Write + Send> Appender for ConsoleAppender<W> {
    fn append(&self, record: &LogRecord) {
        self.render(record);
    }

    fn name(&self) -> &str {
        "console"
    }
}
