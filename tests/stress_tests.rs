//! Stress tests for concurrent rendering
//!
//! These tests verify:
//! - Concurrent renders never interleave inside a line
//! - Every line carries its own level's colors and resets before its newline
//! - Concurrent requests through the ingest path are all accepted

use remote_console::appenders::{ConsoleAppender, LevelStyle};
use remote_console::core::LogLevel;
use remote_console::{Ingest, Outcome};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const RECORDS_PER_THREAD: usize = 200;

#[test]
fn test_concurrent_renders_stay_intact() {
    let console = Arc::new(ConsoleAppender::with_sink(Vec::new(), true));
    let ingest = Ingest::new(console.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let ingest = ingest.clone();
            thread::spawn(move || {
                let level = LogLevel::ALL[thread_index % LogLevel::ALL.len()];
                for i in 0..RECORDS_PER_THREAD {
                    let body = format!(
                        r#"{{"timestamp":"2024-01-02T03:04:05.678Z","logLevel":"{}","tag":"worker-{}","message":"record {}"}}"#,
                        level.token(),
                        thread_index,
                        i
                    );
                    assert_eq!(ingest.handle(body.as_bytes()), Outcome::Accepted);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert!(console.current_style().is_default());

    let output = console.with_sink_ref(|sink| String::from_utf8(sink.clone()).unwrap());
    let chunks: Vec<&str> = output.split_inclusive('\n').collect();
    assert_eq!(chunks.len(), THREADS * RECORDS_PER_THREAD);

    for chunk in chunks {
        let worker: usize = chunk
            .split("<worker-")
            .nth(1)
            .and_then(|rest| rest.split('>').next())
            .and_then(|index| index.parse().ok())
            .expect("chunk names its worker");
        let level = LogLevel::ALL[worker % LogLevel::ALL.len()];
        let style = LevelStyle::for_level(level);

        let mut prefix = format!("\x1b[{}m", style.foreground.to_fg_str());
        if let Some(background) = style.background {
            prefix.push_str(&format!("\x1b[{}m", background.to_bg_str()));
        }

        assert!(chunk.starts_with(&prefix), "wrong colors: {:?}", chunk);
        assert!(chunk.ends_with("\x1b[0m\n"), "line split: {:?}", chunk);
        assert_eq!(chunk.matches('\n').count(), 1);
        assert!(chunk.contains(&format!(" [{}] ", level.initial())));
    }
}

#[test]
fn test_concurrent_rejections_render_nothing() {
    let console = Arc::new(ConsoleAppender::with_sink(Vec::new(), true));
    let ingest = Ingest::new(console.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ingest = ingest.clone();
            thread::spawn(move || {
                for _ in 0..RECORDS_PER_THREAD {
                    assert_eq!(ingest.handle(b"[1,2,3]"), Outcome::Rejected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert!(console.with_sink_ref(Vec::is_empty));
}
