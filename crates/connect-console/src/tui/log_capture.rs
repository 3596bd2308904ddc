//! Keep warnings and errors emitted while the TUI is up.
//!
//! tui_logger only holds records in memory, so anything logged while the
//! alternate screen is active is gone once it closes. `LogCapture` keeps the
//! WARN and ERROR events in a bounded buffer and replays them on stderr after
//! the terminal is restored.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CapturedLog {
    level: Level,
    target: String,
    message: String,
}

/// Ring buffer of WARN/ERROR events, shared between the tracing layer and
/// the shell.
#[derive(Debug, Clone)]
pub struct LogCapture {
    buffer: Arc<Mutex<VecDeque<CapturedLog>>>,
    max_entries: usize,
}

impl LogCapture {
    pub fn new(max_entries: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<CapturedLog>> {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Print captured errors, then warnings, to stderr.
    pub fn print_to_stderr(&self) {
        let buffer = self.lock();
        if buffer.is_empty() {
            return;
        }

        for (title, level) in [("Errors", Level::ERROR), ("Warnings", Level::WARN)] {
            let logs: Vec<_> = buffer.iter().filter(|log| log.level == level).collect();
            if logs.is_empty() {
                continue;
            }
            eprintln!("\n=== {title} ({}) ===", logs.len());
            for log in logs {
                eprintln!("[{}] {}", log.target, log.message);
            }
        }
        eprintln!();
    }

    fn push(&self, log: CapturedLog) {
        let mut buffer = self.lock();
        if buffer.len() >= self.max_entries {
            buffer.pop_front();
        }
        buffer.push_back(log);
    }
}

/// Pulls the `message` field out of an event, or the first field if it has
/// none.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            write!(&mut self.message, "{value:?}").ok();
        } else {
            write!(&mut self.fields, " {}={value:?}", field.name()).ok();
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            write!(&mut self.fields, " {}={value}", field.name()).ok();
        }
    }
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

/// Tracing layer feeding a [`LogCapture`]
#[derive(Debug, Clone)]
pub struct LogCaptureLayer {
    capture: LogCapture,
}

impl LogCaptureLayer {
    pub fn new(capture: LogCapture) -> Self {
        Self { capture }
    }
}

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level != Level::ERROR && level != Level::WARN {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.capture.push(CapturedLog {
            level,
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::prelude::*;

    fn entry(level: Level, message: &str) -> CapturedLog {
        CapturedLog {
            level,
            target: "connect_console".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_buffer_keeps_latest() {
        let capture = LogCapture::new(2);
        for i in 0..4 {
            capture.push(entry(Level::WARN, &format!("warning {i}")));
        }

        let buffer = capture.lock();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].message, "warning 2");
        assert_eq!(buffer[1].message, "warning 3");
    }

    #[test]
    fn test_push_keeps_levels() {
        let capture = LogCapture::new(10);
        assert!(capture.lock().is_empty());

        capture.push(entry(Level::WARN, "slow"));
        capture.push(entry(Level::ERROR, "failed"));
        let levels: Vec<Level> = capture.lock().iter().map(|log| log.level).collect();
        assert_eq!(levels, vec![Level::WARN, Level::ERROR]);
    }

    #[test]
    fn test_layer_captures_only_warn_and_error() {
        let capture = LogCapture::new(10);
        let subscriber =
            tracing_subscriber::registry().with(LogCaptureLayer::new(capture.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("loaded");
            tracing::warn!(queue_id = "q-1", "Batch call failed");
            tracing::error!("boom");
        });

        let buffer = capture.lock();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0].message, "Batch call failed queue_id=q-1");
        assert_eq!(buffer[1].level, Level::ERROR);
    }
}
