//! Application telemetry events and sinks.
//!
//! Banter is a small automation tool, but it still benefits from lightweight
//! telemetry to support debugging and to capture operational signals such as
//! which personas were published or skipped on each run.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by Banter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A new discussion was created for a post.
    DiscussionCreated {
        /// Discussion title (the post title).
        title: String,
        /// HTML URL of the new discussion.
        url: String,
    },
    /// A persona's comment was published.
    CommentPublished {
        /// Persona display name.
        persona: String,
        /// HTML URL of the discussion commented on.
        discussion_url: String,
    },
    /// A persona was skipped because it had already commented.
    PersonaSkipped {
        /// Persona display name.
        persona: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
