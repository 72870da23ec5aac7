//! Scan progress reporting.
//!
//! Reports observable progress while a corpus is walked and parsed, so
//! users of large wikis see what is happening before the report prints.
//! Progress is emitted on **stderr** so stdout remains the report alone.

use std::io::Write;

/// A single progress event for a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanProgressEvent {
    /// Walking the root directory. Total unknown.
    Discovering { root: String },
    /// Parsing: n files processed out of total.
    Parsing { n: u64, total: u64 },
    /// A file or directory was skipped; the scan continues.
    Skipped { path: String, reason: String },
}

/// Reports scan progress. Implementations write to stderr (human or JSON).
pub trait ScanProgressReporter: Send + Sync {
    /// Emit a progress event. Called from the scanner.
    fn report(&self, event: ScanProgressEvent);
}

/// Human-friendly progress on stderr, one line per event:
///
/// ```text
/// scan docs  walking
/// scan  skipped  broken.md (stream did not contain valid UTF-8)
/// scan  parsed   1,200 / 1,342 documents
/// ```
pub struct StderrProgress;

impl StderrProgress {
    fn line(event: &ScanProgressEvent) -> String {
        match event {
            ScanProgressEvent::Discovering { root } => format!("scan {}  walking", root),
            ScanProgressEvent::Parsing { n, total } => format!(
                "scan  parsed   {} / {} documents",
                format_number(*n),
                format_number(*total)
            ),
            ScanProgressEvent::Skipped { path, reason } => {
                format!("scan  skipped  {} ({})", path, reason)
            }
        }
    }
}

impl ScanProgressReporter for StderrProgress {
    fn report(&self, event: ScanProgressEvent) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", Self::line(&event));
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl JsonProgress {
    fn value(event: &ScanProgressEvent) -> serde_json::Value {
        match event {
            ScanProgressEvent::Discovering { root } => serde_json::json!({
                "event": "scan",
                "phase": "walking",
                "root": root
            }),
            ScanProgressEvent::Parsing { n, total } => serde_json::json!({
                "event": "scan",
                "phase": "parsing",
                "n": n,
                "total": total
            }),
            ScanProgressEvent::Skipped { path, reason } => serde_json::json!({
                "event": "skipped",
                "path": path,
                "reason": reason
            }),
        }
    }
}

impl ScanProgressReporter for JsonProgress {
    fn report(&self, event: ScanProgressEvent) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", Self::value(&event));
        let _ = stderr.flush();
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ScanProgressReporter for NoProgress {
    fn report(&self, _event: ScanProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode. Caller passes it to the scanner.
    pub fn reporter(&self) -> Box<dyn ScanProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
