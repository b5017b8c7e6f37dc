//! JSONL file writer for orchestration events.
//!
//! Each [`OrchestraEvent`] is serialized as a single JSON line carrying its
//! `type` tag plus a `timestamp`, appended to the file via a buffered writer.

use orchestra_application::EventListener;
use orchestra_domain::OrchestraEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Open a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: &OrchestraEvent) -> Option<serde_json::Value> {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    match serde_json::to_value(event) {
        Ok(serde_json::Value::Object(mut map)) => {
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            Some(serde_json::Value::Object(map))
        }
        Ok(other) => Some(serde_json::json!({
            "type": event.name(),
            "timestamp": timestamp,
            "data": other,
        })),
        Err(e) => {
            warn!("Could not serialize {} event: {}", event.name(), e);
            None
        }
    }
}

impl EventListener for JsonlEventLogger {
    fn on_event(&self, event: &OrchestraEvent) {
        let Some(line) = record(event).and_then(|r| serde_json::to_string(&r).ok()) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Append-only, flush every line for crash safety
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestra_domain::{DebateRound, Response};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.on_event(&OrchestraEvent::ProviderAdded {
            name: "openai".into(),
        });
        logger.on_event(&OrchestraEvent::DebateRound(DebateRound::new(
            1,
            vec![Response::new("a", "Use Postgres")],
            1.0,
        )));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "provider:added");
        assert_eq!(lines[0]["name"], "openai");

        assert_eq!(lines[1]["type"], "debate:round");
        assert_eq!(lines[1]["round"], 1);
        assert_eq!(lines[1]["arguments"][0]["provider"], "a");
    }

    #[test]
    fn test_jsonl_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");

        for name in ["a", "b"] {
            let logger = JsonlEventLogger::new(&path).unwrap();
            logger.on_event(&OrchestraEvent::ProviderRemoved { name: name.into() });
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["name"], "a");
        assert_eq!(lines[1]["name"], "b");
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlEventLogger::new(blocker.join("events.jsonl")).is_none());
    }
}
