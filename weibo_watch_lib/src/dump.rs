//! Places to keep raw responses that need a postmortem.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Stores a raw response and hands back something a human can find it by.
pub trait DumpSink: Send + Sync {
    fn dump(&self, text: &str) -> io::Result<String>;
}

/// Writes each dump to its own file under a directory.
pub struct FileDumpSink {
    dir: PathBuf,
    seq: AtomicU64,
}

impl FileDumpSink {
    /// The directory is created on first dump, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seq: AtomicU64::new(0),
        }
    }
}

impl DumpSink for FileDumpSink {
    fn dump(&self, text: &str) -> io::Result<String> {
        fs::create_dir_all(&self.dir)?;
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("{}-{}.html", millis, seq));
        fs::write(&path, text)?;
        Ok(path.display().to_string())
    }
}

/// Keeps dumps in memory. Handy for tests and for embedding callers that
/// ship dumps elsewhere themselves.
#[derive(Default)]
pub struct MemoryDumpSink {
    dumps: Mutex<Vec<String>>,
}

impl MemoryDumpSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dumps(&self) -> Vec<String> {
        self.dumps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DumpSink for MemoryDumpSink {
    fn dump(&self, text: &str) -> io::Result<String> {
        let mut dumps = self.dumps.lock().unwrap_or_else(|e| e.into_inner());
        dumps.push(text.to_string());
        Ok(format!("memory:{}", dumps.len() - 1))
    }
}

impl<T: DumpSink + ?Sized> DumpSink for std::sync::Arc<T> {
    fn dump(&self, text: &str) -> io::Result<String> {
        (**self).dump(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "weibo-watch-{}-{}-{}",
            name,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[test]
    fn file_sink_writes_distinct_files() {
        let dir = scratch_dir("dump");
        let sink = FileDumpSink::new(&dir);

        let first = sink.dump("<html>one</html>").unwrap();
        let second = sink.dump("<html>two</html>").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with(&dir.display().to_string()));
        assert_eq!(fs::read_to_string(&first).unwrap(), "<html>one</html>");
        assert_eq!(fs::read_to_string(&second).unwrap(), "<html>two</html>");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_sink_reports_unwritable_dir() {
        let dir = scratch_dir("blocked");
        fs::write(&dir, "a file, not a directory").unwrap();
        let sink = FileDumpSink::new(dir.join("sub"));

        assert!(sink.dump("x").is_err());

        fs::remove_file(&dir).unwrap();
    }

    #[test]
    fn memory_sink_numbers_dumps() {
        let sink = MemoryDumpSink::new();
        assert_eq!(sink.dump("a").unwrap(), "memory:0");
        assert_eq!(sink.dump("b").unwrap(), "memory:1");
        assert_eq!(sink.dumps(), vec!["a".to_string(), "b".to_string()]);
    }
}
