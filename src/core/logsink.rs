//! # Append-only error log for worker exits.
//!
//! [`ErrorLog`] writes one line per exit event:
//!
//! ```text
//! <timestamp>|pid:<pid>|code:<exitCode>|signal:<signal>
//! ```
//!
//! The file is opened lazily on the first exit and kept open for appends.
//! Open or write failures degrade observability only: they are swallowed so
//! restart handling always proceeds. An open failure is retried on the next
//! exit.

use std::path::PathBuf;

use chrono::Local;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Lazily-opened append sink for exit records.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    file: Option<File>,
}

impl ErrorLog {
    /// Creates a sink for `path` without touching the filesystem yet.
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }

    /// Appends one exit record; failures are swallowed.
    pub async fn append_exit(&mut self, pid: Option<u32>, code: i32, signal: Option<i32>) {
        let line = Self::format_line(pid, code, signal);

        if self.file.is_none() {
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await
            {
                Ok(f) => self.file = Some(f),
                Err(_) => return,
            }
        }

        if let Some(f) = self.file.as_mut() {
            let wrote = f.write_all(line.as_bytes()).await;
            let flushed = f.flush().await;
            if wrote.is_err() || flushed.is_err() {
                // Drop the broken file; the next exit retries the open.
                self.file = None;
            }
        }
    }

    fn format_line(pid: Option<u32>, code: i32, signal: Option<i32>) -> String {
        let pid = pid.map_or_else(|| "unknown".to_string(), |p| p.to_string());
        let signal = signal.map_or_else(|| "none".to_string(), |s| s.to_string());
        format!(
            "{}|pid:{}|code:{}|signal:{}\n",
            Local::now().to_rfc3339(),
            pid,
            code,
            signal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format_matches_contract() {
        let line = ErrorLog::format_line(Some(4242), 137, Some(9));
        let parts: Vec<&str> = line.trim_end().split('|').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], "pid:4242");
        assert_eq!(parts[2], "code:137");
        assert_eq!(parts[3], "signal:9");
    }

    #[test]
    fn missing_pid_and_signal_render_placeholders() {
        let line = ErrorLog::format_line(None, 1, None);
        assert!(line.contains("|pid:unknown|"));
        assert!(line.trim_end().ends_with("|signal:none"));
    }

    #[tokio::test]
    async fn appends_accumulate_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.log");
        let mut log = ErrorLog::new(path.clone());

        log.append_exit(Some(1), 0, None).await;
        log.append_exit(Some(2), 137, Some(9)).await;

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("pid:1|code:0|signal:none"));
        assert!(lines[1].contains("pid:2|code:137|signal:9"));
    }

    #[tokio::test]
    async fn unwritable_path_does_not_panic() {
        let mut log = ErrorLog::new(PathBuf::from("/nonexistent-dir/error.log"));
        log.append_exit(Some(1), 1, None).await;
    }
}
