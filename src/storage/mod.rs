//! Append-only CSV post log
//!
//! One row per pipeline attempt, fields quoted and escaped per standard
//! CSV rules. The header row is written exactly once, when the log file
//! does not yet exist or is empty; rows are never rewritten or deleted.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::PostAttempt;

/// Column order of the post log
const HEADER: [&str; 4] = ["timestamp", "original", "paraphrased", "tweet_url"];

/// Append-only CSV recorder
pub struct PostLog {
    path: PathBuf,
}

impl PostLog {
    /// Create a recorder for the log at `path`
    ///
    /// The file itself is created lazily on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one attempt as a single row
    ///
    /// Writes the header first when the file is new or empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` when the file cannot be opened or
    /// flushed, `StorageError::Csv` when a row cannot be written.
    pub fn append(&self, attempt: &PostAttempt) -> Result<(), StorageError> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::Writer::from_writer(file);

        if needs_header {
            writer.write_record(HEADER)?;
        }

        writer.write_record([
            attempt.timestamp.as_str(),
            attempt.original.as_str(),
            attempt.paraphrased.as_str(),
            attempt.tweet_url.as_str(),
        ])?;

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(tweet_url: &str) -> PostAttempt {
        PostAttempt::new(
            "Title\nExcerpt.".to_string(),
            "Paraphrased #NigeriaNews".to_string(),
            tweet_url.to_string(),
        )
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = PostLog::new(dir.path().join("log.csv"));

        log.append(&attempt("https://twitter.com/user/status/1"))
            .unwrap();
        log.append(&attempt("")).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("timestamp,original").count(), 1);
    }

    #[test]
    fn test_rows_have_four_fields() {
        let dir = tempfile::tempdir().unwrap();
        let log = PostLog::new(dir.path().join("log.csv"));
        log.append(&attempt("")).unwrap();

        let mut reader = csv::Reader::from_path(log.path()).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 4);
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), 4);
        }
    }

    #[test]
    fn test_embedded_newline_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let log = PostLog::new(dir.path().join("log.csv"));
        log.append(&attempt("")).unwrap();

        let mut reader = csv::Reader::from_path(log.path()).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Title\nExcerpt.");
        assert_eq!(&record[3], "");
    }

    #[test]
    fn test_no_header_added_to_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "timestamp,original,paraphrased,tweet_url\n").unwrap();

        let log = PostLog::new(&path);
        log.append(&attempt("")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("timestamp,original").count(), 1);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A directory is not a valid log file
        let log = PostLog::new(dir.path());
        let result = log.append(&attempt(""));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
