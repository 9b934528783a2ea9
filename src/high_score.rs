//! High-score persistence: one unsigned integer as plain text.
//!
//! Reading never fails: an absent or unreadable file means no recorded high
//! score. Writing reports errors to the caller, which logs them.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Default file name, relative to the working directory
pub const DEFAULT_FILE: &str = "score.txt";

/// Recorded high score at `path`, 0 when there is none
pub fn read(path: &Path) -> u32 {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no high score file");
            return 0;
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read high score");
            return 0;
        }
    };

    match text.trim().parse() {
        Ok(score) => score,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring malformed high score");
            0
        }
    }
}

/// Store `score` at `path`, replacing any previous content
pub fn write(path: &Path, score: u32) -> Result<()> {
    fs::write(path, score.to_string())
        .with_context(|| format!("failed to write high score to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read(&dir.path().join("score.txt")), 0);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        write(&path, 1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1234");
        assert_eq!(read(&path), 1234);
    }

    #[test]
    fn test_garbage_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "lots").unwrap();
        assert_eq!(read(&path), 0);

        fs::write(&path, " 77\n").unwrap();
        assert_eq!(read(&path), 77);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("score.txt");
        assert!(write(&path, 1).is_err());
    }
}
