//! Report artifact reader
//!
//! The scanner leaves a plaintext `key=value` file behind after uploading an
//! analysis. Only the `ceTaskUrl` entry matters here.

use crate::error::PollError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Key holding the analysis task URL
pub const CE_TASK_URL_KEY: &str = "ceTaskUrl";

/// Where the scanner writes the report when run from a Maven project
pub const DEFAULT_REPORT_PATH: &str = "target/sonar/report-task.txt";

/// URL of one analysis task on the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReference {
    url: String,
}

impl TaskReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract the task reference from report contents
///
/// Lines split on the first `=`. The first `ceTaskUrl` line wins; an empty
/// value counts as absent.
pub fn parse_task_reference(contents: &str) -> Option<TaskReference> {
    contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == CE_TASK_URL_KEY)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(TaskReference::new)
}

/// Read the task reference from the report artifact at `path`
pub fn read_task_reference(path: &Path) -> Result<TaskReference, PollError> {
    let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::InvalidData => PollError::ArtifactMalformed {
            path: path.to_path_buf(),
        },
        _ => PollError::ArtifactMissing {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let task = parse_task_reference(&contents).ok_or_else(|| PollError::ArtifactMalformed {
        path: path.to_path_buf(),
    })?;

    debug!(path = %path.display(), task_url = task.url(), "Read report artifact");
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extracts_task_url_and_ignores_other_keys() {
        let task = parse_task_reference("ceTaskUrl=https://example.com/task/123\nother=ignored").unwrap();
        assert_eq!(task.url(), "https://example.com/task/123");
    }

    #[test]
    fn test_value_keeps_embedded_equals() {
        let contents = "projectKey=com.example:app\n\
                        serverUrl=https://sonar.example.com\n\
                        ceTaskUrl=https://sonar.example.com/api/ce/task?id=AX1\r\n";
        let task = parse_task_reference(contents).unwrap();
        assert_eq!(task.url(), "https://sonar.example.com/api/ce/task?id=AX1");
    }

    #[test]
    fn test_key_must_match_exactly() {
        assert_eq!(parse_task_reference("ceTaskUrlOld=https://x\nceTaskId=AX1"), None);
        assert_eq!(parse_task_reference("ceTaskUrl"), None);
        assert_eq!(parse_task_reference("ceTaskUrl=   "), None);
        assert_eq!(parse_task_reference(""), None);
    }

    #[test]
    fn test_first_entry_wins() {
        let task = parse_task_reference("ceTaskUrl=https://a\nceTaskUrl=https://b").unwrap();
        assert_eq!(task.url(), "https://a");
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dashboardUrl=https://sonar/dashboard?id=app").unwrap();
        writeln!(file, "ceTaskUrl=https://sonar/api/ce/task?id=AX1").unwrap();

        let task = read_task_reference(file.path()).unwrap();
        assert_eq!(task.url(), "https://sonar/api/ce/task?id=AX1");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report-task.txt");

        let err = read_task_reference(&path).unwrap_err();
        assert!(matches!(err, PollError::ArtifactMissing { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_file_without_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "projectKey=app").unwrap();

        let err = read_task_reference(file.path()).unwrap_err();
        assert!(matches!(err, PollError::ArtifactMalformed { .. }));
    }
}
