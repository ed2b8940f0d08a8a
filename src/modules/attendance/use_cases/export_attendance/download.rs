use crate::modules::attendance::use_cases::export_attendance::errors::ExportError;
use crate::shared::core::primitives::CanonicalDate;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

pub const CSV_MIME_TYPE: &str = "text/csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportFile {
    pub fn csv_for(date: CanonicalDate, content: String) -> Self {
        Self {
            filename: format!("attendance_{date}.csv"),
            mime_type: CSV_MIME_TYPE,
            content,
        }
    }
}

/// Where a finished export goes once serialization is done.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Returns a locator for the delivered file.
    async fn deliver(&self, file: &ExportFile) -> Result<String, ExportError>;
}

pub struct DirectoryDownloadSink {
    directory: PathBuf,
}

impl DirectoryDownloadSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl DownloadSink for DirectoryDownloadSink {
    async fn deliver(&self, file: &ExportFile) -> Result<String, ExportError> {
        let path = self.directory.join(&file.filename);
        let shown = path.display().to_string();
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| ExportError::Save {
                path: shown.clone(),
                source,
            })?;
        tokio::fs::write(&path, file.content.as_bytes())
            .await
            .map_err(|source| ExportError::Save {
                path: shown.clone(),
                source,
            })?;
        Ok(shown)
    }
}

#[cfg(test)]
mod directory_download_sink_tests {
    use super::*;
    use crate::tests::fixtures::attendance::day;
    use rstest::rstest;

    #[rstest]
    fn it_should_name_the_file_after_the_canonical_date() {
        let file = ExportFile::csv_for(day("2026-10-14"), String::new());
        assert_eq!(file.filename, "attendance_2026-10-14.csv");
        assert_eq!(file.mime_type, "text/csv");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_write_the_file_into_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloadSink::new(dir.path().join("exports"));
        let file = ExportFile::csv_for(day("2026-10-14"), "Roll Number\n".to_string());

        let location = sink.deliver(&file).await.expect("deliver failed");

        let written = std::fs::read_to_string(&location).unwrap();
        assert_eq!(written, "Roll Number\n");
        assert!(location.ends_with("attendance_2026-10-14.csv"));
    }
}
