//! The one asynchronous step: fetching and parsing the dataset document.
//!
//! No retries and no partial results. A failed fetch or a malformed document
//! is returned as a [`LoadError`] and the caller is expected to stop.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use grid_schema::Dataset;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the dataset document comes from.
pub trait DatasetSource {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// Reads the document from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> impl Future<Output = Result<String, LoadError>> + Send {
        let path = self.path.clone();
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(document) => Ok(document),
                Err(source) => Err(LoadError::Read { path, source }),
            }
        }
    }
}

/// An in-memory document, e.g. one embedded with `include_str!`.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    document: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
        }
    }
}

impl DatasetSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> impl Future<Output = Result<String, LoadError>> + Send {
        let document = self.document.clone();
        async move { Ok(document) }
    }
}

/// Fetch once and parse. Logs the outcome either way.
pub async fn load_dataset<S: DatasetSource>(source: &S) -> Result<Dataset, LoadError> {
    let location = source.describe();
    let result = match source.fetch().await {
        Ok(document) => Dataset::from_json_str(&document).map_err(LoadError::from),
        Err(err) => Err(err),
    };
    match &result {
        Ok(dataset) => tracing::info!(
            target: "grid_dashboard::loader",
            source = %location,
            regions = dataset.regions.len(),
            timeline_points = dataset.timeline.labels.len(),
            "dataset.loaded"
        ),
        Err(err) => tracing::error!(
            target: "grid_dashboard::loader",
            source = %location,
            error = %err,
            "dataset.load_failed"
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "regions": [],
        "summary": { "totalUnderReview": 1, "totalContracted": 2, "totalConnected": 3 },
        "timeline": { "labels": [], "totalUnderReview": [] }
    }"#;

    #[tokio::test]
    async fn static_source_round_trips() {
        let dataset = load_dataset(&StaticSource::new("inline", DOCUMENT))
            .await
            .expect("document parses");
        assert_eq!(dataset.summary.total_connected, 3.0);
        assert!(dataset.regions.is_empty());
    }

    #[tokio::test]
    async fn malformed_document_fails_fast() {
        let err = load_dataset(&StaticSource::new("inline", "{ not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let source = FileSource::new("does/not/exist.json");
        let err = load_dataset(&source).await.unwrap_err();
        match err {
            LoadError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("does/not/exist.json"));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
