use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_INDEX_NAME: &str = "html_index";
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// When false the run only logs a warning.
    pub run_index: bool,
    pub corpus_dir: PathBuf,
    pub url_map_file: String,
    pub index_endpoint: Url,
    pub index_name: String,
    pub throttle: Duration,
}

impl IndexerConfig {
    pub fn new(
        run_index: bool,
        corpus_dir: impl Into<PathBuf>,
        url_map_file: impl Into<String>,
        index_endpoint: &str,
    ) -> Result<Self, ConfigError> {
        let index_endpoint = Url::parse(index_endpoint)
            .map_err(|error| ConfigError::InvalidEndpoint(format!("{index_endpoint}: {error}")))?;

        if index_endpoint.cannot_be_a_base() {
            return Err(ConfigError::InvalidEndpoint(index_endpoint.to_string()));
        }

        let url_map_file = url_map_file.into();
        if url_map_file.trim().is_empty() {
            return Err(ConfigError::InvalidArgument(
                "url map file name is empty".to_string(),
            ));
        }

        Ok(Self {
            run_index,
            corpus_dir: corpus_dir.into(),
            url_map_file,
            index_endpoint,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            throttle: DEFAULT_THROTTLE,
        })
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn url_map_path(&self) -> PathBuf {
        self.corpus_dir.join(&self.url_map_file)
    }

    pub fn root_dir_name(&self) -> String {
        node_name(&self.corpus_dir)
    }
}

/// Final path component, falling back to the canonical path's name for
/// inputs such as `.` or `..`.
pub fn node_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().to_string();
    }

    path.canonicalize()
        .ok()
        .and_then(|canonical| {
            canonical
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .unwrap_or_default()
}
