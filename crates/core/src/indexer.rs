use crate::config::IndexerConfig;
use crate::document::build_document;
use crate::error::ConfigError;
use crate::extractor::{extract_file, Extraction};
use crate::publisher::Publisher;
use crate::throttle::Throttle;
use crate::traits::DocumentSink;
use crate::url_map::UrlMap;
use crate::walker::{CorpusFile, CorpusWalker};
use crate::{PublishOutcome, RunSummary};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Index the whole corpus described by `config`.
///
/// Returns an error only when the url map cannot be loaded. Every per-file
/// failure is logged and skipped.
pub async fn run<S, T>(
    config: &IndexerConfig,
    publisher: &Publisher<S, T>,
) -> Result<RunSummary, ConfigError>
where
    S: DocumentSink,
    T: Throttle,
{
    if !config.run_index {
        warn!("run_index is false, skipping indexing");
        return Ok(RunSummary::default());
    }

    let url_map_path = config.url_map_path();
    let url_map = UrlMap::load(&url_map_path)?;
    info!(
        path = %url_map_path.display(),
        entries = url_map.len(),
        "loaded url map"
    );

    Ok(index_corpus(&config.corpus_dir, &url_map, publisher).await)
}

pub async fn index_corpus<S, T>(
    root: &Path,
    url_map: &UrlMap,
    publisher: &Publisher<S, T>,
) -> RunSummary
where
    S: DocumentSink,
    T: Throttle,
{
    let mut summary = RunSummary::default();

    for file in CorpusWalker::new(root) {
        summary.files_visited += 1;
        if index_file(&file, url_map, publisher).await == Some(PublishOutcome::Published) {
            summary.documents_published += 1;
        }
    }

    summary
}

/// `None` when the file was skipped before anything was published.
pub async fn index_file<S, T>(
    file: &CorpusFile,
    url_map: &UrlMap,
    publisher: &Publisher<S, T>,
) -> Option<PublishOutcome>
where
    S: DocumentSink,
    T: Throttle,
{
    let fields = match extract_file(&file.path).await {
        Ok(Extraction::Extracted(fields)) => fields,
        Ok(Extraction::Skipped(reason)) => {
            debug!(path = %file.path.display(), reason = %reason, "skipping file");
            return None;
        }
        Err(err) => {
            error!(path = %file.path.display(), error = %err, "could not open file");
            return None;
        }
    };

    let target = file.target();
    let document = build_document(&fields, &target, url_map);
    Some(publisher.publish(&target, &document).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::RecordingSink;
    use crate::throttle::FixedDelay;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn publisher() -> Publisher<RecordingSink, FixedDelay> {
        Publisher::new(RecordingSink::new(), FixedDelay::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn disabled_run_skips_everything() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.html"), "<title>a</title>")?;
        let config = IndexerConfig::new(false, dir.path(), "missing.json", "http://localhost:9200")?;
        let publisher = publisher();

        let summary = run(&config, &publisher).await?;

        assert_eq!(summary, RunSummary::default());
        assert!(publisher.sink().writes().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unloadable_url_map_aborts_run() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.html"), "<title>a</title>")?;
        let config = IndexerConfig::new(true, dir.path(), "missing.json", "http://localhost:9200")?;
        let publisher = publisher();

        let result = run(&config, &publisher).await;

        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert!(publisher.sink().writes().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_root_publishes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let publisher = publisher();

        let summary = index_corpus(&dir.path().join("absent"), &UrlMap::default(), &publisher).await;

        assert_eq!(summary, RunSummary::default());
        assert!(publisher.sink().writes().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn files_without_title_are_not_published() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let root = dir.path().join("pages");
        fs::create_dir(&root)?;
        fs::write(root.join("a.html"), "<title>A</title><body>kept</body>")?;
        fs::write(root.join("b.html"), "<body>no title</body>")?;
        let publisher = publisher();

        let summary = index_corpus(&root, &UrlMap::default(), &publisher).await;

        assert_eq!(summary.files_visited, 2);
        assert_eq!(summary.documents_published, 1);
        let writes = publisher.sink().writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.file_name, "a.html");
        assert_eq!(writes[0].1.url, None);
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_file_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = CorpusFile {
            path: dir.path().join("vanished.html"),
            dir_name: "pages".to_string(),
            file_name: "vanished.html".to_string(),
        };
        let publisher = publisher();

        assert_eq!(index_file(&file, &UrlMap::default(), &publisher).await, None);
        assert!(publisher.sink().writes().is_empty());
        Ok(())
    }
}
