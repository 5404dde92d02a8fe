use crate::config::node_name;
use crate::models::PublishTarget;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub path: PathBuf,
    /// Name of the directory that listed this file. Only the immediate
    /// parent is kept, so url map keys never carry more than two segments.
    pub dir_name: String,
    pub file_name: String,
}

impl CorpusFile {
    pub fn target(&self) -> PublishTarget {
        PublishTarget::new(&self.dir_name, &self.file_name)
    }
}

/// Pre-order walk, sorted by name within each directory. Unreadable or
/// unsupported nodes are logged and skipped.
pub struct CorpusWalker {
    root_name: String,
    entries: Option<walkdir::IntoIter>,
}

impl CorpusWalker {
    pub fn new(root: &Path) -> Self {
        if !root.exists() {
            warn!(path = %root.display(), "corpus path does not exist");
            return Self {
                root_name: String::new(),
                entries: None,
            };
        }

        Self {
            root_name: node_name(root),
            entries: Some(
                WalkDir::new(root)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter(),
            ),
        }
    }
}

impl Iterator for CorpusWalker {
    type Item = CorpusFile;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries.as_mut()?;

        loop {
            let entry = match entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|path| path.display().to_string())
                        .unwrap_or_default();
                    warn!(path = %path, error = %err, "skipping unreadable corpus node");
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                warn!(path = %entry.path().display(), "corpus node is neither a directory nor a file");
                continue;
            }

            let dir_name = if entry.depth() == 0 {
                self.root_name.clone()
            } else {
                entry.path().parent().map(node_name).unwrap_or_default()
            };

            return Some(CorpusFile {
                path: entry.path().to_path_buf(),
                dir_name,
                file_name: entry.file_name().to_string_lossy().to_string(),
            });
        }
    }
}
