use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexDocument {
    /// `None` when the page is missing from the url map; serialized as `null`.
    pub url: Option<String>,
    pub title: Vec<String>,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishTarget {
    pub dir_name: String,
    pub file_name: String,
}

impl PublishTarget {
    pub fn new(dir_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self, index_name: &str) -> String {
        format!("{index_name}/{}/{}", self.dir_name, self.file_name)
    }
}

impl std::fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dir_name, self.file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_visited: usize,
    pub documents_published: usize,
}
