use crate::traits::DocumentSink;
use crate::{IndexDocument, PublishError, PublishTarget};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    writes: Arc<Mutex<Vec<(PublishTarget, IndexDocument)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<(PublishTarget, IndexDocument)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current record per target, last write wins.
    pub fn documents(&self) -> HashMap<PublishTarget, IndexDocument> {
        self.writes().into_iter().collect()
    }
}

#[async_trait]
impl DocumentSink for RecordingSink {
    async fn put_document(
        &self,
        target: &PublishTarget,
        document: &IndexDocument,
    ) -> Result<(), PublishError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((target.clone(), document.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(token: &str) -> IndexDocument {
        IndexDocument {
            url: None,
            title: Vec::new(),
            tokens: vec![token.to_string()],
        }
    }

    #[tokio::test]
    async fn republishing_overwrites_target() -> Result<(), PublishError> {
        let sink = RecordingSink::new();
        let target = PublishTarget::new("pages", "a.html");

        sink.put_document(&target, &document("first")).await?;
        sink.put_document(&target, &document("second")).await?;

        assert_eq!(sink.writes().len(), 2);
        let documents = sink.documents();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[&target].tokens, vec!["second"]);
        Ok(())
    }
}
