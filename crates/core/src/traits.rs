use crate::{IndexDocument, PublishError, PublishTarget};
use async_trait::async_trait;

#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn put_document(
        &self,
        target: &PublishTarget,
        document: &IndexDocument,
    ) -> Result<(), PublishError>;
}
