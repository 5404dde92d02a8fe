pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod indexer;
pub mod models;
pub mod publisher;
pub mod stores;
pub mod throttle;
pub mod tokenizer;
pub mod traits;
pub mod url_map;
pub mod walker;

pub use config::{IndexerConfig, DEFAULT_INDEX_NAME, DEFAULT_THROTTLE};
pub use document::build_document;
pub use error::{ConfigError, IndexError, PublishError};
pub use extractor::{
    decode_latin1, extract_file, extract_html, ExtractedFields, Extraction, SkipReason,
};
pub use indexer::{index_corpus, index_file, run};
pub use models::{IndexDocument, PublishOutcome, PublishTarget, RunSummary};
pub use publisher::Publisher;
pub use stores::{ElasticsearchSink, RecordingSink};
pub use throttle::{FixedDelay, Throttle, TokenBucket};
pub use tokenizer::{tokenize, top_terms, word_frequencies};
pub use traits::DocumentSink;
pub use url_map::UrlMap;
pub use walker::{CorpusFile, CorpusWalker};
