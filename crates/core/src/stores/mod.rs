pub mod elasticsearch;
pub mod memory;

pub use elasticsearch::ElasticsearchSink;
pub use memory::RecordingSink;
