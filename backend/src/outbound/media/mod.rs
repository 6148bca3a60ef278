//! Media storage adapters: the real HTTP store and the inline fallback.

mod data_uri;
mod http_media_store;

pub use data_uri::DataUriBlobSink;
pub use http_media_store::HttpMediaStore;
