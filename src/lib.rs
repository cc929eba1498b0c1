pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch_cache;
pub mod logging;
pub mod models;
pub mod views;

pub use error::{ConfigError, ExportError, FetchCause, FetchError};
pub use fetch_cache::{
    CacheStatus, Clock, DocumentSet, FetchCache, HttpFetcher, PageFetcher, SystemClock, CACHE_TTL,
};
pub use models::{DealRecord, PageTarget, TallyEntry, NOT_AVAILABLE};
