//! Card Enrich - icons and verse text for devotional cards
//!
//! Reads the card spreadsheet, resolves each row's symbol to an icon URL and
//! its readings to verse text, and caches every successful lookup on disk so
//! repeated builds stay offline.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod icon;
pub mod records;
pub mod signer;
pub mod verse;

pub use cache::{CacheKey, CacheStore, FileCache, MemoryCache};
pub use config::{Config, Credentials, Endpoints};
pub use error::{EnrichError, Result};
pub use icon::IconResolver;
pub use records::{read_source_rows, EnrichedRecord, RecordAssembler, SourceRow};
pub use signer::RequestSigner;
pub use verse::{VerseResolver, VerseResult};
