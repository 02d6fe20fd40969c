//! # Reference service
//!
//! Client and document types for the Fortress of the Muslim web service,
//! plus the builder that turns its categories into the app corpora.

mod client;
mod sync;
mod types;

pub use client::{DirSource, FetchError, HttpSource, ReferenceSource, USER_AGENT};
pub use sync::{SyncBuilder, SyncStats, Synced, SYNC_ID_PREFIX};
pub use types::{decode_category, decode_index, Index, IndexEntry, RemoteItem};
