//! Remote store client for the document collection that holds each store's
//! recorded inventory codes.
//!
//! Speaks the Firestore REST API (v1) with a blocking reqwest client.
//! Two lookups only: list the stores, fetch one store's record.
//! No retries, no caching, no writes.

mod client;
mod document;

pub use client::{StoreClient, StoreConfig, StoreError};
pub use document::{StoreRecord, StoreSummary};
