//! In-memory response cache with time-based expiry
//!
//! This module provides a `Cache` that stores raw response bodies keyed by
//! request URL. Entries expire after a fixed TTL and are removed by a background
//! sweep task that runs once per TTL interval.

mod ttl;

pub use ttl::Cache;
