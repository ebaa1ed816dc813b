//! Entities module - Source records and their normalization
//!
//! Provides:
//! - records: Typed API resource records (buckets, domains, linodes, ...)
//! - inventory: Loading the already-fetched resource lists
//! - normalize: Conversion of every record type into a SearchableItem
//! - api: normalize/stats commands

pub mod api;
pub mod inventory;
pub mod normalize;
pub mod records;
