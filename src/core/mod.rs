//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified search model (SearchableItem, SearchResults)
//! - Rendering functions for different output formats
//! - Common utilities

pub mod model;
pub mod render;
pub mod util;
