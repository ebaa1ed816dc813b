//! Query parsing
//!
//! A query is plain text, optionally prefixed by a field qualifier:
//! `tag:prod`, `ip:192.0.2`, `type:g6`, `label:web`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::SearchField;

static QUALIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(label|tags?|ips?|type)\s*:\s*(.*)$").expect("Invalid QUALIFIER_RE regex")
});

/// A parsed, case-folded query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Lowercased term to look for
    pub term: String,

    /// Restrict matching to one field
    pub field: Option<SearchField>,

    /// Whole trimmed, lowercased input (qualifier included)
    pub raw: String,
}

impl Query {
    /// True when there is nothing to search for
    pub fn is_blank(&self) -> bool {
        self.term.is_empty()
    }
}

/// Parse a raw query string. Surrounding whitespace is ignored.
pub fn parse_query(raw: &str) -> Query {
    let trimmed = raw.trim();
    let folded = trimmed.to_lowercase();

    if let Some(caps) = QUALIFIER_RE.captures(trimmed) {
        let field = caps.get(1).and_then(|m| m.as_str().parse::<SearchField>().ok());
        let term = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if field.is_some() && !term.is_empty() {
            return Query {
                term: term.to_lowercase(),
                field,
                raw: folded,
            };
        }
    }

    Query {
        term: folded.clone(),
        field: None,
        raw: folded,
    }
}
