//! Common utilities

const BYTE_UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count for display (1024-based, at most two decimals)
pub fn readable_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} {}", bytes, BYTE_UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, BYTE_UNITS[unit])
}

/// Case-insensitive substring test. `needle_lower` must already be lowercase.
pub fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_bytes() {
        assert_eq!(readable_bytes(0), "0 bytes");
        assert_eq!(readable_bytes(512), "512 bytes");
        assert_eq!(readable_bytes(1024), "1 KB");
        assert_eq!(readable_bytes(1536), "1.5 KB");
        assert_eq!(readable_bytes(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("Web-Server", "web"));
        assert!(contains_folded("anything", ""));
        assert!(!contains_folded("db", "web"));
    }

    #[test]
    fn test_contains_folded_unicode() {
        assert!(contains_folded("ÜBER-host", "über"));
    }
}
