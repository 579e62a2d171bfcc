use crate::utils::error::{CardError, Result};
use chrono::{DateTime, Utc};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// RFC 3339 timestamp → `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_date(iso: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(iso.trim()).map_err(|e| CardError::DateError {
        message: format!("'{}' is not an RFC 3339 timestamp: {}", iso, e),
    })?;
    Ok(parsed
        .with_timezone(&Utc)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string())
}

/// Whole megabytes, ties rounded to even.
pub fn size_mb(bytes: u64) -> String {
    let mb = (bytes as f64 / BYTES_PER_MB).round_ties_even();
    format!("{} MB", mb as u64)
}
