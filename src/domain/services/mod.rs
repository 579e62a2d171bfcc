//! Pure derivations from release data: version, OS classification, date and size formatting.

pub mod classify;
pub mod format;

pub use classify::{infer_os_for_frontmatter, os_meta, os_slug_from_tag, version_from_tag};
pub use format::{format_date, size_mb};
