//! API models for request and response payloads

use serde::{Serialize, Serializer, ser::SerializeMap};

pub mod choice;
pub mod employee;
pub mod menu;
pub mod restaurant;

/// Largest page any listing endpoint returns
pub const MAX_PAGE_SIZE: i64 = 500;

/// Offset/limit window for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    /// Defaults to the first 500 rows; negative offsets become 0 and the
    /// limit is clamped to `0..=500`
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(MAX_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Serialize `None` as `{}` rather than `null`
pub(crate) fn or_empty_object<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Treat missing and whitespace-only strings alike
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
