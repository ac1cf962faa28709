//! Collection response shapes.
//!
//! A collection GET answers either with a bare JSON array or with a paginated
//! envelope `{ data, meta }`. The shape is decided once, when the body is
//! decoded into [`ListBody`]; nothing downstream sniffs JSON again.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination metadata. Authoritative: `total_pages` is never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Items plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "items")]
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.meta.page < self.meta.total_pages
    }
}

/// The two collection shapes the server may send.
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<T> {
    Bare(Vec<T>),
    Paginated(Page<T>),
}

// Shape is chosen from the JSON kind; item errors surface unchanged.
impl<'de, T: DeserializeOwned> Deserialize<'de> for ListBody<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_array() {
            serde_json::from_value(value).map(ListBody::Bare).map_err(de::Error::custom)
        } else {
            serde_json::from_value(value).map(ListBody::Paginated).map_err(de::Error::custom)
        }
    }
}

impl<T> ListBody<T> {
    /// Items only; pagination metadata is discarded.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Paginated(page) => page.data,
        }
    }

    /// The envelope, if the server sent one.
    pub fn into_page(self) -> Option<Page<T>> {
        match self {
            ListBody::Bare(_) => None,
            ListBody::Paginated(page) => Some(page),
        }
    }
}
