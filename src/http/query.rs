//! Query string parameters.
//!
//! Keys whose value is absent are dropped when the query is applied to a URL;
//! they are never serialized as `key=`.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

use crate::error::ApiError;

/// A scalar query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Text(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Text(s)
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Int(n)
    }
}

impl From<u32> for QueryValue {
    fn from(n: u32) -> Self {
        QueryValue::Int(i64::from(n))
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

/// String keys mapped to optional scalar values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, Option<QueryValue>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key; `None` records the key as absent.
    pub fn set<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.entries.insert(key.into(), value.map(Into::into));
        self
    }

    pub fn page(self, page: u32) -> Self {
        self.set("page", Some(page))
    }

    pub fn per_page(self, per_page: u32) -> Self {
        self.set("per_page", Some(per_page))
    }

    /// Comma-separated field selection.
    pub fn fields(self, fields: &[&str]) -> Self {
        self.set("fields", Some(fields.join(",")))
    }

    /// Comma-separated relation inclusion.
    pub fn include(self, relations: &[&str]) -> Self {
        self.set("include", Some(relations.join(",")))
    }

    /// Resource-specific filter, passed through verbatim.
    pub fn filter<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set(key, value)
    }

    /// Flatten a serializable filter struct. `null` fields become absent keys.
    pub fn from_serialize<T: Serialize>(query: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(query).map_err(|e| ApiError::invalid_request(e.to_string()))?;
        let object = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(ApiError::invalid_request(format!(
                    "query must serialize to an object, got {}",
                    other
                )))
            }
        };

        let mut params = Self::new();
        for (key, value) in object {
            let value = match value {
                Value::Null => None,
                Value::String(s) => Some(QueryValue::Text(s)),
                Value::Bool(b) => Some(QueryValue::Bool(b)),
                Value::Number(n) => Some(match n.as_i64() {
                    Some(i) => QueryValue::Int(i),
                    None => QueryValue::Text(n.to_string()),
                }),
                other => {
                    return Err(ApiError::invalid_request(format!(
                        "query value for '{}' is not a scalar: {}",
                        key, other
                    )))
                }
            };
            params.entries.insert(key, value);
        }
        Ok(params)
    }

    /// Keys with a present value, in key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v.to_string())))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }

    /// Append present pairs to the URL's query string.
    pub fn apply(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, value) in self.pairs() {
            query.append_pair(key, &value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct RoundFilter {
        championship_id: Option<i64>,
        status: Option<String>,
        page: u32,
    }

    #[test]
    fn test_absent_keys_vanish() {
        let params = QueryParams::new()
            .page(2)
            .filter("round_id", Some(7i64))
            .filter::<&str>("status", None)
            .fields(&["name", "date"]);

        let mut url = Url::parse("http://localhost/api/v1/matches").unwrap();
        params.apply(&mut url);

        assert_eq!(
            url.as_str(),
            "http://localhost/api/v1/matches?fields=name%2Cdate&page=2&round_id=7"
        );
        assert!(!url.as_str().contains("status"));
    }

    #[test]
    fn test_only_absent_keys_leaves_url_untouched() {
        let params = QueryParams::new().filter::<i64>("team_id", None);
        let mut url = Url::parse("http://localhost/api/v1/teams").unwrap();
        params.apply(&mut url);
        assert_eq!(url.as_str(), "http://localhost/api/v1/teams");
        assert!(params.is_empty());
    }

    #[test]
    fn test_from_serialize_drops_nulls() {
        let params = QueryParams::from_serialize(&RoundFilter {
            championship_id: Some(3),
            status: None,
            page: 1,
        })
        .unwrap();

        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(
            pairs,
            vec![("championship_id", "3".to_string()), ("page", "1".to_string())]
        );
    }

    #[test]
    fn test_from_serialize_rejects_nested() {
        let nested = serde_json::json!({"filter": {"a": 1}});
        assert!(QueryParams::from_serialize(&nested).is_err());
    }
}
