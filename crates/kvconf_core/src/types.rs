//! Core type definitions.

use crate::error::{ConfigError, CoreResult};
use kvconf_store::SCAN_START;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Match pattern used when a query names none.
pub const DEFAULT_MATCH: &str = "*";

/// Page size used when a query names none.
pub const DEFAULT_LIMIT: u32 = 20;

/// Smallest accepted page size.
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// An opaque scan cursor.
///
/// A cursor is whatever token the backing store returned from its last scan
/// step. It is passed back verbatim and never parsed: the only meaningful
/// comparison is against the start sentinel `"0"`, which both begins a
/// listing and, when returned, ends it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Returns the cursor that starts a listing.
    #[must_use]
    pub fn start() -> Self {
        Self(SCAN_START.to_string())
    }

    /// Wraps a token returned by the store.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the start/end sentinel.
    ///
    /// On a returned page this means there is nothing left to list.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0 == SCAN_START
    }

    /// Consumes the cursor and returns the raw token.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// A single configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigObject {
    /// The key of the configuration object.
    pub key: String,
    /// The value of the configuration object.
    pub value: String,
}

impl ConfigObject {
    /// Creates a new configuration object.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A request for one page of configuration objects.
///
/// All fields are optional; see [`PageQuery::pattern`], [`PageQuery::cursor`]
/// and [`PageQuery::limit`] for the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Glob pattern keys must match.
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Cursor from the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Cursor>,
    /// Requested page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Creates a query for the first page with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the match pattern.
    #[must_use]
    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the cursor to resume from.
    #[must_use]
    pub fn with_offset(mut self, cursor: impl Into<Cursor>) -> Self {
        self.offset = Some(cursor.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the effective match pattern.
    ///
    /// An absent or empty pattern means `"*"`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_MATCH)
    }

    /// Returns the effective cursor.
    ///
    /// An absent or empty cursor means the start sentinel.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.offset
            .clone()
            .filter(|c| !c.as_str().is_empty())
            .unwrap_or_default()
    }

    /// Returns the effective page size (20 by default).
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Checks the query before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if `limit` is outside
    /// `[MIN_LIMIT, MAX_LIMIT]`.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(limit) = self.limit {
            if limit < MIN_LIMIT {
                return Err(ConfigError::invalid_input(format!(
                    "limit must be >= {MIN_LIMIT}"
                )));
            }
            if limit > MAX_LIMIT {
                return Err(ConfigError::invalid_input(format!(
                    "limit must be <= {MAX_LIMIT}"
                )));
            }
        }
        Ok(())
    }
}

/// One page of configuration objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigObjectList {
    /// Cursor for the next page; `"0"` when the listing is complete.
    pub offset: Cursor,
    /// Effective page size.
    pub limit: u32,
    /// Size of the whole key space when the page was built.
    ///
    /// This ignores the match pattern and is not synchronized with `items`.
    pub total: u64,
    /// Entries on this page.
    pub items: Vec<ConfigObject>,
}

impl ConfigObjectList {
    /// Returns true if no further page exists.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.offset.is_complete()
    }
}

/// Acknowledgment returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    /// Success message.
    pub message: String,
}

impl DeleteAck {
    /// The acknowledgment for a removed key.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            message: "Deleted".to_string(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    /// Human-readable failure reason.
    pub reason: String,
}

impl ErrorReply {
    /// Creates an error body.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<&ConfigError> for ErrorReply {
    fn from(err: &ConfigError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let query = PageQuery::new();
        assert_eq!(query.pattern(), "*");
        assert_eq!(query.cursor(), Cursor::start());
        assert_eq!(query.limit(), 20);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn page_query_limit_bounds() {
        assert!(PageQuery::new().with_limit(1).validate().is_ok());
        assert!(PageQuery::new().with_limit(100).validate().is_ok());

        let err = PageQuery::new().with_limit(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInput { .. }));
        assert!(err.to_string().contains(">= 1"));

        let err = PageQuery::new().with_limit(101).validate().unwrap_err();
        assert!(err.to_string().contains("<= 100"));
    }

    #[test]
    fn page_query_deserializes_match_field() {
        let query: PageQuery =
            serde_json::from_str(r#"{"match":"app.*","offset":"k6170","limit":5}"#).unwrap();
        assert_eq!(query.pattern(), "app.*");
        assert_eq!(query.cursor().as_str(), "k6170");
        assert_eq!(query.limit(), 5);
    }

    #[test]
    fn empty_match_and_offset_fall_back_to_defaults() {
        let query: PageQuery = serde_json::from_str(r#"{"match":"","offset":""}"#).unwrap();
        assert_eq!(query.pattern(), "*");
        assert_eq!(query.cursor(), Cursor::start());
    }

    #[test]
    fn page_query_skips_unset_fields() {
        let json = serde_json::to_string(&PageQuery::new().with_match("db.*")).unwrap();
        assert_eq!(json, r#"{"match":"db.*"}"#);
    }

    #[test]
    fn cursor_is_a_plain_json_string() {
        let list = ConfigObjectList {
            offset: Cursor::start(),
            limit: 20,
            total: 0,
            items: vec![],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"offset": "0", "limit": 20, "total": 0, "items": []})
        );
        assert!(list.is_last_page());
    }

    #[test]
    fn cursor_sentinel() {
        assert!(Cursor::start().is_complete());
        assert!(Cursor::from("0").is_complete());
        assert!(!Cursor::from("1024").is_complete());
        assert_eq!(Cursor::from("17").to_string(), "17");
    }

    #[test]
    fn error_reply_carries_message() {
        let reply = ErrorReply::from(&ConfigError::not_found("k"));
        let json = serde_json::to_value(reply).unwrap();
        assert_eq!(json, serde_json::json!({"reason": "Resource with id 'k' not found"}));
    }

    #[test]
    fn delete_ack_message() {
        let json = serde_json::to_value(DeleteAck::deleted()).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Deleted"}));
    }
}
