//! Cursor pagination over a scanning key/value store.
//!
//! One page costs one `SCAN`, one `GET` per scanned key and one `DBSIZE`.
//! None of these calls are synchronized with each other:
//!
//! - a key deleted (or emptied) between the scan and its read is dropped
//!   from the page rather than reported as an error
//! - `total` is read after the items and counts the whole key space,
//!   regardless of the match pattern
//!
//! Callers page by handing the returned `offset` back unchanged until it
//! comes back as `"0"`.

use crate::error::CoreResult;
use crate::types::{ConfigObject, ConfigObjectList, Cursor, PageQuery};
use kvconf_store::KeyValueStore;
use tracing::debug;

/// Builds one page of configuration objects.
///
/// `query` is expected to have been validated already.
///
/// The returned `limit` is the requested page size, or the number of items
/// when the store overshot the count hint.
///
/// # Errors
///
/// Returns an error if any store call fails. Nothing is retried.
pub async fn paginate(
    store: &dyn KeyValueStore,
    query: &PageQuery,
) -> CoreResult<ConfigObjectList> {
    let limit = query.limit();
    let pattern = query.pattern();
    let cursor = query.cursor();

    let page = store.scan(cursor.as_str(), pattern, limit as usize).await?;
    let scanned = page.keys.len();

    let mut items = Vec::with_capacity(scanned);
    for key in page.keys {
        match store.get(&key).await? {
            Some(value) if !value.is_empty() => items.push(ConfigObject { key, value }),
            _ => debug!(key = %key, "Key vanished between scan and read"),
        }
    }

    let total = store.dbsize().await?;

    debug!(
        pattern,
        cursor = %cursor,
        next = %page.cursor,
        scanned,
        returned = items.len(),
        total,
        "Built page"
    );

    let returned = u32::try_from(items.len()).unwrap_or(u32::MAX);
    Ok(ConfigObjectList {
        offset: Cursor::new(page.cursor),
        limit: returned.max(limit),
        total,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ErrorKind};
    use kvconf_store::InMemoryStore;

    #[tokio::test]
    async fn empty_key_space() {
        let store = InMemoryStore::new();
        let list = paginate(&store, &PageQuery::new()).await.unwrap();

        assert_eq!(list.offset, Cursor::start());
        assert_eq!(list.limit, 20);
        assert_eq!(list.total, 0);
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn single_page_returns_items_in_scan_order() {
        let store = InMemoryStore::with_entries([("b", "2"), ("a", "1")]);
        let list = paginate(&store, &PageQuery::new()).await.unwrap();

        assert_eq!(
            list.items,
            vec![ConfigObject::new("a", "1"), ConfigObject::new("b", "2")]
        );
        assert!(list.is_last_page());
        assert_eq!(list.total, 2);
    }

    #[tokio::test]
    async fn unmatched_pattern_still_reports_full_total() {
        let store = InMemoryStore::with_entries([("a", "1"), ("b", "2"), ("c", "3")]);
        let query = PageQuery::new().with_match("nothing.*");
        let list = paginate(&store, &query).await.unwrap();

        assert!(list.items.is_empty());
        assert_eq!(list.total, 3);
        assert!(list.is_last_page());
    }

    #[tokio::test]
    async fn cursor_is_passed_through_verbatim() {
        let store = InMemoryStore::with_entries((0..5).map(|i| (format!("k{i}"), "v")));
        let first = paginate(&store, &PageQuery::new().with_limit(2)).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(!first.is_last_page());

        let direct = store.scan("0", "*", 2).await.unwrap();
        assert_eq!(first.offset.as_str(), direct.cursor);

        let second = paginate(
            &store,
            &PageQuery::new().with_limit(2).with_offset(first.offset.clone()),
        )
        .await
        .unwrap();
        assert_eq!(
            second.items,
            vec![ConfigObject::new("k2", "v"), ConfigObject::new("k3", "v")]
        );
    }

    #[tokio::test]
    async fn limit_echoes_request_when_page_is_short() {
        let store = InMemoryStore::with_entries([("a", "1")]);
        let list = paginate(&store, &PageQuery::new().with_limit(50)).await.unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.limit, 50);
    }

    #[tokio::test]
    async fn empty_values_are_dropped() {
        let store = InMemoryStore::with_entries([("a", "1"), ("blank", ""), ("c", "3")]);
        let list = paginate(&store, &PageQuery::new()).await.unwrap();

        let keys: Vec<_> = list.items.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(list.total, 3);
    }

    #[tokio::test]
    async fn foreign_cursor_is_invalid_input() {
        let store = InMemoryStore::with_entries([("a", "1")]);
        let err = paginate(&store, &PageQuery::new().with_offset("not-a-cursor"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn store_failure_surfaces_once() {
        let store = InMemoryStore::with_entries([("a", "1")]);
        store.close().await.unwrap();
        let err = paginate(&store, &PageQuery::new()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Store(_)));
    }
}
