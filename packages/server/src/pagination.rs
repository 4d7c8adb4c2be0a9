//! Cursor pagination over ordered, finite result sets.
//!
//! Resolvers materialize an ordered `Vec` and hand it to [`paginate`], which
//! slices it Relay-style: forward with `first`/`after`, backward with
//! `last`/`before`, both over the same underlying order. Cursors encode the
//! row's primary key, so re-issuing a cursor reproduces the same boundary
//! even when unrelated rows have been inserted elsewhere in the set.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("'{0}' must be a non-negative integer")]
    NegativeCount(&'static str),
    #[error("invalid cursor")]
    InvalidCursor,
    #[error("cursor does not match any row in the result set")]
    UnknownCursor,
}

/// Relay-style pagination arguments, as received from a GraphQL operation.
#[derive(Debug, Default, Clone)]
pub struct PageArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

/// One page of an ordered result set.
#[derive(Debug)]
pub struct Page<T> {
    /// (cursor, node) pairs in the underlying order.
    pub edges: Vec<(String, T)>,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

pub fn encode_cursor(key: &str) -> String {
    STANDARD.encode(key)
}

pub fn decode_cursor(cursor: &str) -> Result<String, PageError> {
    let bytes = STANDARD.decode(cursor).map_err(|_| PageError::InvalidCursor)?;
    String::from_utf8(bytes).map_err(|_| PageError::InvalidCursor)
}

/// Slice an ordered collection into a page.
///
/// `cursor_key` must produce a key that is unique within `items` and stable
/// across requests (the primary key). An empty input yields an empty edge
/// list with both page flags false.
pub fn paginate<T>(
    items: Vec<T>,
    cursor_key: impl Fn(&T) -> String,
    args: &PageArgs,
) -> Result<Page<T>, PageError> {
    if matches!(args.first, Some(n) if n < 0) {
        return Err(PageError::NegativeCount("first"));
    }
    if matches!(args.last, Some(n) if n < 0) {
        return Err(PageError::NegativeCount("last"));
    }

    let keys: Vec<String> = items.iter().map(&cursor_key).collect();
    let total = items.len();

    let position_of = |cursor: &str| -> Result<usize, PageError> {
        let key = decode_cursor(cursor)?;
        keys.iter().position(|k| *k == key).ok_or(PageError::UnknownCursor)
    };

    let mut start = 0usize;
    let mut end = total;

    if let Some(after) = &args.after {
        start = position_of(after)? + 1;
    }
    if let Some(before) = &args.before {
        end = position_of(before)?;
    }
    if start > end {
        start = end;
    }

    if let Some(first) = args.first {
        end = end.min(start + first as usize);
    }
    if let Some(last) = args.last {
        start = start.max(end - (last as usize).min(end - start));
    }

    let has_previous_page = start > 0;
    let has_next_page = end < total;

    let edges = items
        .into_iter()
        .zip(keys)
        .skip(start)
        .take(end - start)
        .map(|(item, key)| (encode_cursor(&key), item))
        .collect();

    Ok(Page {
        edges,
        has_previous_page,
        has_next_page,
    })
}
