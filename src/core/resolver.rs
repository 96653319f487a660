use crate::core::api::MicetroApi;
use crate::core::errors::{Error, Result};
use crate::core::query::SearchQuery;
use crate::core::range::Range;
use log::{debug, info};
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Outcome
-------------------------------------------------------------------------------------------------*/

/// The range found by a search.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RangeMatch {
    /// CIDR name of the matching range.
    pub cidr: String,

    /// Reference of the matching range.
    pub range_ref: String,

    /// Title the range had when it was found.
    pub title: String,

    /// Whether a new title was requested (and written, unless this was a dry run).
    pub changed: bool,
}

/// Result of a complete search. Searching the whole forest without a match is not an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Found(RangeMatch),
    NotFound,
}

/// Result of [find_range], shaped like an Ansible module result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FindRangeResult {
    pub changed: bool,

    /// CIDR of the found range.
    pub message: String,
}

/*-------------------------------------------------------------------------------------------------
  Entry Points
-------------------------------------------------------------------------------------------------*/

/// Find the first range matching `query` and, when a new title is requested, relabel it.
///
/// With `check_mode` set nothing is written, but `changed` reports what a real run would do.
/// Searching every network without a match fails with [Error::NotFound].
pub fn find_range<A: MicetroApi>(
    api: &A,
    query: &SearchQuery,
    check_mode: bool,
) -> Result<FindRangeResult> {
    match resolve_range(api, query, check_mode)? {
        Outcome::Found(found) => Ok(FindRangeResult {
            changed: found.changed,
            message: found.cidr,
        }),
        Outcome::NotFound => Err(Error::NotFound {
            prefix_length: query.prefix_length,
        }),
    }
}

/// Read-only search: a single-element list with the matching CIDR, or an empty list.
pub fn lookup_range<A: MicetroApi>(api: &A, query: &SearchQuery) -> Result<Vec<String>> {
    let query = SearchQuery {
        new_title: None,
        ..query.clone()
    };

    match resolve_range(api, &query, true)? {
        Outcome::Found(found) => Ok(vec![found.cidr]),
        Outcome::NotFound => {
            info!("No /{} range found in the provided networks", query.prefix_length);
            Ok(Vec::new())
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Range Resolver
-------------------------------------------------------------------------------------------------*/

/// Search the range trees of `query.networks`, in order, for the first range with the target
/// prefix length whose title contains the title substring. The first match anywhere wins; no
/// further range is fetched once it is found.
///
/// At most one title change is written, to the match, and only when a new title is set and
/// `dry_run` is false. Any API error aborts the search.
pub fn resolve_range<A: MicetroApi>(
    api: &A,
    query: &SearchQuery,
    dry_run: bool,
) -> Result<Outcome> {
    let limit = query.descent_bound.limit(query.prefix_length);

    for network in &query.networks {
        let ranges = api.get_ranges(network)?;
        if ranges.is_empty() {
            debug!("No ranges found for network {}", network);
            continue;
        }

        if let Some(range) = search_tree(api, ranges, query, limit)? {
            info!("Found range {} ({})", range.name, range.range_ref);
            return claim(api, range, query, dry_run).map(Outcome::Found);
        }
    }

    Ok(Outcome::NotFound)
}

/// A range waiting on the traversal stack.
enum Pending {
    Loaded(Range),
    Reference(String),
}

/// Depth-first, pre-order search from `roots`. Child references are fetched only when popped.
fn search_tree<A: MicetroApi>(
    api: &A,
    roots: Vec<Range>,
    query: &SearchQuery,
    limit: u8,
) -> Result<Option<Range>> {
    let mut stack: Vec<Pending> = roots.into_iter().rev().map(Pending::Loaded).collect();

    while let Some(pending) = stack.pop() {
        let range = match pending {
            Pending::Loaded(range) => range,
            Pending::Reference(range_ref) => api.get_range(&range_ref)?,
        };

        let prefix_length = range.prefix_length()?;
        debug!("Current range's cidr: {}", range.name);

        if prefix_length == query.prefix_length && range.title_contains(&query.title) {
            return Ok(Some(range));
        }

        if prefix_length < limit && range.has_children() {
            stack.extend(
                range
                    .child_ranges
                    .into_iter()
                    .rev()
                    .map(|child| Pending::Reference(child.range_ref)),
            );
        }
    }

    Ok(None)
}

/// Write the new title to the matched range, if one was requested.
fn claim<A: MicetroApi>(
    api: &A,
    range: Range,
    query: &SearchQuery,
    dry_run: bool,
) -> Result<RangeMatch> {
    let changed = match &query.new_title {
        Some(new_title) if dry_run => {
            info!("Dry run; would set title of {} to {:?}", range.name, new_title);
            true
        }
        Some(new_title) => {
            api.set_range_title(&range.range_ref, new_title)?;
            true
        }
        None => false,
    };

    Ok(RangeMatch {
        title: range.title().to_string(),
        cidr: range.name,
        range_ref: range.range_ref,
        changed,
    })
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
