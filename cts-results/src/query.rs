// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The externally-defined query and tree capabilities the engine consumes.
//!
//! Test queries name tests at suite/group/case granularity. Their syntax,
//! ordering and containment rules belong to the query system that produced
//! them; this crate only requires the operations captured by the [`Query`]
//! trait, so the engine can be driven by any query implementation, including
//! a minimal fake in tests.

use crate::Status;
use smol_str::SmolStr;
use std::{error, fmt};

/// A hierarchical test identifier.
///
/// Implementations supply parsing from text, a total order (used as the
/// primary sort key for result records) and a containment test over the query
/// hierarchy.
pub trait Query: Clone + Ord + fmt::Display {
    /// Parses a query from its textual form.
    ///
    /// This is total: any token is accepted as a query. Validation of query
    /// text is the producer's responsibility, upstream of this crate.
    fn from_text(text: &str) -> Self;

    /// Returns true if `self`'s hierarchy includes `other`.
    ///
    /// Every query contains itself.
    fn contains(&self, other: &Self) -> bool;
}

/// A tree that accepts (query, status) insertions.
///
/// Built from a result list via
/// [`ResultList::status_tree`](crate::ResultList::status_tree). The tree's own
/// rule decides when two insertions overlap or conflict; such insertions fail
/// and the failure is surfaced unchanged, since there is no defined precedence
/// for hierarchical conflicts.
pub trait ResultTree<Q: Query>: Default {
    /// The tree's conflict error.
    type Error: error::Error;

    /// Inserts one (query, status) pair.
    fn insert(&mut self, query: Q, status: Status) -> Result<(), Self::Error>;
}

/// A minimal built-in [`Query`] implementation over `:`-separated paths.
///
/// Ordering is plain string order and containment is segment-prefix matching:
/// `suite:a:` contains `suite:a:b:c`. This is enough to drive the engine from
/// the command line and in tests; it makes no claim to the semantics of any
/// real query hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleQuery(SmolStr);

impl SimpleQuery {
    /// The segment separator.
    pub const SEPARATOR: char = ':';

    /// Creates a query from a string.
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    /// Returns the query text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Query for SimpleQuery {
    fn from_text(text: &str) -> Self {
        Self::new(text)
    }

    fn contains(&self, other: &Self) -> bool {
        let prefix = self.0.as_str();
        let Some(rest) = other.0.strip_prefix(prefix) else {
            return false;
        };
        rest.is_empty()
            || prefix.ends_with(Self::SEPARATOR)
            || rest.starts_with(Self::SEPARATOR)
    }
}

impl fmt::Display for SimpleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("suite:a:b", "suite:a:b", true; "self containment")]
    #[test_case("suite:a:", "suite:a:b:c", true; "trailing separator prefix")]
    #[test_case("suite:a", "suite:a:b", true; "separator at boundary")]
    #[test_case("suite:a", "suite:ab", false; "not a segment boundary")]
    #[test_case("suite:a:b", "suite:a", false; "child does not contain parent")]
    #[test_case("other", "suite:a", false; "disjoint")]
    fn contains(parent: &str, child: &str, expected: bool) {
        let parent = SimpleQuery::new(parent);
        let child = SimpleQuery::new(child);
        assert_eq!(parent.contains(&child), expected);
    }
}
