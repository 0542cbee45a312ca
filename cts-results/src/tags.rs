// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;
use std::{cmp::Ordering, collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

/// The delimiter used in the canonical string form of a tag set.
///
/// Individual tags must not contain this character; tag strings are supplied
/// by callers and are not validated here.
pub const TAG_DELIMITER: char = ',';

/// An unordered set of environment descriptor strings.
///
/// Tags describe one axis each of the environment a test ran under (machine,
/// OS, GPU, validation mode and so on). Insertion order is irrelevant and
/// duplicates collapse. Two tag sets are equal iff their canonical string
/// forms are equal, and the canonical string (tags sorted and joined with
/// [`TAG_DELIMITER`]) is also the sort key: [`Ord`] on `Tags` compares
/// canonical strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tags(BTreeSet<SmolStr>);

/// A tag set treated as a configuration identity.
///
/// Same type as [`Tags`]; the alias marks call sites that enumerate distinct
/// configurations observed across a result list rather than per-record
/// metadata.
pub type Variant = Tags;

impl Tags {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag, returning true if it was not already present.
    pub fn insert(&mut self, tag: impl Into<SmolStr>) -> bool {
        self.0.insert(tag.into())
    }

    /// Returns true if the set contains `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Returns true if every tag in `other` is present in `self`.
    pub fn contains_all(&self, other: &Tags) -> bool {
        other.0.iter().all(|tag| self.0.contains(tag))
    }

    /// Returns true if the set holds no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(SmolStr::as_str)
    }

    /// The canonical byte sequence: tags in sorted order, delimiter-joined.
    fn canonical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        Itertools::intersperse(self.0.iter().map(SmolStr::as_str), ",").flat_map(str::bytes)
    }
}

impl Ord for Tags {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes().cmp(other.canonical_bytes())
    }
}

impl PartialOrd for Tags {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            f.write_str(tag)?;
        }
        Ok(())
    }
}

impl FromStr for Tags {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::new());
        }
        Ok(s.split(TAG_DELIMITER).collect())
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = SmolStr::deserialize(deserializer)?;
        match s.as_str().parse() {
            Ok(tags) => Ok(tags),
            Err(infallible) => match infallible {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_form_is_sorted_and_deduplicated() {
        let tags: Tags = ["win", "amd", "win", "debug"].into_iter().collect();
        assert_eq!(tags.to_string(), "amd,debug,win");
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn empty_round_trip() {
        let tags: Tags = "".parse().unwrap();
        assert!(tags.is_empty());
        assert_eq!(tags.to_string(), "");
    }

    #[test]
    fn contains_all() {
        let tags: Tags = ["a", "b", "c"].into_iter().collect();
        let subset: Tags = ["a", "c"].into_iter().collect();
        let disjoint: Tags = ["a", "d"].into_iter().collect();
        assert!(tags.contains_all(&subset));
        assert!(tags.contains_all(&Tags::new()));
        assert!(!tags.contains_all(&disjoint));
        assert!(!subset.contains_all(&tags));
    }

    #[test]
    fn order_is_canonical_string_order() {
        // "a!b" vs {"a", "x"}: byte-wise '!' sorts before the delimiter, so
        // element-wise set comparison would disagree with string comparison
        // here. The canonical string is the contract.
        let left: Tags = ["a!b"].into_iter().collect();
        let right: Tags = ["a", "x"].into_iter().collect();
        assert_eq!(
            left.cmp(&right),
            left.to_string().cmp(&right.to_string()),
        );
    }

    proptest! {
        #[test]
        fn string_round_trip(tags in proptest::collection::btree_set("[a-z0-9_.-]{1,12}", 0..6)) {
            let tags: Tags = tags.into_iter().collect();
            let round_tripped: Tags = tags.to_string().parse().unwrap();
            prop_assert_eq!(round_tripped, tags);
        }

        #[test]
        fn canonicalization_is_injective(
            a in proptest::collection::btree_set("[a-z0-9_.-]{1,12}", 0..6),
            b in proptest::collection::btree_set("[a-z0-9_.-]{1,12}", 0..6),
        ) {
            let a: Tags = a.into_iter().collect();
            let b: Tags = b.into_iter().collect();
            prop_assert_eq!(a.to_string() == b.to_string(), a == b);
        }
    }
}
