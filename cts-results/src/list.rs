// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Query, ResultTree, Status, StatusSet, Tags, TestResult, Variant};
use indexmap::IndexSet;
use std::collections::HashMap;

/// An ordered collection of test results.
///
/// Raw lists carry whatever records were observed, including duplicates by
/// (query, tags) identity; [`merge`](crate::merge) is what establishes
/// uniqueness and canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultList<Q>(Vec<TestResult<Q>>);

impl<Q> ResultList<Q> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a record.
    pub fn push(&mut self, result: TestResult<Q>) {
        self.0.push(result);
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the records in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, TestResult<Q>> {
        self.0.iter()
    }

    /// Returns the records as a slice.
    pub fn as_slice(&self) -> &[TestResult<Q>] {
        &self.0
    }
}

impl<Q: Query> ResultList<Q> {
    /// Returns the order-preserving subsequence of records matching `pred`.
    pub fn filter(&self, mut pred: impl FnMut(&TestResult<Q>) -> bool) -> Self {
        Self(self.0.iter().filter(|r| pred(r)).cloned().collect())
    }

    /// Returns the records with the given status.
    pub fn filter_by_status(&self, status: Status) -> Self {
        self.filter(|r| r.status == status)
    }

    /// Returns the records whose tags include all of `tags`.
    pub fn filter_by_tags(&self, tags: &Tags) -> Self {
        self.filter(|r| r.tags.contains_all(tags))
    }

    /// Returns the records whose tag set is exactly `variant`.
    pub fn filter_by_variant(&self, variant: &Variant) -> Self {
        self.filter(|r| &r.tags == variant)
    }

    /// Returns the records whose query is contained by `query`.
    pub fn filter_by_query(&self, query: &Q) -> Self {
        self.filter(|r| query.contains(&r.query))
    }

    /// Returns the distinct tag sets observed across the list, each reported
    /// once, in first-seen order.
    pub fn variants(&self) -> Vec<Variant> {
        let variants: IndexSet<&Tags> = self.0.iter().map(|r| &r.tags).collect();
        variants.into_iter().cloned().collect()
    }

    /// Returns a new list with every record's tags replaced by `f(tags)`.
    ///
    /// `f` is invoked at most once per distinct tag set, however many records
    /// share it, so it must be pure: same input, same output. An impure `f`
    /// produces unspecified (though memoization-consistent) results.
    pub fn transform_tags(&self, mut f: impl FnMut(Tags) -> Tags) -> Self {
        let mut memo: HashMap<Tags, Tags> = HashMap::new();
        let transformed = self
            .0
            .iter()
            .map(|r| {
                let tags = memo
                    .entry(r.tags.clone())
                    .or_insert_with_key(|tags| f(tags.clone()))
                    .clone();
                TestResult {
                    tags,
                    ..r.clone()
                }
            })
            .collect();
        Self(transformed)
    }

    /// Returns the distinct statuses present in the list.
    pub fn statuses(&self) -> StatusSet {
        self.0.iter().map(|r| r.status).collect()
    }

    /// Builds a tree by inserting every (query, status) pair in list order.
    ///
    /// If two inserted queries overlap under the tree's conflict rule, the
    /// build fails with the tree's own error. Hierarchical conflicts have no
    /// defined precedence, so this is a hard failure, unlike the flat
    /// duplicates that [`merge`](crate::merge) resolves.
    pub fn status_tree<T: ResultTree<Q>>(&self) -> Result<T, T::Error> {
        let mut tree = T::default();
        for record in &self.0 {
            tree.insert(record.query.clone(), record.status)?;
        }
        Ok(tree)
    }

    /// Sorts the list in place, stably, by [`TestResult::compare`].
    pub fn sort(&mut self) {
        self.0.sort_by(TestResult::compare);
    }
}

impl<Q> From<Vec<TestResult<Q>>> for ResultList<Q> {
    fn from(results: Vec<TestResult<Q>>) -> Self {
        Self(results)
    }
}

impl<Q> FromIterator<TestResult<Q>> for ResultList<Q> {
    fn from_iter<I: IntoIterator<Item = TestResult<Q>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<Q> IntoIterator for ResultList<Q> {
    type Item = TestResult<Q>;
    type IntoIter = std::vec::IntoIter<TestResult<Q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, Q> IntoIterator for &'a ResultList<Q> {
    type Item = &'a TestResult<Q>;
    type IntoIter = std::slice::Iter<'a, TestResult<Q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
