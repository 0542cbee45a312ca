// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Combining result lists into one canonical, deduplicated, sorted list.

use crate::{Query, ResultList, Status, StatusSet, Tags, TestResult};
use itertools::Itertools;
use std::{collections::BTreeMap, time::Duration};
use tracing::debug;

/// The standard policy for resolving conflicting statuses among duplicate
/// observations of the same (query, tags) pair.
///
/// A single distinct status is returned as-is. Otherwise the first matching
/// rule wins, in exactly this order:
///
/// 1. contains [`Crash`](Status::Crash) → `Crash`
/// 2. contains [`Abort`](Status::Abort) → `Abort`
/// 3. contains [`Unknown`](Status::Unknown) → `Unknown`
/// 4. contains [`RetryOnFailure`](Status::RetryOnFailure) → `RetryOnFailure`
/// 5. contains [`Pass`](Status::Pass) → `RetryOnFailure`
/// 6. otherwise → `Unknown`
///
/// Rarer and more severe anomalies dominate; a flaky pass/fail mix is reported
/// as needing retry rather than silently picking one side; anything
/// unrecognized degrades to `Unknown`. The rule order is observable for
/// status sets with three or more members (`{Unknown, RetryOnFailure, Pass}`
/// resolves to `Unknown`, not `RetryOnFailure`) and must not be reordered.
pub fn deduplicate(statuses: &StatusSet) -> Status {
    let mut iter = statuses.iter();
    if let (Some(&status), None) = (iter.next(), iter.next()) {
        return status;
    }
    for severe in [
        Status::Crash,
        Status::Abort,
        Status::Unknown,
        Status::RetryOnFailure,
    ] {
        if statuses.contains(&severe) {
            return severe;
        }
    }
    if statuses.contains(&Status::Pass) {
        return Status::RetryOnFailure;
    }
    Status::Unknown
}

/// Merges result lists into one canonical list using the standard
/// [`deduplicate`] policy.
pub fn merge<Q: Query>(lists: impl IntoIterator<Item = ResultList<Q>>) -> ResultList<Q> {
    merge_with_policy(lists, deduplicate)
}

/// Merges result lists into one canonical list using a caller-supplied
/// deduplication policy.
///
/// The inputs are concatenated preserving relative order, then grouped by
/// (query, canonical tags string). Within a group, exonerable records are
/// dropped whenever a non-exonerable one exists; a group that is entirely
/// exonerable keeps all its records. The group's status is the single
/// surviving status if there is only one, else `policy` applied to the set of
/// surviving statuses. The group's duration is the arithmetic mean of the
/// surviving durations, on whole nanoseconds. Each group emits exactly one
/// record, carrying the exoneration flag of the group's first-encountered
/// record. The output is sorted by [`TestResult::compare`].
///
/// Merging cannot fail, and is idempotent: merging an already-merged list
/// yields an equal list.
pub fn merge_with_policy<Q: Query>(
    lists: impl IntoIterator<Item = ResultList<Q>>,
    policy: impl Fn(&StatusSet) -> Status,
) -> ResultList<Q> {
    let mut groups: BTreeMap<(Q, Tags), Vec<TestResult<Q>>> = BTreeMap::new();
    let mut total = 0_usize;
    for list in lists {
        for record in list {
            total += 1;
            groups
                .entry((record.query.clone(), record.tags.clone()))
                .or_default()
                .push(record);
        }
    }
    debug!(records = total, groups = groups.len(), "merging result lists");

    let mut merged = Vec::with_capacity(groups.len());
    for ((query, tags), group) in groups {
        // Groups are built by push, so `group` is never empty.
        let may_exonerate = group.first().is_some_and(|r| r.may_exonerate);
        let survivors: Vec<&TestResult<Q>> = if group.iter().any(|r| !r.may_exonerate) {
            group.iter().filter(|r| !r.may_exonerate).collect()
        } else {
            group.iter().collect()
        };

        let statuses: StatusSet = survivors.iter().map(|r| r.status).collect();
        let status = match statuses.iter().exactly_one() {
            Ok(&status) => status,
            Err(_) => policy(&statuses),
        };

        let nanos: u128 = survivors.iter().map(|r| r.duration.as_nanos()).sum();
        let duration = Duration::from_nanos((nanos / survivors.len() as u128) as u64);

        merged.push(TestResult {
            query,
            tags,
            status,
            duration,
            may_exonerate,
        });
    }

    let mut merged = ResultList::from(merged);
    merged.sort();
    merged
}
