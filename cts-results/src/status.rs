// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::StatusParseError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// The outcome class of a single test observation.
///
/// Statuses are totally ordered by their string code. That order is used only
/// for tie-breaking when sorting records and for keeping [`StatusSet`]s
/// deterministic; the semantic ranking applied when duplicate observations
/// disagree lives in [`deduplicate`](crate::deduplicate).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    /// The test was aborted before producing an outcome.
    Abort,
    /// The test harness crashed.
    Crash,
    /// The test did not pass.
    Fail,
    /// The test passed.
    Pass,
    /// The test produced mixed outcomes and needs to be retried.
    RetryOnFailure,
    /// The test was skipped.
    Skip,
    /// The test passed but exceeded its expected duration.
    Slow,
    /// The outcome could not be determined.
    Unknown,
}

impl Status {
    /// All known status codes, in their canonical (string) order.
    pub const ALL: &'static [Status] = &[
        Status::Abort,
        Status::Crash,
        Status::Fail,
        Status::Pass,
        Status::RetryOnFailure,
        Status::Skip,
        Status::Slow,
        Status::Unknown,
    ];

    /// Returns the string code for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Abort => "Abort",
            Status::Crash => "Crash",
            Status::Fail => "Fail",
            Status::Pass => "Pass",
            Status::RetryOnFailure => "RetryOnFailure",
            Status::Skip => "Skip",
            Status::Slow => "Slow",
            Status::Unknown => "Unknown",
        }
    }

    /// Returns the string codes of all known statuses.
    pub fn variants() -> &'static [&'static str] {
        &[
            "Abort",
            "Crash",
            "Fail",
            "Pass",
            "RetryOnFailure",
            "Skip",
            "Slow",
            "Unknown",
        ]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Abort" => Ok(Status::Abort),
            "Crash" => Ok(Status::Crash),
            "Fail" => Ok(Status::Fail),
            "Pass" => Ok(Status::Pass),
            "RetryOnFailure" => Ok(Status::RetryOnFailure),
            "Skip" => Ok(Status::Skip),
            "Slow" => Ok(Status::Slow),
            "Unknown" => Ok(Status::Unknown),
            other => Err(StatusParseError::new(other)),
        }
    }
}

/// A set of distinct statuses, ordered by status code.
pub type StatusSet = BTreeSet<Status>;
