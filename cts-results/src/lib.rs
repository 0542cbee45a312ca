// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical aggregation of conformance-test results.
//!
//! This crate ingests streams of individual test outcomes, each identified by a
//! hierarchical test query, a set of environment tags, a status, a duration and
//! an exoneration-eligibility flag, and produces a deduplicated, sorted record
//! set suitable for reporting, diffing and hierarchical querying.
//!
//! The main entry points are:
//!
//! * [`TestResult`]: one observation, with a canonical line-oriented text form.
//! * [`ResultList`]: an ordered collection of results with filtering, variant
//!   enumeration and tag rewriting.
//! * [`merge`]: combines multiple lists into one canonical list, resolving
//!   duplicate observations of the same (query, tags) pair.
//! * [`read_results`]/[`write_results`] and [`load`]/[`save`]: the line-based
//!   serialization format.
//!
//! Test queries are externally defined: the engine is generic over the
//! [`Query`] trait, which supplies parsing, total ordering and hierarchical
//! containment. [`SimpleQuery`] is a minimal built-in implementation for flat
//! `:`-separated namespaces.

pub mod errors;

mod duration;
mod list;
mod merge;
mod query;
mod record;
mod serialize;
mod status;
mod tags;

pub use duration::{format_duration, parse_duration};
pub use list::ResultList;
pub use merge::{deduplicate, merge, merge_with_policy};
pub use query::{Query, ResultTree, SimpleQuery};
pub use record::TestResult;
pub use serialize::{load, read_results, save, write_results};
pub use status::{Status, StatusSet};
pub use tags::{TAG_DELIMITER, Tags, Variant};
