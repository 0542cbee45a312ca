// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while parsing, reading and writing result sets.

use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use thiserror::Error;

/// An error that occurs while parsing a single result record line.
///
/// Always carries the offending line so callers can report the exact input
/// that was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid result line `{line}`: {kind}")]
pub struct ParseError {
    line: String,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            line: line.into(),
            kind,
        }
    }

    /// Returns the raw line that failed to parse.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the kind of parse failure.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The kinds of failure [`ParseError`] can carry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The line did not split into 4 (untagged) or 5 (tagged) fields.
    #[error("expected 4 or 5 space-delimited fields, found {0}")]
    FieldCount(usize),

    /// The status field was not a recognized status code.
    #[error(transparent)]
    Status(#[from] StatusParseError),

    /// The duration field did not parse.
    #[error(transparent)]
    Duration(#[from] DurationParseError),

    /// The exoneration field was not `true` or `false`.
    #[error("invalid boolean `{0}`, expected `true` or `false`")]
    Bool(String),
}

/// Error returned while parsing a [`Status`](crate::Status) from a string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "unrecognized status `{input}` (known statuses: {})",
    crate::Status::variants().join(", "),
)]
pub struct StatusParseError {
    input: String,
}

impl StatusParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Error returned while parsing a duration from its decimal-with-unit form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid duration `{input}`")]
pub struct DurationParseError {
    input: String,
}

impl DurationParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurs while reading a result stream.
///
/// Any malformed line aborts the entire read: partial result sets are never
/// produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadResultsError {
    /// A line failed to parse.
    #[error("failed to parse line {line_number}")]
    Parse {
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// The underlying parse error, carrying the raw line.
        #[source]
        error: ParseError,
    },

    /// An I/O error occurred while reading.
    #[error("failed to read result stream")]
    Io(#[from] io::Error),
}

/// An error that occurs while loading results from a file.
#[derive(Debug, Error)]
#[error("failed to load results from `{path}`")]
pub struct LoadError {
    path: Utf8PathBuf,
    #[source]
    error: ReadResultsError,
}

impl LoadError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, error: ReadResultsError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// Returns the path that failed to load.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// An error that occurs while saving results to a file.
#[derive(Debug, Error)]
#[error("failed to save results to `{path}`")]
pub struct SaveError {
    path: Utf8PathBuf,
    #[source]
    error: io::Error,
}

impl SaveError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, error: io::Error) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    /// Returns the path that failed to save.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}
