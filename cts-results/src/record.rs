// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    Query, Status, Tags,
    duration::{format_duration, parse_duration},
    errors::{ParseError, ParseErrorKind},
};
use std::{cmp::Ordering, fmt, time::Duration};

/// A single test observation.
///
/// A record's identity for deduplication purposes is the (query, canonical
/// tags string) pair; status, duration and exoneration eligibility are
/// payload. Records are immutable values: transformations always produce new
/// records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResult<Q> {
    /// The test this record describes.
    pub query: Q,
    /// The environment the test ran under.
    pub tags: Tags,
    /// The outcome.
    pub status: Status,
    /// How long the test took.
    pub duration: Duration,
    /// Whether this record may be discarded in favor of a non-exonerable
    /// duplicate for the same (query, tags).
    pub may_exonerate: bool,
}

impl<Q: Query> TestResult<Q> {
    /// Compares two records by (query, canonical tags string, status code).
    ///
    /// Duration and exoneration eligibility are excluded: this is the order
    /// used by [`ResultList::sort`](crate::ResultList::sort), and equal-keyed
    /// records with different payloads compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.query
            .cmp(&other.query)
            .then_with(|| self.tags.cmp(&other.tags))
            .then_with(|| self.status.cmp(&other.status))
    }

    /// Parses a record from its canonical line form.
    ///
    /// The line splits on runs of spaces into exactly 4 tokens
    /// (`QUERY STATUS DURATION BOOL`) or 5 tokens
    /// (`QUERY TAGS STATUS DURATION BOOL`). Anything else, or a status,
    /// duration or boolean that fails to parse, is a [`ParseError`] carrying
    /// the offending line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
        let (query, tags, status, duration, may_exonerate) = match tokens.as_slice() {
            [query, status, duration, may_exonerate] => {
                (*query, Tags::new(), *status, *duration, *may_exonerate)
            }
            [query, tags, status, duration, may_exonerate] => {
                let tags = match tags.parse() {
                    Ok(tags) => tags,
                    Err(infallible) => match infallible {},
                };
                (*query, tags, *status, *duration, *may_exonerate)
            }
            other => {
                return Err(ParseError::new(line, ParseErrorKind::FieldCount(other.len())));
            }
        };

        let status: Status = status
            .parse()
            .map_err(|err| ParseError::new(line, ParseErrorKind::Status(err)))?;
        let duration = parse_duration(duration)
            .map_err(|err| ParseError::new(line, ParseErrorKind::Duration(err)))?;
        let may_exonerate = match may_exonerate {
            "true" => true,
            "false" => false,
            other => {
                return Err(ParseError::new(line, ParseErrorKind::Bool(other.to_owned())));
            }
        };

        Ok(Self {
            query: Q::from_text(query),
            tags,
            status,
            duration,
            may_exonerate,
        })
    }
}

impl<Q: Query> fmt::Display for TestResult<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.query)?;
        if !self.tags.is_empty() {
            write!(f, "{} ", self.tags)?;
        }
        write!(
            f,
            "{} {} {}",
            self.status,
            format_duration(self.duration),
            self.may_exonerate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimpleQuery;
    use test_case::test_case;

    fn result(
        query: &str,
        tags: &[&str],
        status: Status,
        duration: Duration,
        may_exonerate: bool,
    ) -> TestResult<SimpleQuery> {
        TestResult {
            query: SimpleQuery::new(query),
            tags: tags.iter().copied().collect(),
            status,
            duration,
            may_exonerate,
        }
    }

    #[test]
    fn display_tagged() {
        let r = result(
            "suite:a:b:c,*",
            &["gpu", "os-x"],
            Status::Fail,
            Duration::from_millis(1_500),
            true,
        );
        assert_eq!(r.to_string(), "suite:a:b:c,* gpu,os-x Fail 1.5s true");
    }

    #[test]
    fn display_untagged_omits_tags_field() {
        let r = result("suite:a:*", &[], Status::Pass, Duration::from_secs(2), false);
        assert_eq!(r.to_string(), "suite:a:* Pass 2s false");
    }

    #[test_case("suite:a:b gpu,debug Pass 1.5s true", 2; "tagged")]
    #[test_case("suite:a:b Pass 1.5s true", 0; "untagged")]
    #[test_case("  suite:a:b   Pass  1.5s   true ", 0; "extra spaces")]
    fn parse_round_trip(line: &str, tag_count: usize) {
        let r: TestResult<SimpleQuery> = TestResult::parse(line).unwrap();
        assert_eq!(r.tags.len(), tag_count);
        let reparsed = TestResult::parse(&r.to_string()).unwrap();
        assert_eq!(r, reparsed);
    }

    #[test_case(""; "blank line")]
    #[test_case("suite:a:b Pass 1.5s"; "three tokens")]
    #[test_case("suite:a:b x y Pass 1.5s true"; "six tokens")]
    #[test_case("suite:a:b Passes 1.5s true"; "bad status")]
    #[test_case("suite:a:b Pass soon true"; "bad duration")]
    #[test_case("suite:a:b Pass 1.5s yes"; "bad boolean")]
    fn parse_rejects(line: &str) {
        let err = TestResult::<SimpleQuery>::parse(line).unwrap_err();
        assert_eq!(err.line(), line);
    }

    #[test]
    fn compare_ignores_payload() {
        let a = result("suite:a", &["t1"], Status::Pass, Duration::from_secs(1), true);
        let b = result("suite:a", &["t1"], Status::Pass, Duration::from_secs(9), false);
        assert_eq!(a.compare(&b), Ordering::Equal);
    }

    #[test]
    fn compare_is_query_then_tags_then_status() {
        let base = result("suite:a", &["t1"], Status::Fail, Duration::ZERO, false);
        let later_query = result("suite:b", &["t1"], Status::Abort, Duration::ZERO, false);
        let later_tags = result("suite:a", &["t2"], Status::Abort, Duration::ZERO, false);
        let later_status = result("suite:a", &["t1"], Status::Pass, Duration::ZERO, false);
        for later in [&later_query, &later_tags, &later_status] {
            assert_eq!(base.compare(later), Ordering::Less);
            assert_eq!(later.compare(&base), Ordering::Greater);
        }
    }
}
