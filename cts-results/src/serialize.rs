// Copyright (c) The cts-results Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and writing the line-oriented result format.
//!
//! One record per line; no header or trailer. A blank line is not tolerated:
//! any malformed line aborts the whole read, so silently-partial result sets
//! are never produced.

use crate::{
    Query, ResultList, TestResult,
    errors::{LoadError, ReadResultsError, SaveError},
};
use camino::Utf8Path;
use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Write},
};
use tracing::debug;

/// Reads a result list from a stream, one record per line.
pub fn read_results<Q: Query>(reader: impl BufRead) -> Result<ResultList<Q>, ReadResultsError> {
    let mut results = ResultList::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let record = TestResult::parse(&line).map_err(|error| ReadResultsError::Parse {
            line_number: index + 1,
            error,
        })?;
        results.push(record);
    }
    Ok(results)
}

/// Writes a result list to a stream, one canonical line per record, in list
/// order.
pub fn write_results<Q: Query>(
    mut writer: impl Write,
    results: &ResultList<Q>,
) -> io::Result<()> {
    for record in results {
        writeln!(writer, "{record}")?;
    }
    Ok(())
}

/// Loads a result list from a file.
pub fn load<Q: Query>(path: &Utf8Path) -> Result<ResultList<Q>, LoadError> {
    let file = File::open(path).map_err(|error| LoadError::new(path, error.into()))?;
    let results = read_results(BufReader::new(file)).map_err(|error| LoadError::new(path, error))?;
    debug!(%path, records = results.len(), "loaded results");
    Ok(results)
}

/// Saves a result list to a file, creating parent directories as needed.
pub fn save<Q: Query>(path: &Utf8Path, results: &ResultList<Q>) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| SaveError::new(path, error))?;
    }
    let file = File::create(path).map_err(|error| SaveError::new(path, error))?;
    let mut writer = BufWriter::new(file);
    write_results(&mut writer, results).map_err(|error| SaveError::new(path, error))?;
    writer.flush().map_err(|error| SaveError::new(path, error))?;
    debug!(%path, records = results.len(), "saved results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimpleQuery;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const CANONICAL: &str = indoc! {"
        suite:a:x debug,gpu Pass 1.5s false
        suite:a:y Fail 2s true
        suite:b:z gpu Crash 500ms false
    "};

    #[test]
    fn read_write_round_trip() {
        let results: ResultList<SimpleQuery> = read_results(CANONICAL.as_bytes()).unwrap();
        assert_eq!(results.len(), 3);

        let mut out = Vec::new();
        write_results(&mut out, &results).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), CANONICAL);
    }

    #[test]
    fn blank_line_aborts_the_read() {
        let input = "suite:a Pass 1s false\n\nsuite:b Pass 1s false\n";
        let err = read_results::<SimpleQuery>(input.as_bytes()).unwrap_err();
        match err {
            ReadResultsError::Parse { line_number, error } => {
                assert_eq!(line_number, 2);
                assert_eq!(error.line(), "");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_save_round_trip() {
        let dir = camino_tempfile::tempdir().unwrap();
        // The parent directory does not exist yet; save must create it.
        let path = dir.path().join("nested/results.txt");

        let results: ResultList<SimpleQuery> = read_results(CANONICAL.as_bytes()).unwrap();
        save(&path, &results).unwrap();
        let loaded: ResultList<SimpleQuery> = load(&path).unwrap();
        assert_eq!(loaded, results);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let err = load::<SimpleQuery>(Utf8Path::new("does/not/exist.txt")).unwrap_err();
        assert_eq!(err.path().as_str(), "does/not/exist.txt");
    }
}
