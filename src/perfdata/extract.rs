use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::{Paths, Perfdata};

use super::error::ExtractionError;
use super::model::PerfRecord;
use super::parser::parse_line;

/// Copies the live perfdata file to the working copy and, when configured,
/// empties the live file so the monitoring tool starts a fresh one.
///
/// Returns the number of bytes copied.
pub fn snapshot(paths: &Paths) -> Result<u64, ExtractionError> {
    let copied_bytes = fs::copy(&paths.original_file, &paths.copied_file).map_err(|source| {
        ExtractionError::Copy {
            from: paths.original_file.display().to_string(),
            to: paths.copied_file.display().to_string(),
            source,
        }
    })?;

    if paths.truncate_source {
        if let Err(error) = truncate(&paths.original_file) {
            log::warn!(
                "perfdata_truncate_failed path={} error={}",
                paths.original_file.display(),
                error
            );
        }
    }

    Ok(copied_bytes)
}

fn truncate(path: &Path) -> Result<(), std::io::Error> {
    OpenOptions::new().write(true).truncate(true).open(path)?;
    Ok(())
}

/// Reads `path` line by line and keeps every line carrying the configured metric.
/// Lines that do not parse are skipped; only I/O failures are errors.
pub fn extract_records(path: &Path, perfdata: &Perfdata) -> Result<Vec<PerfRecord>, ExtractionError> {
    let path_str = path.display().to_string();
    let file = File::open(path).map_err(|source| ExtractionError::Open {
        path: path_str.clone(),
        source,
    })?;

    let mut records = Vec::new();
    let mut skipped_lines = 0usize;
    for (index, chunk) in BufReader::new(file).split(b'\n').enumerate() {
        let bytes = chunk.map_err(|source| ExtractionError::Read {
            path: path_str.clone(),
            source,
        })?;

        let Ok(line) = std::str::from_utf8(&bytes) else {
            skipped_lines += 1;
            log::debug!("perfdata_line_skipped line={} reason=invalid_utf8", index + 1);
            continue;
        };
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line, &perfdata.metric_key, perfdata.delimiter) {
            Some(record) => records.push(record),
            None => {
                skipped_lines += 1;
                log::debug!("perfdata_line_skipped line={} reason=no_metric", index + 1);
            }
        }
    }

    log::info!(
        "perfdata_extracted path={} metric={} records={} skipped_lines={}",
        path_str,
        perfdata.metric_key,
        records.len(),
        skipped_lines
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::config::{Paths, Perfdata};

    use super::{extract_records, snapshot};
    use crate::perfdata::ExtractionError;

    fn perfdata() -> Perfdata {
        Perfdata {
            metric_key: "Ambient_temperatureC".to_string(),
            delimiter: '\t',
        }
    }

    fn paths(dir: &std::path::Path, truncate_source: bool) -> Paths {
        Paths {
            original_file: dir.join("service-perfdata"),
            copied_file: dir.join("service-perfdata.copy"),
            graph_file: PathBuf::from("unused.png"),
            excel_file: PathBuf::from("unused.xlsx"),
            truncate_source,
            cleanup_working_copy: true,
        }
    }

    #[test]
    fn keeps_file_order_and_drops_malformed_lines() {
        let temp = tempdir().expect("tempdir should be created");
        let path = temp.path().join("perfdata");
        fs::write(
            &path,
            "1718000060\thost2\tsvc\tAmbient_temperatureC=50.1\n\
             garbage without tabs\n\
             1718000000\thost1\tsvc\tPowerW=200\n\
             \n\
             1718000000\thost1\tsvc\tAmbient_temperatureC=45.2;38;43\r\n",
        )
        .expect("perfdata should be written");

        let records = extract_records(&path, &perfdata()).expect("extraction should succeed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].host, "host2");
        assert_eq!(records[1].host, "host1");
        assert!((records[1].value - 45.2).abs() < f64::EPSILON);
    }

    #[test]
    fn skips_invalid_utf8_lines() {
        let temp = tempdir().expect("tempdir should be created");
        let path = temp.path().join("perfdata");
        let mut content = b"1718000000\thost1\tsvc\tAmbient_temperatureC=40\n".to_vec();
        content.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(&path, content).expect("perfdata should be written");

        let records = extract_records(&path, &perfdata()).expect("extraction should succeed");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn fails_only_when_file_cannot_be_opened() {
        let temp = tempdir().expect("tempdir should be created");
        let error = extract_records(&temp.path().join("missing"), &perfdata())
            .expect_err("missing file should fail");
        assert!(matches!(error, ExtractionError::Open { .. }));
    }

    #[test]
    fn snapshot_copies_and_truncates_source() {
        let temp = tempdir().expect("tempdir should be created");
        let paths = paths(temp.path(), true);
        fs::write(&paths.original_file, "1718000000\thost1\tsvc\tAmbient_temperatureC=40\n")
            .expect("source should be written");

        let copied = snapshot(&paths).expect("snapshot should succeed");
        assert!(copied > 0);
        assert_eq!(
            fs::read_to_string(&paths.copied_file).expect("copy readable"),
            "1718000000\thost1\tsvc\tAmbient_temperatureC=40\n"
        );
        assert!(fs::read_to_string(&paths.original_file)
            .expect("source readable")
            .is_empty());
    }

    #[test]
    fn snapshot_leaves_source_when_truncation_disabled() {
        let temp = tempdir().expect("tempdir should be created");
        let paths = paths(temp.path(), false);
        fs::write(&paths.original_file, "data\n").expect("source should be written");

        snapshot(&paths).expect("snapshot should succeed");
        assert_eq!(
            fs::read_to_string(&paths.original_file).expect("source readable"),
            "data\n"
        );
    }

    #[test]
    fn snapshot_fails_for_missing_source() {
        let temp = tempdir().expect("tempdir should be created");
        let error = snapshot(&paths(temp.path(), true)).expect_err("missing source should fail");
        assert!(matches!(error, ExtractionError::Copy { .. }));
    }
}
