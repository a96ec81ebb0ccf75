//! Zonal-statistics table ingestion.
//!
//! The external geoprocessing toolkit reports zonal statistics as CSV: a
//! header row, then one row per zone with the zone id in column 0 and the
//! statistic of interest in column 3. Zone ids arrive as floats
//! ("2.0") even though classification only ever emits whole numbers; the
//! float is truncated toward zero exactly once, here.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SlideError};

/// Discrete class bucket identifier.
pub type ClassLabel = i32;

/// Column holding the statistic (count or sum) in toolkit CSV output.
const STAT_COLUMN: usize = 3;

/// Truncate-toward-zero conversion applied to every raw class value.
#[inline]
pub fn class_label(raw: f64) -> ClassLabel {
    raw as ClassLabel
}

/// Parse a zonal-statistics CSV into class -> statistic.
/// Later rows for the same class overwrite earlier ones.
pub fn zonal_table_from_csv(path: &Path) -> Result<BTreeMap<ClassLabel, f64>> {
    let file = File::open(path)?;
    zonal_table_from_reader(file, &path.display().to_string())
}

/// Parse the ordered class universe from a unique-values report CSV,
/// preserving row order. Only column 0 is read.
pub fn class_universe_from_csv(path: &Path) -> Result<Vec<ClassLabel>> {
    let file = File::open(path)?;
    class_universe_from_reader(file, &path.display().to_string())
}

pub fn zonal_table_from_reader<R: Read>(reader: R, origin: &str) -> Result<BTreeMap<ClassLabel, f64>> {
    let mut out = BTreeMap::new();
    for (line, record) in records(reader, origin)? {
        let class = parse_field(&record, 0, origin, line)?;
        let value = parse_field(&record, STAT_COLUMN, origin, line)?;
        out.insert(class_label(class), value);
    }
    Ok(out)
}

pub fn class_universe_from_reader<R: Read>(reader: R, origin: &str) -> Result<Vec<ClassLabel>> {
    let mut out = Vec::new();
    for (line, record) in records(reader, origin)? {
        let class = parse_field(&record, 0, origin, line)?;
        out.push(class_label(class));
    }
    Ok(out)
}

/// Data records with their 1-based file line numbers (header is line 1).
fn records<R: Read>(reader: R, origin: &str) -> Result<Vec<(usize, csv::StringRecord)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let line = i + 2;
        let record = record.map_err(|_| SlideError::MalformedRecord {
            path: origin.to_string(),
            line,
        })?;
        out.push((line, record));
    }
    Ok(out)
}

fn parse_field(record: &csv::StringRecord, index: usize, origin: &str, line: usize) -> Result<f64> {
    record
        .get(index)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| SlideError::MalformedRecord {
            path: origin.to_string(),
            line,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONAL: &str = "zone,count,sum,stat\n\
                         1.0,10,3,40.0\n\
                         2.0,20,6,360.0\n\
                         3.0,5,1,0.0\n";

    #[test]
    fn zonal_table_truncates_float_ids() {
        let table = zonal_table_from_reader(ZONAL.as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[&1], 40.0);
        assert_eq!(table[&2], 360.0);
        assert_eq!(table[&3], 0.0);
    }

    #[test]
    fn universe_preserves_row_order() {
        let csv = "value,count\n3.0,5\n0.0,2\n2.0,9\n";
        let universe = class_universe_from_reader(csv.as_bytes(), "test").unwrap();
        assert_eq!(universe, vec![3, 0, 2]);
    }

    #[test]
    fn negative_ids_truncate_toward_zero() {
        let csv = "value,a,b,stat\n-1.7,0,0,5.0\n";
        let table = zonal_table_from_reader(csv.as_bytes(), "test").unwrap();
        assert_eq!(table[&-1], 5.0);
    }

    #[test]
    fn non_numeric_id_is_malformed_record() {
        let csv = "value,a,b,stat\nnope,0,0,5.0\n";
        let err = zonal_table_from_reader(csv.as_bytes(), "stats.csv").unwrap_err();
        match err {
            SlideError::MalformedRecord { path, line } => {
                assert_eq!(path, "stats.csv");
                assert_eq!(line, 2);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn short_row_is_malformed_record() {
        let csv = "value,a,b,stat\n1.0,2\n";
        assert!(matches!(
            zonal_table_from_reader(csv.as_bytes(), "test"),
            Err(SlideError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn duplicate_class_rows_last_wins() {
        let csv = "value,a,b,stat\n1.0,0,0,5.0\n1.2,0,0,9.0\n";
        let table = zonal_table_from_reader(csv.as_bytes(), "test").unwrap();
        assert_eq!(table[&1], 9.0);
    }
}
