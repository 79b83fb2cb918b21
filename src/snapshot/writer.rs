//! CSV snapshot writer
//!
//! Serializes an accumulated record set to a fixed-schema CSV file. The
//! writer never fails on record content: absent fields render as empty
//! strings (`false` for the active flag). Only destination I/O can fail.

use crate::client::TickerRecord;
use crate::Result;
use std::fs;
use std::path::Path;

/// Column order of the snapshot file, fixed across runs
pub const CSV_HEADER: [&str; 12] = [
    "ticker",
    "name",
    "market",
    "locale",
    "primary_exchange",
    "type",
    "active",
    "currency_name",
    "cik",
    "composite_figi",
    "share_class_figi",
    "last_updated_utc",
];

/// Writes the full record set to `path`, overwriting any previous snapshot
///
/// The destination directory is created if absent. Rows are written to a
/// temporary sibling first and renamed into place, so readers never observe
/// a partial snapshot.
///
/// # Arguments
///
/// * `records` - The complete record set for this run
/// * `path` - Destination CSV path
///
/// # Returns
///
/// * `Ok(u64)` - Byte size of the written file
/// * `Err(SweepError)` - Destination I/O failure
pub fn write_snapshot(records: &[TickerRecord], path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_sibling(path);
    let mut writer = csv::Writer::from_path(&tmp_path)?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(row_fields(record))?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, path)?;

    let bytes = fs::metadata(path)?.len();
    Ok(bytes)
}

/// Renders one record in the fixed column order, defaulting absent fields
fn row_fields(record: &TickerRecord) -> [&str; 12] {
    [
        record.ticker.as_deref().unwrap_or(""),
        record.name.as_deref().unwrap_or(""),
        record.market.as_deref().unwrap_or(""),
        record.locale.as_deref().unwrap_or(""),
        record.primary_exchange.as_deref().unwrap_or(""),
        record.kind.as_deref().unwrap_or(""),
        if record.active.unwrap_or(false) {
            "true"
        } else {
            "false"
        },
        record.currency_name.as_deref().unwrap_or(""),
        record.cik.as_deref().unwrap_or(""),
        record.composite_figi.as_deref().unwrap_or(""),
        record.share_class_figi.as_deref().unwrap_or(""),
        record.last_updated_utc.as_deref().unwrap_or(""),
    ]
}

/// Temp path next to the destination, same filesystem so rename is atomic
fn temp_sibling(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn full_record() -> TickerRecord {
        TickerRecord {
            ticker: Some("ZWS".to_string()),
            name: Some("Zurn Elkay Water Solutions Corporation".to_string()),
            market: Some("stocks".to_string()),
            locale: Some("us".to_string()),
            primary_exchange: Some("XNYS".to_string()),
            kind: Some("CS".to_string()),
            active: Some(true),
            currency_name: Some("usd".to_string()),
            cik: Some("0001439288".to_string()),
            composite_figi: Some("BBG000H8R0N8".to_string()),
            share_class_figi: Some("BBG001T36GB5".to_string()),
            last_updated_utc: Some("2025-09-11T06:11:10.586204443Z".to_string()),
        }
    }

    fn sparse_record(ticker: &str) -> TickerRecord {
        TickerRecord {
            ticker: Some(ticker.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_full_and_sparse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickers.csv");

        let records = vec![full_record(), sparse_record("AAA")];
        let bytes = write_snapshot(&records, &path).unwrap();
        assert!(bytes > 0);
        assert_eq!(bytes, fs::metadata(&path).unwrap().len());

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();
        assert_eq!(header, CSV_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);

        // Full record keeps its values
        assert_eq!(&rows[0][0], "ZWS");
        assert_eq!(&rows[0][6], "true");

        // Sparse record defaults every non-ticker field
        assert_eq!(&rows[1][0], "AAA");
        for i in 1..12 {
            if i == 6 {
                assert_eq!(&rows[1][i], "false");
            } else {
                assert_eq!(&rows[1][i], "");
            }
        }
    }

    #[test]
    fn test_empty_record_set_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickers.csv");

        write_snapshot(&[], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 12);
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_creates_missing_destination_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("tickers.csv");

        write_snapshot(&[sparse_record("AAA")], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickers.csv");

        write_snapshot(&[sparse_record("AAA"), sparse_record("BBB")], &path).unwrap();
        write_snapshot(&[sparse_record("CCC")], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "CCC");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickers.csv");

        write_snapshot(&[sparse_record("AAA")], &path).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["tickers.csv"]);
    }
}
