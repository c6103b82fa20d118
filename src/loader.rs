use crate::types::{RawRow, Reading};
use crate::util::{parse_f64_safe, parse_timestamp_safe};
use csv::ReaderBuilder;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Diagnostics from a load pass, printed by the caller.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub total_rows: usize,
}

/// Scan `dir` for `*.csv` files and combine them into one unified table.
///
/// Each file contributes rows tagged with a building name taken from the file
/// name minus its extension. A parse failure anywhere in a file logs the error
/// and skips that whole file; the remaining files still load. A missing
/// directory or a directory without CSV files yields an empty table after a
/// logged message, never an error.
pub fn load_all_data(dir: &Path) -> (Vec<Reading>, LoadReport) {
    let mut combined: Vec<Reading> = Vec::new();
    let mut report = LoadReport::default();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            println!("Data folder does not exist!");
            return (combined, report);
        }
    };

    let mut csv_files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();
    // Deterministic load order regardless of directory iteration order.
    csv_files.sort();

    if csv_files.is_empty() {
        println!("No CSV files found in data folder!");
        return (combined, report);
    }

    for path in &csv_files {
        let building = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        match parse_file(path, &building) {
            Ok(mut rows) => {
                report.files_loaded += 1;
                report.total_rows += rows.len();
                combined.append(&mut rows);
            }
            Err(e) => {
                report.files_skipped += 1;
                eprintln!("Error reading file {}: {}", path.display(), e);
            }
        }
    }

    (combined, report)
}

/// Parse one building's CSV file into typed readings.
///
/// The whole file is rejected on the first bad row; per-file skipping is the
/// caller's job.
fn parse_file(path: &Path, building: &str) -> Result<Vec<Reading>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut rows = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        let timestamp = parse_timestamp_safe(row.timestamp.as_deref())
            .ok_or_else(|| format!("row {}: invalid timestamp", idx + 1))?;
        let kwh = parse_f64_safe(row.kwh.as_deref())
            .ok_or_else(|| format!("row {}: invalid kwh value", idx + 1))?;
        rows.push(Reading {
            timestamp,
            kwh,
            building: building.to_string(),
        });
    }

    Ok(rows)
}
