// File export and console previews.
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Serialize report rows to a CSV file, overwriting any existing file.
///
/// Headers come from the rows' serde field names.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print the first `max_rows` rows of a report as a markdown table.
pub fn preview_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuildingSummaryRow;
    use tempfile::TempDir;

    #[test]
    fn csv_export_has_headers_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("building_summary.csv");
        let rows = vec![BuildingSummaryRow {
            building: "Library".to_string(),
            mean: 8.5,
            min: 7.0,
            max: 10.0,
            sum: 17.0,
        }];
        write_csv(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("building,mean,min,max,sum"));
        assert_eq!(lines.next(), Some("Library,8.5,7.0,10.0,17.0"));
    }

    #[test]
    fn csv_export_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents\nstale\nstale\n").unwrap();
        let rows = vec![BuildingSummaryRow {
            building: "Gym".to_string(),
            mean: 1.0,
            min: 1.0,
            max: 1.0,
            sum: 1.0,
        }];
        write_csv(&path, &rows).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 2);
    }
}
