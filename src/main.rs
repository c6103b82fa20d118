// Entry point and high-level flow.
//
// The pipeline mirrors the batch reporting sequence:
// - load every per-building CSV from the data folder into one table,
// - stop early when there is nothing to process,
// - aggregate into daily/weekly totals and a per-building summary,
// - export the cleaned table and the summary as CSV,
// - render the three-panel dashboard and write the text/JSON summaries.
mod dashboard;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use std::path::Path;

const DATA_DIR: &str = "data";
const CLEANED_CSV: &str = "cleaned_energy_data.csv";
const SUMMARY_CSV: &str = "building_summary.csv";
const DASHBOARD_PNG: &str = "dashboard.png";
const SUMMARY_TXT: &str = "summary.txt";
const SUMMARY_JSON: &str = "summary.json";

fn main() {
    run(Path::new(DATA_DIR), Path::new("."));
}

/// Run the whole report once. Individual output failures are reported and do
/// not abort the remaining outputs; an empty input table stops the run after
/// a message, without a failure exit code.
fn run(data_dir: &Path, out_dir: &Path) {
    let (mut data, load_report) = loader::load_all_data(data_dir);
    if data.is_empty() {
        println!("No data to process!");
        return;
    }
    println!(
        "Processing dataset... ({} rows loaded from {} files)",
        util::format_int(load_report.total_rows as i64),
        util::format_int(load_report.files_loaded as i64)
    );
    if load_report.files_skipped > 0 {
        println!(
            "Note: {} files skipped due to parse errors.",
            util::format_int(load_report.files_skipped as i64)
        );
    }

    // Stable sort keeps table order for equal timestamps, which is what the
    // tie-break rules in the summary rely on.
    data.sort_by_key(|r| r.timestamp);

    let daily = reports::daily_totals(&data);
    let weekly = reports::weekly_totals(&data);
    let summary_rows = reports::building_summary(&data);

    if let Err(e) = output::write_csv(&out_dir.join(CLEANED_CSV), &data) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = output::write_csv(&out_dir.join(SUMMARY_CSV), &summary_rows) {
        eprintln!("Write error: {}", e);
    }
    println!("Cleaned data exported.\n");

    println!("Building Summary");
    output::preview_table(&summary_rows, 10);

    match dashboard::render_dashboard(&out_dir.join(DASHBOARD_PNG), &daily, &weekly, &data) {
        Ok(()) => println!("Dashboard saved as {}", DASHBOARD_PNG),
        Err(e) => eprintln!("Dashboard error: {}", e),
    }

    if let Some(campus) = reports::campus_summary(&data, &summary_rows) {
        let text = reports::render_summary_text(&campus);
        if let Err(e) = std::fs::write(out_dir.join(SUMMARY_TXT), text) {
            eprintln!("Write error: {}", e);
        }
        if let Err(e) = output::write_json(&out_dir.join(SUMMARY_JSON), &campus) {
            eprintln!("Write error: {}", e);
        }
        println!("Summary written to {}", SUMMARY_TXT);
        println!(
            "Total Campus Consumption: {} kWh",
            util::format_number(campus.total_kwh, 2)
        );
    }

    println!("ALL TASKS COMPLETED SUCCESSFULLY.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_input_directory_produces_no_output_files() {
        let data_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();

        run(data_dir.path(), out_dir.path());

        let outputs = fs::read_dir(out_dir.path()).unwrap().count();
        assert_eq!(outputs, 0);
    }

    #[test]
    fn missing_input_directory_produces_no_output_files() {
        let out_dir = TempDir::new().unwrap();
        run(&out_dir.path().join("no_such_dir"), out_dir.path());
        assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn cleaned_export_contains_every_parsed_row() {
        let data_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        fs::write(
            data_dir.path().join("A.csv"),
            "timestamp,kwh\n2024-01-01T00:00,10\n",
        )
        .unwrap();
        fs::write(
            data_dir.path().join("B.csv"),
            "timestamp,kwh\n2024-01-01T00:00,10\n",
        )
        .unwrap();

        run(data_dir.path(), out_dir.path());

        let cleaned = fs::read_to_string(out_dir.path().join(CLEANED_CSV)).unwrap();
        // Header plus one row per input file.
        assert_eq!(cleaned.lines().count(), 3);
        assert_eq!(cleaned.lines().next(), Some("timestamp,kwh,building"));

        let summary = fs::read_to_string(out_dir.path().join(SUMMARY_TXT)).unwrap();
        assert!(summary.contains("Total Campus Consumption: 20 kWh"));
        assert!(summary.contains("Highest Consuming Building: A"));
    }
}
