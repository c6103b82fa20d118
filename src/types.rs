use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV row as it appears on disk. Everything is kept as an optional
/// string here; `loader` turns it into a typed `Reading` or rejects the file.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "kwh")]
    pub kwh: Option<String>,
}

/// A single meter reading, tagged with the building it came from.
///
/// The building name is derived from the source file name (minus the `.csv`
/// extension), so one input file maps to exactly one building.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub kwh: f64,
    pub building: String,
}

/// Per-building descriptive statistics over the kWh column.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BuildingSummaryRow {
    #[serde(rename = "building")]
    #[tabled(rename = "building")]
    pub building: String,
    #[serde(rename = "mean")]
    #[tabled(rename = "mean")]
    pub mean: f64,
    #[serde(rename = "min")]
    #[tabled(rename = "min")]
    pub min: f64,
    #[serde(rename = "max")]
    #[tabled(rename = "max")]
    pub max: f64,
    #[serde(rename = "sum")]
    #[tabled(rename = "sum")]
    pub sum: f64,
}

/// Headline figures for the whole campus, written to `summary.txt` and,
/// machine-readable, to `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct CampusSummary {
    pub total_kwh: f64,
    pub top_building: String,
    pub top_building_kwh: f64,
    pub peak_timestamp: NaiveDateTime,
    pub peak_kwh: f64,
    pub peak_building: String,
}
