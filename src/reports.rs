// Aggregation over the unified reading table.
//
// All functions here are pure: they take the (already sorted) table and
// return report rows, leaving file output to `output` and `main`.
use crate::types::{BuildingSummaryRow, CampusSummary, Reading};
use crate::util::mean;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Sum of kWh per calendar day, ascending. Days with no readings are absent
/// (sparse buckets, not zero-filled).
pub fn daily_totals(data: &[Reading]) -> Vec<(NaiveDate, f64)> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in data {
        *buckets.entry(r.timestamp.date()).or_insert(0.0) += r.kwh;
    }
    buckets.into_iter().collect()
}

/// Sum of kWh per ISO week, keyed by the Monday that starts the week,
/// ascending and sparse like `daily_totals`.
pub fn weekly_totals(data: &[Reading]) -> Vec<(NaiveDate, f64)> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in data {
        *buckets.entry(week_start(r.timestamp.date())).or_insert(0.0) += r.kwh;
    }
    buckets.into_iter().collect()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Group by building with {mean, min, max, sum} over kWh.
///
/// Rows come out in order of each building's first appearance in the table,
/// so downstream "largest" selections resolve ties to the first occurrence.
pub fn building_summary(data: &[Reading]) -> Vec<BuildingSummaryRow> {
    struct Acc {
        building: String,
        values: Vec<f64>,
    }
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();
    for r in data {
        let i = *index.entry(r.building.clone()).or_insert_with(|| {
            groups.push(Acc {
                building: r.building.clone(),
                values: Vec::new(),
            });
            groups.len() - 1
        });
        groups[i].values.push(r.kwh);
    }

    groups
        .into_iter()
        .map(|g| {
            let min = g.values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = g.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            BuildingSummaryRow {
                mean: mean(&g.values),
                min,
                max,
                sum: g.values.iter().sum(),
                building: g.building,
            }
        })
        .collect()
}

/// Headline figures: grand total, top-consuming building, peak reading.
///
/// Both "largest" selections use a strictly-greater comparison, so ties keep
/// the earliest candidate in table order.
///
/// Returns `None` for an empty table; callers stop before this in practice.
pub fn campus_summary(data: &[Reading], summary: &[BuildingSummaryRow]) -> Option<CampusSummary> {
    let first = data.first()?;
    let total_kwh: f64 = data.iter().map(|r| r.kwh).sum();

    let mut top = summary.first()?;
    for row in &summary[1..] {
        if row.sum > top.sum {
            top = row;
        }
    }

    let mut peak = first;
    for r in &data[1..] {
        if r.kwh > peak.kwh {
            peak = r;
        }
    }

    Some(CampusSummary {
        total_kwh,
        top_building: top.building.clone(),
        top_building_kwh: top.sum,
        peak_timestamp: peak.timestamp,
        peak_kwh: peak.kwh,
        peak_building: peak.building.clone(),
    })
}

/// The human-readable report body written to `summary.txt`.
pub fn render_summary_text(s: &CampusSummary) -> String {
    let mut out = String::new();
    out.push_str("CAMPUS ENERGY SUMMARY\n");
    out.push_str("------------------------------\n");
    out.push_str(&format!("Total Campus Consumption: {} kWh\n", s.total_kwh));
    out.push_str(&format!("Highest Consuming Building: {}\n", s.top_building));
    out.push_str(&format!(
        "Peak Load Time: {} ({} kWh)\n",
        s.peak_timestamp.format("%Y-%m-%d %H:%M:%S"),
        s.peak_kwh
    ));
    out.push_str("\nDaily & Weekly charts saved in dashboard.png\n");
    out
}
