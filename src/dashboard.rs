// Three-panel dashboard rendering: daily line, weekly bars, raw scatter.
use crate::types::Reading;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 1200;

/// Render the dashboard PNG from the three aggregate views.
///
/// Panels share the image vertically. Empty input is a no-op; the caller
/// stops earlier on an empty table.
pub fn render_dashboard(
    path: &Path,
    daily: &[(NaiveDate, f64)],
    weekly: &[(NaiveDate, f64)],
    data: &[Reading],
) -> Result<(), Box<dyn Error>> {
    if data.is_empty() || daily.is_empty() || weekly.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    draw_daily_line(&panels[0], daily)?;
    draw_weekly_bars(&panels[1], weekly)?;
    draw_scatter(&panels[2], data)?;

    root.present()?;
    Ok(())
}

fn draw_daily_line(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    daily: &[(NaiveDate, f64)],
) -> Result<(), Box<dyn Error>> {
    let (start, end) = date_span(daily);
    let y_max = padded_max(daily.iter().map(|(_, v)| *v));

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Electricity Consumption", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .y_desc("kWh")
        .draw()?;

    chart.draw_series(LineSeries::new(
        daily.iter().map(|(d, v)| (*d, *v)),
        &BLUE,
    ))?;
    Ok(())
}

fn draw_weekly_bars(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    weekly: &[(NaiveDate, f64)],
) -> Result<(), Box<dyn Error>> {
    let y_max = padded_max(weekly.iter().map(|(_, v)| *v));

    // Index axis with one slot per week; labels map back to the week start.
    let mut chart = ChartBuilder::on(area)
        .caption("Weekly Electricity Consumption", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..weekly.len(), 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_labels(weekly.len().min(10))
        .x_label_formatter(&|i: &usize| {
            weekly
                .get(*i)
                .map(|(d, _)| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .y_desc("kWh")
        .draw()?;

    chart.draw_series(weekly.iter().enumerate().map(|(i, (_, v))| {
        Rectangle::new([(i, 0.0), (i + 1, *v)], BLUE.filled())
    }))?;
    Ok(())
}

fn draw_scatter(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    data: &[Reading],
) -> Result<(), Box<dyn Error>> {
    let (start, end) = time_span(data);
    let y_max = padded_max(data.iter().map(|r| r.kwh));

    let mut chart = ChartBuilder::on(area)
        .caption("Hourly Consumption", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(RangedDateTime::from(start..end), 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_label_formatter(&|t: &NaiveDateTime| t.format("%m-%d %H:%M").to_string())
        .x_desc("Time")
        .y_desc("kWh")
        .draw()?;

    chart.draw_series(
        data.iter()
            .map(|r| Circle::new((r.timestamp, r.kwh), 3, BLUE.filled())),
    )?;
    Ok(())
}

/// Upper y-axis bound with headroom; always positive so the chart builds
/// even when every value is zero.
fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Date range covering the daily buckets, widened when it would collapse
/// to a single point.
fn date_span(daily: &[(NaiveDate, f64)]) -> (NaiveDate, NaiveDate) {
    let start = daily.first().map(|(d, _)| *d).unwrap_or_default();
    let end = daily.last().map(|(d, _)| *d).unwrap_or_default();
    if start == end {
        (start, end + Duration::days(1))
    } else {
        (start, end)
    }
}

fn time_span(data: &[Reading]) -> (NaiveDateTime, NaiveDateTime) {
    // The table is sorted by timestamp before rendering.
    let start = data.first().map(|r| r.timestamp).unwrap_or_default();
    let end = data.last().map(|r| r.timestamp).unwrap_or_default();
    if start == end {
        (start, end + Duration::hours(1))
    } else {
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_max_adds_headroom() {
        assert!((padded_max([10.0, 20.0].into_iter()) - 22.0).abs() < 1e-9);
    }

    #[test]
    fn padded_max_of_zeros_is_positive() {
        assert_eq!(padded_max([0.0, 0.0].into_iter()), 1.0);
        assert_eq!(padded_max(std::iter::empty()), 1.0);
    }

    #[test]
    fn single_day_span_is_widened() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let (start, end) = date_span(&[(d, 5.0)]);
        assert_eq!(start, d);
        assert_eq!(end, d + Duration::days(1));
    }

    #[test]
    fn multi_day_span_uses_endpoints() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let (start, end) = date_span(&[(a, 5.0), (b, 6.0)]);
        assert_eq!((start, end), (a, b));
    }
}
