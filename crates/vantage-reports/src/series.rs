//! Static trend and forecast series shown next to the reports.

use chrono::NaiveDate;
use vantage_aggregate::{ForecastRow, TrendPoint, TrendWindow};

fn point(period: &str, current: f64, previous: f64, target: f64) -> TrendPoint {
    TrendPoint::new(period, current, previous, target)
}

fn day() -> Vec<TrendPoint> {
    vec![
        point("00:00", 1_200.0, 1_100.0, 1_300.0),
        point("04:00", 800.0, 750.0, 900.0),
        point("08:00", 2_500.0, 2_400.0, 2_600.0),
        point("12:00", 3_200.0, 3_000.0, 3_100.0),
        point("16:00", 2_800.0, 2_700.0, 2_900.0),
        point("20:00", 1_800.0, 1_750.0, 1_900.0),
    ]
}

fn week() -> Vec<TrendPoint> {
    vec![
        point("Week 1", 45_000.0, 42_000.0, 47_000.0),
        point("Week 2", 47_000.0, 44_000.0, 48_000.0),
        point("Week 3", 46_000.0, 45_000.0, 47_500.0),
        point("Week 4", 48_000.0, 46_000.0, 49_000.0),
    ]
}

fn month() -> Vec<TrendPoint> {
    vec![
        point("Jan", 180_000.0, 175_000.0, 185_000.0),
        point("Feb", 185_000.0, 180_000.0, 190_000.0),
        point("Mar", 190_000.0, 185_000.0, 195_000.0),
        point("Apr", 195_000.0, 188_000.0, 200_000.0),
        point("May", 200_000.0, 195_000.0, 205_000.0),
        point("Jun", 205_000.0, 200_000.0, 210_000.0),
    ]
}

/// Weekly snapshots with their observation dates.
pub fn dated() -> Vec<(NaiveDate, TrendPoint)> {
    let at = |m: u32, d: u32| NaiveDate::from_ymd_opt(2024, m, d).unwrap_or_default();
    vec![
        (at(1, 15), point("Jan 15", 15_000.0, 14_000.0, 16_000.0)),
        (at(1, 22), point("Jan 22", 16_000.0, 15_500.0, 16_500.0)),
        (at(1, 29), point("Jan 29", 15_500.0, 16_000.0, 16_200.0)),
        (at(2, 5), point("Feb 05", 17_000.0, 15_800.0, 17_200.0)),
    ]
}

/// Trend points for a comparison window. A custom window keeps the dated
/// snapshots that fall inside its range, bounds included.
pub fn window(window: TrendWindow) -> Vec<TrendPoint> {
    match window {
        TrendWindow::Day => day(),
        TrendWindow::Week => week(),
        TrendWindow::Month => month(),
        TrendWindow::Custom(range) => dated()
            .into_iter()
            .filter(|(date, _)| range.contains(*date))
            .map(|(_, point)| point)
            .collect(),
    }
}

/// Monthly global inventory, actual against forecast.
pub fn inventory_forecast() -> Vec<ForecastRow> {
    vec![
        ForecastRow::new("Jan", 85_000.0, 87_000.0),
        ForecastRow::new("Feb", 82_000.0, 84_000.0),
        ForecastRow::new("Mar", 88_000.0, 86_000.0),
        ForecastRow::new("Apr", 91_000.0, 89_000.0),
        ForecastRow::new("May", 94_000.0, 92_000.0),
        ForecastRow::new("Jun", 96_000.0, 95_000.0),
    ]
}
