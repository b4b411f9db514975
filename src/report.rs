//! Text rendering and CSV export of projection reports.
//!
//! Nothing here feeds back into the numeric core; it only formats what the
//! engine produced.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::error::SimResult;
use crate::types::{HorizonProjection, ProjectionReport, StartPriceSource};

/// Prefix placed on the highest-probability line.
pub const HIGHEST_MARKER: &str = "<- [HIGHEST PROBABILITY] ";

const DATE_FORMAT: &str = "%d %B %Y";

/// Separators and currency prefix for displayed amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands: char,
    pub decimal: char,
    pub currency: &'static str,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands: ',',
            decimal: '.',
            currency: "US$",
        }
    }
}

/// Format `value` with `decimals` fraction digits and grouped thousands.
pub fn format_amount(value: f64, decimals: usize, fmt: NumberFormat) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && raw.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(fmt.thousands);
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(fmt.decimal);
        out.push_str(frac);
    }
    out
}

/// Render one horizon: header, dates and one line per price range.
pub fn render_horizon(ticker: &str, projection: &HorizonProjection, fmt: NumberFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[PRICE PROJECTION {} {} DAYS AHEAD]",
        ticker,
        projection.horizon.days()
    );
    let _ = writeln!(out, "Start date: {}", projection.start_date.format(DATE_FORMAT));
    let _ = writeln!(out, "End date: {}", projection.end_date.format(DATE_FORMAT));

    let highest = projection.histogram.most_likely();
    for (idx, bin) in projection.histogram.bins.iter().enumerate() {
        if Some(idx) == highest {
            out.push_str(HIGHEST_MARKER);
        }
        let _ = writeln!(
            out,
            "{}% chance price between {} and {}",
            format_amount(bin.probability, 1, fmt),
            format_amount(bin.lower, 2, fmt),
            format_amount(bin.upper, 2, fmt)
        );
    }
    out
}

/// Render the statistics header followed by every horizon.
pub fn render_report(ticker: &str, report: &ProjectionReport, fmt: NumberFormat) -> String {
    let mut out = String::new();
    let stats = &report.statistics;
    let _ = writeln!(
        out,
        "Mean daily log-return: {:.5}, daily standard deviation: {:.5}",
        stats.mu, stats.sigma
    );
    let _ = writeln!(
        out,
        "Last close: {}{} ({})",
        fmt.currency,
        format_amount(report.last_close, 2, fmt),
        report.last_date.format(DATE_FORMAT)
    );
    let source = match report.start_price_source {
        StartPriceSource::LastClose => "last close",
        StartPriceSource::Override => "current quote",
    };
    let _ = writeln!(
        out,
        "Start price: {}{} ({})",
        fmt.currency,
        format_amount(report.start_price, 2, fmt),
        source
    );

    for projection in &report.projections {
        out.push('\n');
        out.push_str(&render_horizon(ticker, projection, fmt));
    }
    out
}

#[derive(Serialize)]
struct BinRow {
    horizon_days: u32,
    lower: f64,
    upper: f64,
    count: usize,
    probability: f64,
    most_likely: bool,
}

/// Write one horizon's bins to a CSV file.
pub fn write_histogram_csv<P: AsRef<Path>>(path: P, projection: &HorizonProjection) -> SimResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let highest = projection.histogram.most_likely();
    for (idx, bin) in projection.histogram.bins.iter().enumerate() {
        wtr.serialize(BinRow {
            horizon_days: projection.horizon.days(),
            lower: bin.lower,
            upper: bin.upper,
            count: bin.count,
            probability: bin.probability,
            most_likely: Some(idx) == highest,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
