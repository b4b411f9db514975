//! CSV loader for historical closes.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::SimResult;
use crate::types::{PricePoint, PriceSeries};

/// Load a price series from a CSV file with `date` and `close` columns.
pub fn load_csv<P: AsRef<Path>>(path: P) -> SimResult<PriceSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let series = read_csv(file)?;
    info!(
        "Loaded {} closes from {}",
        series.len(),
        path.display()
    );
    Ok(series)
}

/// Read a price series from any CSV source.
///
/// The header row must name a `date` column (`YYYY-MM-DD`) and a `close`
/// column; other columns are ignored. Rows must be in ascending date order.
pub fn read_csv<R: Read>(reader: R) -> SimResult<PriceSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for record in rdr.deserialize() {
        let point: PricePoint = record?;
        points.push(point);
    }
    PriceSeries::new(points)
}
