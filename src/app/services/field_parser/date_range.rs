//! Simulation date-range derivation from a reference-time axis

use crate::Result;
use crate::app::models::TimeCoordinates;
use crate::app::services::time::{CfDateTime, TimeUnits};

/// Derive the earliest/latest dates of a field from its time coordinates
///
/// Returns an empty vector when the axis carries no usable dates (an empty
/// value array, or units that are not reference-time), which callers treat as
/// "skip this field", not as an error. Otherwise the result holds one date
/// for a single-step axis and exactly two (first and last; interior points
/// ignored) for longer axes. When coordinate bounds are present the span is
/// taken from them: the lower bound of the first step and the upper bound of
/// the last.
pub fn resolve_date_range(coords: &TimeCoordinates) -> Result<Vec<CfDateTime>> {
    if coords.values.is_empty() {
        return Ok(Vec::new());
    }
    let units = match TimeUnits::parse(&coords.units, coords.calendar_or_default()) {
        Ok(units) => units,
        // Not a reference-time axis: ignore this field
        Err(_) => return Ok(Vec::new()),
    };

    let last = coords.size() - 1;
    if coords.size() == 1 {
        let offset = match &coords.bounds {
            Some(bounds) => bounds[0][0],
            None => coords.values[0],
        };
        return Ok(vec![units.offset_to_datetime(offset)?]);
    }

    let (earliest, latest) = match &coords.bounds {
        Some(bounds) => (bounds[0][0], bounds[last][1]),
        None => (coords.values[0], coords.values[last]),
    };
    Ok(vec![
        units.offset_to_datetime(earliest)?,
        units.offset_to_datetime(latest)?,
    ])
}
