//! Field parsing module for CIM2 metadata extraction
//!
//! This module provides the complete per-field pipeline from raw global
//! attributes to a canonical simulation identity.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`era`] - MIP era detection (CMIP5 / CMIP6 / unknown)
//! - [`date_range`] - Earliest/latest date derivation from the time axis
//! - [`mapper`] - Declarative table-driven attribute mapping
//! - [`cmip5`] / [`cmip6`] - Era-specific enrichment (parent-run linkage,
//!   branch-time conversion, activity tagging)
//! - [`identifier`] - Canonical simulation identifier construction
//!
//! # Processing Pipeline
//!
//! For one field: detect the era, derive the date span (skipping the field
//! when it has no usable time axis), project the era's simple mapping table,
//! apply the era-matched enrichment, then reduce to the identifier. A field
//! with no usable dates yields `Ok(None)`; an undetectable era with usable
//! dates is a hard failure, since no attribute mapping can proceed safely.

pub mod cmip5;
pub mod cmip6;
pub mod date_range;
pub mod era;
pub mod identifier;
pub mod mapper;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use date_range::resolve_date_range;
pub use era::MipEra;
pub use identifier::build_identifier;

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::app::models::{CfField, CimProperties, SimulationId};
use crate::app::services::time::CfDateTime;
use crate::constants::{FIXED_FREQUENCY, PARENT_INDEX_PROPERTIES};
use crate::{Error, Result};

/// Maximal runs of decimal digits, left to right
static DIGIT_GROUPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid pattern"));

/// Parse one CF field into (simulation identifier, CIM2 properties, dates)
///
/// Returns `Ok(None)`, all three absent together, when the field has no
/// usable time axis; the caller skips such fields. Every fallible sub-step
/// logs a diagnostic naming the step and the file path before its error
/// propagates.
pub fn parse(field: &CfField) -> Result<Option<(SimulationId, CimProperties, Vec<CfDateTime>)>> {
    let path = field.path_string();
    let attributes = &field.attributes;

    // Fixed/climatology fields have no time axis by definition.
    let coords = if attributes.str_value("frequency") == Some(FIXED_FREQUENCY) {
        None
    } else {
        field.time_coords.as_ref()
    };
    let Some(coords) = coords else {
        return Ok(None);
    };

    let dates = resolve_date_range(coords).inspect_err(|_| {
        debug!("Failed while parsing start and end dates: {}", path);
    })?;
    if dates.is_empty() {
        return Ok(None);
    }

    let era = MipEra::detect(attributes);
    let mut properties = CimProperties::new();
    match era.simple_mapping() {
        Some(mapping) => mapper::apply_simple_mapping(&mut properties, field, mapping),
        None => return Err(Error::unsupported_era(path.clone())),
    }

    mapper::apply_file_properties(&mut properties, field, coords).inspect_err(|_| {
        debug!("Failed while parsing file properties: {}", path);
    })?;

    match era {
        MipEra::Cmip5 => cmip5::enrich(&mut properties, attributes),
        MipEra::Cmip6 => cmip6::enrich(&mut properties, attributes, coords, &path)
            .inspect_err(|_| debug!("Failed while enriching CMIP6 properties: {}", path))?,
        MipEra::Unknown => return Err(Error::unsupported_era(path.clone())),
    }

    Ok(Some((build_identifier(&properties), properties, dates)))
}

/// Zip the digit runs of a variant label (`r1i1p1f1`, `r2i1p1`) onto the
/// parent index properties, positionally; missing trailing groups leave the
/// corresponding property unset
fn apply_parent_indices(properties: &mut CimProperties, label: &str) {
    for (name, group) in PARENT_INDEX_PROPERTIES
        .iter()
        .zip(DIGIT_GROUPS.find_iter(label))
    {
        if let Ok(index) = group.as_str().parse::<i64>() {
            properties.insert(*name, index);
        }
    }
}
