//! CMIP6-specific property enrichment
//!
//! Adds the properties that need non-trivial parsing: parent run indices
//! from the variant label, branch times converted from numeric offsets into
//! concrete dates under the parent's or child's time units, and normalized
//! activity tags.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::app::models::{AttributeValue, CimProperties, GlobalAttributes, TimeCoordinates};
use crate::app::services::time::TimeUnits;
use crate::constants::{DEFAULT_CALENDAR, NO_PARENT};
use crate::{Error, Result};

use super::apply_parent_indices;

/// `parent_time_units` of the form `<units> (<calendar>)`
static UNITS_WITH_CALENDAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\((.*?)\)\s*$").expect("valid pattern"));

/// Extend a CIM2 property set with CMIP6-specific properties
pub fn enrich(
    properties: &mut CimProperties,
    attributes: &GlobalAttributes,
    coords: &TimeCoordinates,
    path: &str,
) -> Result<()> {
    apply_parent_indices(
        properties,
        attributes.str_value("parent_variant_label").unwrap_or("none"),
    );

    let parent_units = resolve_parent_units(properties, attributes, coords)?;

    if let Some(value) = attributes.get("branch_time_in_parent") {
        let offset = coerce_branch_time(value, "branch_time_in_parent", path)?;
        let date = parent_units.offset_to_datetime(offset)?;
        properties.insert("branch_time_in_parent", date.to_string());
    }

    if let Some(value) = attributes.get("branch_time_in_child") {
        let offset = coerce_branch_time(value, "branch_time_in_child", path)?;
        let child_units = TimeUnits::parse(&coords.units, coords.calendar_or_default())?;
        let date = child_units.offset_to_datetime(offset)?;
        properties.insert("branch_time_in_child", date.to_string());
    }

    if let Some(activity_id) = attributes.str_value("activity_id") {
        let mut tags: Vec<String> = activity_id.split_whitespace().map(str::to_string).collect();
        // Order-normalized so equivalent multi-activity labels compare equal
        tags.sort_unstable();
        properties.insert("activity_id", tags);
    }

    Ok(())
}

/// Resolve the time units branch times in the parent run are expressed in
///
/// Absent or `"no parent"` means the parent shares the child's units. An
/// explicit value either carries its own calendar in parentheses or falls
/// back to the already-resolved `calendar` property.
fn resolve_parent_units(
    properties: &CimProperties,
    attributes: &GlobalAttributes,
    coords: &TimeCoordinates,
) -> Result<TimeUnits> {
    match attributes.str_value("parent_time_units") {
        None => TimeUnits::parse(&coords.units, coords.calendar_or_default()),
        Some(raw) if raw == NO_PARENT => {
            TimeUnits::parse(&coords.units, coords.calendar_or_default())
        }
        Some(raw) => {
            if let Some(captures) = UNITS_WITH_CALENDAR.captures(raw) {
                TimeUnits::parse(&captures[1], &captures[2])
            } else {
                let calendar = properties.str_value("calendar").unwrap_or(DEFAULT_CALENDAR);
                TimeUnits::parse(raw, calendar)
            }
        }
    }
}

/// Coerce a branch-time attribute to a float
///
/// Textual values occasionally carry Fortran-style `D` exponent markers
/// (`"1.5D2"` meaning `1.5e2`); those are rewritten before conversion.
fn coerce_branch_time(value: &AttributeValue, attribute: &str, path: &str) -> Result<f64> {
    if let Some(number) = value.as_f64() {
        return Ok(number);
    }
    let text = value.as_str().unwrap_or_default();
    text.trim()
        .replace(['D', 'd'], "e")
        .parse()
        .map_err(|_| {
            debug!(
                "Failed while converting {} to float: '{}' in {}",
                attribute, text, path
            );
            Error::branch_time_coercion(attribute, text, path)
        })
}
