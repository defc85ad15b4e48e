//! Table-driven mapping of global attributes onto CIM2 properties

use std::path::Path;

use crate::app::models::{CfField, CimProperties, PropertyValue, TimeCoordinates};
use crate::{Error, Result};

/// Copy source attributes into target properties per the era's mapping table
///
/// A best-effort projection: absent source attributes are silently skipped,
/// never defaulted.
pub fn apply_simple_mapping(
    properties: &mut CimProperties,
    field: &CfField,
    mapping: &[(&str, &str)],
) {
    for (source_attr, target_prop) in mapping {
        if let Some(value) = field.attributes.get(source_attr) {
            properties.insert(*target_prop, PropertyValue::from(value));
        }
    }
}

/// Set the per-file properties every field carries regardless of era:
/// `dataset_versions`, `filenames`, and the time axis `calendar`
pub fn apply_file_properties(
    properties: &mut CimProperties,
    field: &CfField,
    coords: &TimeCoordinates,
) -> Result<()> {
    properties.insert("dataset_versions", dataset_version(&field.path)?);
    properties.insert("filenames", field.path_string());
    properties.insert("calendar", coords.calendar_or_default());
    Ok(())
}

/// Dataset version from the DRS path convention
/// `.../<stuff>/<VERSION>/filename.nc`: the second-to-last path segment
///
/// Paths without a parent directory segment cannot carry a version and are
/// rejected rather than silently defaulted.
fn dataset_version(path: &Path) -> Result<String> {
    path.parent()
        .and_then(Path::file_name)
        .map(|segment| segment.to_string_lossy().into_owned())
        .ok_or_else(|| Error::dataset_version(path.display().to_string()))
}
