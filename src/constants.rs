//! Application constants for cdf2cim
//!
//! This module contains the MIP era tags, the declarative attribute-mapping
//! tables, and the property-name sets used throughout the mapping engine.
//! The tables are configuration, not logic: each entry copies one source
//! global attribute into one target CIM2 property when present.

// =============================================================================
// MIP Era Tags
// =============================================================================

/// Literal value of the `project_id` attribute identifying a CMIP5 file
pub const CMIP5: &str = "CMIP5";

/// Literal value of the `mip_era` attribute identifying a CMIP6 file
pub const CMIP6: &str = "CMIP6";

/// Frequency attribute value marking a fixed/climatology field (no time axis)
pub const FIXED_FREQUENCY: &str = "fx";

/// Calendar assumed when the time coordinates carry none
pub const DEFAULT_CALENDAR: &str = "gregorian";

// =============================================================================
// Simple Attribute Mapping Tables
// =============================================================================

/// CMIP5 global attribute -> CIM2 property
pub const CMIP5_TO_CIM2: &[(&str, &str)] = &[
    ("branch_time", "branch_time_in_parent"),
    ("contact", "contact"),
    ("experiment_id", "experiment_id"),
    ("forcing", "forcing"),
    ("frequency", "frequency"),
    ("initialization_method", "initialization_index"),
    ("institute_id", "institution_id"),
    ("model_id", "source_id"),
    ("parent_experiment_id", "parent_experiment_id"),
    ("physics_version", "physics_index"),
    ("project_id", "mip_era"),
    ("realization", "realization_index"),
    ("references", "references"),
];

/// CMIP6 global attribute -> CIM2 property
pub const CMIP6_TO_CIM2: &[(&str, &str)] = &[
    ("activity_id", "activity_id"),
    ("branch_method", "branch_method"),
    ("contact", "contact"),
    ("experiment_id", "experiment_id"),
    ("forcing_index", "forcing_index"),
    ("frequency", "frequency"),
    ("further_info_url", "further_info_url"),
    ("initialization_index", "initialization_index"),
    ("institution_id", "institution_id"),
    ("mip_era", "mip_era"),
    ("parent_activity_id", "parent_activity_id"),
    ("parent_experiment_id", "parent_experiment_id"),
    ("parent_mip_era", "parent_mip_era"),
    ("parent_source_id", "parent_source_id"),
    ("parent_variant_label", "parent_variant_label"),
    ("physics_index", "physics_index"),
    ("realization_index", "realization_index"),
    ("references", "references"),
    ("source_id", "source_id"),
    ("sub_experiment_id", "sub_experiment_id"),
    ("variant_info", "variant_info"),
    ("variant_label", "variant_label"),
];

// =============================================================================
// Identifier and Enrichment Property Names
// =============================================================================

/// Properties that vary per file but not per simulation; excluded from the
/// simulation identifier
pub const VOLATILE_PROPERTIES: &[&str] = &[
    "contact",
    "references",
    "forcing",
    "variant_info",
    "dataset_versions",
    "filenames",
];

/// Parent run-index properties, in the positional order digit groups are
/// zipped onto them when parsing a variant label such as `r1i1p1f1`
pub const PARENT_INDEX_PROPERTIES: &[&str] = &[
    "parent_realization_index",
    "parent_initialization_index",
    "parent_physics_index",
    "parent_forcing_index",
];

/// Placeholder used by CMIP5 files for "not applicable" attribute values
pub const NOT_APPLICABLE: &str = "N/A";

/// `parent_time_units` value marking a run with no parent simulation
pub const NO_PARENT: &str = "no parent";
