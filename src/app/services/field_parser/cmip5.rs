//! CMIP5-specific property enrichment

use crate::app::models::{CimProperties, GlobalAttributes};
use crate::constants::NOT_APPLICABLE;

use super::apply_parent_indices;

/// Extend a CIM2 property set with CMIP5-specific properties
///
/// CMIP5 files mark inapplicable attributes (forcing, parent_experiment_id,
/// ...) with the literal string `"N/A"`; those entries are pruned before the
/// parent run indices are parsed out of `parent_experiment_rip`.
pub fn enrich(properties: &mut CimProperties, attributes: &GlobalAttributes) {
    properties.retain(|_, value| value.as_str() != Some(NOT_APPLICABLE));

    let parent_rip = attributes
        .str_value("parent_experiment_rip")
        .unwrap_or(NOT_APPLICABLE);
    apply_parent_indices(properties, parent_rip);
}
