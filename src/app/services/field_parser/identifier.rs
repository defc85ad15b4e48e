//! Canonical simulation identifier construction

use crate::app::models::{CimProperties, SimulationId};
use crate::constants::VOLATILE_PROPERTIES;

/// Reduce a completed property set to its order-independent identity tuple
///
/// Volatile properties (those that vary per file but not per simulation)
/// are excluded. The remaining pairs follow the property set's sorted key
/// order, so the same simulation always yields the same identifier no matter
/// what order its attributes arrived in.
pub fn build_identifier(properties: &CimProperties) -> SimulationId {
    SimulationId(
        properties
            .iter()
            .filter(|(key, _)| !VOLATILE_PROPERTIES.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}
