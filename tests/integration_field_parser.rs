//! Integration tests for the full scan pipeline
//!
//! Drives the scan iterator with an in-memory field source, covering one
//! CMIP6 and one CMIP5 publication scenario end to end: era detection, date
//! derivation, attribute mapping, enrichment, identifier construction, and
//! the per-batch handle-release discipline.

use cdf2cim::{
    AttributeValue, CfField, FieldSource, GlobalAttributes, PropertyValue, TimeCoordinates, scan,
};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory stand-in for the external file-discovery collaborator
struct MemorySource {
    batches: Vec<Vec<CfField>>,
    releases: usize,
}

impl FieldSource for &mut MemorySource {
    fn next_batch(&mut self) -> Option<Vec<CfField>> {
        if self.batches.is_empty() {
            None
        } else {
            Some(self.batches.remove(0))
        }
    }

    fn release_handles(&mut self) {
        self.releases += 1;
    }
}

fn attributes(pairs: &[(&str, AttributeValue)]) -> GlobalAttributes {
    let map: HashMap<String, AttributeValue> = pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();
    GlobalAttributes::from(map)
}

/// CMIP6 field: two time steps with bounds, no parent run, one activity tag
fn scenario_a_field() -> CfField {
    CfField {
        path: PathBuf::from(
            "/archive/CMIP6/CMIP/NCAR/CESM2/historical/r1i1p1f1/Amon/tas/gn/v20190308/\
             tas_Amon_CESM2_historical_r1i1p1f1_gn_185001-201412.nc",
        ),
        attributes: attributes(&[
            ("mip_era", AttributeValue::from("CMIP6")),
            ("activity_id", AttributeValue::from("CMIP")),
            ("experiment_id", AttributeValue::from("historical")),
            ("source_id", AttributeValue::from("CESM2")),
            ("variant_label", AttributeValue::from("r1i1p1f1")),
            ("frequency", AttributeValue::from("mon")),
        ]),
        time_coords: Some(TimeCoordinates {
            values: vec![15.5, 45.0],
            bounds: Some(vec![[0.0, 31.0], [31.0, 59.0]]),
            units: "days since 1850-01-01".to_string(),
            calendar: Some("noleap".to_string()),
        }),
    }
}

/// CMIP5 field: one time step, no bounds, parent run r2i1p1
fn scenario_b_field() -> CfField {
    CfField {
        path: PathBuf::from(
            "/archive/cmip5/output1/MOHC/HadGEM2-ES/rcp85/mon/atmos/Amon/r2i1p1/v20111128/\
             tas_Amon_HadGEM2-ES_rcp85_r2i1p1_200512-210012.nc",
        ),
        attributes: attributes(&[
            ("project_id", AttributeValue::from("CMIP5")),
            ("experiment_id", AttributeValue::from("rcp85")),
            ("model_id", AttributeValue::from("HadGEM2-ES")),
            ("parent_experiment_rip", AttributeValue::from("r2i1p1")),
            ("frequency", AttributeValue::from("mon")),
        ]),
        time_coords: Some(TimeCoordinates {
            values: vec![15.5],
            bounds: None,
            units: "days since 2005-12-01".to_string(),
            calendar: None,
        }),
    }
}

/// Fixed-frequency field that every scan must silently skip
fn fixed_field() -> CfField {
    CfField {
        path: PathBuf::from("/archive/CMIP6/CMIP/NCAR/CESM2/v20190308/orog_fx_CESM2.nc"),
        attributes: attributes(&[
            ("mip_era", AttributeValue::from("CMIP6")),
            ("frequency", AttributeValue::from("fx")),
        ]),
        time_coords: None,
    }
}

#[test]
fn test_scenario_a_cmip6_with_bounds() {
    let mut source = MemorySource {
        batches: vec![vec![scenario_a_field()]],
        releases: 0,
    };
    let results: Vec<_> = scan(&mut source).collect();
    assert_eq!(results.len(), 1);
    let parsed = results[0].as_ref().unwrap();

    // Dates from the first lower and last upper bound, in the noleap calendar
    assert_eq!(parsed.dates.len(), 2);
    assert_eq!(parsed.dates[0].to_string(), "1850-01-01 00:00:00");
    assert_eq!(parsed.dates[1].to_string(), "1850-03-01 00:00:00");

    // Activity tag normalized to a sorted single-element list
    assert_eq!(
        parsed.identifier.value("activity_id"),
        Some(&PropertyValue::StrList(vec!["CMIP".to_string()]))
    );

    // No parent_variant_label: parent index properties stay unset
    assert!(parsed.identifier.value("parent_realization_index").is_none());
    assert!(parsed.identifier.value("parent_initialization_index").is_none());
    assert!(parsed.identifier.value("parent_physics_index").is_none());
    assert!(parsed.identifier.value("parent_forcing_index").is_none());

    // File-level properties present in the set but not the identifier
    assert_eq!(
        parsed.properties.str_value("dataset_versions"),
        Some("v20190308")
    );
    assert_eq!(parsed.properties.str_value("calendar"), Some("noleap"));
    assert!(parsed.identifier.value("dataset_versions").is_none());
    assert!(parsed.identifier.value("filenames").is_none());
}

#[test]
fn test_scenario_b_cmip5_single_step() {
    let mut source = MemorySource {
        batches: vec![vec![scenario_b_field()]],
        releases: 0,
    };
    let results: Vec<_> = scan(&mut source).collect();
    assert_eq!(results.len(), 1);
    let parsed = results[0].as_ref().unwrap();

    // Point value: a single date
    assert_eq!(parsed.dates.len(), 1);
    assert_eq!(parsed.dates[0].to_string(), "2005-12-16 12:00:00");

    assert_eq!(
        parsed.identifier.value("parent_realization_index"),
        Some(&PropertyValue::Int(2))
    );
    assert_eq!(
        parsed.identifier.value("parent_initialization_index"),
        Some(&PropertyValue::Int(1))
    );
    assert_eq!(
        parsed.identifier.value("parent_physics_index"),
        Some(&PropertyValue::Int(1))
    );
    assert!(parsed.identifier.value("parent_forcing_index").is_none());

    // CMIP5 renames land in canonical CIM2 names
    assert_eq!(parsed.identifier.value("source_id"), Some(&PropertyValue::Str("HadGEM2-ES".to_string())));
    assert_eq!(parsed.identifier.value("mip_era"), Some(&PropertyValue::Str("CMIP5".to_string())));
}

#[test]
fn test_mixed_batches_skip_and_release() {
    let mut source = MemorySource {
        batches: vec![
            vec![scenario_a_field(), fixed_field()],
            vec![scenario_b_field()],
        ],
        releases: 0,
    };
    let results: Vec<_> = scan(&mut source).collect();

    // Two parsed fields; the fixed field was skipped without error
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|item| item.is_ok()));

    // Handles released once per batch
    assert_eq!(source.releases, 2);
}

#[test]
fn test_property_set_serializes_to_a_closed_mapping() {
    let mut source = MemorySource {
        batches: vec![vec![scenario_a_field()]],
        releases: 0,
    };
    let parsed = scan(&mut source).next().unwrap().unwrap();

    let value = serde_json::to_value(&parsed.properties).unwrap();
    let mapping = value.as_object().unwrap();
    assert_eq!(mapping["mip_era"], serde_json::json!("CMIP6"));
    assert_eq!(mapping["activity_id"], serde_json::json!(["CMIP"]));
    assert_eq!(mapping["calendar"], serde_json::json!("noleap"));
    assert_eq!(mapping["dataset_versions"], serde_json::json!("v20190308"));

    // The identifier serializes as ordered (key, value) pairs
    let identifier = serde_json::to_value(&parsed.identifier).unwrap();
    assert!(identifier.is_array());
}
