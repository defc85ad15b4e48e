//! Tests for the field parsing pipeline
//!
//! Shared fixtures model the two file generations the mapper handles: a
//! CMIP6 monthly mean with coordinate bounds and a CMIP5 monthly mean with
//! point coordinates only.


use crate::app::models::{CfField, GlobalAttributes, TimeCoordinates};
use std::path::PathBuf;

/// Global attributes of a typical CMIP6 historical run
pub fn cmip6_attributes() -> GlobalAttributes {
    let mut attributes = GlobalAttributes::new();
    attributes.insert("mip_era", "CMIP6");
    attributes.insert("activity_id", "CMIP");
    attributes.insert("experiment_id", "historical");
    attributes.insert("institution_id", "MOHC");
    attributes.insert("source_id", "UKESM1-0-LL");
    attributes.insert("variant_label", "r1i1p1f2");
    attributes.insert("frequency", "mon");
    attributes
}

/// Global attributes of a typical CMIP5 historical run
pub fn cmip5_attributes() -> GlobalAttributes {
    let mut attributes = GlobalAttributes::new();
    attributes.insert("project_id", "CMIP5");
    attributes.insert("experiment_id", "historical");
    attributes.insert("institute_id", "MOHC");
    attributes.insert("model_id", "HadGEM2-ES");
    attributes.insert("realization", 2i64);
    attributes.insert("frequency", "mon");
    attributes
}

/// Two monthly steps with coordinate bounds
pub fn bounded_time_coords() -> TimeCoordinates {
    TimeCoordinates {
        values: vec![15.5, 45.0],
        bounds: Some(vec![[0.0, 31.0], [31.0, 59.0]]),
        units: "days since 2015-01-01".to_string(),
        calendar: None,
    }
}

/// A single step, point value only
pub fn single_step_time_coords() -> TimeCoordinates {
    TimeCoordinates {
        values: vec![15.5],
        bounds: None,
        units: "days since 2015-01-01".to_string(),
        calendar: None,
    }
}

/// DRS-conforming path: version segment second to last
pub fn cmip6_path() -> PathBuf {
    PathBuf::from(
        "/archive/CMIP6/CMIP/MOHC/UKESM1-0-LL/historical/r1i1p1f2/Amon/tas/gn/v20190406/\
         tas_Amon_UKESM1-0-LL_historical_r1i1p1f2_gn_185001-201412.nc",
    )
}

pub fn cmip5_path() -> PathBuf {
    PathBuf::from(
        "/archive/cmip5/output1/MOHC/HadGEM2-ES/historical/mon/atmos/Amon/r2i1p1/v20110329/\
         tas_Amon_HadGEM2-ES_historical_r2i1p1_185912-200511.nc",
    )
}

/// A parseable CMIP6 field with bounded time coordinates
pub fn cmip6_field() -> CfField {
    CfField {
        path: cmip6_path(),
        attributes: cmip6_attributes(),
        time_coords: Some(bounded_time_coords()),
    }
}

/// A parseable CMIP5 field with a single unbounded time step
pub fn cmip5_field() -> CfField {
    CfField {
        path: cmip5_path(),
        attributes: cmip5_attributes(),
        time_coords: Some(single_step_time_coords()),
    }
}

/// A fixed-frequency field: no usable time axis, must be skipped
pub fn fixed_field() -> CfField {
    let mut attributes = cmip6_attributes();
    attributes.insert("frequency", "fx");
    CfField {
        path: cmip6_path(),
        attributes,
        time_coords: None,
    }
}
