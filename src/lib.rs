//! cdf2cim Library
//!
//! A Rust library for extracting standardized simulation metadata from
//! climate-model output files and mapping it onto the CIM2 property schema
//! used for data-publication cataloguing.
//!
//! This library provides tools for:
//! - Detecting which MIP era (CMIP5 or CMIP6) produced a file from its
//!   global attributes
//! - Deriving a simulation-date span from a field's reference-time axis,
//!   honoring coordinate bounds and CF model calendars
//! - Translating era-specific global attributes into a normalized CIM2
//!   property set via declarative mapping tables
//! - Parent-run linkage, branch-time unit conversion, and activity tagging
//! - Reducing a property set to a canonical, order-independent simulation
//!   identifier that groups files belonging to the same model run
//!
//! File discovery, netCDF decoding, and publication are external
//! collaborators: callers supply in-memory [`CfField`] objects through the
//! [`FieldSource`](app::services::scanner::FieldSource) trait and consume
//! parsed results from the [`scan`](app::services::scanner::scan) iterator.

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_parser;
        pub mod scanner;
        pub mod time;
    }
}

// Re-export commonly used types
pub use app::models::{
    AttributeValue, CfField, CimProperties, GlobalAttributes, PropertyValue, SimulationId,
    TimeCoordinates,
};
pub use app::services::field_parser::parse;
pub use app::services::scanner::{FieldSource, ParsedField, scan};

/// Result type alias for cdf2cim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for metadata parsing and mapping operations
///
/// Every variant that relates to a specific source file carries its path so
/// operators can locate and fix the offending file.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Neither `mip_era` nor `project_id` identifies a known schema generation
    #[error("unsupported MIP era in file '{path}': no attribute mapping can be selected")]
    UnsupportedEra { path: String },

    /// A branch-time attribute could not be coerced to a float
    #[error("cannot coerce {attribute} value '{value}' to a float in file '{path}'")]
    BranchTimeCoercion {
        attribute: String,
        value: String,
        path: String,
    },

    /// A time-units string required for date conversion could not be parsed
    #[error("cannot parse time units '{units}': {reason}")]
    TimeUnitsParse { units: String, reason: String },

    /// A calendar name outside the supported CF set
    #[error("unknown calendar '{name}'")]
    UnknownCalendar { name: String },

    /// A numeric time offset could not be converted to a concrete date
    #[error("date conversion failed: {message}")]
    DateConversion { message: String },

    /// The file path is too short to carry a dataset version segment
    #[error("cannot derive dataset version from path '{path}': no parent directory segment")]
    DatasetVersion { path: String },
}

impl Error {
    /// Create an unsupported-era error for a file
    pub fn unsupported_era(path: impl Into<String>) -> Self {
        Self::UnsupportedEra { path: path.into() }
    }

    /// Create a branch-time coercion error with the raw value and file path
    pub fn branch_time_coercion(
        attribute: impl Into<String>,
        value: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::BranchTimeCoercion {
            attribute: attribute.into(),
            value: value.into(),
            path: path.into(),
        }
    }

    /// Create a time-units parse error
    pub fn time_units_parse(units: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TimeUnitsParse {
            units: units.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown-calendar error
    pub fn unknown_calendar(name: impl Into<String>) -> Self {
        Self::UnknownCalendar { name: name.into() }
    }

    /// Create a date conversion error
    pub fn date_conversion(message: impl Into<String>) -> Self {
        Self::DateConversion {
            message: message.into(),
        }
    }

    /// Create a dataset-version derivation error
    pub fn dataset_version(path: impl Into<String>) -> Self {
        Self::DatasetVersion { path: path.into() }
    }
}
