//! MIP era detection from global attributes

use crate::app::models::GlobalAttributes;
use crate::constants::{CMIP5, CMIP5_TO_CIM2, CMIP6, CMIP6_TO_CIM2};

/// The modeling-intercomparison schema generation that produced a file
///
/// A closed tag: branching on era happens through this enum and the mapping
/// table it selects, never on raw attribute strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipEra {
    Cmip5,
    Cmip6,
    Unknown,
}

impl MipEra {
    /// Classify a file's global attributes into a MIP era
    ///
    /// `mip_era == "CMIP6"` wins over `project_id == "CMIP5"`; anything else
    /// is [`MipEra::Unknown`].
    pub fn detect(attributes: &GlobalAttributes) -> Self {
        if attributes.str_value("mip_era") == Some(CMIP6) {
            MipEra::Cmip6
        } else if attributes.str_value("project_id") == Some(CMIP5) {
            MipEra::Cmip5
        } else {
            MipEra::Unknown
        }
    }

    /// The era's simple attribute-mapping table; `None` for an unknown era,
    /// which callers must treat as a hard failure before mapping proceeds
    pub fn simple_mapping(self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            MipEra::Cmip5 => Some(CMIP5_TO_CIM2),
            MipEra::Cmip6 => Some(CMIP6_TO_CIM2),
            MipEra::Unknown => None,
        }
    }
}
