//! Core data models for cdf2cim metadata mapping
//!
//! The carriers on the input side ([`CfField`], [`GlobalAttributes`],
//! [`TimeCoordinates`]) mirror what the external file source reads off a CF
//! field: a key/value attribute mapping, an optional reference-time axis and
//! the originating file path. The output side ([`CimProperties`],
//! [`SimulationId`]) is the closed, serializable property set consumed by
//! downstream publication tooling.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

use crate::constants::DEFAULT_CALENDAR;

/// A scalar global-attribute value
///
/// netCDF global attributes arrive as strings or numerics; absence is always
/// modeled with `Option` at the lookup site, never with in-band sentinels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl AttributeValue {
    /// Borrow the value as text, if it is textual
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value; textual values yield `None`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Str(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => write!(f, "{}", s),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

/// Read-only mapping of a file's descriptive global attributes
#[derive(Debug, Clone, Default)]
pub struct GlobalAttributes {
    attributes: HashMap<String, AttributeValue>,
}

impl GlobalAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute; used by field sources and test fixtures
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Textual value of an attribute, `None` when absent or non-textual
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

impl From<HashMap<String, AttributeValue>> for GlobalAttributes {
    fn from(attributes: HashMap<String, AttributeValue>) -> Self {
        Self { attributes }
    }
}

/// A field's reference-time axis as supplied by the external file source
///
/// `values` holds the point offsets in `units`; `bounds` optionally holds
/// the `[lower, upper]` extent each point represents. Entirely absent for
/// fixed/climatology fields.
#[derive(Debug, Clone)]
pub struct TimeCoordinates {
    /// Point offsets, ordered earliest to latest
    pub values: Vec<f64>,
    /// Per-element coordinate bounds, when the file carries them
    pub bounds: Option<Vec<[f64; 2]>>,
    /// Raw CF units string, e.g. `"days since 1850-01-01"`
    pub units: String,
    /// CF calendar name; absent means gregorian
    pub calendar: Option<String>,
}

impl TimeCoordinates {
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn has_bounds(&self) -> bool {
        self.bounds.is_some()
    }

    /// Calendar name, defaulting to gregorian when the file carries none
    pub fn calendar_or_default(&self) -> &str {
        self.calendar.as_deref().unwrap_or(DEFAULT_CALENDAR)
    }
}

/// One field-like object from a climate-model output file
#[derive(Debug, Clone)]
pub struct CfField {
    /// Originating file path
    pub path: PathBuf,
    /// The file's global attributes
    pub attributes: GlobalAttributes,
    /// The field's reference-time axis, if it has one
    pub time_coords: Option<TimeCoordinates>,
}

impl CfField {
    /// Path rendered for property values and diagnostics
    pub fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

/// A canonical CIM2 property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
    Float(f64),
    /// Sorted tuple of tokens, e.g. normalized activity tags
    StrList(Vec<String>),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&AttributeValue> for PropertyValue {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Str(s) => PropertyValue::Str(s.clone()),
            AttributeValue::Int(i) => PropertyValue::Int(*i),
            AttributeValue::Float(f) => PropertyValue::Float(*f),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::StrList(value)
    }
}

/// Normalized CIM2 property set, built incrementally per field
///
/// Backed by a `BTreeMap` so iteration follows natural key order, the
/// determinism the simulation identifier depends on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CimProperties {
    properties: BTreeMap<String, PropertyValue>,
}

impl CimProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Textual value of a property, `None` when absent or non-textual
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Keep only the entries the predicate accepts
    pub fn retain(&mut self, predicate: impl FnMut(&String, &mut PropertyValue) -> bool) {
        self.properties.retain(predicate);
    }

    /// Entries in natural key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Canonical simulation identifier: the non-volatile `(property, value)`
/// pairs of a property set, in natural key order
///
/// Two files belonging to the same simulation run yield identical
/// identifiers; files from different runs differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimulationId(pub Vec<(String, PropertyValue)>);

impl SimulationId {
    pub fn pairs(&self) -> &[(String, PropertyValue)] {
        &self.0
    }

    /// Value for a property name, when the identifier carries it
    pub fn value(&self, key: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
