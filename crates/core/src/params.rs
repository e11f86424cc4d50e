//! Job launch parameters.
//!
//! The engine accepts a closed set of scalar parameter types. Values
//! supplied as JSON at launch time are coerced into this set; anything
//! outside it (booleans, nulls, nested structures) is dropped rather than
//! rejected.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Timestamp;

/// Uniqueness parameter injected by the launch path when the caller did
/// not supply one. Guarantees two launches of the same job are never
/// parameter-identical, so the engine treats them as distinct instances.
pub const PARAM_LAUNCH_TIME: &str = "launchTime";

/// Human-readable run label supplied at launch.
pub const PARAM_CUSTOM_JOB_NAME: &str = "customJobName";

/// Simulated workload duration in seconds.
pub const PARAM_DURATION_SECS: &str = "durationInSeconds";

/// A single parameter value in one of the engine's accepted scalar types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Long(i64),
    Double(f64),
    Date(Timestamp),
}

impl ParamValue {
    /// Coerce one JSON value into an accepted scalar type.
    ///
    /// Strings map to `String`, integral numbers to `Long`, other numbers
    /// to `Double`. Everything else has no engine representation and
    /// yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::String(s.clone())),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Long(i))
                } else {
                    n.as_f64().map(Self::Double)
                }
            }
            _ => None,
        }
    }
}

/// An ordered parameter-name to value mapping, as supplied at launch time
/// and carried on every execution record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JobParams(BTreeMap<String, ParamValue>);

impl JobParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce a JSON object into a parameter set, dropping entries whose
    /// values have no engine scalar representation.
    pub fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut params = Self::new();
        for (name, value) in map {
            if let Some(coerced) = ParamValue::from_json(value) {
                params.insert(name.clone(), coerced);
            }
        }
        params
    }

    /// Insert a value under `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style string parameter.
    pub fn with_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, ParamValue::String(value.into()));
        self
    }

    /// Builder-style integer parameter.
    pub fn with_long(mut self, name: impl Into<String>, value: i64) -> Self {
        self.insert(name, ParamValue::Long(value));
        self
    }

    /// Builder-style float parameter.
    pub fn with_double(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, ParamValue::Double(value));
        self
    }

    /// Builder-style timestamp parameter.
    pub fn with_date(mut self, name: impl Into<String>, value: Timestamp) -> Self {
        self.insert(name, ParamValue::Date(value));
        self
    }

    /// Whether a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Integer parameter by name, `None` if absent or of another type.
    pub fn get_long(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(ParamValue::Long(v)) => Some(*v),
            _ => None,
        }
    }

    /// String parameter by name, `None` if absent or of another type.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ParamValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }
}
