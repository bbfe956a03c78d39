use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::ParameterKey;

/// Parameter key → value, one value per key.
///
/// Used for both the raw extraction result (values exactly as matched, unit
/// text attached) and the corrected result (canonical values).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecMap(BTreeMap<ParameterKey, String>);

impl SpecMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a key, replacing any previous value.
    pub fn insert(&mut self, key: ParameterKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: ParameterKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = ParameterKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKey, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ParameterKey, String)> for SpecMap {
    fn from_iter<I: IntoIterator<Item = (ParameterKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Advisory fields merged in from keyword generation.
/// Kept apart from the canonical parameters so the two never collide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuxiliaryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cable_category: Option<String>,
    /// Ranked terms, comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_terms: Option<String>,
    /// Conductor vocabulary found in the text, comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conductor_type_keyword: Option<String>,
}

impl AuxiliaryFields {
    pub fn is_empty(&self) -> bool {
        self.cable_category.is_none()
            && self.top_terms.is_none()
            && self.conductor_type_keyword.is_none()
    }
}

/// Final specification record handed back to callers.
///
/// Serializes as one flat mapping: canonical parameter keys followed by the
/// auxiliary keys that are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CableSpecs {
    #[serde(flatten)]
    pub parameters: SpecMap,
    #[serde(flatten)]
    pub auxiliary: AuxiliaryFields,
}

impl CableSpecs {
    pub fn from_parameters(parameters: SpecMap) -> Self {
        Self {
            parameters,
            auxiliary: AuxiliaryFields::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.auxiliary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_value() {
        let mut specs = SpecMap::new();
        specs.insert(ParameterKey::VoltageRating, "600V");
        specs.insert(ParameterKey::VoltageRating, "1000V");
        assert_eq!(specs.len(), 1);
        assert_eq!(specs.get(ParameterKey::VoltageRating), Some("1000V"));
    }

    #[test]
    fn cable_specs_serialize_flat() {
        let mut parameters = SpecMap::new();
        parameters.insert(ParameterKey::VoltageRating, "600V");
        parameters.insert(ParameterKey::ConductorSize, "2.5mm");
        let mut specs = CableSpecs::from_parameters(parameters);
        specs.auxiliary.cable_category = Some("Power Cable".into());

        let json = serde_json::to_value(&specs).unwrap();
        assert_eq!(json["voltage_rating"], "600V");
        assert_eq!(json["conductor_size"], "2.5mm");
        assert_eq!(json["cable_category"], "Power Cable");
        assert!(json.get("top_terms").is_none());
    }

    #[test]
    fn empty_specs_serialize_to_empty_object() {
        let json = serde_json::to_string(&CableSpecs::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn spec_map_deserializes_known_keys_only() {
        let ok: SpecMap = serde_json::from_str(r#"{"core_count":"4"}"#).unwrap();
        assert_eq!(ok.get(ParameterKey::CoreCount), Some("4"));

        let bad = serde_json::from_str::<SpecMap>(r#"{"colour":"red"}"#);
        assert!(bad.is_err());
    }
}
