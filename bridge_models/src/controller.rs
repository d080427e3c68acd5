//! Controller definitions and live controller state

use std::collections::HashMap;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::name::Name;
use crate::property::PropertyDef;
use crate::value::Value;

/// A named, ordered set of property definitions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct ControllerDef {
    name: Name,
    properties: Vec<PropertyDef>,
}

bridge_core::bridge_type!(ControllerDef);

impl ControllerDef {
    pub fn new(name: impl Into<Name>, properties: Vec<PropertyDef>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn properties(&self) -> &Vec<PropertyDef> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Vec<PropertyDef> {
        &mut self.properties
    }

    /// First property named `name`
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|property| property.name() == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertyDef> {
        self.properties
            .iter_mut()
            .find(|property| property.name() == name)
    }
}

/// Current values for every property of a controller definition
///
/// Values start at the defaults of the definition and can be mutated in
/// place. They never change kind: [`Value::update`] rejects mismatches.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    values: HashMap<Name, Value>,
    definition: ControllerDef,
}

bridge_core::bridge_type!(ControllerState);

impl ControllerState {
    pub fn new(definition: ControllerDef) -> Self {
        let values = seed(&definition);
        debug!(
            controller = definition.name().as_str(),
            properties = values.len(),
            "created controller state"
        );
        Self { values, definition }
    }

    pub fn name(&self) -> &Name {
        self.definition.name()
    }

    pub fn definition(&self) -> &ControllerDef {
        &self.definition
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn value_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    pub fn values(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.values.iter()
    }

    /// Restores every value to its default
    pub fn reset(&mut self) {
        self.values = seed(&self.definition);
        debug!(controller = self.name().as_str(), "reset controller state");
    }

    /// Swaps in a new definition and reseeds from its defaults
    pub fn redefine(&mut self, definition: ControllerDef) {
        self.definition = definition;
        self.reset();
    }
}

impl From<ControllerDef> for ControllerState {
    fn from(definition: ControllerDef) -> Self {
        Self::new(definition)
    }
}

fn seed(definition: &ControllerDef) -> HashMap<Name, Value> {
    definition
        .properties()
        .iter()
        .map(|property| (property.name().clone(), property.default_value().clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ControllerDef {
        ControllerDef::new(
            "controllerA",
            vec![
                PropertyDef::new("propertyA", 10.0),
                PropertyDef::new("propertyB", Value::vec3()),
            ],
        )
    }

    #[test]
    fn test_property_lookup() {
        let def = sample();
        assert_eq!(def.name(), "controllerA");
        assert_eq!(def.properties().len(), 2);
        assert_eq!(
            def.property("propertyA").unwrap().default_value().as_f64(),
            Some(10.0)
        );
        assert!(def.property("missing").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let def = ControllerDef::new(
            "dup",
            vec![PropertyDef::new("p", 1.0), PropertyDef::new("p", 2.0)],
        );
        assert_eq!(def.property("p").unwrap().default_value().as_f64(), Some(1.0));
    }

    #[test]
    fn test_state_starts_at_defaults() {
        let state = ControllerState::new(sample());
        assert_eq!(state.name(), "controllerA");
        assert_eq!(state.len(), 2);
        assert_eq!(state.value("propertyA").unwrap().as_f64(), Some(10.0));
        assert_eq!(*state.value("propertyB").unwrap(), Value::vec3());
        assert!(state.value("missing").is_none());
    }

    #[test]
    fn test_state_reset() {
        let mut state = ControllerState::from(sample());
        state
            .value_mut("propertyA")
            .unwrap()
            .update(&Value::from(20.0))
            .unwrap();
        assert_eq!(state.value("propertyA").unwrap().as_f64(), Some(20.0));

        state.reset();
        assert_eq!(state.value("propertyA").unwrap().as_f64(), Some(10.0));
    }

    #[test]
    fn test_state_redefine() {
        let mut state = ControllerState::new(sample());
        state.redefine(ControllerDef::new(
            "controllerB",
            vec![PropertyDef::new("scale", 2.0)],
        ));
        assert_eq!(state.name(), "controllerB");
        assert_eq!(state.len(), 1);
        assert!(state.value("propertyA").is_none());
        assert_eq!(state.value("scale").unwrap().as_f64(), Some(2.0));
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn test_controller_def_from_json() {
        let json = r#"{
            "name": "controllerA",
            "properties": [
                {"name": "propertyA", "default_value": 10.0},
                {"name": "propertyB", "default_value": [0.0, 0.0, 0.0]}
            ]
        }"#;
        let def: ControllerDef = serde_json::from_str(json).unwrap();
        assert_eq!(def, sample());
    }
}
