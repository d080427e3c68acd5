//! Property definitions

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::value::Value;

/// A named property and the value it starts with
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct PropertyDef {
    name: Name,
    default_value: Value,
}

bridge_core::bridge_type!(PropertyDef);

impl PropertyDef {
    pub fn new(name: impl Into<Name>, default_value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    pub fn default_value_mut(&mut self) -> &mut Value {
        &mut self.default_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn test_property_def_accessors() {
        let mut def = PropertyDef::new("propertyA", 10.0);
        assert_eq!(def.name(), "propertyA");
        assert_eq!(def.default_value().as_f64(), Some(10.0));

        def.default_value_mut().update(&Value::from(4.0)).unwrap();
        assert_eq!(def.default_value().as_f64(), Some(4.0));
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn test_property_def_from_json() {
        let def: PropertyDef =
            serde_json::from_str(r#"{"name": "propertyA", "default_value": 10.0}"#).unwrap();
        assert_eq!(def, PropertyDef::new("propertyA", 10.0));

        let def: PropertyDef =
            serde_json::from_str(r#"{"name": "up", "default_value": [0.0, 1.0, 0.0]}"#).unwrap();
        assert_eq!(def.default_value().kind(), ValueKind::Vec3);
    }
}
