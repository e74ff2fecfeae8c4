use crate::core::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<Value>,
}

impl FieldValue {
    pub fn new(name: &str, value: Option<Value>) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
        }
    }
}

/// A single candidate record under filtering. Fields are laid out in the
/// order of the schema the record was read under, so positional access is
/// the fast path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub field_values: Vec<FieldValue>,
}

impl Record {
    pub fn new(field_values: Vec<FieldValue>) -> Self {
        Record { field_values }
    }

    pub fn from_pairs(pairs: Vec<(&str, Value)>) -> Self {
        Record {
            field_values: pairs
                .into_iter()
                .map(|(name, value)| FieldValue::new(name, Some(value)))
                .collect(),
        }
    }

    /// Case-sensitive exact match against the field name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.field_values.get(index).and_then(|f| f.value.as_ref())
    }
}
