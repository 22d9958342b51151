use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Integer fields truncate toward zero, matching what the receiving
    /// service expects: 12.9 becomes 12 and -12.9 becomes -12.
    pub fn truncated(value: f64) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One submission payload: short field codes mapped to values, in emission
/// order. Built once per run and never mutated after assembly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl OutputRecord {
    pub fn new() -> Self {
        OutputRecord { fields: Vec::new() }
    }

    pub fn push(&mut self, code: &'static str, value: FieldValue) {
        self.fields.push((code, value));
    }

    pub fn get(&self, code: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| v)
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(c, _)| *c).collect()
    }

    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|(code, value)| (*code, value.to_string()))
            .collect()
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (code, value) in &self.fields {
            match value {
                FieldValue::Int(i) => map.serialize_entry(code, i)?,
                FieldValue::Float(v) => map.serialize_entry(code, v)?,
                FieldValue::Text(s) => map.serialize_entry(code, s)?,
            }
        }
        map.end()
    }
}
