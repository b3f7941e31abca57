use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferTarget, TypedBuffer};

/// Value of a named record or live-object attribute
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Numbers(Vec<f64>),
    Buffer(TypedBuffer),
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&TypedBuffer> {
        match self {
            AttrValue::Buffer(buffer) => Some(buffer),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(value: Vec<f64>) -> Self {
        AttrValue::Numbers(value)
    }
}

impl From<TypedBuffer> for AttrValue {
    fn from(value: TypedBuffer) -> Self {
        AttrValue::Buffer(value)
    }
}

/// Named attributes of a record, ordered by name
pub type Attributes = BTreeMap<String, AttrValue>;

impl BufferTarget for Attributes {
    fn buffer_mut(&mut self, attr: &str) -> Option<&mut TypedBuffer> {
        match self.get_mut(attr) {
            Some(AttrValue::Buffer(buffer)) => Some(buffer),
            _ => None,
        }
    }

    fn set_buffer(&mut self, attr: &str, buffer: TypedBuffer) {
        self.insert(attr.to_string(), AttrValue::Buffer(buffer));
    }
}
