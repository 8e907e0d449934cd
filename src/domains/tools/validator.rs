//! Argument Validator - turns an untyped argument bag into typed arguments.
//!
//! Handlers never read the raw bag. Every call goes through [`validate`]
//! first, so a handler only sees values whose kinds match its schema.
//!
//! Policy:
//! - a required parameter that is absent (or `null`) fails with
//!   [`ValidationError::MissingRequired`];
//! - a present parameter of the wrong kind fails with
//!   [`ValidationError::TypeMismatch`], or
//!   [`ValidationError::ElementTypeMismatch`] for the first bad array element;
//! - keys the schema does not declare are ignored;
//! - optional parameters that are absent become [`ArgValue::Absent`].

use std::collections::HashMap;

use serde_json::{Map, Number, Value};
use tracing::debug;

use super::error::ValidationError;
use super::schema::{ParameterKind, ParameterSchema, ParameterSpec};

/// Raw arguments as received from a transport.
pub type ArgumentBag = Map<String, Value>;

/// A validated argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// The parameter was not provided.
    Absent,
    String(String),
    Number(Number),
    Boolean(bool),
    Object(Map<String, Value>),
    Array(Vec<Value>),
    StringArray(Vec<String>),
}

impl ArgValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Arguments that passed validation against a tool's schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArguments {
    values: HashMap<String, ArgValue>,
}

static ABSENT: ArgValue = ArgValue::Absent;

impl ValidatedArguments {
    /// Get a value by parameter name. Undeclared names read as absent.
    pub fn get(&self, name: &str) -> &ArgValue {
        self.values.get(name).unwrap_or(&ABSENT)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            ArgValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn object(&self, name: &str) -> Option<&Map<String, Value>> {
        match self.get(name) {
            ArgValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn string_list(&self, name: &str) -> Option<&[String]> {
        match self.get(name) {
            ArgValue::StringArray(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Validate `bag` against `schema`.
pub fn validate(
    schema: &ParameterSchema,
    bag: &ArgumentBag,
) -> Result<ValidatedArguments, ValidationError> {
    let mut values = HashMap::with_capacity(schema.len());

    for param in schema.iter() {
        let value = match bag.get(&param.name) {
            None | Some(Value::Null) if param.required => {
                return Err(ValidationError::MissingRequired {
                    name: param.name.clone(),
                });
            }
            None | Some(Value::Null) => ArgValue::Absent,
            Some(raw) => check_kind(param, raw)?,
        };
        values.insert(param.name.clone(), value);
    }

    for key in bag.keys().filter(|k| schema.get(k).is_none()) {
        debug!("Ignoring undeclared argument: {}", key);
    }

    Ok(ValidatedArguments { values })
}

fn check_kind(param: &ParameterSpec, raw: &Value) -> Result<ArgValue, ValidationError> {
    let mismatch = || ValidationError::TypeMismatch {
        name: param.name.clone(),
        expected: param.kind.describe(),
        actual: json_kind(raw),
    };

    match (param.kind, raw) {
        (ParameterKind::String, Value::String(s)) => Ok(ArgValue::String(s.clone())),
        (ParameterKind::Number, Value::Number(n)) => Ok(ArgValue::Number(n.clone())),
        (ParameterKind::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => {
            Ok(ArgValue::Number(n.clone()))
        }
        (ParameterKind::Boolean, Value::Bool(b)) => Ok(ArgValue::Boolean(*b)),
        (ParameterKind::Object, Value::Object(map)) => Ok(ArgValue::Object(map.clone())),
        (ParameterKind::Array, Value::Array(items)) => Ok(ArgValue::Array(items.clone())),
        (ParameterKind::StringArray, Value::Array(items)) => {
            let mut strings = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => strings.push(s.clone()),
                    other => {
                        debug!(
                            "Parameter {} element {} is {}",
                            param.name,
                            index,
                            json_kind(other)
                        );
                        return Err(ValidationError::ElementTypeMismatch {
                            name: param.name.clone(),
                            index,
                            expected: "string",
                            actual: json_kind(other),
                        });
                    }
                }
            }
            Ok(ArgValue::StringArray(strings))
        }
        _ => Err(mismatch()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
