//! Parameter schemas - declarative descriptions of tool arguments.
//!
//! A [`ParameterSchema`] is the single source of truth for a tool's inputs:
//! the Argument Validator checks incoming bags against it, and both
//! transports render it as JSON Schema when advertising tools.

use serde_json::{Map, Value, json};

/// The value kind a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    /// Any JSON array.
    Array,
    /// A JSON array whose elements must all be strings.
    StringArray,
}

impl ParameterKind {
    /// Human-readable name used in validation messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::Boolean => "a boolean",
            Self::Object => "an object",
            Self::Array => "an array",
            Self::StringArray => "an array of strings",
        }
    }

    /// JSON Schema fragment for this kind.
    fn json_schema(&self) -> Map<String, Value> {
        let schema = match self {
            Self::String => json!({ "type": "string" }),
            Self::Number => json!({ "type": "number" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Object => json!({ "type": "object" }),
            Self::Array => json!({ "type": "array" }),
            Self::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
        };
        match schema {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// A single named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParameterKind,
    pub required: bool,
    pub description: String,
}

impl ParameterSpec {
    /// Create a required parameter.
    pub fn required(
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            description: description.into(),
        }
    }

    /// Create an optional parameter.
    pub fn optional(
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

/// Ordered set of parameters accepted by a tool.
///
/// Parameter names must be unique; the registry rejects a tool whose schema
/// repeats a name (see [`ParameterSchema::duplicate_name`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSchema {
    params: Vec<ParameterSpec>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style).
    pub fn with(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Iterate parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.params.iter()
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the first parameter name that appears more than once.
    pub fn duplicate_name(&self) -> Option<&str> {
        self.params.iter().enumerate().find_map(|(i, p)| {
            self.params[..i]
                .iter()
                .any(|earlier| earlier.name == p.name)
                .then_some(p.name.as_str())
        })
    }

    /// Render as a JSON Schema object (`{"type": "object", ...}`).
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = param.kind.json_schema();
            prop.insert(
                "description".to_string(),
                Value::String(param.description.clone()),
            );
            properties.insert(param.name.clone(), Value::Object(prop));
        }

        let required: Vec<Value> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| Value::String(p.name.clone()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }
}
