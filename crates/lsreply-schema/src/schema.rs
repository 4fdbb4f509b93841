use jsonschema::Validator;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::validator::validate_value;

/// The schema that accepts any well-formed JSON document.
pub const PERMISSIVE_SCHEMA: &str = "{}";

/// Keywords whose value is a map of subschemas.
const MAP_KEYWORDS: [&str; 5] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keywords whose value is a single subschema.
const SINGLE_KEYWORDS: [&str; 11] = [
    "propertyNames",
    "additionalProperties",
    "unevaluatedProperties",
    "items",
    "contains",
    "additionalItems",
    "unevaluatedItems",
    "not",
    "if",
    "then",
    "else",
];

/// Keywords whose value is an array of subschemas.
const ARRAY_KEYWORDS: [&str; 4] = ["prefixItems", "allOf", "anyOf", "oneOf"];

/// Keywords that only make sense on object schemas.
const OBJECT_KEYWORDS: [&str; 8] = [
    "properties",
    "patternProperties",
    "additionalProperties",
    "unevaluatedProperties",
    "required",
    "dependentRequired",
    "dependentSchemas",
    "propertyNames",
];

/// A compiled JSON Schema used to parse inbound payloads and render
/// outbound trees.
///
/// Dropping the schema releases the compiled validator.
pub struct Schema {
    validator: Validator,
    config: SchemaConfig,
}

impl Schema {
    /// Compile the permissive schema with default config.
    pub fn permissive() -> Result<Self> {
        Self::from_json(PERMISSIVE_SCHEMA)
    }

    /// Compile a schema from a JSON string with default config.
    pub fn from_json(schema_json: &str) -> Result<Self> {
        Self::from_json_with_config(schema_json, SchemaConfig::default())
    }

    /// Compile a schema from a JSON string with explicit config.
    pub fn from_json_with_config(schema_json: &str, config: SchemaConfig) -> Result<Self> {
        let schema: Value = serde_json::from_str(schema_json)?;
        Self::compile_with_config(&schema, config)
    }

    /// Compile a schema value with default config.
    pub fn compile(schema: &Value) -> Result<Self> {
        Self::compile_with_config(schema, SchemaConfig::default())
    }

    /// Compile a schema value with explicit config.
    pub fn compile_with_config(schema: &Value, config: SchemaConfig) -> Result<Self> {
        let mut schema_to_compile = schema.clone();
        if config.strict_mode {
            apply_strict_mode(&mut schema_to_compile);
        }

        let validator = jsonschema::validator_for(&schema_to_compile)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;

        Ok(Self { validator, config })
    }

    /// Parse a text payload and check it against this schema.
    pub fn parse(&self, payload: &str) -> Result<Value> {
        self.parse_slice(payload.as_bytes())
    }

    /// Parse a byte payload and check it against this schema.
    pub fn parse_slice(&self, payload: &[u8]) -> Result<Value> {
        if payload.len() > self.config.max_payload_size {
            return Err(SchemaError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }

        let value: Value = serde_json::from_slice(payload)?;
        self.validate(&value)?;
        Ok(value)
    }

    /// Check a value against this schema.
    pub fn validate(&self, value: &Value) -> Result<()> {
        validate_value(value, &self.validator)
    }

    /// Check a value against this schema and render it as compact JSON text.
    pub fn render(&self, value: &Value) -> Result<String> {
        self.validate(value)?;
        let text = serde_json::to_string(value)?;
        debug!(size = text.len(), "rendered payload");
        Ok(text)
    }

    /// Get schema configuration.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn apply_strict_mode(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for key in MAP_KEYWORDS {
                if let Some(Value::Object(children)) = map.get_mut(key) {
                    children.values_mut().for_each(apply_strict_mode);
                }
            }
            for key in SINGLE_KEYWORDS {
                if let Some(child) = map.get_mut(key) {
                    apply_strict_mode(child);
                }
            }
            for key in ARRAY_KEYWORDS {
                if let Some(Value::Array(children)) = map.get_mut(key) {
                    children.iter_mut().for_each(apply_strict_mode);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(apply_strict_mode),
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|kind| matches!(kind, Value::String(kind) if kind == "object")),
        _ => OBJECT_KEYWORDS.iter().any(|keyword| map.contains_key(*keyword)),
    }
}
