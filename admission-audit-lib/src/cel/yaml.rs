//! YAML parsing exposed to expressions as `yaml.parse(text)`

use super::Library;
use super::structured_value::StructuredValue;
use crate::error::ParseError;
use cel_interpreter::extractors::This;
use cel_interpreter::{Context, ExecutionError, FunctionContext, Value};
use std::sync::Arc;

/// Parse a YAML document.
///
/// Empty input and documents whose root is `null` yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the document is not well-formed YAML.
pub fn parse(content: &[u8]) -> Result<Option<StructuredValue>, ParseError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let raw: serde_yaml::Value = serde_yaml::from_slice(content)?;
    let value = StructuredValue::from_yaml(raw)?;

    Ok(if value.is_null() { None } else { Some(value) })
}

/// Binds [`parse`] under the `yaml` namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLibrary;

impl YamlLibrary {
    pub const TYPE_NAME: &'static str = "yaml.Yaml";
    pub const NAMESPACE: &'static str = "yaml";
}

impl Library for YamlLibrary {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn namespace(&self) -> &'static str {
        Self::NAMESPACE
    }

    fn functions(&self) -> &'static [&'static str] {
        &["parse"]
    }

    fn install(&self, context: &mut Context<'_>) {
        context.add_variable_from_value(Self::NAMESPACE, Value::String(Arc::new(Self::TYPE_NAME.to_string())));
        context.add_function("parse", parse_function);
    }
}

fn parse_function(ftx: &FunctionContext, This(this): This<Value>, content: Value) -> Result<Value, ExecutionError> {
    match &this {
        Value::String(s) if s.as_str() == YamlLibrary::TYPE_NAME => {}
        other => return Err(ftx.error(format!("parse() must be called on {}, not on {other:?}", YamlLibrary::NAMESPACE))),
    }

    let parsed = match &content {
        Value::String(s) => parse(s.as_bytes()),
        Value::Bytes(b) => parse(b),
        other => return Err(ftx.error(format!("parse() expects a string or bytes argument, got {other:?}"))),
    };

    match parsed {
        Ok(Some(value)) => Ok(value.into()),
        Ok(None) => Ok(Value::Null),
        Err(e) => Err(ftx.error(e)),
    }
}
