use serde_json::{Map, Value};

use super::domain::ScreeningAnswers;

/// Raised when the answers record cannot be trusted enough to assess.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("answers are not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("answers must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("unknown field `{field}`")]
    UnknownField { field: String },
    #[error("field `{field}` is malformed: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed answers: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ScreeningAnswers {
    pub fn from_json_str(raw: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(raw).map_err(InputError::Syntax)?;
        Self::from_value(value)
    }

    /// Build a typed record from a field name to value mapping, failing on the first bad field.
    pub fn from_value(value: Value) -> Result<Self, InputError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(InputError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        match serde_json::from_value(Value::Object(fields.clone())) {
            Ok(answers) => Ok(answers),
            Err(err) => Err(locate_error(fields).unwrap_or(InputError::Malformed(err))),
        }
    }
}

// serde_json does not report which key failed, so retry each entry on its own.
fn locate_error(fields: Map<String, Value>) -> Option<InputError> {
    fields.into_iter().find_map(|(field, value)| {
        let mut single = Map::new();
        single.insert(field.clone(), value);
        match serde_json::from_value::<ScreeningAnswers>(Value::Object(single)) {
            Ok(_) => None,
            Err(source) if source.to_string().starts_with("unknown field") => {
                Some(InputError::UnknownField { field })
            }
            Err(source) => Some(InputError::InvalidField { field, source }),
        }
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
