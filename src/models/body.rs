use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("JSON body must be an object or an array")]
    NotAnObject,
}

/// How a request body is interpreted, from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Form,
    /// Anything else is treated as an empty field set.
    Ignored,
}

impl BodyFormat {
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            BodyFormat::Json
        } else if essence == "application/x-www-form-urlencoded" {
            BodyFormat::Form
        } else {
            BodyFormat::Ignored
        }
    }
}

/// Decodes a submission. Empty bodies, JSON arrays and unknown content types
/// give the empty submission.
pub fn decode<T>(content_type: &str, body: &[u8]) -> Result<T, SubmissionError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    match BodyFormat::from_content_type(content_type) {
        BodyFormat::Json => {
            match serde_json::from_slice::<Value>(body)? {
                Value::Object(fields) => Ok(serde_json::from_value(Value::Object(fields))?),
                Value::Array(_) => Ok(T::default()),
                _ => Err(SubmissionError::NotAnObject),
            }
        }
        BodyFormat::Form => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
            Ok(serde_json::from_value(Value::Object(fold_pairs(pairs)))?)
        }
        BodyFormat::Ignored => Ok(T::default()),
    }
}

/// Repeated keys keep every value, joined with `,` in submission order.
fn fold_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();

    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::String(existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            _ => {
                fields.insert(key, Value::String(value));
            }
        }
    }

    fields
}
