//! Resolution of the two accepted `notify` call shapes.
//!
//! `notify` accepts either an error with optional attributes, or a label
//! with a message and optional attributes. [`resolve`] turns either shape
//! into a [`NotificationRequest`] and rejects everything else.

use serde_json::Value;

use crate::error::{ArgumentError, ArgumentResult};
use crate::failure::Failure;
use crate::request::{display_value, text_of, NotificationRequest, Options};

/// The primary argument of a `notify` call.
#[derive(Debug, Clone)]
pub enum Argument {
    /// An error value
    Failure(Failure),
    /// A class label
    Text(String),
    /// Any other value; a JSON string counts as text
    Value(Value),
}

impl Argument {
    fn normalize(self) -> Self {
        match self {
            Argument::Value(Value::String(text)) => Argument::Text(text),
            other => other,
        }
    }
}

impl From<Failure> for Argument {
    fn from(failure: Failure) -> Self {
        Argument::Failure(failure)
    }
}

impl From<&str> for Argument {
    fn from(text: &str) -> Self {
        Argument::Text(text.to_string())
    }
}

impl From<String> for Argument {
    fn from(text: String) -> Self {
        Argument::Text(text)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

/// Resolve a `notify` call into a request.
///
/// * error + optional map: the map is the base, `named` values override it.
/// * label + message: `named` must not carry `error_class`/`error_message`.
///
/// `raise_development` defaults to `true` and `notice_only` to `false`.
pub fn resolve(
    primary: impl Into<Argument>,
    secondary: Option<Value>,
    named: Options,
) -> ArgumentResult<NotificationRequest> {
    match primary.into().normalize() {
        Argument::Failure(failure) => {
            let base = match secondary {
                None | Some(Value::Null) => Options::default(),
                Some(Value::Object(map)) => Options::from_map(map)?,
                Some(other) => {
                    return Err(ArgumentError::NotHashLike {
                        got: display_value(&other),
                    })
                }
            };
            let options = named.merge_over(base);
            Ok(NotificationRequest::from_failure(failure).apply_options(options))
        }
        Argument::Text(error_class) => {
            let error_message = secondary
                .as_ref()
                .and_then(text_of)
                .ok_or_else(|| ArgumentError::NotStringLike {
                    got: secondary.as_ref().map(display_value).unwrap_or_default(),
                })?;
            if named.error_class.is_some() || named.error_message.is_some() {
                return Err(ArgumentError::ConflictingLabel {
                    error_class: named.error_class.unwrap_or_default(),
                    error_message: named.error_message.unwrap_or_default(),
                });
            }
            Ok(NotificationRequest::labeled(error_class, error_message).apply_options(named))
        }
        Argument::Value(_) => Err(ArgumentError::InvalidArgument),
    }
}
