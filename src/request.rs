//! The normalized notification request and the payload handed to sinks.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ArgumentError, ArgumentResult};
use crate::failure::Failure;

/// Class label used for notifications that do not carry an error.
pub const NOTICE_CLASS: &str = "Notice";

/// The irreducible subject of a notification.
#[derive(Debug, Clone)]
pub enum Identity {
    /// A caller-owned error value
    Failure(Failure),
    /// A label/message pair supplied as text
    Labeled {
        error_class: String,
        error_message: String,
    },
}

impl Identity {
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Identity::Failure(failure) => Some(failure),
            Identity::Labeled { .. } => None,
        }
    }
}

/// What a request resolves to for display and for local raising.
#[derive(Debug, Clone)]
pub enum Subject<'a> {
    Failure(&'a Failure),
    Text(String),
}

impl Subject<'_> {
    /// The display text: the error's own message, or the text itself.
    pub fn message(&self) -> String {
        match self {
            Subject::Failure(failure) => failure.message(),
            Subject::Text(text) => text.clone(),
        }
    }

    /// Turn the subject into something that can be raised.
    pub fn into_failure(self) -> Failure {
        match self {
            Subject::Failure(failure) => failure.clone(),
            Subject::Text(text) => Failure::runtime(text),
        }
    }
}

/// Named attributes accepted by `notify`.
///
/// Every field is optional; `None` means "not supplied" so that a mapping
/// passed as the secondary argument can provide the value instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub error_class: Option<String>,
    pub error_message: Option<String>,
    pub context: Option<Map<String, Value>>,
    pub backtrace: Option<Vec<String>>,
    pub parameters: Option<Map<String, Value>>,
    pub action: Option<String>,
    pub raise_development: Option<bool>,
    pub notice_only: Option<bool>,
}

impl Options {
    /// The keys `from_map` recognizes.
    pub const KEYS: [&'static str; 8] = [
        "error_class",
        "error_message",
        "context",
        "backtrace",
        "parameters",
        "action",
        "raise_development",
        "notice_only",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_class(mut self, error_class: impl Into<String>) -> Self {
        self.error_class = Some(error_class.into());
        self
    }

    pub fn error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    pub fn context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = Some(frames.into_iter().map(Into::into).collect());
        self
    }

    pub fn parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn raise_development(mut self, raise_development: bool) -> Self {
        self.raise_development = Some(raise_development);
        self
    }

    pub fn notice_only(mut self, notice_only: bool) -> Self {
        self.notice_only = Some(notice_only);
        self
    }

    /// Parse options from a key/value map.
    ///
    /// Unknown keys fail with [`ArgumentError::UnknownKeyword`]; a `null`
    /// value is treated as "not supplied".
    pub fn from_map(map: Map<String, Value>) -> ArgumentResult<Self> {
        let mut options = Self::default();
        for (key, value) in map {
            options.set(&key, value)?;
        }
        Ok(options)
    }

    /// Set a single option by key.
    pub fn set(&mut self, key: &str, value: Value) -> ArgumentResult<()> {
        if !Self::KEYS.iter().any(|known| *known == key) {
            return Err(ArgumentError::UnknownKeyword(key.to_string()));
        }
        if value.is_null() {
            return Ok(());
        }
        let invalid = |value: &Value| ArgumentError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "error_class" => {
                self.error_class = Some(text_of(&value).ok_or_else(|| invalid(&value))?)
            }
            "error_message" => {
                self.error_message = Some(text_of(&value).ok_or_else(|| invalid(&value))?)
            }
            "action" => self.action = Some(text_of(&value).ok_or_else(|| invalid(&value))?),
            "context" | "parameters" => {
                let map = match value {
                    Value::Object(map) => map,
                    other => return Err(invalid(&other)),
                };
                if key == "context" {
                    self.context = Some(map);
                } else {
                    self.parameters = Some(map);
                }
            }
            "backtrace" => {
                let frames = value
                    .as_array()
                    .and_then(|frames| frames.iter().map(text_of).collect::<Option<Vec<_>>>())
                    .ok_or_else(|| invalid(&value))?;
                self.backtrace = Some(frames);
            }
            "raise_development" => {
                self.raise_development = Some(value.as_bool().ok_or_else(|| invalid(&value))?)
            }
            "notice_only" => {
                self.notice_only = Some(value.as_bool().ok_or_else(|| invalid(&value))?)
            }
            _ => return Err(ArgumentError::UnknownKeyword(key.to_string())),
        }
        Ok(())
    }

    /// Layer `self` on top of `base`: every `Some` in `self` wins.
    pub fn merge_over(self, base: Options) -> Options {
        Options {
            error_class: self.error_class.or(base.error_class),
            error_message: self.error_message.or(base.error_message),
            context: self.context.or(base.context),
            backtrace: self.backtrace.or(base.backtrace),
            parameters: self.parameters.or(base.parameters),
            action: self.action.or(base.action),
            raise_development: self.raise_development.or(base.raise_development),
            notice_only: self.notice_only.or(base.notice_only),
        }
    }
}

impl TryFrom<Value> for Options {
    type Error = ArgumentError;

    fn try_from(value: Value) -> ArgumentResult<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Null => Ok(Self::default()),
            other => Err(ArgumentError::NotHashLike {
                got: display_value(&other),
            }),
        }
    }
}

/// Text form of a scalar JSON value. Arrays, objects and `null` have none.
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// How a value is shown inside an argument error message.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The canonical representation of one notify call.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    identity: Identity,
    pub error_class: Option<String>,
    pub error_message: Option<String>,
    pub exception: Option<Failure>,
    pub context: Option<Map<String, Value>>,
    pub backtrace: Option<Vec<String>>,
    pub parameters: Option<Map<String, Value>>,
    pub action: Option<String>,
    pub tags: Option<String>,
    pub raise_development: bool,
    pub notice_only: bool,
}

impl NotificationRequest {
    fn with_identity(identity: Identity) -> Self {
        Self {
            identity,
            error_class: None,
            error_message: None,
            exception: None,
            context: None,
            backtrace: None,
            parameters: None,
            action: None,
            tags: None,
            raise_development: true,
            notice_only: false,
        }
    }

    /// A request about a caller-owned error.
    pub fn from_failure(failure: Failure) -> Self {
        Self::with_identity(Identity::Failure(failure))
    }

    /// A request about a label/message pair.
    ///
    /// The message counts as explicitly set, even when empty.
    pub fn labeled(error_class: impl Into<String>, error_message: impl Into<String>) -> Self {
        let error_message = error_message.into();
        let mut request = Self::with_identity(Identity::Labeled {
            error_class: error_class.into(),
            error_message: error_message.clone(),
        });
        request.error_message = Some(error_message);
        request
    }

    /// A request built from attributes alone.
    ///
    /// The label comes from `error_class` (empty if absent); `error_message`
    /// stays an attribute so message resolution treats it as explicit.
    pub fn from_attributes(options: Options) -> Self {
        let Options {
            error_class,
            error_message,
            context,
            backtrace,
            parameters,
            action,
            raise_development,
            notice_only,
        } = options;
        let mut request = Self::with_identity(Identity::Labeled {
            error_class: error_class.unwrap_or_default(),
            error_message: String::new(),
        });
        request.error_message = error_message;
        request.context = context;
        request.backtrace = backtrace;
        request.parameters = parameters;
        request.action = action;
        request.raise_development = raise_development.unwrap_or(true);
        request.notice_only = notice_only.unwrap_or(false);
        request
    }

    /// Apply options on top of this request; flags default when absent.
    pub(crate) fn apply_options(mut self, options: Options) -> Self {
        if options.error_class.is_some() {
            self.error_class = options.error_class;
        }
        if options.error_message.is_some() {
            self.error_message = options.error_message;
        }
        if options.context.is_some() {
            self.context = options.context;
        }
        if options.backtrace.is_some() {
            self.backtrace = options.backtrace;
        }
        if options.parameters.is_some() {
            self.parameters = options.parameters;
        }
        if options.action.is_some() {
            self.action = options.action;
        }
        self.raise_development = options.raise_development.unwrap_or(true);
        self.notice_only = options.notice_only.unwrap_or(false);
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn with_error_class(mut self, error_class: impl Into<String>) -> Self {
        self.error_class = Some(error_class.into());
        self
    }

    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    pub fn with_exception(mut self, exception: Failure) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = Some(frames.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_raise_development(mut self, raise_development: bool) -> Self {
        self.raise_development = raise_development;
        self
    }

    pub fn with_notice_only(mut self, notice_only: bool) -> Self {
        self.notice_only = notice_only;
        self
    }

    /// Resolve what this request is about.
    ///
    /// Order: the identity's error when no `error_message`/`exception`
    /// override is set; otherwise the `exception` override, then the
    /// `error_message` override; otherwise the label itself (a request built
    /// from attributes without a message).
    pub fn subject(&self) -> Subject<'_> {
        let has_override = self.exception.is_some() || self.error_message.is_some();
        if let (Identity::Failure(failure), false) = (&self.identity, has_override) {
            return Subject::Failure(failure);
        }
        if let Some(exception) = &self.exception {
            return Subject::Failure(exception);
        }
        if let Some(message) = &self.error_message {
            return Subject::Text(message.clone());
        }
        match &self.identity {
            Identity::Failure(failure) => Subject::Failure(failure),
            Identity::Labeled { error_class, .. } => Subject::Text(error_class.clone()),
        }
    }

    /// Class label shown in notice-only messages.
    pub fn error_class_label(&self) -> &str {
        match &self.identity {
            Identity::Failure(failure) => failure.class_name(),
            Identity::Labeled { .. } => NOTICE_CLASS,
        }
    }

    /// Message text shown in notice-only messages.
    pub fn error_message_text(&self) -> String {
        self.subject().message()
    }

    /// Build the payload for a sink. Policy flags are not part of it.
    pub fn to_payload(&self) -> Payload {
        let (exception, error_class, error_message) = match &self.identity {
            Identity::Failure(failure) => (
                Some(failure.clone()),
                self.error_class.clone(),
                self.error_message.clone(),
            ),
            Identity::Labeled { error_class, .. } => (
                self.exception.clone(),
                self.error_class
                    .clone()
                    .or_else(|| Some(error_class.clone()).filter(|c| !c.is_empty())),
                self.error_message.clone(),
            ),
        };
        Payload {
            exception,
            error_class,
            error_message,
            context: self.context.clone(),
            backtrace: self.backtrace.clone(),
            parameters: self.parameters.clone(),
            action: self.action.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// What a [`Notifier`](crate::Notifier) receives.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<Failure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_options_from_map() {
        let options = Options::from_map(map(json!({
            "context": { "user_id": 3 },
            "raise_development": false,
            "backtrace": ["a.rs:1", "b.rs:2"],
        })))
        .unwrap();

        assert_eq!(options.context, Some(map(json!({ "user_id": 3 }))));
        assert_eq!(options.raise_development, Some(false));
        assert_eq!(
            options.backtrace,
            Some(vec!["a.rs:1".to_string(), "b.rs:2".to_string()])
        );
        assert_eq!(options.notice_only, None);
    }

    #[test]
    fn test_options_unknown_key() {
        let err = Options::from_map(map(json!({ "ctx": { "user_id": 3 } }))).unwrap_err();
        assert_eq!(err, ArgumentError::UnknownKeyword("ctx".to_string()));
        assert_eq!(err.to_string(), "unknown keyword: ctx");
    }

    #[test]
    fn test_options_invalid_value() {
        let err = Options::from_map(map(json!({ "notice_only": "yes" }))).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::InvalidValue {
                key: "notice_only".to_string(),
                value: "\"yes\"".to_string(),
            }
        );
    }

    #[test]
    fn test_options_null_is_absent() {
        let options = Options::from_map(map(json!({ "action": null }))).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_options_try_from_non_object() {
        let err = Options::try_from(json!("oops")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "option_or_error_message must be nil or Hash-like object, but got oops"
        );
    }

    #[test]
    fn test_merge_over() {
        let base = Options::new().action("signup").raise_development(false);
        let named = Options::new().action("login").notice_only(true);
        let merged = named.merge_over(base);

        assert_eq!(merged.action.as_deref(), Some("login"));
        assert_eq!(merged.raise_development, Some(false));
        assert_eq!(merged.notice_only, Some(true));
    }

    #[test]
    fn test_request_defaults() {
        let request = NotificationRequest::from_failure(Failure::runtime("test error"));
        assert!(request.raise_development);
        assert!(!request.notice_only);
        assert!(request.tags.is_none());
    }

    #[test]
    fn test_subject_prefers_failure_without_override() {
        let failure = Failure::runtime("test error");
        let request = NotificationRequest::from_failure(failure.clone());
        match request.subject() {
            Subject::Failure(f) => assert!(f.ptr_eq(&failure)),
            Subject::Text(_) => panic!("expected the failure"),
        }
        assert_eq!(request.error_message_text(), "test error");
        assert_eq!(request.error_class_label(), "RuntimeError");
    }

    #[test]
    fn test_subject_error_message_override_wins_over_failure() {
        let request = NotificationRequest::from_failure(Failure::runtime("test error"))
            .with_error_message("explicit");
        assert_eq!(request.error_message_text(), "explicit");
        assert_eq!(request.error_class_label(), "RuntimeError");
    }

    #[test]
    fn test_subject_exception_override_before_error_message() {
        let request = NotificationRequest::from_attributes(Options::new().error_message("text"))
            .with_exception(Failure::runtime("from exception"));
        assert_eq!(request.error_message_text(), "from exception");
    }

    #[test]
    fn test_subject_labeled() {
        let request = NotificationRequest::labeled("InvalidUserError", "user must be hard worker");
        assert_eq!(request.error_message_text(), "user must be hard worker");
        assert_eq!(request.error_class_label(), NOTICE_CLASS);

        let bare = NotificationRequest::from_attributes(Options::new().error_class("Bare"));
        assert_eq!(bare.error_message_text(), "Bare");
    }

    #[test]
    fn test_subject_labeled_empty_message() {
        let request = NotificationRequest::labeled("InvalidUserError", "");
        assert_eq!(request.error_message_text(), "");

        let payload = request.to_payload();
        assert_eq!(payload.error_class.as_deref(), Some("InvalidUserError"));
        assert_eq!(payload.error_message.as_deref(), Some(""));
    }

    #[test]
    fn test_payload_for_failure() {
        let mut context = Map::new();
        context.insert("user_id".to_string(), json!(3));
        let request = NotificationRequest::from_failure(Failure::runtime("test error"))
            .with_context(context.clone())
            .with_raise_development(false);
        let payload = request.to_payload();

        assert_eq!(payload.exception.unwrap().message(), "test error");
        assert!(payload.error_class.is_none());
        assert!(payload.error_message.is_none());
        assert_eq!(payload.context, Some(context));
    }

    #[test]
    fn test_payload_for_label() {
        let payload = NotificationRequest::labeled("InvalidUserError", "msg").to_payload();
        assert!(payload.exception.is_none());
        assert_eq!(payload.error_class.as_deref(), Some("InvalidUserError"));
        assert_eq!(payload.error_message.as_deref(), Some("msg"));

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "error_class": "InvalidUserError", "error_message": "msg" })
        );
    }
}
