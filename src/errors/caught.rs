use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::kind::ErrorKind;

/// Field name -> ordered failure messages, in the order fields were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure message for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl<K, V, I> FromIterator<(K, I)> for ValidationErrors
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut errors = Self::new();
        for (field, messages) in iter {
            let field = field.into();
            let entry = errors.0.entry(field).or_default();
            entry.extend(messages.into_iter().map(Into::into));
        }
        errors
    }
}

/// One entry of a captured stack trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl Frame {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn in_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// An unhandled error captured while processing a request.
///
/// Built through the per-kind constructors so the kind-specific data
/// (HTTP status, validation failures) only exists where it makes sense.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CaughtError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    validation: Option<ValidationErrors>,
    trace: Vec<Frame>,
    type_name: Option<String>,
}

impl CaughtError {
    fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            validation: None,
            trace: Vec::new(),
            type_name: None,
        }
    }

    pub fn validation(message: impl Into<String>, failures: ValidationErrors) -> Self {
        Self {
            validation: Some(failures),
            ..Self::with_kind(ErrorKind::Validation, message)
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Authentication, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Authorization, message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::MethodNotAllowed, message)
    }

    /// Error carrying an explicit HTTP status
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::with_kind(ErrorKind::Http, message)
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Generic, message)
    }

    /// Attach an HTTP status to an error of another kind, as when the
    /// framework wraps it in a status-carrying error. Category overrides
    /// still win over this status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_trace(mut self, trace: Vec<Frame>) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.trace.push(frame);
        self
    }

    /// Report a more specific type name than the kind's default under debug mode
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, present only for status-carrying errors
    pub fn status_code_if_known(&self) -> Option<u16> {
        self.status
    }

    pub fn validation_failures(&self) -> Option<&ValidationErrors> {
        self.validation.as_ref()
    }

    pub fn stack_trace(&self) -> &[Frame] {
        &self.trace
    }

    pub fn type_name(&self) -> &str {
        self.type_name
            .as_deref()
            .unwrap_or_else(|| self.kind.type_name())
    }

    /// JSON-encoded stack trace, `[]` when nothing was captured
    pub fn serialized_trace(&self) -> String {
        serde_json::to_string(&self.trace).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_insertion_order() {
        let errors = ValidationErrors::new()
            .with("name", "required")
            .with("email", "required")
            .with("email", "must be an email");

        let fields: Vec<&String> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, ["name", "email"]);
        assert_eq!(
            errors.get("email"),
            Some(&["required".to_string(), "must be an email".to_string()][..])
        );
    }

    #[test]
    fn test_validation_errors_serialize_as_plain_map() {
        let errors: ValidationErrors = [("email", vec!["required"])].into_iter().collect();
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"email":["required"]}"#);
    }

    #[test]
    fn test_status_only_on_http_errors() {
        assert_eq!(CaughtError::http(404, "nope").status_code_if_known(), Some(404));
        assert_eq!(CaughtError::generic("boom").status_code_if_known(), None);
        assert_eq!(CaughtError::authentication("x").status_code_if_known(), None);
    }

    #[test]
    fn test_type_name_falls_back_to_kind() {
        assert_eq!(CaughtError::generic("boom").type_name(), "Exception");
        let err = CaughtError::generic("boom").with_type_name("App\\Exceptions\\CarNotFound");
        assert_eq!(err.type_name(), "App\\Exceptions\\CarNotFound");
    }

    #[test]
    fn test_serialized_trace() {
        assert_eq!(CaughtError::generic("boom").serialized_trace(), "[]");

        let err = CaughtError::generic("boom")
            .with_frame(Frame::new("store").in_class("CarController").at("cars.rs", 12));
        assert_eq!(
            err.serialized_trace(),
            r#"[{"file":"cars.rs","line":12,"function":"store","class":"CarController"}]"#
        );
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(CaughtError::authorization("denied").to_string(), "denied");
    }
}
