//! Translation of unhandled errors into JSON error responses

use std::sync::Arc;
use tracing::{debug, error};

use super::caught::CaughtError;
use super::kind::{ErrorKind, DEFAULT_STATUS};
use super::response::{ErrorPayload, ErrorResponse};

/// Process-wide debug switches, read once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugFlags {
    /// `app.debug`: expose the error type name
    pub debug: bool,
    /// `api.debug`: expose the stack trace and log every translated error
    pub api_debug: bool,
}

impl DebugFlags {
    pub fn new(debug: bool, api_debug: bool) -> Self {
        Self { debug, api_debug }
    }
}

/// Failure of an [`ErrorSink`]; never surfaced past the translator
#[derive(Debug, thiserror::Error)]
#[error("error sink unavailable: {0}")]
pub struct SinkError(pub String);

/// Destination for the log record written under API debug mode
pub trait ErrorSink: Send + Sync {
    fn record(&self, error: &CaughtError) -> Result<(), SinkError>;
}

/// Writes the error and its trace as a `tracing` error event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, caught: &CaughtError) -> Result<(), SinkError> {
        error!(
            kind = %caught.kind(),
            exception = %caught.type_name(),
            trace = %caught.serialized_trace(),
            "{}",
            caught.message()
        );
        Ok(())
    }
}

/// Maps a [`CaughtError`] onto an [`ErrorResponse`].
///
/// Stateless apart from the flag snapshot and the sink, so one instance is
/// shared by every request.
#[derive(Clone)]
pub struct ResponseTranslator {
    flags: DebugFlags,
    sink: Arc<dyn ErrorSink>,
}

impl std::fmt::Debug for ResponseTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseTranslator")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Default for ResponseTranslator {
    fn default() -> Self {
        Self::new(DebugFlags::default())
    }
}

impl ResponseTranslator {
    pub fn new(flags: DebugFlags) -> Self {
        Self::with_sink(flags, Arc::new(TracingSink))
    }

    pub fn with_sink(flags: DebugFlags, sink: Arc<dyn ErrorSink>) -> Self {
        Self { flags, sink }
    }

    pub fn flags(&self) -> DebugFlags {
        self.flags
    }

    /// Translate with the configured flags
    pub fn translate(&self, caught: &CaughtError) -> ErrorResponse {
        translate(caught, self.flags, self.sink.as_ref())
    }
}

/// Build the error response for `caught`.
///
/// Defaults come first, then the debug additions, then the category
/// overrides in [`ErrorKind::OVERRIDE_ORDER`]. Each override replaces both
/// `status_code` and `errors` outright.
pub fn translate(caught: &CaughtError, flags: DebugFlags, sink: &dyn ErrorSink) -> ErrorResponse {
    let mut response = ErrorResponse {
        errors: ErrorPayload::default(),
        status_code: caught
            .status_code_if_known()
            .filter(|status| (100..=599).contains(status))
            .unwrap_or(DEFAULT_STATUS),
        message: caught.message().to_string(),
        exception: None,
        trace: None,
    };

    if flags.debug {
        response.exception = Some(caught.type_name().to_string());
    }

    if flags.api_debug {
        response.trace = Some(caught.serialized_trace());
        if let Err(e) = sink.record(caught) {
            debug!("Dropping error log record: {}", e);
        }
    }

    for rule in ErrorKind::OVERRIDE_ORDER {
        if caught.kind() != rule {
            continue;
        }
        if let Some(status) = rule.override_status() {
            response.status_code = status;
        }
        response.errors = match rule.override_text() {
            Some(text) => ErrorPayload::from(text),
            None => ErrorPayload::Fields(caught.validation_failures().cloned().unwrap_or_default()),
        };
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::caught::{Frame, ValidationErrors};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<String>>,
    }

    impl ErrorSink for RecordingSink {
        fn record(&self, caught: &CaughtError) -> Result<(), SinkError> {
            self.records.lock().unwrap().push(caught.message().to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    impl ErrorSink for BrokenSink {
        fn record(&self, _caught: &CaughtError) -> Result<(), SinkError> {
            Err(SinkError("disk full".to_string()))
        }
    }

    fn quiet() -> DebugFlags {
        DebugFlags::default()
    }

    #[test]
    fn test_generic_error_defaults() {
        let response = translate(&CaughtError::generic("Car exploded"), quiet(), &TracingSink);

        assert_eq!(response.status_code, 400);
        assert_eq!(response.errors, ErrorPayload::from("Oops something went wrong."));
        assert_eq!(response.message, "Car exploded");
        assert!(response.exception.is_none());
        assert!(response.trace.is_none());

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("exception").is_none());
        assert!(value.get("trace").is_none());
    }

    #[test]
    fn test_http_error_keeps_its_status() {
        let response = translate(&CaughtError::http(404, "Not Found"), quiet(), &TracingSink);
        assert_eq!(response.status_code, 404);
        assert_eq!(response.errors, ErrorPayload::from("Oops something went wrong."));
    }

    #[test]
    fn test_out_of_range_status_ignored() {
        let response = translate(&CaughtError::http(42, "odd"), quiet(), &TracingSink);
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_validation_overrides_wrapped_status() {
        let failures = ValidationErrors::new().with("email", "required");
        let caught = CaughtError::validation("The given data was invalid.", failures.clone())
            .with_status(404);

        let response = translate(&caught, quiet(), &TracingSink);
        assert_eq!(response.status_code, 422);
        assert_eq!(response.errors, ErrorPayload::Fields(failures));
        assert_eq!(response.message, "The given data was invalid.");
    }

    #[test]
    fn test_authentication_ignores_message() {
        let response = translate(
            &CaughtError::authentication("token expired at 10:00"),
            quiet(),
            &TracingSink,
        );
        assert_eq!(response.status_code, 401);
        assert_eq!(response.errors, ErrorPayload::from("Missing or invalid Access Token!"));
        assert_eq!(response.message, "token expired at 10:00");
    }

    #[test]
    fn test_authorization() {
        let response = translate(&CaughtError::authorization("no"), quiet(), &TracingSink);
        assert_eq!(response.status_code, 403);
        assert_eq!(
            response.errors,
            ErrorPayload::from("You have no access to this resource!")
        );
    }

    #[test]
    fn test_method_not_allowed_overrides_http_status() {
        let caught = CaughtError::method_not_allowed("").with_status(405);
        let response = translate(&caught, quiet(), &TracingSink);
        assert_eq!(response.status_code, 405);
        assert_eq!(response.errors, ErrorPayload::from("405 Method Not Allowed."));
    }

    #[test]
    fn test_debug_mode_exposes_type_name() {
        let flags = DebugFlags::new(true, false);
        let response = translate(&CaughtError::authorization("no"), flags, &TracingSink);
        assert_eq!(response.exception.as_deref(), Some("AuthorizationException"));
        assert!(response.trace.is_none());
    }

    #[test]
    fn test_api_debug_adds_trace_and_logs_once() {
        let sink = RecordingSink::default();
        let caught = CaughtError::generic("boom").with_frame(Frame::new("handle"));

        let response = translate(&caught, DebugFlags::new(false, true), &sink);

        assert_eq!(response.trace.as_deref(), Some(r#"[{"function":"handle"}]"#));
        assert!(response.exception.is_none());
        assert_eq!(*sink.records.lock().unwrap(), vec!["boom".to_string()]);
    }

    #[test]
    fn test_no_log_without_api_debug() {
        let sink = RecordingSink::default();
        translate(&CaughtError::generic("boom"), DebugFlags::new(true, false), &sink);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[test]
    fn test_trace_is_non_empty_without_frames() {
        let response = translate(
            &CaughtError::generic("boom"),
            DebugFlags::new(false, true),
            &RecordingSink::default(),
        );
        assert_eq!(response.trace.as_deref(), Some("[]"));
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let caught = CaughtError::authorization("no");
        let response = translate(&caught, DebugFlags::new(true, true), &BrokenSink);
        assert_eq!(response.status_code, 403);
        assert!(response.trace.is_some());
    }

    #[test]
    fn test_translate_is_idempotent() {
        let sink = Arc::new(RecordingSink::default());
        let translator = ResponseTranslator::with_sink(DebugFlags::new(true, true), sink.clone());
        let caught = CaughtError::validation(
            "invalid",
            ValidationErrors::new().with("name", "required"),
        )
        .with_frame(Frame::new("store").at("cars.rs", 3));

        let first = serde_json::to_vec(&translator.translate(&caught)).unwrap();
        let second = serde_json::to_vec(&translator.translate(&caught)).unwrap();

        assert_eq!(first, second);
        assert_eq!(sink.records.lock().unwrap().len(), 2);
    }
}
