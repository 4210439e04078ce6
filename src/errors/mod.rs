//! Structured error handling for API responses

pub mod caught;
pub mod handler;
pub mod kind;
pub mod report;
pub mod response;
pub mod translator;

pub use caught::{CaughtError, Frame, ValidationErrors};
pub use handler::{expects_json, ExceptionsHandler};
pub use kind::ErrorKind;
pub use report::{Reporter, TracingReporter};
pub use response::{ErrorPayload, ErrorResponse, UnauthenticatedBody};
pub use translator::{translate, DebugFlags, ErrorSink, ResponseTranslator, SinkError, TracingSink};
