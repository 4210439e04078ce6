use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Errors payload used when no category override applies
pub const DEFAULT_MESSAGE: &str = "Oops something went wrong.";

/// Status code used when the error carries no HTTP status
pub const DEFAULT_STATUS: u16 = 400;

/// Categories of errors that reach the top-level handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Request input failed validation
    Validation,

    /// Missing or invalid credentials
    Authentication,

    /// Authenticated, but not allowed to touch the resource
    Authorization,

    /// Route exists but not for the request method
    MethodNotAllowed,

    /// Error that carries its own HTTP status
    Http,

    /// Anything else
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl ErrorKind {
    /// Overrides applied after the defaults, in this exact order.
    /// A later matching rule wins.
    pub const OVERRIDE_ORDER: [ErrorKind; 4] = [
        Self::Validation,
        Self::Authentication,
        Self::Authorization,
        Self::MethodNotAllowed,
    ];

    /// Concrete type name reported under debug mode
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Validation => "ValidationException",
            Self::Authentication => "AuthenticationException",
            Self::Authorization => "AuthorizationException",
            Self::MethodNotAllowed => "MethodNotAllowedHttpException",
            Self::Http => "HttpException",
            Self::Generic => "Exception",
        }
    }

    /// Status forced by the category, if any
    pub fn override_status(&self) -> Option<u16> {
        match self {
            Self::Validation => Some(422),
            Self::Authentication => Some(401),
            Self::Authorization => Some(403),
            Self::MethodNotAllowed => Some(405),
            Self::Http | Self::Generic => None,
        }
    }

    /// Fixed `errors` text forced by the category. Validation uses the
    /// field map instead and returns `None` here.
    pub fn override_text(&self) -> Option<&'static str> {
        match self {
            Self::Authentication => Some("Missing or invalid Access Token!"),
            Self::Authorization => Some("You have no access to this resource!"),
            Self::MethodNotAllowed => Some("405 Method Not Allowed."),
            Self::Validation | Self::Http | Self::Generic => None,
        }
    }
}
