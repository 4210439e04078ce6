use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use super::caught::CaughtError;
use super::kind::ErrorKind;
use super::report::{Reporter, TracingReporter};
use super::response::UnauthenticatedBody;
use super::translator::ResponseTranslator;

/// Top-level handler for errors that escaped the request handlers.
///
/// Reports every error, then picks the rendering based on whether the
/// client accepts JSON.
#[derive(Clone)]
pub struct ExceptionsHandler {
    translator: ResponseTranslator,
    reporter: Arc<dyn Reporter>,
    login_path: String,
}

impl std::fmt::Debug for ExceptionsHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionsHandler")
            .field("translator", &self.translator)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

impl ExceptionsHandler {
    pub fn new(translator: ResponseTranslator, login_path: impl Into<String>) -> Self {
        Self {
            translator,
            reporter: Arc::new(TracingReporter::new()),
            login_path: login_path.into(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn translator(&self) -> &ResponseTranslator {
        &self.translator
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Report, then render
    pub fn handle(&self, expects_json: bool, error: &CaughtError) -> Response {
        self.reporter.report(error);
        self.render(expects_json, error)
    }

    /// JSON clients always get the translated body. Others are sent to the
    /// login page on authentication failures and get the plain rendering
    /// for everything else.
    pub fn render(&self, expects_json: bool, error: &CaughtError) -> Response {
        if expects_json {
            return self.translator.translate(error).into_response();
        }

        if error.kind() == ErrorKind::Authentication {
            return self.unauthenticated(false);
        }

        debug!(kind = %error.kind(), "Rendering error for non-JSON client");
        render_plain(error)
    }

    /// Framework default for authentication failures that bypass [`render`](Self::render)
    pub fn unauthenticated(&self, expects_json: bool) -> Response {
        if expects_json {
            return UnauthenticatedBody::default().into_response();
        }

        (StatusCode::FOUND, [(header::LOCATION, self.login_path.clone())]).into_response()
    }
}

/// Whether the client asked for a JSON answer: an AJAX (non-PJAX) request,
/// or an `Accept` header whose preferred type is JSON.
pub fn expects_json(headers: &HeaderMap) -> bool {
    let header_str = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let ajax = header_str("x-requested-with")
        .map(|v| v == "XMLHttpRequest")
        .unwrap_or(false);
    let pjax = header_str("x-pjax").is_some();
    if ajax && !pjax {
        return true;
    }

    header_str(header::ACCEPT.as_str())
        .and_then(|accept| acceptable_types(accept).into_iter().next())
        .map(|first| first.contains("/json") || first.contains("+json"))
        .unwrap_or(false)
}

/// Media ranges of an `Accept` header, most preferred first.
///
/// Ranges without a `q` parameter weigh 1.0; equal weights keep header order.
fn acceptable_types(accept: &str) -> Vec<&str> {
    let mut ranges: Vec<(&str, f32)> = accept
        .split(',')
        .filter_map(|range| {
            let mut parts = range.split(';').map(str::trim);
            let media = parts.next().filter(|media| !media.is_empty())?;
            let quality = parts
                .filter_map(|param| param.split_once('='))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
                .and_then(|(_, value)| value.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((media, quality))
        })
        .collect();

    // sort_by is stable
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranges.into_iter().map(|(media, _)| media).collect()
}

fn render_plain(error: &CaughtError) -> Response {
    let status = error
        .kind()
        .override_status()
        .or(error.status_code_if_known())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = status.canonical_reason().unwrap_or("Error").to_string();
    (status, body).into_response()
}
