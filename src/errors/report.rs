use std::collections::HashSet;
use tracing::warn;

use super::caught::CaughtError;
use super::kind::ErrorKind;

/// Forwards errors to an error-tracking destination before they are rendered.
///
/// Reporting never influences the response; implementations must not panic.
pub trait Reporter: Send + Sync {
    fn report(&self, error: &CaughtError);
}

/// Reports through `tracing`, skipping kinds listed in `dont_report`
#[derive(Debug, Clone, Default)]
pub struct TracingReporter {
    dont_report: HashSet<ErrorKind>,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dont_report(mut self, kind: ErrorKind) -> Self {
        self.dont_report.insert(kind);
        self
    }

    pub fn should_report(&self, error: &CaughtError) -> bool {
        !self.dont_report.contains(&error.kind())
    }
}

impl Reporter for TracingReporter {
    fn report(&self, error: &CaughtError) {
        if !self.should_report(error) {
            return;
        }

        warn!(
            kind = %error.kind(),
            status = ?error.status_code_if_known(),
            "Unhandled error: {}",
            error.message()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_reported_by_default() {
        let reporter = TracingReporter::new();
        assert!(reporter.should_report(&CaughtError::generic("boom")));
        assert!(reporter.should_report(&CaughtError::authentication("who")));
    }

    #[test]
    fn test_dont_report_list() {
        let reporter = TracingReporter::new()
            .dont_report(ErrorKind::Validation)
            .dont_report(ErrorKind::Authentication);

        assert!(!reporter.should_report(&CaughtError::authentication("who")));
        assert!(reporter.should_report(&CaughtError::http(500, "down")));
    }
}
