use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{GeneratorError, Result};

const ROUTE_STUB: &str = include_str!("stubs/route.stub");

/// Text template with `{{name}}` placeholders.
///
/// `{{_name}}` receives the lower-cased value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    template: String,
}

impl Stub {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Built-in route declaration template
    pub fn route() -> Self {
        Self::new(ROUTE_STUB)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(template))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute every known placeholder in a single pass over the template.
    /// Substituted values are never scanned again. Unknown placeholders are
    /// left as is.
    pub fn render<'a, I>(&self, parameters: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let values: HashMap<&str, &str> = parameters.into_iter().collect();
        let lookup = |name: &str| -> Option<String> {
            if let Some(value) = values.get(name) {
                return Some(value.to_string());
            }
            name.strip_prefix('_')
                .and_then(|bare| values.get(bare))
                .map(|value| value.to_lowercase())
        };

        let mut text = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find("{{") {
            text.push_str(&rest[..start]);
            let inner = &rest[start + 2..];
            let value = inner
                .find("}}")
                .and_then(|end| lookup(&inner[..end]).map(|value| (value, end)));
            match value {
                Some((value, end)) => {
                    text.push_str(&value);
                    rest = &inner[end + 2..];
                }
                None => {
                    // Not a placeholder here; move past one brace and keep scanning
                    text.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }
        text.push_str(rest);
        text
    }
}
