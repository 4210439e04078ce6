use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use super::prompt::Prompt;
use super::stub::Stub;
use super::{GeneratorError, Result};

pub const DEFAULT_VERSION: &str = "1";

/// Documentation visibility of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocType {
    #[default]
    Private,
    Public,
}

impl DocType {
    pub const CHOICES: [&'static str; 2] = ["private", "public"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = GeneratorError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            _ => Err(GeneratorError::InvalidChoice {
                option: "doctype",
                value: value.to_string(),
                choices: Self::CHOICES.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

/// Raw answers; anything left `None` is asked for
#[derive(Debug, Clone, Default)]
pub struct RouteInputs {
    pub container: Option<String>,
    pub file: Option<String>,
    pub operation: Option<String>,
    pub doctype: Option<String>,
    pub docversion: Option<String>,
    pub url: Option<String>,
    pub verb: Option<String>,
}

impl RouteInputs {
    /// Fill the gaps through `prompt` and normalize every value
    pub fn resolve(self, prompt: &mut dyn Prompt) -> Result<RouteSpec> {
        let container = required(self.container, "container", || {
            prompt.ask("Enter the name of the Container", None)
        })?;

        let version = match self.docversion {
            Some(version) => version,
            None => prompt.ask("Enter the endpoint version (integer)", Some(DEFAULT_VERSION))?,
        };
        let version = parse_version(&version)?;

        let doctype = match self.doctype {
            Some(doctype) => doctype,
            None => prompt.choice("Select the type for this endpoint", &DocType::CHOICES, 0)?,
        };
        let doctype = doctype.parse::<DocType>()?;

        let operation = required(self.operation, "operation", || {
            prompt.ask(
                "Enter the name of the controller function that needs to be invoked when calling this endpoint",
                None,
            )
        })?;

        let verb = required(self.verb, "verb", || {
            prompt.ask("Enter the HTTP verb of this endpoint (GET, POST,...)", None)
        })?
        .to_uppercase();

        let url = required(self.url, "url", || {
            prompt.ask("Enter the endpoint URI (foo/bar)", None)
        })?
        .to_lowercase()
        .trim_start_matches('/')
        .to_string();

        let file = match self.file {
            Some(file) => file,
            None => prompt.ask("Enter the name of the Route file", Some(&operation))?,
        };

        Ok(RouteSpec {
            container,
            endpoint_name: file,
            operation,
            doctype,
            version,
            url,
            verb,
        })
    }
}

/// Ask when absent; reject blank answers
fn required(
    value: Option<String>,
    name: &'static str,
    ask: impl FnOnce() -> Result<String>,
) -> Result<String> {
    let value = match value {
        Some(value) => value,
        None => ask()?,
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(GeneratorError::MissingInput(name));
    }
    Ok(value)
}

fn parse_version(version: &str) -> Result<String> {
    let trimmed = version.trim().trim_start_matches(['v', 'V']);
    match trimmed.parse::<u32>() {
        Ok(number) if number > 0 => Ok(number.to_string()),
        _ => Err(GeneratorError::InvalidVersion(version.to_string())),
    }
}

/// Fully resolved route scaffold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub container: String,
    pub endpoint_name: String,
    pub operation: String,
    pub doctype: DocType,
    /// Bare number, without the `v` prefix
    pub version: String,
    /// Lower-cased, without leading slashes
    pub url: String,
    /// Upper-cased
    pub verb: String,
}

impl RouteSpec {
    /// `<container>/UI/API/Routes/<endpoint>.v<version>.<doctype>`
    pub fn stem(&self) -> PathBuf {
        Path::new(&self.container)
            .join("UI")
            .join("API")
            .join("Routes")
            .join(format!(
                "{}.v{}.{}",
                self.endpoint_name.to_lowercase(),
                self.version,
                self.doctype
            ))
    }

    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path = self.stem().into_os_string();
        path.push(".");
        path.push(extension);
        path.into()
    }

    /// Values for the stub placeholders
    pub fn stub_parameters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("container-name", self.container.clone()),
            ("operation", self.operation.clone()),
            ("endpoint-url", self.url.clone()),
            (
                "versioned-endpoint-url",
                format!("/v{}/{}", self.version, self.url),
            ),
            ("endpoint-version", self.version.clone()),
            ("http-verb", self.verb.to_lowercase()),
            ("doc-http-verb", self.verb.to_uppercase()),
        ]
    }
}

/// Writes route files under a containers root
#[derive(Debug, Clone)]
pub struct RouteGenerator {
    containers_root: PathBuf,
    stub: Stub,
    extension: String,
}

impl RouteGenerator {
    pub fn new(containers_root: impl Into<PathBuf>) -> Self {
        Self {
            containers_root: containers_root.into(),
            stub: Stub::route(),
            extension: "php".to_string(),
        }
    }

    pub fn with_stub(mut self, stub: Stub) -> Self {
        self.stub = stub;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn target_path(&self, spec: &RouteSpec) -> PathBuf {
        self.containers_root
            .join(spec.relative_path(&self.extension))
    }

    pub fn render(&self, spec: &RouteSpec) -> String {
        let parameters = spec.stub_parameters();
        self.stub
            .render(parameters.iter().map(|(name, value)| (*name, value.as_str())))
    }

    /// Render the stub and write it; existing files are never overwritten
    pub fn generate(&self, spec: &RouteSpec) -> Result<PathBuf> {
        let path = self.target_path(spec);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // create_new fails atomically when the file is already there
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(source) if source.kind() == io::ErrorKind::AlreadyExists => {
                return Err(GeneratorError::AlreadyExists(path));
            }
            Err(source) => return Err(GeneratorError::Io { path, source }),
        };
        file.write_all(self.render(spec).as_bytes())
            .map_err(|source| GeneratorError::Io {
                path: path.clone(),
                source,
            })?;

        info!(
            container = %spec.container,
            operation = %spec.operation,
            path = %path.display(),
            "Route generated"
        );

        Ok(path)
    }
}
