//! Scaffolding of route declaration files from stub templates

pub mod prompt;
pub mod route;
pub mod stub;

pub use prompt::{ConsolePrompt, NonInteractive, Prompt};
pub use route::{DocType, RouteGenerator, RouteInputs, RouteSpec};
pub use stub::Stub;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("missing value for '{0}'")]
    MissingInput(&'static str),

    #[error("invalid value '{value}' for '{option}', expected one of: {}", .choices.join(", "))]
    InvalidChoice {
        option: &'static str,
        value: String,
        choices: Vec<String>,
    },

    #[error("endpoint version must be a positive integer, got '{0}'")]
    InvalidVersion(String),

    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read answer: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
