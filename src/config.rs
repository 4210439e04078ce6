use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;

use crate::errors::DebugFlags;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `APP_DEBUG`: expose error type names in responses
    pub debug: bool,
    /// `API_DEBUG`: expose stack traces and log translated errors
    pub api_debug: bool,
    /// Where unauthenticated non-JSON clients are redirected
    pub login_path: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub containers_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                debug: bool_var("APP_DEBUG")?,
                api_debug: bool_var("API_DEBUG")?,
                login_path: parse_login_path(
                    &env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
                )
                .context("LOGIN_PATH must be an absolute route path")?,
            },
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
            },
            generator: GeneratorConfig {
                containers_path: env::var("CONTAINERS_PATH")
                    .unwrap_or_else(|_| "app/Containers".to_string())
                    .into(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Flag snapshot handed to the response translator
    pub fn debug_flags(&self) -> DebugFlags {
        DebugFlags::new(self.app.debug, self.app.api_debug)
    }
}

/// Unset means false
fn bool_var(name: &str) -> Result<bool> {
    match env::var(name) {
        Ok(value) => parse_bool(&value).with_context(|| format!("{} must be a boolean", name)),
        Err(_) => Ok(false),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("unrecognized boolean value '{}'", other)),
    }
}

/// Route paths must start with `/`
fn parse_login_path(value: &str) -> Result<String> {
    let path = value.trim();
    if !path.starts_with('/') {
        return Err(anyhow!("'{}' does not start with '/'", path));
    }
    Ok(path.to_string())
}
