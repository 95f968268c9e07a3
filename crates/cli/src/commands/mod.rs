//! Subcommands and the settings they share.

pub mod generate;
pub mod schema;

use crate::exit_code::ExitCode;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_config::{find_config, load_config, GqlgenConfig, IntrospectionSchemaConfig};
use graphql_introspect::{parse_introspection, IntrospectionClient, IntrospectionSchema};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout in seconds for introspection requests.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default number of retries for introspection requests.
pub const DEFAULT_RETRY: u32 = 5;

/// An error paired with the exit code it should end the process with.
pub type Failure = (ExitCode, anyhow::Error);

/// Prints the error chain and exits with `code`.
pub fn fail(code: ExitCode, err: &anyhow::Error) -> ! {
    tracing::error!(%code, error = %format!("{err:#}"), "Command failed");
    eprintln!("{} {}", "✗".red().bold(), format!("{err:#}").red());
    code.exit()
}

/// A loaded config file and the directory its relative paths resolve against.
#[derive(Debug)]
pub struct ConfigContext {
    pub config: GqlgenConfig,
    pub base_dir: PathBuf,
}

impl ConfigContext {
    /// Loads `config_path` if given, otherwise the first config file found
    /// walking up from the current directory. `Ok(None)` when there is none.
    pub fn discover(config_path: Option<PathBuf>) -> Result<Option<Self>> {
        let path = match config_path {
            Some(path) => path,
            None => {
                let current_dir =
                    std::env::current_dir().context("Failed to read current directory")?;
                match find_config(&current_dir).context("Failed to search for config")? {
                    Some(path) => path,
                    None => return Ok(None),
                }
            }
        };

        Self::load(&path).map(Some)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config = load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        let base_dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self { config, base_dir })
    }
}

/// Resolved introspection settings from config file and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectionSettings {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: u64,
    pub retry: u32,
}

impl IntrospectionSettings {
    /// Merges CLI flags over a config entry. CLI headers replace config
    /// headers with the same name (case-insensitive).
    pub fn resolve(
        url: Option<String>,
        config: Option<&IntrospectionSchemaConfig>,
        cli_headers: &[String],
        cli_timeout: Option<u64>,
        cli_retry: Option<u32>,
    ) -> Result<Self> {
        let cli_parsed = cli_headers
            .iter()
            .map(|h| parse_header(h))
            .collect::<Result<Vec<_>>>()
            .context("Failed to parse headers")?;

        let (url, mut headers, timeout, retry) = match (url, config) {
            // An explicit URL ignores the config entry entirely
            (Some(url), _) => (url, Vec::new(), None, None),
            (None, Some(config)) => (
                config.url.clone(),
                config
                    .headers
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
                config.timeout,
                config.retry,
            ),
            (None, None) => anyhow::bail!(
                "No introspection endpoint configured.\n\n\
                Pass a URL or add to your config:\n  \
                schema:\n    url: https://example.com/graphql"
            ),
        };

        for (name, value) in cli_parsed {
            headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        Ok(Self {
            url,
            headers,
            timeout: cli_timeout.or(timeout).unwrap_or(DEFAULT_TIMEOUT),
            retry: cli_retry.or(retry).unwrap_or(DEFAULT_RETRY),
        })
    }

    #[must_use]
    pub fn client(&self) -> IntrospectionClient {
        IntrospectionClient::new()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retries(self.retry)
            .with_headers(self.headers.iter().cloned())
    }
}

/// Parses a header string in "Name: Value" format.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Reads and decodes a saved introspection JSON file.
///
/// Errors carry the exit code matching the failure: unreadable files are
/// I/O errors, undecodable contents are parse errors.
pub fn read_schema_file(path: &Path) -> std::result::Result<IntrospectionSchema, Failure> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        (
            ExitCode::IoError,
            anyhow::Error::new(e).context(format!("Failed to read schema {}", path.display())),
        )
    })?;

    let response = parse_introspection(&contents).map_err(|e| {
        (
            ExitCode::ParseError,
            anyhow::Error::new(e).context(format!("Failed to parse schema {}", path.display())),
        )
    })?;

    Ok(response.data.schema)
}
