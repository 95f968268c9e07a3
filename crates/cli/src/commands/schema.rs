//! Schema-related CLI commands.

use super::{fail, read_schema_file, ConfigContext, IntrospectionSettings};
use crate::exit_code::ExitCode;
use crate::OutputOptions;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use graphql_introspect::{referenced_types, TypeRef};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

/// Output format for `schema types`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TypesFormat {
    /// One `Name: KIND` line per type
    #[default]
    Human,
    /// JSON object keyed by type name
    Json,
}

/// Schema subcommands.
#[derive(Debug, Subcommand)]
pub enum SchemaCommands {
    /// Download the introspection JSON of a remote GraphQL endpoint
    ///
    /// The endpoint can be given as a URL argument or read from the
    /// `schema.url` entry of the config file.
    Download {
        /// GraphQL endpoint URL to introspect (optional if the config has one)
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTTP headers to include in the request (can be specified multiple times)
        /// Format: "Header-Name: Header-Value"
        /// These are merged with headers from the config file (CLI takes precedence)
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,

        /// Request timeout in seconds (overrides config file)
        #[arg(long)]
        timeout: Option<u64>,

        /// Number of retry attempts on failure (overrides config file)
        #[arg(long)]
        retry: Option<u32>,
    },

    /// List the types referenced by fields of a saved introspection schema
    Types {
        /// Introspection JSON file (defaults to the config's schema path)
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: TypesFormat,
    },
}

/// Run a schema subcommand.
pub async fn run(
    config_path: Option<PathBuf>,
    command: SchemaCommands,
    output_opts: OutputOptions,
) -> Result<()> {
    match command {
        SchemaCommands::Download {
            url,
            output,
            headers,
            timeout,
            retry,
        } => {
            run_download(
                config_path,
                url,
                output,
                &headers,
                timeout,
                retry,
                output_opts,
            )
            .await
        }
        SchemaCommands::Types { schema, format } => run_types(config_path, schema, format),
    }
}

fn resolve_download(
    url: Option<String>,
    ctx: Option<&ConfigContext>,
    headers: &[String],
    timeout: Option<u64>,
    retry: Option<u32>,
) -> Result<IntrospectionSettings> {
    let config = ctx.and_then(|ctx| ctx.config.schema.introspection_config());
    IntrospectionSettings::resolve(url, config, headers, timeout, retry)
}

#[tracing::instrument(skip(config_path, cli_headers, output_opts))]
async fn run_download(
    config_path: Option<PathBuf>,
    url: Option<String>,
    output: Option<PathBuf>,
    cli_headers: &[String],
    cli_timeout: Option<u64>,
    cli_retry: Option<u32>,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    // A config file only matters when no URL was given
    let ctx = if url.is_none() {
        ConfigContext::discover(config_path).unwrap_or_else(|e| fail(ExitCode::ConfigError, &e))
    } else {
        None
    };
    let settings = resolve_download(url, ctx.as_ref(), cli_headers, cli_timeout, cli_retry)
        .unwrap_or_else(|e| fail(ExitCode::ConfigError, &e));

    // Don't show spinner when writing to stdout
    let spinner =
        crate::progress::fetch_spinner(&settings.url, output.is_some() && output_opts.show_progress);

    let response = settings.client().execute_raw(&settings.url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let response = response
        .with_context(|| format!("Failed to fetch schema from {}", settings.url))
        .unwrap_or_else(|e| fail(ExitCode::SchemaError, &e));
    let mut content = serde_json::to_string_pretty(&response)
        .context("Failed to serialize introspection response")?;
    content.push('\n');

    if let Some(path) = output {
        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write to {}", path.display()))
            .unwrap_or_else(|e| fail(ExitCode::IoError, &e));

        if output_opts.show_info {
            let duration = start_time.elapsed();
            println!(
                "{} Schema downloaded to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
            println!("  {} {:.2}s", "⏱".dimmed(), duration.as_secs_f64());
        }
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn run_types(
    config_path: Option<PathBuf>,
    schema: Option<PathBuf>,
    format: TypesFormat,
) -> Result<()> {
    let path = match schema {
        Some(path) => path,
        None => {
            let ctx = ConfigContext::discover(config_path)
                .unwrap_or_else(|e| fail(ExitCode::ConfigError, &e))
                .context("No schema file. Use --schema <FILE> or create a .gqlgenrc.yml")
                .unwrap_or_else(|e| fail(ExitCode::ConfigError, &e));
            ctx.config
                .schema
                .file_path(&ctx.base_dir)
                .context("The config's schema is a URL; download it first with `gqlgen schema download`")
                .unwrap_or_else(|e| fail(ExitCode::ConfigError, &e))
        }
    };

    let schema = read_schema_file(&path).unwrap_or_else(|(code, e)| fail(code, &e));
    let referenced = referenced_types(&schema);
    tracing::debug!(count = referenced.len(), "Collected referenced types");

    let content = format_types(&referenced, format)?;
    print!("{content}");
    Ok(())
}

fn format_types(referenced: &BTreeMap<String, TypeRef>, format: TypesFormat) -> Result<String> {
    match format {
        TypesFormat::Human => Ok(referenced
            .iter()
            .map(|(name, type_ref)| format!("{name}: {}\n", type_ref.kind))
            .collect()),
        TypesFormat::Json => {
            let mut json = serde_json::to_string_pretty(referenced)
                .context("Failed to serialize referenced types")?;
            json.push('\n');
            Ok(json)
        }
    }
}
