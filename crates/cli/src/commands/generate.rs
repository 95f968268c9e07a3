//! `gqlgen generate`: introspection schema to Go types.

use super::{fail, read_schema_file, ConfigContext, Failure, IntrospectionSettings};
use crate::exit_code::ExitCode;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_codegen::Generator;
use graphql_config::{is_valid_package_name, SchemaConfig};
use graphql_introspect::IntrospectionSchema;
use std::io::Write;
use std::path::PathBuf;

/// Flags of the `generate` subcommand.
#[derive(Debug, Default, clap::Args)]
pub struct GenerateArgs {
    /// Saved introspection JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "url")]
    pub schema: Option<PathBuf>,

    /// GraphQL endpoint to introspect
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// HTTP headers to include in the request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (overrides config file)
    #[arg(long)]
    pub retry: Option<u32>,

    /// Go package name for the generated file
    #[arg(long)]
    pub package: Option<String>,

    /// Output file path (writes to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep introspection meta-types (`__Type`, `__Schema`, ...)
    #[arg(long)]
    pub include_introspection_types: bool,
}

/// Where the schema is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SchemaSource {
    File(PathBuf),
    Remote(IntrospectionSettings),
}

/// Everything `generate` needs once flags and config are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GeneratePlan {
    source: SchemaSource,
    output: Option<PathBuf>,
    package: Option<String>,
    include_introspection_types: bool,
}

/// Merges flags over the config file. Flags win; the config file fills the rest.
fn resolve_plan(args: GenerateArgs, ctx: Option<&ConfigContext>) -> Result<GeneratePlan> {
    let config = ctx.map(|ctx| &ctx.config);

    let source = if let Some(path) = args.schema {
        SchemaSource::File(path)
    } else if args.url.is_some() {
        SchemaSource::Remote(IntrospectionSettings::resolve(
            args.url,
            None,
            &args.headers,
            args.timeout,
            args.retry,
        )?)
    } else {
        match ctx {
            Some(ctx) => match &ctx.config.schema {
                SchemaConfig::Path(_) => SchemaSource::File(
                    ctx.config
                        .schema
                        .file_path(&ctx.base_dir)
                        .context("Schema path missing from config")?,
                ),
                SchemaConfig::Introspection(introspection) => {
                    SchemaSource::Remote(IntrospectionSettings::resolve(
                        None,
                        Some(introspection),
                        &args.headers,
                        args.timeout,
                        args.retry,
                    )?)
                }
            },
            None => anyhow::bail!(
                "No schema source. Use --schema <FILE>, --url <URL>, or create a .gqlgenrc.yml"
            ),
        }
    };

    let package = args.package.or_else(|| config.and_then(|c| c.package.clone()));
    if let Some(package) = &package {
        if !is_valid_package_name(package) {
            anyhow::bail!("'{package}' is not a valid Go package name");
        }
    }

    let output = args
        .output
        .or_else(|| ctx.and_then(|ctx| ctx.config.output_path(&ctx.base_dir)));

    Ok(GeneratePlan {
        source,
        output,
        package,
        include_introspection_types: args.include_introspection_types
            || config.is_some_and(|c| c.include_introspection_types),
    })
}

async fn load_schema(
    source: &SchemaSource,
    show_progress: bool,
) -> std::result::Result<IntrospectionSchema, Failure> {
    match source {
        SchemaSource::File(path) => read_schema_file(path),
        SchemaSource::Remote(settings) => {
            let spinner = crate::progress::fetch_spinner(&settings.url, show_progress);

            let result = settings.client().execute(&settings.url).await;

            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            result.map(|response| response.data.schema).map_err(|e| {
                (
                    ExitCode::SchemaError,
                    anyhow::Error::new(e)
                        .context(format!("Failed to fetch schema from {}", settings.url)),
                )
            })
        }
    }
}

fn generate_code(plan: &GeneratePlan, schema: &IntrospectionSchema) -> Result<String> {
    let mut generator =
        Generator::new().include_introspection_types(plan.include_introspection_types);
    if let Some(package) = &plan.package {
        generator = generator.with_package(package);
    }
    generator
        .generate(schema)
        .context("Failed to generate Go types")
}

fn write_output(path: &std::path::Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, code).with_context(|| format!("Failed to write to {}", path.display()))
}

/// Run the `generate` subcommand.
#[tracing::instrument(skip_all)]
pub async fn run(
    config_path: Option<PathBuf>,
    args: GenerateArgs,
    output_opts: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();

    let ctx = ConfigContext::discover(config_path).unwrap_or_else(|e| fail(ExitCode::ConfigError, &e));
    let plan = resolve_plan(args, ctx.as_ref()).unwrap_or_else(|e| fail(ExitCode::ConfigError, &e));
    tracing::debug!(?plan, "Resolved generate settings");

    let show_progress = output_opts.show_progress && plan.output.is_some();
    let schema = load_schema(&plan.source, show_progress)
        .await
        .unwrap_or_else(|(code, e)| fail(code, &e));

    let code =
        generate_code(&plan, &schema).unwrap_or_else(|e| fail(ExitCode::GenerationError, &e));

    if let Some(path) = &plan.output {
        write_output(path, &code).unwrap_or_else(|e| fail(ExitCode::IoError, &e));

        if output_opts.show_info {
            let duration = start_time.elapsed();
            println!(
                "{} Go types written to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
            println!("  {} {:.2}s", "⏱".dimmed(), duration.as_secs_f64());
        }
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(code.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}
