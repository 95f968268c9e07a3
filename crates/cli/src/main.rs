mod commands;
mod exit_code;
mod progress;

use clap::{Parser, Subcommand};
use commands::generate::GenerateArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gqlgen")]
#[command(about = "Generate Go types from GraphQL introspection schemas", long_about = None)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to gqlgen config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go types from an introspection schema
    ///
    /// The schema is read from --schema, fetched from --url, or taken from
    /// the config file. Output goes to --output, the config's output, or stdout.
    Generate(GenerateArgs),

    /// Schema-related commands (download, types)
    Schema {
        #[command(subcommand)]
        command: commands::schema::SchemaCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::run(cli.config, args, output_opts).await,
        Commands::Schema { command } => {
            commands::schema::run(cli.config, command, output_opts).await
        }
    }
}

/// Logs go to stderr so generated code on stdout stays clean.
/// Filtered by `RUST_LOG`; silent by default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Colour choice from the `--color`/`--no-color` flags and the `NO_COLOR`,
/// `CLICOLOR_FORCE` and `CLICOLOR` conventions, in that order of precedence.
///
/// `None` leaves the decision to the terminal check in `colored`.
/// See <https://no-color.org/> and <https://bixense.com/clicolors/>.
fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if force_color || no_color {
        return Some(force_color);
    }
    if env("NO_COLOR").is_some() {
        return Some(false);
    }
    match env("CLICOLOR_FORCE") {
        Some(force) => (!force.is_empty() && force != "0").then_some(true),
        None => env("CLICOLOR").filter(|value| value == "0").map(|_| false),
    }
}

fn configure_colors(force_color: bool, no_color: bool) {
    let env = |name: &str| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned());
    if let Some(enabled) = color_override(force_color, no_color, env) {
        colored::control::set_override(enabled);
    }
}

#[cfg(test)]
mod cli_tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "gqlgen",
            "--quiet",
            "generate",
            "--url",
            "https://example.com/graphql",
            "-H",
            "Authorization: Bearer t",
            "--package",
            "models",
            "-o",
            "types.go",
        ])
        .unwrap();

        assert!(cli.quiet);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.url.as_deref(), Some("https://example.com/graphql"));
        assert_eq!(args.headers, vec!["Authorization: Bearer t".to_string()]);
        assert_eq!(args.package.as_deref(), Some("models"));
    }

    #[test]
    fn schema_and_url_conflict() {
        let result = Cli::try_parse_from([
            "gqlgen",
            "generate",
            "--schema",
            "schema.json",
            "--url",
            "https://example.com/graphql",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["gqlgen", "schema", "types", "-c", "gqlgen.config.yml"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("gqlgen.config.yml")));
    }
}
