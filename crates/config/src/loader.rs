use crate::{ConfigError, GqlgenConfig, Result, SchemaConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".gqlgenrc.yml",
    ".gqlgenrc.yaml",
    ".gqlgenrc.json",
    ".gqlgenrc.toml",
    ".gqlgenrc",
    "gqlgen.config.yml",
    "gqlgen.config.json",
];

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Find a gqlgen config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a gqlgen config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GqlgenConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        introspection = config.schema.is_introspection(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a gqlgen config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GqlgenConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        "" if file_name == ".gqlgenrc" => {
            tracing::trace!("Trying YAML then JSON for .gqlgenrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<GqlgenConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<GqlgenConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<GqlgenConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// Validate the loaded configuration
#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &GqlgenConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    match &config.schema {
        SchemaConfig::Path(schema_path) => {
            if schema_path.trim().is_empty() {
                return Err(invalid("Schema path is empty".to_string()));
            }
        }
        SchemaConfig::Introspection(introspection) => {
            let url = introspection.url.trim();
            if url.is_empty() {
                return Err(invalid("Schema URL is empty".to_string()));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(invalid(format!(
                    "Schema URL '{url}' must start with http:// or https://"
                )));
            }
        }
    }

    if let Some(package) = &config.package {
        if !is_valid_package_name(package) {
            return Err(invalid(format!(
                "Package '{package}' is not a valid Go package name"
            )));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

/// Whether `name` can be used in a Go `package` clause: an identifier that
/// is not a keyword.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !GO_KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml_path_schema() {
        let yaml = r#"
schema: "schema.json"
output: "models/types.go"
package: models
"#;
        let file = write_config(".yml", yaml);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.schema, SchemaConfig::Path("schema.json".to_string()));
        assert_eq!(config.output, Some(PathBuf::from("models/types.go")));
        assert_eq!(config.package.as_deref(), Some("models"));
    }

    #[test]
    fn test_load_yaml_introspection_schema() {
        let yaml = r"
schema:
  url: https://shop.example.com/api/graphql.json
  headers:
    X-Shopify-Access-Token: secret
  timeout: 45
  retry: 3
includeIntrospectionTypes: true
";
        let file = write_config(".yaml", yaml);

        let config = load_config(file.path()).unwrap();
        let introspection = config.schema.introspection_config().unwrap();
        assert_eq!(introspection.url, "https://shop.example.com/api/graphql.json");
        assert_eq!(introspection.headers["X-Shopify-Access-Token"], "secret");
        assert_eq!(introspection.timeout, Some(45));
        assert_eq!(introspection.retry, Some(3));
        assert!(config.include_introspection_types);
    }

    #[test]
    fn test_load_json() {
        let file = write_config(".json", r#"{"schema": "schema.json"}"#);
        let config = load_config(file.path()).unwrap();
        assert!(!config.schema.is_introspection());
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
package = "shop"

[schema]
url = "https://api.example.com/graphql"
retry = 1

[schema.headers]
Authorization = "Bearer token"
"#;
        let file = write_config(".toml", toml);

        let config = load_config(file.path()).unwrap();
        let introspection = config.schema.introspection_config().unwrap();
        assert_eq!(introspection.retry, Some(1));
        assert_eq!(introspection.headers["Authorization"], "Bearer token");
        assert_eq!(config.package.as_deref(), Some("shop"));
    }

    #[test]
    fn test_load_rc_without_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".gqlgenrc");
        fs::write(&path, r#"{"schema": "schema.json"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.schema, SchemaConfig::Path("schema.json".to_string()));
    }

    #[test]
    fn test_unsupported_format() {
        let file = write_config(".ini", "schema = schema.json");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_config(&temp_dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_empty_schema() {
        let file = write_config(".yml", "schema: \"\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref message, .. } if message.contains("empty")));
    }

    #[test]
    fn test_validation_url_scheme() {
        let file = write_config(".yml", "schema:\n  url: ftp://example.com/graphql\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref message, .. } if message.contains("ftp://")));
    }

    #[test]
    fn test_validation_package_name() {
        for package in ["my-models", "1models", "type", ""] {
            let json = format!(r#"{{"schema": "schema.json", "package": "{package}"}}"#);
            let file = write_config(".json", &json);
            assert!(
                load_config(file.path()).is_err(),
                "package {package:?} should be rejected"
            );
        }

        let file = write_config(".json", r#"{"schema": "schema.json", "package": "_models2"}"#);
        assert!(load_config(file.path()).is_ok());
    }

    #[test]
    fn test_is_valid_package_name() {
        assert!(is_valid_package_name("models"));
        assert!(is_valid_package_name("v2"));
        assert!(is_valid_package_name("modèles"));
        assert!(!is_valid_package_name("func"));
        assert!(!is_valid_package_name("shop.models"));
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let file = write_config(".yml", "schema: [unclosed\n");
        let err = load_config(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("YAML parse error"), "{message}");
        assert!(message.contains(&file.path().display().to_string()), "{message}");
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".gqlgenrc.yml");
        fs::write(&config_path, "schema: schema.json").unwrap();

        let sub_dir = temp_dir.path().join("internal").join("models");
        fs::create_dir_all(&sub_dir).unwrap();

        assert_eq!(find_config(temp_dir.path()).unwrap(), Some(config_path.clone()));
        assert_eq!(find_config(&sub_dir).unwrap(), Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(find_config(temp_dir.path()).unwrap(), None);
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".gqlgenrc.yml"), "schema: yml.json").unwrap();
        fs::write(
            temp_dir.path().join("gqlgen.config.json"),
            r#"{"schema": "json.json"}"#,
        )
        .unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".gqlgenrc.yml");
    }
}
