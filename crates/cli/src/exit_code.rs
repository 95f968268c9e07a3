//! Exit codes for the gqlgen CLI.
//!
//! Distinct codes let scripts and CI systems tell a bad config apart from an
//! unreachable endpoint or a schema the generator cannot render.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no errors
    // Normal completion returns from `main` instead of calling `exit`
    #[allow(dead_code)]
    Success = 0,
    /// Configuration error (missing or invalid config file, bad flags)
    ConfigError = 2,
    /// Schema load error (introspection request failed)
    SchemaError = 3,
    /// I/O error (file read/write failure)
    IoError = 4,
    /// Parse error (malformed introspection JSON)
    ParseError = 5,
    /// The schema declares a type that cannot be rendered as Go
    GenerationError = 6,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
            Self::GenerationError => write!(f, "generation error"),
        }
    }
}
