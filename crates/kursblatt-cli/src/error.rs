use thiserror::Error;

use kursblatt_core::{ConfigError, PipelineError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Config(_) => 2,
            Self::Pipeline(PipelineError::Resolution(_)) => 3,
            Self::Pipeline(PipelineError::Fetch(_)) => 4,
            Self::Pipeline(PipelineError::Report { .. }) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use kursblatt_core::{FetchError, ResolutionError};

    use super::*;

    #[test]
    fn exit_codes_distinguish_failure_classes() {
        let validation = CliError::from(ValidationError::EmptyIdentifier);
        assert_eq!(validation.exit_code(), 2);

        let config = CliError::from(ConfigError::MissingApiKey);
        assert_eq!(config.exit_code(), 2);

        let resolution = CliError::from(PipelineError::Resolution(ResolutionError::NotFound {
            identifier: String::from("716460"),
        }));
        assert_eq!(resolution.exit_code(), 3);

        let fetch = CliError::from(PipelineError::Fetch(FetchError::Empty {
            ticker: String::from("SAP"),
        }));
        assert_eq!(fetch.exit_code(), 4);

        let io = CliError::from(PipelineError::Report {
            path: std::path::PathBuf::from("out/SAP.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing directory"),
        });
        assert_eq!(io.exit_code(), 10);
    }
}
