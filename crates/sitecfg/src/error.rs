//! CLI error types.

use sitecfg_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("resolved configurations differ ({0} changed lines)")]
    Drift(usize),
}
