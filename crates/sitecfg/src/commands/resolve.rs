//! `sitecfg resolve` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::settings::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or validation fails, or the output file
    /// cannot be written. Nothing is written on failure.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        tracing::debug!(
            fragments = self.config.configs.len(),
            "Resolving site configuration"
        );

        let config =
            sitecfg_config::load(&self.config.configs, Some(&self.config.cli_settings()))?;
        let json = config.to_json()?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, format!("{json}\n"))?;
                output.success(&format!(
                    "Resolved {} to {}",
                    config.location().site(),
                    path.display()
                ));
            }
            None => output.document(&json)?,
        }

        Ok(())
    }
}
