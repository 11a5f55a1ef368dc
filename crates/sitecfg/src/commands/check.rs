//! `sitecfg check` command implementation.

use clap::Args;
use sitecfg_config::{NavigationNode, SearchProvider, resolve};

use super::settings::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    /// Execute the check command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let input =
            sitecfg_config::load_input(&self.config.configs, Some(&self.config.cli_settings()))?;
        let config = resolve(&input)?;

        output.highlight(config.title());
        output.info(&format!("Site: {}", config.location().site()));
        output.info(&format!("Base: {}", config.location().base()));

        let nodes: usize = config
            .navigation()
            .iter()
            .map(NavigationNode::node_count)
            .sum();
        output.info(&format!(
            "Sidebar: {} top-level entries, {nodes} nodes",
            config.navigation().len()
        ));
        if input.navigation.is_none() {
            output.warning("No sidebar configured, using an autogenerated \"Guide\" group");
        }

        output.info(&format!("Social links: {}", config.social().len()));
        match config.search().provider {
            SearchProvider::None => output.info("Search: disabled"),
            provider => output.info(&format!("Search: {}", provider.as_str())),
        }
        if !config.theme_overrides().is_empty() {
            output.info(&format!(
                "Stylesheets: {}",
                config.theme_overrides().join(", ")
            ));
        }
        if let Some(theme) = &config.markdown().code_theme {
            output.info(&format!("Code theme: {theme}"));
        }

        output.success("Configuration is valid");
        Ok(())
    }
}
