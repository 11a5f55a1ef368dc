//! Configuration flags shared by every command.

use std::path::PathBuf;

use clap::Args;
use sitecfg_config::{CliSettings, SearchProvider};

/// Where to load configuration from, and which values to override.
#[derive(Args, Debug, Default)]
pub(crate) struct ConfigArgs {
    /// Configuration fragment; repeat to layer files, later ones win
    /// (default: auto-discover sitecfg.toml).
    #[arg(short, long = "config")]
    pub configs: Vec<PathBuf>,

    /// Repository owner (overrides config).
    #[arg(long, env = "SITECFG_OWNER")]
    owner: Option<String>,

    /// Repository name (overrides config).
    #[arg(long = "repo", env = "SITECFG_REPO")]
    repo_name: Option<String>,

    /// Site title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Site description (overrides config).
    #[arg(long)]
    description: Option<String>,

    /// Search provider: none, pagefind or other (overrides config).
    #[arg(long)]
    search: Option<SearchProvider>,
}

impl ConfigArgs {
    /// Build CLI settings from args.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            owner: self.owner.clone(),
            repo_name: self.repo_name.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            search: self.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    #[test]
    fn test_repeated_config_flags_keep_order() {
        let cli = TestCli::parse_from(["sitecfg", "-c", "base.toml", "--config", "starlight.toml"]);
        assert_eq!(
            cli.config.configs,
            vec![PathBuf::from("base.toml"), PathBuf::from("starlight.toml")]
        );
    }

    #[test]
    fn test_overrides_become_cli_settings() {
        let cli = TestCli::parse_from([
            "sitecfg",
            "--owner",
            "elwizard33",
            "--repo",
            "Cyberzard",
            "--search",
            "pagefind",
        ]);
        let settings = cli.config.cli_settings();
        assert_eq!(settings.owner.as_deref(), Some("elwizard33"));
        assert_eq!(settings.repo_name.as_deref(), Some("Cyberzard"));
        assert_eq!(settings.search, Some(SearchProvider::Pagefind));
        assert_eq!(settings.title, None);
    }

    #[test]
    fn test_identity_falls_back_to_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITECFG_OWNER", "elwizard33");
            std::env::set_var("SITECFG_REPO", "Cyberpanel-Server-Wizard-Cleanup");
        }
        let cli = TestCli::parse_from(["sitecfg", "--repo", "Cyberzard"]);
        unsafe {
            std::env::remove_var("SITECFG_OWNER");
            std::env::remove_var("SITECFG_REPO");
        }

        let settings = cli.config.cli_settings();
        assert_eq!(settings.owner.as_deref(), Some("elwizard33"));
        assert_eq!(settings.repo_name.as_deref(), Some("Cyberzard"));
    }

    #[test]
    fn test_invalid_search_provider_rejected() {
        let result = TestCli::try_parse_from(["sitecfg", "--search", "algolia"]);
        assert!(result.is_err());
    }
}
