//! Site configuration resolution for sitecfg.
//!
//! Turns `sitecfg.toml` fragments into one validated [`ResolvedSiteConfig`]
//! for a documentation site published as a GitHub Pages project site, and
//! renders it as the document the site generator consumes.
//!
//! Loading is split from resolution:
//!
//! - [`load_input`] reads fragments (explicit paths, or `sitecfg.toml`
//!   auto-discovered in parent directories), expands environment variables
//!   and merges them with [`RawConfigInput::merge`]. [`CliSettings`] are
//!   applied last.
//! - [`resolve`] validates the merged input. It does no I/O.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.owner`
//! - `site.repo_name`
//! - `site.title`
//! - `site.description`
//! - social link URLs
//!
//! # Example
//!
//! ```
//! use sitecfg_config::{RawConfigInput, resolve};
//!
//! let config = resolve(&RawConfigInput::for_repo("elwizard33", "Cyberzard")).unwrap();
//! assert_eq!(config.location().site(), "https://elwizard33.github.io/Cyberzard");
//! assert_eq!(config.location().base(), "/Cyberzard/");
//! ```

mod expand;
mod identity;
mod navigation;
mod raw;
mod resolve;
mod social;
mod theme;
mod toolchain;

use std::path::{Path, PathBuf};

pub use identity::{SiteIdentity, SiteLocation};
pub use navigation::{AutogenerateDecl, NavigationDecl, NavigationNode, NavigationSection};
pub use raw::{RawConfigInput, SiteDecl};
pub use resolve::{ResolvedSiteConfig, resolve};
pub use social::{Platform, SocialDecl, SocialLink, SocialLinkDecl};
pub use theme::{
    MarkdownConfig, MarkdownDecl, SearchConfig, SearchDecl, SearchProvider, ThemeDecl,
};
pub use toolchain::ToolchainConfig;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "sitecfg.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override repository owner.
    pub owner: Option<String>,
    /// Override repository name.
    pub repo_name: Option<String>,
    /// Override site title.
    pub title: Option<String>,
    /// Override site description.
    pub description: Option<String>,
    /// Override search provider.
    pub search: Option<SearchProvider>,
}

impl CliSettings {
    /// Settings as a fragment, to be merged after every file.
    fn to_fragment(&self) -> RawConfigInput {
        RawConfigInput {
            site: SiteDecl {
                owner: self.owner.clone(),
                repo_name: self.repo_name.clone(),
                title: self.title.clone(),
                description: self.description.clone(),
            },
            search: SearchDecl {
                provider: self.search,
            },
            ..RawConfigInput::default()
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Owner or repository name is missing or not URL-safe.
    #[error("Invalid site identity: {field} {reason}")]
    InvalidIdentity {
        /// Config field path (`site.owner` or `site.repo_name`).
        field: &'static str,
        reason: String,
    },
    /// A sidebar node breaks a structural rule.
    #[error("Malformed navigation at {path}: {reason}")]
    MalformedNavigation {
        /// Location of the node, e.g. `navigation.sidebar[1].items[0]`.
        path: String,
        reason: String,
    },
    /// Shorthand social key is not a supported platform.
    #[error("Unknown social platform: {0}")]
    UnknownSocialPlatform(String),
    /// A URL does not parse as an absolute URL.
    #[error("Invalid URL in {field} ({url}): {reason}")]
    InvalidUrl {
        field: String,
        url: String,
        reason: String,
    },
    /// Any other invalid value.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.owner`").
        field: String,
        /// Error message (e.g., "${`GITHUB_OWNER`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Load and merge configuration fragments with optional CLI settings.
///
/// If `config_paths` is non-empty, each file is loaded in order and later
/// files take precedence. Otherwise, searches for `sitecfg.toml` in the
/// current directory and parents; if none is found, starts from an empty
/// input. CLI settings are merged last.
///
/// # Errors
///
/// Returns error if an explicit path doesn't exist, parsing fails, or an
/// environment variable reference cannot be expanded.
pub fn load_input(
    config_paths: &[PathBuf],
    cli_settings: Option<&CliSettings>,
) -> Result<RawConfigInput, ConfigError> {
    let cwd = std::env::current_dir().ok();
    load_input_in(cwd.as_deref(), config_paths, cli_settings)
}

/// [`load_input`] with discovery starting at `start_dir` instead of the
/// current directory. `None` skips discovery.
fn load_input_in(
    start_dir: Option<&Path>,
    config_paths: &[PathBuf],
    cli_settings: Option<&CliSettings>,
) -> Result<RawConfigInput, ConfigError> {
    let mut input = if config_paths.is_empty() {
        match start_dir.and_then(discover_config) {
            Some(discovered) => load_fragment(&discovered)?,
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, starting from empty input");
                RawConfigInput::default()
            }
        }
    } else {
        config_paths
            .iter()
            .map(|path| load_fragment(path))
            .collect::<Result<Vec<_>, _>>()
            .map(RawConfigInput::compose)?
    };

    if let Some(settings) = cli_settings {
        input.merge(settings.to_fragment());
    }

    Ok(input)
}

/// Load fragments and resolve them.
///
/// # Errors
///
/// Returns any loading error from [`load_input`] or validation error from
/// [`resolve`].
pub fn load(
    config_paths: &[PathBuf],
    cli_settings: Option<&CliSettings>,
) -> Result<ResolvedSiteConfig, ConfigError> {
    resolve(&load_input(config_paths, cli_settings)?)
}

/// Load a single fragment from a file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist.
pub fn load_fragment(path: &Path) -> Result<RawConfigInput, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut input: RawConfigInput = toml::from_str(&content)?;
    expand_env_vars(&mut input)?;
    tracing::info!(path = %path.display(), "Loaded configuration fragment");
    Ok(input)
}

/// Search for config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Expand environment variable references in configuration strings.
fn expand_env_vars(input: &mut RawConfigInput) -> Result<(), ConfigError> {
    expand::expand_in_place(&mut input.site.owner, "site.owner")?;
    expand::expand_in_place(&mut input.site.repo_name, "site.repo_name")?;
    expand::expand_in_place(&mut input.site.title, "site.title")?;
    expand::expand_in_place(&mut input.site.description, "site.description")?;

    match &mut input.social {
        Some(SocialDecl::Shorthand(map)) => {
            for (key, href) in map.iter_mut() {
                *href = expand::expand_env(href, &format!("social.{key}"))?;
            }
        }
        Some(SocialDecl::Links(links)) => {
            for (index, link) in links.iter_mut().enumerate() {
                link.href = expand::expand_env(&link.href, &format!("social[{index}].href"))?;
            }
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_fragment(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_single_fragment() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            r#"
[site]
owner = "elwizard33"
repo_name = "Cyberzard"
title = "Cyberzard Docs"
"#,
        );

        let config = load(&[path], None).unwrap();
        assert_eq!(config.title(), "Cyberzard Docs");
        assert_eq!(config.location().base(), "/Cyberzard/");
    }

    #[test]
    fn test_later_fragment_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = write_fragment(
            temp_dir.path(),
            "base.toml",
            r#"
[site]
owner = "elwizard33"
repo_name = "Cyberpanel-Server-Wizard-Cleanup"
title = "Cyberzard Docs"

[[navigation.sidebar]]
label = "Guide"
autogenerate = { directory = "." }
"#,
        );
        let variant = write_fragment(
            temp_dir.path(),
            "starlight.toml",
            r#"
[site]
repo_name = "Cyberzard"

[[navigation.sidebar]]
label = "Getting Started"
items = [{ label = "Introduction", link = "/introduction" }]
"#,
        );

        let config = load(&[base, variant], None).unwrap();
        assert_eq!(config.location().site(), "https://elwizard33.github.io/Cyberzard");
        assert_eq!(config.title(), "Cyberzard Docs");
        assert_eq!(
            config.navigation(),
            &[NavigationNode::Group {
                label: "Getting Started".to_owned(),
                items: vec![NavigationNode::Leaf {
                    label: "Introduction".to_owned(),
                    link: "/introduction".to_owned(),
                }],
            }]
        );
    }

    #[test]
    fn test_cli_settings_applied_last() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            r#"
[site]
owner = "elwizard33"
repo_name = "Cyberzard"

[search]
provider = "none"
"#,
        );
        let settings = CliSettings {
            title: Some("Preview".to_owned()),
            search: Some(SearchProvider::Pagefind),
            ..Default::default()
        };

        let config = load(&[path], Some(&settings)).unwrap();
        assert_eq!(config.title(), "Preview");
        assert_eq!(config.search().provider, SearchProvider::Pagefind);
        assert_eq!(config.identity().owner(), "elwizard33");
    }

    #[test]
    fn test_cli_settings_empty_changes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            "[site]\nowner = \"elwizard33\"\nrepo_name = \"Cyberzard\"\n",
        );
        let without = load_input(std::slice::from_ref(&path), None).unwrap();
        let with = load_input(&[path], Some(&CliSettings::default())).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_explicit_path_not_found() {
        let err = load_input(&[PathBuf::from("/nonexistent/sitecfg.toml")], None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let expected = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            "[site]\nowner = \"elwizard33\"\nrepo_name = \"Cyberzard\"\n",
        );
        let nested = temp_dir.path().join("docs").join("src");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_config(&nested), Some(expected));

        let input = load_input_in(Some(&nested), &[], None).unwrap();
        assert_eq!(input.site.owner.as_deref(), Some("elwizard33"));
        assert_eq!(input.site.repo_name.as_deref(), Some("Cyberzard"));
    }

    #[test]
    fn test_discover_config_ignores_sibling_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sibling = temp_dir.path().join("other");
        let nested = temp_dir.path().join("docs");
        std::fs::create_dir_all(&sibling).unwrap();
        std::fs::create_dir_all(&nested).unwrap();
        write_fragment(&sibling, CONFIG_FILENAME, "[site]\n");

        let found = discover_config(&nested);
        assert!(
            found.as_ref().is_none_or(|path| !path.starts_with(temp_dir.path())),
            "got {found:?}"
        );
    }

    #[test]
    fn test_no_config_starts_from_empty_input() {
        let input = load_input_in(None, &[], None).unwrap();
        assert_eq!(input, RawConfigInput::default());

        let err = resolve(&input).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidIdentity { field: "site.owner", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_no_config_with_cli_identity_resolves() {
        let settings = CliSettings {
            owner: Some("elwizard33".to_owned()),
            repo_name: Some("Cyberzard".to_owned()),
            ..Default::default()
        };
        let input = load_input_in(None, &[], Some(&settings)).unwrap();
        let config = resolve(&input).unwrap();
        assert_eq!(config.location().site(), "https://elwizard33.github.io/Cyberzard");
        assert_eq!(config.title(), "Cyberzard");
    }

    #[test]
    fn test_parse_error_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(temp_dir.path(), CONFIG_FILENAME, "[site\nowner = 1");
        let err = load_fragment(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_vars_expanded_on_load() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITECFG_LOAD_OWNER", "elwizard33");
            std::env::set_var("SITECFG_LOAD_REPO", "Cyberzard");
        }

        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            r#"
[site]
owner = "${SITECFG_LOAD_OWNER}"
repo_name = "${SITECFG_LOAD_REPO}"
title = "${SITECFG_LOAD_TITLE:-Cyberzard Docs}"

[social]
github = "https://github.com/${SITECFG_LOAD_OWNER}/${SITECFG_LOAD_REPO}"
"#,
        );

        let config = load(&[path], None).unwrap();
        assert_eq!(config.location().site(), "https://elwizard33.github.io/Cyberzard");
        assert_eq!(config.title(), "Cyberzard Docs");
        assert_eq!(
            config.social()[0].href,
            "https://github.com/elwizard33/Cyberzard"
        );

        unsafe {
            std::env::remove_var("SITECFG_LOAD_OWNER");
            std::env::remove_var("SITECFG_LOAD_REPO");
        }
    }

    #[test]
    fn test_env_var_missing_in_social_link() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITECFG_MISSING_HANDLE");
        }

        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            r#"
[[social]]
label = "Mastodon"
href = "https://fosstodon.org/@${SITECFG_MISSING_HANDLE}"
"#,
        );

        let err = load_fragment(&path).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("social[0].href"));
    }

    #[test]
    fn test_validation_error_surfaces_from_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_fragment(
            temp_dir.path(),
            CONFIG_FILENAME,
            r#"
[site]
owner = "elwizard33"
repo_name = "Cyberzard"

[[navigation.sidebar]]
label = "Advanced"
items = []
"#,
        );

        let err = load(&[path], None).unwrap_err();
        assert!(
            matches!(err, ConfigError::MalformedNavigation { ref path, .. } if path == "navigation.sidebar[0]"),
            "got {err:?}"
        );
    }
}
