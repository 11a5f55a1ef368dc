//! Presentation options: search provider, stylesheet overrides, and code
//! highlighting theme.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, require_non_empty};

/// Search provider used by the theme plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// No search UI.
    #[default]
    None,
    /// Built-in Pagefind index.
    Pagefind,
    /// Provider wired up outside this configuration.
    Other,
}

impl SearchProvider {
    /// Name as written in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pagefind => "pagefind",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for SearchProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::None, Self::Pagefind, Self::Other]
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "search.provider must be one of none, pagefind, other (got {s:?})"
                ))
            })
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDecl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<SearchProvider>,
}

/// Resolved search configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub provider: SearchProvider,
}

/// `[theme]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeDecl {
    /// Stylesheets loaded after the theme defaults, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<Vec<String>>,
}

/// `[markdown]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownDecl {
    /// Syntax highlighting theme for code blocks (e.g. `github-dark`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_theme: Option<String>,
}

/// Resolved markdown options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownConfig {
    pub code_theme: Option<String>,
}

pub(crate) fn resolve_search(decl: &SearchDecl) -> SearchConfig {
    SearchConfig {
        provider: decl.provider.unwrap_or_default(),
    }
}

/// Validate stylesheet paths, keeping their order.
pub(crate) fn resolve_theme_overrides(decl: &ThemeDecl) -> Result<Vec<String>, ConfigError> {
    let Some(paths) = &decl.custom_css else {
        return Ok(Vec::new());
    };
    for (index, path) in paths.iter().enumerate() {
        let field = format!("theme.custom_css[{index}]");
        require_non_empty(path, &field)?;
        if path.trim() != path {
            return Err(ConfigError::Validation(format!(
                "{field} has surrounding whitespace"
            )));
        }
    }
    Ok(paths.clone())
}

pub(crate) fn resolve_markdown(decl: &MarkdownDecl) -> Result<MarkdownConfig, ConfigError> {
    if let Some(theme) = &decl.code_theme {
        require_non_empty(theme.trim(), "markdown.code_theme")?;
    }
    Ok(MarkdownConfig {
        code_theme: decl.code_theme.clone(),
    })
}
