//! Social links shown in the site header.
//!
//! Two raw forms are accepted:
//!
//! ```toml
//! # shorthand: platform key -> URL
//! [social]
//! github = "https://github.com/elwizard33/Cyberzard"
//! ```
//!
//! ```toml
//! # explicit entries
//! [[social]]
//! label = "Source"
//! href = "https://github.com/elwizard33/Cyberzard"
//! icon = "github"
//! ```
//!
//! Both normalize to an ordered list of [`SocialLink`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ConfigError, require_non_empty};

/// Raw `social` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SocialDecl {
    /// Explicit `[[social]]` entries.
    Links(Vec<SocialLinkDecl>),
    /// `[social]` table keyed by platform.
    Shorthand(BTreeMap<String, String>),
}

/// One explicit `[[social]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinkDecl {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Validated social link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    pub icon: Option<String>,
}

impl From<&SocialLinkDecl> for SocialLink {
    fn from(decl: &SocialLinkDecl) -> Self {
        Self {
            label: decl.label.clone(),
            href: decl.href.clone(),
            icon: decl.icon.clone(),
        }
    }
}

impl From<&SocialLink> for SocialLinkDecl {
    fn from(link: &SocialLink) -> Self {
        Self {
            label: link.label.clone(),
            href: link.href.clone(),
            icon: link.icon.clone(),
        }
    }
}

/// Platforms accepted as shorthand keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Platform {
    Bitbucket,
    Codeberg,
    Discord,
    GitHub,
    GitLab,
    LinkedIn,
    Mastodon,
    Rss,
    Slack,
    Telegram,
    Twitter,
    X,
    YouTube,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Self; 13] = [
        Self::Bitbucket,
        Self::Codeberg,
        Self::Discord,
        Self::GitHub,
        Self::GitLab,
        Self::LinkedIn,
        Self::Mastodon,
        Self::Rss,
        Self::Slack,
        Self::Telegram,
        Self::Twitter,
        Self::X,
        Self::YouTube,
    ];

    /// Shorthand key, also used as the icon name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Bitbucket => "bitbucket",
            Self::Codeberg => "codeberg",
            Self::Discord => "discord",
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::LinkedIn => "linkedin",
            Self::Mastodon => "mastodon",
            Self::Rss => "rss",
            Self::Slack => "slack",
            Self::Telegram => "telegram",
            Self::Twitter => "twitter",
            Self::X => "x.com",
            Self::YouTube => "youtube",
        }
    }

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bitbucket => "Bitbucket",
            Self::Codeberg => "Codeberg",
            Self::Discord => "Discord",
            Self::GitHub => "GitHub",
            Self::GitLab => "GitLab",
            Self::LinkedIn => "LinkedIn",
            Self::Mastodon => "Mastodon",
            Self::Rss => "RSS",
            Self::Slack => "Slack",
            Self::Telegram => "Telegram",
            Self::Twitter => "Twitter",
            Self::X => "X",
            Self::YouTube => "YouTube",
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.key() == s)
            .ok_or_else(|| ConfigError::UnknownSocialPlatform(s.to_owned()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalize raw social declarations into the canonical list.
pub(crate) fn resolve_social(decl: Option<&SocialDecl>) -> Result<Vec<SocialLink>, ConfigError> {
    match decl {
        None => Ok(Vec::new()),
        Some(SocialDecl::Shorthand(map)) => map
            .iter()
            .map(|(key, href)| {
                let platform: Platform = key.parse()?;
                require_absolute_url(href, &format!("social.{key}"))?;
                Ok(SocialLink {
                    label: platform.display_name().to_owned(),
                    href: href.clone(),
                    icon: Some(platform.key().to_owned()),
                })
            })
            .collect(),
        Some(SocialDecl::Links(links)) => {
            let mut seen = BTreeSet::new();
            links
                .iter()
                .enumerate()
                .map(|(index, link)| {
                    require_non_empty(&link.label, &format!("social[{index}].label"))?;
                    require_absolute_url(&link.href, &format!("social[{index}].href"))?;
                    if let Some(icon) = &link.icon {
                        require_non_empty(icon, &format!("social[{index}].icon"))?;
                    }
                    if !seen.insert(link.href.as_str()) {
                        return Err(ConfigError::Validation(format!(
                            "social[{index}] duplicates an earlier link to {}",
                            link.href
                        )));
                    }
                    Ok(SocialLink::from(link))
                })
                .collect()
        }
    }
}

/// Explicit-list form of already resolved links.
pub(crate) fn to_decl(links: &[SocialLink]) -> Option<SocialDecl> {
    if links.is_empty() {
        return None;
    }
    Some(SocialDecl::Links(links.iter().map(SocialLinkDecl::from).collect()))
}

/// Require `href` to parse as an absolute URL with a host.
/// Whitespace and control characters are rejected up front, since the parser
/// would strip or encode them and the `href` is emitted as written.
fn require_absolute_url(href: &str, field: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field: field.to_owned(),
        url: href.to_owned(),
        reason,
    };
    if href.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("surrounding or embedded whitespace".to_owned()));
    }
    let parsed = Url::parse(href).map_err(|e| invalid(e.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(())
}
