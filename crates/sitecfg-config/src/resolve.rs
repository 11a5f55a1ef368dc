//! Resolution of raw input into a validated site configuration.

use crate::ConfigError;
use crate::identity::{SiteIdentity, SiteLocation};
use crate::navigation::{NavigationNode, NavigationSection, resolve_navigation};
use crate::raw::{RawConfigInput, SiteDecl};
use crate::social::{self, SocialLink, resolve_social};
use crate::theme::{
    MarkdownConfig, MarkdownDecl, SearchConfig, SearchDecl, ThemeDecl, resolve_markdown,
    resolve_search, resolve_theme_overrides,
};

/// Fully validated site configuration.
///
/// Built only by [`resolve`]; fields are read through accessors so the
/// derived location can never disagree with the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSiteConfig {
    identity: SiteIdentity,
    location: SiteLocation,
    title: String,
    description: Option<String>,
    navigation: Vec<NavigationNode>,
    social: Vec<SocialLink>,
    search: SearchConfig,
    theme_overrides: Vec<String>,
    markdown: MarkdownConfig,
}

impl ResolvedSiteConfig {
    pub fn identity(&self) -> &SiteIdentity {
        &self.identity
    }

    pub fn location(&self) -> &SiteLocation {
        &self.location
    }

    /// Site title. Defaults to the repository name.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Top-level sidebar nodes, in display order.
    pub fn navigation(&self) -> &[NavigationNode] {
        &self.navigation
    }

    pub fn social(&self) -> &[SocialLink] {
        &self.social
    }

    pub fn search(&self) -> SearchConfig {
        self.search
    }

    /// Extra stylesheets, in load order.
    pub fn theme_overrides(&self) -> &[String] {
        &self.theme_overrides
    }

    pub fn markdown(&self) -> &MarkdownConfig {
        &self.markdown
    }

    /// Explicit raw input that resolves back to this configuration.
    ///
    /// Links are emitted with any prefix already applied and social links in
    /// list form, so the result carries no shorthand.
    pub fn to_raw(&self) -> RawConfigInput {
        RawConfigInput {
            site: SiteDecl {
                owner: Some(self.identity.owner().to_owned()),
                repo_name: Some(self.identity.repo_name().to_owned()),
                title: Some(self.title.clone()),
                description: self.description.clone(),
            },
            navigation: Some(NavigationSection {
                link_prefix: None,
                sidebar: self.navigation.iter().map(NavigationNode::to_decl).collect(),
            }),
            social: social::to_decl(&self.social),
            search: SearchDecl {
                provider: Some(self.search.provider),
            },
            theme: ThemeDecl {
                custom_css: (!self.theme_overrides.is_empty()).then(|| self.theme_overrides.clone()),
            },
            markdown: MarkdownDecl {
                code_theme: self.markdown.code_theme.clone(),
            },
        }
    }
}

/// Validate `input` and build the site configuration.
///
/// Pure: the same input always yields the same output, and nothing outside
/// `input` is consulted.
///
/// # Errors
///
/// Fails on the first violated invariant with
/// [`ConfigError::InvalidIdentity`], [`ConfigError::MalformedNavigation`],
/// [`ConfigError::UnknownSocialPlatform`], [`ConfigError::InvalidUrl`], or
/// [`ConfigError::Validation`].
pub fn resolve(input: &RawConfigInput) -> Result<ResolvedSiteConfig, ConfigError> {
    let identity = SiteIdentity::new(
        input.site.owner.clone().unwrap_or_default(),
        input.site.repo_name.clone().unwrap_or_default(),
    )?;
    let location = identity.location();

    let title = match &input.site.title {
        Some(title) if title.trim().is_empty() => {
            return Err(ConfigError::Validation("site.title cannot be empty".to_owned()));
        }
        Some(title) => title.clone(),
        None => identity.repo_name().to_owned(),
    };

    let navigation = resolve_navigation(input.navigation.as_ref())?;
    let social = resolve_social(input.social.as_ref())?;
    let search = resolve_search(&input.search);
    let theme_overrides = resolve_theme_overrides(&input.theme)?;
    let markdown = resolve_markdown(&input.markdown)?;

    tracing::debug!(
        site = location.site(),
        base = location.base(),
        nav_entries = navigation.len(),
        social_links = social.len(),
        "Resolved site configuration"
    );

    Ok(ResolvedSiteConfig {
        identity,
        location,
        title,
        description: input.site.description.clone(),
        navigation,
        social,
        search,
        theme_overrides,
        markdown,
    })
}
