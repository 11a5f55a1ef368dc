//! Document handed to the site generator and its documentation theme.
//!
//! Field names follow what the generator reads: `site` and `base` for URL
//! generation, and `title`, `description`, `social`, `sidebar`,
//! `customCss`, `search` and `markdown` for the theme plugin.

use serde::Serialize;

use crate::ConfigError;
use crate::navigation::NavigationNode;
use crate::resolve::ResolvedSiteConfig;
use crate::theme::SearchProvider;

/// Serializable view of a [`ResolvedSiteConfig`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainConfig<'a> {
    site: &'a str,
    base: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    social: Vec<SocialEntry<'a>>,
    sidebar: Vec<SidebarEntry<'a>>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    custom_css: &'a [String],
    search: SearchEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<MarkdownEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct SocialEntry<'a> {
    label: &'a str,
    href: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SidebarEntry<'a> {
    Link {
        label: &'a str,
        link: &'a str,
    },
    Group {
        label: &'a str,
        items: Vec<SidebarEntry<'a>>,
    },
    Autogenerate {
        label: &'a str,
        autogenerate: AutogenerateEntry<'a>,
    },
}

#[derive(Debug, Serialize)]
struct AutogenerateEntry<'a> {
    directory: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchEntry {
    provider: SearchProvider,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkdownEntry<'a> {
    shiki_config: ShikiEntry<'a>,
}

#[derive(Debug, Serialize)]
struct ShikiEntry<'a> {
    theme: &'a str,
}

impl<'a> From<&'a NavigationNode> for SidebarEntry<'a> {
    fn from(node: &'a NavigationNode) -> Self {
        match node {
            NavigationNode::Leaf { label, link } => Self::Link { label, link },
            NavigationNode::Group { label, items } => Self::Group {
                label,
                items: items.iter().map(SidebarEntry::from).collect(),
            },
            NavigationNode::Autogenerate { label, directory } => Self::Autogenerate {
                label,
                autogenerate: AutogenerateEntry { directory },
            },
        }
    }
}

impl ResolvedSiteConfig {
    /// Borrowing view in the generator's configuration shape.
    pub fn to_toolchain(&self) -> ToolchainConfig<'_> {
        ToolchainConfig {
            site: self.location().site(),
            base: self.location().base(),
            title: self.title(),
            description: self.description(),
            social: self
                .social()
                .iter()
                .map(|link| SocialEntry {
                    label: &link.label,
                    href: &link.href,
                    icon: link.icon.as_deref(),
                })
                .collect(),
            sidebar: self.navigation().iter().map(SidebarEntry::from).collect(),
            custom_css: self.theme_overrides(),
            search: SearchEntry {
                provider: self.search().provider,
            },
            markdown: self
                .markdown()
                .code_theme
                .as_deref()
                .map(|theme| MarkdownEntry {
                    shiki_config: ShikiEntry { theme },
                }),
        }
    }

    /// Pretty-printed JSON of [`Self::to_toolchain`].
    ///
    /// Output is stable for equal configurations, so two documents can be
    /// compared line by line to spot drift.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.to_toolchain())?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::navigation::{NavigationDecl, NavigationSection};
    use crate::raw::RawConfigInput;
    use crate::resolve;
    use crate::social::SocialDecl;
    use crate::theme::SearchProvider;

    #[test]
    fn test_minimal_document() {
        let config = resolve(&RawConfigInput::for_repo("elwizard33", "Cyberzard")).unwrap();
        let value = serde_json::to_value(config.to_toolchain()).unwrap();
        assert_eq!(
            value,
            json!({
                "site": "https://elwizard33.github.io/Cyberzard",
                "base": "/Cyberzard/",
                "title": "Cyberzard",
                "social": [],
                "sidebar": [
                    { "label": "Guide", "autogenerate": { "directory": "." } }
                ],
                "search": { "provider": "none" }
            })
        );
    }

    #[test]
    fn test_full_document() {
        let mut input = RawConfigInput::for_repo("elwizard33", "Cyberzard");
        input.site.title = Some("Cyberzard Docs".to_owned());
        input.site.description = Some("AI-assisted CyberPanel security CLI documentation".to_owned());
        input.navigation = Some(NavigationSection {
            link_prefix: None,
            sidebar: vec![NavigationDecl::group(
                "Getting Started",
                vec![NavigationDecl::leaf("Introduction", "/introduction")],
            )],
        });
        input.social = Some(SocialDecl::Shorthand(
            [(
                "github".to_owned(),
                "https://github.com/elwizard33/Cyberzard".to_owned(),
            )]
            .into_iter()
            .collect(),
        ));
        input.search.provider = Some(SearchProvider::Pagefind);
        input.theme.custom_css = Some(vec!["./src/styles/custom.css".to_owned()]);
        input.markdown.code_theme = Some("github-dark".to_owned());

        let config = resolve(&input).unwrap();
        let value = serde_json::to_value(config.to_toolchain()).unwrap();
        assert_eq!(
            value,
            json!({
                "site": "https://elwizard33.github.io/Cyberzard",
                "base": "/Cyberzard/",
                "title": "Cyberzard Docs",
                "description": "AI-assisted CyberPanel security CLI documentation",
                "social": [
                    {
                        "label": "GitHub",
                        "href": "https://github.com/elwizard33/Cyberzard",
                        "icon": "github"
                    }
                ],
                "sidebar": [
                    {
                        "label": "Getting Started",
                        "items": [
                            { "label": "Introduction", "link": "/introduction" }
                        ]
                    }
                ],
                "customCss": ["./src/styles/custom.css"],
                "search": { "provider": "pagefind" },
                "markdown": { "shikiConfig": { "theme": "github-dark" } }
            })
        );
    }

    #[test]
    fn test_json_is_stable() {
        let config = resolve(&RawConfigInput::for_repo("elwizard33", "Cyberzard")).unwrap();
        let first = config.to_json().unwrap();
        let second = config.clone().to_json().unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("{\n  \"site\""));
    }
}
