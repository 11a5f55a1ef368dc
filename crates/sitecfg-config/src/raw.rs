//! Unvalidated configuration input and fragment composition.

use serde::{Deserialize, Serialize};

use crate::navigation::NavigationSection;
use crate::social::SocialDecl;
use crate::theme::{MarkdownDecl, SearchDecl, ThemeDecl};

/// Configuration as written in `sitecfg.toml`.
///
/// A value may be a complete site description or a partial fragment.
/// Fragments are combined with [`RawConfigInput::merge`] and the result is
/// validated by [`crate::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfigInput {
    /// `[site]` section.
    pub site: SiteDecl,
    /// `[navigation]` section. `None` selects the default sidebar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationSection>,
    /// `[social]` table or `[[social]]` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialDecl>,
    /// `[search]` section.
    pub search: SearchDecl,
    /// `[theme]` section.
    pub theme: ThemeDecl,
    /// `[markdown]` section.
    pub markdown: MarkdownDecl,
}

/// `[site]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDecl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawConfigInput {
    /// Minimal input naming only the repository.
    pub fn for_repo(owner: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            site: SiteDecl {
                owner: Some(owner.into()),
                repo_name: Some(repo_name.into()),
                ..SiteDecl::default()
            },
            ..Self::default()
        }
    }

    /// Layer a later fragment on top of this one.
    ///
    /// Scalars are last-write-wins. The navigation tree, social links, and
    /// stylesheet list are replaced as a whole when `later` supplies them;
    /// they are never spliced together.
    pub fn merge(&mut self, later: RawConfigInput) {
        let RawConfigInput {
            site,
            navigation,
            social,
            search,
            theme,
            markdown,
        } = later;

        overwrite(&mut self.site.owner, site.owner);
        overwrite(&mut self.site.repo_name, site.repo_name);
        overwrite(&mut self.site.title, site.title);
        overwrite(&mut self.site.description, site.description);
        overwrite(&mut self.navigation, navigation);
        overwrite(&mut self.social, social);
        overwrite(&mut self.search.provider, search.provider);
        overwrite(&mut self.theme.custom_css, theme.custom_css);
        overwrite(&mut self.markdown.code_theme, markdown.code_theme);
    }

    /// Merge fragments in order, later ones taking precedence.
    pub fn compose(fragments: impl IntoIterator<Item = RawConfigInput>) -> Self {
        fragments
            .into_iter()
            .fold(Self::default(), |mut acc, fragment| {
                acc.merge(fragment);
                acc
            })
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
