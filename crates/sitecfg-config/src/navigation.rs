//! Sidebar navigation declarations and their validated tree form.
//!
//! Raw entries ([`NavigationDecl`]) are loose tables: a label plus one of
//! `link`, `items`, or `autogenerate`. Resolution turns them into
//! [`NavigationNode`] values, checking every node on the way down:
//!
//! - labels are non-empty, unpadded, and unique among siblings
//! - groups have at least one item
//! - links are site-relative (start with a single `/`)
//! - autogenerated directories are relative and stay inside the content root
//!
//! A supplied tree always replaces the default one as a whole.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::identity::is_url_safe_segment;

/// Label of the sidebar used when none is configured.
const DEFAULT_GROUP_LABEL: &str = "Guide";
/// Content directory autogenerated by the default sidebar.
const DEFAULT_GROUP_DIRECTORY: &str = ".";

/// `[navigation]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSection {
    /// Prefix prepended to every link (e.g. `/docs` or a locale like `/en`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_prefix: Option<String>,
    /// Top-level sidebar entries.
    pub sidebar: Vec<NavigationDecl>,
}

/// One raw sidebar entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationDecl {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavigationDecl>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autogenerate: Option<AutogenerateDecl>,
}

impl NavigationDecl {
    /// Shorthand for a link entry.
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Shorthand for a group entry.
    pub fn group(label: impl Into<String>, items: Vec<NavigationDecl>) -> Self {
        Self {
            label: label.into(),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Shorthand for an autogenerated group.
    pub fn autogenerate(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            autogenerate: Some(AutogenerateDecl {
                directory: directory.into(),
            }),
            ..Self::default()
        }
    }
}

/// `autogenerate = { directory = "..." }` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutogenerateDecl {
    pub directory: String,
}

/// Validated sidebar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationNode {
    /// Link to a single page.
    Leaf { label: String, link: String },
    /// Named group of nested nodes.
    Group {
        label: String,
        items: Vec<NavigationNode>,
    },
    /// Group whose entries are generated from a content directory.
    Autogenerate { label: String, directory: String },
}

impl NavigationNode {
    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Group { label, .. } | Self::Autogenerate { label, .. } => {
                label
            }
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Group { items, .. } => 1 + items.iter().map(Self::node_count).sum::<usize>(),
            Self::Leaf { .. } | Self::Autogenerate { .. } => 1,
        }
    }

    /// Convert back to the raw declaration that resolves to this node.
    pub fn to_decl(&self) -> NavigationDecl {
        match self {
            Self::Leaf { label, link } => NavigationDecl::leaf(label, link),
            Self::Group { label, items } => {
                NavigationDecl::group(label, items.iter().map(Self::to_decl).collect())
            }
            Self::Autogenerate { label, directory } => NavigationDecl::autogenerate(label, directory),
        }
    }
}

/// Sidebar used when the configuration supplies none.
pub(crate) fn default_navigation() -> Vec<NavigationNode> {
    vec![NavigationNode::Autogenerate {
        label: DEFAULT_GROUP_LABEL.to_owned(),
        directory: DEFAULT_GROUP_DIRECTORY.to_owned(),
    }]
}

/// Validate a `[navigation]` section and build the sidebar tree.
pub(crate) fn resolve_navigation(
    section: Option<&NavigationSection>,
) -> Result<Vec<NavigationNode>, ConfigError> {
    let Some(section) = section else {
        return Ok(default_navigation());
    };

    let prefix = match section.link_prefix.as_deref() {
        Some(prefix) => {
            validate_link_prefix(prefix)?;
            prefix
        }
        None => "",
    };

    if section.sidebar.is_empty() {
        return Err(malformed(
            "navigation.sidebar",
            "must contain at least one entry",
        ));
    }

    resolve_nodes(&section.sidebar, "navigation.sidebar", prefix)
}

fn resolve_nodes(
    decls: &[NavigationDecl],
    path: &str,
    prefix: &str,
) -> Result<Vec<NavigationNode>, ConfigError> {
    let mut labels = BTreeSet::new();
    decls
        .iter()
        .enumerate()
        .map(|(index, decl)| {
            let node_path = format!("{path}[{index}]");
            let node = resolve_node(decl, &node_path, prefix)?;
            if !labels.insert(node.label().to_owned()) {
                return Err(malformed(
                    &node_path,
                    format!("duplicate sibling label {:?}", node.label()),
                ));
            }
            Ok(node)
        })
        .collect()
}

fn resolve_node(
    decl: &NavigationDecl,
    path: &str,
    prefix: &str,
) -> Result<NavigationNode, ConfigError> {
    if decl.label.trim().is_empty() {
        return Err(malformed(path, "label cannot be empty"));
    }
    if decl.label.trim() != decl.label {
        return Err(malformed(
            path,
            format!("label {:?} has surrounding whitespace", decl.label),
        ));
    }
    let label = decl.label.clone();

    match (&decl.link, &decl.items, &decl.autogenerate) {
        (Some(link), None, None) => {
            validate_link(link, path)?;
            Ok(NavigationNode::Leaf {
                label,
                link: format!("{prefix}{link}"),
            })
        }
        (None, Some(items), None) => {
            if items.is_empty() {
                return Err(malformed(path, format!("group {label:?} has no items")));
            }
            let items = resolve_nodes(items, &format!("{path}.items"), prefix)?;
            Ok(NavigationNode::Group { label, items })
        }
        (None, None, Some(auto)) => {
            validate_directory(&auto.directory, path)?;
            Ok(NavigationNode::Autogenerate {
                label,
                directory: auto.directory.clone(),
            })
        }
        (None, None, None) => Err(malformed(
            path,
            "entry needs one of `link`, `items` or `autogenerate`",
        )),
        _ => Err(malformed(
            path,
            "entry must set only one of `link`, `items` or `autogenerate`",
        )),
    }
}

fn validate_link(link: &str, path: &str) -> Result<(), ConfigError> {
    if !link.starts_with('/') {
        return Err(malformed(path, format!("link {link:?} must start with '/'")));
    }
    if link.starts_with("//") {
        return Err(malformed(path, format!("link {link:?} must be site-relative")));
    }
    if link.chars().any(char::is_whitespace) {
        return Err(malformed(path, format!("link {link:?} contains whitespace")));
    }
    Ok(())
}

fn validate_link_prefix(prefix: &str) -> Result<(), ConfigError> {
    const FIELD: &str = "navigation.link_prefix";

    let Some(rest) = prefix.strip_prefix('/') else {
        return Err(malformed(FIELD, format!("{prefix:?} must start with '/'")));
    };
    if rest.is_empty() || rest.ends_with('/') {
        return Err(malformed(
            FIELD,
            format!("{prefix:?} must name a path without a trailing '/'"),
        ));
    }
    if let Some(segment) = rest.split('/').find(|s| !is_url_safe_segment(s)) {
        return Err(malformed(
            FIELD,
            format!("segment {segment:?} is not URL-safe"),
        ));
    }
    Ok(())
}

fn validate_directory(directory: &str, path: &str) -> Result<(), ConfigError> {
    if directory.trim().is_empty() {
        return Err(malformed(path, "autogenerate directory cannot be empty"));
    }
    if directory.starts_with('/') {
        return Err(malformed(
            path,
            format!("autogenerate directory {directory:?} must be relative"),
        ));
    }
    if directory.split('/').any(|segment| segment == "..") {
        return Err(malformed(
            path,
            format!("autogenerate directory {directory:?} escapes the content root"),
        ));
    }
    Ok(())
}

fn malformed(path: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::MalformedNavigation {
        path: path.to_owned(),
        reason: reason.into(),
    }
}
