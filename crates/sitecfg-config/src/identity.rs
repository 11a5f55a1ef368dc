//! Site identity and the location derived from it.
//!
//! A project site on GitHub Pages is served from
//! `https://{owner}.github.io/{repo_name}` under the `/{repo_name}/` base
//! path. [`SiteLocation`] is computed from [`SiteIdentity`] alone, so two
//! configurations naming the same repository always agree on where the
//! site lives.

use crate::ConfigError;

/// Repository that hosts the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    owner: String,
    repo_name: String,
}

impl SiteIdentity {
    /// Validate and build an identity.
    ///
    /// `owner` becomes a host label, so it is limited to ASCII letters,
    /// digits and inner hyphens. `repo_name` becomes a path segment and may
    /// additionally contain `_` and `.`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIdentity`] naming the offending field.
    pub fn new(owner: impl Into<String>, repo_name: impl Into<String>) -> Result<Self, ConfigError> {
        let owner = owner.into();
        let repo_name = repo_name.into();
        validate_owner(&owner)?;
        validate_repo_name(&repo_name)?;
        Ok(Self { owner, repo_name })
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Derive the site URL and base path.
    #[must_use]
    pub fn location(&self) -> SiteLocation {
        SiteLocation {
            site: format!("https://{}.github.io/{}", self.owner, self.repo_name),
            base: format!("/{}/", self.repo_name),
        }
    }
}

/// Where the built site is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLocation {
    site: String,
    base: String,
}

impl SiteLocation {
    /// Absolute HTTPS URL of the site, without trailing slash.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Path prefix the site is served under, with leading and trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }
}

fn validate_owner(owner: &str) -> Result<(), ConfigError> {
    require_present(owner, "site.owner")?;
    if let Some(c) = owner.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
        return Err(invalid("site.owner", format!("contains invalid character {c:?}")));
    }
    if owner.starts_with('-') || owner.ends_with('-') {
        return Err(invalid("site.owner", "cannot start or end with '-'"));
    }
    Ok(())
}

fn validate_repo_name(repo_name: &str) -> Result<(), ConfigError> {
    require_present(repo_name, "site.repo_name")?;
    if let Some(c) = repo_name.chars().find(|c| !is_segment_char(*c)) {
        return Err(invalid(
            "site.repo_name",
            format!("contains invalid character {c:?}"),
        ));
    }
    if matches!(repo_name, "." | "..") {
        return Err(invalid("site.repo_name", "cannot be a relative path segment"));
    }
    Ok(())
}

fn require_present(value: &str, field: &'static str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidIdentity {
        field,
        reason: reason.into(),
    }
}

/// Characters allowed in a single URL path segment.
pub(crate) fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Check that `segment` is a non-empty path segment that needs no escaping.
pub(crate) fn is_url_safe_segment(segment: &str) -> bool {
    !segment.is_empty() && !matches!(segment, "." | "..") && segment.chars().all(is_segment_char)
}
