//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Only `${...}` spans are expanded; bare `$VAR` and `$5` are left as written,
/// as is an unterminated `${`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(close) = rest[start..].find('}') else {
            break;
        };
        let end = start + close + 1;
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_span(&rest[start..end], field)?);
        rest = &rest[end..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${VAR}` or `${VAR:-default}` span.
fn expand_span(span: &str, field: &str) -> Result<String, ConfigError> {
    let has_default = span.contains(":-");
    shellexpand::env_with_context(span, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) if has_default => Ok(None),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand an optional field in place.
pub(crate) fn expand_in_place(slot: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(value) = slot.as_mut() {
        *value = expand_env(value, field)?;
    }
    Ok(())
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}
