//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod diff;
pub(crate) mod resolve;
mod settings;

pub(crate) use check::CheckArgs;
pub(crate) use diff::DiffArgs;
pub(crate) use resolve::ResolveArgs;
