//! `sitecfg diff` command implementation.
//!
//! Resolves two configurations independently and compares the generator
//! documents, so variants that differ only in spelling (shorthand vs.
//! explicit social links, prefixed vs. pre-joined links) compare equal.

use std::path::PathBuf;

use clap::Args;
use similar::{ChangeTag, TextDiff};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the diff command.
#[derive(Args)]
pub(crate) struct DiffArgs {
    /// First configuration file.
    left: PathBuf,

    /// Second configuration file.
    right: PathBuf,
}

impl DiffArgs {
    /// Execute the diff command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Drift` when the resolved documents differ.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let left = sitecfg_config::load(std::slice::from_ref(&self.left), None)?.to_json()?;
        let right = sitecfg_config::load(std::slice::from_ref(&self.right), None)?.to_json()?;

        let changed = print_diff(&output, &left, &right);
        tracing::debug!(changed, "Compared resolved configurations");
        if changed > 0 {
            return Err(CliError::Drift(changed));
        }

        output.success(&format!(
            "{} and {} resolve to the same configuration",
            self.left.display(),
            self.right.display()
        ));
        Ok(())
    }
}

/// Print changed lines and return how many there were.
fn print_diff(output: &Output, left: &str, right: &str) -> usize {
    let diff = TextDiff::from_lines(left, right);
    let mut changed = 0;
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => continue,
        };
        changed += 1;
        output.diff_line(sign, change.value().trim_end_matches('\n'));
    }
    changed
}
