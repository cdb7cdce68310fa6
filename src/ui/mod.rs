//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [Prompter] seam and its terminal implementation

use std::io::{self, BufRead, Write};

use crate::domain::{BranchClassification, ChangeKind};
use crate::error::{Result, VersionManagerError};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_outcome, display_status, display_success, json_output,
};

/// Source of operator decisions the workflow cannot derive on its own
pub trait Prompter {
    /// Choose which workspace package to bump
    fn select_package(&self, names: &[String]) -> Result<String>;

    /// Describe the changes being released on `branch`
    fn select_change(&self, branch: &BranchClassification) -> Result<ChangeKind>;
}

/// Prompts on stderr and reads answers from stdin
///
/// Prompts go to stderr so `--json` output on stdout stays parseable.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select_package(&self, names: &[String]) -> Result<String> {
        let index = select_index(
            &mut io::stdin().lock(),
            &mut io::stderr(),
            "Choose the package whose version you want to modify:",
            names,
        )?;
        Ok(names[index].clone())
    }

    fn select_change(&self, branch: &BranchClassification) -> Result<ChangeKind> {
        let options: Vec<String> = ChangeKind::ALL
            .iter()
            .map(|kind| kind.description().to_string())
            .collect();
        let title = format!(
            "Which one describes better your changes? (branch '{}', {} channel)",
            branch.name, branch.channel
        );

        let index = select_index(&mut io::stdin().lock(), &mut io::stderr(), &title, &options)?;
        Ok(ChangeKind::ALL[index])
    }
}

/// Prompts user to select one of `options`.
///
/// If only one option is available, returns it directly without prompting.
/// Otherwise displays a numbered list and accepts a 1-based index.
/// Default selection is the first option if the user presses Enter.
///
/// # Returns
/// * `Ok(usize)` - 0-based index of the selected option
/// * `Err` - If there are no options, input ends, or the selection is invalid
pub fn select_index<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    title: &str,
    options: &[String],
) -> Result<usize> {
    if options.is_empty() {
        return Err(VersionManagerError::prompt("Nothing to choose from"));
    }
    if options.len() == 1 {
        return Ok(0);
    }

    writeln!(output, "\n{}", console::style(title).bold())?;
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, option)?;
    }
    write!(output, "\nSelect (1-{}) [default: 1]: ", options.len())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(VersionManagerError::prompt("No selection made (end of input)"));
    }
    let selection = line.trim();

    // If empty input, default to first option (index 1)
    let index = if selection.is_empty() {
        1
    } else {
        selection.parse::<usize>().unwrap_or(0)
    };

    if index > 0 && index <= options.len() {
        Ok(index - 1)
    } else {
        Err(VersionManagerError::prompt(format!(
            "Invalid selection '{}'",
            selection
        )))
    }
}
