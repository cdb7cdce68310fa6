//! Pure formatting functions for UI output.
//!
//! Message builders return strings so they can be tested; the `display_*`
//! functions print them.

use crate::cli::orchestration::BumpOutcome;
use crate::domain::ResolvedVersion;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Machine-readable result: `{"version": ..., "tag": ...}`
pub fn json_output(resolved: &ResolvedVersion) -> serde_json::Result<String> {
    serde_json::to_string(resolved)
}

/// Human-readable summary of a bump, one line per entry.
pub fn outcome_lines(outcome: &BumpOutcome) -> Vec<String> {
    let tag = &outcome.resolved.tag;
    let version = &outcome.resolved.version;

    if outcome.dry_run {
        return vec![
            format!("Dry run: no changes were made to {}.", outcome.package.name),
            format!("Next version would be {}.", style(version).yellow()),
            format!("Tag would be {}.", style(tag).yellow()),
        ];
    }

    if !outcome.committed {
        return vec![
            "No commit or tag was created (--no-commit enabled).".to_string(),
            format!("The version was set to {}.", style(version).yellow()),
            "You can review the changes and commit/tag manually if needed.".to_string(),
        ];
    }

    if outcome.pushed {
        return vec![
            format!(
                "The commit and tag {} were pushed to {}.",
                style(tag).yellow(),
                outcome.remote
            ),
            "From the tag pipeline, you can now publish the package.".to_string(),
        ];
    }

    vec![
        format!("The commit with tag {} is ready.", style(tag).yellow()),
        format!(
            "Now you need to run {} to upload them.",
            style(format!(
                "git push && git push {} {}",
                outcome.remote, tag
            ))
            .green()
            .underlined()
        ),
        "Then, from the tag pipeline, you can publish the package.".to_string(),
    ]
}

/// Print the summary of a bump
pub fn display_outcome(outcome: &BumpOutcome) {
    let mut lines = outcome_lines(outcome).into_iter();
    if let Some(first) = lines.next() {
        display_success(&first);
    }
    for line in lines {
        display_status(&line);
    }
}
