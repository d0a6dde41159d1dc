use crate::level::Severity;
use std::process::ExitCode;

/// Prints `ordinal name display-name` for every severity.
#[must_use]
pub fn cmd_levels() -> ExitCode {
    for severity in Severity::all() {
        println!(
            "{:>2}  {:<13} {}",
            severity.ordinal(),
            severity.as_str(),
            severity.display_name().trim_end_matches(", ")
        );
    }
    ExitCode::SUCCESS
}
