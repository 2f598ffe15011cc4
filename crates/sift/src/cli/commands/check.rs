//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::{ConfigWarning, discover_config_files};

use crate::cli::context::CommandContext;

/// Exit codes for `sift check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration against the working directory and reports issues.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found, using defaults.");
    } else {
        println!("Config files (highest precedence first):");
        for path in &config_files {
            println!("  {}", path.display());
        }
    }
    println!();

    match ctx.config.output_dir(&ctx.cwd) {
        Ok(dir) => {
            let status = if dir.is_dir() { "ok" } else { "missing" };
            println!("Output directory: {} [{status}]", dir.display());
        }
        Err(e) => println!("Output directory: {e}"),
    }
    println!("Content root: {}", ctx.config.extract.content_root);
    println!();

    let warnings = ctx.config.validate(&ctx.cwd);
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<_> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}

/// Returns a hint for resolving a warning.
fn hint(warning: &ConfigWarning) -> &'static str {
    match warning {
        ConfigWarning::OutputDirMissing { .. } => {
            "Build the site first, or set [source] output_dir to where the HTML is written."
        }
        ConfigWarning::OutputDirNotDirectory { .. } => {
            "[source] output_dir must point to a directory, not a file."
        }
        ConfigWarning::OutputDirUnresolved { .. } => {
            "Check that the home directory is available when using '~' in output_dir."
        }
        ConfigWarning::EmptyExtension => "Set [source] extension, e.g. \"html\".",
        ConfigWarning::EmptyContentRoot => "Set [extract] content_root to a CSS selector.",
        ConfigWarning::InvalidExcludePattern { .. } => "Fix the glob syntax in [source] exclude.",
        ConfigWarning::ExcludePatternMatchesNothing { .. } => {
            "Exclude patterns are matched relative to the output directory."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_warning_has_a_hint() {
        let warnings = [
            ConfigWarning::OutputDirMissing { path: "x".into() },
            ConfigWarning::EmptyExtension,
            ConfigWarning::EmptyContentRoot,
            ConfigWarning::ExcludePatternMatchesNothing {
                pattern: "*.htm".into(),
            },
        ];
        for warning in &warnings {
            assert!(!hint(warning).is_empty());
        }
    }
}
