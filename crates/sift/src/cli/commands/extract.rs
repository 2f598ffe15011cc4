//! Implementation of `sift extract`.

use std::process::ExitCode;

use sift_config::Config;
use sift_extract::{SiteConfig, extract_site};
use tokio::runtime::Builder;

use crate::cli::{
    args::ExtractCommand,
    context::{CommandContext, load_config_or_failure},
    output::{render_page, render_summary, to_json},
};

/// Extracts every page under the site's output directory and prints the result set.
pub fn run(ctx: &CommandContext, cmd: &ExtractCommand) -> ExitCode {
    let site_root = ctx.resolve(cmd.root.as_deref());

    // A site root other than the working directory brings its own configuration.
    let mut config = if cmd.root.is_some() {
        match load_config_or_failure(&site_root) {
            Ok(config) => config,
            Err(code) => return code,
        }
    } else {
        ctx.config.clone()
    };
    apply_overrides(&mut config, cmd);

    let site = match SiteConfig::from_config(&config, &site_root) {
        Ok(site) => site,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut report = match runtime.block_on(extract_site(&site)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.sort {
        report.sort_by_route();
    }

    if cmd.output.json {
        match to_json(&report.pages) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for page in &report.pages {
            print!("{}", render_page(page));
        }
        if !report.pages.is_empty() {
            println!();
        }
        println!("{}", render_summary(&report));
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        eprintln!("error: {} pages could not be read", report.failures.len());
        ExitCode::FAILURE
    }
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, cmd: &ExtractCommand) {
    if let Some(ref dir) = cmd.output_dir {
        config.source.output_dir.clone_from(dir);
    }
    if let Some(ref selector) = cmd.content_root {
        config.extract.content_root.clone_from(selector);
    }
    if cmd.fail_fast {
        config.batch.fail_fast = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = Config::default();
        let cmd = ExtractCommand {
            output_dir: Some("out".into()),
            content_root: Some("article".into()),
            fail_fast: true,
            ..ExtractCommand::default()
        };

        apply_overrides(&mut config, &cmd);

        assert_eq!(config.source.output_dir, "out");
        assert_eq!(config.extract.content_root, "article");
        assert!(config.batch.fail_fast);
    }

    #[test]
    fn absent_overrides_keep_config() {
        let mut config = Config::default();
        config.batch.fail_fast = true;

        apply_overrides(&mut config, &ExtractCommand::default());

        assert_eq!(config.source.output_dir, ".next/server/app");
        assert!(config.batch.fail_fast);
    }
}
