//! Implementation of `sift inspect`.

use std::{fs, path::Path, process::ExitCode};

use sift_config::Config;
use sift_document::{PageExtractor, route_for};
use sift_extract::extract_options;

use crate::cli::{
    args::InspectCommand,
    context::CommandContext,
    output::{render_page_detail, to_json},
};

/// Runs the page extractor on one file and prints its sections.
pub fn run(ctx: &CommandContext, cmd: &InspectCommand) -> ExitCode {
    let path = ctx.resolve(Some(cmd.file.as_path()));

    if !path.is_file() {
        eprintln!("error: file not found: {}", cmd.file.display());
        return ExitCode::FAILURE;
    }

    let html = match fs::read_to_string(&path) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let extractor = match PageExtractor::new(&extract_options(&ctx.config)) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let route = inspect_route(&ctx.config, &ctx.cwd, &path);
    let Some(page) = extractor.extract(&html, route) else {
        eprintln!(
            "error: no <{}> element found in {}",
            extractor.content_root(),
            path.display()
        );
        return ExitCode::FAILURE;
    };

    if cmd.output.json {
        match to_json(&page) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_page_detail(&page));
    }

    ExitCode::SUCCESS
}

/// Routes a file inside the configured output directory as `extract` would; anything else is
/// routed by its file stem.
fn inspect_route(config: &Config, cwd: &Path, path: &Path) -> String {
    config
        .output_dir(cwd)
        .ok()
        .and_then(|dir| route_for(path, &dir))
        .unwrap_or_else(|| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("/{stem}")
        })
}
