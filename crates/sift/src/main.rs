//! Command-line interface for `sift`.

use std::process::ExitCode;

use sift::cli::{args::parse_cli, commands, context::CommandContext, logging::init_tracing};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_tracing();

    let ctx = if cli.command.requires_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
