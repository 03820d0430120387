// Doohickey: command-line front end for the developer utilities.
// Wires settings, capabilities, input sources and terminal output together.

mod cli;
mod commands;
mod input;
mod output;
mod settings;
mod watch;


use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use commands::Context;
use output::Styler;
use settings::ColorChoice;

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn use_color(no_color: bool, choice: ColorChoice, is_terminal: bool) -> bool {
    if no_color {
        return false;
    }
    match choice {
        ColorChoice::Auto => is_terminal,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = settings::load_settings();
    let is_terminal = io::stdout().is_terminal();
    let styler = Styler::new(use_color(cli.no_color, settings.color, is_terminal));

    let mut ctx = Context::new(settings, settings::settings_path(), styler);
    ctx.interactive = is_terminal;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &mut ctx, &mut out)?;
    out.flush()?;
    Ok(())
}
