// Command dispatch. Each handler writes to `out`; converter failures become
// an inline `Error: ...` line, everything else propagates as an error.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use serde::Serialize;

use doohickey_color::{check_contrast, export, palette, parse_color, ColorFormats};
use doohickey_core::{Capabilities, Convert, ToolId};
use doohickey_diff::{DiffResult, DiffStats, LineSequence};
use doohickey_markup::{HtmlToMarkdown, MarkdownFlavor, MarkdownToHtml};
use doohickey_text::{replace_all, CodecConversion, Direction, TextStats};

use crate::cli::{Command, DiffArgs, ProAction, TextAction, TextArgs};
use crate::input::{text_argument, InputSource};
use crate::output::{self, Styler};
use crate::settings::{save_settings_to, Settings};
use crate::watch::FileWatcher;

pub struct Context {
    pub caps: Capabilities,
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub styler: Styler,
    /// Clear the screen between watch refreshes.
    pub interactive: bool,
}

impl Context {
    pub fn new(settings: Settings, settings_path: Option<PathBuf>, styler: Styler) -> Self {
        Self {
            caps: settings.capabilities(),
            settings,
            settings_path,
            styler,
            interactive: false,
        }
    }
}

fn require(caps: Capabilities, tool: ToolId) -> Result<()> {
    if caps.allows(tool) {
        Ok(())
    } else {
        bail!("{tool} is a Pro tool. Run `doohickey pro enable` to unlock it.")
    }
}

pub fn run(command: Command, ctx: &mut Context, out: &mut impl Write) -> Result<()> {
    log::debug!("running {:?}", command);
    match command {
        Command::Diff(args) => diff(&args, ctx, out),
        Command::Color { input, json } => color(&input, json, ctx, out),
        Command::Contrast {
            foreground,
            background,
            json,
        } => contrast(&foreground, &background, json, ctx, out),
        Command::Palette {
            base,
            harmony,
            export: format,
        } => {
            require(ctx.caps, ToolId::PaletteGenerator)?;
            let base = match parse_color(&base) {
                Ok(base) => base,
                Err(e) => return converter_output(ctx, out, &e.sentinel()),
            };
            let colors = palette(base, harmony.unwrap_or(ctx.settings.default_harmony));
            match format {
                Some(format) => writeln!(out, "{}", export(&colors, format))?,
                None => writeln!(out, "{}", output::palette_list(&ctx.styler, &colors))?,
            }
            Ok(())
        }
        Command::HtmlToMarkdown { file } => {
            let source = InputSource::detect(file.as_deref())?.read()?;
            converter_output(ctx, out, &HtmlToMarkdown.convert_inline(&source))
        }
        Command::MarkdownToHtml { file, commonmark } => {
            let source = InputSource::detect(file.as_deref())?.read()?;
            let flavor = if commonmark {
                MarkdownFlavor::CommonMark
            } else {
                ctx.settings.markdown_flavor
            };
            let html = MarkdownToHtml { flavor }.convert_inline(&source);
            converter_output(ctx, out, html.trim_end())
        }
        Command::Encode { codec, input } => {
            let text = text_argument(input)?;
            let conversion = CodecConversion {
                codec,
                direction: Direction::Encode,
            };
            converter_output(ctx, out, &conversion.convert_inline(&text))
        }
        Command::Decode { codec, input } => {
            let text = text_argument(input)?;
            let conversion = CodecConversion {
                codec,
                direction: Direction::Decode,
            };
            converter_output(ctx, out, &conversion.convert_inline(&text))
        }
        Command::Text(args) => text(args, ctx, out),
        Command::Stats { input } => {
            let text = text_argument(input)?;
            writeln!(out, "{}", output::text_stats(&ctx.styler, &TextStats::of(&text)))?;
            Ok(())
        }
        Command::Tools { tool } => {
            let text = match tool {
                Some(tool) => output::tool_detail(&ctx.styler, &ctx.caps, tool),
                None => output::tool_list(&ctx.styler, &ctx.caps),
            };
            writeln!(out, "{text}")?;
            Ok(())
        }
        Command::Pro { action } => pro(action, ctx, out),
    }
}

fn converter_output(ctx: &Context, out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", output::converter_line(&ctx.styler, text))?;
    Ok(())
}

// ──────────────────────────────────────────────
// Diff
// ──────────────────────────────────────────────

#[derive(Serialize)]
struct DiffReport<'a> {
    stats: DiffStats,
    ops: &'a DiffResult,
}

fn render_diff(
    args: &DiffArgs,
    styler: &Styler,
    out: &mut impl Write,
    original: &str,
    modified: &str,
) -> Result<()> {
    let result = doohickey_diff::diff(original, modified);
    let stats = result.stats();

    if args.json {
        let report = DiffReport {
            stats,
            ops: &result,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if args.stats_only {
        writeln!(out, "{}", output::diff_summary(styler, &stats))?;
    } else {
        let body = if args.side_by_side {
            output::diff_side_by_side(styler, result.ops())
        } else {
            output::diff_gutter(styler, result.ops())
        };
        writeln!(out, "{body}")?;
        writeln!(out, "{}", output::diff_summary(styler, &stats))?;
    }
    Ok(())
}

/// Refuse inputs whose LCS table would hold more than `max_cells` cells.
fn check_table_size(original: &str, modified: &str, max_cells: u64) -> Result<()> {
    let old_lines = LineSequence::split(original).len();
    let new_lines = LineSequence::split(modified).len();
    match (old_lines as u64).checked_mul(new_lines as u64) {
        Some(cells) if cells <= max_cells => Ok(()),
        _ => bail!(
            "Inputs too large to diff: {old_lines} x {new_lines} lines exceeds the limit of \
             {max_cells} table cells (raise max_diff_cells in the settings file)"
        ),
    }
}

fn diff(args: &DiffArgs, ctx: &Context, out: &mut impl Write) -> Result<()> {
    require(ctx.caps, ToolId::DiffChecker)?;

    let old = InputSource::from_arg(&args.old);
    let new = InputSource::from_arg(&args.new);
    if old == InputSource::Stdin && new == InputSource::Stdin {
        bail!("Only one side of a diff can be read from stdin");
    }

    let max_cells = ctx.settings.max_diff_cells;
    let (original, modified) = (old.read()?, new.read()?);
    check_table_size(&original, &modified, max_cells)?;
    render_diff(args, &ctx.styler, out, &original, &modified)?;

    if !args.watch {
        return Ok(());
    }

    let (Some(old_path), Some(new_path)) = (old.path(), new.path()) else {
        bail!("--watch requires file input on both sides");
    };
    let mut watcher = FileWatcher::new(&[old_path.as_path(), new_path.as_path()])?;
    log::info!("watching {} and {}", old_path.display(), new_path.display());

    while watcher.wait_for_change() {
        let (original, modified) = match (old.read(), new.read()) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("skipping refresh: {:#}", e);
                continue;
            }
        };
        if let Err(e) = check_table_size(&original, &modified, max_cells) {
            log::warn!("skipping refresh: {:#}", e);
            continue;
        }
        if ctx.interactive {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        } else {
            writeln!(out)?;
        }
        render_diff(args, &ctx.styler, out, &original, &modified)?;
        out.flush()?;
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Color
// ──────────────────────────────────────────────

fn color(input: &str, json: bool, ctx: &Context, out: &mut impl Write) -> Result<()> {
    let rgb = match parse_color(input) {
        Ok(rgb) => rgb,
        Err(e) => return converter_output(ctx, out, &e.sentinel()),
    };
    let formats = ColorFormats::from_rgb(rgb);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&formats)?)?;
    } else {
        writeln!(out, "{}", output::color_table(&ctx.styler, rgb, &formats))?;
    }
    Ok(())
}

fn contrast(
    foreground: &str,
    background: &str,
    json: bool,
    ctx: &Context,
    out: &mut impl Write,
) -> Result<()> {
    let report = match check_contrast(foreground, background) {
        Ok(report) => report,
        Err(e) => return converter_output(ctx, out, &e.sentinel()),
    };
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", output::contrast_report(&ctx.styler, &report))?;
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Text
// ──────────────────────────────────────────────

fn text(args: TextArgs, ctx: &Context, out: &mut impl Write) -> Result<()> {
    let input = text_argument(args.input)?;
    let result = match args.action {
        TextAction::Transform(transform) => transform.convert_inline(&input),
        TextAction::Replace => {
            let find = args.find.context("`text replace` needs --find")?;
            replace_all(&input, &find, &args.replacement)
        }
    };
    converter_output(ctx, out, &result)
}

// ──────────────────────────────────────────────
// Pro flag
// ──────────────────────────────────────────────

fn pro(action: ProAction, ctx: &mut Context, out: &mut impl Write) -> Result<()> {
    let enable = match action {
        ProAction::Status => {
            let state = if ctx.caps.pro { "enabled" } else { "disabled" };
            writeln!(out, "Pro: {state}")?;
            if let Some(path) = &ctx.settings_path {
                writeln!(out, "{}", ctx.styler.dim(&format!("settings: {}", path.display())))?;
            }
            return Ok(());
        }
        ProAction::Enable => true,
        ProAction::Disable => false,
    };

    let path = ctx
        .settings_path
        .clone()
        .context("Cannot determine settings path")?;
    ctx.settings.pro = enable;
    save_settings_to(&ctx.settings, &path)?;
    ctx.caps = ctx.settings.capabilities();
    writeln!(out, "Pro {}", if enable { "enabled" } else { "disabled" })?;
    Ok(())
}
