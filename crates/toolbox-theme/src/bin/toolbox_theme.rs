//! Command line front end for the theme preference.
//!
//! ```text
//! toolbox-theme list            # registered themes with swatches
//! toolbox-theme current         # selected and effective theme
//! toolbox-theme set forest      # persist a selection
//! toolbox-theme css [--theme ID]  # :root rule for the effective theme
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::Style;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use toolbox_theme::{
    pad_to_width, rgb_to_ansi256, ColorRole, RootSnapshot, SystemAppearance, ThemeApplier,
    ThemeChange, ThemeConfig, ThemeContext, ThemeDescriptor, ThemePreference,
};

#[derive(Parser)]
#[command(name = "toolbox-theme", about = "Inspect and change the mini toolbox theme")]
struct Cli {
    /// Preference file to use instead of the one in the config directory
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List registered themes
    List,
    /// Show the selected and effective theme
    Current,
    /// Select and persist a theme
    Set {
        /// Theme id, or "auto" to follow the system
        id: String,
    },
    /// Print the CSS custom properties of the effective theme
    Css {
        /// Render this theme instead of the stored selection
        #[arg(long)]
        theme: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, SystemAppearance::detect(), &mut stdout.lock())
}

fn run(cli: Cli, appearance: SystemAppearance, out: &mut impl Write) -> Result<()> {
    let config = ThemeConfig {
        storage_path: cli.file,
        ..ThemeConfig::default()
    };
    let mut ctx = ThemeContext::builder()
        .config(config)
        .appearance(appearance)
        .build()
        .context("failed to build theme context")?;

    match cli.command.unwrap_or(Command::Current) {
        Command::List => list(&ctx, out),
        Command::Current => current(&ctx, out),
        Command::Set { id } => {
            if !ctx.set_theme(&id) {
                let known: Vec<_> = ctx.themes().ids().collect();
                bail!("unknown theme '{}' (known: {})", id, known.join(", "));
            }
            current(&ctx, out)
        }
        Command::Css { theme } => css(&ctx, theme.as_deref(), out),
    }
}

fn swatches(theme: &ThemeDescriptor) -> String {
    let Some(palette) = theme.palette() else {
        return String::new();
    };
    palette
        .iter()
        .map(|(_, color)| {
            Style::new()
                .color256(rgb_to_ansi256(color.rgb()))
                .apply_to("██")
                .to_string()
        })
        .collect()
}

fn list(ctx: &ThemeContext, out: &mut impl Write) -> Result<()> {
    let selected = ctx.current_theme_id();
    let name_width = ctx
        .themes()
        .iter()
        .map(|t| t.name().width())
        .max()
        .unwrap_or(0);
    for theme in ctx.themes() {
        let marker = if theme.id() == selected { "*" } else { " " };
        writeln!(
            out,
            "{} {} {} {} {}",
            marker,
            pad_to_width(theme.icon(), 2),
            pad_to_width(theme.id(), 8),
            pad_to_width(theme.name(), name_width),
            swatches(theme),
        )?;
    }
    Ok(())
}

fn current(ctx: &ThemeContext, out: &mut impl Write) -> Result<()> {
    let theme = ctx.current_theme();
    let bold = Style::new().bold();
    writeln!(out, "selected:  {}", bold.apply_to(ctx.current_theme_id()))?;
    writeln!(
        out,
        "effective: {} {} ({})",
        theme.icon(),
        bold.apply_to(theme.id()),
        theme.name()
    )?;
    if let Some(primary) = theme.color(ColorRole::Primary) {
        writeln!(out, "primary:   {}", primary)?;
    }
    writeln!(
        out,
        "system:    {}",
        if ctx.system_prefers_dark() { "dark" } else { "light" }
    )?;
    Ok(())
}

fn css(ctx: &ThemeContext, theme: Option<&str>, out: &mut impl Write) -> Result<()> {
    let change = match theme {
        Some(id) if !ctx.themes().contains(id) => bail!("unknown theme '{}'", id),
        Some(id) => ThemeChange::new(
            ctx.themes(),
            ThemePreference::from_id(id),
            ctx.system_prefers_dark(),
        ),
        None => ctx.snapshot(),
    };
    let mut applier = ThemeApplier::new(RootSnapshot::new());
    applier.apply(&change);
    write!(out, "{}", applier.into_root().to_css())?;
    Ok(())
}
