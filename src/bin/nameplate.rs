use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nameplate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every asset once and print the validation report.
    Warm(WarmArgs),
    /// Render a name as PNG files.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct WarmArgs {
    /// Engine configuration JSON. Relative asset paths resolve against its folder.
    #[arg(long)]
    config: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Engine configuration JSON. Relative asset paths resolve against its folder.
    #[arg(long)]
    config: PathBuf,

    /// Name to render.
    #[arg(long)]
    name: String,

    /// Render one image per prefix instead of a single image.
    #[arg(long)]
    progressive: bool,

    /// Output folder (defaults to `paths.output` from the config).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Warm(args) => cmd_warm(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn config_root(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Engine rooted at the config file's folder, plus the config's own diagnostics.
fn load_engine(
    config_path: &Path,
) -> anyhow::Result<(nameplate::Engine, Vec<nameplate::Diagnostic>)> {
    let (config, warnings) = nameplate::EngineConfig::from_path(config_path)
        .with_context(|| format!("load config '{}'", config_path.display()))?;
    let source = nameplate::FsSource::new(config_root(config_path));
    Ok((nameplate::Engine::new(config, source), warnings))
}

fn cmd_warm(args: WarmArgs) -> anyhow::Result<()> {
    let (engine, config_warnings) = load_engine(&args.config)?;
    let report = engine.warm_cache();

    if args.json {
        for w in &config_warnings {
            eprintln!("warning: {w}");
        }
        let s = serde_json::to_string_pretty(report).context("serialize cache report")?;
        println!("{s}");
        return Ok(());
    }

    println!("assets loaded: {}", report.total_assets_loaded);
    for f in &report.findings {
        let status = if f.satisfied { "ok" } else { "MISSING" };
        println!(
            "  {:<20} {:>3}/{:<3} {status}",
            format!("{:?}", f.check),
            f.found,
            f.expected
        );
        if !f.satisfied {
            println!("    missing: {}", f.missing.join(", "));
        }
    }
    for w in config_warnings.iter().chain(&report.load_warnings) {
        println!("  warning: {w}");
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (engine, mut warnings) = load_engine(&args.config)?;
    let out_dir = args
        .out
        .unwrap_or_else(|| config_root(&args.config).join(&engine.config().output_dir));
    let mut sink = nameplate::PngDirSink::new(&out_dir);

    let outputs = if args.progressive {
        let r = engine.render_progressive(&args.name, &mut sink)?;
        warnings.extend(r.warnings);
        r.outputs
    } else {
        let r = engine.render_single(&args.name, &mut sink)?;
        warnings.extend(r.warnings);
        r.output.into_iter().collect::<Vec<_>>()
    };

    for id in &outputs {
        println!("{id}");
    }
    if outputs.is_empty() {
        eprintln!("nothing rendered for '{}'", args.name);
    } else {
        eprintln!("wrote {} image(s) to {}", outputs.len(), out_dir.display());
    }
    if !warnings.is_empty() {
        eprintln!("{} warning(s)", warnings.len());
        for w in &warnings {
            eprintln!("  {w}");
        }
    }
    Ok(())
}
