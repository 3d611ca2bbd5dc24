use std::{
    io::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardfx", version)]
struct Cli {
    /// Engine config JSON (catalog/preset paths, compositor options).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effect catalog.
    Effects,
    /// Print the preset gallery.
    Presets,
    /// Print the lighting descriptor for a pointer position.
    Lighting(LightingArgs),
    /// Print the layer list for a set of effect values.
    Compose(ComposeArgs),
    /// Check effect values against the catalog.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct LightingArgs {
    /// Pointer x in `0..=1`.
    #[arg(long)]
    x: f64,

    /// Pointer y in `0..=1`.
    #[arg(long)]
    y: f64,

    /// Treat the pointer as outside the card.
    #[arg(long)]
    no_hover: bool,

    /// Compute with lighting switched off.
    #[arg(long)]
    disabled: bool,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Effect values JSON.
    #[arg(long = "values")]
    values_path: Option<PathBuf>,

    /// Preset id to apply before `--values` edits.
    #[arg(long)]
    preset: Option<String>,

    /// Pointer x in `0..=1`; lighting is off without a pointer.
    #[arg(long, requires = "y")]
    x: Option<f64>,

    /// Pointer y in `0..=1`.
    #[arg(long, requires = "x")]
    y: Option<f64>,

    /// Clip layers to the card frame.
    #[arg(long)]
    frame: bool,

    /// Card JSON; prints the full card frame instead of bare layers.
    #[arg(long)]
    card: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Effect values JSON.
    #[arg(long = "values")]
    values_path: PathBuf,

    /// Print the repaired values instead of failing.
    #[arg(long)]
    repair: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Effects => cmd_effects(&config),
        Command::Presets => cmd_presets(&config),
        Command::Lighting(args) => cmd_lighting(args),
        Command::Compose(args) => cmd_compose(&config, args),
        Command::Validate(args) => cmd_validate(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<cardfx::EngineConfig> {
    match path {
        Some(p) => cardfx::EngineConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(cardfx::EngineConfig::default()),
    }
}

fn load_registry(config: &cardfx::EngineConfig) -> anyhow::Result<Arc<cardfx::EffectRegistry>> {
    let registry = config.load_registry().context("load effect catalog")?;
    Ok(Arc::new(registry))
}

fn read_values(path: &Path) -> anyhow::Result<cardfx::EffectValues> {
    cardfx::EffectValues::from_path(path)
        .with_context(|| format!("read effect values '{}'", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_effects(config: &cardfx::EngineConfig) -> anyhow::Result<()> {
    let registry = load_registry(config)?;
    let json = registry.to_json_pretty()?;
    println!("{json}");
    Ok(())
}

fn cmd_presets(config: &cardfx::EngineConfig) -> anyhow::Result<()> {
    let registry = load_registry(config)?;
    let presets = config.load_presets(&registry).context("load presets")?;
    println!("{}", presets.to_json_pretty()?);
    Ok(())
}

fn cmd_lighting(args: LightingArgs) -> anyhow::Result<()> {
    let pointer = cardfx::PointerState::new(args.x, args.y, !args.no_hover)
        .sanitized()
        .context("pointer coordinates must be finite")?;
    print_json(&cardfx::compute_lighting(pointer, !args.disabled))
}

fn cmd_compose(config: &cardfx::EngineConfig, args: ComposeArgs) -> anyhow::Result<()> {
    let registry = load_registry(config)?;
    let mut session = cardfx::EffectSession::with_config(Arc::clone(&registry), config);
    if args.frame {
        session.compositor_mut().options_mut().apply_to_frame = true;
    }

    if let Some(id) = &args.preset {
        let presets = config.load_presets(&registry).context("load presets")?;
        let preset = presets
            .get(id)
            .with_context(|| format!("unknown preset '{id}'"))?;
        session.apply_preset(preset);
    }

    if let Some(path) = &args.values_path {
        let values = read_values(path)?;
        for (effect, param, value) in values.entries() {
            let outcome = session.set_parameter(effect, param, value.clone());
            tracing::debug!(effect, param, ?outcome, "applied value");
        }
    }

    if let (Some(x), Some(y)) = (args.x, args.y) {
        session.update_pointer(0, cardfx::PointerState::new(x, y, true));
    }

    match &args.card {
        Some(path) => {
            let card = cardfx::Card::from_path(path)
                .with_context(|| format!("read card '{}'", path.display()))?;
            print_json(&session.frame(&card))
        }
        None => print_json(&session.layers()),
    }
}

fn cmd_validate(config: &cardfx::EngineConfig, args: ValidateArgs) -> anyhow::Result<()> {
    let registry = load_registry(config)?;
    let mut values = read_values(&args.values_path)?;

    if args.repair {
        let report = cardfx::repair(&registry, &mut values);
        eprintln!(
            "rebuilt {}, removed {}, added {}",
            report.rebuilt_effects.len(),
            report.removed_effects.len(),
            report.added_effects.len()
        );
        return print_json(&values);
    }

    let issues = cardfx::validate(&registry, &values);
    print_json(&issues)?;
    if !issues.is_empty() {
        anyhow::bail!("{} issue(s) in '{}'", issues.len(), args.values_path.display());
    }
    Ok(())
}
