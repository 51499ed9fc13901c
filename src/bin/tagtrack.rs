use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tagtrack", version)]
struct Cli {
    /// Engine configuration JSON (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-run the state rules over every saved asset and report invalid ones.
    Check(InArgs),
    /// Write the project-wide region metadata map.
    Reindex(ReindexArgs),
    /// Print the keyframe asset names of one region.
    Keyframes(KeyframesArgs),
    /// Fill short gaps between keyframes and write the updated project.
    Interpolate(InterpolateArgs),
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input project snapshot JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ReindexArgs {
    /// Input project snapshot JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output region metadata JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct KeyframesArgs {
    /// Input project snapshot JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Region id.
    #[arg(long)]
    region: String,
}

#[derive(Parser, Debug)]
struct InterpolateArgs {
    /// Input project snapshot JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output project snapshot JSON.
    #[arg(long)]
    out: PathBuf,

    /// Only interpolate this region.
    #[arg(long)]
    region: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = read_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Check(args) => cmd_check(args, config),
        Command::Reindex(args) => cmd_reindex(args, config),
        Command::Keyframes(args) => cmd_keyframes(args, config),
        Command::Interpolate(args) => cmd_interpolate(args, config),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<tagtrack::EngineConfig> {
    let Some(path) = path else {
        return Ok(tagtrack::EngineConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    tagtrack::EngineConfig::from_json_str(&s)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn read_project(path: &Path) -> anyhow::Result<tagtrack::ProjectSnapshot> {
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    let r = BufReader::new(f);
    let project: tagtrack::ProjectSnapshot =
        serde_json::from_reader(r).with_context(|| "parse project JSON")?;
    Ok(project)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_check(args: InArgs, config: tagtrack::EngineConfig) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let docs = project.metadata.clone();
    let mut engine = project.into_orchestrator(config)?;

    let mut invalid = 0usize;
    for md in docs {
        let name = md.asset.name.clone();
        let mut current = engine.load(&name)?;
        current.regions = md.regions;
        let out = engine.apply_regions_changed(current)?;
        if !out.is_valid {
            invalid += 1;
            eprintln!("  {name}: region without tags");
        } else if !out.is_step_valid {
            eprintln!("  {name}: missing step label");
        }
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} asset(s) have untagged regions");
    }
    eprintln!("ok");
    Ok(())
}

fn cmd_reindex(args: ReindexArgs, config: tagtrack::EngineConfig) -> anyhow::Result<()> {
    let engine = read_project(&args.in_path)?.into_orchestrator(config)?;
    write_json(&args.out, engine.tracker())
}

fn cmd_keyframes(args: KeyframesArgs, config: tagtrack::EngineConfig) -> anyhow::Result<()> {
    let engine = read_project(&args.in_path)?.into_orchestrator(config)?;
    if engine.tracker().get(&args.region).is_none() {
        anyhow::bail!("unknown region '{}'", args.region);
    }
    for name in engine.keyframe_asset_names(&args.region) {
        println!("{name}");
    }
    Ok(())
}

fn cmd_interpolate(args: InterpolateArgs, config: tagtrack::EngineConfig) -> anyhow::Result<()> {
    let mut engine = read_project(&args.in_path)?.into_orchestrator(config)?;
    let frames = match &args.region {
        Some(region) => engine.interpolate_region(region)?,
        None => engine.interpolate_all()?.frames,
    };
    eprintln!("interpolated {} frame(s)", frames.len());
    write_json(
        &args.out,
        &tagtrack::ProjectSnapshot::from_orchestrator(engine),
    )
}
