use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

use wado_core::{
    analyze, convert, generate, load_settings, ConvertSettings, GenerateSettings, Result,
    WadError,
};

#[derive(Debug, Parser)]
#[command(name = "wado", version, about = "Doom WAD converter and episode randomiser")]
struct Cli {
    /// Log per-level detail as well as progress.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a Doom archive so it plays in Doom II.
    Convert(ConvertArgs),
    /// Compose a new nine-level episode from a directory of archives.
    Generate(GenerateArgs),
    /// Print the header and level list of an archive.
    Analyze {
        path: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct ConvertArgs {
    #[arg(long, required_unless_present = "config")]
    input: Option<PathBuf>,

    #[arg(long, required_unless_present = "config")]
    output: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; flags given on the command line win.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long, required_unless_present = "config")]
    input_dir: Option<PathBuf>,

    #[arg(long, required_unless_present = "config")]
    output: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Pool Doom (E#M#) levels too, converting them first.
    #[arg(long)]
    convert_doom1: bool,

    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn setup_logging(verbose: bool) -> std::result::Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn missing(flag: &str) -> WadError {
    WadError::Config(format!("--{flag} is required when the config file does not set it"))
}

fn pick_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!("using seed {}", seed);
    seed
}

fn convert_settings(args: ConvertArgs) -> Result<ConvertSettings> {
    let base: Option<ConvertSettings> = args
        .config
        .as_deref()
        .map(|path| load_settings(path))
        .transpose()?;

    let input_path = args
        .input
        .or_else(|| base.as_ref().map(|s| s.input_path.clone()))
        .ok_or_else(|| missing("input"))?;
    let output_path = args
        .output
        .or_else(|| base.as_ref().map(|s| s.output_path.clone()))
        .ok_or_else(|| missing("output"))?;
    let seed = pick_seed(args.seed.or(base.map(|s| s.seed)));

    Ok(ConvertSettings {
        seed,
        input_path,
        output_path,
    })
}

fn generate_settings(args: GenerateArgs) -> Result<GenerateSettings> {
    let base: Option<GenerateSettings> = args
        .config
        .as_deref()
        .map(|path| load_settings(path))
        .transpose()?;

    let input_dir = args
        .input_dir
        .or_else(|| base.as_ref().map(|s| s.input_dir.clone()))
        .ok_or_else(|| missing("input-dir"))?;
    let output_path = args
        .output
        .or_else(|| base.as_ref().map(|s| s.output_path.clone()))
        .ok_or_else(|| missing("output"))?;
    let convert_doom1_levels =
        args.convert_doom1 || base.as_ref().map_or(false, |s| s.convert_doom1_levels);
    let seed = pick_seed(args.seed.or(base.map(|s| s.seed)));

    Ok(GenerateSettings {
        seed,
        input_dir,
        output_path,
        convert_doom1_levels,
    })
}

fn print_summary(path: &Path, json: bool) -> Result<()> {
    let summary = analyze(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", path.display());
    println!("  identifier:       {}", summary.identifier);
    println!("  lumps:            {}", summary.lump_count);
    println!("  directory offset: {}", summary.directory_offset);
    println!("  levels:           {}", summary.levels.len());
    for level in &summary.levels {
        println!(
            "    {:<6} {:<24} {:>5} things {:>5} lines{}",
            level.name,
            level.title,
            level.things,
            level.linedefs,
            if level.secret_exit { "  [secret exit]" } else { "" }
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => convert(&convert_settings(args)?),
        Command::Generate(args) => generate(&generate_settings(args)?),
        Command::Analyze { path, json } => print_summary(&path, json),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialise logging: {err}");
    }

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
