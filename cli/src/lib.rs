pub mod error;
pub mod play;

use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use lexapprox_core::Config;
use lexapprox_core::EmbeddingSpace;
use lexapprox_core::ModelCatalog;
use lexapprox_core::Session;
use lexapprox_persistence::ResultsExporter;
use lexapprox_persistence::ResultsReport;
use lexapprox_plot::render_trajectory;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::error::Result;
use crate::play::Outcome;

/// Guess the word you are thinking of by walking an embedding space
#[derive(Parser, Debug)]
#[command(name = "lexapprox", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config_dir>/lexapprox/config.toml)
    #[arg(long, global = true, env = "LEXAPPROX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the configured models
    Models,
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Id of a configured model (defaults to the first one)
    #[arg(long, conflicts_with = "vectors")]
    pub model: Option<u32>,

    /// Word-vector file to play on instead of a configured model
    #[arg(long)]
    pub vectors: Option<PathBuf>,

    /// Seed for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the similarity chart after the reveal
    #[arg(long, default_value = "result_plot.png")]
    pub chart: PathBuf,

    /// Also write the full results directory
    #[arg(long)]
    pub export: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on, overriding the config
    #[arg(long)]
    pub bind: Option<String>,

    /// Worker threads, overriding the config
    #[arg(long)]
    pub workers: Option<usize>,
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(Config::default_path, Path::to_path_buf);
    Ok(Config::load(&path)?)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Models => list_models(&config, &mut io::stdout().lock()),
        Command::Play(args) => run_play(&config, &args),
        Command::Serve(args) => run_serve(config, &args),
    }
}

fn list_models<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    if config.models.is_empty() {
        return Err(CliError::NoModels);
    }
    for spec in &config.models {
        writeln!(out, "{:>3}  {} ({})", spec.id, spec.name, spec.item_name)?;
        writeln!(out, "     {}", spec.description)?;
        writeln!(out, "     file: {}", config.model_file(spec).display())?;
    }
    Ok(())
}

fn resolve_space(config: &Config, args: &PlayArgs) -> Result<Arc<EmbeddingSpace>> {
    let path = match (&args.vectors, args.model) {
        (Some(path), _) => path.clone(),
        (None, Some(id)) => {
            let spec = config
                .models
                .iter()
                .find(|m| m.id == id)
                .ok_or(CliError::UnknownModel(id))?;
            config.model_file(spec)
        }
        (None, None) => {
            let spec = config.models.first().ok_or(CliError::NoModels)?;
            config.model_file(spec)
        }
    };
    Ok(Arc::new(EmbeddingSpace::load(&path)?))
}

fn run_play(config: &Config, args: &PlayArgs) -> Result<()> {
    let space = resolve_space(config, args)?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = Session::with_config(space, rng, config.engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let Outcome::Revealed(analytics) = play::play(&mut session, stdin.lock(), &mut stdout)? else {
        return Ok(());
    };

    let chart = render_trajectory(&analytics)?;
    std::fs::write(&args.chart, &chart)?;
    println!("Chart written to {}", args.chart.display());

    if args.export {
        let report = ResultsReport::from_session(&session, Local::now().fixed_offset())?;
        let dir = ResultsExporter::new(&config.export.results_dir).export(&report, &chart)?;
        println!("Results saved to {}", dir.display());
    }
    Ok(())
}

fn run_serve(mut config: Config, args: &ServeArgs) -> Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(workers) = args.workers {
        config.server.workers = workers;
    }
    config.validate()?;
    let catalog = ModelCatalog::load(&config)?;
    info!(models = catalog.len(), "models loaded");
    lexapprox_server::run_server(&config, catalog)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_play_flags() {
        let cli = Cli::try_parse_from(["lexapprox", "-vv", "play", "--model", "1", "--seed", "9", "--export"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.model, Some(1));
        assert_eq!(args.seed, Some(9));
        assert!(args.export);
        assert_eq!(args.chart, PathBuf::from("result_plot.png"));
    }

    #[test]
    fn model_and_vectors_conflict() {
        let parsed = Cli::try_parse_from(["lexapprox", "play", "--model", "0", "--vectors", "v.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn lists_default_models() {
        let mut out = Vec::new();
        list_models(&Config::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(word)"));
        assert!(text.contains("(symptom)"));
    }

    #[test]
    fn resolves_vectors_and_unknown_models() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("v.txt");
        std::fs::write(&file, "2 2\na 1 0\nb 0 1\n").unwrap();
        let config = Config::default();

        let args = PlayArgs {
            model: None,
            vectors: Some(file),
            seed: None,
            chart: PathBuf::from("chart.png"),
            export: false,
        };
        assert_eq!(resolve_space(&config, &args).unwrap().len(), 2);

        let args = PlayArgs {
            model: Some(42),
            vectors: None,
            ..args
        };
        assert!(matches!(
            resolve_space(&config, &args),
            Err(CliError::UnknownModel(42))
        ));
    }
}
