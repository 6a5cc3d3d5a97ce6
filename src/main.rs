use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ferrite_rbm::driver::ConsoleObserver;
use ferrite_rbm::report::{format_vector, header, render_state};
use ferrite_rbm::train::NoopObserver;
use ferrite_rbm::{train_loop, Rbm, RunConfig, StepObserver, TrainConfig};

/// ferrite-rbm: train a restricted boltzmann machine with single-step contrastive divergence.
#[derive(Parser, Debug)]
#[command(name = "ferrite-rbm", version, about)]
struct Cli {
    /// JSON run config; fields it omits keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of hidden units.
    #[arg(long = "num-hidden", alias = "numHidden")]
    num_hidden: Option<usize>,
    /// Step size of the weight update.
    #[arg(long = "learning-rate", alias = "learningRate", allow_negative_numbers = true)]
    learning_rate: Option<f64>,
    /// Number of passes over the training set.
    #[arg(long)]
    epochs: Option<usize>,
    /// Seed for weight initialisation and sampling.
    #[arg(long)]
    seed: Option<u64>,
    /// Pause after every training milestone.
    #[arg(long)]
    interactive: bool,
    /// Print the final weights as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ferrite_rbm::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::load_json(&path.to_string_lossy())?,
        None => RunConfig::default(),
    };

    if let Some(n) = cli.num_hidden {
        cfg.num_hidden = n;
    }
    if let Some(lr) = cli.learning_rate {
        cfg.learning_rate = lr;
    }
    if let Some(e) = cli.epochs {
        cfg.epochs = e;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    cfg.interactive |= cli.interactive;

    let data = cfg.validate()?;

    let num_visible = data.width();
    let mut rbm = match cfg.seed {
        Some(seed) => Rbm::with_seed(num_visible, cfg.num_hidden, cfg.learning_rate, seed)?,
        None => Rbm::from_entropy(num_visible, cfg.num_hidden, cfg.learning_rate)?,
    };
    info!(seed = rbm.seed(), "pass --seed {} to replay this run", rbm.seed());

    let stdout = std::io::stdout();
    if !cli.json {
        let mut out = stdout.lock();
        write!(out, "{}", render_state(&rbm))?;
        write!(out, "{}", header("Initializing training data"))?;
        for row in data.iter() {
            writeln!(out, "{}", format_vector(row))?;
        }
    }

    let train_config = if cfg.interactive {
        TrainConfig::interactive(cfg.epochs)
    } else {
        TrainConfig::new(cfg.epochs)
    };

    let mut noop = NoopObserver;
    let mut console;
    let observer: &mut dyn StepObserver = if cfg.interactive {
        console = ConsoleObserver::new(std::io::stdin().lock(), std::io::stdout());
        &mut console
    } else {
        &mut noop
    };

    if let Some(stats) = train_loop(&mut rbm, &data, &train_config, observer)? {
        info!(
            epochs = stats.epoch,
            reconstruction_error = stats.reconstruction_error,
            "training complete"
        );
    }

    let mut out = stdout.lock();
    if cli.json {
        let json = serde_json::to_string_pretty(&rbm.snapshot())?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", header(&format!("Trained network ({} epochs)", cfg.epochs)))?;
        write!(out, "{}", render_state(&rbm))?;
    }

    Ok(())
}
