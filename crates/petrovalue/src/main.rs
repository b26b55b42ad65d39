use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;
use petrovalue::{init_logging, load_parameters, params, text_summary, to_json};
use petrovalue_core::analysis::{DEFAULT_SAMPLES, MonteCarloConfig};
use petrovalue_core::{RunOptions, run};

#[derive(Parser, Debug)]
#[command(name = "petrovalue")]
#[command(about = "Economic evaluation of oil & gas field developments")]
struct Args {
    /// Parameter file (YAML, or JSON with a .json extension); defaults when omitted
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seed for reproducible Monte Carlo sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of Monte Carlo samples
    #[arg(long)]
    samples: Option<usize>,

    /// Skip the tornado analysis
    #[arg(long)]
    no_tornado: bool,

    /// Skip Monte Carlo sampling
    #[arg(long)]
    no_monte_carlo: bool,

    /// Print the full results as JSON
    #[arg(long)]
    json: bool,

    /// Print the default parameters as YAML and exit
    #[arg(long)]
    print_defaults: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        let mut options = RunOptions::default();
        if self.no_tornado {
            options.tornado = None;
        }
        options.monte_carlo = if self.no_monte_carlo {
            None
        } else {
            Some(MonteCarloConfig {
                samples: self.samples.unwrap_or(DEFAULT_SAMPLES),
                seed: self.seed,
                ..Default::default()
            })
        };
        options
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    if args.print_defaults {
        print!("{}", params::to_yaml(&Default::default())?);
        return Ok(());
    }

    let parameters = load_parameters(args.params.as_deref())?;
    let options = args.run_options();

    tracing::info!(
        tornado = options.tornado.is_some(),
        monte_carlo = options.monte_carlo.is_some(),
        "running evaluation"
    );
    let results = run(&parameters, &options);

    if args.json {
        println!("{}", to_json(&results)?);
    } else {
        print!("{}", text_summary(&results));
    }

    match results.error {
        Some(error) => {
            tracing::error!(%error, "evaluation failed");
            Err(eyre!(error))
        }
        None => Ok(()),
    }
}
