use anyhow::Result;
use clap::{Parser, Subcommand};
use evodrive_core::config::AppConfig;
use evodrive_core::init_logging;
use evodrive_data::GenerationSummary;
use evodrive_lib::app;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evolve policies on the headless track
    Train {
        /// Number of generations to complete
        #[arg(short, long, default_value_t = 50)]
        generations: u64,

        /// Simulated seconds per tick
        #[arg(short, long, default_value_t = 0.02)]
        tick: f64,
    },
    /// Run one trial with a stored generation's best weights
    Replay {
        /// Generation to load; the latest stored one when omitted
        #[arg(short, long)]
        generation: Option<u64>,

        #[arg(short, long, default_value_t = 0.02)]
        tick: f64,
    },
    /// Print the generation summaries recorded in the history file
    History,
}

fn print_summary(summary: &GenerationSummary) {
    println!(
        "gen {:>4}  best {:>8.2}  mean {:>8.2}  worst {:>8.2}",
        summary.generation, summary.best_fitness, summary.mean_fitness, summary.worst_fitness
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = AppConfig::load(&args.config)?;

    match args.command {
        Command::Train { generations, tick } => {
            let run = app::train(&config, generations, tick)?;
            run.history.iter().for_each(print_summary);
            println!(
                "Trained {} generations ({} episodes, {} boundary ends) in {:.1?}",
                run.metrics.generations(),
                run.metrics.episodes(),
                run.metrics.boundary_ends(),
                run.metrics.elapsed()
            );
        }
        Command::Replay { generation, tick } => {
            let result = app::replay(&config, generation, tick)?;
            println!(
                "Generation {}: fitness {:.2} after {:.2}s ({:?})",
                result.generation, result.fitness, result.elapsed, result.cause
            );
        }
        Command::History => {
            let history = app::history(&config)?;
            if history.is_empty() {
                println!("No generations recorded yet");
            }
            history.iter().for_each(print_summary);
        }
    }

    Ok(())
}
