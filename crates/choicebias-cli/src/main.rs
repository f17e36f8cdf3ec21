//! CLI for choicebias: is the picker random, or does it have favourites?

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "choicebias")]
#[command(about = "choicebias: randomness and position-bias analysis for repeated choices")]
#[command(version = choicebias_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis on a record history and emit the report as JSON.
    /// Records are read as a JSON array or as one JSON object per line.
    Analyze {
        /// Path to the record history
        #[arg(long)]
        input: String,

        /// Number of presentation slots (overrides the config file)
        #[arg(long)]
        positions: Option<usize>,

        /// JSON file with analysis thresholds; missing fields use defaults
        #[arg(long)]
        config: Option<String>,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<String>,

        /// Exit with status 2 when any bias is detected
        #[arg(long)]
        fail_on_bias: bool,
    },

    /// Check that every record is well-formed without analysing it
    Validate {
        /// Path to the record history
        #[arg(long)]
        input: String,

        /// Number of presentation slots
        #[arg(long, default_value_t = choicebias_core::DEFAULT_POSITION_COUNT)]
        positions: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            positions,
            config,
            output,
            fail_on_bias,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            input_path: &input,
            positions,
            config_path: config.as_deref(),
            output_path: output.as_deref(),
            fail_on_bias,
        }),
        Commands::Validate { input, positions } => {
            commands::validate::run(commands::validate::ValidateCommandConfig {
                input_path: &input,
                positions,
            })
        }
    };

    match result {
        Ok(commands::Outcome::Clean) => {}
        Ok(commands::Outcome::BiasDetected) => std::process::exit(2),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
