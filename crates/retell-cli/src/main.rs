//! retell CLI: score storytelling practice and track progress.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use retell_core::catalog::StoryCategory;
use retell_progress::TimeWindow;

mod commands;
mod config;
mod output;

use config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "retell",
    version,
    about = "Storytelling practice scorer and progress tracker"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Progress data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a retelling of a reference story
    Retelling {
        /// Built-in story id (see `retell stories`)
        #[arg(long, conflicts_with = "reference", required_unless_present = "reference")]
        story: Option<uuid::Uuid>,

        /// Reference story text file
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Transcript file, or "-" for stdin
        #[arg(long)]
        transcript: PathBuf,

        /// Session length in seconds
        #[arg(long, default_value = "0")]
        duration: f64,

        /// Score without recording the session
        #[arg(long)]
        no_save: bool,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Score a free-practice narration
    Practice {
        /// Transcript file, or "-" for stdin
        #[arg(long)]
        transcript: PathBuf,

        /// Session length in seconds
        #[arg(long)]
        duration: f64,

        /// Prompt id the narration answered
        #[arg(long)]
        prompt: Option<uuid::Uuid>,

        /// Score without recording the session
        #[arg(long)]
        no_save: bool,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show progress statistics and recorded sessions
    Progress {
        /// Time window: all, week, month, year
        #[arg(long)]
        window: Option<TimeWindow>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Delete one recorded session
    Remove {
        /// Session id
        id: uuid::Uuid,
    },

    /// Delete every recorded session
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// List built-in reference stories
    Stories {
        /// Filter by category
        #[arg(long)]
        category: Option<StoryCategory>,

        /// Print the full story text
        #[arg(long)]
        full: bool,
    },

    /// Suggest a free-practice prompt
    Prompt {
        /// Prompt category
        #[arg(long)]
        category: Option<StoryCategory>,

        /// Selection seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a starter config
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("retell=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = commands::Context::load(cli.config.as_deref(), cli.data_dir).and_then(|ctx| {
        match cli.command {
            Commands::Retelling {
                story,
                reference,
                transcript,
                duration,
                no_save,
                format,
            } => commands::retelling::execute(
                &ctx, story, reference, transcript, duration, no_save, format,
            ),
            Commands::Practice {
                transcript,
                duration,
                prompt,
                no_save,
                format,
            } => commands::practice::execute(&ctx, transcript, duration, prompt, no_save, format),
            Commands::Progress { window, format } => {
                commands::progress::execute(&ctx, window, format)
            }
            Commands::Remove { id } => commands::remove::execute(&ctx, id),
            Commands::Clear { yes } => commands::clear::execute(&ctx, yes),
            Commands::Stories { category, full } => commands::stories::execute(category, full),
            Commands::Prompt { category, seed } => commands::prompt::execute(category, seed),
            Commands::Init => commands::init::execute(),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
