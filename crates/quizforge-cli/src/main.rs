//! quizforge CLI: the operator-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizforge_core::config::load_config_from;
use quizforge_core::QuizError;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Console quiz creator and evaluator"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and sample question bank
    Init,

    /// Add a question to the bank
    Add {
        /// Question text
        #[arg(long)]
        text: String,

        /// Answer option, in display order (repeat for each option)
        #[arg(long = "option", short = 'o', required = true)]
        options: Vec<String>,

        /// Letter of the correct option (e.g. "B")
        #[arg(long)]
        answer: String,

        /// Topic category
        #[arg(long)]
        category: Option<String>,

        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Marks awarded for a correct answer
        #[arg(long, default_value = "1")]
        marks: u32,

        /// Bank file (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// List every question in the bank
    List {
        /// Bank file or directory (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Take a quiz
    Take {
        /// Student name (prompted for if omitted)
        #[arg(long)]
        name: Option<String>,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Time limit in seconds, 0 for unlimited (default from config)
        #[arg(long)]
        time_limit: Option<u64>,

        /// Seed for a reproducible question and option order
        #[arg(long)]
        seed: Option<u64>,

        /// Bank file or directory (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Show the report for one student
    Report {
        /// Student ID assigned when the quiz was taken
        #[arg(long)]
        student_id: u32,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the report for the whole class
    ClassReport {
        /// Also write a self-contained HTML report to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Append unsaved results to the results log
    Save,

    /// Validate a question bank
    Validate {
        /// Bank file or directory (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Motivational quotes
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },
}

#[derive(Subcommand)]
enum QuoteAction {
    /// Print a random quote
    Random {
        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Append a quote
    Add {
        /// Quote text
        text: String,
    },

    /// List every quote
    List,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = load_config_from(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Init => commands::init::execute(),
            Commands::Add {
                text,
                options,
                answer,
                category,
                difficulty,
                marks,
                bank,
            } => commands::add::execute(
                &config,
                commands::add::AddArgs {
                    text,
                    options,
                    answer,
                    category,
                    difficulty,
                    marks,
                    bank,
                },
            ),
            Commands::List { bank } => commands::list::execute(&config, bank),
            Commands::Take {
                name,
                count,
                time_limit,
                seed,
                bank,
            } => commands::take::execute(
                &config,
                commands::take::TakeArgs {
                    name,
                    count,
                    time_limit,
                    seed,
                    bank,
                },
            ),
            Commands::Report { student_id, format } => {
                commands::report::student(&config, student_id, &format)
            }
            Commands::ClassReport { html, format } => {
                commands::report::class(&config, html, &format)
            }
            Commands::Save => commands::save::execute(&config),
            Commands::Validate { bank } => commands::validate::execute(&config, bank),
            Commands::Quote { action } => match action {
                QuoteAction::Random { seed } => commands::quote::random(&config, seed),
                QuoteAction::Add { text } => commands::quote::add(&config, &text),
                QuoteAction::List => commands::quote::list(&config),
            },
        }
    });

    if let Err(e) = result {
        // Missing data is reported plainly with its own exit code.
        if let Some(quiz_err) = e.downcast_ref::<QuizError>() {
            if quiz_err.is_informational() {
                eprintln!("{quiz_err}");
                process::exit(2);
            }
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
