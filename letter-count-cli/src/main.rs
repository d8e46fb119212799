use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};

use letter_count_core::model::settings::{DEFAULT_CHUNK_SIZE, DEFAULT_CORPUS_PATH, DEFAULT_LENGTH};
use letter_count_core::strategy::process;
use letter_count_core::{Alphabet, Corpus, Settings, Strategy, WorkerCommand, report};

/// Hidden subcommand the process strategy re-invokes this binary with.
const WORKER_SUBCOMMAND: &str = "worker";

/// Generate a random letter corpus and count it sequentially, with threads
/// and with processes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a corpus and compare all strategies (default)
    Run(RunArgs),
    /// Only generate the corpus file
    Generate(CorpusArgs),
    /// Count one span of a corpus for the process strategy
    #[command(hide = true)]
    Worker,
}

#[derive(Args, Debug, Clone)]
struct CorpusArgs {
    /// Number of letters to generate
    #[arg(short, long, env = "LETTER_COUNT_LENGTH", default_value_t = DEFAULT_LENGTH)]
    length: u64,

    /// Letters to draw from, as "A,B,C,D" or "ABCD"
    #[arg(short, long, env = "LETTER_COUNT_ALPHABET", default_value_t = Alphabet::default())]
    alphabet: Alphabet,

    /// Corpus file to write and count
    #[arg(short, long, env = "LETTER_COUNT_CORPUS", default_value = DEFAULT_CORPUS_PATH)]
    corpus: PathBuf,

    /// Seed for a reproducible corpus
    #[arg(short, long, env = "LETTER_COUNT_SEED")]
    seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    /// Bytes per chunk for the parallel strategies
    #[arg(long, env = "LETTER_COUNT_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Threads and processes per parallel strategy [default: number of CPUs]
    #[arg(short, long, env = "LETTER_COUNT_WORKERS")]
    workers: Option<usize>,

    /// Write one <LETTER>.txt file per letter into this directory
    #[arg(long, env = "LETTER_COUNT_COUNTS_DIR")]
    counts_dir: Option<PathBuf>,

    /// Count the existing corpus file instead of generating a new one
    #[arg(long)]
    reuse: bool,
}

impl CorpusArgs {
    fn apply(&self, settings: &mut Settings) {
        settings.length = self.length;
        settings.alphabet = self.alphabet.clone();
        settings.corpus_path = self.corpus.clone();
        settings.seed = self.seed;
    }
}

impl RunArgs {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        self.corpus.apply(&mut settings);
        settings.set_chunk_size(self.chunk_size)?;
        if let Some(workers) = self.workers {
            settings.set_workers(workers)?;
        }
        settings.counts_dir = self.counts_dir.clone();
        settings.worker = Some(
            WorkerCommand::current_exe([WORKER_SUBCOMMAND])
                .context("Failed to locate the letter-count executable")?,
        );
        Ok(settings)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run(args: &RunArgs) -> Result<()> {
    let settings = args.settings()?;
    debug!("Settings: {settings:?}");

    let corpus = if args.reuse {
        Corpus::load(&settings.corpus_path)
            .with_context(|| format!("Failed to read corpus {}", settings.corpus_path.display()))?
    } else {
        Corpus::generate(&settings)
            .with_context(|| format!("Failed to generate corpus {}", settings.corpus_path.display()))?
    };

    let report = report::run(&corpus, &settings, &Strategy::ALL).context("Counting failed")?;
    print!("{report}");
    for path in &report.count_files {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn generate(args: &CorpusArgs) -> Result<()> {
    let mut settings = Settings::default();
    args.apply(&mut settings);
    let corpus = Corpus::generate(&settings)
        .with_context(|| format!("Failed to generate corpus {}", settings.corpus_path.display()))?;
    println!("Wrote {} letters to {}", corpus.len(), corpus.path().display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Run(cli.run)) {
        Command::Run(args) => run(&args),
        Command::Generate(args) => generate(&args),
        Command::Worker => {
            process::serve(io::stdin().lock(), io::stdout().lock()).context("Worker failed")
        }
    }
}
