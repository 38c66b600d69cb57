mod bank;
mod render;
mod terminal;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use prep_core::model::{Category, CategoryFilter, DEFAULT_WEAK_THRESHOLD, StudyGuide};
use services::{Clock, DisplayOptions, QuizController, StatsService};
use storage::{DEFAULT_SNAPSHOT_FILE, JsonFileRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::QuizOutcome;

const DEFAULT_QUESTION_COUNT: usize = 10;

#[derive(Debug, PartialEq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidCount { raw: String },
    InvalidThreshold { raw: String },
    InvalidCategory { raw: String },
    InvalidPath { raw: String },
    MissingPath { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidThreshold { raw } => {
                write!(f, "invalid --weak-threshold value (expected 0 < t <= 1): {raw}")
            }
            ArgsError::InvalidCategory { raw } => write!(f, "unknown category: {raw}"),
            ArgsError::InvalidPath { raw } => write!(f, "invalid path: {raw:?}"),
            ArgsError::MissingPath { command } => write!(f, "{command} requires a file path"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  prep quiz   [--category <name|all>] [--count <n>] [--show-answers] [--show-explanations]");
    eprintln!("  prep stats");
    eprintln!("  prep guide  [--category <name>]");
    eprintln!("  prep export <path>");
    eprintln!("  prep import <path>");
    eprintln!("  prep help");
    eprintln!();
    eprintln!("Shared options:");
    eprintln!("  --stats <path>            stats file (default {DEFAULT_SNAPSHOT_FILE})");
    eprintln!("  --seed <n>                deterministic question sampling");
    eprintln!("  --weak-threshold <t>      weak category cutoff (default {DEFAULT_WEAK_THRESHOLD})");
    eprintln!();
    eprintln!("Categories:");
    for category in Category::ALL {
        eprintln!("  {category}");
    }
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_STATS_PATH, PREP_SEED, PREP_WEAK_THRESHOLD, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quiz,
    Stats,
    Guide,
    Export,
    Import,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "stats" => Some(Self::Stats),
            "guide" => Some(Self::Guide),
            "export" => Some(Self::Export),
            "import" => Some(Self::Import),
            "help" | "--help" | "-h" => Some(Self::Help),
            _ => None,
        }
    }

    /// Commands that start from the saved stats. `import` replaces them
    /// wholesale, so a damaged stats file never blocks it.
    fn reads_saved_stats(&self) -> bool {
        matches!(self, Self::Quiz | Self::Stats | Self::Export)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Args {
    stats_path: PathBuf,
    seed: Option<u64>,
    weak_threshold: f64,
    filter: CategoryFilter,
    count: usize,
    display: DisplayOptions,
    /// Positional file argument for `export` and `import`.
    file: Option<PathBuf>,
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn parse_threshold(raw: String) -> Result<f64, ArgsError> {
    match raw.trim().parse::<f64>() {
        Ok(t) if t > 0.0 && t <= 1.0 => Ok(t),
        _ => Err(ArgsError::InvalidThreshold { raw }),
    }
}

fn parse_path(raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidPath { raw });
    }
    Ok(PathBuf::from(raw))
}

impl Args {
    fn from_env(env: impl Fn(&str) -> Option<String>) -> Result<Self, ArgsError> {
        let stats_path = match env("PREP_STATS_PATH") {
            Some(raw) => parse_path(raw)?,
            None => PathBuf::from(DEFAULT_SNAPSHOT_FILE),
        };
        let seed = env("PREP_SEED").map(parse_seed).transpose()?;
        let weak_threshold = env("PREP_WEAK_THRESHOLD")
            .map(parse_threshold)
            .transpose()?
            .unwrap_or(DEFAULT_WEAK_THRESHOLD);

        Ok(Self {
            stats_path,
            seed,
            weak_threshold,
            filter: CategoryFilter::All,
            count: DEFAULT_QUESTION_COUNT,
            display: DisplayOptions::default(),
            file: None,
        })
    }

    fn parse(
        &mut self,
        command: &Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<(), ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--stats" => self.stats_path = parse_path(require_value(args, "--stats")?)?,
                "--seed" => self.seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--weak-threshold" => {
                    self.weak_threshold = parse_threshold(require_value(args, "--weak-threshold")?)?;
                }
                "--category" if matches!(command, Command::Quiz | Command::Guide) => {
                    let raw = require_value(args, "--category")?;
                    self.filter = raw
                        .parse()
                        .map_err(|_| ArgsError::InvalidCategory { raw: raw.clone() })?;
                }
                "--count" if *command == Command::Quiz => {
                    let raw = require_value(args, "--count")?;
                    self.count = match raw.trim().parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(ArgsError::InvalidCount { raw }),
                    };
                }
                "--show-answers" if *command == Command::Quiz => {
                    self.display.reveal_answers_immediately = true;
                }
                "--show-explanations" if *command == Command::Quiz => {
                    self.display.show_explanations = true;
                }
                _ if matches!(command, Command::Export | Command::Import)
                    && self.file.is_none()
                    && !arg.starts_with("--") =>
                {
                    self.file = Some(parse_path(arg)?);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        match command {
            Command::Export if self.file.is_none() => Err(ArgsError::MissingPath { command: "export" }),
            Command::Import if self.file.is_none() => Err(ArgsError::MissingPath { command: "import" }),
            _ => Ok(()),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            ArgsError::UnknownArg(first)
        })?,
    };
    if cmd == Command::Help {
        print_usage();
        return Ok(());
    }

    let mut parsed = Args::from_env(|key| std::env::var(key).ok())?;
    parsed.parse(&cmd, &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = Arc::new(bank::build_catalog()?);
    let mut controller = QuizController::new(Arc::clone(&catalog), Clock::system());
    if let Some(seed) = parsed.seed {
        controller = controller.with_seed(seed);
    }

    let service = StatsService::new(Arc::new(JsonFileRepository::new(parsed.stats_path.clone())));
    if cmd.reads_saved_stats() && service.restore(&mut controller)? {
        info!(path = %parsed.stats_path.display(), "stats restored");
    }

    let mut stdout = io::stdout().lock();
    match cmd {
        Command::Quiz => {
            let max = controller.max_count(parsed.filter);
            if parsed.count > max && max > 0 {
                eprintln!("only {max} questions available; using {max}");
            }
            controller.start_quiz(parsed.filter, parsed.count, parsed.display)?;
            if let QuizOutcome::Submitted(result) =
                terminal::run_quiz(&mut controller, io::stdin().lock(), &mut stdout)?
            {
                render::result(&mut stdout, &result)?;
                service.persist(&controller)?;
            }
        }
        Command::Stats => render::stats(&mut stdout, controller.stats(), parsed.weak_threshold)?,
        Command::Guide => {
            let guide = StudyGuide::merge(&bank::outlines(), &catalog);
            let only = match parsed.filter {
                CategoryFilter::All => None,
                CategoryFilter::Only(category) => Some(category),
            };
            render::guide(&mut stdout, &guide, only)?;
        }
        Command::Export => {
            if let Some(path) = &parsed.file {
                service.export_file(path, &controller)?;
                eprintln!("stats exported to {}", path.display());
            }
        }
        Command::Import => {
            if let Some(path) = &parsed.file {
                service.import_file(path, &mut controller)?;
                eprintln!(
                    "imported {} attempts across {} quizzes",
                    controller.stats().questions_attempted(),
                    controller.stats().history().len()
                );
            }
        }
        Command::Help => print_usage(),
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
