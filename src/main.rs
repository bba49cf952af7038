//! Credence: News Credibility Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use credence::analyzer::{AnalysisEngine, AnalysisMode};
use credence::classifier::remote::{is_remote_available, DEFAULT_TOKEN_ENV};
use credence::classifier::DEFAULT_TIMEOUT;
use credence::config::{
    build_engine, build_history, load_config, ClassifierConfig, Config, HistoryConfig,
    CONFIG_FILENAME,
};
use credence::history::{DEFAULT_CAPACITY, DEFAULT_RECENT};
use credence::reporter::{ConsoleReporter, JsonReporter};
use credence::session::{run_interactive, Session};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const FAKE_EXAMPLE: &str = "SHOCKING!!! Scientists discover miracle weight loss pill that doctors don't want you to know about! Click here to share this secret before it's taken down! 100% guaranteed results!!!";
const REAL_EXAMPLE: &str = "According to a study published in the Journal of Medicine, researchers at Harvard University found that regular exercise may reduce the risk of heart disease. However, experts caution that more research is needed to confirm these findings.";

/// Credence: News and Social Media Credibility Analyzer
#[derive(Parser, Debug)]
#[command(name = "credence")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to analyze ("-" reads stdin; omit to read piped stdin)
    text: Option<String>,

    /// Read the text from a file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Flags shared by every command that analyzes text
#[derive(clap::Args, Debug, Clone)]
struct OutputArgs {
    /// Output format as JSON
    #[arg(long, short, global = true)]
    json: bool,

    /// Quiet mode (score and category only)
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Verbose output (indicator weights, debug logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short, global = true)]
    threshold: Option<u8>,

    /// Analysis mode: classifier or pattern
    #[arg(long, short, global = true)]
    mode: Option<AnalysisMode>,

    /// Classifier endpoint URL (overrides config)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to config file (default: search .credencerc.json in current dir and parents)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Leave the media-literacy tips out of the report
    #[arg(long, global = true)]
    no_tips: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one text per line, keeping a session history
    Interactive,

    /// Analyze a built-in sample text
    Example {
        /// Which sample: fake or real
        #[arg(value_parser = ["fake", "real"])]
        kind: String,
    },

    /// Print tips for spotting fake news
    Tips,

    /// Create .credencerc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "credence=debug" } else { "credence=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.output.verbose);

    match args.command {
        Some(Commands::Tips) => {
            print!("{}", ConsoleReporter::new().render_tips());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Init { dir }) => run_init(
            args.output.threshold,
            args.output.endpoint.clone(),
            dir.as_deref(),
        ),
        Some(Commands::Interactive) => {
            let config = resolve_config(&args.output)?;
            run_session(&args.output, &config)
        }
        Some(Commands::Example { kind }) => {
            let text = if kind == "fake" { FAKE_EXAMPLE } else { REAL_EXAMPLE };
            let config = resolve_config(&args.output)?;
            analyze_and_report(&args.output, &config, text)
        }
        None => {
            let text = read_input(args.text.as_deref(), args.file.as_deref())?;
            let config = resolve_config(&args.output)?;
            analyze_and_report(&args.output, &config, &text)
        }
    }
}

/// Load config (CLI flags override config file)
fn resolve_config(output: &OutputArgs) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(load_config(&cwd, output.config.as_deref())?.merge_with_cli(
        output.mode,
        output.threshold,
        output.endpoint.clone(),
    ))
}

fn engine_for(config: &Config) -> Result<AnalysisEngine> {
    if config.classifier.endpoint().is_some() && !is_remote_available() {
        tracing::warn!("classifier endpoint configured but this build lacks the `ai` feature");
    }
    build_engine(config).context("Indicator catalog failed validation")
}

fn read_input(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }
    match text {
        Some("-") => read_stdin(),
        Some(t) => Ok(t.to_string()),
        None if !io::stdin().is_terminal() => read_stdin(),
        None => anyhow::bail!(
            "no text given; pass TEXT, --file PATH, pipe text on stdin, or run `credence interactive`"
        ),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn analyze_and_report(output: &OutputArgs, config: &Config, text: &str) -> Result<ExitCode> {
    let engine = engine_for(config)?;
    let result = engine.analyze(text)?;

    if output.json {
        let mut reporter = JsonReporter::new().pretty();
        if output.no_tips {
            reporter = reporter.without_tips();
        }
        println!("{}", reporter.report(&result));
    } else {
        let reporter = console_reporter(output);
        if output.quiet {
            reporter.report_quiet(&result);
        } else {
            reporter.report(&result);
        }
    }

    if let Some(threshold) = config.threshold {
        if result.score < threshold {
            if !output.quiet && !output.json {
                eprintln!(
                    "{}: score {} is below threshold {}",
                    "Failed".red().bold(),
                    result.score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn console_reporter(output: &OutputArgs) -> ConsoleReporter {
    let mut reporter = ConsoleReporter::new();
    if output.verbose {
        reporter = reporter.verbose();
    }
    if output.no_tips {
        reporter = reporter.without_tips();
    }
    reporter
}

fn run_session(output: &OutputArgs, config: &Config) -> Result<ExitCode> {
    let engine = engine_for(config)?;
    let session = Session::new(engine, build_history(config));
    let reporter = console_reporter(output);
    let stdin = io::stdin();
    run_interactive(&session, &reporter, stdin.lock(), io::stdout().lock())
        .context("Interactive session failed")?;

    if output.json {
        println!(
            "{}",
            JsonReporter::new().report_history(&session.history().snapshot())
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_init(
    threshold: Option<u8>,
    classifier_endpoint: Option<String>,
    dir: Option<&Path>,
) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config {
        mode: Some(AnalysisMode::ClassifierPreferred),
        threshold: Some(threshold.unwrap_or(40)),
        classifier: ClassifierConfig {
            endpoint: classifier_endpoint,
            token_env: Some(DEFAULT_TOKEN_ENV.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT.as_secs()),
        },
        history: HistoryConfig {
            capacity: Some(DEFAULT_CAPACITY),
            recent: Some(DEFAULT_RECENT),
        },
        ..Config::default()
    };

    let json = serde_json::to_string_pretty(&config).context("Failed to encode config")?;
    std::fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} {}", "Created".green(), config_path.display());
    if config.classifier.endpoint.is_none() {
        println!(
            "   {}",
            "No classifier endpoint set; analyses will use pattern scoring.".dimmed()
        );
    } else if !is_remote_available() {
        println!(
            "   {}",
            "This build lacks the `ai` feature; rebuild with --features ai to call the endpoint."
                .dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}
