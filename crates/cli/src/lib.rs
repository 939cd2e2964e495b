use anyhow::{Context, Result};
use answer_search::{CorpusSource, MatchMode, PipelineConfig, QueryPipeline};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod chat;

pub use chat::{ChatSession, ChatTurn, Role};

/// Path of a TOML config file used when `--config` is absent
pub const CONFIG_ENV: &str = "ANSWER_FINDER_CONFIG";

/// Match mode override, applied on top of the config file
pub const MODE_ENV: &str = "ANSWER_FINDER_MODE";

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "answer-finder")]
#[command(about = "Answer questions from a table of short documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (overrides ANSWER_FINDER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Matcher order: lexical, fuzzy_vector or tiered
    #[arg(long, global = true)]
    mode: Option<String>,

    /// CSV column holding document text
    #[arg(long, global = true)]
    column: Option<String>,

    /// Disable spelling correction of queries
    #[arg(long, global = true)]
    no_spelling: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask(AskArgs),

    /// Interactive question/answer session
    Chat(ChatArgs),

    /// Print the sentences extracted from a corpus
    Sentences(SentencesArgs),

    /// Print the spelling-corrected form of some text
    Correct(CorrectArgs),
}

#[derive(Args)]
struct AskArgs {
    /// CSV file with a header row
    #[arg(long)]
    corpus: PathBuf,

    /// Output the full answer as JSON
    #[arg(long)]
    json: bool,

    /// Question words
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

#[derive(Args)]
struct ChatArgs {
    /// CSV file to load at start (use /load inside the session otherwise)
    #[arg(long)]
    corpus: Option<PathBuf>,
}

#[derive(Args)]
struct SentencesArgs {
    #[arg(long)]
    corpus: PathBuf,

    /// Output sentences as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CorrectArgs {
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Ask(args) => args.json,
        Commands::Sentences(args) => args.json,
        _ => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(&cli)?;
    log::debug!("Using match mode {}", config.mode);
    let pipeline = QueryPipeline::english(config);

    match cli.command {
        Commands::Ask(args) => run_ask(&pipeline, args),
        Commands::Chat(args) => run_chat(&pipeline, args),
        Commands::Sentences(args) => run_sentences(&pipeline, args),
        Commands::Correct(args) => print_stdout(&pipeline.correct_query(&args.text.join(" "))),
    }
}

/// Defaults, then the TOML file, then the mode env var, then flags
fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    let mut config = match path {
        Some(path) => PipelineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Ok(mode) = env::var(MODE_ENV) {
        config.mode = mode
            .parse::<MatchMode>()
            .with_context(|| format!("Invalid {MODE_ENV}"))?;
    }
    if let Some(mode) = &cli.mode {
        config.mode = mode.parse::<MatchMode>().context("Invalid --mode")?;
    }
    if let Some(column) = &cli.column {
        config.text_column = column.clone();
    }
    if cli.no_spelling {
        config.spelling.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

fn corpus_source(pipeline: &QueryPipeline, path: &Path) -> CorpusSource {
    CorpusSource::from_path(path, pipeline.config().text_column.clone())
}

fn run_ask(pipeline: &QueryPipeline, args: AskArgs) -> Result<()> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        log::warn!("Empty query; nothing to answer");
        return Ok(());
    }

    let mut source = corpus_source(pipeline, &args.corpus);
    let answer = pipeline.answer(&query, source.refresh(pipeline.normalizer()))?;

    if args.json {
        return print_stdout(&serde_json::to_string_pretty(&answer)?);
    }
    if let Some(corrected) = answer.corrected_query() {
        if corrected != query.trim() {
            log::info!("Corrected query: {corrected}");
        }
    }
    print_stdout(&answer.text())
}

fn run_chat(pipeline: &QueryPipeline, args: ChatArgs) -> Result<()> {
    let column = pipeline.config().text_column.clone();
    let mut source = match &args.corpus {
        Some(path) => CorpusSource::from_path(path, column),
        None => CorpusSource::new(column),
    };
    let mut session = ChatSession::new();

    let stdin = io::stdin();
    chat::run(pipeline, &mut source, &mut session, stdin.lock(), io::stdout().lock())?;
    log::debug!("Chat ended after {} turns", session.turns().len());
    Ok(())
}

fn run_sentences(pipeline: &QueryPipeline, args: SentencesArgs) -> Result<()> {
    let mut source = corpus_source(pipeline, &args.corpus);
    let corpus = source
        .refresh(pipeline.normalizer())
        .map_err(|err| anyhow::anyhow!("{err}"))?;

    if args.json {
        return print_stdout(&serde_json::to_string_pretty(corpus.sentences())?);
    }
    let lines: Vec<&str> = corpus.sentences().iter().map(|s| s.raw.as_str()).collect();
    print_stdout(&lines.join("\n"))
}
