//! # flashgen: Flashcards from PDF documents
//!
//! This is the main entry point for the `flashgen` command-line interface.

mod config;
mod study;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flashgen::constants::{DEFAULT_CARD_COUNT, DEFAULT_EXPORT_FILE, MAX_CARD_COUNT, MIN_CARD_COUNT};
use flashgen::ingest::pdf::PageProgress;
use flashgen::{Notice, NoticeLevel, ProviderSettings, Session};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a YAML configuration file (defaults to ./flashgen.yml if present)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the text of a PDF and show a preview of it
    Extract(ExtractArgs),
    /// Generate flashcards from a PDF and save them as CSV
    Generate(GenerateArgs),
    /// Generate flashcards from a PDF and study them interactively
    Study(StudyArgs),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// The PDF file to read
    pdf: PathBuf,
    /// Print the full text instead of a preview
    #[arg(long)]
    full: bool,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// The PDF file to read
    pdf: PathBuf,
    /// How many flashcards to ask for
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_CARD_COUNT,
        value_parser = clap::value_parser!(u8).range(MIN_CARD_COUNT as i64..=MAX_CARD_COUNT as i64)
    )]
    cards: u8,
    /// Where to write the CSV file
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct StudyArgs {
    /// The PDF file to read
    pdf: PathBuf,
    /// How many flashcards to ask for
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_CARD_COUNT,
        value_parser = clap::value_parser!(u8).range(MIN_CARD_COUNT as i64..=MAX_CARD_COUNT as i64)
    )]
    cards: u8,
    /// Where the `e` command writes the CSV file
    #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
    export: PathBuf,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Extract(_) => "Extract",
            Commands::Generate(_) => "Generate",
            Commands::Study(_) => "Study",
        }
    }
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let app_config = config::get_config(cli.config.as_deref())?;

    // Setup logging to a file
    let log_file = File::create(&app_config.log_file)
        .with_context(|| format!("Failed to create log file '{}'", app_config.log_file))?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = app_config.provider_settings();
    info!(provider = %settings.provider, model = %settings.model, "Configuration loaded.");

    let result = match &cli.command {
        Commands::Extract(args) => handle_extract(args),
        Commands::Generate(args) => handle_generate(args, &settings).await,
        Commands::Study(args) => handle_study(args, &settings).await,
    };

    if let Err(e) = result {
        eprintln!("{} failed: {}", cli.command.name(), e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Command Handlers ---

fn handle_extract(args: &ExtractArgs) -> Result<()> {
    let mut session = Session::new();
    let text = extract_from_file(&mut session, &args.pdf)?;

    if args.full {
        println!("\n{text}");
    } else if let Some(preview) = session.preview() {
        println!("\nText Preview:\n{preview}");
    }
    Ok(())
}

async fn handle_generate(args: &GenerateArgs, settings: &ProviderSettings) -> Result<()> {
    let mut session = Session::new();
    let text = extract_from_file(&mut session, &args.pdf)?;
    generate_deck(&mut session, settings, &text, args.cards).await?;

    let bytes = session
        .export_csv()
        .context("No flashcards available to export")?;
    fs::write(&args.output, bytes)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    println!(
        "Saved {} flashcards to {}",
        session.deck().len(),
        args.output.display()
    );
    Ok(())
}

async fn handle_study(args: &StudyArgs, settings: &ProviderSettings) -> Result<()> {
    let mut session = Session::new();
    let text = extract_from_file(&mut session, &args.pdf)?;
    generate_deck(&mut session, settings, &text, args.cards).await?;

    println!();
    study::run(&mut session, io::stdin().lock(), io::stdout(), &args.export)
}

// --- Helpers ---

fn extract_from_file(session: &mut Session, pdf: &Path) -> Result<String> {
    let bytes = fs::read(pdf).with_context(|| format!("Failed to read '{}'", pdf.display()))?;
    info!("Read {} bytes from '{}'.", bytes.len(), pdf.display());

    let text = session.extract_with_progress(&bytes, |progress: PageProgress| {
        if progress.should_report() {
            println!("Processing page {}/{}...", progress.page, progress.total);
        }
    });
    print_notices(session.take_notices());

    match text {
        Some(text) => Ok(text),
        None => bail!("no text could be extracted from '{}'", pdf.display()),
    }
}

async fn generate_deck(
    session: &mut Session,
    settings: &ProviderSettings,
    text: &str,
    cards: u8,
) -> Result<()> {
    println!("Generating flashcards...");
    let loaded = session
        .generate_with_settings(settings, text, cards as usize)
        .await;
    print_notices(session.take_notices());

    if loaded == 0 {
        bail!("no flashcards were generated");
    }
    Ok(())
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Success => println!("✅ {}", notice.message),
            NoticeLevel::Warning => eprintln!("⚠️  {}", notice.message),
            NoticeLevel::Error => eprintln!("❌ {}", notice.message),
        }
    }
}
