//! Doctor Directory - terminal front end
//!
//! Fetches the practitioner list once, hydrates the query state from a
//! location string and renders the directory page as text.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctor_directory_core::fetch::{self, FetchResult};
use doctor_directory_core::{DirectoryConfig, DirectoryStore, Doctor, HttpFetcher, PageView};

mod commands;

use commands::{Command, Outcome};

/// Command-line arguments for doctor-directory
#[derive(Parser, Debug)]
#[command(name = "doctor-directory")]
#[command(about = "Search, filter and sort a practitioner directory")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "DOCTOR_DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Endpoint serving the JSON array of doctors (overrides the config file)
    #[arg(short, long, env = "DOCTOR_DIRECTORY_ENDPOINT")]
    endpoint: Option<String>,

    /// Read doctors from a local JSON snapshot instead of the endpoint
    #[arg(short, long, conflicts_with = "endpoint")]
    data: Option<PathBuf>,

    /// Initial location string, e.g. "search=dr&sort=fees"
    #[arg(short, long, default_value = "")]
    location: String,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Render the page once (default)
    Show,
    /// Print autocomplete suggestions for a partial name
    Suggest { partial: String },
    /// Read commands from stdin and re-render after each
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the page on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doctor_directory=info,doctor_directory_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DirectoryConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DirectoryConfig::default(),
    };
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }

    let mut store = DirectoryStore::from_location(&args.location);

    // Any load failure, including a client that cannot be built, becomes the error page
    let result = load_doctors(args.data.as_deref(), &config).await;
    store.finish_loading(result);

    match args.command.unwrap_or(Mode::Show) {
        Mode::Show => print_page(&store),
        Mode::Suggest { partial } => {
            for line in commands::suggestion_lines(&store, &partial) {
                println!("{}", line);
            }
        }
        Mode::Interactive => run_interactive(&mut store)?,
    }

    Ok(())
}

async fn load_doctors(data: Option<&Path>, config: &DirectoryConfig) -> FetchResult<Vec<Doctor>> {
    match data {
        Some(path) => {
            info!("Loading doctors from {}", path.display());
            fetch::load_file(path)
        }
        None => {
            info!("Fetching doctors from {}", config.endpoint);
            HttpFetcher::new(config)?.fetch_all().await
        }
    }
}

fn print_page(store: &DirectoryStore) {
    print!("{}", PageView::from_store(store));
    println!("Location: ?{}", store.location());
}

fn run_interactive(store: &mut DirectoryStore) -> Result<()> {
    print_page(store);
    println!("{}", commands::HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read stdin")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match commands::execute(store, command) {
            Outcome::Page => print_page(store),
            Outcome::Suggestions(names) if names.is_empty() => println!("(no suggestions)"),
            Outcome::Suggestions(names) => {
                for (i, name) in names.iter().enumerate() {
                    println!("  {}. {}", i + 1, name);
                }
            }
            Outcome::Location(location) => println!("?{}", location),
            Outcome::Message(message) => println!("{}", message),
            Outcome::Quit => break,
        }
    }
    Ok(())
}
