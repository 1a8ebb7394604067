// chatstore-cli — desktop front-end for the in-memory chat store
//
// One-shot commands run against a freshly initialized store. `session` keeps
// a single store alive for as long as stdin stays open.

mod config;
mod session;

use anyhow::{Context, Result};
use chatstore_core::message::{encode, encode_pretty, EMPTY_OBJECT};
use chatstore_core::{ChatStore, MemoryStorage, UserId};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "chatstore")]
#[command(about = "ChatStore — in-memory chat data store", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    Contacts,
    /// Show one user
    User { id: UserId },
    /// Show the conversation between two users
    Messages { user_a: UserId, user_b: UserId },
    /// Post a message and print the resulting conversation
    Send {
        from: UserId,
        to: UserId,
        text: String,
    },
    /// Interactive session over stdin
    Session,
    /// Inspect or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Set { key: String, value: String },
    Get { key: String },
    List,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => config::Config::default_file()?,
    };
    let config = config::Config::load_from(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Using config file {}", config_path.display());

    let pretty = cli.pretty || config.pretty_json;

    match cli.command {
        Commands::Contacts => {
            let store = open_store(&config);
            print_json(&store.get_contacts(), pretty)
        }
        Commands::User { id } => {
            let store = open_store(&config);
            match store.get_user_info(id) {
                Some(user) => print_json(&user, pretty),
                None => {
                    println!("{}", EMPTY_OBJECT);
                    Ok(())
                }
            }
        }
        Commands::Messages { user_a, user_b } => {
            let store = open_store(&config);
            print_json(&store.get_messages(user_a, user_b), pretty)
        }
        Commands::Send { from, to, text } => {
            let mut store = open_store(&config);
            let id = store.add_message(from, to, text);
            eprintln!("{} message {}", "✓".green(), id);
            print_json(&store.get_messages(from, to), pretty)
        }
        Commands::Session => cmd_session(&config, pretty),
        Commands::Config { action } => cmd_config(action, config, &config_path),
    }
}

fn open_store(config: &config::Config) -> ChatStore {
    let mut store = ChatStore::with_config(config.store.clone())
        .with_backend(Arc::new(MemoryStorage::new()));
    store.initialize();
    store
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        encode_pretty(value)
    } else {
        encode(value)
    };
    println!("{}", json?);
    Ok(())
}

fn cmd_session(config: &config::Config, pretty: bool) -> Result<()> {
    let mut session = session::Session::new(open_store(config), pretty);

    tracing::info!("Session started");
    println!("{}", "ChatStore session — type `help` for commands".bold());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("{} ", ">".bright_cyan());
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read stdin")? == 0 {
            break;
        }

        match session::parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(session::SessionCommand::Quit)) => break,
            Ok(Some(command)) => match session.execute(command) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    tracing::warn!("Session command failed: {:#}", e);
                    eprintln!("{} {:#}", "error:".red(), e);
                }
            },
            Err(e) => {
                tracing::debug!("Rejected input {:?}: {:#}", line.trim(), e);
                eprintln!("{} {:#}", "error:".red(), e);
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

fn cmd_config(
    action: ConfigAction,
    mut config: config::Config,
    path: &std::path::Path,
) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save_to(path)?;
            tracing::info!("Config {} set to {} in {}", key, value, path.display());
            println!("{} {} = {}", "✓".green(), key, value);
        }
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("Unknown config key: {}", key),
        },
        ConfigAction::List => {
            for (key, value) in config.list() {
                println!("  {:<16} {}", key.bright_cyan(), value);
            }
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
