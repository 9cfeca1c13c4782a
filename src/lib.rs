// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::PathBuf;

use application::session::Session;
use application::settings::SettingsStore;
use application::{NoteDeleter, NoteLister, NoteViewer, NoteWriter};
use chrono::Local;
use cli::args::{Args, Command};
use domain::{Config, DomainError, NoteEntry};
use infrastructure::shell_cache::spawn_background_install;
use infrastructure::{ConfigStore, GithubNoteRepository, ShellCache};
use ports::terminal::user_message;
use ports::TerminalPresenter;
use tracing::{debug, warn};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting gitnotes with arguments");

    let store = match &args.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_store()?,
    };

    match args.command {
        Command::Setup {
            account,
            repository,
            token,
        } => setup(&store, account, repository, token),
        Command::List => list(&store).await,
        Command::Show { name, json, raw } => show(&store, &name, json, raw).await,
        Command::Add { title, body, file } => add(&store, &title, body, file).await,
        Command::Edit { name, body, file } => edit(&store, &name, body, file).await,
        Command::Delete { name, yes } => delete(&store, &name, yes).await,
        Command::Ui => ui(&store).await,
    }
}

/// Lift a domain error into the CLI error channel, hint included.
fn surface<T>(result: Result<T, DomainError>) -> Result<T> {
    result.map_err(|err| anyhow::anyhow!(user_message(&err)))
}

fn open_repository(store: &ConfigStore) -> Result<GithubNoteRepository> {
    let config = store.load()?;
    GithubNoteRepository::new(config).map_err(|err| anyhow::anyhow!(user_message(&err)))
}

fn setup(store: &ConfigStore, account: String, repository: String, token: String) -> Result<()> {
    let config = Config {
        account,
        repository,
        token,
    }
    .normalized();
    if !config.is_valid() {
        bail!("All three fields are required and must be non-empty.");
    }

    store.save(&config)?;
    println!("Configuration saved to {}", store.path().display());
    Ok(())
}

async fn list(store: &ConfigStore) -> Result<()> {
    let repository = open_repository(store)?;
    let notes = surface(NoteLister::new(&repository).list_notes().await)?;

    println!("{}", TerminalPresenter::new().render_list(&notes));
    Ok(())
}

/// Resolve a note by exact filename, then by unique prefix of the filename
/// or display title.
async fn find_note(repository: &GithubNoteRepository, name: &str) -> Result<NoteEntry> {
    let notes = surface(NoteLister::new(repository).list_notes().await)?;

    if let Some(exact) = notes.iter().find(|n| n.name == name) {
        return Ok(exact.clone());
    }

    let matches: Vec<&NoteEntry> = notes
        .iter()
        .filter(|n| n.name.starts_with(name) || n.display_title().starts_with(name))
        .collect();

    match matches.len() {
        0 => bail!("No note matching '{}'", name),
        1 => Ok(matches[0].clone()),
        _ => bail!(
            "Ambiguous note name '{}'. Matches:\n{}",
            name,
            matches
                .iter()
                .map(|n| format!("  - {}", n.name))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

async fn show(store: &ConfigStore, name: &str, json: bool, raw: bool) -> Result<()> {
    let repository = open_repository(store)?;
    let entry = find_note(&repository, name).await?;
    let open = surface(NoteViewer::new(&repository).view_note(&entry).await)?;

    if json {
        let value = serde_json::json!({
            "name": open.entry.name,
            "url": open.entry.url,
            "sha": open.entry.sha,
            "content": open.body,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if raw {
        println!("{}", open.body);
    } else {
        println!("{}", TerminalPresenter::new().render(&open.body));
    }
    Ok(())
}

/// Body precedence: `--body`, then `--file`, then stdin.
fn note_body(body: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(body) = body {
        return Ok(body);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read note body from stdin")?;
    Ok(buf)
}

async fn add(
    store: &ConfigStore,
    title: &str,
    body: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        bail!("Title must not be empty");
    }

    let repository = open_repository(store)?;
    let body = note_body(body, file)?;
    let filename = surface(
        NoteWriter::new(&repository)
            .create(title, &body, Local::now().naive_local())
            .await,
    )?;

    println!("Created {filename}");
    Ok(())
}

async fn edit(
    store: &ConfigStore,
    name: &str,
    body: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let repository = open_repository(store)?;
    let entry = find_note(&repository, name).await?;
    let body = note_body(body, file)?;
    surface(NoteWriter::new(&repository).update(&entry, &body).await)?;

    println!("Updated {}", entry.name);
    Ok(())
}

async fn delete(store: &ConfigStore, name: &str, yes: bool) -> Result<()> {
    let repository = open_repository(store)?;
    let entry = find_note(&repository, name).await?;

    if !yes {
        eprint!(
            "Really delete {}? It cannot be undone. [y/N] ",
            entry.name
        );
        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Not deleted.");
            return Ok(());
        }
    }

    surface(NoteDeleter::new(&repository).delete_note(&entry).await)?;
    println!("Deleted {}", entry.name);
    Ok(())
}

async fn ui(store: &ConfigStore) -> Result<()> {
    // The shell cache is independent of everything else; a failure to
    // install it never blocks the session.
    match ShellCache::default_cache() {
        Ok(cache) => spawn_background_install(cache),
        Err(err) => warn!(%err, "Shell cache unavailable"),
    }

    let stdin = std::io::stdin();
    let session = Session::new(
        store,
        |config: &Config| GithubNoteRepository::new(config.clone()),
        TerminalPresenter::new(),
        stdin.lock(),
        std::io::stdout(),
    );
    session.run().await
}
