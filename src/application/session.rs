// src/application/session.rs
use crate::application::settings::SettingsStore;
use crate::application::{NoteDeleter, NoteLister, NoteRepository, NoteViewer, NoteWriter};
use crate::domain::filename::filename_for;
use crate::domain::{Config, DomainError, Event, HeaderAction, NoteEntry, OpenNote, View};
use crate::ports::TerminalPresenter;
use anyhow::{Context, Result};
use chrono::Local;
use std::io::{BufRead, Write};
use tracing::debug;

/// Explicit application state, passed to and returned from every controller.
///
/// There is no global state; whatever a controller changes it hands back.
#[derive(Debug)]
pub struct AppState {
    pub view: View,
    pub notes: Vec<NoteEntry>,
    pub current: Option<OpenNote>,
    pub config: Config,
    pub running: bool,
}

impl AppState {
    /// Start in the list when the config is usable, otherwise in settings.
    pub fn new(config: Config) -> Self {
        let view = if config.is_valid() {
            View::List
        } else {
            View::Settings
        };
        Self {
            view,
            notes: Vec::new(),
            current: None,
            config,
            running: true,
        }
    }
}

fn action_label(action: HeaderAction) -> &'static str {
    match action {
        HeaderAction::Back => "back",
        HeaderAction::Add => "add",
        HeaderAction::Settings => "settings",
        HeaderAction::Save => "save",
    }
}

fn masked(token: &str) -> String {
    if token.is_empty() {
        "(unset)".to_string()
    } else if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        let head: String = token.chars().take(4).collect();
        format!("{head}…")
    }
}

/// The interactive prompt/response session.
///
/// Reader and writer are injected so the whole loop runs against scripted
/// input in tests. The repository is rebuilt whenever a new configuration is
/// saved, via the `make_repo` factory.
pub struct Session<'a, S, Repo, F, In, Out> {
    store: &'a S,
    make_repo: F,
    repo: Option<Repo>,
    presenter: TerminalPresenter,
    input: In,
    out: Out,
}

impl<'a, S, Repo, F, In, Out> Session<'a, S, Repo, F, In, Out>
where
    S: SettingsStore,
    Repo: NoteRepository,
    F: Fn(&Config) -> Result<Repo, DomainError>,
    In: BufRead,
    Out: Write,
{
    pub fn new(store: &'a S, make_repo: F, presenter: TerminalPresenter, input: In, out: Out) -> Self {
        Self {
            store,
            make_repo,
            repo: None,
            presenter,
            input,
            out,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let config = self.store.load()?;
        let mut state = AppState::new(config);

        if state.config.is_valid() {
            match (self.make_repo)(&state.config) {
                Ok(repo) => self.repo = Some(repo),
                Err(err) => {
                    let message = self.presenter.error_message(&err);
                    writeln!(self.out, "{message}")?;
                    state.view = View::Settings;
                }
            }
        }
        if state.view == View::List {
            state = self.refresh(state).await?;
        }

        while state.running {
            self.render(&state)?;
            let Some(line) = self.read_line()? else { break };
            let line = line.trim().to_string();

            state = match state.view {
                View::Settings => self.handle_settings(state, &line).await?,
                View::List => self.handle_list(state, &line).await?,
                View::Detail => self.handle_detail(state, &line).await?,
                // The editor consumes its own input inside editor_flow and
                // always leaves back to the list before the loop resumes.
                View::Editor => state,
            };
        }
        Ok(())
    }

    /// Apply a navigation event, staying put when it is invalid here.
    fn apply(state: &mut AppState, event: Event) {
        if let Some(next) = state.view.transition(event) {
            debug!(?event, ?next, "View transition");
            state.view = next;
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let n = self
            .input
            .read_line(&mut buf)
            .context("Failed to read input")?;
        if n == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn render_header(&mut self, state: &AppState) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", state.view.title())?;

        let actions: Vec<&str> = state
            .view
            .actions(state.config.is_valid())
            .iter()
            .map(|a| action_label(*a))
            .collect();
        if !actions.is_empty() {
            writeln!(self.out, "Actions: {}", actions.join(" | "))?;
        }
        Ok(())
    }

    fn render(&mut self, state: &AppState) -> Result<()> {
        self.render_header(state)?;

        match state.view {
            View::Settings => {
                writeln!(self.out, "account:    {}", state.config.account)?;
                writeln!(self.out, "repository: {}", state.config.repository)?;
                writeln!(self.out, "token:      {}", masked(&state.config.token))?;
                writeln!(
                    self.out,
                    "Set fields with `account <value>`, `repository <value>`, `token <value>`, then `save`."
                )?;
            }
            View::List => {
                let listing = self.presenter.render_list(&state.notes);
                writeln!(self.out, "{listing}")?;
                writeln!(
                    self.out,
                    "Open a note by number, or: add | settings | refresh | quit"
                )?;
            }
            View::Detail => {
                if let Some(open) = &state.current {
                    let rendered = self.presenter.render(&open.body);
                    writeln!(self.out, "{rendered}")?;
                }
                writeln!(self.out, "Commands: edit | delete | back")?;
            }
            View::Editor => {}
        }

        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    async fn refresh(&mut self, mut state: AppState) -> Result<AppState> {
        let result = match self.repo.as_ref() {
            Some(repo) => NoteLister::new(repo).list_notes().await,
            None => Err(DomainError::ConfigMissing),
        };
        match result {
            Ok(notes) => state.notes = notes,
            Err(err) => {
                let message = self.presenter.error_message(&err);
                writeln!(self.out, "{message}")?;
            }
        }
        Ok(state)
    }

    async fn handle_settings(&mut self, mut state: AppState, line: &str) -> Result<AppState> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "account" => {
                state.config.account = rest.to_string();
                writeln!(self.out, "account set.")?;
            }
            "repository" => {
                state.config.repository = rest.to_string();
                writeln!(self.out, "repository set.")?;
            }
            "token" => {
                state.config.token = rest.to_string();
                writeln!(self.out, "token set.")?;
            }
            "save" => {
                let candidate = state.config.clone().normalized();
                if !candidate.is_valid() {
                    writeln!(self.out, "All three fields are required.")?;
                    return Ok(state);
                }
                match self.store.save(&candidate) {
                    Err(err) => writeln!(self.out, "{err:#}")?,
                    Ok(stored) => {
                        state.config = stored;
                        match (self.make_repo)(&state.config) {
                            Ok(repo) => {
                                self.repo = Some(repo);
                                Self::apply(&mut state, Event::ConfigSaved);
                                state = self.refresh(state).await?;
                            }
                            Err(err) => {
                                let message = self.presenter.error_message(&err);
                                writeln!(self.out, "{message}")?;
                            }
                        }
                    }
                }
            }
            "back" => {
                if state.config.is_valid() {
                    Self::apply(&mut state, Event::Back);
                } else {
                    writeln!(self.out, "Complete the configuration first.")?;
                }
            }
            "" => {}
            _ => writeln!(self.out, "Unknown command.")?,
        }
        Ok(state)
    }

    async fn handle_list(&mut self, mut state: AppState, line: &str) -> Result<AppState> {
        match line {
            "quit" | "q" => {
                state.running = false;
                return Ok(state);
            }
            "add" => {
                Self::apply(&mut state, Event::Add);
                return self.editor_flow(state, None).await;
            }
            "settings" => {
                Self::apply(&mut state, Event::OpenSettings);
                return Ok(state);
            }
            "refresh" => {
                return self.refresh(state).await;
            }
            "" => return Ok(state),
            _ => {}
        }

        let Ok(index) = line.parse::<usize>() else {
            writeln!(self.out, "Unknown command.")?;
            return Ok(state);
        };
        if index < 1 || index > state.notes.len() {
            writeln!(self.out, "No such note.")?;
            return Ok(state);
        }

        let entry = state.notes[index - 1].clone();
        let result = match self.repo.as_ref() {
            Some(repo) => NoteViewer::new(repo).view_note(&entry).await,
            None => Err(DomainError::ConfigMissing),
        };
        match result {
            Ok(open) => {
                state.current = Some(open);
                Self::apply(&mut state, Event::Select);
            }
            Err(err) => {
                let message = self.presenter.error_message(&err);
                writeln!(self.out, "{message}")?;
            }
        }
        Ok(state)
    }

    async fn handle_detail(&mut self, mut state: AppState, line: &str) -> Result<AppState> {
        match line {
            "back" => {
                Self::apply(&mut state, Event::Back);
            }
            "edit" => {
                let Some(open) = state.current.clone() else {
                    writeln!(self.out, "No note is open.")?;
                    return Ok(state);
                };
                Self::apply(&mut state, Event::Edit);
                return self.editor_flow(state, Some(open)).await;
            }
            "delete" => {
                let Some(open) = state.current.clone() else {
                    writeln!(self.out, "No note is open.")?;
                    return Ok(state);
                };
                write!(
                    self.out,
                    "Really delete this note? It cannot be undone. [y/N] "
                )?;
                self.out.flush()?;
                let Some(answer) = self.read_line()? else {
                    return Ok(state);
                };
                if !matches!(answer.trim(), "y" | "Y" | "yes") {
                    writeln!(self.out, "Not deleted.")?;
                    return Ok(state);
                }

                let result = match self.repo.as_ref() {
                    Some(repo) => NoteDeleter::new(repo).delete_note(&open.entry).await,
                    None => Err(DomainError::ConfigMissing),
                };
                match result {
                    Ok(()) => {
                        writeln!(self.out, "Deleted {}.", open.entry.name)?;
                        state.current = None;
                        Self::apply(&mut state, Event::Back);
                        state = self.refresh(state).await?;
                    }
                    Err(err) => {
                        let message = self.presenter.error_message(&err);
                        writeln!(self.out, "{message}")?;
                    }
                }
            }
            "" => {}
            _ => writeln!(self.out, "Unknown command.")?,
        }
        Ok(state)
    }

    /// The editor runs as a sub-flow: title (locked for an existing note),
    /// body lines terminated by a lone `.`, then save and back to the list.
    async fn editor_flow(
        &mut self,
        mut state: AppState,
        existing: Option<OpenNote>,
    ) -> Result<AppState> {
        self.render_header(&state)?;

        let title = match &existing {
            Some(open) => {
                writeln!(self.out, "Title: {} (locked)", open.entry.display_title())?;
                writeln!(self.out, "Current content:")?;
                let rendered = self.presenter.render(&open.body);
                writeln!(self.out, "{rendered}")?;
                String::new()
            }
            None => {
                write!(self.out, "Title: ")?;
                self.out.flush()?;
                let Some(line) = self.read_line()? else {
                    Self::apply(&mut state, Event::Back);
                    return Ok(state);
                };
                let title = line.trim().to_string();
                if title.is_empty() {
                    writeln!(self.out, "Title must not be empty.")?;
                    Self::apply(&mut state, Event::Back);
                    return Ok(state);
                }
                writeln!(
                    self.out,
                    "Will be saved as: {}",
                    filename_for(&title, Local::now().naive_local())
                )?;
                title
            }
        };

        writeln!(self.out, "Enter the note body; finish with a single '.' line.")?;
        let mut lines = Vec::new();
        let mut cancelled = false;
        loop {
            match self.read_line()? {
                None => {
                    cancelled = true;
                    break;
                }
                Some(line) if line.trim_end() == "." => break,
                Some(line) => lines.push(line),
            }
        }
        if cancelled {
            Self::apply(&mut state, Event::Back);
            return Ok(state);
        }
        let body = lines.join("\n");

        let result = match self.repo.as_ref() {
            Some(repo) => match &existing {
                Some(open) => NoteWriter::new(repo)
                    .update(&open.entry, &body)
                    .await
                    .map(|_| open.entry.name.clone()),
                None => {
                    NoteWriter::new(repo)
                        .create(&title, &body, Local::now().naive_local())
                        .await
                }
            },
            None => Err(DomainError::ConfigMissing),
        };
        match result {
            Ok(name) => writeln!(self.out, "Saved {name}.")?,
            Err(err) => {
                let message = self.presenter.error_message(&err);
                writeln!(self.out, "{message}")?;
            }
        }

        state.current = None;
        Self::apply(&mut state, Event::Back);
        self.refresh(state).await
    }
}
