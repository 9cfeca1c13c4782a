// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store the GitHub account, repository and access token
    Setup {
        /// Account owning the notes repository
        #[arg(value_name = "ACCOUNT")]
        account: String,

        /// Repository the notes are stored in
        #[arg(value_name = "REPOSITORY")]
        repository: String,

        /// Personal access token with contents permission
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// List notes, newest first
    List,

    /// Show a note
    Show {
        /// Note filename, or a unique prefix of it
        #[arg(value_name = "NAME")]
        name: String,

        /// Output note as JSON instead of rendering it
        #[arg(long)]
        json: bool,

        /// Print the raw Markdown without any rendering
        #[arg(long, conflicts_with = "json")]
        raw: bool,
    },

    /// Add a new note
    Add {
        /// Note title; the filename is derived from it
        #[arg(value_name = "TITLE")]
        title: String,

        /// Note body (reads stdin when neither --body nor --file is given)
        #[arg(long, value_name = "TEXT")]
        body: Option<String>,

        /// Read the note body from a file
        #[arg(long, value_name = "FILE", conflicts_with = "body")]
        file: Option<PathBuf>,
    },

    /// Replace the content of an existing note
    Edit {
        /// Note filename, or a unique prefix of it
        #[arg(value_name = "NAME")]
        name: String,

        /// New body (reads stdin when neither --body nor --file is given)
        #[arg(long, value_name = "TEXT")]
        body: Option<String>,

        /// Read the new body from a file
        #[arg(long, value_name = "FILE", conflicts_with = "body")]
        file: Option<PathBuf>,
    },

    /// Delete a note
    Delete {
        /// Note filename, or a unique prefix of it
        #[arg(value_name = "NAME")]
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session with list, detail, editor and settings views
    Ui,
}
