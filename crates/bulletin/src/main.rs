//! `bboard` - CLI for bulletin
//!
//! This binary opens the local board, applies one command (or an interactive
//! session of commands) and prints the resulting board.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use bulletin::cli::{
    config_cmd, session, ClearCommand, Cli, Command, DeleteCommand, OutputFormat, PostCommand,
};
use bulletin::render::{DateFormatter, HtmlRenderer, JsonRenderer, Locale, TerminalRenderer};
use bulletin::{
    init_logging, Board, ClickOutcome, Config, PostForm, PostStore, Renderer, SqliteStore,
    SubmitOutcome, SystemClock,
};

type CliBoard = Board<SqliteStore, Box<dyn Renderer>, SystemClock>;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config_path = cli.config;
    let load_config = || Config::load_from(config_path.clone());

    match cli.command {
        Command::List(list_cmd) => {
            start_board(&load_config()?, list_cmd.format)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Post(post_cmd) => handle_post(&load_config()?, &post_cmd),
        Command::Delete(delete_cmd) => handle_delete(&load_config()?, &delete_cmd),
        Command::Session(session_cmd) => {
            let mut board = start_board(&load_config()?, OutputFormat::Plain)?;
            eprintln!("{}", session::HELP);
            session::run(&mut board, session_cmd.author, io::stdin().lock(), io::stderr())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Clear(clear_cmd) => handle_clear(&load_config()?, &clear_cmd),
        Command::Status(status_cmd) => {
            handle_status(&load_config()?, status_cmd.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(config_cmd) => Ok(config_cmd::run(
            config_path.clone(),
            config_cmd,
            &mut io::stdout().lock(),
        )?),
    }
}

fn open_store(config: &Config) -> anyhow::Result<PostStore<SqliteStore>> {
    let path = config.database_path();
    let backend = SqliteStore::open(&path)
        .with_context(|| format!("cannot open board at {}", path.display()))?;
    Ok(PostStore::new(backend, config.storage.key.clone()))
}

fn renderer_for(format: OutputFormat, locale: Locale) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Plain => Box::new(TerminalRenderer::new(io::stdout())),
        OutputFormat::Html => Box::new(HtmlRenderer::new(io::stdout(), locale)),
        OutputFormat::Json => Box::new(JsonRenderer::new(io::stdout())),
    }
}

fn open_board(config: &Config, format: OutputFormat) -> anyhow::Result<CliBoard> {
    let settings = config.board_settings();
    let renderer = renderer_for(format, settings.locale);
    Ok(Board::open(open_store(config)?, renderer, SystemClock, settings))
}

fn start_board(config: &Config, format: OutputFormat) -> anyhow::Result<CliBoard> {
    let mut board = open_board(config, format)?;
    board.render()?;
    Ok(board)
}

fn handle_post(config: &Config, cmd: &PostCommand) -> anyhow::Result<ExitCode> {
    let mut board = open_board(config, cmd.format)?;
    let mut form = PostForm::new(cmd.author.clone().unwrap_or_default(), cmd.content_text());

    match board.submit(&mut form)? {
        SubmitOutcome::Created(post) => {
            eprintln!("Posted {}", post.id);
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected { .. } => {
            eprintln!("Nothing posted: the message is empty.");
            Ok(ExitCode::from(2))
        }
    }
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<ExitCode> {
    let mut board = open_board(config, cmd.format)?;

    match board.delete(&cmd.id)? {
        ClickOutcome::Deleted(_) => {
            eprintln!("Deleted {}", cmd.id);
        }
        ClickOutcome::Ignored => {
            eprintln!("No post with id '{}'; nothing deleted.", cmd.id);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_clear(config: &Config, cmd: &ClearCommand) -> anyhow::Result<ExitCode> {
    if !cmd.yes {
        println!("This will delete every post on the board.");
        println!("Use --yes to confirm.");
        return Ok(ExitCode::FAILURE);
    }

    let mut board = open_board(config, OutputFormat::Plain)?;
    let removed = board.clear()?;
    eprintln!("Deleted {removed} posts.");
    Ok(ExitCode::SUCCESS)
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let posts = store.load(&SystemClock);
    let stats = store.backend().stats()?;
    let keys = store.backend().keys()?;

    let newest = posts.first().map(|p| DateFormatter::iso(p.timestamp));
    let oldest = posts.last().map(|p| DateFormatter::iso(p.timestamp));

    if json {
        let status = serde_json::json!({
            "database_path": store.backend().path(),
            "key": store.key(),
            "posts": posts.len(),
            "newest_post": newest,
            "oldest_post": oldest,
            "store_items": stats.items,
            "store_keys": keys,
            "store_value_bytes": stats.value_bytes,
            "database_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("bboard status");
        println!("-------------");
        println!("Database:      {}", store.backend().path().display());
        println!("Key:           {}", store.key());
        println!("Posts:         {}", posts.len());
        println!("Newest post:   {}", newest.as_deref().unwrap_or("-"));
        println!("Oldest post:   {}", oldest.as_deref().unwrap_or("-"));
        println!("Store items:   {}", stats.items);
        println!("Store keys:    {}", keys.join(", "));
        println!("Stored bytes:  {}", stats.value_bytes);
        println!("Database size: {} bytes", stats.db_size_bytes);
    }
    Ok(())
}
