//! Interactive session over a line-oriented input.
//!
//! Each input line is one event on a single board: posting, changing the
//! author, deleting, repainting. The board's renderer draws the list; short
//! notices (rejections, unknown ids, storage errors) go to a separate writer.

use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::board::{Board, ClickOutcome, PostForm, SubmitOutcome};
use crate::clock::Clock;
use crate::error::Result;
use crate::render::Renderer;
use crate::storage::KeyValueStore;

/// Help text for the session.
pub const HELP: &str = "\
commands:
  post <text>     add a post
  author <name>   post as <name> (empty for anonymous)
  delete <id>     delete a post
  list            show the board again
  help            show this help
  quit            end the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Submit a post with this content.
    Post(String),
    /// Set the author field.
    Author(String),
    /// Delete the post with this id.
    Delete(String),
    /// Repaint the board.
    List,
    /// Print the help text.
    Help,
    /// End the session.
    Quit,
    /// A blank line.
    Blank,
    /// Anything else.
    Unknown(String),
}

impl SessionInput {
    /// Parse one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Self::Blank;
        }
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        match word {
            "post" | "p" => Self::Post(rest.to_string()),
            "author" | "a" => Self::Author(rest.trim().to_string()),
            "delete" | "d" | "rm" => Self::Delete(rest.trim().to_string()),
            "list" | "ls" | "l" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(word.to_string()),
        }
    }
}

/// Run a session until `quit` or end of input.
///
/// Storage failures are reported on `notes` and the session continues with
/// the board unchanged.
///
/// # Errors
///
/// Returns an error if reading input, writing notices or rendering fails.
pub fn run<S, R, C>(
    board: &mut Board<S, R, C>,
    author: Option<String>,
    input: impl BufRead,
    mut notes: impl Write,
) -> Result<()>
where
    S: KeyValueStore,
    R: Renderer,
    C: Clock,
{
    let mut form = PostForm::new(author.unwrap_or_default(), String::new());

    for line in input.lines() {
        let command = SessionInput::parse(&line?);
        debug!(?command, "session input");
        match command {
            SessionInput::Post(text) => {
                form.content = text;
                match board.submit(&mut form) {
                    Ok(SubmitOutcome::Created(post)) => writeln!(notes, "posted {}", post.id)?,
                    Ok(SubmitOutcome::Rejected { .. }) => {
                        writeln!(notes, "a post needs some content")?;
                    }
                    Err(err) if err.is_storage_write() => {
                        error!(error = %err, "post not saved");
                        writeln!(notes, "error: {err}")?;
                    }
                    Err(err) => return Err(err),
                }
            }
            SessionInput::Author(name) => form.author = name,
            SessionInput::Delete(id) => match board.delete(&id) {
                Ok(ClickOutcome::Deleted(_)) => writeln!(notes, "deleted {id}")?,
                Ok(ClickOutcome::Ignored) => writeln!(notes, "no post with id '{id}'")?,
                Err(err) if err.is_storage_write() => {
                    error!(error = %err, "delete not saved");
                    writeln!(notes, "error: {err}")?;
                }
                Err(err) => return Err(err),
            },
            SessionInput::List => board.render()?,
            SessionInput::Help => writeln!(notes, "{HELP}")?,
            SessionInput::Quit => break,
            SessionInput::Blank => {}
            SessionInput::Unknown(word) => {
                writeln!(notes, "unknown command '{word}', try 'help'")?;
            }
        }
    }

    Ok(())
}
