//! Line-based prompts standing in for the confirm/edit/alert dialogs.
//!
//! Edit prompts are seeded with the current value: an empty line keeps it,
//! `-` clears it and end of input cancels the field.

use async_trait::async_trait;
use client_core::{PersonEdit, PersonInteraction};
use shared::domain::{Person, PersonField};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::warn;

pub const CLEAR_TOKEN: &str = "-";

pub type StdinTerminal = TerminalInteraction<BufReader<Stdin>>;

pub struct TerminalInteraction<R> {
    lines: Mutex<Lines<R>>,
    assume_yes: bool,
}

impl StdinTerminal {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> TerminalInteraction<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes without reading input.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    pub async fn ask(&self, prompt: &str) -> Option<String> {
        eprint!("{prompt}");
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to read answer");
                None
            }
        }
    }

    pub async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.ask(prompt)
            .await
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    /// Prompt for a field of a new person; required fields are marked.
    pub async fn ask_field(&self, field: PersonField) -> Option<String> {
        let marker = if field.is_required() { "*" } else { "" };
        self.ask(&format!("{}{marker}: ", field.label())).await
    }
}

fn seeded_answer(answer: Option<String>, current: &str) -> Option<String> {
    let answer = answer?;
    match answer.as_str() {
        "" => Some(current.to_string()),
        CLEAR_TOKEN => Some(String::new()),
        _ => Some(answer),
    }
}

#[async_trait]
impl<R> PersonInteraction for TerminalInteraction<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm_delete(&self, person: &Person) -> bool {
        self.confirm(&format!(
            "Are you sure you want to delete {} {} (id {})? [y/N] ",
            person.first_name, person.last_name, person.id
        ))
        .await
    }

    async fn request_edit(&self, person: &Person) -> PersonEdit {
        let mut edit = PersonEdit::default();
        for field in PersonField::ALL {
            let current = person.field(field);
            let answer = self
                .ask(&format!("{} [{current}]: ", field.label()))
                .await;
            edit.set(field, seeded_answer(answer, current));
        }
        edit
    }

    async fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
