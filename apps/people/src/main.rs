use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AddPersonController, ApiUrlResolver, DeleteOutcome, ListState, PeopleApi, PeopleClient,
    PeopleListController, SubmitOutcome, UpdateOutcome,
};
use shared::{
    domain::{PersonField, PersonId},
    error::ValidationError,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod terminal;

use config::load_settings;
use render::{render_list, render_message};
use terminal::StdinTerminal;

#[derive(Parser, Debug)]
#[command(name = "people", about = "List, add, update and delete people on a people backend")]
struct Cli {
    /// Base address of the people backend; overrides settings and environment.
    #[arg(long)]
    backend_url: Option<String>,
    /// Settings file (defaults to ./people.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log every resolved backend URL.
    #[arg(long)]
    debug_urls: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Add {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
    },
    Update {
        id: PersonId,
    },
    Delete {
        id: PersonId,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(backend_url) = cli.backend_url {
        settings.backend_api_url = backend_url;
    }
    if cli.debug_urls {
        settings.debug_urls = true;
    }
    if let Some(problem) = settings.backend_url_problem() {
        warn!(%problem, "requests will likely fail");
    }

    let api: Arc<dyn PeopleApi> = Arc::new(
        PeopleClient::new(ApiUrlResolver::new(settings.backend_api_url.clone()))
            .with_debug_urls(settings.debug_urls),
    );
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });
    let terminal = Arc::new(StdinTerminal::stdin().assume_yes(assume_yes));
    let mut list = PeopleListController::new(Arc::clone(&api), terminal.clone());

    match cli.command {
        Command::List => {
            load(&mut list).await?;
        }
        Command::Add {
            first_name,
            last_name,
            email,
            phone_number,
        } => {
            let form = AddPersonController::with_collapse_delay(api, settings.collapse_delay());
            let preset = [
                (PersonField::FirstName, first_name),
                (PersonField::LastName, last_name),
                (PersonField::Email, email),
                (PersonField::PhoneNumber, phone_number),
            ];
            add_person(&form, &mut list, &terminal, preset).await?;
        }
        Command::Update { id } => {
            load(&mut list).await?;
            let person = list
                .find(id)
                .cloned()
                .ok_or_else(|| anyhow!("no person with id {id}"))?;
            let outcome = list.update(&person).await;
            println!("{}", render_list(&list));
            match outcome {
                UpdateOutcome::Updated => {}
                UpdateOutcome::Rejected(err) => bail!("update cancelled: {err}"),
                UpdateOutcome::Failed => bail!("person {id} was not updated"),
            }
        }
        Command::Delete { id, .. } => {
            load(&mut list).await?;
            let outcome = list.delete(id).await;
            println!("{}", render_list(&list));
            match outcome {
                DeleteOutcome::Deleted | DeleteOutcome::Declined => {}
                DeleteOutcome::NotFound => bail!("no person with id {id}"),
                DeleteOutcome::Failed => bail!("person {id} was not deleted"),
            }
        }
    }

    Ok(())
}

async fn load(list: &mut PeopleListController) -> Result<()> {
    eprintln!("{}", render::LOADING);
    let state = list.refresh().await;
    if state == ListState::Error {
        println!("{}", render_list(list));
        bail!("could not load people");
    }
    println!("{}", render_list(list));
    Ok(())
}

async fn add_person(
    form: &Arc<AddPersonController>,
    list: &mut PeopleListController,
    terminal: &StdinTerminal,
    preset: [(PersonField, Option<String>); 4],
) -> Result<()> {
    let mut events = form.subscribe();
    form.show().await;

    for (field, value) in preset {
        let value = match value {
            Some(value) => value,
            None => match terminal.ask_field(field).await {
                Some(value) => value,
                None => {
                    form.cancel().await;
                    bail!("add cancelled");
                }
            },
        };
        form.set_field(field, value).await;
    }

    loop {
        match form.submit().await {
            SubmitOutcome::Submitted => break,
            SubmitOutcome::Invalid(ValidationError::MissingField(field)) => {
                eprintln!("{} is required", field.label());
                let Some(value) = terminal.ask_field(field).await else {
                    form.cancel().await;
                    bail!("add cancelled");
                };
                form.set_field(field, value).await;
            }
            SubmitOutcome::Invalid(err) => return Err(err.into()),
            SubmitOutcome::Failed => {
                if let Some(message) = form.snapshot().await.message {
                    eprintln!("{}", render_message(&message));
                }
                if !terminal.confirm("Retry? [y/N] ").await {
                    form.cancel().await;
                    bail!("person was not added");
                }
            }
            SubmitOutcome::AlreadySubmitting | SubmitOutcome::NotEditing => {
                bail!("add person form is not accepting submissions")
            }
        }
    }

    if let Some(message) = form.snapshot().await.message {
        eprintln!("{}", render_message(&message));
    }
    let event = events
        .recv()
        .await
        .context("add person form closed without notifying")?;
    list.handle_event(&event).await;
    println!("{}", render_list(list));
    Ok(())
}
