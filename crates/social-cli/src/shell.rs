//! Line-oriented menu loop.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use social_core::{NewPerson, PersonId, PersonSummary, SocialError};
use social_graph::{GraphBackend, GraphStore, StoreError};

const MENU: &str = "\nMenu:\n\
    1 - Add a person\n\
    2 - List people\n\
    3 - Add a friend\n\
    4 - View a person's friends\n\
    5 - Remove a person\n\
    0 - Exit\n";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Create,
    List,
    Befriend,
    ViewNetwork,
    Remove,
    Exit,
}

impl FromStr for Choice {
    type Err = SocialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Create),
            "2" => Ok(Self::List),
            "3" => Ok(Self::Befriend),
            "4" => Ok(Self::ViewNetwork),
            "5" => Ok(Self::Remove),
            "0" => Ok(Self::Exit),
            other => Err(SocialError::InvalidInput(format!("unknown option {other:?}"))),
        }
    }
}

/// Errors that end the shell. Input and store errors are reported and the
/// loop carries on; these are not.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single menu step did not complete.
#[derive(Debug, thiserror::Error)]
enum StepError {
    #[error(transparent)]
    Input(#[from] SocialError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    Closed,
}

/// Interactive adapter translating typed input into store calls.
pub struct Shell<'a, B, R, W> {
    store: &'a GraphStore<B>,
    input: R,
    output: W,
}

impl<'a, B, R, W> Shell<'a, B, R, W>
where
    B: GraphBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(store: &'a GraphStore<B>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Hand back the output sink, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user picks exit or input ends.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        loop {
            self.write(MENU).await?;
            let Some(line) = self.prompt("Choose an option: ").await? else {
                break;
            };

            let choice = match line.parse::<Choice>() {
                Ok(Choice::Exit) => break,
                Ok(choice) => choice,
                Err(_) => {
                    self.write("Invalid option. Try again.\n").await?;
                    continue;
                }
            };

            match self.step(choice).await {
                Ok(()) => {}
                Err(StepError::Closed) => break,
                Err(StepError::Io(e)) => return Err(e.into()),
                Err(StepError::Input(e)) => {
                    self.write(&format!("{e}\n")).await?;
                }
                Err(StepError::Store(e)) => {
                    tracing::warn!(?choice, error = %e, "Store operation failed");
                    self.write(&format!("Error: {e}\n")).await?;
                }
            }
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn step(&mut self, choice: Choice) -> Result<(), StepError> {
        match choice {
            Choice::Create => {
                let name = self.field("Name: ").await?;
                let age = self.field("Age: ").await?;
                let location = self.field("Location: ").await?;
                let age = parse_int("age", &age)?;
                self.store
                    .create_person(&NewPerson::new(name, age, location))
                    .await?;
            }
            Choice::List => {
                let people = self.store.list_people().await?;
                self.write("People:\n").await?;
                self.write_people(&people).await?;
            }
            Choice::Befriend => {
                let first = self.id_field("ID of the first person: ").await?;
                let second = self.id_field("ID of the second person: ").await?;
                self.store.add_friendship(first, second).await?;
            }
            Choice::ViewNetwork => {
                let id = self.id_field("Person ID: ").await?;
                let friends = self.store.view_friends_network(id).await?;
                self.write(&format!("\nFriends of person {id}:\n")).await?;
                self.write_people(&friends).await?;
            }
            Choice::Remove => {
                let id = self.id_field("ID of the person to remove: ").await?;
                self.store.remove_person(id).await?;
            }
            Choice::Exit => {}
        }
        Ok(())
    }

    async fn write_people(&mut self, people: &[PersonSummary]) -> Result<(), std::io::Error> {
        for person in people {
            self.write(&format!("{person}\n")).await?;
        }
        Ok(())
    }

    async fn id_field(&mut self, label: &str) -> Result<PersonId, StepError> {
        Ok(self.field(label).await?.parse::<PersonId>()?)
    }

    async fn field(&mut self, label: &str) -> Result<String, StepError> {
        self.prompt(label).await?.ok_or(StepError::Closed)
    }

    /// Print `label` and read one line, without its line ending. `None` at
    /// end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, std::io::Error> {
        self.write(label).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    async fn write(&mut self, text: &str) -> Result<(), std::io::Error> {
        self.output.write_all(text.as_bytes()).await
    }
}

fn parse_int(field: &str, raw: &str) -> Result<i64, SocialError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SocialError::InvalidInput(format!("{field} must be an integer, got {raw:?}")))
}
