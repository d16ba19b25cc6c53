//! REPL commands and the session state they operate on
//!
//! A `Session` owns the API client and the location-area page cursor. Each
//! command writes its output to the supplied writer so the command loop can be
//! driven without a terminal.

use std::io::{self, Write};

use thiserror::Error;

use crate::data::{ApiError, LocationAreaPage, PokeApiClient};

/// Errors returned by command handlers
#[derive(Debug, Error)]
pub enum CommandError {
    /// Fetching from the API failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A required argument was not given
    #[error("missing argument, usage: {0}")]
    MissingArgument(&'static str),

    /// Writing output failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
}

impl Command {
    /// All commands, in the order `help` lists them
    pub const ALL: [Command; 5] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
    ];

    /// The word typed to run the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Show the next page of locations",
            Command::MapBack => "Show the previous page of locations",
            Command::Explore => "List the Pokemon found in a location area",
        }
    }

    /// Looks up a command by its (already lowercased) name
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// What the command loop should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Position in the paginated location-area listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// URL `map` will fetch, `None` once the last page was shown
    pub next: Option<String>,
    /// URL `mapb` will fetch, `None` while on the first page
    pub previous: Option<String>,
}

impl PageCursor {
    fn advance_to(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
    }
}

/// State shared by all commands for the lifetime of the REPL
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    cursor: PageCursor,
}

impl Session {
    /// Creates a session positioned before the first page of `page_size` areas
    pub fn new(client: PokeApiClient, page_size: u32) -> Self {
        let cursor = PageCursor {
            next: Some(client.location_areas_url(0, page_size)),
            previous: None,
        };
        Self { client, cursor }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Runs `command` with the words that followed it on the input line
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        match command {
            Command::Help => {
                write_help(out)?;
                Ok(Flow::Continue)
            }
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                Ok(Flow::Exit)
            }
            Command::Map => {
                match self.cursor.next.clone() {
                    Some(url) => self.show_page(&url, out).await?,
                    None => writeln!(out, "No more pages to load.")?,
                }
                Ok(Flow::Continue)
            }
            Command::MapBack => {
                match self.cursor.previous.clone() {
                    Some(url) => self.show_page(&url, out).await?,
                    None => writeln!(out, "No previous page available.")?,
                }
                Ok(Flow::Continue)
            }
            Command::Explore => {
                let area_name = args
                    .first()
                    .ok_or(CommandError::MissingArgument("explore <area_name>"))?;
                self.explore(area_name, out).await?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Fetches the page at `url`, moves the cursor, and prints the area names
    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<(), CommandError> {
        let page = self.client.fetch_location_areas(url).await?;
        self.cursor.advance_to(&page);

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&self, area_name: &str, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Exploring {}...", area_name)?;
        let area = self.client.fetch_location_area(area_name).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &area.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for command in Command::ALL {
        writeln!(out, "{}: {}", command.name(), command.description())?;
    }
    Ok(())
}
