// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::console::Console;
use crate::convert::{convert, round_to};
use crate::db::CurrencyStore;
use crate::error::CurrencyError;
use crate::models::{Currency, CurrencyCache};
use crate::validation;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const MENU_RULE: &str = "--------------------------------";
const TABLE_RULE: &str = "----------------------------------------";

const CODE_PROMPT: &str = "Enter currency code (ex: USD): ";
const CODE_RETRY: &str = "Please enter a valid currency code (ex: USD): ";
const NEW_CODE_PROMPT: &str = "Enter a unique currency code (ex: USD): ";
const NEW_CODE_RETRY: &str = "Please enter a valid, unique, three-letter currency code (ex: USD): ";
const RATE_RETRY: &str = "Please enter a valid number for the exchange rate (ex: 1.0): ";
const EMPTY_TABLE: &str = "\nThere are no currencies yet. Create one with [c] first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exchange,
    Create,
    Read,
    Update,
    Delete,
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'x' => Some(Self::Exchange),
            'c' => Some(Self::Create),
            'r' => Some(Self::Read),
            'u' => Some(Self::Update),
            'd' => Some(Self::Delete),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Terminated,
}

/// Render currencies as the fixed `ID | Code | Rate` listing
pub fn render_table<'a>(currencies: impl IntoIterator<Item = &'a Currency>) -> String {
    let mut out = format!("\nID | Code | Rate\n{}\n", TABLE_RULE);
    for c in currencies {
        out.push_str(&format!("{}\t   | {}\t  | {}\n", c.id, c.code, c.rate));
    }
    out.push_str(TABLE_RULE);
    out
}

/// Menu controller: owns the store and the cache mirroring it
pub struct App<S> {
    store: S,
    cache: CurrencyCache,
}

impl<S: CurrencyStore> App<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: CurrencyCache::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &CurrencyCache {
        &self.cache
    }

    /// Hand the store back so the caller can close it
    pub fn into_store(self) -> S {
        self.store
    }

    pub async fn reload(&mut self) -> Result<(), CurrencyError> {
        self.cache.reload(&self.store).await
    }

    /// Loop over the menu until the user quits or input ends
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<(), CurrencyError> {
        console.say("Currency Converter")?;

        let mut state = MenuState::Running;
        while state == MenuState::Running {
            state = self.step(console).await?;
        }

        debug!("menu terminated");
        Ok(())
    }

    /// Show the menu once, read one command and handle it
    pub async fn step<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<MenuState, CurrencyError> {
        console.say(format!(
            "\n{rule}\n[x] - Exchange currency\n[c] - Create new currency entry\n\
             [r] - Read currency database\n[u] - Update currency entry\n\
             [d] - Delete currency entry\n{rule}\n",
            rule = MENU_RULE
        ))?;
        console.say("Choose a menu option to continue, or press [q] to quit.")?;

        let key = match console.read_key() {
            Ok(key) => key,
            Err(CurrencyError::InputClosed) => return Ok(MenuState::Terminated),
            Err(e) => return Err(e),
        };

        let command = match key.and_then(Command::from_key) {
            Some(Command::Quit) => return Ok(MenuState::Terminated),
            Some(command) => command,
            None => return Ok(MenuState::Running),
        };
        debug!(?command, "dispatching menu command");

        match self.dispatch(command, console).await {
            Ok(()) => Ok(MenuState::Running),
            Err(CurrencyError::InputClosed) => Ok(MenuState::Terminated),
            Err(
                e @ (CurrencyError::Store(_)
                | CurrencyError::MissingRow(_)
                | CurrencyError::NotFound(_)),
            ) => {
                warn!(error = %e, ?command, "menu command failed");
                console.say(format!("\nError: {}", e))?;
                Ok(MenuState::Running)
            }
            Err(e) => Err(e),
        }
    }

    async fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        console: &mut Console<R, W>,
    ) -> Result<(), CurrencyError> {
        let needs_currency = matches!(command, Command::Exchange | Command::Update | Command::Delete);
        if needs_currency && self.cache.is_empty() {
            return console.say(EMPTY_TABLE);
        }

        match command {
            Command::Exchange => self.exchange(console),
            Command::Create => self.create(console).await,
            Command::Read => self.read(console),
            Command::Update => self.update(console).await,
            Command::Delete => self.delete(console).await,
            Command::Quit => Ok(()),
        }
    }

    fn exchange<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<(), CurrencyError> {
        console.say("\nWhich currency are you converting from?")?;
        let from = prompt_existing_code(console, &self.cache)?;
        console.say("Which currency are you converting to?")?;
        let to = prompt_existing_code(console, &self.cache)?;

        let amount = console.prompt_until(
            "Enter amount of currency to convert (ex: 1.0): ",
            "Enter a valid number for the amount of currency to convert (ex: 1.0): ",
            validation::amount,
        )?;

        let converted = convert(&self.cache, &from, &to, amount)?;

        console.say(format!("\n{}", MENU_RULE))?;
        console.say(format!(
            "{} {} equals {} {}.",
            amount,
            from,
            round_to(converted, 4),
            to
        ))?;
        console.say(MENU_RULE)
    }

    async fn create<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<(), CurrencyError> {
        let taken = self.cache.codes();
        let code = console.prompt_until(&format!("\n{}", NEW_CODE_PROMPT), NEW_CODE_RETRY, |line| {
            validation::new_code(line, &taken)
        })?;
        let rate = console.prompt_until("Enter exchange rate (ex: 1.0): ", RATE_RETRY, validation::rate)?;

        self.store.insert(&code, rate).await?;
        self.cache.reload(&self.store).await?;

        let created = self.cache.find(&code)?;
        console.say(render_table([created]))
    }

    fn read<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<(), CurrencyError> {
        console.say(render_table(self.cache.iter()))
    }

    async fn update<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<(), CurrencyError> {
        console.say("Which currency would you like to update?")?;
        let code = prompt_existing_code(console, &self.cache)?;
        let record = self.cache.find(&code)?.clone();
        console.say(render_table([&record]))?;

        // The record may keep its own code
        let mut taken = self.cache.codes();
        taken.remove(&record.code);
        let new_code = console.prompt_until(NEW_CODE_PROMPT, NEW_CODE_RETRY, |line| {
            validation::new_code(line, &taken)
        })?;
        let rate = console.prompt_until("Enter updated exchange rate (ex: 1.0): ", RATE_RETRY, validation::rate)?;

        self.store.update(record.id, &new_code, rate).await?;
        self.cache.reload(&self.store).await?;

        let updated = self.cache.find(&new_code)?;
        console.say(render_table([updated]))
    }

    async fn delete<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<(), CurrencyError> {
        console.say("Which currency would you like to delete?")?;
        let code = prompt_existing_code(console, &self.cache)?;
        let record = self.cache.find(&code)?.clone();
        console.say(render_table([&record]))?;

        console.say(format!("\nAre you sure you want to delete the entry for {}?", record.code))?;
        console.say("Press [y] or [n]: ")?;

        if matches!(console.read_key()?, Some('y' | 'Y')) {
            self.store.delete(record.id).await?;
            self.cache.remove(&record);
            console.say(format!("Deleted {}.", record.code))
        } else {
            console.say(format!("Kept {}.", record.code))
        }
    }
}

fn prompt_existing_code<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    cache: &CurrencyCache,
) -> Result<String, CurrencyError> {
    let codes = cache.codes();
    console.prompt_until(CODE_PROMPT, CODE_RETRY, |line| validation::existing_code(line, &codes))
}
