// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::{CurrencyError, ValidationError};
use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};
use tracing::debug;

/// Line-oriented prompt/answer wrapper over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

pub fn stdio() -> Console<StdinLock<'static>, Stdout> {
    Console::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line ending. End of input is `InputClosed`.
    pub fn read_line(&mut self) -> Result<String, CurrencyError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CurrencyError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// First non-blank character of the next line, `None` for an empty line
    pub fn read_key(&mut self) -> Result<Option<char>, CurrencyError> {
        let line = self.read_line()?;
        Ok(line.trim().chars().next())
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), CurrencyError> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Show `prompt`, then keep reading lines until `validate` accepts one,
    /// showing `retry` after every rejection.
    pub fn prompt_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut validate: impl FnMut(&str) -> Result<T, ValidationError>,
    ) -> Result<T, CurrencyError> {
        self.say(prompt)?;
        loop {
            let line = self.read_line()?;
            match validate(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(error = %e, "rejected input");
                    self.say(retry)?;
                }
            }
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn written(console: &Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut c = console("abc\r\nxyz\n");
        assert_eq!(c.read_line().unwrap(), "abc");
        assert_eq!(c.read_line().unwrap(), "xyz");
        assert!(matches!(c.read_line(), Err(CurrencyError::InputClosed)));
    }

    #[test]
    fn test_read_key() {
        let mut c = console("  x extra\n\n");
        assert_eq!(c.read_key().unwrap(), Some('x'));
        assert_eq!(c.read_key().unwrap(), None);
    }

    #[test]
    fn test_prompt_until_retries() {
        let mut c = console("abc\n\n2.5\n");
        let value = c
            .prompt_until("Amount:", "Try again:", validation::amount)
            .unwrap();
        assert_eq!(value, 2.5);

        let out = written(&c);
        assert_eq!(out.matches("Amount:").count(), 1);
        assert_eq!(out.matches("Try again:").count(), 2);
    }

    #[test]
    fn test_prompt_until_stops_at_end_of_input() {
        let mut c = console("abc\n");
        let result = c.prompt_until("Amount:", "Try again:", validation::amount);
        assert!(matches!(result, Err(CurrencyError::InputClosed)));
    }
}
