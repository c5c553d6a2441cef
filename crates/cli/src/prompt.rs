//! Line based prompts over any reader/writer pair.

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use chrono::NaiveDate;
use engine::{MoneyCents, parse_date};

use crate::error::{CliError, Result};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Prints `prompt` and reads one line without its terminator.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(CliError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until `parse` accepts the answer, printing `retry` after each miss.
    pub fn ask_until<T, E>(
        &mut self,
        prompt: &str,
        retry: &str,
        parse: impl Fn(&str) -> std::result::Result<T, E>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(_) => self.say(retry)?,
            }
        }
    }

    pub fn ask_amount(&mut self, prompt: &str) -> Result<MoneyCents> {
        self.ask_until(prompt, "Please enter a valid amount!", |raw| {
            raw.parse::<MoneyCents>()
        })
    }

    pub fn ask_date(&mut self, prompt: &str) -> Result<NaiveDate> {
        self.ask_until(prompt, "Invalid date format, expected YYYY-MM-DD.", parse_date)
    }

    /// Reads an integer ID as typed (1-based, possibly out of range).
    pub fn ask_id(&mut self, prompt: &str) -> Result<i64> {
        self.ask_until(prompt, "Please enter a valid integer!", |raw| {
            raw.trim().parse::<i64>()
        })
    }

    /// Asks until the trimmed answer is not empty.
    pub fn ask_non_empty(&mut self, prompt: &str, retry: &str) -> Result<String> {
        self.ask_until(prompt, retry, |raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(())
            } else {
                Ok(trimmed.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(prompter: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(prompter.output()).into_owned()
    }

    #[test]
    fn amount_reprompts_until_valid() {
        let mut p = prompter("abc\n\n12,5\n");
        assert_eq!(p.ask_amount("Amount: ").unwrap(), MoneyCents::new(1250));
        assert_eq!(printed(&p).matches("Please enter a valid amount!").count(), 2);
    }

    #[test]
    fn date_reprompts_until_valid() {
        let mut p = prompter("2024/01/01\r\n2024-01-31\r\n");
        assert_eq!(p.ask_date("Date: ").unwrap().to_string(), "2024-01-31");
        assert!(printed(&p).contains("Invalid date format"));
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut p = prompter("x\n");
        assert!(matches!(p.ask_id("ID: "), Err(CliError::InputClosed)));
    }
}
