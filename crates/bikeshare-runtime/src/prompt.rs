//! Line-oriented prompts with validation.
//!
//! Every question is asked again until the answer parses. The input stream
//! reaching end-of-file is the only way out of a prompt without a valid
//! answer and surfaces as [`BikeshareError::InputClosed`].

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, DayFilter, FilterSelection, InvalidChoice, MonthFilter};

pub const CITY_QUESTION: &str =
    "Would you like to see data for Chicago, New York City, or Washington?";
pub const MONTH_QUESTION: &str = "For which month (January through June) would you like to see data? \
If you want to see combined data for all six months, type \"all\".";
pub const DAY_QUESTION: &str = "Which day of the week would you like to explore? \
If you want to see data for all seven days, type \"all\".";

const CITY_HINT: &str = "You must enter one of the three cities in the prompt as it is written.";
const MONTH_HINT: &str = "Please choose a month in the first half of the year. Enter without abbreviations. \
If you want to see data for all months January through June, type \"all\".";
const DAY_HINT: &str = "Enter the day without abbreviations, ie \"Friday\". \
If you want to see data for every day of the week combined, type \"all\".";
const YES_NO_HINT: &str = "Your input must be yes or no.";

// ── Confirmation ──────────────────────────────────────────────────────────────

/// A validated yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl FromStr for Confirmation {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(Confirmation::Yes),
            "no" | "n" => Ok(Confirmation::No),
            _ => Err(InvalidChoice {
                kind: "answer",
                input: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confirmation::Yes => f.write_str("yes"),
            Confirmation::No => f.write_str("no"),
        }
    }
}

// ── Prompter ──────────────────────────────────────────────────────────────────

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Write `text` verbatim.
    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask until the answer parses as `T`. `hint` is printed after each
    /// rejected answer.
    pub fn choose<T>(&mut self, question: &str, hint: &str) -> Result<T>
    where
        T: FromStr<Err = InvalidChoice>,
    {
        loop {
            let answer = self.read_answer(question)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!(%err, "rejected answer");
                    writeln!(self.output, "\n{}. {}", capitalize(&err.to_string()), hint)?;
                }
            }
        }
    }

    pub fn ask_city(&mut self) -> Result<City> {
        self.choose(CITY_QUESTION, CITY_HINT)
    }

    pub fn ask_month(&mut self) -> Result<MonthFilter> {
        self.choose(MONTH_QUESTION, MONTH_HINT)
    }

    pub fn ask_day(&mut self) -> Result<DayFilter> {
        self.choose(DAY_QUESTION, DAY_HINT)
    }

    /// City, then month, then day.
    pub fn ask_selection(&mut self) -> Result<FilterSelection> {
        let city = self.ask_city()?;
        let month = self.ask_month()?;
        let day = self.ask_day()?;
        Ok(FilterSelection::new(city, month, day))
    }

    /// `true` for yes, `false` for no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer: Confirmation = self.choose(question, YES_NO_HINT)?;
        Ok(answer == Confirmation::Yes)
    }

    fn read_answer(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "\n{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
