// Interactive prompt layer: blocking, line-oriented terminal input built
// on dialoguer, plus a spinner helper for network round trips.

use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::tty::IsTty;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

/// Returned when the user picks the cancel entry of a selection menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled by user")
    }
}

impl Error for Cancelled {}

/// Free-text prompt. When `required`, dialoguer re-prompts until the
/// input is non-empty; otherwise an empty answer is accepted.
pub fn text(prompt: &str, required: bool) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(!required)
        .interact_text()
        .context("failed to read input")
}

/// Free-text prompt where an empty answer resolves to `default`.
pub fn text_with_default(prompt: &str, default: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .context("failed to read input")
}

/// Password prompt: masked when stdin is an interactive terminal, a plain
/// (required) line read otherwise so the CLI stays scriptable.
pub fn password(prompt: &str) -> Result<String> {
    if io::stdin().is_tty() {
        return Password::new()
            .with_prompt(prompt)
            .interact()
            .context("failed to read password");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}: ", prompt);
        io::stdout().flush()?;
        match lines.next() {
            Some(line) => {
                let input = line.context("failed to read password")?.trim().to_string();
                if input.is_empty() {
                    println!("This field is required");
                    continue;
                }
                return Ok(input);
            }
            None => bail!("failed to read password: end of input"),
        }
    }
}

pub fn is_valid_email(input: &str) -> bool {
    input.contains('@') && input.contains('.')
}

/// Email prompt; re-prompts until the input looks like an address.
pub fn email(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if is_valid_email(input) {
                Ok(())
            } else {
                Err("invalid email format")
            }
        })
        .interact_text()
        .context("failed to read input")
}

/// Yes/no confirmation: `y`/`yes` answers true, `n`/`no` or an empty
/// answer false.
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .wait_for_newline(true)
        .interact()
        .context("failed to read input")
}

/// An entry of a selection menu: the label is shown, the value returned.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Index(usize),
    Cancel,
}

fn parse_selection(input: &str, count: usize, allow_cancel: bool) -> Option<Selection> {
    if allow_cancel && input == "0" {
        return Some(Selection::Cancel);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(Selection::Index(n - 1)),
        _ => None,
    }
}

/// Numbered selection menu: renders a 1-based list (plus `0. Cancel` when
/// cancellable) and re-prompts on non-numeric or out-of-range input.
/// Cancelling yields the distinguished [`Cancelled`] error.
pub fn select(prompt: &str, options: &[SelectOption], allow_cancel: bool) -> Result<String> {
    println!("\n{}:", prompt);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.label);
    }
    if allow_cancel {
        println!("  0. Cancel");
    }

    loop {
        let input: String = Input::<String>::new()
            .with_prompt(format!("Select an option [1-{}]", options.len()))
            .allow_empty(true)
            .interact_text()
            .context("failed to read input")?;

        match parse_selection(input.trim(), options.len(), allow_cancel) {
            Some(Selection::Cancel) => return Err(Cancelled.into()),
            Some(Selection::Index(i)) => return Ok(options[i].value.clone()),
            None => {
                let low = if allow_cancel { 0 } else { 1 };
                println!(
                    "Please enter a number between {} and {}",
                    low,
                    options.len()
                );
            }
        }
    }
}

/// Spinner shown while a request is in flight. The caller is expected to
/// call `finish_and_clear` once the round trip completes.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
