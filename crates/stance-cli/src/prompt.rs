//! Line-oriented prompts over a reader/writer pair.
//!
//! Every prompt returns `Ok(None)` once input is exhausted, which ends the
//! session.

use std::io::{self, BufRead, Write};

use stance_core::annotation::{Acceptability, Ease};
use stance_core::verification::{Keep, TransformationSource};

/// A radio option with a fixed display label.
pub trait Labeled: Copy {
    fn label(self) -> &'static str;
}

impl Labeled for Acceptability {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl Labeled for Ease {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl Labeled for Keep {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl Labeled for TransformationSource {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

pub struct Prompter<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Prompter<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Ask for one of `options`. An empty answer picks the first option.
    /// Answers match by 1-based number, full label, or unique label prefix,
    /// ignoring case. Anything else re-asks.
    pub fn choose<T: Labeled>(&mut self, question: &str, options: &[T]) -> io::Result<Option<T>> {
        let Some(&default) = options.first() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no options"));
        };
        let listing = options
            .iter()
            .enumerate()
            .map(|(i, o)| {
                if i == 0 {
                    format!("[{}] {} (default)", i + 1, o.label())
                } else {
                    format!("[{}] {}", i + 1, o.label())
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        loop {
            self.say(&format!("\n{question}\n  {listing}\n> "))?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(Some(default));
            }
            if let Some(choice) = match_option(answer, options) {
                return Ok(Some(choice));
            }
            let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
            self.say(&format!(
                "Please answer with one of: {}\n",
                labels.join(", ")
            ))?;
        }
    }

    /// Ask for free text. The answer is kept as typed, empty included.
    pub fn text(&mut self, question: &str) -> io::Result<Option<String>> {
        self.say(&format!("\n{question}\n> "))?;
        self.read_line()
    }

    /// Yes/no question where an empty answer means `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            self.say(&format!("\n{question} {hint} "))?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.say("Please answer y or n.\n")?,
            }
        }
    }
}

fn match_option<T: Labeled>(answer: &str, options: &[T]) -> Option<T> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    let lower = answer.to_lowercase();
    if let Some(exact) = options
        .iter()
        .find(|o| o.label().to_lowercase() == lower)
    {
        return Some(*exact);
    }
    let mut prefixed = options
        .iter()
        .filter(|o| o.label().to_lowercase().starts_with(&lower));
    match (prefixed.next(), prefixed.next()) {
        (Some(only), None) => Some(*only),
        _ => None,
    }
}
