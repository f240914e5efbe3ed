// Line prompts — stdin input with typed re-prompting
//
// Invalid answers never abort the session: the parse error is shown and
// the same field is asked again. End of input (Ctrl-D, closed pipe) is
// reported as None so callers can wind the session down cleanly.

use anyhow::Result;
use std::io::{self, IsTerminal, Write};

use crate::tasks::ParseError;

pub struct Prompt {
    interactive: bool,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Read one trimmed line; Ok(None) on end of input
    pub fn line(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().read_line(&mut input)?;
        if read == 0 {
            // EOF: add the newline the terminal no longer prints
            if self.interactive {
                println!();
            }
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer; Ok(None) on end of input
    pub fn field<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, ParseError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.line(label)? else {
                return Ok(None);
            };
            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => eprintln!("✗ {}", err),
            }
        }
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}
