//! Console I/O, grounded on `original_source/src/shell/Terminal.cpp`.
//! The original colors output with `rang`; `colored` is this
//! workspace's equivalent, disabled wholesale with `--no-color` via
//! `colored::control::set_override`.

use std::io::{self, Write};

use colored::Colorize;
use rill_util::RillError;

pub struct Terminal {
    prompt: String,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self { prompt: ">".to_string() }
    }

    pub fn print_welcome(&self) {
        println!("Welcome to rill!\n");
    }

    pub fn print_prompt(&self) {
        print!("\n{}  ", self.prompt.green());
        let _ = io::stdout().flush();
    }

    pub fn print(&self, text: &str) {
        print!("{text}");
        let _ = io::stdout().flush();
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    fn print_diagnostic(&self, e: &RillError) {
        self.print_error(&format!("\nError! Line {}: {}", e.line, e.message));
    }

    pub fn print_errors<'a>(&self, errors: impl IntoIterator<Item = &'a RillError>) {
        for e in errors {
            self.print_diagnostic(e);
        }
    }

    /// `Ok(None)` signals EOF (Ctrl-D, or a piped input stream running
    /// dry) rather than a blank line the user typed.
    pub fn accept_input(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = io::stdin().read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
