//! Line input for the console session

#[cfg(test)]
use std::collections::VecDeque;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

/// Raised when the input stream closes (Ctrl-D, Ctrl-C, or end of script).
#[derive(Error, Debug)]
#[error("end of input")]
pub struct EndOfInput;

/// A source of prompted input lines.
pub trait LineSource {
    /// Show `prompt` and read one line without its trailing newline.
    ///
    /// Returns `Err(EndOfInput)` once no more input is available.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Interactive terminal input with line editing and history.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    /// Open the terminal editor.
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(line)
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Err(EndOfInput.into()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Pre-recorded input, used to drive sessions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Scripted {
    lines: VecDeque<String>,
}

#[cfg(test)]
impl Scripted {
    /// Build a script from lines, consumed in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
impl LineSource for Scripted {
    fn read_line(&mut self, _prompt: &str) -> Result<String> {
        self.lines.pop_front().ok_or_else(|| EndOfInput.into())
    }
}
