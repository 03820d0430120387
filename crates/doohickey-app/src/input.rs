// Where tool input comes from: a file, stdin, or a literal argument.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `-` is stdin, anything else a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// A missing argument falls back to stdin, unless stdin is a terminal.
    pub fn detect(arg: Option<&str>) -> Result<Self> {
        match arg {
            Some(arg) => Ok(Self::from_arg(arg)),
            None => {
                if io::stdin().is_terminal() {
                    Err(anyhow!("No input provided. Pass a file or pipe text into stdin."))
                } else {
                    Ok(InputSource::Stdin)
                }
            }
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            InputSource::File(path) => Some(path),
            InputSource::Stdin => None,
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
        }
    }
}

/// Drop the single line terminator a shell pipe appends.
pub fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Literal text argument, or stdin without its trailing newline.
pub fn text_argument(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => InputSource::detect(None)?
            .read()
            .map(strip_trailing_newline),
    }
}
