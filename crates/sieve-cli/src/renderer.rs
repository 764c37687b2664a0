//! Terminal rendering of the markdown produced by `sieve-core`.

use std::io::{self, Write};

use anyhow::Result;
use sieve_core::display::{Notice, Severity};
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled with termimad or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            // Headers keep their hash marks.
            for line in markdown.lines() {
                if line.starts_with('#') {
                    writeln!(out, "\x1b[36m{line}\x1b[0m")?;
                } else {
                    writeln!(out, "{}", self.skin.inline(line))?;
                }
            }
        } else {
            write!(out, "{markdown}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render a one-line notice, colored by severity.
    pub fn notice(&self, notice: &Notice) -> Result<()> {
        if !self.rich_enabled {
            return self.render(&notice.to_string());
        }

        let color = match notice.severity {
            Severity::Success => "32",
            Severity::Info => "34",
            Severity::Error => "31",
        };
        let mut out = io::stdout().lock();
        write!(out, "\x1b[{color}m{notice}\x1b[0m")?;
        out.flush()?;
        Ok(())
    }

    /// Print a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            write!(out, "\x1b[1m{text}\x1b[0m ")?;
        } else {
            write!(out, "{text} ")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
