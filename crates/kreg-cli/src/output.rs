//! Output formatting utilities for the CLI

use comfy_table::{Cell, Color};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Context for output formatting
#[derive(Debug, Clone)]
pub struct OutputContext {
    pub json: bool,
    pub no_color: bool,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(json: bool, no_color: bool, quiet: bool) -> Self {
        // Disable colors if NO_COLOR is set or --no-color flag is used
        let no_color = no_color || std::env::var("NO_COLOR").is_ok();

        Self {
            json,
            no_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }

        if self.no_color {
            println!("✓ {}", msg);
        } else {
            println!("{} {}", "✓".green(), msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        if self.no_color {
            eprintln!("✗ {}", msg);
        } else {
            eprintln!("{} {}", "✗".red(), msg);
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }

        if self.no_color {
            eprintln!("! {}", msg);
        } else {
            eprintln!("{} {}", "!".yellow(), msg);
        }
    }

    /// Print an info message
    pub fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }

        println!("  {}", msg);
    }

    /// Echo captured runtime output to stderr, indented.
    ///
    /// Shown even in quiet mode since it explains a failure.
    pub fn runtime_output(&self, output: &str) {
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            if self.no_color {
                eprintln!("    {}", line);
            } else {
                eprintln!("    {}", line.dimmed());
            }
        }
    }

    /// Print JSON output
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        println!("{}", output);
        Ok(())
    }

    /// Create a pass/fail cell for tables
    pub fn check_cell(&self, passed: bool, required: bool) -> Cell {
        let (text, color) = match (passed, required) {
            (true, _) => ("pass", Color::Green),
            (false, true) => ("fail", Color::Red),
            (false, false) => ("skip", Color::Yellow),
        };

        let cell = Cell::new(text);
        if self.no_color {
            cell
        } else {
            cell.fg(color)
        }
    }
}

/// Helper for building tables using comfy-table
pub struct TableBuilder {
    table: comfy_table::Table,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        use comfy_table::{presets::UTF8_FULL, ContentArrangement};

        let mut table = comfy_table::Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers);

        Self { table }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.table.add_row(row);
    }

    pub fn build(self) -> comfy_table::Table {
        self.table
    }
}
